//! Audible/visual acknowledgment cues
//!
//! The engine never plays anything itself. It hands a `Cue` to whatever
//! `CueSink` the surface installed and moves on; nothing flows back.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

/// Named cue kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// Points were awarded
    Success,
    /// The game finished
    Victory,
    /// The countdown reached zero
    TimeUp,
}

/// Delay between consecutive notes of a cue
pub const NOTE_SPACING_MS: u64 = 100;

/// Length of each note
pub const NOTE_LENGTH_MS: u64 = 300;

impl Cue {
    /// Note frequencies in hertz, played in order
    pub fn tones(&self) -> &'static [f32] {
        match self {
            // C5 E5 G5
            Cue::Success => &[523.25, 659.25, 783.99],
            // C4 E4 G4 C5
            Cue::Victory => &[261.63, 329.63, 392.0, 523.25],
            // Descending
            Cue::TimeUp => &[200.0, 150.0, 100.0],
        }
    }

    /// Total length of the cue from first note start to last note end
    pub fn duration_ms(&self) -> u64 {
        let notes = self.tones().len() as u64;
        notes.saturating_sub(1) * NOTE_SPACING_MS + NOTE_LENGTH_MS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Cue::Success => "success",
            Cue::Victory => "victory",
            Cue::TimeUp => "timeup",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receiver for fire-and-forget cue notifications
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Discards every cue
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCues;

impl CueSink for SilentCues {
    fn play(&mut self, _cue: Cue) {}
}

/// Keeps every cue in memory, in the order received
#[derive(Debug, Default, Clone)]
pub struct RecordingCues {
    played: Vec<Cue>,
}

impl RecordingCues {
    pub fn new() -> Self {
        RecordingCues::default()
    }

    pub fn played(&self) -> &[Cue] {
        &self.played
    }

    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|&&c| c == cue).count()
    }
}

impl CueSink for RecordingCues {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }
}

/// Rings the terminal bell once per note and writes a cue line with its length
///
/// Write failures are dropped: a cue has no way to report back.
pub struct BellCues<W: Write> {
    out: W,
}

impl<W: Write> BellCues<W> {
    pub fn new(out: W) -> Self {
        BellCues { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl BellCues<std::io::Stdout> {
    pub fn stdout() -> Self {
        BellCues::new(std::io::stdout())
    }
}

impl<W: Write> CueSink for BellCues<W> {
    fn play(&mut self, cue: Cue) {
        let bells = "\x07".repeat(cue.tones().len());
        let _ = writeln!(self.out, "{bells}[{cue} {}ms]", cue.duration_ms());
        let _ = self.out.flush();
    }
}

impl<S: CueSink + ?Sized> CueSink for Box<S> {
    fn play(&mut self, cue: Cue) {
        (**self).play(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_tables() {
        assert_eq!(Cue::Success.tones().len(), 3);
        assert_eq!(Cue::Victory.tones().len(), 4);
        assert_eq!(Cue::TimeUp.tones(), &[200.0, 150.0, 100.0]);
        assert_eq!(Cue::Victory.duration_ms(), 600);
    }

    #[test]
    fn test_recording_sink() {
        let mut sink = RecordingCues::new();
        sink.play(Cue::Success);
        sink.play(Cue::Success);
        sink.play(Cue::TimeUp);

        assert_eq!(sink.played(), &[Cue::Success, Cue::Success, Cue::TimeUp]);
        assert_eq!(sink.count(Cue::Success), 2);
        assert_eq!(sink.count(Cue::Victory), 0);
    }

    #[test]
    fn test_bell_sink_output() {
        let mut sink = BellCues::new(Vec::new());
        sink.play(Cue::Victory);
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "\x07\x07\x07\x07[victory 600ms]\n");
    }

    #[test]
    fn test_boxed_sink() {
        let mut sink: Box<dyn CueSink> = Box::new(SilentCues);
        sink.play(Cue::Success);
    }
}
