//! Selectable point values

/// Point values the moderator can pick from, in display order
pub const POINT_OPTIONS: [u32; 7] = [50, 100, 150, 200, 250, 300, 500];

/// Point value selected when a game starts
pub const DEFAULT_POINTS: u32 = 100;

/// Is this one of the standard selectable values?
///
/// The engine accepts any positive value; this is only used by surfaces
/// that want to flag an unusual award.
pub fn is_standard(points: u32) -> bool {
    POINT_OPTIONS.contains(&points)
}
