//! Strongly-typed wrappers for scoreboard display strings
//!
//! Names, emojis and color tokens are all strings, but they are never
//! interchangeable. Wrapping them keeps the roster table honest.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Team display name (e.g. "Quiz Masters")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    pub fn new(s: impl Into<String>) -> Self {
        TeamName(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for name lookups from the console
    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TeamName {
    fn from(s: String) -> Self {
        TeamName(s)
    }
}

impl From<&str> for TeamName {
    fn from(s: &str) -> Self {
        TeamName(s.to_string())
    }
}

/// Display color token for a team
///
/// Opaque to the engine. The seed roster uses gradient class names such
/// as "from-blue-400 to-cyan-500"; a renderer may map them however it likes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorToken(String);

impl ColorToken {
    pub fn new(s: impl Into<String>) -> Self {
        ColorToken(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ColorToken {
    fn from(s: &str) -> Self {
        ColorToken(s.to_string())
    }
}
