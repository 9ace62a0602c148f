//! Session role model.

use serde::{Deserialize, Serialize};

/// The two roles a remote session can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionMode {
    /// Controls the remote machine
    #[default]
    Leader,
    /// Is controlled by the remote machine
    Follower,
}

impl ConnectionMode {
    /// Returns the opposite role
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Leader => Self::Follower,
            Self::Follower => Self::Leader,
        }
    }

    /// Lowercase identifier as stored on disk and in connect links
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leader => "leader",
            Self::Follower => "follower",
        }
    }

    /// Human-readable name for prompts
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Leader => "Leader",
            Self::Follower => "Follower",
        }
    }

    /// Numeric value used by the host's `connectionMode` setting
    /// (1 = leader, 0 = follower)
    #[must_use]
    pub const fn config_value(self) -> u8 {
        match self {
            Self::Leader => 1,
            Self::Follower => 0,
        }
    }

    /// Inverse of [`Self::config_value`]; anything other than 1 is a follower
    #[must_use]
    pub const fn from_config_value(value: u8) -> Self {
        if value == 1 {
            Self::Leader
        } else {
            Self::Follower
        }
    }
}

impl std::str::FromStr for ConnectionMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "leader" => Ok(Self::Leader),
            "follower" => Ok(Self::Follower),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ConnectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
