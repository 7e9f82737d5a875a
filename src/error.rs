//! Error types for the collaborator boundary
//!
//! The simulation itself never fails. Errors only arise when talking to
//! rendering, audio, or leaderboard collaborators, and the driver reports and
//! ignores them.

use std::fmt;

/// Failure reported by a rendering or audio collaborator
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollaboratorError {
    /// Collaborator is not available (no device, context lost, etc.)
    Unavailable { collaborator: &'static str },
    /// Collaborator has no record of the referenced object
    UnknownObject { id: u32 },
}

impl fmt::Display for CollaboratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { collaborator } => write!(f, "{collaborator} unavailable"),
            Self::UnknownObject { id } => write!(f, "unknown object id {id}"),
        }
    }
}

impl std::error::Error for CollaboratorError {}

/// Failure while submitting to or reading from a leaderboard
#[derive(Debug)]
pub enum LeaderboardError {
    /// Backing store could not be read or written
    Io(std::io::Error),
    /// Backing store content is not a JSON array
    Parse(serde_json::Error),
    /// Submission attempted with a blank nickname
    EmptyNickname,
    /// The final score was already submitted
    AlreadySubmitted,
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "leaderboard io error: {err}"),
            Self::Parse(err) => write!(f, "leaderboard parse error: {err}"),
            Self::EmptyNickname => write!(f, "enter a nickname"),
            Self::AlreadySubmitted => write!(f, "already submitted"),
        }
    }
}

impl std::error::Error for LeaderboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::EmptyNickname | Self::AlreadySubmitted => None,
        }
    }
}

impl From<std::io::Error> for LeaderboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for LeaderboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
