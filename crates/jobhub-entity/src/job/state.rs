//! Job state enumeration and its forward-only transition rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a background job as recorded in the result store.
///
/// Wire names follow the upper-case convention used by the status endpoint
/// (`PENDING`, `STARTED`, `SUCCESS`, `FAILURE`). Any string not recognized
/// when reading a record back decodes as [`JobState::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobState {
    /// Enqueued, not yet claimed by a worker.
    Pending,
    /// Claimed by a worker and executing.
    Started,
    /// Completed; the record carries a result.
    Success,
    /// Failed; the record carries an error description.
    Failure,
    /// Any state this build does not recognize.
    #[serde(other)]
    Unknown,
}

impl JobState {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failure)
    }

    /// Position along `Pending -> Started -> terminal`.
    fn rank(&self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Started => Some(1),
            Self::Success | Self::Failure => Some(2),
            Self::Unknown => None,
        }
    }

    /// Whether moving from `self` to `next` respects the forward-only chain.
    ///
    /// Terminal states accept nothing, and `Unknown` never participates in
    /// a transition.
    pub fn can_transition_to(&self, next: JobState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), next.rank()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }

    /// Return the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Started => "STARTED",
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
