//! Recording status reported by the backend.

use serde::{Deserialize, Serialize};

/// Status of a recording task as reported by the backend.
///
/// Read-only on the console side. Unknown strings are kept verbatim so a
/// newer backend does not break loading.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StreamerStatus {
    /// Currently recording.
    Working,
    /// Offline, polling.
    Idle,
    /// Waiting for a free worker.
    Pending,
    /// Checking whether the stream is live.
    Inspecting,
    /// Live but outside the configured time range.
    OutOfSchedule,
    Other(String),
}

impl StreamerStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Working => "Working",
            Self::Idle => "Idle",
            Self::Pending => "Pending",
            Self::Inspecting => "Inspecting",
            Self::OutOfSchedule => "OutOfSchedule",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "Working" => Self::Working,
            "Idle" => Self::Idle,
            "Pending" => Self::Pending,
            "Inspecting" => Self::Inspecting,
            "OutOfSchedule" => Self::OutOfSchedule,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Working)
    }
}

impl From<String> for StreamerStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<StreamerStatus> for String {
    fn from(status: StreamerStatus) -> Self {
        match status {
            StreamerStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for StreamerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
