use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Terminal state of a build, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildOutcome {
    /// The build succeeded
    Success,
    /// The build failed
    Failed,
    /// Any other non-success terminal state (cancelled, unknown, ...)
    Incomplete,
}

impl BuildOutcome {
    /// Only `Success` counts as success; everything else triggers rollback.
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Success)
    }
}

impl FromStr for BuildOutcome {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "success" | "successful" => BuildOutcome::Success,
            "failed" | "failure" => BuildOutcome::Failed,
            _ => BuildOutcome::Incomplete,
        })
    }
}

impl From<bool> for BuildOutcome {
    fn from(succeeded: bool) -> Self {
        if succeeded {
            BuildOutcome::Success
        } else {
            BuildOutcome::Failed
        }
    }
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildOutcome::Success => write!(f, "success"),
            BuildOutcome::Failed => write!(f, "failed"),
            BuildOutcome::Incomplete => write!(f, "incomplete"),
        }
    }
}
