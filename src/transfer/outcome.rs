//! Per-file transfer results.

use std::fmt;

/// Why a transfer failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The copy tool ran and exited unsuccessfully
    NonZeroExit { code: Option<i32> },
    /// Anything that prevented the transfer (spawn, I/O, paths)
    Error(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonZeroExit { code: Some(code) } => write!(f, "non-zero exit (code {code})"),
            Self::NonZeroExit { code: None } => write!(f, "non-zero exit (terminated by signal)"),
            Self::Error(message) => f.write_str(message),
        }
    }
}

/// Terminal state of one work list entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    Copied,
    /// Destination already present and `--force` not set
    SkippedExists,
    /// `--dry-run`: nothing launched
    DryRun,
    Failed(FailureReason),
}

impl TransferOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Stable identifier used in JSON output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Copied => "copied",
            Self::SkippedExists => "skipped_exists",
            Self::DryRun => "dry_run",
            Self::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reason_display() {
        assert_eq!(FailureReason::NonZeroExit { code: Some(23) }.to_string(), "non-zero exit (code 23)");
        assert_eq!(
            FailureReason::NonZeroExit { code: None }.to_string(),
            "non-zero exit (terminated by signal)"
        );
        assert_eq!(FailureReason::Error("Failed to launch rsync".into()).to_string(), "Failed to launch rsync");
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(TransferOutcome::Copied.label(), "copied");
        assert_eq!(TransferOutcome::SkippedExists.label(), "skipped_exists");
        assert!(TransferOutcome::Failed(FailureReason::Error(String::new())).is_failure());
        assert!(!TransferOutcome::DryRun.is_failure());
    }
}
