//! Parsing of the copy tool's progress lines.
//!
//! rsync `--progress` prints records such as
//! `  1,048,576  45%    3.20MB/s    0:01:30`. Anything else is ignored.

use regex::Regex;
use std::sync::LazyLock;

static RE_PROGRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d[\d,]*)\s+(\d{1,3})%\s+(\d+(?:\.\d+)?[kKMGT]?B/s)\s+(\d+:\d{2}:\d{2})")
        .expect("Failed to create regex pattern for transfer progress")
});

/// One progress snapshot of the file being transferred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferProgressSample {
    pub bytes_transferred: u64,
    /// 0-100
    pub percent: u8,
    /// e.g. `3.20MB/s`
    pub speed: String,
    /// `h:mm:ss`
    pub eta: String,
}

/// Parse a progress record, `None` for any other output
pub fn parse_progress_line(line: &str) -> Option<TransferProgressSample> {
    let captures = RE_PROGRESS.captures(line)?;

    let bytes_transferred = captures[1].replace(',', "").parse::<u64>().ok()?;
    let percent = captures[2].parse::<u16>().ok()?.min(100) as u8;

    Some(TransferProgressSample {
        bytes_transferred,
        percent,
        speed: captures[3].to_string(),
        eta: captures[4].to_string(),
    })
}
