//! # Progress Reporting and Statistics Module
//!
//! Questo modulo gestisce il feedback verso l'operatore durante scansione e trasferimento.
//!
//! ## Responsabilità:
//! - `ProgressReporter`: trait iniettato in scanner e orchestratore (nessuno stato globale)
//! - `ConsoleReporter`: spinner e progress bar con `indicatif`
//! - `SilentReporter`: nessun output, per uso come libreria e nei test
//! - `TransferStats`: statistiche finali del batch
//!
//! ## Visual feedback:
//! ```text
//! ⠋ Global Media Download Progression 3/10 [=========>------------------------------]
//! ⠙ Downloading Show.S01E04.mkv - Speed: 42.43MB/s - Remaining Time: 0:01:35 [====>---] 45%
//! ```

use crate::file_manager::FileManager;
use crate::scanner::{MediaEntry, ScanReport};
use crate::transfer::outcome::TransferOutcome;
use crate::transfer::progress_line::TransferProgressSample;
use crate::utils::format_elapsed;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Sink for scan and transfer progress events
pub trait ProgressReporter: Send + Sync {
    fn scan_started(&self, _source_root: &Path) {}

    /// Called once per visited file
    fn file_checked(&self, _path: &Path) {}

    fn scan_finished(&self, _report: &ScanReport) {}

    fn batch_started(&self, _total: usize) {}

    fn entry_started(&self, _index: usize, _total: usize, _entry: &MediaEntry) {}

    fn entry_progress(&self, _entry: &MediaEntry, _sample: &TransferProgressSample) {}

    /// `completed` is the global counter after this entry
    fn entry_finished(&self, _entry: &MediaEntry, _outcome: &TransferOutcome, _completed: usize, _total: usize) {}

    fn batch_finished(&self, _stats: &TransferStats) {}
}

/// Reporter that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
}

/// Terminal progress with a scan spinner, a global bar and a per-file bar
pub struct ConsoleReporter {
    multi: MultiProgress,
    scan: ProgressBar,
    global: ProgressBar,
    file: ProgressBar,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        let scan = ProgressBar::new_spinner();
        scan.set_style(style("{spinner:.green} {msg}"));

        let global = ProgressBar::new(0);
        global.set_style(style("{spinner:.green} {msg} [{bar:40.cyan/blue}]"));

        let file = ProgressBar::new(100);
        file.set_style(style("{spinner:.green} {msg} [{bar:30.cyan/blue}] {pos}%"));

        Self {
            multi: MultiProgress::new(),
            scan,
            global,
            file,
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleReporter {
    fn scan_started(&self, _source_root: &Path) {
        let scan = self.multi.add(self.scan.clone());
        scan.set_message("Building Media List");
        scan.enable_steady_tick(Duration::from_millis(100));
    }

    fn file_checked(&self, path: &Path) {
        self.scan.set_message(format!("Checking {}", FileManager::display_name(path)));
    }

    fn scan_finished(&self, _report: &ScanReport) {
        self.scan.finish_and_clear();
    }

    fn batch_started(&self, total: usize) {
        self.global.set_length(total as u64);
        self.global.set_message(format!("Global Media Download Progression 0/{total}"));
        self.multi.add(self.global.clone());
        self.multi.add(self.file.clone());
        self.global.enable_steady_tick(Duration::from_millis(100));
    }

    fn entry_started(&self, _index: usize, _total: usize, entry: &MediaEntry) {
        self.file.reset();
        self.file.set_message(format!("Handling {}", entry.dest_file_name()));
    }

    fn entry_progress(&self, entry: &MediaEntry, sample: &TransferProgressSample) {
        self.file.set_position(u64::from(sample.percent));
        self.file.set_message(format!(
            "Downloading {} - Speed: {} - Remaining Time: {}",
            entry.dest_file_name(),
            sample.speed,
            sample.eta
        ));
    }

    fn entry_finished(&self, entry: &MediaEntry, outcome: &TransferOutcome, completed: usize, total: usize) {
        let name = entry.dest_file_name();
        match outcome {
            TransferOutcome::Copied => {
                self.file.set_position(100);
                self.file.set_message(format!("{name} Downloaded"));
                self.global.set_position(completed as u64);
                self.global
                    .set_message(format!("Global Media Download Progression {completed}/{total}"));
            }
            TransferOutcome::SkippedExists => self.file.set_message(format!("{name} already exists")),
            TransferOutcome::DryRun => self.file.set_message(format!("{name} planned (dry run)")),
            TransferOutcome::Failed(reason) => self.file.set_message(format!("{name} failed: {reason}")),
        }
    }

    fn batch_finished(&self, stats: &TransferStats) {
        self.file.finish_and_clear();
        self.global.finish_with_message(stats.format_summary());
    }
}

/// Statistics of a transfer batch
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransferStats {
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
    pub planned: usize,
    pub elapsed: Duration,
}

impl TransferStats {
    pub fn from_outcomes(outcomes: &[TransferOutcome], elapsed: Duration) -> Self {
        let mut stats = Self {
            elapsed,
            ..Self::default()
        };
        for outcome in outcomes {
            match outcome {
                TransferOutcome::Copied => stats.copied += 1,
                TransferOutcome::SkippedExists => stats.skipped += 1,
                TransferOutcome::DryRun => stats.planned += 1,
                TransferOutcome::Failed(_) => stats.failed += 1,
            }
        }
        stats
    }

    pub fn processed(&self) -> usize {
        self.copied + self.skipped + self.failed + self.planned
    }

    pub fn format_summary(&self) -> String {
        let mut summary = format!(
            "Processed: {} files | Copied: {} | Already present: {} | Failed: {}",
            self.processed(),
            self.copied,
            self.skipped,
            self.failed
        );
        if self.planned > 0 {
            summary.push_str(&format!(" | Planned (dry run): {}", self.planned));
        }
        summary.push_str(&format!(" | Done in {}", format_elapsed(self.elapsed)));
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::outcome::FailureReason;

    #[test]
    fn test_stats_from_outcomes() {
        let outcomes = vec![
            TransferOutcome::Copied,
            TransferOutcome::Copied,
            TransferOutcome::SkippedExists,
            TransferOutcome::Failed(FailureReason::NonZeroExit { code: Some(12) }),
        ];
        let stats = TransferStats::from_outcomes(&outcomes, Duration::from_secs(90));

        assert_eq!(stats.copied, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.planned, 0);
        assert_eq!(stats.processed(), 4);
        assert_eq!(
            stats.format_summary(),
            "Processed: 4 files | Copied: 2 | Already present: 1 | Failed: 1 | Done in 1m 30s"
        );
    }

    #[test]
    fn test_summary_mentions_dry_run() {
        let outcomes = vec![TransferOutcome::DryRun, TransferOutcome::SkippedExists];
        let stats = TransferStats::from_outcomes(&outcomes, Duration::from_millis(500));

        assert!(stats.format_summary().contains("Planned (dry run): 1"));
        assert!(stats.format_summary().ends_with("Done in 0.5s"));
    }

    #[test]
    fn test_console_reporter_accepts_full_sequence() {
        let reporter = ConsoleReporter::new();
        let entry = MediaEntry {
            source_path: "/src/Show/Show.S01E01.mkv".into(),
            dest_path: "/dst/Series/Show/Season.01/Show.S01E01.mkv".into(),
            extension: "mkv".to_string(),
        };
        let sample = TransferProgressSample {
            bytes_transferred: 10,
            percent: 45,
            speed: "3.2MB/s".to_string(),
            eta: "0:01:30".to_string(),
        };

        reporter.scan_started(Path::new("/src/Show"));
        reporter.file_checked(&entry.source_path);
        reporter.scan_finished(&ScanReport::default());
        reporter.batch_started(1);
        reporter.entry_started(0, 1, &entry);
        reporter.entry_progress(&entry, &sample);
        assert_eq!(reporter.file.position(), 45);
        reporter.entry_finished(&entry, &TransferOutcome::Copied, 1, 1);
        assert_eq!(reporter.global.position(), 1);
        reporter.batch_finished(&TransferStats::default());
    }
}
