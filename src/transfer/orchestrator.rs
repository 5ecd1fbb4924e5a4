//! # Transfer Orchestrator
//!
//! Esegue la work list in modo strettamente sequenziale: un solo processo di
//! copia alla volta, nell'ordine di scoperta.
//!
//! ## Responsabilità:
//! - Crea le cartelle di destinazione (idempotente)
//! - Salta i file già presenti, a meno di `--force`
//! - Riscrive il path sorgente con le regole configurate
//! - Lancia il tool di copia e inoltra il progresso al reporter
//! - Isola i fallimenti: un errore su un file non interrompe il batch

use crate::config::JobConfig;
use crate::error::MediaError;
use crate::file_manager::FileManager;
use crate::progress::{ProgressReporter, TransferStats};
use crate::scanner::MediaEntry;
use crate::transfer::copy_tool::CopyCommand;
use crate::transfer::outcome::{FailureReason, TransferOutcome};
use crate::transfer::progress_line::parse_progress_line;
use crate::transfer::progress_tracker::ProgressTracker;
use crate::transfer::rewrite::rewrite_source;
use anyhow::Result;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Result of a batch: one outcome per entry and the summary handed to the reporter
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub outcomes: Vec<TransferOutcome>,
    pub stats: TransferStats,
}

/// Sequential executor of a work list
pub struct TransferOrchestrator<'a> {
    config: &'a JobConfig,
    reporter: &'a dyn ProgressReporter,
}

impl<'a> TransferOrchestrator<'a> {
    pub fn new(config: &'a JobConfig, reporter: &'a dyn ProgressReporter) -> Self {
        Self { config, reporter }
    }

    /// Transfer every entry in order
    pub async fn run(&self, entries: &[MediaEntry]) -> BatchReport {
        let start_time = Instant::now();
        let total = entries.len();
        let mut tracker = ProgressTracker::new(total);
        let mut outcomes = Vec::with_capacity(total);

        let mut total_size = 0u64;
        for entry in entries {
            total_size += FileManager::file_size(&entry.source_path).await.unwrap_or(0);
        }
        debug!("{} media to transfer ({})", total, FileManager::format_size(total_size));

        self.reporter.batch_started(total);

        for (index, entry) in entries.iter().enumerate() {
            tracker.begin_entry();
            self.reporter.entry_started(index, total, entry);

            let outcome = match self.transfer_entry(entry, &mut tracker).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(
                        "Something went wrong while copying media {}: {:#}",
                        entry.source_path.display(),
                        e
                    );
                    TransferOutcome::Failed(FailureReason::Error(format!("{e:#}")))
                }
            };

            tracker.finish_entry(&outcome);
            self.reporter
                .entry_finished(entry, &outcome, tracker.completed(), tracker.total());
            outcomes.push(outcome);
        }

        let stats = TransferStats::from_outcomes(&outcomes, start_time.elapsed());
        self.reporter.batch_finished(&stats);
        BatchReport { outcomes, stats }
    }

    async fn transfer_entry(&self, entry: &MediaEntry, tracker: &mut ProgressTracker) -> Result<TransferOutcome> {
        let dest_dir = entry.dest_path.parent().ok_or_else(|| {
            MediaError::Validation(format!("Destination {} has no parent folder", entry.dest_path.display()))
        })?;

        if !self.config.dry_run {
            FileManager::ensure_dir(dest_dir).await?;
        }

        let source = rewrite_source(&self.config.library.path_rewrites, &entry.source_path);

        if entry.dest_path.exists() && !self.config.force {
            warn!("Media {} Already exists - Skipping", entry.dest_file_name());
            return Ok(TransferOutcome::SkippedExists);
        }

        let command = CopyCommand::new(&self.config.library, &source, &entry.dest_path);

        if self.config.dry_run {
            info!("🔍 Dry run: {}", command);
            return Ok(TransferOutcome::DryRun);
        }

        debug!("Running {}", command);
        let mut running = command.spawn()?;
        tracker.start_transfer();

        while let Some(line) = running.next_line().await? {
            debug!("Process output: {}", line);
            if let Some(sample) = parse_progress_line(&line) {
                if tracker.update(&sample) {
                    self.reporter.entry_progress(entry, &sample);
                }
            }
        }

        let exit = running.wait().await?;
        if exit.success {
            debug!("Media {} copied", entry.dest_file_name());
            return Ok(TransferOutcome::Copied);
        }

        let failure = MediaError::ToolFailed {
            tool: command.program().to_string(),
            code: exit.code,
        };
        error!(
            "Something went wrong while copying media {} (stopped at {}%): {} {}",
            entry.source_path.display(),
            tracker.current_percent(),
            failure,
            exit.stderr.trim()
        );
        Ok(TransferOutcome::Failed(FailureReason::NonZeroExit { code: exit.code }))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::MediaCategory;
    use crate::transfer::progress_line::TransferProgressSample;
    use crate::transfer::rewrite::PathRewrite;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Fake copy tool: prints rsync-like progress then copies `$1` to `$2`.
    /// Every invocation is appended to `$MARKER` (first script argument).
    const FAKE_COPY: &str = r#"marker="$1"; shift
echo "$1" >> "$marker"
case "$1" in *fail*) echo "rsync: link_stat failed" >&2; exit 23;; esac
printf 'sending incremental file list\n'
printf '%s\n' "$(basename "$1")"
printf '      32,768  50%%    1.00MB/s    0:00:01\r'
printf '      65,536 100%%    2.00MB/s    0:00:00 (xfr#1, to-chk=0/1)\n'
cp "$1" "$2"
"#;

    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<String>>,
        samples: Mutex<Vec<TransferProgressSample>>,
        stats: Mutex<Option<TransferStats>>,
    }

    impl RecordingReporter {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressReporter for RecordingReporter {
        fn batch_started(&self, total: usize) {
            self.events.lock().unwrap().push(format!("batch {total}"));
        }

        fn entry_progress(&self, _entry: &MediaEntry, sample: &TransferProgressSample) {
            self.samples.lock().unwrap().push(sample.clone());
        }

        fn entry_finished(&self, entry: &MediaEntry, outcome: &TransferOutcome, completed: usize, total: usize) {
            self.events.lock().unwrap().push(format!(
                "{} {} {completed}/{total}",
                entry.dest_file_name(),
                outcome.label()
            ));
        }

        fn batch_finished(&self, stats: &TransferStats) {
            self.events.lock().unwrap().push(format!("done {}", stats.processed()));
            *self.stats.lock().unwrap() = Some(stats.clone());
        }
    }

    struct Fixture {
        root: TempDir,
        src: PathBuf,
        dst: PathBuf,
        marker: PathBuf,
        config: JobConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let src = temp_dir.path().join("src");
            let dst = temp_dir.path().join("Series");
            let marker = temp_dir.path().join("invocations.log");
            let script = temp_dir.path().join("fake-copy.sh");
            fs::create_dir_all(&src).unwrap();
            fs::write(&script, FAKE_COPY).unwrap();

            let mut config = JobConfig::new("Show", MediaCategory::Series);
            config.library.path_rewrites = Vec::new();
            config.library.transfer_tool = "sh".to_string();
            config.library.transfer_args = vec![
                script.to_string_lossy().to_string(),
                marker.to_string_lossy().to_string(),
            ];

            Self {
                root: temp_dir,
                src,
                dst,
                marker,
                config,
            }
        }

        fn entry(&self, file_name: &str, episode: &str) -> MediaEntry {
            let source_path = self.src.join(file_name);
            fs::write(&source_path, file_name).unwrap();
            MediaEntry {
                source_path,
                dest_path: self
                    .dst
                    .join("Show")
                    .join("Season.01")
                    .join(format!("Show.{episode}.mkv")),
                extension: "mkv".to_string(),
            }
        }

        fn invocations(&self) -> usize {
            fs::read_to_string(&self.marker)
                .map(|content| content.lines().count())
                .unwrap_or(0)
        }
    }

    #[tokio::test]
    async fn test_copies_and_reports_progress() {
        let fixture = Fixture::new();
        let entries = vec![fixture.entry("Show.S01E01.mkv", "S01E01")];
        let reporter = RecordingReporter::default();

        let outcomes = TransferOrchestrator::new(&fixture.config, &reporter).run(&entries).await.outcomes;

        assert_eq!(outcomes, vec![TransferOutcome::Copied]);
        assert_eq!(fs::read_to_string(&entries[0].dest_path).unwrap(), "Show.S01E01.mkv");
        assert_eq!(
            reporter.events(),
            vec!["batch 1", "Show.S01E01.mkv copied 1/1", "done 1"]
        );

        let samples = reporter.samples.lock().unwrap();
        let percents: Vec<u8> = samples.iter().map(|s| s.percent).collect();
        assert_eq!(percents, vec![50, 100]);
        assert_eq!(samples[1].speed, "2.00MB/s");
    }

    #[tokio::test]
    async fn test_failure_does_not_abort_batch() {
        let fixture = Fixture::new();
        let entries = vec![
            fixture.entry("Show.S01E01.fail.mkv", "S01E01"),
            fixture.entry("Show.S01E02.mkv", "S01E02"),
        ];
        let reporter = RecordingReporter::default();

        let outcomes = TransferOrchestrator::new(&fixture.config, &reporter).run(&entries).await.outcomes;

        assert_eq!(
            outcomes,
            vec![
                TransferOutcome::Failed(FailureReason::NonZeroExit { code: Some(23) }),
                TransferOutcome::Copied,
            ]
        );
        assert!(!entries[0].dest_path.exists());
        assert!(entries[1].dest_path.exists());
        assert_eq!(
            reporter.events(),
            vec![
                "batch 2",
                "Show.S01E01.mkv failed 0/2",
                "Show.S01E02.mkv copied 1/2",
                "done 2"
            ]
        );
    }

    #[tokio::test]
    async fn test_second_run_skips_everything() {
        let fixture = Fixture::new();
        let entries = vec![
            fixture.entry("Show.S01E01.mkv", "S01E01"),
            fixture.entry("Show.S01E02.mkv", "S01E02"),
        ];
        let reporter = RecordingReporter::default();
        let orchestrator = TransferOrchestrator::new(&fixture.config, &reporter);

        let first = orchestrator.run(&entries).await.outcomes;
        assert_eq!(first, vec![TransferOutcome::Copied, TransferOutcome::Copied]);
        assert_eq!(fixture.invocations(), 2);

        let second = orchestrator.run(&entries).await.outcomes;
        assert_eq!(second, vec![TransferOutcome::SkippedExists, TransferOutcome::SkippedExists]);
        assert_eq!(fixture.invocations(), 2);
    }

    #[tokio::test]
    async fn test_force_overwrites_existing() {
        let mut fixture = Fixture::new();
        let entries = vec![fixture.entry("Show.S01E01.mkv", "S01E01")];
        fs::create_dir_all(entries[0].dest_path.parent().unwrap()).unwrap();
        fs::write(&entries[0].dest_path, "old").unwrap();
        fixture.config.force = true;

        let reporter = RecordingReporter::default();
        let outcomes = TransferOrchestrator::new(&fixture.config, &reporter).run(&entries).await.outcomes;

        assert_eq!(outcomes, vec![TransferOutcome::Copied]);
        assert_eq!(fixture.invocations(), 1);
        assert_eq!(fs::read_to_string(&entries[0].dest_path).unwrap(), "Show.S01E01.mkv");
    }

    #[tokio::test]
    async fn test_dry_run_touches_nothing() {
        let mut fixture = Fixture::new();
        let entries = vec![fixture.entry("Show.S01E01.mkv", "S01E01")];
        fixture.config.dry_run = true;

        let reporter = RecordingReporter::default();
        let outcomes = TransferOrchestrator::new(&fixture.config, &reporter).run(&entries).await.outcomes;

        assert_eq!(outcomes, vec![TransferOutcome::DryRun]);
        assert!(!fixture.dst.exists());
        assert_eq!(fixture.invocations(), 0);
        assert_eq!(
            reporter.events(),
            vec!["batch 1", "Show.S01E01.mkv dry_run 0/1", "done 1"]
        );
    }

    #[tokio::test]
    async fn test_missing_tool_fails_each_entry() {
        let mut fixture = Fixture::new();
        let entries = vec![
            fixture.entry("Show.S01E01.mkv", "S01E01"),
            fixture.entry("Show.S01E02.mkv", "S01E02"),
        ];
        fixture.config.library.transfer_tool = "/nonexistent/lamanager-copy".to_string();

        let reporter = RecordingReporter::default();
        let outcomes = TransferOrchestrator::new(&fixture.config, &reporter).run(&entries).await.outcomes;

        assert_eq!(outcomes.len(), 2);
        for outcome in &outcomes {
            match outcome {
                TransferOutcome::Failed(FailureReason::Error(message)) => {
                    assert!(message.contains("Failed to launch"))
                }
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        // Folders are still created before the launch attempt
        assert!(fixture.dst.join("Show").join("Season.01").is_dir());
    }

    #[tokio::test]
    async fn test_source_is_rewritten_before_launch() {
        let mut fixture = Fixture::new();
        let entries = vec![fixture.entry("Show.S01E01.mkv", "S01E01")];
        let mirror = fixture.root.path().join("mirror");
        fs::create_dir_all(&mirror).unwrap();
        fs::write(mirror.join("Show.S01E01.mkv"), "mirrored").unwrap();
        fixture.config.library.path_rewrites = vec![PathRewrite::new(
            fixture.src.to_string_lossy(),
            mirror.to_string_lossy(),
        )];

        let reporter = RecordingReporter::default();
        let outcomes = TransferOrchestrator::new(&fixture.config, &reporter).run(&entries).await.outcomes;

        assert_eq!(outcomes, vec![TransferOutcome::Copied]);
        let invoked = fs::read_to_string(&fixture.marker).unwrap();
        assert_eq!(invoked.trim(), mirror.join("Show.S01E01.mkv").to_str().unwrap());
        assert_eq!(fs::read_to_string(&entries[0].dest_path).unwrap(), "mirrored");
    }

    #[tokio::test]
    async fn test_batch_stats_match_reported_summary() {
        let fixture = Fixture::new();
        let entries = vec![
            fixture.entry("Show.S01E01.fail.mkv", "S01E01"),
            fixture.entry("Show.S01E02.mkv", "S01E02"),
        ];
        let reporter = RecordingReporter::default();

        let report = TransferOrchestrator::new(&fixture.config, &reporter).run(&entries).await;

        assert_eq!(report.stats.copied, 1);
        assert_eq!(report.stats.failed, 1);
        assert_eq!(reporter.stats.lock().unwrap().as_ref(), Some(&report.stats));
    }
}
