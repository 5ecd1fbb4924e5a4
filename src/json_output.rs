//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso da altri programmi.
//!
//! ## Responsabilità:
//! - Emette un messaggio JSON per riga su stdout per ogni evento di progresso
//! - Implementa `ProgressReporter`, quindi sostituisce il reporter console con `--json`
//! - I log di `tracing` restano su stderr e non interferiscono con lo stream
//!
//! ## Tipi di messaggi:
//! - `scan_start` / `scan_complete`: costruzione della work list
//! - `start`: inizio del batch di trasferimento
//! - `file_start` / `file_progress` / `file_complete`: ciclo di vita di un file
//! - `complete`: fine del batch con statistiche finali
//! - `error`: errore fatale

use crate::progress::{ProgressReporter, TransferStats};
use crate::scanner::{MediaEntry, ScanReport};
use crate::transfer::outcome::TransferOutcome;
use crate::transfer::progress_line::TransferProgressSample;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage {
    ScanStart {
        source_root: PathBuf,
    },

    ScanComplete {
        files_checked: usize,
        entries: usize,
        ignored: usize,
    },

    Start {
        total_files: usize,
    },

    FileStart {
        source: PathBuf,
        destination: PathBuf,
        index: usize,
        total: usize,
    },

    FileProgress {
        destination: PathBuf,
        bytes_transferred: u64,
        percent: u8,
        speed: String,
        eta: String,
    },

    FileComplete {
        destination: PathBuf,
        outcome: &'static str,
        error: Option<String>,
        completed: usize,
        total: usize,
    },

    Complete {
        files_processed: usize,
        files_copied: usize,
        files_skipped: usize,
        files_planned: usize,
        errors: usize,
        duration_seconds: f64,
    },

    Error {
        message: String,
        details: Option<String>,
    },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    /// Crea un messaggio di errore
    pub fn error(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Error {
            message: message.into(),
            details,
        }
    }

    pub fn file_complete(entry: &MediaEntry, outcome: &TransferOutcome, completed: usize, total: usize) -> Self {
        let error = match outcome {
            TransferOutcome::Failed(reason) => Some(reason.to_string()),
            _ => None,
        };
        Self::FileComplete {
            destination: entry.dest_path.clone(),
            outcome: outcome.label(),
            error,
            completed,
            total,
        }
    }

    pub fn complete(stats: &TransferStats) -> Self {
        Self::Complete {
            files_processed: stats.processed(),
            files_copied: stats.copied,
            files_skipped: stats.skipped,
            files_planned: stats.planned,
            errors: stats.failed,
            duration_seconds: stats.elapsed.as_secs_f64(),
        }
    }
}

/// Reporter that writes one JSON message per event
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReporter;

impl ProgressReporter for JsonReporter {
    fn scan_started(&self, source_root: &Path) {
        JsonMessage::ScanStart {
            source_root: source_root.to_path_buf(),
        }
        .emit();
    }

    fn scan_finished(&self, report: &ScanReport) {
        JsonMessage::ScanComplete {
            files_checked: report.checked,
            entries: report.entries.len(),
            ignored: report.ignored,
        }
        .emit();
    }

    fn batch_started(&self, total: usize) {
        JsonMessage::Start { total_files: total }.emit();
    }

    fn entry_started(&self, index: usize, total: usize, entry: &MediaEntry) {
        JsonMessage::FileStart {
            source: entry.source_path.clone(),
            destination: entry.dest_path.clone(),
            index,
            total,
        }
        .emit();
    }

    fn entry_progress(&self, entry: &MediaEntry, sample: &TransferProgressSample) {
        JsonMessage::FileProgress {
            destination: entry.dest_path.clone(),
            bytes_transferred: sample.bytes_transferred,
            percent: sample.percent,
            speed: sample.speed.clone(),
            eta: sample.eta.clone(),
        }
        .emit();
    }

    fn entry_finished(&self, entry: &MediaEntry, outcome: &TransferOutcome, completed: usize, total: usize) {
        JsonMessage::file_complete(entry, outcome, completed, total).emit();
    }

    fn batch_finished(&self, stats: &TransferStats) {
        JsonMessage::complete(stats).emit();
    }
}
