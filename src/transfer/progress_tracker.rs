//! # Progress Tracking Module
//!
//! Stato a due livelli del batch di trasferimento:
//! - per-file: percentuale (0-100) del file corrente
//! - globale: `completed/total`, avanza solo sui file copiati
//!
//! Ogni entry attraversa `Pending → (SkippedExists | DryRun | Transferring → {Copied | Failed})`.

use crate::transfer::outcome::TransferOutcome;
use crate::transfer::progress_line::TransferProgressSample;

/// Lifecycle of the entry currently handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    Pending,
    Transferring,
    Finished(TransferOutcome),
}

/// Two-level progress of a transfer batch
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    current_percent: u8,
    state: EntryState,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            current_percent: 0,
            state: EntryState::Pending,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Entries copied so far
    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn current_percent(&self) -> u8 {
        self.current_percent
    }

    /// Move to the next entry
    pub fn begin_entry(&mut self) {
        self.state = EntryState::Pending;
        self.current_percent = 0;
    }

    /// The copy process has been launched
    pub fn start_transfer(&mut self) {
        self.state = EntryState::Transferring;
    }

    /// Apply a parsed sample. Ignored unless a transfer is running.
    pub fn update(&mut self, sample: &TransferProgressSample) -> bool {
        if self.state != EntryState::Transferring {
            return false;
        }
        self.current_percent = sample.percent.min(100);
        true
    }

    /// Record the terminal outcome of the current entry
    pub fn finish_entry(&mut self, outcome: &TransferOutcome) {
        if *outcome == TransferOutcome::Copied {
            self.completed += 1;
            self.current_percent = 100;
        }
        self.state = EntryState::Finished(outcome.clone());
    }
}
