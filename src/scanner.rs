//! # Media Scanner Module
//!
//! Costruisce la work list a partire dalla cartella sorgente.
//!
//! ## Responsabilità:
//! - Discovery ricorsiva dei file (ordine di attraversamento, nessun sort)
//! - Filtro per estensione video (`.avi .mkv .mp4 .mov .flv`)
//! - Risoluzione della destinazione tramite `PathResolver`
//! - Conteggio dei file controllati e di quelli ignorati (destinazione non determinabile)
//!
//! I file con altre estensioni vengono saltati senza essere contati come ignorati.

use crate::file_manager::FileManager;
use crate::progress::ProgressReporter;
use crate::resolver::PathResolver;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A video file with its resolved library destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaEntry {
    pub source_path: PathBuf,
    pub dest_path: PathBuf,
    /// Lowercase, without the dot
    pub extension: String,
}

impl MediaEntry {
    /// File name shown in progress messages
    pub fn dest_file_name(&self) -> String {
        FileManager::display_name(&self.dest_path)
    }
}

/// Result of a scan
#[derive(Debug, Default)]
pub struct ScanReport {
    pub entries: Vec<MediaEntry>,
    /// Files visited
    pub checked: usize,
    /// Video files whose destination couldn't be determined
    pub ignored: usize,
}

/// Walks a source tree and builds the work list
pub struct MediaScanner<'a> {
    reporter: &'a dyn ProgressReporter,
}

impl<'a> MediaScanner<'a> {
    pub fn new(reporter: &'a dyn ProgressReporter) -> Self {
        Self { reporter }
    }

    pub fn scan(&self, source_root: &Path, destination_root: &Path, formatted_name: &str) -> ScanReport {
        let mut report = ScanReport::default();
        self.reporter.scan_started(source_root);

        for entry in WalkDir::new(source_root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Can't read {}: {}", e.path().unwrap_or(source_root).display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            report.checked += 1;
            self.reporter.file_checked(path);

            if !FileManager::is_video(path) {
                continue;
            }
            let Some(extension) = FileManager::extension(path) else {
                continue;
            };

            match PathResolver::resolve(path, destination_root, formatted_name, &extension) {
                Some(dest_path) => report.entries.push(MediaEntry {
                    source_path: path.to_path_buf(),
                    dest_path,
                    extension,
                }),
                None => report.ignored += 1,
            }
        }

        debug!("{} files checked", report.checked);
        if report.ignored > 0 {
            debug!("{} files ignored", report.ignored);
        }

        self.reporter.scan_finished(&report);
        report
    }
}
