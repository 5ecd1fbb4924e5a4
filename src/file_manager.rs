//! # File Management Module
//!
//! Questo modulo raccoglie le operazioni sui file usate da scanner e transfer.
//!
//! ## Responsabilità:
//! - Riconoscimento dei file video tramite estensione
//! - Estrazione dell'estensione in minuscolo (senza punto)
//! - Creazione idempotente delle cartelle di destinazione
//! - Formattazione human-readable delle dimensioni
//!
//! ## Formati supportati:
//! - **Video**: AVI, MKV, MP4, MOV, FLV

use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Extensions (with dot, lowercase) picked up by the scanner
pub const VIDEO_EXTENSIONS: [&str; 5] = [".avi", ".mkv", ".mp4", ".mov", ".flv"];

/// File helpers
pub struct FileManager;

impl FileManager {
    /// Check if a file name ends with a known video extension (case-insensitive)
    pub fn is_video(path: &Path) -> bool {
        match path.file_name() {
            Some(name) => {
                let name = name.to_string_lossy().to_lowercase();
                VIDEO_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
            }
            None => false,
        }
    }

    /// Lowercase extension without the leading dot
    pub fn extension(path: &Path) -> Option<String> {
        path.extension().map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// File name as a displayable string
    pub fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Size of a file, `None` when it can't be read
    pub async fn file_size(path: &Path) -> Option<u64> {
        fs::metadata(path).await.ok().map(|metadata| metadata.len())
    }

    /// Create a directory and all its parents. Succeeds if it already exists.
    pub async fn ensure_dir(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("Failed to create destination folder {}", dir.display()))
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}
