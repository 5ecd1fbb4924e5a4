//! # Error Types Module
//!
//! Questo modulo definisce i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `MediaError` enum per categorizzare gli errori di dominio
//! - Fornisce messaggi di errore descrittivi e strutturati
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Io`: Errori di I/O (file non trovati, permessi, etc.)
//! - `UnknownCategory`: Tipo di media non riconosciuto (fatale)
//! - `SourceNotFound`: Cartella sorgente inesistente (fatale)
//! - `ToolFailed`: Il tool di copia è terminato con exit code != 0
//! - `MissingDependency`: Tool esterno mancante (rsync)
//! - `Validation`: Errori di validazione input
//! - `Settings`: File di impostazioni illeggibile o malformato
//!
//! ## Esempio:
//! ```rust
//! use lamanager::MediaError;
//!
//! let err = MediaError::UnknownCategory("cartoons".to_string());
//! assert!(err.to_string().contains("cartoons"));
//! ```

use std::path::PathBuf;

/// Custom error types for media sorting and transfer
#[derive(thiserror::Error, Debug)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown media type: {0} (expected movie, serie or anime)")]
    UnknownCategory(String),

    #[error("Source media not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("{tool} exited with {}", .code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}")))]
    ToolFailed { tool: String, code: Option<i32> },

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Settings file error: {0}")]
    Settings(String),
}
