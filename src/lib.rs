//! # LaManager Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Categorie media, impostazioni della libreria e configurazione del job
//! - `error`: Tipi di errore custom
//! - `naming`: Normalizzazione del nome di destinazione
//! - `resolver`: Calcolo del path di destinazione (movie / season-episode)
//! - `scanner`: Discovery dei file video e costruzione della work list
//! - `transfer`: Esecuzione sequenziale delle copie con il tool esterno
//! - `progress` / `json_output`: Feedback all'operatore (console o JSON)
//! - `file_manager`, `platform`, `utils`: Helper condivisi
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use lamanager::{ConsoleReporter, JobConfig, MediaCategory, MediaScanner, TransferOrchestrator};
//!
//! # async fn run() {
//! let config = JobConfig::new("Show", MediaCategory::Series);
//! let reporter = ConsoleReporter::new();
//! let report = MediaScanner::new(&reporter).scan(
//!     &config.source_root(),
//!     &config.destination_root(),
//!     &config.formatted_name(),
//! );
//! let batch = TransferOrchestrator::new(&config, &reporter).run(&report.entries).await;
//! println!("{}", batch.stats.format_summary());
//! # }
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod naming;
pub mod platform;
pub mod progress;
pub mod resolver;
pub mod scanner;
pub mod transfer;
pub mod utils;

pub use config::{JobConfig, LibrarySettings, MediaCategory};
pub use error::MediaError;
pub use json_output::{JsonMessage, JsonReporter};
pub use naming::{NameFormatter, NameStyle};
pub use progress::{ConsoleReporter, ProgressReporter, SilentReporter, TransferStats};
pub use resolver::PathResolver;
pub use scanner::{MediaEntry, MediaScanner, ScanReport};
pub use transfer::{BatchReport, TransferOrchestrator, TransferOutcome};
