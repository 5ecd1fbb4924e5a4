//! # Transfer Module
//!
//! Modulo che separa le responsabilità del trasferimento in sottomoduli:
//! - `orchestrator`: esecuzione sequenziale della work list
//! - `copy_tool`: costruzione e lancio del processo di copia
//! - `output`: lettura dell'output del processo (record separati da `\r` o `\n`)
//! - `progress_line`: parsing delle righe di progresso
//! - `progress_tracker`: stato per-file e globale
//! - `rewrite`: riscrittura dei path sorgente
//! - `outcome`: esito di ogni trasferimento

pub mod copy_tool;
pub mod orchestrator;
pub mod outcome;
pub mod output;
pub mod progress_line;
pub mod progress_tracker;
pub mod rewrite;

pub use orchestrator::{BatchReport, TransferOrchestrator};
pub use outcome::{FailureReason, TransferOutcome};
pub use progress_line::{parse_progress_line, TransferProgressSample};
pub use rewrite::PathRewrite;
