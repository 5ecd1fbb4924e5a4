//! # LaManager - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing` (su stderr)
//! - Caricamento delle impostazioni della libreria
//! - Validazione degli input dell'utente
//! - Scansione della sorgente e avvio dei trasferimenti
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (titolo, tipo media, cartelle, nuovo nome)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag `--debug`, oppure `RUST_LOG`)
//! 3. Valida il tipo media e verifica che la sorgente esista
//! 4. Costruisce la work list con `MediaScanner`
//! 5. Esegue le copie in sequenza con `TransferOrchestrator`
//!
//! ## Esempio di utilizzo:
//! ```bash
//! lamanager --media-target "Show" --media-type serie --media-new-name "Show (2021)" --debug
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use lamanager::{
    platform::PlatformCommands, ConsoleReporter, JobConfig, JsonMessage, JsonReporter, LibrarySettings, MediaCategory,
    MediaError, MediaScanner, NameStyle, ProgressReporter, TransferOrchestrator,
};

#[derive(Parser)]
#[command(name = "lamanager")]
#[command(about = "Sort downloaded movies, series and animes into a media library")]
struct Args {
    /// Title of the downloaded media (folder name inside the source folder)
    #[arg(long)]
    media_target: String,

    /// Media type: movie, serie or anime
    #[arg(long)]
    media_type: String,

    /// Folder containing the download (default: <source_base>/<movies|series|animes>)
    #[arg(long)]
    media_source_folder: Option<PathBuf>,

    /// Library root (default: the configured root for the media type)
    #[arg(long)]
    destination_folder: Option<PathBuf>,

    /// Name used in the library instead of the media target
    #[arg(long)]
    media_new_name: Option<String>,

    /// Copy even when the destination file already exists
    #[arg(long)]
    force: bool,

    /// Show what would be copied without creating folders or launching transfers
    #[arg(long)]
    dry_run: bool,

    /// Replace spaces and special characters with dots in the library name
    #[arg(long)]
    dotted_name: bool,

    /// Verbose logging
    #[arg(long)]
    debug: bool,

    /// Output progress and status as JSON for programmatic use
    #[arg(long)]
    json: bool,

    /// Library settings file (default: <config dir>/lamanager/settings.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let json_output = args.json;

    init_logging(args.debug)?;

    let result = run(args).await;
    if let Err(ref e) = result {
        if json_output {
            JsonMessage::error(e.to_string(), Some(format!("{e:#}"))).emit();
        }
    }
    result
}

fn init_logging(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let settings_path = args.config.clone().or_else(LibrarySettings::default_path);
    let library = match settings_path {
        Some(ref path) => {
            debug!("Loading library settings from {}", path.display());
            LibrarySettings::from_file(path).await?
        }
        None => LibrarySettings::default(),
    };

    let category: MediaCategory = args.media_type.parse()?;

    let config = JobConfig {
        media_target: args.media_target,
        category,
        source_folder: args.media_source_folder,
        destination_folder: args.destination_folder,
        new_name: args.media_new_name,
        force: args.force,
        dry_run: args.dry_run,
        json_output: args.json,
        name_style: if args.dotted_name {
            NameStyle::Dotted
        } else {
            NameStyle::Literal
        },
        library,
    };
    config.validate()?;

    let destination_root = config.destination_root();
    let formatted_name = config.formatted_name();

    debug!("System: {}", PlatformCommands::system_info());
    debug!("Media type: {}", config.category);
    debug!("Media target: {}", config.media_target);
    debug!("Media name in library: {}", formatted_name);
    debug!("Source folder: {}", config.source_parent().display());
    debug!("Destination folder: {}", destination_root.display());
    match std::path::absolute(config.source_root()) {
        Ok(absolute) => debug!("Source media: {}", absolute.display()),
        Err(_) => debug!("Source media: {}", config.source_root().display()),
    }

    let source_root = config.check_source()?;

    let reporter: Box<dyn ProgressReporter> = if config.json_output {
        Box::new(JsonReporter)
    } else {
        Box::new(ConsoleReporter::new())
    };

    let report = MediaScanner::new(reporter.as_ref()).scan(&source_root, &destination_root, &formatted_name);
    if report.ignored > 0 {
        warn!("{} files ignored: Season/Episode or destination can't be determined", report.ignored);
    }

    if report.entries.is_empty() {
        info!("No media to transfer in {}", source_root.display());
        return Ok(());
    }

    if report.entries.len() <= 10 {
        for entry in &report.entries {
            debug!("{} → {}", entry.source_path.display(), entry.dest_path.display());
        }
    }

    let platform = PlatformCommands::instance();
    if !config.dry_run && !platform.is_command_available(&config.library.transfer_tool).await {
        warn!("{}", MediaError::MissingDependency(config.library.transfer_tool.clone()));
    }

    let stats = TransferOrchestrator::new(&config, reporter.as_ref())
        .run(&report.entries)
        .await
        .stats;

    info!("📊 {}", stats.format_summary());

    if stats.failed > 0 {
        anyhow::bail!("{} of {} transfers failed", stats.failed, stats.processed());
    }

    Ok(())
}
