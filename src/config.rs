//! # Configuration Management Module
//!
//! Questo modulo gestisce tutta la configurazione dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `MediaCategory` (movie / serie / anime) e il parsing del tipo media
//! - Definisce `LibrarySettings` con le root della libreria e le regole di rewrite
//! - Definisce `JobConfig`, immutabile, costruito una sola volta dalla CLI
//! - Supporta caricamento/salvataggio delle impostazioni da/verso file JSON
//! - Fornisce valori di default che riproducono il setup originale
//!
//! ## Valori di default:
//! - `source_base`: `/mnt/ultra`
//! - `movies_root` / `series_root` / `animes_root`: `/mnt/data-pool/multimedia/{Movies,Series,Animes}`
//! - `path_rewrites`: `/mnt/ultra` → `ultra:downloads/qbittorrent`
//! - `transfer_tool`: `rsync` con argomenti `-avz --progress`
//!
//! ## Esempio:
//! ```rust
//! use lamanager::config::{JobConfig, MediaCategory};
//!
//! let category: MediaCategory = "series".parse().unwrap();
//! let config = JobConfig::new("Show", category);
//! assert_eq!(config.destination_root().to_str(), Some("/mnt/data-pool/multimedia/Series"));
//! ```

use crate::error::MediaError;
use crate::naming::{NameFormatter, NameStyle};
use crate::transfer::rewrite::PathRewrite;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

/// Kind of media handled by a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    Movie,
    Series,
    Anime,
}

/// How destination paths are built for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// `<root>/<name>/<name>.<ext>`
    Flat,
    /// `<root>/<name>/Season.<SS>/<name>.S<SS>E<EE>.<ext>`
    SeasonEpisode,
}

impl MediaCategory {
    pub fn strategy(&self) -> ResolutionStrategy {
        match self {
            Self::Movie => ResolutionStrategy::Flat,
            Self::Series | Self::Anime => ResolutionStrategy::SeasonEpisode,
        }
    }

    /// Folder under `source_base` searched when no source folder is given
    pub fn source_subdir(&self) -> &'static str {
        match self {
            Self::Movie => "movies",
            Self::Series => "series",
            Self::Anime => "animes",
        }
    }

    /// Marker that identifies the category inside a destination root
    pub fn root_marker(&self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Series => "Series",
            Self::Anime => "Animes",
        }
    }

    /// Infer the category from the text of a destination root.
    ///
    /// Episodic markers win over `Movies`, so `/data/Movies/Series` is
    /// treated as a series library.
    pub fn from_destination_root(root: &Path) -> Option<Self> {
        let text = root.to_string_lossy();
        if text.contains(Self::Series.root_marker()) {
            Some(Self::Series)
        } else if text.contains(Self::Anime.root_marker()) {
            Some(Self::Anime)
        } else if text.contains(Self::Movie.root_marker()) {
            Some(Self::Movie)
        } else {
            None
        }
    }
}

impl FromStr for MediaCategory {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" => Ok(Self::Movie),
            "serie" | "series" => Ok(Self::Series),
            "anime" | "animes" => Ok(Self::Anime),
            other => Err(MediaError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Movie => "MOVIES",
            Self::Series => "SERIES",
            Self::Anime => "ANIMES",
        };
        f.write_str(label)
    }
}

/// Library layout and transfer settings, optionally loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Parent of the per-category download folders
    pub source_base: PathBuf,
    pub movies_root: PathBuf,
    pub series_root: PathBuf,
    pub animes_root: PathBuf,
    /// Ordered source path rewrites, first match wins
    pub path_rewrites: Vec<PathRewrite>,
    /// External copy tool
    pub transfer_tool: String,
    /// Arguments placed before source and destination
    pub transfer_args: Vec<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            source_base: PathBuf::from("/mnt/ultra"),
            movies_root: PathBuf::from("/mnt/data-pool/multimedia/Movies"),
            series_root: PathBuf::from("/mnt/data-pool/multimedia/Series"),
            animes_root: PathBuf::from("/mnt/data-pool/multimedia/Animes"),
            path_rewrites: vec![PathRewrite::new("/mnt/ultra", "ultra:downloads/qbittorrent")],
            transfer_tool: "rsync".to_string(),
            transfer_args: crate::args!["-avz", "--progress"],
        }
    }
}

impl LibrarySettings {
    /// Default settings file location (`<config dir>/lamanager/settings.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lamanager").join("settings.json"))
    }

    /// Destination root configured for a category
    pub fn destination_root(&self, category: MediaCategory) -> &Path {
        match category {
            MediaCategory::Movie => &self.movies_root,
            MediaCategory::Series => &self.series_root,
            MediaCategory::Anime => &self.animes_root,
        }
    }

    /// Load settings from file, falling back to defaults when it does not exist
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let settings: LibrarySettings = serde_json::from_str(&content)
            .map_err(|e| MediaError::Settings(format!("{}: {}", path.display(), e)))?;
        Ok(settings)
    }

    /// Save settings to file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

/// Everything a single run needs, built once from the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Title searched in the source folder
    pub media_target: String,
    pub category: MediaCategory,
    /// Overrides `<source_base>/<category folder>`
    pub source_folder: Option<PathBuf>,
    /// Overrides the category destination root
    pub destination_folder: Option<PathBuf>,
    /// Name used in the library instead of `media_target`
    pub new_name: Option<String>,
    /// Copy even when the destination file exists
    pub force: bool,
    /// Don't create directories or launch transfers
    pub dry_run: bool,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
    pub name_style: NameStyle,
    pub library: LibrarySettings,
}

impl JobConfig {
    pub fn new(media_target: impl Into<String>, category: MediaCategory) -> Self {
        Self {
            media_target: media_target.into(),
            category,
            source_folder: None,
            destination_folder: None,
            new_name: None,
            force: false,
            dry_run: false,
            json_output: false,
            name_style: NameStyle::default(),
            library: LibrarySettings::default(),
        }
    }

    /// Name used for destination folders and files
    pub fn formatted_name(&self) -> String {
        let raw = self.new_name.as_deref().unwrap_or(&self.media_target);
        NameFormatter::format_with(raw, self.name_style)
    }

    /// Folder that contains the category downloads
    pub fn source_parent(&self) -> PathBuf {
        match self.source_folder {
            Some(ref folder) => folder.clone(),
            None => self.library.source_base.join(self.category.source_subdir()),
        }
    }

    /// Folder scanned for the media target
    pub fn source_root(&self) -> PathBuf {
        self.source_parent().join(&self.media_target)
    }

    /// Source media folder, which must exist before scanning
    pub fn check_source(&self) -> Result<PathBuf, MediaError> {
        let source_root = self.source_root();
        match std::fs::metadata(&source_root) {
            Ok(_) => Ok(source_root),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(MediaError::SourceNotFound(source_root)),
            Err(e) => Err(MediaError::Io(e)),
        }
    }

    pub fn destination_root(&self) -> PathBuf {
        match self.destination_folder {
            Some(ref folder) => folder.clone(),
            None => self.library.destination_root(self.category).to_path_buf(),
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.media_target.trim().is_empty() {
            return Err(MediaError::Validation("Media target must not be empty".to_string()).into());
        }

        if let Some(ref name) = self.new_name {
            if name.trim().is_empty() {
                return Err(MediaError::Validation("New media name must not be empty".to_string()).into());
            }
        }

        if self.library.transfer_tool.trim().is_empty() {
            return Err(MediaError::Validation("Transfer tool must not be empty".to_string()).into());
        }

        if self.library.path_rewrites.iter().any(|rule| rule.prefix.is_empty()) {
            return Err(MediaError::Validation("Path rewrite prefixes must not be empty".to_string()).into());
        }

        if let Some(ref folder) = self.destination_folder {
            match MediaCategory::from_destination_root(folder) {
                None => warn!(
                    "Destination folder {} doesn't contain Movies, Series or Animes - media type can't be determined from it",
                    folder.display()
                ),
                Some(found) if found.strategy() != self.category.strategy() => warn!(
                    "Destination folder {} looks like a {} library but media type is {}",
                    folder.display(),
                    found,
                    self.category
                ),
                Some(_) => {}
            }
        }

        Ok(())
    }
}
