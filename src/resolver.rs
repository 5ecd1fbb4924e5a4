//! # Path Resolution Module
//!
//! Calcola il path di destinazione di un file media nella libreria.
//!
//! ## Strategie:
//! - **Movies**: `<root>/<name>/<name>.<ext>`
//! - **Series / Animes**: `<root>/<name>/Season.<SS>/<name>.S<SS>E<EE>.<ext>`,
//!   con stagione ed episodio estratti dal path sorgente
//!
//! La categoria viene dedotta dal testo della root di destinazione
//! (`Series`, `Animes`, `Movies`). Un file non risolvibile non è mai un errore
//! fatale: viene loggato e il chiamante lo scarta.

use crate::config::{MediaCategory, ResolutionStrategy};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, error, warn};

/// Season keyword, season digits, `.` or `E`, episode digits.
/// Only the long keywords accept a separator before the digits, so audio
/// tags like `DTS 5.1` are not read as a season.
/// Matches `S01E02`, `s1.05`, `Saison 2 E03`, `Season.3.E14`, `Livre1E07`.
static RE_SEASON_EPISODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:(?:Livre|Saison|Season)[ ._-]?|S)(\d{1,2})(?:[ ._-]?E|\.)(\d{1,3})")
        .expect("Failed to create regex pattern for season and episode")
});

/// Season and episode extracted from a file path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeNumber {
    pub season: u16,
    pub episode: u16,
}

impl EpisodeNumber {
    /// Zero-padded season, 2 digits or 3 once it reaches 100
    pub fn season_tag(&self) -> String {
        pad(self.season)
    }

    /// Zero-padded episode, 2 digits or 3 once it reaches 100
    pub fn episode_tag(&self) -> String {
        pad(self.episode)
    }
}

impl fmt::Display for EpisodeNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}E{}", self.season_tag(), self.episode_tag())
    }
}

fn pad(number: u16) -> String {
    if number < 100 {
        format!("{number:02}")
    } else {
        format!("{number:03}")
    }
}

/// Computes library destinations for candidate files
pub struct PathResolver;

impl PathResolver {
    /// Compute the destination of `source_file`, or `None` when it can't be determined
    pub fn resolve(
        source_file: &Path,
        destination_root: &Path,
        formatted_name: &str,
        extension: &str,
    ) -> Option<PathBuf> {
        let strategy = match MediaCategory::from_destination_root(destination_root) {
            Some(category) => category.strategy(),
            None => {
                error!(
                    "Can't determine media type from destination folder {}",
                    destination_root.display()
                );
                return None;
            }
        };

        let result = match strategy {
            ResolutionStrategy::Flat => Some(Self::movie_path(destination_root, formatted_name, extension)),
            ResolutionStrategy::SeasonEpisode => match Self::extract_episode(source_file) {
                Some(number) => Some(Self::episode_path(destination_root, formatted_name, number, extension)),
                None => {
                    warn!(
                        "Can't determine Season/Episode for media {}",
                        crate::file_manager::FileManager::display_name(source_file)
                    );
                    None
                }
            },
        };

        if let Some(ref dest) = result {
            debug!("Resolved {} -> {}", source_file.display(), dest.display());
        }
        result
    }

    /// Find the first season/episode token anywhere in the path
    pub fn extract_episode(path: &Path) -> Option<EpisodeNumber> {
        let text = path.to_string_lossy();
        let captures = RE_SEASON_EPISODE.captures(&text)?;

        let season = captures.get(1)?.as_str();
        let episode = captures.get(2)?.as_str();

        match (season.parse::<u16>(), episode.parse::<u16>()) {
            (Ok(season), Ok(episode)) => Some(EpisodeNumber { season, episode }),
            (season, episode) => {
                error!(
                    "Can't determine Season or Episode in {}: season={:?} episode={:?}",
                    path.display(),
                    season,
                    episode
                );
                None
            }
        }
    }

    fn movie_path(destination_root: &Path, formatted_name: &str, extension: &str) -> PathBuf {
        destination_root
            .join(formatted_name)
            .join(format!("{formatted_name}.{extension}"))
    }

    fn episode_path(
        destination_root: &Path,
        formatted_name: &str,
        number: EpisodeNumber,
        extension: &str,
    ) -> PathBuf {
        destination_root
            .join(formatted_name)
            .join(format!("Season.{}", number.season_tag()))
            .join(format!("{formatted_name}.{number}.{extension}"))
    }
}
