//! # Name Formatting Module
//!
//! Normalizza il titolo di un media in un token utilizzabile come nome di
//! cartella e di file nella libreria di destinazione.
//!
//! ## Stili disponibili:
//! - `Literal` (default): trim + collasso dei punti consecutivi sul nome originale.
//!   I caratteri speciali restano invariati.
//! - `Dotted`: ogni sequenza di ` `, `*`, `(`, `)`, `&`, `~`, `!` diventa un `.`
//!   prima del collasso dei punti.
//!
//! ## Esempio:
//! ```rust
//! use lamanager::naming::{NameFormatter, NameStyle};
//!
//! assert_eq!(NameFormatter::format("  Show..Name "), "Show.Name");
//! assert_eq!(NameFormatter::format_with("Movie Title (2020)!", NameStyle::Dotted), "Movie.Title.2020.");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static RE_SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ *()&~!]+").expect("Failed to create regex pattern for special characters"));

static RE_CONSECUTIVE_DOTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.{2,}").expect("Failed to create regex pattern for consecutive dots"));

/// How special characters in a media title are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameStyle {
    /// Keep the title as typed, only collapse repeated dots
    #[default]
    Literal,
    /// Replace spaces and `*()&~!` with dots
    Dotted,
}

/// Builds the formatted name used for destination folders and files
pub struct NameFormatter;

impl NameFormatter {
    /// Format a raw title with the default (`Literal`) style
    pub fn format(raw_name: &str) -> String {
        Self::format_with(raw_name, NameStyle::Literal)
    }

    /// Format a raw title with an explicit style
    pub fn format_with(raw_name: &str, style: NameStyle) -> String {
        let trimmed = raw_name.trim();

        let source = match style {
            NameStyle::Literal => trimmed.to_string(),
            NameStyle::Dotted => RE_SPECIAL_CHARS.replace_all(trimmed, ".").into_owned(),
        };

        RE_CONSECUTIVE_DOTS.replace_all(&source, ".").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_trims_whitespace() {
        assert_eq!(NameFormatter::format("  Breaking Bad \t"), "Breaking Bad");
        assert_eq!(NameFormatter::format("\nShow\n"), "Show");
    }

    #[test]
    fn test_literal_collapses_dots() {
        assert_eq!(NameFormatter::format("Show...Name..2020"), "Show.Name.2020");
        assert_eq!(NameFormatter::format("Already.Formatted"), "Already.Formatted");
    }

    #[test]
    fn test_literal_keeps_special_characters() {
        assert_eq!(NameFormatter::format("Movie Title (2020)!"), "Movie Title (2020)!");
        assert_eq!(NameFormatter::format("Tom & Jerry ~ *Best*"), "Tom & Jerry ~ *Best*");
    }

    #[test]
    fn test_dotted_replaces_special_characters() {
        assert_eq!(NameFormatter::format_with("Movie Title (2020)!", NameStyle::Dotted), "Movie.Title.2020.");
        assert_eq!(NameFormatter::format_with("Tom & Jerry", NameStyle::Dotted), "Tom.Jerry");
        assert_eq!(NameFormatter::format_with("  a~b*c  ", NameStyle::Dotted), "a.b.c");
    }

    #[test]
    fn test_dotted_collapses_existing_dots_next_to_replacements() {
        assert_eq!(NameFormatter::format_with("Show. (US)", NameStyle::Dotted), "Show.US.");
        assert_eq!(NameFormatter::format_with("A..&..B", NameStyle::Dotted), "A.B");
    }

    #[test]
    fn test_no_consecutive_dots_and_no_surrounding_whitespace() {
        let titles = [
            " The  Office (US) ",
            "Love & Death!!",
            "**Stars** ~ (Again)",
            "...dots...",
            "Who Framed Roger Rabbit?! (1988)",
            "",
            "   ",
        ];

        for title in titles {
            for style in [NameStyle::Literal, NameStyle::Dotted] {
                let formatted = NameFormatter::format_with(title, style);
                assert!(!formatted.contains(".."), "{title:?} -> {formatted:?}");
                assert_eq!(formatted, formatted.trim(), "{title:?} -> {formatted:?}");
            }
        }
    }

    #[test]
    fn test_default_style_is_literal() {
        assert_eq!(NameStyle::default(), NameStyle::Literal);
        assert_eq!(NameFormatter::format("A (B)"), NameFormatter::format_with("A (B)", NameStyle::Literal));
    }
}
