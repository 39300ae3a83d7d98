//! Obfuscation modes
//!
//! An [`ObfuscationType`] names one of the transforms in
//! [`crate::transformers`] and knows how to apply it to a piece of text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ObfuscationError;
use crate::random::RandomSource;
use crate::transformers;

/// Available obfuscation modes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ObfuscationType {
    /// ISO 9 transliteration between Cyrillic and Latin
    CyrillicToLatin,
    /// Zero-width markers between letters
    InvisibleChars,
    /// Look-alike letters from other scripts
    #[default]
    Homoglyphs,
}

/// Text after a transform, plus the character offsets that changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObfuscationOutcome {
    pub text: String,
    /// Only filled by a forward homoglyph pass
    pub changed_indices: Vec<usize>,
}

impl ObfuscationType {
    pub const ALL: [ObfuscationType; 3] = [
        ObfuscationType::CyrillicToLatin,
        ObfuscationType::InvisibleChars,
        ObfuscationType::Homoglyphs,
    ];

    /// Get a human-readable name for the mode
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CyrillicToLatin => "Cyrillic → Latin",
            Self::InvisibleChars => "Invisible Characters",
            Self::Homoglyphs => "Homoglyphs",
        }
    }

    /// One-line description shown next to the mode
    pub fn description(&self) -> &'static str {
        match self {
            Self::CyrillicToLatin => "Transliterate with ISO 9; run again to convert back",
            Self::InvisibleChars => "Hide a zero-width space inside every word; run again to remove",
            Self::Homoglyphs => "Swap one letter per word for a look-alike; run again to restore",
        }
    }

    /// Canonical command-line name
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::CyrillicToLatin => "cyrillic-to-latin",
            Self::InvisibleChars => "invisible-chars",
            Self::Homoglyphs => "homoglyphs",
        }
    }

    /// Apply this mode to text
    pub fn apply(&self, text: &str, rng: &mut impl RandomSource) -> ObfuscationOutcome {
        match self {
            Self::CyrillicToLatin => ObfuscationOutcome {
                text: transformers::transliterate(text),
                changed_indices: Vec::new(),
            },
            Self::InvisibleChars => ObfuscationOutcome {
                text: transformers::obfuscate_invisible(text, rng),
                changed_indices: Vec::new(),
            },
            Self::Homoglyphs => {
                let (text, changed_indices) = transformers::obfuscate_homoglyphs(text, rng);
                ObfuscationOutcome {
                    text,
                    changed_indices,
                }
            }
        }
    }
}

impl fmt::Display for ObfuscationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cli_name())
    }
}

impl FromStr for ObfuscationType {
    type Err = ObfuscationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cyrillic-to-latin" | "cyrillic_to_latin" | "latin" | "translit" => {
                Ok(Self::CyrillicToLatin)
            }
            "invisible-chars" | "invisible_chars" | "invisible" | "zwsp" => {
                Ok(Self::InvisibleChars)
            }
            "homoglyphs" | "homoglyph" | "glyphs" => Ok(Self::Homoglyphs),
            _ => Err(ObfuscationError::UnknownMode(s.to_string())),
        }
    }
}
