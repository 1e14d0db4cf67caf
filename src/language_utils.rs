use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Language utilities for the two site languages
///
/// The site is published in Arabic and English only. This module holds the
/// language type, its ISO 639-1 codes, and the detector used when a caller
/// does not say which language a text is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Arabic
    Ar,
    /// English
    En,
}

/// First code point of the Arabic Unicode block
const ARABIC_BLOCK_START: char = '\u{0600}';

/// Last code point of the Arabic Unicode block
const ARABIC_BLOCK_END: char = '\u{06FF}';

impl Language {
    /// ISO 639-1 code as used in the `langpair` parameter
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    /// The other site language
    pub fn other(&self) -> Self {
        match self {
            Self::Ar => Self::En,
            Self::En => Self::Ar,
        }
    }

    /// English name of the language
    pub fn name(&self) -> String {
        isolang::Language::from_639_1(self.code())
            .map(|lang| lang.to_name().to_string())
            .unwrap_or_else(|| self.code().to_string())
    }

    /// Whether the language is written right to left
    pub fn is_rtl(&self) -> bool {
        matches!(self, Self::Ar)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ar" | "ara" | "arabic" => Ok(Self::Ar),
            "en" | "eng" | "english" => Ok(Self::En),
            _ => Err(anyhow!("Unsupported language code: {}", s)),
        }
    }
}

/// Whether the text contains any character from the Arabic block
pub fn contains_arabic(text: &str) -> bool {
    text.chars()
        .any(|c| (ARABIC_BLOCK_START..=ARABIC_BLOCK_END).contains(&c))
}

/// Infers the language of a text when the caller omits it
pub trait LanguageDetector: Send + Sync + Debug {
    /// Detect the language of the given text
    fn detect(&self, text: &str) -> Language;
}

/// Script-sniffing detector
///
/// A single Arabic character anywhere makes the text Arabic. Mixed-script
/// text is therefore always classified as Arabic.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScriptDetector;

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> Language {
        if contains_arabic(text) {
            Language::Ar
        } else {
            Language::En
        }
    }
}
