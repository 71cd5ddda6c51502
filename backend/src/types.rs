use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Deserialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedLanguage {
    #[serde(rename = "spanish")]
    Spanish,
    #[serde(rename = "french")]
    French,
    #[serde(rename = "german")]
    German,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 3] = [
        SupportedLanguage::Spanish,
        SupportedLanguage::French,
        SupportedLanguage::German,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedLanguage::Spanish => "spanish",
            SupportedLanguage::French => "french",
            SupportedLanguage::German => "german",
        }
    }

    /// The two-letter code used by the complete bundle records.
    pub fn code(&self) -> &'static str {
        match self {
            SupportedLanguage::Spanish => "es",
            SupportedLanguage::French => "fr",
            SupportedLanguage::German => "de",
        }
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid language value: {0}")]
pub struct ParseLanguageError(String);

impl FromStr for SupportedLanguage {
    type Err = ParseLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spanish" => Ok(SupportedLanguage::Spanish),
            "french" => Ok(SupportedLanguage::French),
            "german" => Ok(SupportedLanguage::German),
            _ => Err(ParseLanguageError(s.to_string())),
        }
    }
}

/// Tier of a per-language bundle file, also the file name on the asset host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleTier {
    #[serde(rename = "foundation")]
    Foundation,
    #[serde(rename = "higher")]
    Higher,
    #[default]
    #[serde(rename = "all")]
    All,
}

impl BundleTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleTier::Foundation => "foundation",
            BundleTier::Higher => "higher",
            BundleTier::All => "all",
        }
    }
}

impl fmt::Display for BundleTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid tier value: {0}")]
pub struct ParseTierError(String);

impl FromStr for BundleTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "foundation" => Ok(BundleTier::Foundation),
            "higher" => Ok(BundleTier::Higher),
            "all" => Ok(BundleTier::All),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}

/// GCSE tier used when filtering the complete bundle. Only meaningful under KS4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExamTier {
    #[serde(rename = "foundation")]
    Foundation,
    #[serde(rename = "higher")]
    Higher,
}

impl ExamTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamTier::Foundation => "foundation",
            ExamTier::Higher => "higher",
        }
    }
}

impl FromStr for ExamTier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "foundation" => Ok(ExamTier::Foundation),
            "higher" => Ok(ExamTier::Higher),
            _ => Err(ParseTierError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurriculumLevel {
    #[serde(rename = "KS3")]
    KS3,
    #[serde(rename = "KS4")]
    KS4,
}

impl CurriculumLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurriculumLevel::KS3 => "KS3",
            CurriculumLevel::KS4 => "KS4",
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid curriculum level value: {0}")]
pub struct ParseCurriculumLevelError(String);

impl FromStr for CurriculumLevel {
    type Err = ParseCurriculumLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "KS3" | "ks3" => Ok(CurriculumLevel::KS3),
            "KS4" | "ks4" => Ok(CurriculumLevel::KS4),
            _ => Err(ParseCurriculumLevelError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "masculine")]
    Masculine,
    #[serde(rename = "feminine")]
    Feminine,
    #[serde(rename = "neuter")]
    Neuter,
}

/// A single lexical entry, the shape game components consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyWord {
    pub id: String,
    pub word: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularySubcategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub words: Vec<VocabularyWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VocabularyCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<VocabularySubcategory>,
}

impl VocabularyCategory {
    pub fn find_subcategory(&self, subcategory_id: &str) -> Option<&VocabularySubcategory> {
        self.subcategories.iter().find(|s| s.id == subcategory_id)
    }

    /// All words of every subcategory, in order.
    pub fn all_words(&self) -> Vec<VocabularyWord> {
        self.subcategories
            .iter()
            .flat_map(|s| s.words.iter().cloned())
            .collect()
    }
}

/// Per-language dataset as served at `/data/vocabulary/{language}/{tier}.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyBundle {
    pub language: SupportedLanguage,
    pub tier: BundleTier,
    pub last_updated: String,
    #[serde(default)]
    pub categories: Vec<VocabularyCategory>,
}

impl VocabularyBundle {
    pub fn find_category(&self, category_id: &str) -> Option<&VocabularyCategory> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// Flattens every word across all categories and subcategories, keeping bundle order.
    pub fn all_words(&self) -> Vec<VocabularyWord> {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter())
            .flat_map(|s| s.words.iter().cloned())
            .collect()
    }

    pub fn word_count(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.subcategories.iter())
            .map(|s| s.words.len())
            .sum()
    }

    /// Returns None when `last_updated` is not an RFC 3339 timestamp.
    pub fn last_updated_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.last_updated).ok()
    }
}

/// Flat record of the complete bundle at `/data/vocabulary/complete_bundle.json`.
///
/// `curriculum_level` and `tier` are kept as the raw strings found in the data,
/// so an unexpected value only affects matching and never fails the parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralizedVocabularyWord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    // two-letter code, e.g. "es"
    pub language: String,
    pub word: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curriculum_level: Option<String>,
    // may be "foundation", "higher", "both" or a joined string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_board_code: Option<String>,
}

impl CentralizedVocabularyWord {
    /// Projects the record into the game-facing shape. Gender, example and audio
    /// are only available from the per-language bundles.
    pub fn to_vocabulary_word(&self, fallback_id: impl FnOnce() -> String) -> VocabularyWord {
        VocabularyWord {
            id: self.id.clone().unwrap_or_else(fallback_id),
            word: self.word.clone(),
            translation: self.translation.clone(),
            gender: None,
            example: None,
            audio_url: None,
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyFilters {
    pub language: SupportedLanguage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curriculum_level: Option<CurriculumLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<ExamTier>,
    // free-form board code, e.g. AQA, EDEXCEL, WJEC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_board: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

impl VocabularyFilters {
    pub fn new(language: SupportedLanguage) -> Self {
        VocabularyFilters {
            language,
            curriculum_level: None,
            tier: None,
            exam_board: None,
            category: None,
            subcategory: None,
        }
    }

    pub fn with_curriculum_level(mut self, level: CurriculumLevel) -> Self {
        self.curriculum_level = Some(level);
        self
    }

    pub fn with_tier(mut self, tier: ExamTier) -> Self {
        self.tier = Some(tier);
        self
    }

    pub fn with_exam_board(mut self, board: &str) -> Self {
        self.exam_board = Some(board.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_subcategory(mut self, subcategory: &str) -> Self {
        self.subcategory = Some(subcategory.to_string());
        self
    }
}
