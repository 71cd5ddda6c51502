//! Facet predicates for filtering the complete bundle.
//!
//! Each facet is checked on its own and yields a tri-state result:
//!
//! - `Unconstrained`: the filter or the record leaves the facet open, so it passes
//! - `Match`: both sides carry a value and they agree
//! - `Reject`: both sides carry a value and they disagree
//!
//! A record is kept when no facet rejects it.

use crate::types::{CentralizedVocabularyWord, CurriculumLevel, ExamTier, SupportedLanguage, VocabularyFilters};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetMatch {
    Unconstrained,
    Match,
    Reject,
}

impl FacetMatch {
    pub fn passes(&self) -> bool {
        !matches!(self, FacetMatch::Reject)
    }

    fn from_bool(b: bool) -> Self {
        if b { FacetMatch::Match } else { FacetMatch::Reject }
    }
}

/// Tier strings with this value apply to every tier.
pub const TIER_BOTH: &str = "both";

/// The record language is always compared, there is no open state.
pub fn match_language(requested: SupportedLanguage, record: &CentralizedVocabularyWord) -> FacetMatch {
    FacetMatch::from_bool(record.language == requested.code())
}

/// A requested value must equal the record value. A record without the value is rejected.
pub fn match_required(requested: Option<&str>, record_value: Option<&str>) -> FacetMatch {
    match requested {
        None => FacetMatch::Unconstrained,
        Some(r) => FacetMatch::from_bool(record_value == Some(r)),
    }
}

pub fn match_curriculum_level(requested: Option<CurriculumLevel>, record: &CentralizedVocabularyWord) -> FacetMatch {
    match_required(requested.map(|l| l.as_str()), record.curriculum_level.as_deref())
}

/// Records with no tier, an empty tier or `"both"` are open. Otherwise the record
/// tier has to contain the requested tier, since one string may list several tiers.
pub fn match_tier(requested: Option<ExamTier>, record: &CentralizedVocabularyWord) -> FacetMatch {
    let Some(requested) = requested else {
        return FacetMatch::Unconstrained;
    };

    match record.tier.as_deref() {
        None | Some("") | Some(TIER_BOTH) => FacetMatch::Unconstrained,
        Some(t) => FacetMatch::from_bool(t.contains(requested.as_str())),
    }
}

/// Records without an exam board are board-agnostic.
pub fn match_exam_board(requested: Option<&str>, record: &CentralizedVocabularyWord) -> FacetMatch {
    let Some(requested) = requested else {
        return FacetMatch::Unconstrained;
    };

    match record.exam_board_code.as_deref() {
        None | Some("") => FacetMatch::Unconstrained,
        Some(board) => FacetMatch::from_bool(board == requested),
    }
}

impl VocabularyFilters {
    /// Results for every facet, in evaluation order: language, curriculum level,
    /// tier, exam board, category, subcategory.
    pub fn facet_results(&self, record: &CentralizedVocabularyWord) -> [FacetMatch; 6] {
        [
            match_language(self.language, record),
            match_curriculum_level(self.curriculum_level, record),
            match_tier(self.tier, record),
            match_exam_board(self.exam_board.as_deref(), record),
            match_required(self.category.as_deref(), record.category.as_deref()),
            match_required(self.subcategory.as_deref(), record.subcategory.as_deref()),
        ]
    }

    pub fn matches(&self, record: &CentralizedVocabularyWord) -> bool {
        self.facet_results(record).iter().all(|m| m.passes())
    }
}
