use std::sync::Arc;

use regex::Regex;

use crate::profile::domain::{RankCategory, ServiceBranch, ServiceEra};
use crate::text::{contains_any, contains_word, count_matches};
use crate::vocabulary::Vocabulary;

/// Confidence never reaches certainty for heuristic detection.
pub const MAX_CONFIDENCE: u8 = 95;
/// A single weak cultural term must not classify someone as a veteran.
pub const MIN_VETERAN_CONFIDENCE: u8 = 15;

const MAX_PLAUSIBLE_YEARS: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VeteranDetection {
    pub is_veteran: bool,
    pub confidence: u8,
    pub indicators: usize,
    /// Military language appears to describe a relative rather than the author.
    pub family_attributed: bool,
}

/// Scores veteran status and extracts service facts from normalized text.
#[derive(Debug, Clone)]
pub struct ProfileAnalyzer {
    vocabulary: Arc<Vocabulary>,
    years_patterns: Vec<Regex>,
}

impl ProfileAnalyzer {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Result<Self, regex::Error> {
        let years_patterns = [
            r"(\d+)\s*years?\s*(?:of\s*)?service",
            r"served\s*(\d+)\s*years?",
            r"(\d+)\s*years?\s*(?:tour|stint|career)",
            r"(\d+)\s*years?\s*active\s*duty",
            r"(\d+)\s*years?\s*in\s*the\s*(?:army|navy|marines|air\s*force|coast\s*guard|space\s*force)",
        ]
        .into_iter()
        .map(Regex::new)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            vocabulary,
            years_patterns,
        })
    }

    pub fn detect_veteran_status(&self, text: &str) -> VeteranDetection {
        let mut confidence: u32 = 0;
        let mut indicators = 0;

        for category in self.vocabulary.scoring.categories() {
            let hits = count_matches(text, &category.terms);
            indicators += hits;
            confidence += hits as u32 * u32::from(category.weight);
        }

        let confidence = confidence.min(u32::from(MAX_CONFIDENCE)) as u8;
        let direct = contains_any(text, &self.vocabulary.scoring.direct.terms);
        let family_attributed = indicators > 0
            && !direct
            && (contains_any(text, &self.vocabulary.military_family_terms)
                || self.relative_led(text));

        VeteranDetection {
            is_veteran: indicators > 0
                && confidence >= MIN_VETERAN_CONFIDENCE
                && !family_attributed,
            confidence,
            indicators,
            family_attributed,
        }
    }

    /// True when every clause carrying military language names a relative before
    /// its first indicator ("my spouse is active duty navy").
    fn relative_led(&self, text: &str) -> bool {
        let mut attributed = false;
        for clause in text.split(|ch| matches!(ch, '.' | ';' | '!' | '?')) {
            let first_indicator = self
                .vocabulary
                .scoring
                .categories()
                .into_iter()
                .flat_map(|category| category.terms.iter())
                .filter_map(|term| clause.find(term.as_str()))
                .min();
            let Some(first) = first_indicator else {
                continue;
            };
            let lead = &clause[..first];
            if !self
                .vocabulary
                .family_relationship_terms
                .iter()
                .any(|term| contains_word(lead, term))
            {
                return false;
            }
            attributed = true;
        }
        attributed
    }

    /// Highest scoring branch; ties go to the earlier branch in vocabulary order.
    pub fn detect_branch(&self, text: &str) -> ServiceBranch {
        let mut best = (ServiceBranch::Unknown, 0);
        for entry in &self.vocabulary.branches {
            let score = count_matches(text, &entry.terms);
            if score > best.1 {
                best = (entry.branch, score);
            }
        }
        best.0
    }

    pub fn detect_secondary_branches(&self, text: &str) -> Vec<ServiceBranch> {
        if !contains_any(text, &self.vocabulary.multi_service_terms) {
            return Vec::new();
        }

        let primary = self.detect_branch(text);
        if !primary.is_known() {
            return Vec::new();
        }

        let mut remaining = text.to_string();
        for term in self.vocabulary.branch_terms(primary) {
            remaining = remaining.replace(term.as_str(), " ");
        }

        let secondary = self.detect_branch(&remaining);
        if secondary.is_known() && secondary != primary {
            vec![secondary]
        } else {
            Vec::new()
        }
    }

    pub fn detect_era(&self, text: &str) -> ServiceEra {
        let matched: Vec<ServiceEra> = self
            .vocabulary
            .eras
            .iter()
            .filter(|entry| contains_any(text, &entry.terms))
            .map(|entry| entry.era)
            .collect();

        match matched.as_slice() {
            [] => ServiceEra::Unknown,
            [single] => *single,
            _ => ServiceEra::Multiple,
        }
    }

    pub fn detect_rank_category(&self, text: &str) -> RankCategory {
        self.vocabulary
            .rank_categories
            .iter()
            .find(|entry| contains_any(text, &entry.terms))
            .map(|entry| entry.category)
            .unwrap_or(RankCategory::Unknown)
    }

    pub fn detect_specific_rank(&self, text: &str) -> Option<String> {
        self.vocabulary
            .specific_ranks
            .iter()
            .find(|rank| text.contains(rank.as_str()))
            .cloned()
    }

    pub fn estimate_years_of_service(&self, text: &str) -> Option<u8> {
        for pattern in &self.years_patterns {
            let years = pattern
                .captures(text)
                .and_then(|captures| captures.get(1))
                .and_then(|value| value.as_str().parse::<u8>().ok());
            if let Some(years) = years {
                if (1..=MAX_PLAUSIBLE_YEARS).contains(&years) {
                    return Some(years);
                }
            }
        }

        if text.contains("20 year") || text.contains("retired") {
            return Some(20);
        }
        if text.contains("career military") || text.contains("lifer") {
            return Some(25);
        }

        None
    }

    /// Explicit military-family language, or a relative described with military terms.
    pub fn detect_military_family(&self, text: &str, detection: &VeteranDetection) -> bool {
        contains_any(text, &self.vocabulary.military_family_terms) || detection.family_attributed
    }
}
