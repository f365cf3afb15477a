use std::sync::Arc;

use regex::Regex;

use crate::profile::domain::{AdaptiveNeed, Severity};
use crate::text::contains_any;
use crate::vocabulary::{AdaptiveNeedTerms, Vocabulary};

/// Detects disability status, rating, conditions, and adaptive needs.
#[derive(Debug, Clone)]
pub struct DisabilityAnalyzer {
    vocabulary: Arc<Vocabulary>,
    rating_patterns: Vec<Regex>,
}

impl DisabilityAnalyzer {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Result<Self, regex::Error> {
        let rating_patterns = [
            r"(\d+)\s*%\s*disabled",
            r"(\d+)\s*%\s*(?:disability\s*)?rating",
            r"va\s*rating\s*(?:of\s*)?(\d+)",
            r"disability\s*(\d+)\s*%",
            r"service\s*connected\s*(\d+)\s*%",
            r"(\d+)\s*percent\s*(?:disabled|disability|rating)",
        ]
        .into_iter()
        .map(Regex::new)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            vocabulary,
            rating_patterns,
        })
    }

    pub fn detect_disabled_veteran(&self, text: &str) -> bool {
        contains_any(text, &self.vocabulary.disability_terms)
    }

    /// First pattern capturing a value in [0, 100], snapped to the VA ladder.
    pub fn estimate_rating(&self, text: &str) -> Option<u8> {
        for pattern in &self.rating_patterns {
            let captured = pattern
                .captures(text)
                .and_then(|captures| captures.get(1))
                .and_then(|value| value.as_str().parse::<u32>().ok());
            if let Some(value) = captured {
                if value <= 100 {
                    return snap_to_ladder(value);
                }
            }
        }

        if text.contains("100% disabled") || text.contains("totally disabled") {
            return Some(100);
        }
        if text.contains("70% disabled") {
            return Some(70);
        }
        if text.contains("50% disabled") {
            return Some(50);
        }
        if text.contains("30% disabled") {
            return Some(30);
        }

        None
    }

    pub fn service_connected_conditions(&self, text: &str) -> Vec<String> {
        self.vocabulary
            .conditions
            .iter()
            .filter(|entry| contains_any(text, &entry.terms))
            .map(|entry| entry.condition.clone())
            .collect()
    }

    pub fn adaptive_needs(&self, text: &str) -> Vec<AdaptiveNeed> {
        self.vocabulary
            .adaptive_needs
            .iter()
            .filter(|entry| contains_any(text, &entry.triggers))
            .map(|entry| AdaptiveNeed {
                kind: entry.kind,
                severity: self.severity_for(text, entry),
                accommodations: entry.accommodations.clone(),
            })
            .collect()
    }

    fn severity_for(&self, text: &str, entry: &AdaptiveNeedTerms) -> Severity {
        if let Some(fixed) = entry.fixed_severity {
            return fixed;
        }
        if contains_any(text, &entry.severe_indicators) {
            Severity::Severe
        } else if contains_any(text, &self.vocabulary.severity_intensifiers) {
            Severity::Moderate
        } else {
            Severity::Mild
        }
    }
}

/// VA ratings are issued in steps of ten; half rounds up. Zero is not a rating.
pub(crate) fn snap_to_ladder(value: u32) -> Option<u8> {
    let snapped = ((value.min(100) + 5) / 10) * 10;
    match snapped {
        0 => None,
        other => u8::try_from(other.min(100)).ok(),
    }
}
