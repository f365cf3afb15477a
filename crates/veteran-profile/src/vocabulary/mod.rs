//! Versioned keyword tables backing every classifier.
//!
//! The embedded table ships with the crate; deployments can point
//! `VETERAN_VOCABULARY_PATH` at an alternate YAML file with the same shape.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::profile::domain::{
    AdaptiveNeedKind, BenefitStatus, BenefitType, RankCategory, ServiceBranch, ServiceEra,
    Severity,
};
use crate::text::contains_any;

const EMBEDDED_VOCABULARY: &str = include_str!("vocabulary.yaml");

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid vocabulary document: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("vocabulary table `{0}` must not be empty")]
    EmptyTable(&'static str),
    #[error("every eligible program rule needs `requires_disabled` or trigger terms")]
    UnconditionalProgram,
    #[error("invalid classifier pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Vocabulary {
    pub version: String,
    pub scoring: ScoringVocabulary,
    pub branches: Vec<BranchTerms>,
    pub multi_service_terms: Vec<String>,
    pub eras: Vec<EraTerms>,
    pub rank_categories: Vec<RankCategoryTerms>,
    pub specific_ranks: Vec<String>,
    pub combat_terms: Vec<String>,
    pub deployments: Vec<DeploymentTheater>,
    pub combat_theaters: Vec<TheaterTerms>,
    pub multi_deployment_terms: Vec<String>,
    pub disability_terms: Vec<String>,
    pub conditions: Vec<ConditionTerms>,
    pub severity_intensifiers: Vec<String>,
    pub adaptive_needs: Vec<AdaptiveNeedTerms>,
    pub va_benefits: Vec<BenefitTrigger>,
    pub eligible_programs: Vec<ProgramRule>,
    pub general_veteran_terms: Vec<String>,
    pub military_family_terms: Vec<String>,
    pub family_relationship_terms: Vec<String>,
}

/// Weighted term lists feeding the veteran confidence score.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringVocabulary {
    pub direct: WeightedTerms,
    pub branch: WeightedTerms,
    pub rank: WeightedTerms,
    pub combat: WeightedTerms,
    pub va_benefits: WeightedTerms,
    pub culture: WeightedTerms,
}

impl ScoringVocabulary {
    pub fn categories(&self) -> [&WeightedTerms; 6] {
        [
            &self.direct,
            &self.branch,
            &self.rank,
            &self.combat,
            &self.va_benefits,
            &self.culture,
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightedTerms {
    pub weight: u8,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BranchTerms {
    pub branch: ServiceBranch,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EraTerms {
    pub era: ServiceEra,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankCategoryTerms {
    pub category: RankCategory,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentTheater {
    pub theater: String,
    pub terms: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TheaterTerms {
    pub theater: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionTerms {
    pub condition: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdaptiveNeedTerms {
    pub kind: AdaptiveNeedKind,
    pub triggers: Vec<String>,
    #[serde(default)]
    pub severe_indicators: Vec<String>,
    /// Needs with no intensity signal in free text carry a fixed severity.
    #[serde(default)]
    pub fixed_severity: Option<Severity>,
    pub accommodations: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BenefitTrigger {
    pub kind: BenefitType,
    pub status: BenefitStatus,
    pub details: String,
    pub terms: Vec<String>,
}

/// Program offered when its declared conditions hold.
#[derive(Debug, Clone, Deserialize)]
pub struct ProgramRule {
    pub program: String,
    #[serde(default)]
    pub requires_disabled: bool,
    #[serde(default)]
    pub terms: Vec<String>,
}

impl ProgramRule {
    pub fn applies(&self, text: &str, disabled: bool) -> bool {
        (!self.requires_disabled || disabled)
            && (self.terms.is_empty() || contains_any(text, &self.terms))
    }
}

impl Vocabulary {
    /// The vocabulary compiled into the crate.
    pub fn standard() -> Result<Self, VocabularyError> {
        Self::from_yaml_str(EMBEDDED_VOCABULARY)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Vocabulary = serde_yaml::from_str(raw)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// Load from `path` when given, otherwise the embedded table.
    pub fn resolve(path: Option<&Path>) -> Result<Self, VocabularyError> {
        match path {
            Some(path) => {
                let vocabulary = Self::load_from_file(path)?;
                tracing::info!(
                    path = %path.display(),
                    version = %vocabulary.version,
                    "loaded external vocabulary"
                );
                Ok(vocabulary)
            }
            None => Self::standard(),
        }
    }

    fn validate(&self) -> Result<(), VocabularyError> {
        if self.branches.is_empty() {
            return Err(VocabularyError::EmptyTable("branches"));
        }
        if self.eras.is_empty() {
            return Err(VocabularyError::EmptyTable("eras"));
        }
        if self.rank_categories.is_empty() {
            return Err(VocabularyError::EmptyTable("rank_categories"));
        }
        if self.scoring.direct.terms.is_empty() {
            return Err(VocabularyError::EmptyTable("scoring.direct"));
        }
        if self
            .eligible_programs
            .iter()
            .any(|rule| !rule.requires_disabled && rule.terms.is_empty())
        {
            return Err(VocabularyError::UnconditionalProgram);
        }
        Ok(())
    }

    pub fn branch_terms(&self, branch: ServiceBranch) -> &[String] {
        self.branches
            .iter()
            .find(|entry| entry.branch == branch)
            .map(|entry| entry.terms.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_vocabulary_parses() {
        let vocabulary = Vocabulary::standard().expect("embedded vocabulary parses");
        assert_eq!(vocabulary.scoring.direct.weight, 20);
        assert_eq!(vocabulary.scoring.culture.weight, 5);
        assert_eq!(vocabulary.branches.len(), 6);
        assert_eq!(vocabulary.branches[0].branch, ServiceBranch::Army);
        assert_eq!(vocabulary.branches[3].branch, ServiceBranch::AirForce);
        assert_eq!(vocabulary.eras[0].era, ServiceEra::Gwot);
        assert_eq!(vocabulary.rank_categories[0].category, RankCategory::Officer);
        assert_eq!(vocabulary.conditions.len(), 10);
        assert_eq!(vocabulary.va_benefits.len(), 5);
    }

    #[test]
    fn deployment_placeholders_carry_dates() {
        let vocabulary = Vocabulary::standard().expect("embedded vocabulary parses");
        let korea = vocabulary
            .deployments
            .iter()
            .find(|theater| theater.theater == "Korea")
            .expect("korea theater");
        assert_eq!(korea.start, NaiveDate::from_ymd_opt(1950, 6, 25).unwrap());
        assert_eq!(korea.end, NaiveDate::from_ymd_opt(1953, 7, 27).unwrap());
    }

    #[test]
    fn fixed_severities_are_declared_for_cognitive_and_medical() {
        let vocabulary = Vocabulary::standard().expect("embedded vocabulary parses");
        let fixed: Vec<_> = vocabulary
            .adaptive_needs
            .iter()
            .filter_map(|need| need.fixed_severity.map(|severity| (need.kind, severity)))
            .collect();
        assert_eq!(
            fixed,
            vec![
                (AdaptiveNeedKind::Cognitive, Severity::Moderate),
                (AdaptiveNeedKind::Medical, Severity::Severe),
            ]
        );
    }

    #[test]
    fn rejects_document_without_branches() {
        let raw = EMBEDDED_VOCABULARY.replacen("branches:\n", "branches: []\nunused_branches:\n", 1);
        let error = Vocabulary::from_yaml_str(&raw).expect_err("empty branches rejected");
        assert!(matches!(error, VocabularyError::EmptyTable("branches")));
    }

    #[test]
    fn program_rules_read_from_the_table() {
        let vocabulary = Vocabulary::standard().expect("embedded vocabulary parses");
        assert_eq!(vocabulary.eligible_programs.len(), 7);

        let home = vocabulary
            .eligible_programs
            .iter()
            .find(|rule| rule.program == "VA Home Loan")
            .expect("home loan rule");
        assert!(home.applies("looking at a new house", false));
        assert!(!home.applies("need a new deck", true));

        let business = &vocabulary.eligible_programs[0];
        assert!(business.requires_disabled);
        assert!(business.applies("", true));
        assert!(!business.applies("starting a business", false));
    }

    #[test]
    fn rejects_program_rule_without_conditions() {
        let raw = EMBEDDED_VOCABULARY.replacen(
            "eligible_programs:\n",
            "eligible_programs:\n  - program: Everything\n",
            1,
        );
        let error = Vocabulary::from_yaml_str(&raw).expect_err("unconditional rule rejected");
        assert!(matches!(error, VocabularyError::UnconditionalProgram));
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let error = Vocabulary::load_from_file("./does-not-exist.yaml").expect_err("io error");
        assert!(matches!(error, VocabularyError::Io(_)));
    }
}
