use std::sync::Arc;

use crate::profile::domain::{DeploymentRecord, ServiceBranch};
use crate::text::contains_any;
use crate::vocabulary::Vocabulary;

/// Combat involvement and deployment signals.
#[derive(Debug, Clone)]
pub struct TimelineDetector {
    vocabulary: Arc<Vocabulary>,
}

impl TimelineDetector {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn detect_combat_veteran(&self, text: &str) -> bool {
        contains_any(text, &self.vocabulary.combat_terms)
    }

    /// One record per matched theater, in vocabulary order, carrying placeholder dates.
    pub fn deployment_history(&self, text: &str, branch: ServiceBranch) -> Vec<DeploymentRecord> {
        let combat_role = self.detect_combat_veteran(text);
        self.vocabulary
            .deployments
            .iter()
            .filter(|theater| contains_any(text, &theater.terms))
            .map(|theater| DeploymentRecord {
                theater: theater.theater.clone(),
                start_date: theater.start,
                end_date: theater.end,
                branch,
                combat_role,
            })
            .collect()
    }

    pub fn combat_theaters(&self, text: &str) -> Vec<String> {
        self.vocabulary
            .combat_theaters
            .iter()
            .filter(|theater| contains_any(text, &theater.terms))
            .map(|theater| theater.theater.clone())
            .collect()
    }

    /// Only explicit multi-tour language counts; several theaters alone do not.
    pub fn multiple_deployments(&self, text: &str) -> bool {
        contains_any(text, &self.vocabulary.multi_deployment_terms)
    }
}
