mod benefits;
mod context;
mod disability;
mod service;
mod timeline;

use std::sync::Arc;

pub use benefits::{estimate_benefit_value, BenefitCalculator, BenefitEligibility};
pub use context::ContextDetector;
pub use disability::DisabilityAnalyzer;
pub use service::{ProfileAnalyzer, VeteranDetection, MAX_CONFIDENCE, MIN_VETERAN_CONFIDENCE};
pub use timeline::TimelineDetector;

use crate::vocabulary::{Vocabulary, VocabularyError};

/// The full analyzer set sharing one vocabulary.
#[derive(Debug, Clone)]
pub struct Analyzers {
    pub profile: ProfileAnalyzer,
    pub timeline: TimelineDetector,
    pub disability: DisabilityAnalyzer,
    pub benefits: BenefitCalculator,
    pub context: ContextDetector,
}

impl Analyzers {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Result<Self, VocabularyError> {
        Ok(Self {
            profile: ProfileAnalyzer::new(vocabulary.clone())?,
            timeline: TimelineDetector::new(vocabulary.clone()),
            disability: DisabilityAnalyzer::new(vocabulary.clone())?,
            benefits: BenefitCalculator::new(vocabulary),
            context: ContextDetector::new()?,
        })
    }
}
