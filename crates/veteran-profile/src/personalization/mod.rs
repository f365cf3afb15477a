//! Session-scoped personalization: ties classification, content and benefits
//! automation together behind keyed session state.

mod insights;
mod router;
mod session;
mod system;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::content::UnknownPageContext;
use crate::profile::StoreError;

pub use insights::{
    NotificationKind, NotificationPriority, RecommendationKind, VeteranNotification,
    VeteranRecommendation,
};
pub use router::personalization_router;
pub use session::{
    ContentFormat, InMemorySessionStore, Interaction, InteractionKind, NotificationLevel,
    SessionContext, SessionPreferences, SessionRecord, SessionStore, SessionUpsert,
    DEFAULT_SESSION_CAPACITY,
};
pub use system::{
    AnalyticsReport, BenefitUtilization, ContextualExperience, DiscountQuote, DiscountRequest,
    EngagementMetrics, ExperienceRequest, FormBenefits, FormResponse, FormSubmission,
    FormSubmissionResult, FormType, PriorityHandling, ProfileSummary, RecommendationUsage,
    SpecialistContact, SpecialistRequest, Urgency, VeteranExperience,
    VeteranPersonalizationSystem,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersonalizationError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    UnknownContext(#[from] UnknownPageContext),
}

impl PersonalizationError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PersonalizationError::Store(_))
    }
}
