//! Veteran profile classification: analyzers, the canonical profile entity, and its store.

pub mod analysis;
pub mod domain;
pub mod engine;
pub mod store;

#[cfg(test)]
pub(crate) mod tests;

pub use analysis::{estimate_benefit_value, Analyzers, BenefitEligibility};
pub use domain::{
    AdaptiveNeed, AdaptiveNeedKind, BenefitStatus, BenefitType, BudgetRange, CommunicationStyle,
    ContactMethod, DeploymentRecord, EmploymentStatus, FamilyStatus, FormData, HousingStatus,
    IncomeLevel, PriorityLevel, ProfileId, ProfileUpdate, ProjectTimeline, RankCategory,
    RespectLevel, ServiceBranch, ServiceEra, SessionData, Severity, VaBenefit, VeteranProfile,
    ACCESSIBILITY_COMPLIANCE, COST_EFFECTIVENESS, ENERGY_EFFICIENCY, SECURITY_FEATURES,
    SMART_HOME_TECHNOLOGY,
};
pub use engine::VeteranProfileEngine;
pub use store::{InMemoryProfileStore, ProfileStore, StoreError};
