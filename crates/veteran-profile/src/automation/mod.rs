//! Benefits automation: structured discounts, VA coordination, specialist
//! assignment and response commitments derived from a profile.

mod coordination;
mod discounts;
mod protocol;
mod specialists;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DiscountPolicy;
use crate::profile::VeteranProfile;

pub use coordination::{
    CoordinatedBenefit, CoordinationService, DocumentationAssistance, GrantProgram, LoanKind,
    LoanProgram, VaBenefitCoordination, VaProgram,
};
pub use discounts::{
    AutomatedDiscount, AutomatedDiscountKind, DiscountApplication, DiscountVerification, Money,
    VerificationMethod, VerificationStatus,
};
pub use protocol::{
    AutomatedTimeline, CommunicationProtocol, EmergencyResponse, EscalationLevel,
    PriorityService, PriorityServiceKind, TimelineMilestone,
};
pub use specialists::{
    AvailabilityWindow, ContactInfo, Specialist, SpecialistAssignment, SpecialistRoster,
    Specialization,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeteranBenefitsPackage {
    pub discounts: Vec<AutomatedDiscount>,
    pub va_benefits: VaBenefitCoordination,
    pub priority_services: Vec<PriorityService>,
    pub specialist_assignment: SpecialistAssignment,
    pub communication_protocol: CommunicationProtocol,
    pub timeline: AutomatedTimeline,
}

#[derive(Debug, Clone, Default)]
pub struct VeteranBenefitsAutomation {
    policy: DiscountPolicy,
    roster: SpecialistRoster,
}

impl VeteranBenefitsAutomation {
    pub fn new(policy: DiscountPolicy, roster: SpecialistRoster) -> Self {
        Self { policy, roster }
    }

    pub fn policy(&self) -> &DiscountPolicy {
        &self.policy
    }

    pub fn roster(&self) -> &SpecialistRoster {
        &self.roster
    }

    pub fn package(&self, profile: &VeteranProfile) -> VeteranBenefitsPackage {
        VeteranBenefitsPackage {
            discounts: self.discounts(profile),
            va_benefits: coordination::coordinate_benefits(profile),
            priority_services: protocol::priority_services(profile),
            specialist_assignment: self.roster.assign(profile),
            communication_protocol: protocol::communication_protocol(profile),
            timeline: protocol::automated_timeline(profile),
        }
    }

    pub fn discounts(&self, profile: &VeteranProfile) -> Vec<AutomatedDiscount> {
        discounts::calculate_discounts(profile, &self.policy)
    }

    pub fn apply_discounts(&self, profile: &VeteranProfile, amount: Money) -> DiscountApplication {
        let available = self.discounts(profile);
        let application = discounts::apply_discounts(amount, &available, &self.policy);
        debug!(
            profile_id = %profile.id,
            original = %application.original_amount,
            savings = %application.total_savings,
            applied = application.applied_discounts.len(),
            "discounts applied"
        );
        application
    }
}
