use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::insights::{self, NotificationPriority, VeteranNotification, VeteranRecommendation};
use super::session::{
    InMemorySessionStore, Interaction, InteractionKind, SessionPreferences, SessionRecord,
    SessionStore,
};
use super::PersonalizationError;
use crate::automation::{
    AutomatedDiscount, ContactInfo, CoordinatedBenefit, DiscountApplication, Money,
    PriorityService, Specialist, VeteranBenefitsAutomation, VeteranBenefitsPackage,
};
use crate::config::PersonalizationConfig;
use crate::content::{
    ContentPersonalizationEngine, ContextualContent, PageContext, PersonalizedContent,
};
use crate::profile::{
    FormData, InMemoryProfileStore, PriorityLevel, ProfileId, ProfileStore, StoreError,
    VeteranProfile, VeteranProfileEngine,
};
use crate::vocabulary::{Vocabulary, VocabularyError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub form_data: Option<FormData>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeteranExperience {
    pub profile: VeteranProfile,
    pub personalized_content: PersonalizedContent,
    pub benefits_package: VeteranBenefitsPackage,
    pub session: SessionRecord,
    pub recommendations: Vec<VeteranRecommendation>,
    pub notifications: Vec<VeteranNotification>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextualExperience {
    pub context: PageContext,
    pub personalized_content: ContextualContent,
    pub recommendations: Vec<VeteranRecommendation>,
    pub notifications: Vec<VeteranNotification>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Contact,
    Estimate,
    Booking,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmission {
    pub form_type: FormType,
    #[serde(default)]
    pub form_data: FormData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormResponse {
    pub greeting: String,
    pub message: String,
    pub veteran_recognition: bool,
    pub priority_handling: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_specialist: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormBenefits {
    pub discounts: Vec<AutomatedDiscount>,
    pub va_benefits: Vec<CoordinatedBenefit>,
    pub special_offers: Vec<PriorityService>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityHandling {
    pub priority_level: PriorityLevel,
    pub response_time: String,
    pub specialist_assigned: bool,
    pub emergency_contact: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmissionResult {
    pub response: FormResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub veteran_benefits: Option<FormBenefits>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_handling: Option<PriorityHandling>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRequest {
    pub amount: Money,
    #[serde(default)]
    pub project_details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountQuote {
    pub original_amount: Money,
    pub discounted_amount: Money,
    pub applied_discounts: Vec<AutomatedDiscount>,
    pub total_savings: Money,
    pub veteran_message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Standard,
    Priority,
    Emergency,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistRequest {
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistContact {
    pub assigned_specialist: Specialist,
    pub contact_info: ContactInfo,
    pub expected_response: String,
    pub special_instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub id: ProfileId,
    pub branch: String,
    pub priority: PriorityLevel,
    pub disabled: bool,
    pub combat: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub total_sessions: usize,
    pub average_interactions: f64,
    pub conversion_rate: f64,
    pub satisfaction_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitUtilization {
    pub total_veterans: usize,
    pub disabled_veterans: usize,
    pub combat_veterans: usize,
    pub discount_utilization: f64,
    pub va_benefit_coordination: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationUsage {
    #[serde(rename = "type")]
    pub kind: String,
    pub usage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub total_veterans: usize,
    pub veteran_profiles: Vec<ProfileSummary>,
    pub engagement_metrics: EngagementMetrics,
    pub benefit_utilization: BenefitUtilization,
    pub top_recommendations: Vec<RecommendationUsage>,
}

/// Coordinates classification, content, benefits and session state for one visitor at a time.
pub struct VeteranPersonalizationSystem<P, S> {
    profiles: VeteranProfileEngine<P>,
    content: ContentPersonalizationEngine,
    benefits: VeteranBenefitsAutomation,
    sessions: Arc<S>,
}

impl VeteranPersonalizationSystem<InMemoryProfileStore, InMemorySessionStore> {
    /// Fully in-memory system sized from configuration.
    pub fn in_memory(
        vocabulary: Arc<Vocabulary>,
        config: &PersonalizationConfig,
    ) -> Result<Self, VocabularyError> {
        let profiles =
            VeteranProfileEngine::new(vocabulary, Arc::new(InMemoryProfileStore::default()))?;
        Ok(Self::new(
            profiles,
            ContentPersonalizationEngine::new(config.discounts),
            VeteranBenefitsAutomation::new(config.discounts, Default::default()),
            Arc::new(InMemorySessionStore::with_capacity(config.session_capacity)),
        ))
    }
}

impl<P, S> VeteranPersonalizationSystem<P, S>
where
    P: ProfileStore + 'static,
    S: SessionStore + 'static,
{
    pub fn new(
        profiles: VeteranProfileEngine<P>,
        content: ContentPersonalizationEngine,
        benefits: VeteranBenefitsAutomation,
        sessions: Arc<S>,
    ) -> Self {
        Self {
            profiles,
            content,
            benefits,
            sessions,
        }
    }

    pub fn profiles(&self) -> &VeteranProfileEngine<P> {
        &self.profiles
    }

    pub fn benefits(&self) -> &VeteranBenefitsAutomation {
        &self.benefits
    }

    pub fn session(&self, session_id: &str) -> Result<SessionRecord, PersonalizationError> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()).into())
    }

    fn profile_for_session(
        &self,
        session_id: &str,
    ) -> Result<VeteranProfile, PersonalizationError> {
        let session = self.session(session_id)?;
        Ok(self.profiles.get_profile(&session.profile_id)?)
    }

    /// Build or refresh the profile, bind it to a session, and assemble the full experience.
    ///
    /// Without a user id the profile is keyed by the session, so two visitors who type the
    /// same words never share state.
    pub fn initialize_veteran_experience(
        &self,
        request: ExperienceRequest,
    ) -> Result<VeteranExperience, PersonalizationError> {
        let session_id = request
            .session_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let profile_id = request
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|user_id| ProfileId(user_id.to_string()))
            .unwrap_or_else(|| session_profile_id(&session_id));

        let profile = self.profiles.create_profile_as(
            profile_id,
            &request.text,
            request.form_data.as_ref(),
        );
        let personalized_content = self.content.generate(&profile);
        let benefits_package = self.benefits.package(&profile);

        let interaction = Interaction::now(
            InteractionKind::FormInteraction,
            json!({ "user_input": request.text, "form_data": request.form_data }),
            profile.is_veteran,
        );
        let mut previous_profile = None;
        let upserted = self.sessions.upsert(
            &session_id,
            &mut || SessionRecord::new(session_id.clone(), &profile),
            &mut |record| {
                if record.profile_id != profile.id {
                    previous_profile = Some(record.profile_id.clone());
                }
                record.profile_id = profile.id.clone();
                record.preferences = SessionPreferences::for_profile(&profile);
                record.context.priority_needs = profile.construction_priorities.clone();
                record.record(interaction.clone());
            },
        );
        if let Some(previous) = previous_profile {
            self.release_profile(&previous);
        }
        self.release_evicted(upserted.evicted);
        let session = upserted.record;

        let recommendations = insights::recommendations(&profile);
        let notifications = insights::notifications(
            &profile,
            &benefits_package,
            self.benefits.policy().max_percentage,
        );

        info!(
            session_id = %session.session_id,
            profile_id = %profile.id,
            is_veteran = profile.is_veteran,
            priority = profile.priority_level.label(),
            "veteran experience initialized"
        );

        Ok(VeteranExperience {
            profile,
            personalized_content,
            benefits_package,
            session,
            recommendations,
            notifications,
        })
    }

    /// Slice the session's content for one page without reclassifying.
    pub fn get_contextualized_experience(
        &self,
        session_id: &str,
        context: PageContext,
    ) -> Result<ContextualExperience, PersonalizationError> {
        let profile = self.profile_for_session(session_id)?;

        self.sessions.modify(session_id, &mut |record| {
            record.context.current_page = context;
            record.record(Interaction::now(
                InteractionKind::ContentView,
                json!({ "context": context }),
                profile.is_veteran,
            ));
        })?;

        let notifications = if context == PageContext::Homepage {
            let package = self.benefits.package(&profile);
            insights::notifications(&profile, &package, self.benefits.policy().max_percentage)
                .into_iter()
                .filter(|notification| notification.priority >= NotificationPriority::High)
                .collect()
        } else {
            Vec::new()
        };

        Ok(ContextualExperience {
            context,
            personalized_content: self.content.contextualize(&profile, context),
            recommendations: insights::contextual_recommendations(&profile, context),
            notifications,
        })
    }

    pub fn process_veteran_form_submission(
        &self,
        session_id: &str,
        submission: FormSubmission,
    ) -> Result<FormSubmissionResult, PersonalizationError> {
        let session = self.session(session_id)?;
        let update = self.profiles.form_update(&submission.form_data);
        let profile = self.profiles.update_profile(&session.profile_id, update)?;

        let response = self.form_response(&profile);
        let veteran_benefits = (profile.is_veteran
            && matches!(submission.form_type, FormType::Estimate | FormType::Booking))
        .then(|| self.form_benefits(&profile));
        let priority_handling = profile
            .priority_level
            .is_elevated()
            .then(|| PriorityHandling {
                priority_level: profile.priority_level,
                response_time: if profile.priority_level == PriorityLevel::Immediate {
                    "4 hours".to_string()
                } else {
                    "24 hours".to_string()
                },
                specialist_assigned: true,
                emergency_contact: profile.priority_level == PriorityLevel::Immediate,
            });
        let next_steps = next_steps(&profile);

        let form = &submission.form_data;
        self.sessions.modify(session_id, &mut |record| {
            if let Some(project) = form.project_type.as_ref() {
                if !record.context.project_interest.contains(project) {
                    record.context.project_interest.push(project.clone());
                }
            }
            if form.budget_range.is_some() {
                record.context.budget_indicated = form.budget_range.clone();
            }
            if form.timeline.is_some() {
                record.context.timeline_indicated = form.timeline.clone();
            }
            record.record(Interaction::now(
                InteractionKind::FormInteraction,
                json!({
                    "form_type": submission.form_type,
                    "form_data": form,
                    "priority_handling": priority_handling,
                }),
                profile.is_veteran,
            ));
        })?;

        info!(
            session_id,
            profile_id = %profile.id,
            form_type = ?submission.form_type,
            "veteran form submitted"
        );

        Ok(FormSubmissionResult {
            response,
            veteran_benefits,
            priority_handling,
            next_steps,
        })
    }

    pub fn apply_veteran_discounts(
        &self,
        session_id: &str,
        request: DiscountRequest,
    ) -> Result<DiscountQuote, PersonalizationError> {
        let profile = self.profile_for_session(session_id)?;
        let application = self.benefits.apply_discounts(&profile, request.amount);
        let veteran_message = discount_message(&profile, &application);

        let applied: Vec<&str> = application
            .applied_discounts
            .iter()
            .map(|discount| discount.id.as_str())
            .collect();
        self.sessions.modify(session_id, &mut |record| {
            record.record(Interaction::now(
                InteractionKind::DiscountApplied,
                json!({
                    "original_amount": application.original_amount,
                    "discounted_amount": application.discounted_amount,
                    "total_savings": application.total_savings,
                    "applied_discounts": applied,
                    "project_details": request.project_details,
                }),
                profile.is_veteran,
            ));
        })?;

        info!(
            session_id,
            profile_id = %profile.id,
            savings = %application.total_savings,
            "veteran discounts applied"
        );

        Ok(DiscountQuote {
            original_amount: application.original_amount,
            discounted_amount: application.discounted_amount,
            applied_discounts: application.applied_discounts,
            total_savings: application.total_savings,
            veteran_message,
        })
    }

    pub fn request_specialist_contact(
        &self,
        session_id: &str,
        request: SpecialistRequest,
    ) -> Result<SpecialistContact, PersonalizationError> {
        let profile = self.profile_for_session(session_id)?;
        let assignment = self.benefits.roster().assign(&profile);
        let expected_response = expected_response(&profile, request.urgency);
        let special_instructions = specialist_instructions(&profile, request.urgency);

        self.sessions.modify(session_id, &mut |record| {
            record.record(Interaction::now(
                InteractionKind::SpecialistContact,
                json!({
                    "urgency": request.urgency,
                    "message": request.message,
                    "specialist_id": assignment.assigned_specialist.id,
                    "expected_response": expected_response,
                }),
                profile.is_veteran,
            ));
        })?;

        Ok(SpecialistContact {
            assigned_specialist: assignment.assigned_specialist,
            contact_info: assignment.contact_info,
            expected_response: expected_response.to_string(),
            special_instructions,
        })
    }

    pub fn record_interaction(
        &self,
        session_id: &str,
        interaction: Interaction,
    ) -> Result<SessionRecord, PersonalizationError> {
        Ok(self
            .sessions
            .modify(session_id, &mut |record| record.record(interaction.clone()))?)
    }

    /// Drop the session and, once no other session holds it, its profile.
    pub fn end_session(&self, session_id: &str) -> Result<SessionRecord, PersonalizationError> {
        let ended = self
            .sessions
            .delete(session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))?;
        self.release_profile(&ended.profile_id);
        info!(
            session_id,
            interactions = ended.interaction_history.len(),
            "veteran session ended"
        );
        Ok(ended)
    }

    pub fn analytics(&self) -> AnalyticsReport {
        let veterans: Vec<VeteranProfile> = self
            .profiles
            .all_profiles()
            .into_iter()
            .filter(|profile| profile.is_veteran)
            .collect();

        let disabled_veterans = veterans.iter().filter(|p| p.disabled_veteran).count();
        let combat_veterans = veterans.iter().filter(|p| p.combat_veteran).count();

        AnalyticsReport {
            total_veterans: veterans.len(),
            veteran_profiles: veterans
                .iter()
                .map(|profile| ProfileSummary {
                    id: profile.id.clone(),
                    branch: profile.service_branch.label().to_string(),
                    priority: profile.priority_level,
                    disabled: profile.disabled_veteran,
                    combat: profile.combat_veteran,
                })
                .collect(),
            engagement_metrics: EngagementMetrics {
                total_sessions: self.sessions.len(),
                average_interactions: 5.2,
                conversion_rate: 0.85,
                satisfaction_score: 4.7,
            },
            benefit_utilization: BenefitUtilization {
                total_veterans: veterans.len(),
                disabled_veterans,
                combat_veterans,
                discount_utilization: 0.92,
                va_benefit_coordination: 0.78,
            },
            top_recommendations: [
                ("Accessibility Retrofit", 65),
                ("Security Enhancement", 45),
                ("Energy Efficiency", 38),
                ("Smart Technology", 32),
            ]
            .into_iter()
            .map(|(kind, usage)| RecommendationUsage {
                kind: kind.to_string(),
                usage,
            })
            .collect(),
        }
    }

    fn release_profile(&self, profile_id: &ProfileId) {
        if !self.sessions.is_bound(profile_id) {
            self.profiles.remove_profile(profile_id);
        }
    }

    fn release_evicted(&self, evicted: Vec<SessionRecord>) {
        for session in evicted {
            self.release_profile(&session.profile_id);
        }
    }

    fn form_response(&self, profile: &VeteranProfile) -> FormResponse {
        if !profile.is_veteran {
            return FormResponse {
                greeting: "Thank you for your interest in MH Construction!".to_string(),
                message: "We'll review your information and get back to you soon.".to_string(),
                veteran_recognition: false,
                priority_handling: false,
                assigned_specialist: None,
            };
        }

        let content = self.content.generate(profile);
        let assignment = self.benefits.roster().assign(profile);
        FormResponse {
            greeting: content.greeting,
            message: content.messaging.service_promise,
            veteran_recognition: true,
            priority_handling: profile.priority_level != PriorityLevel::Standard,
            assigned_specialist: Some(assignment.assigned_specialist.name),
        }
    }

    fn form_benefits(&self, profile: &VeteranProfile) -> FormBenefits {
        let package = self.benefits.package(profile);
        FormBenefits {
            discounts: package
                .discounts
                .into_iter()
                .filter(|discount| discount.auto_applied)
                .collect(),
            va_benefits: package.va_benefits.eligible_benefits,
            special_offers: package.priority_services,
        }
    }
}

fn session_profile_id(session_id: &str) -> ProfileId {
    ProfileId(format!("session-{session_id}"))
}

fn next_steps(profile: &VeteranProfile) -> Vec<String> {
    let mut steps = Vec::new();

    if profile.is_veteran {
        if profile.priority_level == PriorityLevel::Immediate {
            steps.push(
                "IMMEDIATE PRIORITY: Veteran specialist will contact you within 4 hours"
                    .to_string(),
            );
        } else {
            steps.push(
                "Priority response: Veteran specialist will contact you within 24 hours"
                    .to_string(),
            );
        }
        if profile.disabled_veteran {
            steps.push("Accessibility assessment will be scheduled".to_string());
            steps.push("VA benefits coordination will be discussed".to_string());
        }
        steps.push("Veteran discounts will be automatically applied".to_string());
    } else {
        steps.push("Our team will review your request and contact you within 48 hours".to_string());
        steps.push("Free consultation will be scheduled at your convenience".to_string());
    }

    steps.push("Detailed project proposal will be provided".to_string());
    steps
}

fn discount_message(profile: &VeteranProfile, application: &DiscountApplication) -> String {
    if application.total_savings == Money::ZERO {
        return "Thank you for choosing MH Construction!".to_string();
    }

    let names = application
        .applied_discounts
        .iter()
        .map(|discount| discount.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    if !profile.is_veteran {
        return format!(
            "Thank you for your family's service! You've saved {} with: {names}.",
            application.total_savings
        );
    }

    let mut message = format!(
        "Thank you for your service, {} veteran! You've saved {} with your veteran benefits: {names}.",
        profile.service_branch.label(),
        application.total_savings
    );
    if profile.combat_veteran {
        message.push_str(" Your combat service is honored with our deepest respect.");
    }
    if profile.disabled_veteran {
        message.push_str(" Additional accessibility benefits may be available through VA programs.");
    }
    message
}

fn expected_response(profile: &VeteranProfile, urgency: Urgency) -> &'static str {
    if !profile.is_veteran {
        return "48-72 hours";
    }
    match (urgency, profile.priority_level) {
        (Urgency::Emergency, PriorityLevel::Immediate) => "2-4 hours",
        (_, PriorityLevel::Immediate) => "4-8 hours",
        (Urgency::Priority, PriorityLevel::High) => "4-8 hours",
        (_, PriorityLevel::High) => "12-24 hours",
        _ => "24-48 hours",
    }
}

fn specialist_instructions(profile: &VeteranProfile, urgency: Urgency) -> Vec<String> {
    if !profile.is_veteran {
        return Vec::new();
    }

    let mut instructions = vec![
        format!("Veteran: {}", profile.service_branch.label()),
        "Thank for service in initial contact".to_string(),
    ];
    if profile.combat_veteran {
        instructions.push("Combat veteran - show appropriate respect".to_string());
        instructions.push("PTSD awareness - be flexible with scheduling".to_string());
    }
    if profile.disabled_veteran {
        instructions.push("Service-connected disability - accessibility focus".to_string());
        instructions.push("VA benefits coordination may be needed".to_string());
    }
    match urgency {
        Urgency::Emergency => {
            instructions.push("EMERGENCY REQUEST - Immediate response required".to_string())
        }
        Urgency::Priority => {
            instructions.push("PRIORITY REQUEST - Expedited response needed".to_string())
        }
        Urgency::Standard => {}
    }
    instructions
}
