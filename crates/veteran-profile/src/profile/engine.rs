use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::analysis::{Analyzers, BenefitEligibility, VeteranDetection};
use super::domain::{
    CommunicationStyle, EmploymentStatus, FamilyStatus, FormData, HousingStatus, PriorityLevel,
    ProfileId, ProfileUpdate, RankCategory, RespectLevel, ServiceBranch, ServiceEra,
    SessionData, VeteranProfile,
};
use super::store::{ProfileStore, StoreError};
use crate::text::{contains_any, normalize};
use crate::vocabulary::{Vocabulary, VocabularyError};

/// Builds profiles from raw input and owns the keyed profile store.
pub struct VeteranProfileEngine<S> {
    analyzers: Analyzers,
    store: Arc<S>,
}

impl<S> VeteranProfileEngine<S>
where
    S: ProfileStore + 'static,
{
    pub fn new(vocabulary: Arc<Vocabulary>, store: Arc<S>) -> Result<Self, VocabularyError> {
        Ok(Self {
            analyzers: Analyzers::new(vocabulary)?,
            store,
        })
    }

    pub fn analyzers(&self) -> &Analyzers {
        &self.analyzers
    }

    /// Classify without touching the store.
    pub fn classify(
        &self,
        input: &str,
        form: Option<&FormData>,
        session: Option<&SessionData>,
    ) -> VeteranProfile {
        let text = normalize(input);
        let detection = self.analyzers.profile.detect_veteran_status(&text);
        let id = profile_id(&text, form, session, detection.is_veteran);

        if detection.is_veteran {
            self.veteran_profile(id, &text, form, detection)
        } else {
            self.non_veteran_profile(id, &text, form, &detection)
        }
    }

    /// Classify and store, replacing any profile with the same id.
    pub fn analyze_and_create_profile(
        &self,
        input: &str,
        form: Option<&FormData>,
        session: Option<&SessionData>,
    ) -> VeteranProfile {
        let profile = self.classify(input, form, session);
        info!(
            profile_id = %profile.id,
            is_veteran = profile.is_veteran,
            confidence = profile.confidence,
            priority = profile.priority_level.label(),
            "veteran profile created"
        );
        self.store.set(profile.clone());
        profile
    }

    /// Classify and store under a caller-chosen key, e.g. one owned by a single session.
    pub fn create_profile_as(
        &self,
        id: ProfileId,
        input: &str,
        form: Option<&FormData>,
    ) -> VeteranProfile {
        let mut profile = self.classify(input, form, None);
        profile.id = id;
        info!(
            profile_id = %profile.id,
            is_veteran = profile.is_veteran,
            confidence = profile.confidence,
            priority = profile.priority_level.label(),
            "veteran profile created"
        );
        self.store.set(profile.clone());
        profile
    }

    pub fn remove_profile(&self, id: &ProfileId) -> Option<VeteranProfile> {
        let removed = self.store.delete(id);
        if removed.is_some() {
            debug!(profile_id = %id, "veteran profile released");
        }
        removed
    }

    pub fn get_profile(&self, id: &ProfileId) -> Result<VeteranProfile, StoreError> {
        self.store
            .get(id)
            .ok_or_else(|| StoreError::ProfileNotFound(id.0.clone()))
    }

    /// Merge `update` into the stored profile and refresh `last_updated`.
    pub fn update_profile(
        &self,
        id: &ProfileId,
        update: ProfileUpdate,
    ) -> Result<VeteranProfile, StoreError> {
        let mut pending = Some(update);
        let updated = self.store.modify(id, &mut |profile| {
            if let Some(update) = pending.take() {
                profile.merge(update);
            }
            profile.last_updated = Utc::now();
        })?;
        debug!(profile_id = %id, "veteran profile updated");
        Ok(updated)
    }

    /// Translate submitted form fields into an update. Absent fields stay untouched.
    pub fn form_update(&self, form: &FormData) -> ProfileUpdate {
        let context = &self.analyzers.context;
        ProfileUpdate {
            budget_range: context.budget_range("", Some(form)),
            preferred_timeline: form
                .timeline
                .as_ref()
                .map(|_| context.preferred_timeline("", Some(form))),
            preferred_contact_method: form
                .preferred_contact
                .as_ref()
                .map(|_| context.contact_method("", Some(form))),
            communication_style: None,
            construction_priorities: form
                .project_type
                .iter()
                .map(|project| project.trim().to_string())
                .filter(|project| !project.is_empty())
                .collect(),
            accessibility_requirements: Vec::new(),
        }
    }

    /// VA program eligibility derived from the profile's service facts.
    pub fn benefit_eligibility(&self, profile: &VeteranProfile) -> BenefitEligibility {
        self.analyzers.benefits.eligibility(
            profile.years_of_service,
            profile.service_branch,
            profile.combat_veteran,
        )
    }

    pub fn all_profiles(&self) -> Vec<VeteranProfile> {
        self.store.all()
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn veteran_profile(
        &self,
        id: ProfileId,
        text: &str,
        form: Option<&FormData>,
        detection: VeteranDetection,
    ) -> VeteranProfile {
        let analyzers = &self.analyzers;
        let service_branch = analyzers.profile.detect_branch(text);
        let rank_category = analyzers.profile.detect_rank_category(text);
        let combat_veteran = analyzers.timeline.detect_combat_veteran(text);
        let disabled_veteran = analyzers.disability.detect_disabled_veteran(text);

        VeteranProfile {
            id,
            last_updated: Utc::now(),
            is_veteran: true,
            confidence: detection.confidence,

            service_branch,
            secondary_branches: analyzers.profile.detect_secondary_branches(text),
            service_era: analyzers.profile.detect_era(text),
            rank_category,
            specific_rank: analyzers.profile.detect_specific_rank(text),
            years_of_service: analyzers.profile.estimate_years_of_service(text),

            combat_veteran,
            deployment_history: analyzers.timeline.deployment_history(text, service_branch),
            combat_theaters: analyzers.timeline.combat_theaters(text),
            multiple_deployments: analyzers.timeline.multiple_deployments(text),

            disabled_veteran,
            disability_rating: analyzers.disability.estimate_rating(text),
            service_connected_conditions: analyzers.disability.service_connected_conditions(text),
            adaptive_needs: analyzers.disability.adaptive_needs(text),

            va_benefits: analyzers.benefits.detect_va_benefits(text),
            eligible_programs: analyzers.benefits.eligible_programs(text, disabled_veteran),
            priority_level: analyzers
                .benefits
                .priority_level(text, disabled_veteran, combat_veteran),

            family_status: analyzers.context.family_status(text),
            employment_status: analyzers.context.employment_status(text),
            housing_status: analyzers.context.housing_status(text),
            income_level: analyzers.context.income_level(text),

            construction_priorities: analyzers.context.construction_priorities(
                text,
                disabled_veteran,
                form,
            ),
            accessibility_requirements: analyzers.context.accessibility_requirements(text),
            preferred_timeline: analyzers.context.preferred_timeline(text, form),
            budget_range: analyzers.context.budget_range(text, form),

            communication_style: analyzers.context.communication_style(text, rank_category),
            preferred_contact_method: analyzers.context.contact_method(text, form),
            military_terminology: analyzers.context.uses_military_terminology(text),
            respect_level: analyzers.context.respect_level(text, combat_veteran),
        }
    }

    /// Reduced profile: every veteran-only field carries its sentinel value.
    fn non_veteran_profile(
        &self,
        id: ProfileId,
        text: &str,
        form: Option<&FormData>,
        detection: &VeteranDetection,
    ) -> VeteranProfile {
        let analyzers = &self.analyzers;
        let military_family = analyzers.profile.detect_military_family(text, detection);
        let family_status = match (military_family, contains_any(text, &["gold star", "fallen"])) {
            (true, true) => FamilyStatus::GoldStarFamily,
            (true, false) => FamilyStatus::MilitaryFamily,
            (false, _) => FamilyStatus::SingleVeteran,
        };

        VeteranProfile {
            id,
            last_updated: Utc::now(),
            is_veteran: false,
            confidence: 0,

            service_branch: ServiceBranch::Unknown,
            secondary_branches: Vec::new(),
            service_era: ServiceEra::Unknown,
            rank_category: RankCategory::Unknown,
            specific_rank: None,
            years_of_service: None,

            combat_veteran: false,
            deployment_history: Vec::new(),
            combat_theaters: Vec::new(),
            multiple_deployments: false,

            disabled_veteran: false,
            disability_rating: None,
            service_connected_conditions: Vec::new(),
            adaptive_needs: Vec::new(),

            va_benefits: Vec::new(),
            eligible_programs: Vec::new(),
            priority_level: if military_family {
                PriorityLevel::Family
            } else {
                PriorityLevel::Standard
            },

            family_status,
            employment_status: EmploymentStatus::EmployedFullTime,
            housing_status: HousingStatus::Homeowner,
            income_level: None,

            construction_priorities: analyzers.context.construction_priorities(text, false, form),
            accessibility_requirements: Vec::new(),
            preferred_timeline: analyzers.context.preferred_timeline(text, form),
            budget_range: analyzers.context.budget_range(text, form),

            communication_style: CommunicationStyle::CasualFriendly,
            preferred_contact_method: analyzers.context.contact_method("", form),
            military_terminology: false,
            respect_level: if military_family {
                RespectLevel::FamilyRespect
            } else {
                RespectLevel::ServiceHonor
            },
        }
    }
}

/// Caller-supplied user id, else a digest of the normalized input.
fn profile_id(
    text: &str,
    form: Option<&FormData>,
    session: Option<&SessionData>,
    is_veteran: bool,
) -> ProfileId {
    if let Some(user_id) = session.and_then(|session| session.user_id.as_deref()) {
        if !user_id.trim().is_empty() {
            return ProfileId(user_id.trim().to_string());
        }
    }

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    if let Some(form) = form {
        hasher.update(serde_json::to_vec(form).unwrap_or_default());
    }
    let digest = hasher.finalize();
    let prefix = if is_veteran { "veteran" } else { "user" };
    ProfileId(format!("{prefix}-{}", hex::encode(&digest[..8])))
}
