use serde::{Deserialize, Serialize};

use crate::automation::VeteranBenefitsPackage;
use crate::content::PageContext;
use crate::profile::{PriorityLevel, VeteranProfile, ACCESSIBILITY_COMPLIANCE};

const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Project,
    Benefit,
    Specialist,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeteranRecommendation {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub relevance_score: u8,
    pub veteran_specific: bool,
    pub urgent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_required: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BenefitOpportunity,
    DiscountAvailable,
    SpecialistMessage,
    UrgentResponse,
    DocumentNeeded,
}

/// Declared low to urgent so the derived ordering ranks urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeteranNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: NotificationPriority,
    pub action_required: bool,
}

fn recommendation(
    id: &str,
    kind: RecommendationKind,
    title: String,
    description: String,
    relevance_score: u8,
    urgent: bool,
    action_required: Option<&str>,
) -> VeteranRecommendation {
    VeteranRecommendation {
        id: id.to_string(),
        kind,
        title,
        description,
        relevance_score,
        veteran_specific: true,
        urgent,
        action_required: action_required.map(str::to_string),
    }
}

/// Top five by relevance; ties keep insertion order.
pub(crate) fn recommendations(profile: &VeteranProfile) -> Vec<VeteranRecommendation> {
    if !profile.is_veteran {
        return vec![VeteranRecommendation {
            veteran_specific: false,
            ..recommendation(
                "general001",
                RecommendationKind::Project,
                "Schedule Free Consultation".to_string(),
                "Get started with a comprehensive project assessment".to_string(),
                80,
                false,
                None,
            )
        }];
    }

    let mut recommendations = Vec::new();

    if profile.disabled_veteran {
        recommendations.push(recommendation(
            "disabled001",
            RecommendationKind::Benefit,
            "VA Accessibility Grants Available".to_string(),
            "You may qualify for up to $20,387 in accessibility grants".to_string(),
            95,
            true,
            Some("Schedule benefits consultation"),
        ));
    }

    if profile.combat_veteran {
        recommendations.push(recommendation(
            "combat001",
            RecommendationKind::Project,
            "Veteran Security Package".to_string(),
            "Enhanced security features designed for combat veterans".to_string(),
            85,
            false,
            None,
        ));
    }

    recommendations.push(recommendation(
        "specialist001",
        RecommendationKind::Specialist,
        format!(
            "Connect with {} Veteran Specialist",
            profile.service_branch.label()
        ),
        "Work with a specialist who understands your service background".to_string(),
        90,
        false,
        None,
    ));

    for (index, priority) in profile.construction_priorities.iter().enumerate() {
        let score = 75u8.saturating_sub((index as u8).saturating_mul(5));
        recommendations.push(recommendation(
            &format!("project{:03}", index + 1),
            RecommendationKind::Project,
            format!("{priority} Solutions"),
            format!(
                "Specialized {} options for veterans",
                priority.to_lowercase()
            ),
            score,
            priority == ACCESSIBILITY_COMPLIANCE,
            None,
        ));
    }

    recommendations.sort_by(|left, right| right.relevance_score.cmp(&left.relevance_score));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}

/// Page-specific suggestions layered on top of the session list.
pub(crate) fn contextual_recommendations(
    profile: &VeteranProfile,
    context: PageContext,
) -> Vec<VeteranRecommendation> {
    match context {
        PageContext::Estimator if profile.is_veteran && profile.disabled_veteran => {
            vec![recommendation(
                "estimator001",
                RecommendationKind::Benefit,
                "Include Accessibility Features".to_string(),
                "Add ADA-compliant features covered by VA grants".to_string(),
                90,
                false,
                Some("Review accessibility options"),
            )]
        }
        PageContext::Contact if profile.is_veteran => vec![recommendation(
            "contact001",
            RecommendationKind::Specialist,
            "Request Veteran Specialist".to_string(),
            "Connect directly with a veteran construction specialist".to_string(),
            85,
            false,
            None,
        )],
        _ => Vec::new(),
    }
}

/// The percentage a quote would actually apply: the best exclusive discount
/// when one exists, otherwise the capped stackable sum.
fn effective_percentage(package: &VeteranBenefitsPackage, max_percentage: u8) -> u8 {
    let exclusive = package
        .discounts
        .iter()
        .filter(|discount| !discount.stackable)
        .map(|discount| discount.percentage)
        .max();
    if let Some(percentage) = exclusive {
        return percentage;
    }
    let stacked: u32 = package
        .discounts
        .iter()
        .map(|discount| u32::from(discount.percentage))
        .sum();
    stacked.min(u32::from(max_percentage)) as u8
}

/// Notifications ordered urgent first; ties keep insertion order.
pub(crate) fn notifications(
    profile: &VeteranProfile,
    package: &VeteranBenefitsPackage,
    max_percentage: u8,
) -> Vec<VeteranNotification> {
    if !profile.is_veteran {
        return Vec::new();
    }

    let mut notifications = Vec::new();

    if profile.priority_level == PriorityLevel::Immediate {
        notifications.push(VeteranNotification {
            id: "priority001".to_string(),
            kind: NotificationKind::UrgentResponse,
            title: "IMMEDIATE Priority Status Active".to_string(),
            message: "You will receive priority response within 4 hours. Emergency contact available 24/7."
                .to_string(),
            priority: NotificationPriority::Urgent,
            action_required: false,
        });
    }

    let total = effective_percentage(package, max_percentage);
    if total > 0 {
        notifications.push(VeteranNotification {
            id: "discount001".to_string(),
            kind: NotificationKind::DiscountAvailable,
            title: format!("{total}% Veteran Discount Applied"),
            message: format!(
                "Your veteran status qualifies you for {total}% off construction services."
            ),
            priority: NotificationPriority::Medium,
            action_required: false,
        });
    }

    for (index, benefit) in package.va_benefits.eligible_benefits.iter().enumerate() {
        if benefit.coordination_offered {
            notifications.push(VeteranNotification {
                id: format!("benefit{:03}", index + 1),
                kind: NotificationKind::BenefitOpportunity,
                title: format!("{} Available", benefit.name),
                message: format!(
                    "You may qualify for {} through {}",
                    benefit.max_benefit, benefit.name
                ),
                priority: NotificationPriority::High,
                action_required: true,
            });
        }
    }

    if package
        .discounts
        .iter()
        .any(|discount| discount.awaiting_verification())
    {
        notifications.push(VeteranNotification {
            id: "docs001".to_string(),
            kind: NotificationKind::DocumentNeeded,
            title: "Discount Verification Needed".to_string(),
            message: "Please provide verification documents to activate your veteran discounts."
                .to_string(),
            priority: NotificationPriority::Medium,
            action_required: true,
        });
    }

    notifications.sort_by(|left, right| right.priority.cmp(&left.priority));
    notifications
}
