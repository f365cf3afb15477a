use serde::{Deserialize, Serialize};

use crate::profile::{PriorityLevel, ServiceBranch, VeteranProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messaging {
    pub hero_message: String,
    pub value_proposition: String,
    pub service_promise: String,
    pub respect_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_specific_message: Option<String>,
}

fn branch_copy(branch: ServiceBranch) -> (&'static str, &'static str) {
    match branch {
        ServiceBranch::Army => (
            "Army Strong Construction Solutions",
            "Built with the same determination and excellence that defines the Army way.",
        ),
        ServiceBranch::Navy => (
            "Navigate Your Construction Needs with Precision",
            "Engineered with the precision and reliability of Naval tradition.",
        ),
        ServiceBranch::Marines => (
            "Semper Fi Construction - Always Faithful to Quality",
            "Built with Marine Corps standards - no compromise, no shortcuts.",
        ),
        ServiceBranch::AirForce => (
            "Soaring Above Construction Standards",
            "Precision engineering and attention to detail that reflects Air Force excellence.",
        ),
        ServiceBranch::CoastGuard => (
            "Ready When You Need Us - Semper Paratus Construction",
            "Always ready, always prepared, always reliable - just like the Coast Guard.",
        ),
        ServiceBranch::SpaceForce => (
            "Innovation Meets Construction - Semper Supra",
            "Forward-thinking construction solutions with cutting-edge technology.",
        ),
        ServiceBranch::Unknown => (
            "Military Precision Meets Construction Excellence",
            "Built with military standards and attention to detail.",
        ),
    }
}

pub(crate) fn messaging(profile: &VeteranProfile) -> Messaging {
    if !profile.is_veteran {
        return Messaging {
            hero_message: "Quality Construction You Can Trust".to_string(),
            value_proposition: "Professional construction services with integrity".to_string(),
            service_promise: "We deliver quality work with transparent communication".to_string(),
            respect_message: "Your project is our priority.".to_string(),
            urgency_message: None,
            branch_specific_message: None,
        };
    }

    let (hero, branch_message) = branch_copy(profile.service_branch);
    let mut messaging = Messaging {
        hero_message: hero.to_string(),
        value_proposition: "Veteran-owned construction with military standards".to_string(),
        service_promise:
            "We deliver with the same commitment and precision you brought to your service"
                .to_string(),
        respect_message: "Your service matters. Your project matters. We get it.".to_string(),
        urgency_message: None,
        branch_specific_message: Some(branch_message.to_string()),
    };

    messaging.urgency_message = match profile.priority_level {
        PriorityLevel::Immediate => Some(
            "IMMEDIATE PRIORITY STATUS: Expedited response within 4 hours guaranteed".to_string(),
        ),
        PriorityLevel::High => {
            Some("HIGH PRIORITY STATUS: Priority scheduling and 24-hour response".to_string())
        }
        _ => None,
    };

    if profile.disabled_veteran {
        messaging.service_promise = "We honor your sacrifice with accessible, adaptive construction solutions designed for your specific needs".to_string();
        messaging.respect_message =
            "Your service-connected needs are our mission. Every detail matters.".to_string();
    }

    // Combat copy is applied last and wins the respect message.
    if profile.combat_veteran {
        messaging.value_proposition =
            "Combat veteran to combat veteran - we understand what service means".to_string();
        messaging.respect_message = "From one warrior to another - your sacrifice is honored in everything we build.".to_string();
    }

    messaging
}
