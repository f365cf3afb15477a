use serde::{Deserialize, Serialize};

use crate::profile::{
    CommunicationStyle, PriorityLevel, RankCategory, ServiceBranch, VeteranProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Military,
    Casual,
    Respectful,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminology {
    Military,
    Civilian,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationGuidance {
    pub tone: Tone,
    pub terminology: Terminology,
    pub response_time: String,
    pub preferred_method: String,
    pub special_instructions: Vec<String>,
}

pub(crate) fn response_time(priority: PriorityLevel) -> &'static str {
    match priority {
        PriorityLevel::Immediate => "4 hours",
        PriorityLevel::High => "24 hours",
        PriorityLevel::Family | PriorityLevel::Standard => "48 hours",
    }
}

pub(crate) fn tone_for(profile: &VeteranProfile) -> Tone {
    if !profile.is_veteran {
        Tone::Casual
    } else if profile.rank_category == RankCategory::Officer
        || profile.communication_style == CommunicationStyle::ProfessionalFormal
    {
        Tone::Formal
    } else if profile.military_terminology
        || profile.communication_style == CommunicationStyle::MilitaryDirect
    {
        Tone::Military
    } else if profile.communication_style == CommunicationStyle::RespectfulDetailed {
        Tone::Respectful
    } else {
        Tone::Casual
    }
}

pub(crate) fn branch_instruction(branch: ServiceBranch) -> Option<&'static str> {
    match branch {
        ServiceBranch::Army => Some("Use \"Hooah\" acknowledgment when appropriate"),
        ServiceBranch::Navy => Some("Naval terminology and precision expected"),
        ServiceBranch::Marines => Some("Direct communication style - Semper Fi attitude"),
        ServiceBranch::AirForce => Some("Professional and detail-oriented approach"),
        ServiceBranch::CoastGuard => Some("Reliable and ready response style"),
        ServiceBranch::SpaceForce => Some("Innovation-focused and future-forward messaging"),
        ServiceBranch::Unknown => None,
    }
}

pub(crate) fn communication(profile: &VeteranProfile) -> CommunicationGuidance {
    if !profile.is_veteran {
        return CommunicationGuidance {
            tone: Tone::Casual,
            terminology: Terminology::Civilian,
            response_time: response_time(PriorityLevel::Standard).to_string(),
            preferred_method: profile.preferred_contact_method.label().to_string(),
            special_instructions: Vec::new(),
        };
    }

    let terminology =
        if profile.military_terminology || profile.rank_category == RankCategory::Officer {
            Terminology::Military
        } else {
            Terminology::Mixed
        };

    let mut instructions = Vec::new();
    match profile.priority_level {
        PriorityLevel::Immediate => {
            instructions.push("IMMEDIATE PRIORITY - Expedited response required".to_string());
            instructions.push("Disabled/Combat Veteran - Handle with special care".to_string());
        }
        PriorityLevel::High => {
            instructions.push("HIGH PRIORITY - Veteran priority scheduling".to_string());
        }
        PriorityLevel::Family | PriorityLevel::Standard => {}
    }
    if profile.disabled_veteran {
        instructions.push("Accessibility needs assessment required".to_string());
        instructions.push("VA benefits coordination available".to_string());
    }
    if profile.combat_veteran {
        instructions.push("Combat veteran - respectful acknowledgment of service".to_string());
        instructions.push("PTSD awareness - flexible scheduling if needed".to_string());
    }
    if let Some(note) = branch_instruction(profile.service_branch) {
        instructions.push(note.to_string());
    }

    CommunicationGuidance {
        tone: tone_for(profile),
        terminology,
        response_time: response_time(profile.priority_level).to_string(),
        preferred_method: profile.preferred_contact_method.label().to_string(),
        special_instructions: instructions,
    }
}
