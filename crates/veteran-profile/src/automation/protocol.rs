use serde::{Deserialize, Serialize};

use crate::content::{branch_instruction, response_time, tone_for, Terminology, Tone};
use crate::profile::{PriorityLevel, RankCategory, VeteranProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityServiceKind {
    Scheduling,
    Response,
    Specialist,
    Emergency,
    Accessibility,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityService {
    #[serde(rename = "type")]
    pub kind: PriorityServiceKind,
    pub name: String,
    pub description: String,
    pub timeline: String,
    pub automatic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationLevel {
    pub level: u8,
    pub trigger: String,
    pub assignee: String,
    pub timeline: String,
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationProtocol {
    pub response_time: String,
    pub escalation_procedure: Vec<EscalationLevel>,
    pub communication_style: Tone,
    pub terminology: Terminology,
    pub special_instructions: Vec<String>,
    pub priority_indicators: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineMilestone {
    pub phase: String,
    pub description: String,
    pub estimated_duration: String,
    pub dependencies: Vec<String>,
    pub veteran_specific: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyResponse {
    pub available: bool,
    pub response_time: String,
    pub criteria: Vec<String>,
    pub specialist: String,
    pub procedures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatedTimeline {
    pub initial_response: String,
    pub consultation: String,
    pub proposal: String,
    pub project_start: String,
    pub milestones: Vec<TimelineMilestone>,
    pub emergency: EmergencyResponse,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn service(kind: PriorityServiceKind, name: &str, description: &str, timeline: &str) -> PriorityService {
    PriorityService {
        kind,
        name: name.to_string(),
        description: description.to_string(),
        timeline: timeline.to_string(),
        automatic: true,
    }
}

pub(crate) fn priority_services(profile: &VeteranProfile) -> Vec<PriorityService> {
    if !profile.is_veteran {
        return vec![service(
            PriorityServiceKind::Response,
            "Standard Response Time",
            "Professional response within 48 hours",
            "48 hours",
        )];
    }

    let mut services = Vec::new();
    match profile.priority_level {
        PriorityLevel::Immediate => {
            services.push(service(
                PriorityServiceKind::Response,
                "IMMEDIATE Priority Response",
                "Guaranteed response within 4 hours for disabled/combat veterans",
                "4 hours",
            ));
            services.push(service(
                PriorityServiceKind::Emergency,
                "Emergency Construction Services",
                "24/7 emergency response for critical accessibility needs",
                "Within 24 hours",
            ));
        }
        PriorityLevel::High => services.push(service(
            PriorityServiceKind::Response,
            "HIGH Priority Response",
            "Priority response within 24 hours for veterans",
            "24 hours",
        )),
        PriorityLevel::Family | PriorityLevel::Standard => {}
    }

    services.push(service(
        PriorityServiceKind::Specialist,
        "Veteran Specialist Assignment",
        "Dedicated veteran specialist for your project",
        "Immediate assignment",
    ));
    services.push(service(
        PriorityServiceKind::Scheduling,
        "Priority Project Scheduling",
        "Veterans receive priority in project scheduling",
        "Next available slot",
    ));

    if profile.disabled_veteran {
        services.push(service(
            PriorityServiceKind::Accessibility,
            "Accessibility Compliance Assessment",
            "Free comprehensive accessibility assessment",
            "Within 1 week",
        ));
        services.push(service(
            PriorityServiceKind::Accessibility,
            "ADA Compliance Guarantee",
            "All work guaranteed to meet ADA compliance standards",
            "Throughout project",
        ));
    }

    services
}

pub(crate) fn communication_protocol(profile: &VeteranProfile) -> CommunicationProtocol {
    if !profile.is_veteran {
        return CommunicationProtocol {
            response_time: response_time(PriorityLevel::Standard).to_string(),
            escalation_procedure: Vec::new(),
            communication_style: Tone::Casual,
            terminology: Terminology::Civilian,
            special_instructions: Vec::new(),
            priority_indicators: Vec::new(),
        };
    }

    let terminology = if profile.rank_category == RankCategory::Officer {
        Terminology::Military
    } else if profile.military_terminology {
        Terminology::Mixed
    } else {
        Terminology::Civilian
    };

    let mut escalation = Vec::new();
    let mut indicators = Vec::new();
    match profile.priority_level {
        PriorityLevel::Immediate => {
            indicators.push("[EMERGENCY] IMMEDIATE PRIORITY".to_string());
            indicators.push("Disabled/Combat Veteran".to_string());
            escalation.push(EscalationLevel {
                level: 1,
                trigger: "No response within 2 hours".to_string(),
                assignee: "Duty Officer".to_string(),
                timeline: "30 minutes".to_string(),
                actions: strings(&["Direct specialist contact", "Manager notification"]),
            });
        }
        PriorityLevel::High => {
            indicators.push("[PRIORITY] HIGH PRIORITY".to_string());
            indicators.push("Veteran Status".to_string());
        }
        PriorityLevel::Family | PriorityLevel::Standard => {}
    }

    let mut instructions = vec![format!("Veteran: {}", profile.service_branch.label())];
    if profile.combat_veteran {
        instructions.push("Combat Veteran - PTSD awareness".to_string());
        instructions.push("Flexible scheduling if needed".to_string());
    }
    if profile.disabled_veteran {
        instructions.push("Service-connected disability".to_string());
        instructions.push("Accessibility assessment required".to_string());
    }
    if let Some(note) = branch_instruction(profile.service_branch) {
        instructions.push(note.to_string());
    }
    instructions.push("Thank for service in initial contact".to_string());
    instructions.push("Military appreciation and respect".to_string());

    CommunicationProtocol {
        response_time: response_time(profile.priority_level).to_string(),
        escalation_procedure: escalation,
        communication_style: tone_for(profile),
        terminology,
        special_instructions: instructions,
        priority_indicators: indicators,
    }
}

fn milestone(
    phase: &str,
    description: &str,
    duration: &str,
    dependencies: &[&str],
    veteran_specific: bool,
) -> TimelineMilestone {
    TimelineMilestone {
        phase: phase.to_string(),
        description: description.to_string(),
        estimated_duration: duration.to_string(),
        dependencies: strings(dependencies),
        veteran_specific,
    }
}

pub(crate) fn automated_timeline(profile: &VeteranProfile) -> AutomatedTimeline {
    let priority = if profile.is_veteran {
        profile.priority_level
    } else {
        PriorityLevel::Standard
    };

    let (initial_response, consultation, proposal, project_start) = match priority {
        PriorityLevel::Immediate => ("4 hours", "2-3 days", "24-48 hours", "1-2 weeks"),
        PriorityLevel::High => ("24 hours", "3-5 days", "2-3 business days", "1-3 weeks"),
        PriorityLevel::Family | PriorityLevel::Standard => {
            ("48 hours", "1 week", "3-5 business days", "2-4 weeks")
        }
    };

    let mut milestones = vec![
        milestone(
            "Initial Consultation",
            "Project assessment and requirement gathering",
            "2-3 hours",
            &[],
            false,
        ),
        milestone(
            "Proposal Development",
            "Detailed project proposal and cost estimation",
            "3-5 days",
            &["Initial Consultation"],
            false,
        ),
        milestone(
            "Permits and Planning",
            "Permit acquisition and detailed project planning",
            "1-2 weeks",
            &["Proposal Approval"],
            false,
        ),
    ];

    if profile.is_veteran && profile.disabled_veteran {
        milestones.insert(
            1,
            milestone(
                "Accessibility Assessment",
                "Comprehensive accessibility needs evaluation",
                "1-2 days",
                &["Initial Consultation"],
                true,
            ),
        );
        milestones.push(milestone(
            "VA Benefits Coordination",
            "Coordination with VA benefits and documentation",
            "1-3 weeks",
            &["Accessibility Assessment"],
            true,
        ));
    }

    if priority == PriorityLevel::Immediate {
        milestones.insert(
            0,
            milestone(
                "Emergency Assessment",
                "Immediate assessment for urgent veteran needs",
                "2-4 hours",
                &[],
                true,
            ),
        );
    }

    AutomatedTimeline {
        initial_response: initial_response.to_string(),
        consultation: consultation.to_string(),
        proposal: proposal.to_string(),
        project_start: project_start.to_string(),
        milestones,
        emergency: EmergencyResponse {
            available: priority == PriorityLevel::Immediate,
            response_time: "2 hours".to_string(),
            criteria: strings(&["Medical emergency", "Safety hazard", "Accessibility crisis"]),
            specialist: "Emergency Response Specialist".to_string(),
            procedures: strings(&[
                "Immediate specialist contact",
                "Emergency assessment within 4 hours",
                "Temporary solutions if needed",
                "Expedited project timeline",
            ]),
        },
    }
}
