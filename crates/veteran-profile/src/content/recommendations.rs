use serde::{Deserialize, Serialize};

use crate::profile::{AdaptiveNeedKind, ServiceBranch, VeteranProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecommendation {
    pub project_type: String,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub estimated_cost: String,
    pub timeline: String,
    /// 1 is most urgent.
    pub priority: u8,
    pub veteran_specific: bool,
    pub accessibility_focused: bool,
}

struct Template {
    project_type: &'static str,
    title: &'static str,
    description: &'static str,
    benefits: [&'static str; 4],
    estimated_cost: &'static str,
    timeline: &'static str,
    accessibility_focused: bool,
}

impl Template {
    fn build(&self, priority: u8) -> ProjectRecommendation {
        ProjectRecommendation {
            project_type: self.project_type.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            benefits: self.benefits.iter().map(|item| item.to_string()).collect(),
            estimated_cost: self.estimated_cost.to_string(),
            timeline: self.timeline.to_string(),
            priority,
            veteran_specific: true,
            accessibility_focused: self.accessibility_focused,
        }
    }
}

const ACCESSIBILITY_RETROFIT: Template = Template {
    project_type: "Accessibility Retrofit",
    title: "Adaptive Home Modifications",
    description: "Comprehensive accessibility upgrades designed for your specific needs",
    benefits: [
        "ADA compliant modifications",
        "VA grant coordination",
        "Specialized veteran contractor",
        "Insurance navigation assistance",
    ],
    estimated_cost: "$15,000 - $45,000",
    timeline: "Priority: 2-4 weeks",
    accessibility_focused: true,
};

const MOBILITY_BATHROOM: Template = Template {
    project_type: "Mobility Enhancement",
    title: "Wheelchair Accessible Bathroom",
    description: "Full bathroom renovation with mobility-first design",
    benefits: [
        "Roll-in shower design",
        "Accessible fixtures",
        "Grab bar installation",
        "Non-slip surfaces",
    ],
    estimated_cost: "$12,000 - $25,000",
    timeline: "Priority: 3-4 weeks",
    accessibility_focused: true,
};

const SECURITY_PACKAGE: Template = Template {
    project_type: "Security Enhancement",
    title: "Veteran Security Package",
    description: "Comprehensive home security upgrades for peace of mind",
    benefits: [
        "Advanced security systems",
        "Reinforced entry points",
        "Smart home integration",
        "Emergency response features",
    ],
    estimated_cost: "$8,000 - $20,000",
    timeline: "2-3 weeks",
    accessibility_focused: false,
};

const ENERGY_SAVINGS: Template = Template {
    project_type: "Energy Efficiency",
    title: "Veteran Energy Savings Package",
    description: "Reduce monthly costs with energy-efficient upgrades",
    benefits: [
        "Lower utility bills",
        "Tax credit eligible",
        "Veteran pricing",
        "Smart home features",
    ],
    estimated_cost: "$5,000 - $15,000",
    timeline: "1-2 weeks",
    accessibility_focused: false,
};

fn branch_template(branch: ServiceBranch) -> Option<Template> {
    let template = match branch {
        ServiceBranch::Army => Template {
            project_type: "Tactical Storage",
            title: "Military Gear Organization System",
            description: "Custom storage solutions for military equipment and memorabilia",
            benefits: ["Secure storage", "Climate controlled", "Display options", "Quick access"],
            estimated_cost: "$3,000 - $8,000",
            timeline: "1-2 weeks",
            accessibility_focused: false,
        },
        ServiceBranch::Navy => Template {
            project_type: "Marine-Grade Features",
            title: "Weather-Resistant Outdoor Spaces",
            description: "Durable outdoor construction built to withstand any conditions",
            benefits: [
                "Marine-grade materials",
                "Weather resistant",
                "Low maintenance",
                "Ship-shape quality",
            ],
            estimated_cost: "$8,000 - $20,000",
            timeline: "2-3 weeks",
            accessibility_focused: false,
        },
        ServiceBranch::Marines => Template {
            project_type: "Fortress-Style Security",
            title: "Marine Corps Standard Security",
            description: "Military-grade security and fortification upgrades",
            benefits: [
                "Marine-level security",
                "Tactical advantages",
                "Perimeter protection",
                "Always ready",
            ],
            estimated_cost: "$10,000 - $25,000",
            timeline: "2-4 weeks",
            accessibility_focused: false,
        },
        ServiceBranch::AirForce => Template {
            project_type: "Smart Technology",
            title: "Advanced Smart Home Integration",
            description: "Cutting-edge technology integration for modern living",
            benefits: [
                "Advanced automation",
                "Energy efficiency",
                "Remote monitoring",
                "Future-ready",
            ],
            estimated_cost: "$7,000 - $18,000",
            timeline: "2-3 weeks",
            accessibility_focused: false,
        },
        ServiceBranch::CoastGuard => Template {
            project_type: "Emergency Preparedness",
            title: "Always Ready Home Systems",
            description: "Emergency preparedness and backup systems installation",
            benefits: [
                "Backup power",
                "Emergency supplies",
                "Communication systems",
                "Always prepared",
            ],
            estimated_cost: "$6,000 - $15,000",
            timeline: "1-2 weeks",
            accessibility_focused: false,
        },
        ServiceBranch::SpaceForce => Template {
            project_type: "Innovation Hub",
            title: "Future-Forward Home Office",
            description: "High-tech workspace designed for innovation and productivity",
            benefits: [
                "Advanced technology",
                "Ergonomic design",
                "Future-ready",
                "Innovation focused",
            ],
            estimated_cost: "$8,000 - $22,000",
            timeline: "2-3 weeks",
            accessibility_focused: false,
        },
        ServiceBranch::Unknown => return None,
    };
    Some(template)
}

/// Gated entries plus the universal energy package, sorted by ascending priority.
pub(crate) fn recommendations(profile: &VeteranProfile) -> Vec<ProjectRecommendation> {
    let mut recommendations = Vec::new();

    if profile.disabled_veteran {
        recommendations.push(ACCESSIBILITY_RETROFIT.build(1));
        if profile.has_adaptive_need(AdaptiveNeedKind::Mobility) {
            recommendations.push(MOBILITY_BATHROOM.build(2));
        }
    }

    if profile.combat_veteran {
        let priority = if profile.disabled_veteran { 3 } else { 1 };
        recommendations.push(SECURITY_PACKAGE.build(priority));
    }

    if let Some(template) = branch_template(profile.service_branch) {
        recommendations.push(template.build(5));
    }

    recommendations.push(ENERGY_SAVINGS.build(4));

    // Stable sort keeps insertion order among equal priorities.
    recommendations.sort_by_key(|recommendation| recommendation.priority);
    recommendations
}
