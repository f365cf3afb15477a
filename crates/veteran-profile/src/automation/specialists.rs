use serde::{Deserialize, Serialize};

use crate::profile::{ContactMethod, PriorityLevel, ServiceBranch, VeteranProfile};

const OFFICE_PHONE: &str = "(509) 308-6489";
const OFFICE_EMAIL: &str = "office@mhc-gc.com";
const DIRECT_LINE: &str = "(509) 308-6489 ext. 100";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Specialization {
    #[serde(rename = "Accessibility Compliance")]
    AccessibilityCompliance,
    #[serde(rename = "VA Benefits Coordination")]
    VaBenefitsCoordination,
    #[serde(rename = "Combat Veteran Services")]
    CombatVeteranServices,
    #[serde(rename = "Disabled Veteran Services")]
    DisabledVeteranServices,
    #[serde(rename = "Emergency Response")]
    EmergencyResponse,
    #[serde(rename = "Security Systems")]
    SecuritySystems,
    #[serde(rename = "Smart Technology")]
    SmartTechnology,
    #[serde(rename = "Energy Efficiency")]
    EnergyEfficiency,
    #[serde(rename = "General Construction")]
    GeneralConstruction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialist {
    pub id: String,
    pub name: String,
    pub title: String,
    pub branch: ServiceBranch,
    pub veteran_status: bool,
    pub combat_veteran: bool,
    pub specializations: Vec<Specialization>,
    pub certifications: Vec<String>,
    pub languages: Vec<String>,
    pub bio: String,
}

impl Specialist {
    pub fn has(&self, specialization: Specialization) -> bool {
        self.specializations.contains(&specialization)
    }

    fn shares_specialization(&self, other: &Specialist) -> bool {
        self.specializations.iter().any(|specialization| other.has(*specialization))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    pub preferred_method: ContactMethod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub timezone: String,
    pub emergency_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialistAssignment {
    pub assigned_specialist: Specialist,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_specialist: Option<Specialist>,
    pub contact_info: ContactInfo,
    pub specializations: Vec<Specialization>,
    pub availability: Vec<AvailabilityWindow>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn specialist(
    id: &str,
    name: &str,
    title: &str,
    branch: ServiceBranch,
    combat_veteran: bool,
    specializations: &[Specialization],
    certifications: &[&str],
    languages: &[&str],
    bio: &str,
) -> Specialist {
    Specialist {
        id: id.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        branch,
        veteran_status: branch.is_known(),
        combat_veteran,
        specializations: specializations.to_vec(),
        certifications: strings(certifications),
        languages: strings(languages),
        bio: bio.to_string(),
    }
}

fn general_coordinator() -> Specialist {
    specialist(
        "general001",
        "Mike Thompson",
        "Senior Project Coordinator",
        ServiceBranch::Unknown,
        false,
        &[Specialization::EnergyEfficiency],
        &["Project Management Professional"],
        &["English"],
        "Experienced project coordinator committed to delivering quality construction services.",
    )
}

fn standard_availability() -> Vec<AvailabilityWindow> {
    vec![AvailabilityWindow {
        day: "Monday-Friday".to_string(),
        start_time: "8:00 AM".to_string(),
        end_time: "6:00 PM".to_string(),
        timezone: "CST".to_string(),
        emergency_available: false,
    }]
}

fn availability_for(priority: PriorityLevel) -> Vec<AvailabilityWindow> {
    let mut windows = standard_availability();
    if priority == PriorityLevel::Immediate {
        for window in &mut windows {
            window.emergency_available = true;
        }
        windows.push(AvailabilityWindow {
            day: "Saturday-Sunday".to_string(),
            start_time: "9:00 AM".to_string(),
            end_time: "5:00 PM".to_string(),
            timezone: "CST".to_string(),
            emergency_available: true,
        });
    }
    windows
}

/// The veteran specialists available for assignment, in preference order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialistRoster {
    specialists: Vec<Specialist>,
}

impl Default for SpecialistRoster {
    fn default() -> Self {
        Self::standard()
    }
}

impl SpecialistRoster {
    pub fn new(specialists: Vec<Specialist>) -> Self {
        Self { specialists }
    }

    pub fn standard() -> Self {
        use Specialization::*;

        Self::new(vec![
            specialist(
                "spec001",
                "James \"Doc\" Martinez",
                "Senior Veteran Project Specialist",
                ServiceBranch::Army,
                true,
                &[CombatVeteranServices, AccessibilityCompliance, VaBenefitsCoordination],
                &["ADA Compliance Certified", "VA Benefits Coordinator", "PTSD Awareness Trained"],
                &["English", "Spanish"],
                "Combat veteran with 12 years of service, specializing in helping fellow veterans navigate construction projects and benefits coordination.",
            ),
            specialist(
                "spec002",
                "Sarah \"Chief\" Thompson",
                "Disabled Veteran Services Coordinator",
                ServiceBranch::Navy,
                false,
                &[DisabledVeteranServices, AccessibilityCompliance, SmartTechnology],
                &["Certified Rehabilitation Counselor", "Universal Design Specialist", "Smart Home Integration"],
                &["English"],
                "Navy veteran and certified rehabilitation counselor, dedicated to creating accessible living spaces for disabled veterans.",
            ),
            specialist(
                "spec003",
                "Michael \"Gunny\" Rodriguez",
                "Combat Veteran Liaison",
                ServiceBranch::Marines,
                true,
                &[CombatVeteranServices, SecuritySystems, EmergencyResponse],
                &["Security Systems Professional", "Combat Stress Awareness", "Crisis Intervention"],
                &["English", "Spanish"],
                "Marine Corps veteran with three combat deployments, now helping fellow warriors secure and fortify their homes.",
            ),
            specialist(
                "spec004",
                "Lisa \"Captain\" Johnson",
                "Air Force Technology Specialist",
                ServiceBranch::AirForce,
                false,
                &[SmartTechnology, EnergyEfficiency, VaBenefitsCoordination],
                &["Smart Home Technology Certified", "Energy Audit Professional", "Project Management Professional"],
                &["English"],
                "Air Force veteran with expertise in cutting-edge technology integration and energy-efficient construction solutions.",
            ),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Specialist> {
        self.specialists.iter().find(|specialist| specialist.id == id)
    }

    pub fn all(&self) -> &[Specialist] {
        &self.specialists
    }

    pub fn assign(&self, profile: &VeteranProfile) -> SpecialistAssignment {
        let primary = if profile.is_veteran { self.best_match(profile) } else { None };

        let Some(primary) = primary else {
            return SpecialistAssignment {
                assigned_specialist: general_coordinator(),
                backup_specialist: None,
                contact_info: ContactInfo {
                    phone: OFFICE_PHONE.to_string(),
                    email: OFFICE_EMAIL.to_string(),
                    direct_line: None,
                    emergency_contact: None,
                    preferred_method: ContactMethod::PhoneCall,
                },
                specializations: vec![Specialization::GeneralConstruction],
                availability: standard_availability(),
            };
        };

        let backup = self
            .specialists
            .iter()
            .find(|candidate| candidate.id != primary.id && candidate.shares_specialization(primary))
            .cloned();

        let emergency_contact = (profile.priority_level == PriorityLevel::Immediate)
            .then(|| OFFICE_PHONE.to_string());

        SpecialistAssignment {
            specializations: primary.specializations.clone(),
            assigned_specialist: primary.clone(),
            backup_specialist: backup,
            contact_info: ContactInfo {
                phone: OFFICE_PHONE.to_string(),
                email: OFFICE_EMAIL.to_string(),
                direct_line: Some(DIRECT_LINE.to_string()),
                emergency_contact,
                preferred_method: profile.preferred_contact_method,
            },
            availability: availability_for(profile.priority_level),
        }
    }

    /// Disabled with adaptive needs, then combat, then branch, then the first on the roster.
    fn best_match(&self, profile: &VeteranProfile) -> Option<&Specialist> {
        let mut candidates = self.specialists.iter();

        if profile.disabled_veteran && !profile.adaptive_needs.is_empty() {
            if let Some(found) = candidates
                .clone()
                .find(|s| s.has(Specialization::DisabledVeteranServices))
            {
                return Some(found);
            }
        }

        if profile.combat_veteran {
            if let Some(found) = candidates
                .clone()
                .find(|s| s.combat_veteran && s.has(Specialization::CombatVeteranServices))
            {
                return Some(found);
            }
        }

        if let Some(found) = candidates
            .clone()
            .find(|s| s.branch == profile.service_branch)
        {
            return Some(found);
        }

        candidates.next()
    }
}
