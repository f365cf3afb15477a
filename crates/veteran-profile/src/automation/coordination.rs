use serde::{Deserialize, Serialize};

use crate::profile::VeteranProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaProgram {
    #[serde(rename = "HISA")]
    Hisa,
    #[serde(rename = "SAH")]
    Sah,
    #[serde(rename = "SHA")]
    Sha,
    #[serde(rename = "VR&E")]
    VocationalRehabilitation,
    Healthcare,
}

/// A VA benefit the coordination team can help file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatedBenefit {
    #[serde(rename = "type")]
    pub program: VaProgram,
    pub name: String,
    pub description: String,
    pub eligibility: Vec<String>,
    pub max_benefit: String,
    pub application_process: Vec<String>,
    pub estimated_timeline: String,
    pub coordination_offered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantProgram {
    pub name: String,
    pub max_amount: u64,
    pub eligibility: Vec<String>,
    pub project_types: Vec<String>,
    pub processing_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanKind {
    #[serde(rename = "VA Home Loan")]
    VaHomeLoan,
    #[serde(rename = "VA Renovation Loan")]
    VaRenovationLoan,
    #[serde(rename = "Energy Efficient Mortgage")]
    EnergyEfficientMortgage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanProgram {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LoanKind,
    pub max_amount: u64,
    pub interest_rate: String,
    pub terms: Vec<String>,
    pub eligibility: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinationService {
    pub service: String,
    pub description: String,
    pub included: bool,
    pub specialist: String,
    pub timeline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationAssistance {
    pub provided: bool,
    pub services: Vec<String>,
    pub specialist: String,
    pub timeline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaBenefitCoordination {
    pub eligible_benefits: Vec<CoordinatedBenefit>,
    pub grant_programs: Vec<GrantProgram>,
    pub loan_programs: Vec<LoanProgram>,
    pub coordination_services: Vec<CoordinationService>,
    pub documentation: DocumentationAssistance,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn benefit(
    program: VaProgram,
    name: &str,
    description: &str,
    eligibility: &[&str],
    max_benefit: &str,
    application_process: &[&str],
    estimated_timeline: &str,
) -> CoordinatedBenefit {
    CoordinatedBenefit {
        program,
        name: name.to_string(),
        description: description.to_string(),
        eligibility: strings(eligibility),
        max_benefit: max_benefit.to_string(),
        application_process: strings(application_process),
        estimated_timeline: estimated_timeline.to_string(),
        coordination_offered: true,
    }
}

fn eligible_benefits(profile: &VeteranProfile) -> Vec<CoordinatedBenefit> {
    let mut benefits = vec![benefit(
        VaProgram::Healthcare,
        "VA Healthcare Benefits",
        "Comprehensive healthcare services through VA system",
        &["Veteran status", "Eligible discharge"],
        "Full healthcare coverage",
        &["VA Form 10-10EZ", "Medical evaluation", "Enrollment"],
        "30-60 days",
    )];

    if profile.disabled_veteran {
        benefits.push(benefit(
            VaProgram::Sah,
            "Specially Adapted Housing (SAH)",
            "Grant for home modifications for severely disabled veterans",
            &["50% or higher disability rating", "Specific qualifying disabilities"],
            "$101,754 (2024)",
            &["VA Form 26-4555", "Medical evaluation", "Home assessment"],
            "60-120 days",
        ));
        benefits.push(benefit(
            VaProgram::Sha,
            "Special Housing Adaptation (SHA)",
            "Grant for accessibility modifications",
            &["Qualifying disabilities", "Home ownership or rental"],
            "$20,387 (2024)",
            &["VA Form 26-4555", "Contractor estimates", "VA approval"],
            "45-90 days",
        ));
    }

    if profile.disabled_veteran || profile.combat_veteran {
        benefits.push(benefit(
            VaProgram::VocationalRehabilitation,
            "Vocational Rehabilitation & Employment",
            "Education and training benefits for employment preparation",
            &["Service-connected disability", "Employment handicap"],
            "Full tuition + living allowance",
            &["VA Form 28-1900", "Vocational assessment", "Plan development"],
            "60-90 days",
        ));
    }

    benefits
}

fn grant_programs(profile: &VeteranProfile) -> Vec<GrantProgram> {
    if !profile.disabled_veteran {
        return Vec::new();
    }
    vec![GrantProgram {
        name: "Home Improvements and Structural Alterations (HISA)".to_string(),
        max_amount: 6_800,
        eligibility: strings(&["Service-connected disability", "Medical necessity"]),
        project_types: strings(&[
            "Accessibility ramps",
            "Bathroom modifications",
            "Door widening",
        ]),
        processing_time: "30-60 days".to_string(),
    }]
}

fn loan_programs() -> Vec<LoanProgram> {
    vec![
        LoanProgram {
            name: "VA Home Loan".to_string(),
            kind: LoanKind::VaHomeLoan,
            // Varies by county; this is the advertised ceiling.
            max_amount: 1_000_000,
            interest_rate: "Competitive VA rates".to_string(),
            terms: strings(&["No down payment", "No PMI", "Competitive rates"]),
            eligibility: strings(&[
                "90+ days active duty",
                "Eligible discharge",
                "Credit requirements",
            ]),
        },
        LoanProgram {
            name: "VA Energy Efficient Mortgage".to_string(),
            kind: LoanKind::EnergyEfficientMortgage,
            max_amount: 6_000,
            interest_rate: "Standard VA rates".to_string(),
            terms: strings(&["Energy improvements funding", "Rolled into mortgage"]),
            eligibility: strings(&["VA loan eligibility", "Energy efficiency improvements"]),
        },
    ]
}

fn coordination_services(profile: &VeteranProfile) -> Vec<CoordinationService> {
    let service = |service: &str, description: &str, included: bool, specialist: &str, timeline: &str| {
        CoordinationService {
            service: service.to_string(),
            description: description.to_string(),
            included,
            specialist: specialist.to_string(),
            timeline: timeline.to_string(),
        }
    };

    vec![
        service(
            "Benefits Application Assistance",
            "Help with VA benefits applications and documentation",
            true,
            "Certified VA Benefits Coordinator",
            "Throughout project",
        ),
        service(
            "Medical Documentation Coordination",
            "Assistance obtaining required medical documentation",
            profile.disabled_veteran,
            "Medical Liaison Specialist",
            "1-2 weeks",
        ),
        service(
            "Grant Application Support",
            "Complete grant application process management",
            profile.disabled_veteran,
            "Grant Specialist",
            "2-4 weeks",
        ),
        service(
            "VA Inspector Coordination",
            "Scheduling and coordination with VA inspectors",
            true,
            "Project Coordinator",
            "As needed",
        ),
    ]
}

pub(crate) fn coordinate_benefits(profile: &VeteranProfile) -> VaBenefitCoordination {
    if !profile.is_veteran {
        return VaBenefitCoordination::default();
    }

    VaBenefitCoordination {
        eligible_benefits: eligible_benefits(profile),
        grant_programs: grant_programs(profile),
        loan_programs: loan_programs(),
        coordination_services: coordination_services(profile),
        documentation: DocumentationAssistance {
            provided: true,
            services: strings(&[
                "Document collection assistance",
                "Form completion help",
                "Medical records coordination",
                "VA communication liaison",
            ]),
            specialist: "VA Benefits Coordinator".to_string(),
            timeline: "1-2 weeks".to_string(),
        },
    }
}
