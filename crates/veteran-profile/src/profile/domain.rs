use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(pub String);

impl std::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ServiceBranch {
    Army,
    Navy,
    Marines,
    #[serde(rename = "Air Force")]
    AirForce,
    #[serde(rename = "Coast Guard")]
    CoastGuard,
    #[serde(rename = "Space Force")]
    SpaceForce,
    Unknown,
}

impl ServiceBranch {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceBranch::Army => "Army",
            ServiceBranch::Navy => "Navy",
            ServiceBranch::Marines => "Marines",
            ServiceBranch::AirForce => "Air Force",
            ServiceBranch::CoastGuard => "Coast Guard",
            ServiceBranch::SpaceForce => "Space Force",
            ServiceBranch::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ServiceBranch::Unknown)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceEra {
    #[serde(rename = "GWOT (2001-Present)")]
    Gwot,
    #[serde(rename = "Post-9/11")]
    Post911,
    #[serde(rename = "Gulf War (1990-1991)")]
    GulfWar,
    #[serde(rename = "Cold War Era (1945-1991)")]
    ColdWar,
    #[serde(rename = "Vietnam Era (1964-1975)")]
    Vietnam,
    #[serde(rename = "Korean War (1950-1953)")]
    Korea,
    #[serde(rename = "WWII (1941-1945)")]
    Wwii,
    #[serde(rename = "Multiple Eras")]
    Multiple,
    Unknown,
}

impl ServiceEra {
    pub fn label(&self) -> &'static str {
        match self {
            ServiceEra::Gwot => "GWOT (2001-Present)",
            ServiceEra::Post911 => "Post-9/11",
            ServiceEra::GulfWar => "Gulf War (1990-1991)",
            ServiceEra::ColdWar => "Cold War Era (1945-1991)",
            ServiceEra::Vietnam => "Vietnam Era (1964-1975)",
            ServiceEra::Korea => "Korean War (1950-1953)",
            ServiceEra::Wwii => "WWII (1941-1945)",
            ServiceEra::Multiple => "Multiple Eras",
            ServiceEra::Unknown => "Unknown",
        }
    }

    /// Eras covered by the post-9/11 era discount.
    pub fn is_post_911(&self) -> bool {
        matches!(self, ServiceEra::Gwot | ServiceEra::Post911)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankCategory {
    Officer,
    #[serde(rename = "Warrant Officer")]
    WarrantOfficer,
    #[serde(rename = "Senior NCO")]
    SeniorNco,
    #[serde(rename = "NCO")]
    Nco,
    Enlisted,
    Unknown,
}

impl RankCategory {
    pub fn label(&self) -> &'static str {
        match self {
            RankCategory::Officer => "Officer",
            RankCategory::WarrantOfficer => "Warrant Officer",
            RankCategory::SeniorNco => "Senior NCO",
            RankCategory::Nco => "NCO",
            RankCategory::Enlisted => "Enlisted",
            RankCategory::Unknown => "Unknown",
        }
    }
}

/// A deployment entry. Dates are era-representative placeholders for the theater.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    pub theater: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub branch: ServiceBranch,
    pub combat_role: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdaptiveNeedKind {
    Mobility,
    Visual,
    Hearing,
    Cognitive,
    Medical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptiveNeed {
    #[serde(rename = "type")]
    pub kind: AdaptiveNeedKind,
    pub severity: Severity,
    pub accommodations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitType {
    Housing,
    Education,
    Healthcare,
    Disability,
    Employment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitStatus {
    Active,
    Eligible,
    Pending,
}

/// A VA benefit referenced in the customer's own words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaBenefit {
    #[serde(rename = "type")]
    pub benefit_type: BenefitType,
    pub status: BenefitStatus,
    pub details: String,
}

/// Internal urgency tier controlling response time, escalation, and specialist assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityLevel {
    Immediate,
    High,
    Family,
    Standard,
}

impl PriorityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            PriorityLevel::Immediate => "IMMEDIATE",
            PriorityLevel::High => "HIGH",
            PriorityLevel::Family => "FAMILY",
            PriorityLevel::Standard => "STANDARD",
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, PriorityLevel::Immediate | PriorityLevel::High)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyStatus {
    #[serde(rename = "Single Veteran")]
    SingleVeteran,
    Married,
    #[serde(rename = "Military Family")]
    MilitaryFamily,
    #[serde(rename = "Gold Star Family")]
    GoldStarFamily,
}

impl FamilyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FamilyStatus::SingleVeteran => "Single Veteran",
            FamilyStatus::Married => "Married",
            FamilyStatus::MilitaryFamily => "Military Family",
            FamilyStatus::GoldStarFamily => "Gold Star Family",
        }
    }

    pub fn has_family(&self) -> bool {
        !matches!(self, FamilyStatus::SingleVeteran)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    #[serde(rename = "Employed Full-Time")]
    EmployedFullTime,
    #[serde(rename = "Retired Military")]
    RetiredMilitary,
    #[serde(rename = "Disabled Retired")]
    DisabledRetired,
    #[serde(rename = "Student (GI Bill)")]
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HousingStatus {
    Homeowner,
    #[serde(rename = "VA Home Loan")]
    VaHomeLoan,
    #[serde(rename = "Military Housing")]
    MilitaryHousing,
    #[serde(rename = "Homeless Veteran")]
    HomelessVeteran,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeLevel {
    #[serde(rename = "VA Compensation Only")]
    VaCompensationOnly,
    #[serde(rename = "Low Income")]
    LowIncome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectTimeline {
    #[serde(rename = "Immediate (Emergency)")]
    Immediate,
    #[serde(rename = "Urgent (1-3 months)")]
    Urgent,
    #[serde(rename = "Standard (3-6 months)")]
    Standard,
    #[serde(rename = "Planned (6-12 months)")]
    Planned,
}

impl ProjectTimeline {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectTimeline::Immediate => "Immediate (Emergency)",
            ProjectTimeline::Urgent => "Urgent (1-3 months)",
            ProjectTimeline::Standard => "Standard (3-6 months)",
            ProjectTimeline::Planned => "Planned (6-12 months)",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        [
            ProjectTimeline::Immediate,
            ProjectTimeline::Urgent,
            ProjectTimeline::Standard,
            ProjectTimeline::Planned,
        ]
        .into_iter()
        .find(|timeline| timeline.label().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "Under $10K")]
    Under10K,
    #[serde(rename = "$10K-$25K")]
    From10KTo25K,
    #[serde(rename = "$25K-$50K")]
    From25KTo50K,
    #[serde(rename = "$50K-$100K")]
    From50KTo100K,
    #[serde(rename = "$100K-$250K")]
    From100KTo250K,
    #[serde(rename = "$250K+")]
    Over250K,
}

impl BudgetRange {
    pub fn label(&self) -> &'static str {
        match self {
            BudgetRange::Under10K => "Under $10K",
            BudgetRange::From10KTo25K => "$10K-$25K",
            BudgetRange::From25KTo50K => "$25K-$50K",
            BudgetRange::From50KTo100K => "$50K-$100K",
            BudgetRange::From100KTo250K => "$100K-$250K",
            BudgetRange::Over250K => "$250K+",
        }
    }

    pub fn for_amount(amount: u64) -> Self {
        match amount {
            0..=9_999 => BudgetRange::Under10K,
            10_000..=24_999 => BudgetRange::From10KTo25K,
            25_000..=49_999 => BudgetRange::From25KTo50K,
            50_000..=99_999 => BudgetRange::From50KTo100K,
            100_000..=249_999 => BudgetRange::From100KTo250K,
            _ => BudgetRange::Over250K,
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        [
            BudgetRange::Under10K,
            BudgetRange::From10KTo25K,
            BudgetRange::From25KTo50K,
            BudgetRange::From50KTo100K,
            BudgetRange::From100KTo250K,
            BudgetRange::Over250K,
        ]
        .into_iter()
        .find(|range| range.label().eq_ignore_ascii_case(value.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommunicationStyle {
    #[serde(rename = "Professional Formal")]
    ProfessionalFormal,
    #[serde(rename = "Military Direct")]
    MilitaryDirect,
    #[serde(rename = "Respectful Detailed")]
    RespectfulDetailed,
    #[serde(rename = "Casual Friendly")]
    CasualFriendly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactMethod {
    #[serde(rename = "Phone Call")]
    PhoneCall,
    Email,
    #[serde(rename = "Text Message")]
    TextMessage,
}

impl ContactMethod {
    pub fn label(&self) -> &'static str {
        match self {
            ContactMethod::PhoneCall => "Phone Call",
            ContactMethod::Email => "Email",
            ContactMethod::TextMessage => "Text Message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespectLevel {
    #[serde(rename = "High Honors")]
    HighHonors,
    #[serde(rename = "Combat Valor")]
    CombatValor,
    #[serde(rename = "Family Respect")]
    FamilyRespect,
    #[serde(rename = "Service Honor")]
    ServiceHonor,
}

pub const ACCESSIBILITY_COMPLIANCE: &str = "Accessibility Compliance";
pub const SECURITY_FEATURES: &str = "Security Features";
pub const ENERGY_EFFICIENCY: &str = "Energy Efficiency";
pub const SMART_HOME_TECHNOLOGY: &str = "Smart Home Technology";
pub const COST_EFFECTIVENESS: &str = "Cost Effectiveness";

/// The canonical classification result for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VeteranProfile {
    pub id: ProfileId,
    pub last_updated: DateTime<Utc>,

    pub is_veteran: bool,
    pub confidence: u8,

    pub service_branch: ServiceBranch,
    pub secondary_branches: Vec<ServiceBranch>,
    pub service_era: ServiceEra,
    pub rank_category: RankCategory,
    pub specific_rank: Option<String>,
    pub years_of_service: Option<u8>,

    pub combat_veteran: bool,
    pub deployment_history: Vec<DeploymentRecord>,
    pub combat_theaters: Vec<String>,
    pub multiple_deployments: bool,

    pub disabled_veteran: bool,
    pub disability_rating: Option<u8>,
    pub service_connected_conditions: Vec<String>,
    pub adaptive_needs: Vec<AdaptiveNeed>,

    pub va_benefits: Vec<VaBenefit>,
    pub eligible_programs: Vec<String>,
    pub priority_level: PriorityLevel,

    pub family_status: FamilyStatus,
    pub employment_status: EmploymentStatus,
    pub housing_status: HousingStatus,
    pub income_level: Option<IncomeLevel>,

    pub construction_priorities: Vec<String>,
    pub accessibility_requirements: Vec<String>,
    pub preferred_timeline: ProjectTimeline,
    pub budget_range: Option<BudgetRange>,

    pub communication_style: CommunicationStyle,
    pub preferred_contact_method: ContactMethod,
    pub military_terminology: bool,
    pub respect_level: RespectLevel,
}

impl VeteranProfile {
    pub fn has_accessibility_priority(&self) -> bool {
        self.construction_priorities
            .iter()
            .any(|priority| priority == ACCESSIBILITY_COMPLIANCE)
    }

    pub fn is_military_family(&self) -> bool {
        matches!(
            self.family_status,
            FamilyStatus::MilitaryFamily | FamilyStatus::GoldStarFamily
        )
    }

    pub fn has_adaptive_need(&self, kind: AdaptiveNeedKind) -> bool {
        self.adaptive_needs.iter().any(|need| need.kind == kind)
    }

    /// Apply a partial update; the caller refreshes `last_updated`.
    pub(crate) fn merge(&mut self, update: ProfileUpdate) {
        if let Some(budget) = update.budget_range {
            self.budget_range = Some(budget);
        }
        if let Some(timeline) = update.preferred_timeline {
            self.preferred_timeline = timeline;
        }
        if let Some(method) = update.preferred_contact_method {
            self.preferred_contact_method = method;
        }
        if let Some(style) = update.communication_style {
            self.communication_style = style;
        }
        for priority in update.construction_priorities {
            if !self.construction_priorities.contains(&priority) {
                self.construction_priorities.push(priority);
            }
        }
        for requirement in update.accessibility_requirements {
            if !self.accessibility_requirements.contains(&requirement) {
                self.accessibility_requirements.push(requirement);
            }
        }
    }
}

/// Fields that may change after a profile has been classified.
///
/// Classification facts (status, branch, combat, disability, priority) are not
/// updatable; they only change by re-running classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub budget_range: Option<BudgetRange>,
    #[serde(default)]
    pub preferred_timeline: Option<ProjectTimeline>,
    #[serde(default)]
    pub preferred_contact_method: Option<ContactMethod>,
    #[serde(default)]
    pub communication_style: Option<CommunicationStyle>,
    #[serde(default)]
    pub construction_priorities: Vec<String>,
    #[serde(default)]
    pub accessibility_requirements: Vec<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &ProfileUpdate::default()
    }
}

/// Structured form fields supplied alongside free text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormData {
    #[serde(default)]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub project_type: Option<String>,
    #[serde(default)]
    pub preferred_contact: Option<String>,
    #[serde(default, flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Caller identity supplied by the session layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub user_id: Option<String>,
}
