//! Personal-context and preference detectors layered on top of the analyzers.

use regex::Regex;

use crate::profile::domain::{
    BudgetRange, CommunicationStyle, ContactMethod, EmploymentStatus, FamilyStatus, FormData,
    HousingStatus, IncomeLevel, ProjectTimeline, RankCategory, RespectLevel,
    ACCESSIBILITY_COMPLIANCE, COST_EFFECTIVENESS, ENERGY_EFFICIENCY, SECURITY_FEATURES,
    SMART_HOME_TECHNOLOGY,
};
use crate::text::contains_any;

const MILITARY_TERMINOLOGY: [&str; 10] = [
    "mission",
    "objective",
    "tactical",
    "strategic",
    "operation",
    "deployment",
    "orders",
    "commander",
    "sir",
    "ma'am",
];

#[derive(Debug, Clone)]
pub struct ContextDetector {
    thousands: Regex,
    comma_amount: Regex,
    under_amount: Regex,
    over_amount: Regex,
}

impl ContextDetector {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            thousands: Regex::new(r"\$?(\d+)\s*k\b")?,
            comma_amount: Regex::new(r"\$?(\d{1,3}),(\d{3})\b|\$(\d{4,7})\b")?,
            under_amount: Regex::new(r"under\s*\$?(\d+)")?,
            over_amount: Regex::new(r"over\s*\$?(\d+)")?,
        })
    }

    pub fn family_status(&self, text: &str) -> FamilyStatus {
        if contains_any(text, &["gold star", "fallen"]) {
            FamilyStatus::GoldStarFamily
        } else if contains_any(text, &["military family", "spouse"]) {
            FamilyStatus::MilitaryFamily
        } else if contains_any(text, &["married", "wife", "husband"]) {
            FamilyStatus::Married
        } else {
            FamilyStatus::SingleVeteran
        }
    }

    pub fn employment_status(&self, text: &str) -> EmploymentStatus {
        if contains_any(text, &["retired military", "military retirement"]) {
            EmploymentStatus::RetiredMilitary
        } else if contains_any(text, &["disabled retired", "medical retirement"]) {
            EmploymentStatus::DisabledRetired
        } else if contains_any(text, &["gi bill", "student"]) {
            EmploymentStatus::Student
        } else {
            EmploymentStatus::EmployedFullTime
        }
    }

    pub fn housing_status(&self, text: &str) -> HousingStatus {
        if text.contains("va loan") {
            HousingStatus::VaHomeLoan
        } else if contains_any(text, &["base housing", "military housing"]) {
            HousingStatus::MilitaryHousing
        } else if contains_any(text, &["homeless", "transitional"]) {
            HousingStatus::HomelessVeteran
        } else {
            HousingStatus::Homeowner
        }
    }

    pub fn income_level(&self, text: &str) -> Option<IncomeLevel> {
        if contains_any(text, &["va compensation only", "disability only"]) {
            Some(IncomeLevel::VaCompensationOnly)
        } else if contains_any(text, &["low income", "financial hardship"]) {
            Some(IncomeLevel::LowIncome)
        } else {
            None
        }
    }

    pub fn construction_priorities(
        &self,
        text: &str,
        disabled: bool,
        form: Option<&FormData>,
    ) -> Vec<String> {
        let rules: [(bool, &str); 5] = [
            (disabled || text.contains("accessibility"), ACCESSIBILITY_COMPLIANCE),
            (contains_any(text, &["security", "safe"]), SECURITY_FEATURES),
            (contains_any(text, &["energy", "efficient"]), ENERGY_EFFICIENCY),
            (
                contains_any(text, &["smart home", "technology"]),
                SMART_HOME_TECHNOLOGY,
            ),
            (contains_any(text, &["budget", "cost"]), COST_EFFECTIVENESS),
        ];

        let mut priorities: Vec<String> = rules
            .into_iter()
            .filter(|(applies, _)| *applies)
            .map(|(_, priority)| priority.to_string())
            .collect();

        if let Some(project) = form.and_then(|form| form.project_type.as_deref()) {
            push_unique(&mut priorities, project.trim());
        }
        priorities
    }

    pub fn accessibility_requirements(&self, text: &str) -> Vec<String> {
        let mut requirements = Vec::new();
        if text.contains("wheelchair") {
            for item in ["Wheelchair Access", "Wider Doorways", "Ramps"] {
                push_unique(&mut requirements, item);
            }
        }
        if contains_any(text, &["mobility", "walking"]) {
            for item in ["Grab Bars", "Ramps"] {
                push_unique(&mut requirements, item);
            }
        }
        if contains_any(text, &["vision", "blind"]) {
            push_unique(&mut requirements, "Visual Aids");
        }
        if contains_any(text, &["hearing", "deaf"]) {
            push_unique(&mut requirements, "Hearing Assistance");
        }
        requirements
    }

    pub fn preferred_timeline(&self, text: &str, form: Option<&FormData>) -> ProjectTimeline {
        if let Some(raw) = form.and_then(|form| form.timeline.as_deref()) {
            if let Some(timeline) = ProjectTimeline::from_label(raw) {
                return timeline;
            }
            if let Some(timeline) = timeline_from_keywords(&raw.to_lowercase()) {
                return timeline;
            }
        }
        timeline_from_keywords(text).unwrap_or(ProjectTimeline::Standard)
    }

    pub fn budget_range(&self, text: &str, form: Option<&FormData>) -> Option<BudgetRange> {
        if let Some(raw) = form.and_then(|form| form.budget_range.as_deref()) {
            if let Some(range) = BudgetRange::from_label(raw) {
                return Some(range);
            }
            if let Some(amount) = self.budget_amount(&raw.to_lowercase()) {
                return Some(BudgetRange::for_amount(amount));
            }
        }
        self.budget_amount(text).map(BudgetRange::for_amount)
    }

    fn budget_amount(&self, text: &str) -> Option<u64> {
        if let Some(captures) = self.thousands.captures(text) {
            let thousands = parse_number(captures.get(1)?.as_str())?;
            return Some(thousands.saturating_mul(1_000));
        }
        if let Some(captures) = self.comma_amount.captures(text) {
            if let (Some(high), Some(low)) = (captures.get(1), captures.get(2)) {
                let high = parse_number(high.as_str())?;
                let low = parse_number(low.as_str())?;
                return Some(high.saturating_mul(1_000).saturating_add(low));
            }
            if let Some(whole) = captures.get(3) {
                return parse_number(whole.as_str());
            }
        }
        for pattern in [&self.under_amount, &self.over_amount] {
            if let Some(captures) = pattern.captures(text) {
                return parse_number(captures.get(1)?.as_str());
            }
        }
        None
    }

    pub fn communication_style(&self, text: &str, rank: RankCategory) -> CommunicationStyle {
        if text.contains("formal") || rank == RankCategory::Officer {
            CommunicationStyle::ProfessionalFormal
        } else if contains_any(text, &["direct", "straight"]) {
            CommunicationStyle::MilitaryDirect
        } else if contains_any(text, &["detailed", "thorough"]) {
            CommunicationStyle::RespectfulDetailed
        } else {
            CommunicationStyle::CasualFriendly
        }
    }

    pub fn contact_method(&self, text: &str, form: Option<&FormData>) -> ContactMethod {
        let preferred = form
            .and_then(|form| form.preferred_contact.as_deref())
            .map(str::to_lowercase);
        if let Some(method) = preferred.as_deref().and_then(contact_from_keywords) {
            return method;
        }
        contact_from_keywords(text).unwrap_or(ContactMethod::PhoneCall)
    }

    pub fn uses_military_terminology(&self, text: &str) -> bool {
        contains_any(text, &MILITARY_TERMINOLOGY)
    }

    pub fn respect_level(&self, text: &str, combat: bool) -> RespectLevel {
        if contains_any(text, &["medal of honor", "distinguished service"]) {
            RespectLevel::HighHonors
        } else if combat || text.contains("purple heart") {
            RespectLevel::CombatValor
        } else if contains_any(text, &["family", "spouse"]) {
            RespectLevel::FamilyRespect
        } else {
            RespectLevel::ServiceHonor
        }
    }
}

fn timeline_from_keywords(text: &str) -> Option<ProjectTimeline> {
    if contains_any(text, &["emergency", "urgent"]) {
        Some(ProjectTimeline::Immediate)
    } else if contains_any(text, &["soon", "quickly"]) {
        Some(ProjectTimeline::Urgent)
    } else if contains_any(text, &["planned", "future"]) {
        Some(ProjectTimeline::Planned)
    } else {
        None
    }
}

fn contact_from_keywords(text: &str) -> Option<ContactMethod> {
    if contains_any(text, &["call", "phone"]) {
        Some(ContactMethod::PhoneCall)
    } else if text.contains("email") {
        Some(ContactMethod::Email)
    } else if contains_any(text, &["text", "message"]) {
        Some(ContactMethod::TextMessage)
    } else {
        None
    }
}

/// Digit runs too long for u64 saturate rather than vanish.
fn parse_number(raw: &str) -> Option<u64> {
    match raw.parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) if !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit()) => {
            Some(u64::MAX)
        }
        Err(_) => None,
    }
}

fn push_unique(items: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !items.iter().any(|existing| existing == value) {
        items.push(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ContextDetector {
        ContextDetector::new().expect("patterns compile")
    }

    #[test]
    fn budget_patterns_bucket_amounts() {
        let detector = detector();
        assert_eq!(
            detector.budget_range("budget around $40k", None),
            Some(BudgetRange::From25KTo50K)
        );
        assert_eq!(
            detector.budget_range("we can spend $75,000", None),
            Some(BudgetRange::From50KTo100K)
        );
        assert_eq!(
            detector.budget_range("keep it under $9000", None),
            Some(BudgetRange::Under10K)
        );
        assert_eq!(detector.budget_range("no numbers here", None), None);
    }

    #[test]
    fn form_budget_label_overrides_text() {
        let form = FormData {
            budget_range: Some("$100K-$250K".to_string()),
            ..FormData::default()
        };
        assert_eq!(
            detector().budget_range("about $5k", Some(&form)),
            Some(BudgetRange::From100KTo250K)
        );
    }

    #[test]
    fn timeline_ladder() {
        let detector = detector();
        assert_eq!(
            detector.preferred_timeline("this is an emergency", None),
            ProjectTimeline::Immediate
        );
        assert_eq!(
            detector.preferred_timeline("need it done soon", None),
            ProjectTimeline::Urgent
        );
        assert_eq!(
            detector.preferred_timeline("planned for next year", None),
            ProjectTimeline::Planned
        );
        assert_eq!(detector.preferred_timeline("", None), ProjectTimeline::Standard);
    }

    #[test]
    fn accessibility_requirements_are_unique() {
        let requirements =
            detector().accessibility_requirements("wheelchair user with mobility limits");
        assert_eq!(
            requirements,
            vec!["Wheelchair Access", "Wider Doorways", "Ramps", "Grab Bars"]
        );
    }

    #[test]
    fn project_type_from_form_extends_priorities() {
        let form = FormData {
            project_type: Some("Kitchen Remodel".to_string()),
            ..FormData::default()
        };
        let priorities = detector().construction_priorities("energy savings", false, Some(&form));
        assert_eq!(priorities, vec![ENERGY_EFFICIENCY, "Kitchen Remodel"]);
    }
}
