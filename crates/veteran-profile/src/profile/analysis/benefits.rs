use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::profile::domain::{PriorityLevel, ServiceBranch, VaBenefit};
use crate::text::contains_any;
use crate::vocabulary::Vocabulary;

const FAMILY_COMPENSATION_SUPPLEMENT: u32 = 150;
const FAMILY_SUPPLEMENT_MIN_RATING: u8 = 30;

/// Monthly compensation by rating band (2024 rates, USD).
const MONTHLY_COMPENSATION: [(u8, u32); 10] = [
    (10, 165),
    (20, 327),
    (30, 508),
    (40, 731),
    (50, 1041),
    (60, 1319),
    (70, 1663),
    (80, 1933),
    (90, 2172),
    (100, 3737),
];

/// Eligibility snapshot computed from service facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitEligibility {
    pub va_loan: bool,
    pub gi_bill: bool,
    pub healthcare: bool,
    pub priority_group: u8,
}

#[derive(Debug, Clone)]
pub struct BenefitCalculator {
    vocabulary: Arc<Vocabulary>,
}

impl BenefitCalculator {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn detect_va_benefits(&self, text: &str) -> Vec<VaBenefit> {
        self.vocabulary
            .va_benefits
            .iter()
            .filter(|trigger| contains_any(text, &trigger.terms))
            .map(|trigger| VaBenefit {
                benefit_type: trigger.kind,
                status: trigger.status,
                details: trigger.details.clone(),
            })
            .collect()
    }

    /// Program names in rule order, de-duplicated by first occurrence.
    pub fn eligible_programs(&self, text: &str, disabled: bool) -> Vec<String> {
        let mut programs: Vec<String> = Vec::new();
        for rule in &self.vocabulary.eligible_programs {
            if rule.applies(text, disabled) && !programs.contains(&rule.program) {
                programs.push(rule.program.clone());
            }
        }
        programs
    }

    /// IMMEDIATE exactly when disabled or combat; the rest of the ladder reads the text.
    pub fn priority_level(&self, text: &str, disabled: bool, combat: bool) -> PriorityLevel {
        if disabled || combat {
            PriorityLevel::Immediate
        } else if contains_any(text, &self.vocabulary.general_veteran_terms) {
            PriorityLevel::High
        } else if contains_any(text, &self.vocabulary.military_family_terms) {
            PriorityLevel::Family
        } else {
            PriorityLevel::Standard
        }
    }

    pub fn eligibility(
        &self,
        years_of_service: Option<u8>,
        branch: ServiceBranch,
        combat: bool,
    ) -> BenefitEligibility {
        let years = years_of_service.unwrap_or(0);
        BenefitEligibility {
            va_loan: years >= 2 || combat,
            gi_bill: years >= 3,
            healthcare: branch.is_known(),
            priority_group: if combat { 6 } else { 8 },
        }
    }
}

/// Estimated monthly VA compensation in whole dollars; `None` without a rating.
pub fn estimate_benefit_value(rating: Option<u8>, has_family: bool) -> Option<u32> {
    let rating = rating?;
    let base = MONTHLY_COMPENSATION
        .iter()
        .rev()
        .find(|(band, _)| rating >= *band)
        .map(|(_, amount)| *amount)?;

    if has_family && rating >= FAMILY_SUPPLEMENT_MIN_RATING {
        Some(base + FAMILY_COMPENSATION_SUPPLEMENT)
    } else {
        Some(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::ProgramRule;

    fn calculator() -> BenefitCalculator {
        BenefitCalculator::new(Arc::new(
            Vocabulary::standard().expect("embedded vocabulary parses"),
        ))
    }

    #[test]
    fn program_rules_come_from_the_vocabulary() {
        let mut vocabulary = Vocabulary::standard().expect("embedded vocabulary parses");
        vocabulary.eligible_programs.push(ProgramRule {
            program: "Adaptive Housing Grant".to_string(),
            requires_disabled: true,
            terms: vec!["ramp".to_string()],
        });
        let calculator = BenefitCalculator::new(Arc::new(vocabulary));

        assert_eq!(
            calculator.eligible_programs("need a ramp", true),
            vec![
                "Disabled Veteran Business",
                "Vocational Rehabilitation",
                "Adaptive Housing Grant"
            ]
        );
        assert!(calculator.eligible_programs("need a ramp", false).is_empty());
    }

    #[test]
    fn eligibility_follows_service_facts() {
        let calculator = calculator();

        let combat = calculator.eligibility(Some(1), ServiceBranch::Army, true);
        assert_eq!(
            combat,
            BenefitEligibility {
                va_loan: true,
                gi_bill: false,
                healthcare: true,
                priority_group: 6,
            }
        );

        let unknown = calculator.eligibility(None, ServiceBranch::Unknown, false);
        assert!(!unknown.va_loan && !unknown.gi_bill && !unknown.healthcare);
        assert_eq!(unknown.priority_group, 8);

        let career = calculator.eligibility(Some(20), ServiceBranch::Navy, false);
        assert!(career.va_loan && career.gi_bill);
    }

    #[test]
    fn compensation_table_lookup() {
        assert_eq!(estimate_benefit_value(None, true), None);
        assert_eq!(estimate_benefit_value(Some(10), false), Some(165));
        assert_eq!(estimate_benefit_value(Some(70), false), Some(1663));
        assert_eq!(estimate_benefit_value(Some(100), false), Some(3737));
        assert_eq!(estimate_benefit_value(Some(20), true), Some(327));
    }

    #[test]
    fn compensation_is_monotonic_and_family_adds_flat_supplement() {
        let mut previous = 0;
        for rating in (10..=100).step_by(10) {
            let value = estimate_benefit_value(Some(rating), false).expect("rated");
            assert!(value >= previous);
            previous = value;

            let with_family = estimate_benefit_value(Some(rating), true).expect("rated");
            if rating >= 30 {
                assert_eq!(with_family, value + 150);
            } else {
                assert_eq!(with_family, value);
            }
        }
    }
}
