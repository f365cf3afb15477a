use serde::{Deserialize, Serialize};

use crate::config::DiscountPolicy;
use crate::profile::{PriorityLevel, VeteranProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Branch,
    Combat,
    Disabled,
    Era,
    Family,
}

/// One named component of the advertised discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VeteranDiscount {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    pub percentage: u8,
    pub description: String,
    pub requirements: Vec<String>,
    pub stackable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinancingKind {
    VaLoan,
    DisabledVeteran,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingOption {
    #[serde(rename = "type")]
    pub kind: FinancingKind,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub eligibility: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizedPricing {
    /// Total advertised percentage after the cap.
    pub base_discount: u8,
    pub additional_discounts: Vec<VeteranDiscount>,
    pub total_savings: String,
    pub special_offers: Vec<String>,
    pub financing_options: Vec<FinancingOption>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn standard_financing() -> FinancingOption {
    FinancingOption {
        kind: FinancingKind::Standard,
        title: "Standard Financing".to_string(),
        description: "Competitive rates and flexible terms".to_string(),
        benefits: strings(&["Competitive rates", "Flexible terms", "Quick approval"]),
        eligibility: strings(&["Good credit", "Stable income", "Property ownership"]),
    }
}

fn va_loan_financing() -> FinancingOption {
    FinancingOption {
        kind: FinancingKind::VaLoan,
        title: "VA Home Improvement Loan".to_string(),
        description: "Special financing options for veterans".to_string(),
        benefits: strings(&[
            "No down payment options",
            "Competitive rates",
            "Veteran-friendly terms",
        ]),
        eligibility: strings(&[
            "VA loan eligibility",
            "Certificate of eligibility",
            "Creditworthiness",
        ]),
    }
}

fn disabled_veteran_financing() -> FinancingOption {
    FinancingOption {
        kind: FinancingKind::DisabledVeteran,
        title: "Disabled Veteran Financing".to_string(),
        description: "Specialized financing for disabled veterans".to_string(),
        benefits: strings(&["Reduced rates", "Flexible terms", "Accessibility focused"]),
        eligibility: strings(&["VA disability rating", "Service-connected disability"]),
    }
}

pub(crate) fn pricing(profile: &VeteranProfile, policy: &DiscountPolicy) -> PersonalizedPricing {
    if !profile.is_veteran {
        return non_veteran_pricing(profile, policy);
    }

    let mut discounts = vec![VeteranDiscount {
        kind: DiscountKind::Branch,
        percentage: policy.base_percentage,
        description: format!(
            "{} Veteran Appreciation Discount",
            profile.service_branch.label()
        ),
        requirements: strings(&["Veteran status verification", "Military ID or DD-214"]),
        stackable: true,
    }];

    if profile.combat_veteran {
        discounts.push(VeteranDiscount {
            kind: DiscountKind::Combat,
            percentage: policy.combat_bonus,
            description: "Combat Veteran Honor Discount".to_string(),
            requirements: strings(&["Combat deployment verification"]),
            stackable: true,
        });
    }

    if profile.disabled_veteran {
        discounts.push(VeteranDiscount {
            kind: DiscountKind::Disabled,
            percentage: policy.disabled_bonus,
            description: "Disabled Veteran Service Discount".to_string(),
            requirements: strings(&["VA disability rating verification"]),
            stackable: true,
        });
    }

    if profile.service_era.is_post_911() {
        discounts.push(VeteranDiscount {
            kind: DiscountKind::Era,
            percentage: policy.era_bonus,
            description: "Post-9/11 Veteran Recognition Discount".to_string(),
            requirements: strings(&["Post-9/11 service verification"]),
            stackable: true,
        });
    }

    let total: u32 = discounts
        .iter()
        .map(|discount| u32::from(discount.percentage))
        .sum();
    let base_discount = total.min(u32::from(policy.max_percentage)) as u8;

    let mut financing_options = vec![va_loan_financing()];
    if profile.disabled_veteran {
        financing_options.push(disabled_veteran_financing());
    }

    let mut special_offers = Vec::new();
    if profile.priority_level == PriorityLevel::Immediate {
        special_offers.push("FREE accessibility consultation included".to_string());
        special_offers.push("Priority project scheduling".to_string());
    }
    if profile.combat_veteran {
        special_offers.push("FREE security assessment included".to_string());
    }
    special_offers.push("FREE initial consultation and estimate".to_string());
    special_offers.push("Veteran project specialist assigned".to_string());

    PersonalizedPricing {
        base_discount,
        additional_discounts: discounts,
        total_savings: format!("Up to {base_discount}% off total project cost"),
        special_offers,
        financing_options,
    }
}

/// Military families get one flat discount that does not combine with others.
fn non_veteran_pricing(profile: &VeteranProfile, policy: &DiscountPolicy) -> PersonalizedPricing {
    if !profile.is_military_family() {
        return PersonalizedPricing {
            base_discount: 0,
            additional_discounts: Vec::new(),
            total_savings: "Standard pricing applies".to_string(),
            special_offers: Vec::new(),
            financing_options: vec![standard_financing()],
        };
    }

    let percentage = policy.family_percentage.min(policy.max_percentage);
    PersonalizedPricing {
        base_discount: percentage,
        additional_discounts: vec![VeteranDiscount {
            kind: DiscountKind::Family,
            percentage,
            description: "Military Family Appreciation Discount".to_string(),
            requirements: strings(&["Military family member verification"]),
            stackable: false,
        }],
        total_savings: format!("{percentage}% off total project cost"),
        special_offers: vec!["FREE initial consultation and estimate".to_string()],
        financing_options: vec![standard_financing()],
    }
}
