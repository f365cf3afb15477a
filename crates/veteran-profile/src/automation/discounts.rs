use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::DiscountPolicy;
use crate::profile::{FamilyStatus, PriorityLevel, VeteranProfile};

/// A non-negative dollar amount held as whole cents.
///
/// Serialized as a dollar figure so API payloads read naturally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Negative, NaN and infinite inputs clamp to zero.
    pub fn from_dollars(dollars: f64) -> Self {
        if !dollars.is_finite() || dollars <= 0.0 {
            return Self::ZERO;
        }
        Self((dollars * 100.0).round() as u64)
    }

    pub fn whole_dollars(dollars: u64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// `percentage` percent of this amount, rounded down to the cent.
    pub fn percent(&self, percentage: u8) -> Money {
        Money((u128::from(self.0) * u128::from(percentage) / 100) as u64)
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.dollars())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Money::from_dollars)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomatedDiscountKind {
    Combat,
    Disabled,
    Branch,
    Era,
    Family,
    Emergency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationMethod {
    Manual,
    VaApi,
    Dd214,
    MilitaryId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountVerification {
    pub required: bool,
    pub documents: Vec<String>,
    pub method: VerificationMethod,
    pub status: VerificationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomatedDiscount {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AutomatedDiscountKind,
    pub name: String,
    pub percentage: u8,
    pub description: String,
    pub auto_applied: bool,
    pub requirements: Vec<String>,
    pub verification: DiscountVerification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_savings: Option<Money>,
    pub stackable: bool,
}

impl AutomatedDiscount {
    /// Records the outcome reported by the document verification workflow.
    pub fn record_verification(&mut self, status: VerificationStatus) {
        self.verification.status = status;
    }

    pub fn awaiting_verification(&self) -> bool {
        self.verification.required && self.verification.status == VerificationStatus::Pending
    }

    fn savings_on(&self, amount: Money, percentage: u8) -> Money {
        let savings = amount.percent(percentage);
        match self.max_savings {
            Some(cap) => savings.min(cap),
            None => savings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountApplication {
    pub original_amount: Money,
    pub discounted_amount: Money,
    pub applied_discounts: Vec<AutomatedDiscount>,
    pub total_savings: Money,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

struct DiscountSpec<'a> {
    id: &'a str,
    kind: AutomatedDiscountKind,
    name: String,
    percentage: u8,
    description: String,
    requirements: &'a [&'a str],
    documents: &'a [&'a str],
    method: VerificationMethod,
    verification_required: bool,
    max_savings: Option<Money>,
    stackable: bool,
}

impl DiscountSpec<'_> {
    fn build(self) -> AutomatedDiscount {
        AutomatedDiscount {
            id: self.id.to_string(),
            kind: self.kind,
            name: self.name,
            percentage: self.percentage,
            description: self.description,
            auto_applied: true,
            requirements: strings(self.requirements),
            verification: DiscountVerification {
                required: self.verification_required,
                documents: strings(self.documents),
                method: self.method,
                status: if self.verification_required {
                    VerificationStatus::Pending
                } else {
                    VerificationStatus::Verified
                },
            },
            max_savings: self.max_savings,
            stackable: self.stackable,
        }
    }
}

/// Disabled-veteran percentage climbs one point at 50% and again at 70%.
/// A missing rating is treated as 30%.
fn disabled_percentage(policy: &DiscountPolicy, rating: Option<u8>) -> u8 {
    let rating = rating.unwrap_or(30);
    let step = if rating >= 70 {
        2
    } else if rating >= 50 {
        1
    } else {
        0
    };
    policy.disabled_bonus.saturating_add(step)
}

pub(crate) fn calculate_discounts(
    profile: &VeteranProfile,
    policy: &DiscountPolicy,
) -> Vec<AutomatedDiscount> {
    let mut discounts = Vec::new();

    if !profile.is_veteran {
        if profile.family_status == FamilyStatus::MilitaryFamily {
            discounts.push(
                DiscountSpec {
                    id: "military_family",
                    kind: AutomatedDiscountKind::Family,
                    name: "Military Family Appreciation".to_string(),
                    percentage: policy.family_percentage,
                    description: "Supporting military families with dedicated pricing".to_string(),
                    requirements: &["Military family member verification"],
                    documents: &["Military spouse ID", "Dependent ID"],
                    method: VerificationMethod::MilitaryId,
                    verification_required: true,
                    max_savings: None,
                    stackable: false,
                }
                .build(),
            );
        }
        return discounts;
    }

    let branch = profile.service_branch.label();
    discounts.push(
        DiscountSpec {
            id: "veteran_base",
            kind: AutomatedDiscountKind::Branch,
            name: format!("{branch} Veteran Discount"),
            percentage: policy.base_percentage,
            description: format!("Honoring {branch} veterans with dedicated pricing"),
            requirements: &["Veteran status verification"],
            documents: &["DD-214", "Military ID", "Veteran ID card"],
            method: VerificationMethod::Dd214,
            verification_required: true,
            max_savings: None,
            stackable: true,
        }
        .build(),
    );

    if profile.combat_veteran {
        discounts.push(
            DiscountSpec {
                id: "combat_veteran",
                kind: AutomatedDiscountKind::Combat,
                name: "Combat Veteran Honor Discount".to_string(),
                percentage: policy.combat_bonus,
                description: "Additional savings for veterans who served in combat zones"
                    .to_string(),
                requirements: &["Combat deployment verification"],
                documents: &["DD-214 with combat designations", "Combat medals"],
                method: VerificationMethod::Dd214,
                verification_required: true,
                max_savings: None,
                stackable: true,
            }
            .build(),
        );
    }

    if profile.disabled_veteran {
        let percentage = disabled_percentage(policy, profile.disability_rating);
        discounts.push(
            DiscountSpec {
                id: "disabled_veteran",
                kind: AutomatedDiscountKind::Disabled,
                name: "Disabled Veteran Service Discount".to_string(),
                percentage,
                description: format!(
                    "Additional {percentage}% for veterans with service-connected disabilities"
                ),
                requirements: &["VA disability rating verification"],
                documents: &["VA disability letter", "VA ID card"],
                method: VerificationMethod::VaApi,
                verification_required: true,
                max_savings: None,
                stackable: true,
            }
            .build(),
        );
    }

    if profile.service_era.is_post_911() {
        discounts.push(
            DiscountSpec {
                id: "post_911",
                kind: AutomatedDiscountKind::Era,
                name: "Post-9/11 Veteran Recognition".to_string(),
                percentage: policy.era_bonus,
                description: "Recognizing Post-9/11 veterans with additional savings".to_string(),
                requirements: &["Post-9/11 service verification"],
                documents: &["DD-214 with service dates"],
                method: VerificationMethod::Dd214,
                verification_required: false,
                max_savings: None,
                stackable: true,
            }
            .build(),
        );
    }

    let has_accessibility_needs =
        !profile.adaptive_needs.is_empty() || !profile.accessibility_requirements.is_empty();
    if profile.priority_level == PriorityLevel::Immediate && has_accessibility_needs {
        discounts.push(
            DiscountSpec {
                id: "emergency_accessibility",
                kind: AutomatedDiscountKind::Emergency,
                name: "Emergency Accessibility Discount".to_string(),
                percentage: policy.emergency_percentage,
                description: "Emergency accessibility modifications for immediate needs"
                    .to_string(),
                requirements: &["Medical necessity documentation"],
                documents: &["VA medical recommendation", "Doctor prescription"],
                method: VerificationMethod::Manual,
                verification_required: true,
                max_savings: Some(Money::whole_dollars(policy.emergency_max_savings)),
                stackable: false,
            }
            .build(),
        );
    }

    discounts
}

/// Applies the best non-stackable discount if one exists, otherwise every
/// stackable discount with the summed percentage held at the policy maximum.
pub(crate) fn apply_discounts(
    amount: Money,
    discounts: &[AutomatedDiscount],
    policy: &DiscountPolicy,
) -> DiscountApplication {
    // Ties keep the earlier discount; an uncapped discount outranks a capped one.
    let rank = |discount: &AutomatedDiscount| {
        (
            discount.percentage,
            discount.max_savings.map_or(u64::MAX, |cap| cap.cents()),
        )
    };
    let best_exclusive = discounts
        .iter()
        .filter(|discount| !discount.stackable)
        .fold(None::<&AutomatedDiscount>, |best, current| match best {
            Some(best) if rank(best) >= rank(current) => Some(best),
            _ => Some(current),
        });

    let (savings, applied) = match best_exclusive {
        Some(discount) => (
            discount.savings_on(amount, discount.percentage),
            vec![discount.clone()],
        ),
        None => {
            let mut remaining = policy.max_percentage;
            let mut savings = Money::ZERO;
            let mut applied = Vec::new();
            for discount in discounts.iter().filter(|discount| discount.stackable) {
                let percentage = discount.percentage.min(remaining);
                remaining -= percentage;
                savings = Money(savings.0.saturating_add(discount.savings_on(amount, percentage).0));
                applied.push(discount.clone());
            }
            (savings, applied)
        }
    };

    let savings = savings.min(amount);
    DiscountApplication {
        original_amount: amount,
        discounted_amount: amount.saturating_sub(savings),
        applied_discounts: applied,
        total_savings: savings,
    }
}
