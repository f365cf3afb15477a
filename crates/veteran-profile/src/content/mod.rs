//! Profile-driven content personalization.
//!
//! Every builder here is a pure function of a [`VeteranProfile`]; the engine
//! only carries the discount policy that pricing needs.

mod communication;
mod forms;
mod greeting;
mod messaging;
mod pricing;
mod recommendations;
mod testimonials;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DiscountPolicy;
use crate::profile::VeteranProfile;

pub use communication::{CommunicationGuidance, Terminology, Tone};
pub use forms::FormPrefill;
pub use messaging::Messaging;
pub use pricing::{
    DiscountKind, FinancingKind, FinancingOption, PersonalizedPricing, VeteranDiscount,
};
pub use recommendations::ProjectRecommendation;
pub use testimonials::Testimonial;

pub(crate) use communication::{branch_instruction, response_time, tone_for};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalizedContent {
    pub greeting: String,
    pub messaging: Messaging,
    pub recommendations: Vec<ProjectRecommendation>,
    pub pricing: PersonalizedPricing,
    pub testimonials: Vec<Testimonial>,
    pub forms: FormPrefill,
    pub communication: CommunicationGuidance,
}

/// The site pages that receive a slice of the personalized content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageContext {
    Homepage,
    Estimator,
    Contact,
    Projects,
    About,
}

impl PageContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageContext::Homepage => "homepage",
            PageContext::Estimator => "estimator",
            PageContext::Contact => "contact",
            PageContext::Projects => "projects",
            PageContext::About => "about",
        }
    }
}

impl fmt::Display for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page context `{0}`")]
pub struct UnknownPageContext(pub String);

impl FromStr for PageContext {
    type Err = UnknownPageContext;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "homepage" | "home" => Ok(PageContext::Homepage),
            "estimator" => Ok(PageContext::Estimator),
            "contact" => Ok(PageContext::Contact),
            "projects" => Ok(PageContext::Projects),
            "about" => Ok(PageContext::About),
            _ => Err(UnknownPageContext(value.to_string())),
        }
    }
}

/// The subset of [`PersonalizedContent`] a single page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextualContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messaging: Option<Messaging>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<ProjectRecommendation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PersonalizedPricing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testimonials: Option<Vec<Testimonial>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forms: Option<FormPrefill>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub communication: Option<CommunicationGuidance>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ContentPersonalizationEngine {
    policy: DiscountPolicy,
}

impl ContentPersonalizationEngine {
    pub fn new(policy: DiscountPolicy) -> Self {
        Self { policy }
    }

    pub fn generate(&self, profile: &VeteranProfile) -> PersonalizedContent {
        PersonalizedContent {
            greeting: greeting::greeting(profile),
            messaging: messaging::messaging(profile),
            recommendations: recommendations::recommendations(profile),
            pricing: pricing::pricing(profile, &self.policy),
            testimonials: testimonials::ranked_testimonials(profile),
            forms: forms::form_prefill(profile),
            communication: communication::communication(profile),
        }
    }

    pub fn contextualize(&self, profile: &VeteranProfile, context: PageContext) -> ContextualContent {
        let content = self.generate(profile);

        match context {
            PageContext::Homepage => ContextualContent {
                greeting: Some(content.greeting),
                messaging: Some(content.messaging),
                testimonials: Some(content.testimonials.into_iter().take(1).collect()),
                pricing: Some(content.pricing),
                ..ContextualContent::default()
            },
            PageContext::Estimator => ContextualContent {
                recommendations: Some(content.recommendations),
                forms: Some(content.forms),
                pricing: Some(content.pricing),
                ..ContextualContent::default()
            },
            PageContext::Contact => ContextualContent {
                greeting: Some(content.greeting),
                forms: Some(content.forms),
                communication: Some(content.communication),
                ..ContextualContent::default()
            },
            PageContext::Projects => ContextualContent {
                recommendations: Some(content.recommendations),
                testimonials: Some(content.testimonials),
                ..ContextualContent::default()
            },
            PageContext::About => ContextualContent {
                messaging: Some(content.messaging),
                testimonials: Some(content.testimonials),
                ..ContextualContent::default()
            },
        }
    }
}
