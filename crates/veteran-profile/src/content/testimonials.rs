use serde::{Deserialize, Serialize};

use crate::profile::{ServiceBranch, VeteranProfile};

const TOP_TESTIMONIALS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    pub branch: ServiceBranch,
    pub location: String,
    pub project: String,
    pub quote: String,
    pub verified: bool,
    pub relevance_score: u8,
}

fn pool() -> Vec<Testimonial> {
    let entry = |name: &str, branch, location: &str, project: &str, quote: &str| Testimonial {
        name: name.to_string(),
        branch,
        location: location.to_string(),
        project: project.to_string(),
        quote: quote.to_string(),
        verified: true,
        relevance_score: 0,
    };

    vec![
        entry(
            "MSgt John Rodriguez (Ret.)",
            ServiceBranch::AirForce,
            "San Antonio, TX",
            "Kitchen Remodel",
            "MH Construction understood our military precision standards. They delivered on time, on budget, and exceeded our expectations. The accessibility features they added for my service-connected injuries were perfectly executed.",
        ),
        entry(
            "Capt. Sarah Mitchell (Army)",
            ServiceBranch::Army,
            "Austin, TX",
            "Home Addition",
            "As an active duty soldier, I needed a contractor who could work around my deployment schedule. MH Construction's military background made all the difference. They coordinated everything perfectly.",
        ),
        entry(
            "Petty Officer Mike Chen (Navy)",
            ServiceBranch::Navy,
            "Houston, TX",
            "Bathroom Renovation",
            "The team at MH Construction speaks our language. They understood my needs as a disabled veteran and created a fully accessible bathroom that maintains the aesthetic I wanted. Outstanding work!",
        ),
        entry(
            "Gunnery Sgt. Maria Lopez (USMC)",
            ServiceBranch::Marines,
            "Dallas, TX",
            "Custom Home",
            "Semper Fi excellence! MH Construction built our dream home with the same attention to detail and commitment to quality that we expect in the Corps. Highly recommend to fellow Marines.",
        ),
        entry(
            "Coast Guard Vet Tom Williams",
            ServiceBranch::CoastGuard,
            "Galveston, TX",
            "Commercial Renovation",
            "MH Construction helped convert our space into a veteran-owned business location. Their understanding of veteran needs and professional execution made the process seamless.",
        ),
    ]
}

fn relevance(testimonial: &Testimonial, profile: &VeteranProfile) -> u8 {
    let quote = testimonial.quote.to_lowercase();
    let mut score = 0;

    if testimonial.branch == profile.service_branch {
        score += 30;
    }
    if profile.disabled_veteran && quote.contains("disab") {
        score += 25;
    }
    if profile.combat_veteran && quote.contains("combat") {
        score += 20;
    }
    if profile.has_accessibility_priority() && quote.contains("accessibility") {
        score += 20;
    }
    if testimonial.location.contains("TX") {
        score += 10;
    }
    score
}

/// Top three testimonials by relevance; ties keep pool order.
pub(crate) fn ranked_testimonials(profile: &VeteranProfile) -> Vec<Testimonial> {
    let mut scored: Vec<Testimonial> = pool()
        .into_iter()
        .map(|mut testimonial| {
            testimonial.relevance_score = relevance(&testimonial, profile);
            testimonial
        })
        .collect();

    scored.sort_by(|left, right| right.relevance_score.cmp(&left.relevance_score));
    scored.truncate(TOP_TESTIMONIALS);
    scored
}
