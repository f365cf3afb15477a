use crate::profile::{RespectLevel, ServiceBranch, VeteranProfile};

fn branch_opener(branch: ServiceBranch) -> &'static str {
    match branch {
        ServiceBranch::Army => "HOOAH! Welcome, Soldier!",
        ServiceBranch::Navy => "Anchors Aweigh! Welcome, Sailor!",
        ServiceBranch::Marines => "Semper Fi! Welcome, Marine!",
        ServiceBranch::AirForce => "Aim High! Welcome, Airman!",
        ServiceBranch::CoastGuard => "Semper Paratus! Welcome, Coastie!",
        ServiceBranch::SpaceForce => "Semper Supra! Welcome, Guardian!",
        ServiceBranch::Unknown => "Welcome, Veteran!",
    }
}

pub(crate) fn greeting(profile: &VeteranProfile) -> String {
    if !profile.is_veteran {
        return if profile.is_military_family() {
            "Welcome, Military Family! We're honored to serve those who serve.".to_string()
        } else {
            "Welcome to MH Construction!".to_string()
        };
    }

    let opener = branch_opener(profile.service_branch);
    let thanks = match profile.respect_level {
        RespectLevel::HighHonors => "Thank you for your extraordinary service and sacrifice.",
        RespectLevel::CombatValor => "Thank you for your combat service and valor.",
        _ if profile.combat_veteran => "Thank you for your service in harm's way.",
        _ => "Thank you for your service!",
    };
    format!("{opener} {thanks}")
}
