use crate::infra::{build_system, parse_amount, InMemorySystem};
use clap::Args;
use std::path::PathBuf;
use veteran_profile::automation::{Money, VeteranBenefitsPackage};
use veteran_profile::config::AppConfig;
use veteran_profile::content::PageContext;
use veteran_profile::error::AppError;
use veteran_profile::intake::CsvIntake;
use veteran_profile::personalization::{
    DiscountRequest, ExperienceRequest, FormSubmission, FormType, SpecialistRequest, Urgency,
};
use veteran_profile::profile::{BenefitEligibility, FormData, VeteranProfile};

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Free-form inquiry text to classify
    #[arg(long)]
    pub(crate) text: String,
    /// Optional project estimate (USD) to price with the profile's discounts
    #[arg(long, value_parser = crate::infra::parse_amount)]
    pub(crate) amount: Option<Money>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// CSV file with columns id,text,budget,timeline,project_type
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

fn load_system() -> Result<InMemorySystem, AppError> {
    let config = AppConfig::load()?;
    build_system(&config.personalization)
}

pub(crate) fn run_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let AnalyzeArgs { text, amount } = args;
    let system = load_system()?;

    let profile = system
        .profiles()
        .analyze_and_create_profile(&text, None, None);
    let package = system.benefits().package(&profile);
    render_profile(&profile);
    if profile.is_veteran {
        println!(
            "- {}",
            eligibility_line(&system.profiles().benefit_eligibility(&profile))
        );
    }
    render_package(&package);

    if let Some(amount) = amount {
        let application = system.benefits().apply_discounts(&profile, amount);
        println!(
            "\nEstimate {} -> {} (saves {})",
            application.original_amount, application.discounted_amount, application.total_savings
        );
    }

    Ok(())
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let system = load_system()?;
    let report = CsvIntake::from_path(&args.csv, system.profiles())?;

    println!(
        "Imported {} profile(s) from {}",
        report.profiles.len(),
        args.csv.display()
    );
    for profile in &report.profiles {
        println!("- {}", summary_line(profile));
    }
    if !report.skipped_rows.is_empty() {
        let rows: Vec<String> = report.skipped_rows.iter().map(usize::to_string).collect();
        println!("Skipped rows without text: {}", rows.join(", "));
    }

    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let system = load_system()?;
    let session_id = "demo-session";

    println!("Veteran personalization demo");
    let experience = system.initialize_veteran_experience(ExperienceRequest {
        text: "I am an Army combat veteran with a 70% disability rating. I use a wheelchair and need \
               an accessible bathroom soon."
            .to_string(),
        session_id: Some(session_id.to_string()),
        ..ExperienceRequest::default()
    })?;

    render_profile(&experience.profile);
    println!("\nGreeting: {}", experience.personalized_content.greeting);
    println!(
        "Pricing: {}",
        experience.personalized_content.pricing.total_savings
    );
    render_package(&experience.benefits_package);

    println!("\nRecommendations");
    for recommendation in &experience.recommendations {
        println!(
            "- [{}] {} ({})",
            recommendation.relevance_score, recommendation.title, recommendation.id
        );
    }
    println!("Notifications");
    for notification in &experience.notifications {
        println!("- {:?}: {}", notification.priority, notification.title);
    }

    let estimator = system.get_contextualized_experience(session_id, PageContext::Estimator)?;
    println!(
        "\nEstimator page carries {} contextual recommendation(s)",
        estimator.recommendations.len()
    );

    let submission = system.process_veteran_form_submission(
        session_id,
        FormSubmission {
            form_type: FormType::Estimate,
            form_data: FormData {
                budget_range: Some("$25K-$50K".to_string()),
                project_type: Some("Accessible Bathroom".to_string()),
                ..FormData::default()
            },
        },
    )?;
    println!("\nEstimate form: {}", submission.response.message);
    println!("Next steps:");
    for step in &submission.next_steps {
        println!("  - {step}");
    }

    let quote = system.apply_veteran_discounts(
        session_id,
        DiscountRequest {
            amount: Money::whole_dollars(38_000),
            project_details: None,
        },
    )?;
    println!(
        "\nQuote {} -> {} | {}",
        quote.original_amount, quote.discounted_amount, quote.veteran_message
    );

    let contact = system.request_specialist_contact(
        session_id,
        SpecialistRequest {
            urgency: Urgency::Emergency,
            message: Some("Need a ramp before surgery recovery".to_string()),
        },
    )?;
    println!(
        "Specialist {} will respond within {}",
        contact.assigned_specialist.name, contact.expected_response
    );

    let analytics = system.analytics();
    println!(
        "\nAnalytics: {} veteran(s), {} disabled, {} combat",
        analytics.total_veterans,
        analytics.benefit_utilization.disabled_veterans,
        analytics.benefit_utilization.combat_veterans
    );

    let ended = system.end_session(session_id)?;
    println!(
        "Session closed after {} interaction(s)",
        ended.interaction_history.len()
    );

    Ok(())
}

fn summary_line(profile: &VeteranProfile) -> String {
    if !profile.is_veteran {
        return format!(
            "{} | non-veteran | {} | {}",
            profile.id,
            profile.family_status.label(),
            profile.priority_level.label()
        );
    }
    format!(
        "{} | {} veteran | confidence {} | {}{}{}",
        profile.id,
        profile.service_branch.label(),
        profile.confidence,
        profile.priority_level.label(),
        if profile.combat_veteran { " | combat" } else { "" },
        profile
            .disability_rating
            .map(|rating| format!(" | {rating}% rated"))
            .unwrap_or_default()
    )
}

fn eligibility_line(eligibility: &BenefitEligibility) -> String {
    let flag = |eligible: bool| if eligible { "yes" } else { "no" };
    format!(
        "VA loan: {} | GI Bill: {} | Healthcare: {} | Priority group {}",
        flag(eligibility.va_loan),
        flag(eligibility.gi_bill),
        flag(eligibility.healthcare),
        eligibility.priority_group
    )
}

fn render_profile(profile: &VeteranProfile) {
    println!("Profile {}", summary_line(profile));
    if !profile.is_veteran {
        return;
    }
    println!(
        "- Era: {} | Rank: {}",
        profile.service_era.label(),
        profile.rank_category.label()
    );
    if !profile.combat_theaters.is_empty() {
        println!("- Theaters: {}", profile.combat_theaters.join(", "));
    }
    if !profile.service_connected_conditions.is_empty() {
        println!(
            "- Conditions: {}",
            profile.service_connected_conditions.join(", ")
        );
    }
    if !profile.eligible_programs.is_empty() {
        println!("- Programs: {}", profile.eligible_programs.join(", "));
    }
}

fn render_package(package: &VeteranBenefitsPackage) {
    if package.discounts.is_empty() {
        println!("No veteran discounts apply");
    } else {
        println!("Discounts:");
        for discount in &package.discounts {
            println!(
                "  - {} {}%{}",
                discount.name,
                discount.percentage,
                if discount.stackable { "" } else { " (exclusive)" }
            );
        }
    }

    let assignment = &package.specialist_assignment;
    println!(
        "Specialist: {} ({})",
        assignment.assigned_specialist.name, assignment.assigned_specialist.title
    );
    println!(
        "Response: {} | consultation {}",
        package.timeline.initial_response, package.timeline.consultation
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_line_spells_out_each_program() {
        let line = eligibility_line(&BenefitEligibility {
            va_loan: true,
            gi_bill: false,
            healthcare: true,
            priority_group: 6,
        });
        assert_eq!(
            line,
            "VA loan: yes | GI Bill: no | Healthcare: yes | Priority group 6"
        );
    }
}
