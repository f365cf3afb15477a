use super::common::{start, system, system_with, ARMY_COMBAT_DISABLED};
use crate::automation::Money;
use crate::config::PersonalizationConfig;
use crate::content::PageContext;
use crate::personalization::{
    DiscountRequest, ExperienceRequest, FormSubmission, FormType, InteractionKind,
    NotificationKind, NotificationPriority, PersonalizationError, SpecialistRequest, Urgency,
};
use crate::profile::{BudgetRange, FormData, PriorityLevel, ServiceBranch, StoreError};

#[test]
fn initialization_builds_the_full_experience() {
    let system = system();
    let experience = start(&system, ARMY_COMBAT_DISABLED, "session-1");

    assert_eq!(experience.profile.service_branch, ServiceBranch::Army);
    assert_eq!(experience.profile.priority_level, PriorityLevel::Immediate);
    assert_eq!(experience.session.session_id, "session-1");
    assert_eq!(experience.session.profile_id, experience.profile.id);
    assert_eq!(
        experience.session.interaction_history[0].kind,
        InteractionKind::FormInteraction
    );
    assert_eq!(experience.personalized_content.pricing.base_discount, 15);
    assert!(experience.recommendations.len() <= 5);
    assert_eq!(experience.recommendations[0].id, "disabled001");

    let first = &experience.notifications[0];
    assert_eq!(first.kind, NotificationKind::UrgentResponse);
    assert!(experience
        .notifications
        .windows(2)
        .all(|pair| pair[0].priority >= pair[1].priority));
    let discount = experience
        .notifications
        .iter()
        .find(|notification| notification.kind == NotificationKind::DiscountAvailable)
        .expect("discount notification");
    assert_eq!(discount.title, "15% Veteran Discount Applied");
}

#[test]
fn missing_session_id_gets_a_generated_one() {
    let system = system();
    let experience = system
        .initialize_veteran_experience(ExperienceRequest {
            text: "navy veteran".to_string(),
            ..ExperienceRequest::default()
        })
        .expect("initializes");

    assert!(uuid::Uuid::parse_str(&experience.session.session_id).is_ok());
}

#[test]
fn reusing_a_session_keeps_its_history() {
    let system = system();
    start(&system, "navy veteran", "session-2");
    let again = start(&system, "navy veteran with ptsd", "session-2");

    assert_eq!(again.session.interaction_history.len(), 2);
    assert_eq!(again.session.profile_id, again.profile.id);
    assert!(again.profile.disabled_veteran);
}

#[test]
fn identical_text_in_two_sessions_keeps_profiles_apart() {
    let system = system();
    let alice = start(&system, "army veteran", "alice");
    let bob = start(&system, "army veteran", "bob");
    assert_ne!(alice.profile.id, bob.profile.id);

    system
        .process_veteran_form_submission(
            "alice",
            FormSubmission {
                form_type: FormType::Estimate,
                form_data: FormData {
                    budget_range: Some("$250K+".to_string()),
                    ..FormData::default()
                },
            },
        )
        .expect("submitted");

    let budget_for = |session_id: &str| {
        let session = system.session(session_id).expect("session");
        system
            .profiles()
            .get_profile(&session.profile_id)
            .expect("profile")
            .budget_range
    };
    assert_eq!(budget_for("alice"), Some(BudgetRange::Over250K));
    assert_eq!(budget_for("bob"), None);
}

#[test]
fn user_profile_lives_until_its_last_session_ends() {
    let system = system();
    let request = |session_id: &str| ExperienceRequest {
        text: "navy veteran".to_string(),
        session_id: Some(session_id.to_string()),
        user_id: Some("user-7".to_string()),
        ..ExperienceRequest::default()
    };
    let first = system
        .initialize_veteran_experience(request("tab-1"))
        .expect("initializes");
    system
        .initialize_veteran_experience(request("tab-2"))
        .expect("initializes");
    assert_eq!(first.profile.id.0, "user-7");

    system.end_session("tab-1").expect("ended");
    assert!(system.profiles().get_profile(&first.profile.id).is_ok());

    system.end_session("tab-2").expect("ended");
    assert!(system.profiles().all_profiles().is_empty());
}

#[test]
fn civilian_experience_has_no_notifications() {
    let system = system();
    let experience = start(&system, "", "session-civilian");

    assert!(!experience.profile.is_veteran);
    assert!(experience.notifications.is_empty());
    assert_eq!(experience.recommendations.len(), 1);
    assert_eq!(experience.recommendations[0].id, "general001");
    assert!(experience.benefits_package.discounts.is_empty());
}

#[test]
fn contextualized_experience_updates_current_page() {
    let system = system();
    start(&system, ARMY_COMBAT_DISABLED, "session-3");

    let estimator = system
        .get_contextualized_experience("session-3", PageContext::Estimator)
        .expect("context");
    assert!(estimator.personalized_content.pricing.is_some());
    assert!(estimator.personalized_content.greeting.is_none());
    assert_eq!(estimator.recommendations[0].id, "estimator001");
    assert!(estimator.notifications.is_empty());

    let homepage = system
        .get_contextualized_experience("session-3", PageContext::Homepage)
        .expect("context");
    assert!(homepage
        .notifications
        .iter()
        .all(|notification| notification.priority >= NotificationPriority::High));
    assert!(!homepage.notifications.is_empty());

    let session = system.session("session-3").expect("session");
    assert_eq!(session.context.current_page, PageContext::Homepage);
    assert_eq!(
        session.interaction_history.last().map(|interaction| interaction.kind),
        Some(InteractionKind::ContentView)
    );
}

#[test]
fn unknown_session_is_reported() {
    let system = system();
    let error = system
        .get_contextualized_experience("nope", PageContext::About)
        .expect_err("unknown session");
    assert_eq!(
        error,
        PersonalizationError::Store(StoreError::SessionNotFound("nope".to_string()))
    );
    assert!(error.is_not_found());
}

#[test]
fn estimate_form_updates_profile_and_returns_benefits() {
    let system = system();
    start(&system, ARMY_COMBAT_DISABLED, "session-4");

    let result = system
        .process_veteran_form_submission(
            "session-4",
            FormSubmission {
                form_type: FormType::Estimate,
                form_data: FormData {
                    budget_range: Some("$50K-$100K".to_string()),
                    project_type: Some("Bathroom Remodel".to_string()),
                    ..FormData::default()
                },
            },
        )
        .expect("submitted");

    assert!(result.response.veteran_recognition);
    assert_eq!(
        result.response.assigned_specialist.as_deref(),
        Some("James \"Doc\" Martinez")
    );
    let benefits = result.veteran_benefits.expect("estimate carries benefits");
    assert!(!benefits.discounts.is_empty());
    assert!(benefits.discounts.iter().all(|discount| discount.auto_applied));
    let handling = result.priority_handling.expect("immediate priority");
    assert_eq!(handling.response_time, "4 hours");
    assert!(handling.emergency_contact);
    assert_eq!(
        result.next_steps[0],
        "IMMEDIATE PRIORITY: Veteran specialist will contact you within 4 hours"
    );
    assert_eq!(
        result.next_steps.last().map(String::as_str),
        Some("Detailed project proposal will be provided")
    );

    let session = system.session("session-4").expect("session");
    let profile = system
        .profiles()
        .get_profile(&session.profile_id)
        .expect("profile");
    assert_eq!(profile.budget_range, Some(BudgetRange::From50KTo100K));
    assert!(profile
        .construction_priorities
        .contains(&"Bathroom Remodel".to_string()));
    assert_eq!(session.context.project_interest, vec!["Bathroom Remodel".to_string()]);
    assert_eq!(session.context.budget_indicated.as_deref(), Some("$50K-$100K"));
}

#[test]
fn contact_form_for_civilian_gets_standard_reply() {
    let system = system();
    start(&system, "", "session-5");

    let result = system
        .process_veteran_form_submission(
            "session-5",
            FormSubmission {
                form_type: FormType::Estimate,
                form_data: FormData::default(),
            },
        )
        .expect("submitted");

    assert!(!result.response.veteran_recognition);
    assert!(result.veteran_benefits.is_none());
    assert!(result.priority_handling.is_none());
    assert_eq!(
        result.next_steps,
        vec![
            "Our team will review your request and contact you within 48 hours".to_string(),
            "Free consultation will be scheduled at your convenience".to_string(),
            "Detailed project proposal will be provided".to_string(),
        ]
    );
}

#[test]
fn discount_quote_carries_branch_message() {
    let system = system();
    start(&system, ARMY_COMBAT_DISABLED, "session-6");

    let quote = system
        .apply_veteran_discounts(
            "session-6",
            DiscountRequest {
                amount: Money::whole_dollars(20_000),
                project_details: None,
            },
        )
        .expect("quote");

    assert_eq!(quote.total_savings, Money::whole_dollars(3_000));
    assert_eq!(quote.discounted_amount, Money::whole_dollars(17_000));
    assert!(quote
        .veteran_message
        .starts_with("Thank you for your service, Army veteran! You've saved $3000.00"));
    assert!(quote.veteran_message.contains("combat service"));
    assert!(quote.veteran_message.contains("accessibility benefits"));

    let session = system.session("session-6").expect("session");
    assert_eq!(
        session.interaction_history.last().map(|interaction| interaction.kind),
        Some(InteractionKind::DiscountApplied)
    );
}

#[test]
fn civilian_discount_quote_is_full_price() {
    let system = system();
    start(&system, "", "session-7");

    let quote = system
        .apply_veteran_discounts(
            "session-7",
            DiscountRequest {
                amount: Money::whole_dollars(500),
                project_details: None,
            },
        )
        .expect("quote");
    assert_eq!(quote.total_savings, Money::ZERO);
    assert_eq!(quote.veteran_message, "Thank you for choosing MH Construction!");
}

#[test]
fn specialist_response_time_tracks_urgency_and_priority() {
    let system = system();
    start(&system, ARMY_COMBAT_DISABLED, "immediate");
    start(&system, "navy veteran", "high");
    start(&system, "", "civilian");

    let contact = |session: &str, urgency: Urgency| {
        system
            .request_specialist_contact(
                session,
                SpecialistRequest {
                    urgency,
                    message: None,
                },
            )
            .expect("contact")
    };

    let emergency = contact("immediate", Urgency::Emergency);
    assert_eq!(emergency.expected_response, "2-4 hours");
    assert_eq!(emergency.assigned_specialist.id, "spec001");
    assert!(emergency
        .special_instructions
        .contains(&"PTSD awareness - be flexible with scheduling".to_string()));
    assert_eq!(
        emergency.special_instructions.last().map(String::as_str),
        Some("EMERGENCY REQUEST - Immediate response required")
    );

    assert_eq!(contact("immediate", Urgency::Standard).expected_response, "4-8 hours");
    assert_eq!(contact("high", Urgency::Priority).expected_response, "4-8 hours");
    assert_eq!(contact("high", Urgency::Standard).expected_response, "12-24 hours");

    let civilian = contact("civilian", Urgency::Emergency);
    assert_eq!(civilian.expected_response, "48-72 hours");
    assert_eq!(civilian.assigned_specialist.id, "general001");
    assert!(civilian.special_instructions.is_empty());
}

#[test]
fn analytics_counts_veterans() {
    let system = system();
    start(&system, ARMY_COMBAT_DISABLED, "a");
    start(&system, "navy veteran", "b");
    start(&system, "", "c");

    let report = system.analytics();
    assert_eq!(report.total_veterans, 2);
    assert_eq!(report.benefit_utilization.disabled_veterans, 1);
    assert_eq!(report.benefit_utilization.combat_veterans, 1);
    assert_eq!(report.engagement_metrics.total_sessions, 3);
    assert_eq!(report.top_recommendations[0].kind, "Accessibility Retrofit");
}

#[test]
fn session_capacity_comes_from_config() {
    let system = system_with(PersonalizationConfig {
        session_capacity: 2,
        ..PersonalizationConfig::default()
    });
    start(&system, "navy veteran", "one");
    start(&system, "navy veteran", "two");
    start(&system, "navy veteran", "three");

    assert_eq!(system.analytics().engagement_metrics.total_sessions, 2);
    assert!(system.session("one").is_err());
}
