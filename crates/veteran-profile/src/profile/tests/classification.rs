use chrono::NaiveDate;

use super::common::{classify, engine};
use crate::profile::{
    AdaptiveNeedKind, BudgetRange, FamilyStatus, PriorityLevel, RankCategory, RespectLevel,
    ServiceBranch, ServiceEra, Severity, ACCESSIBILITY_COMPLIANCE, ENERGY_EFFICIENCY,
    SECURITY_FEATURES, SMART_HOME_TECHNOLOGY,
};

#[test]
fn army_combat_veteran_with_rating_is_immediate() {
    let profile = classify("I am an Army combat veteran with a 70% disability rating");

    assert!(profile.is_veteran);
    assert_eq!(profile.service_branch, ServiceBranch::Army);
    assert!(profile.combat_veteran);
    assert!(profile.disabled_veteran);
    assert_eq!(profile.disability_rating, Some(70));
    assert_eq!(profile.priority_level, PriorityLevel::Immediate);
    assert_eq!(profile.respect_level, RespectLevel::CombatValor);
}

#[test]
fn spouse_of_service_member_is_military_family() {
    let profile = classify("my spouse is active duty Navy");

    assert!(!profile.is_veteran);
    assert_eq!(profile.confidence, 0);
    assert_eq!(profile.family_status, FamilyStatus::MilitaryFamily);
    assert_eq!(profile.priority_level, PriorityLevel::Family);
    assert_eq!(profile.respect_level, RespectLevel::FamilyRespect);
    assert_eq!(profile.service_branch, ServiceBranch::Unknown);
}

#[test]
fn relative_mentioned_alongside_own_service_stays_a_veteran() {
    let profile = classify(
        "Army infantry sergeant, deployed to Iraq twice, wounded in combat, PTSD. \
         My wife and I need a wheelchair ramp.",
    );

    assert!(profile.is_veteran);
    assert!(profile.confidence >= 15);
    assert!(profile.combat_veteran);
    assert!(profile.disabled_veteran);
    assert_eq!(profile.service_branch, ServiceBranch::Army);
    assert_eq!(profile.priority_level, PriorityLevel::Immediate);
    assert_ne!(profile.family_status, FamilyStatus::MilitaryFamily);
}

#[test]
fn relative_described_with_military_terms_is_attributed() {
    for text in [
        "my son was deployed to afghanistan with the marines",
        "looking for help. my husband is in the army and deployed overseas",
    ] {
        let profile = classify(text);
        assert!(!profile.is_veteran, "{text}");
        assert_eq!(profile.priority_level, PriorityLevel::Family, "{text}");
    }
}

#[test]
fn empty_input_yields_standard_non_veteran() {
    let profile = classify("");

    assert!(!profile.is_veteran);
    assert_eq!(profile.confidence, 0);
    assert_eq!(profile.priority_level, PriorityLevel::Standard);
    assert_eq!(profile.family_status, FamilyStatus::SingleVeteran);
    assert!(profile.id.0.starts_with("user-"));
}

#[test]
fn text_without_military_language_scores_zero() {
    let engine = engine();
    for text in [
        "I would like a quote for a new kitchen",
        "Looking to remodel our bathroom this spring",
        "please send pricing for a deck",
    ] {
        let detection = engine.analyzers().profile.detect_veteran_status(text);
        assert_eq!(detection.confidence, 0, "{text}");
        assert!(!detection.is_veteran, "{text}");
    }
}

#[test]
fn single_cultural_term_is_not_enough() {
    let engine = engine();
    let detection = engine
        .analyzers()
        .profile
        .detect_veteran_status("we ate at the chow hall");
    assert_eq!(detection.confidence, 5);
    assert_eq!(detection.indicators, 1);
    assert!(!detection.is_veteran);

    let profile = engine.classify("we ate at the chow hall", None, None);
    assert!(!profile.is_veteran);
    assert_eq!(profile.confidence, 0);
}

#[test]
fn confidence_is_capped_below_certainty() {
    let text = "retired military veteran, honorably discharged army ranger, \
                sergeant with combat deployment to iraq and afghanistan, purple heart, \
                va benefits and gi bill, ptsd, battle buddy at the chow hall";
    let profile = classify(text);
    assert!(profile.is_veteran);
    assert_eq!(profile.confidence, 95);
}

#[test]
fn confidence_stays_within_bounds() {
    let engine = engine();
    for text in [
        "",
        "vet",
        "navy",
        "marine corps veteran, oorah, semper fi",
        "air force pilot, squadron commander, colonel, deployed overseas",
    ] {
        let detection = engine.analyzers().profile.detect_veteran_status(text);
        assert!(detection.confidence <= 95, "{text}");
    }
}

#[test]
fn branch_ties_resolve_in_declaration_order() {
    let engine = engine();
    let analyzer = &engine.analyzers().profile;
    assert_eq!(analyzer.detect_branch("army and navy game"), ServiceBranch::Army);
    assert_eq!(
        analyzer.detect_branch("usmc marine, semper fi, also a navy kid"),
        ServiceBranch::Marines
    );
    assert_eq!(analyzer.detect_branch("nothing here"), ServiceBranch::Unknown);
}

#[test]
fn secondary_branch_requires_multi_service_language() {
    let engine = engine();
    let analyzer = &engine.analyzers().profile;
    assert_eq!(
        analyzer.detect_secondary_branches("army veteran who transferred to the air force"),
        vec![ServiceBranch::AirForce]
    );
    assert!(analyzer
        .detect_secondary_branches("army veteran who loves the air force museum")
        .is_empty());
}

#[test]
fn overlapping_eras_report_multiple() {
    let engine = engine();
    let analyzer = &engine.analyzers().profile;
    assert_eq!(analyzer.detect_era("two tours in iraq"), ServiceEra::Gwot);
    assert_eq!(
        analyzer.detect_era("desert storm and later afghanistan"),
        ServiceEra::Multiple
    );
    assert_eq!(analyzer.detect_era("no era words"), ServiceEra::Unknown);
}

#[test]
fn rank_category_and_specific_rank() {
    let profile = classify("retired staff sergeant, army veteran");
    assert_eq!(profile.rank_category, RankCategory::Nco);
    assert_eq!(profile.specific_rank.as_deref(), Some("staff sergeant"));

    let officer = classify("former navy captain and veteran");
    assert_eq!(officer.rank_category, RankCategory::Officer);
}

#[test]
fn years_of_service_patterns_and_fallbacks() {
    let engine = engine();
    let analyzer = &engine.analyzers().profile;
    assert_eq!(analyzer.estimate_years_of_service("served 12 years"), Some(12));
    assert_eq!(
        analyzer.estimate_years_of_service("8 years of service in the guard"),
        Some(8)
    );
    assert_eq!(
        analyzer.estimate_years_of_service("6 years active duty"),
        Some(6)
    );
    assert_eq!(analyzer.estimate_years_of_service("retired in 2015"), Some(20));
    assert_eq!(analyzer.estimate_years_of_service("a career military lifer"), Some(25));
    assert_eq!(analyzer.estimate_years_of_service("no numbers"), None);
}

#[test]
fn deployments_use_placeholder_dates_and_explicit_multi_tour_language() {
    let profile = classify("marine veteran with two deployments to iraq and afghanistan");

    assert!(profile.combat_veteran);
    assert!(profile.multiple_deployments);
    assert_eq!(profile.combat_theaters, vec!["Iraq (OIF)", "Afghanistan (OEF)"]);
    assert_eq!(profile.deployment_history.len(), 2);
    let iraq = &profile.deployment_history[0];
    assert_eq!(iraq.theater, "Iraq (OIF)");
    assert_eq!(iraq.start_date, NaiveDate::from_ymd_opt(2003, 1, 1).unwrap());
    assert_eq!(iraq.branch, ServiceBranch::Marines);
    assert!(iraq.combat_role);

    let single = classify("marine veteran, served in iraq and afghanistan");
    assert!(!single.multiple_deployments);
}

#[test]
fn combat_theaters_cover_world_war_two() {
    let profile = classify("my grandfather's stories aside, I am a veteran who served in germany");
    assert_eq!(profile.combat_theaters, vec!["WWII Europe"]);
    assert!(profile.deployment_history.is_empty());
}

#[test]
fn conditions_are_not_mutually_exclusive() {
    let profile = classify("disabled veteran with ptsd, tinnitus and knee pain");
    assert_eq!(
        profile.service_connected_conditions,
        vec!["PTSD", "Hearing Loss", "Joint Issues"]
    );
}

#[test]
fn adaptive_need_severity() {
    let profile =
        classify("disabled veteran, permanent wheelchair user, legally blind, on oxygen at night");
    let severities: Vec<_> = profile
        .adaptive_needs
        .iter()
        .map(|need| (need.kind, need.severity))
        .collect();
    assert_eq!(
        severities,
        vec![
            (AdaptiveNeedKind::Mobility, Severity::Severe),
            (AdaptiveNeedKind::Visual, Severity::Severe),
            (AdaptiveNeedKind::Medical, Severity::Severe),
        ]
    );

    let moderate = classify("army veteran with chronic hearing loss");
    assert_eq!(moderate.adaptive_needs[0].kind, AdaptiveNeedKind::Hearing);
    assert_eq!(moderate.adaptive_needs[0].severity, Severity::Moderate);

    let mild = classify("navy veteran who walks with a cane");
    assert_eq!(mild.adaptive_needs[0].kind, AdaptiveNeedKind::Mobility);
    assert_eq!(mild.adaptive_needs[0].severity, Severity::Mild);

    let cognitive = classify("veteran with a tbi");
    assert!(cognitive
        .adaptive_needs
        .iter()
        .any(|need| need.kind == AdaptiveNeedKind::Cognitive && need.severity == Severity::Moderate));
}

#[test]
fn disability_rating_is_always_on_the_ladder() {
    let engine = engine();
    let analyzer = &engine.analyzers().disability;
    assert_eq!(analyzer.estimate_rating("va rating of 85"), Some(90));
    assert_eq!(analyzer.estimate_rating("i am 40% disabled"), Some(40));
    assert_eq!(analyzer.estimate_rating("service connected 30%"), Some(30));
    assert_eq!(analyzer.estimate_rating("totally disabled veteran"), Some(100));
    assert_eq!(analyzer.estimate_rating("disabled veteran"), None);

    for text in ["12% rating", "67 percent disabled", "disability 100%", "va rating 3"] {
        if let Some(rating) = analyzer.estimate_rating(text) {
            assert!(rating % 10 == 0 && (10..=100).contains(&rating), "{text}");
        }
    }
}

#[test]
fn eligible_programs_are_deduplicated() {
    let profile = classify("disabled veteran starting a business");
    assert_eq!(
        profile.eligible_programs,
        vec!["Disabled Veteran Business", "Vocational Rehabilitation"]
    );
}

#[test]
fn construction_priorities_use_the_published_labels() {
    let profile = classify("disabled army veteran wants smart home security and energy savings");
    for label in [
        ACCESSIBILITY_COMPLIANCE,
        SECURITY_FEATURES,
        ENERGY_EFFICIENCY,
        SMART_HOME_TECHNOLOGY,
    ] {
        assert!(profile.construction_priorities.iter().any(|p| p == label), "{label}");
    }
}

#[test]
fn oversized_budget_figures_saturate_to_the_top_range() {
    for text in [
        "army veteran, budget 99999999999999999k",
        "army veteran, budget 123456789012345678901234567890k",
    ] {
        assert_eq!(classify(text).budget_range, Some(BudgetRange::Over250K), "{text}");
    }
    assert_eq!(classify("budget 25k").budget_range, Some(BudgetRange::From25KTo50K));
}

#[test]
fn veteran_without_general_terms_is_standard_priority() {
    let profile = classify("proud soldier of the infantry");
    assert!(profile.is_veteran);
    assert_eq!(profile.priority_level, PriorityLevel::Standard);

    let high = classify("army veteran planning a remodel");
    assert_eq!(high.priority_level, PriorityLevel::High);
}

#[test]
fn combat_and_disability_terms_always_force_immediate() {
    for text in [
        "veteran, combat tour, ptsd",
        "deployed overseas, now a disabled veteran",
        "navy vet with purple heart and tbi",
        "air force veteran, iraq, 100% disabled",
    ] {
        let profile = classify(text);
        assert!(profile.is_veteran, "{text}");
        assert_eq!(profile.priority_level, PriorityLevel::Immediate, "{text}");
    }
}

#[test]
fn non_veteran_profile_uses_sentinels() {
    let profile = classify("we want a new patio");
    assert!(!profile.is_veteran);
    assert_eq!(profile.service_branch, ServiceBranch::Unknown);
    assert_eq!(profile.service_era, ServiceEra::Unknown);
    assert_eq!(profile.rank_category, RankCategory::Unknown);
    assert!(!profile.combat_veteran);
    assert!(!profile.disabled_veteran);
    assert_eq!(profile.disability_rating, None);
    assert!(profile.secondary_branches.is_empty());
    assert!(profile.deployment_history.is_empty());
    assert!(profile.adaptive_needs.is_empty());
    assert!(profile.va_benefits.is_empty());
    assert!(profile.eligible_programs.is_empty());
}

#[test]
fn va_benefit_statuses_are_fixed_per_category() {
    let profile = classify("veteran using my va loan and the va hospital");
    let kinds: Vec<_> = profile
        .va_benefits
        .iter()
        .map(|benefit| (benefit.benefit_type, benefit.status))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (crate::profile::BenefitType::Housing, crate::profile::BenefitStatus::Eligible),
            (crate::profile::BenefitType::Healthcare, crate::profile::BenefitStatus::Active),
        ]
    );
}
