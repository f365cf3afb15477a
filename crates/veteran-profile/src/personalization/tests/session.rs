use chrono::{Duration, Utc};
use serde_json::json;

use super::common::{start, system, system_with};
use crate::config::PersonalizationConfig;
use crate::content::{PageContext, Tone};
use crate::personalization::{
    ExperienceRequest, InMemorySessionStore, Interaction, InteractionKind, NotificationLevel,
    SessionRecord, SessionStore,
};
use crate::profile::tests::common::classify;
use crate::profile::StoreError;

fn record(id: &str, minutes_ago: i64) -> SessionRecord {
    let mut record = SessionRecord::new(id.to_string(), &classify("army veteran"));
    record.last_activity = Utc::now() - Duration::minutes(minutes_ago);
    record
}

#[test]
fn capacity_evicts_least_recently_active() {
    let store = InMemorySessionStore::with_capacity(2);
    store.set(record("old", 30));
    store.set(record("recent", 5));
    let evicted = store.set(record("new", 0));

    assert_eq!(store.len(), 2);
    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].session_id, "old");
    assert!(store.get("old").is_none());
    assert!(store.get("recent").is_some());
    assert!(store.get("new").is_some());
}

#[test]
fn newly_inserted_session_survives_even_when_oldest() {
    let store = InMemorySessionStore::with_capacity(1);
    store.set(record("current", 0));
    store.set(record("backdated", 60));

    assert_eq!(store.len(), 1);
    assert!(store.get("backdated").is_some());
}

#[test]
fn modify_unknown_session_is_not_found() {
    let store = InMemorySessionStore::default();
    let error = store
        .modify("missing", &mut |_| {})
        .expect_err("unknown session");
    assert_eq!(error, StoreError::SessionNotFound("missing".to_string()));
}

#[test]
fn preferences_follow_the_profile() {
    let immediate = SessionRecord::new("a".to_string(), &classify("army combat veteran, 70% disabled"));
    assert_eq!(immediate.preferences.notification_level, NotificationLevel::All);
    assert!(immediate.preferences.accessibility_mode);
    assert_eq!(immediate.context.current_page, PageContext::Homepage);

    let civilian = SessionRecord::new("b".to_string(), &classify(""));
    assert_eq!(civilian.preferences.notification_level, NotificationLevel::Important);
    assert!(!civilian.preferences.accessibility_mode);
    assert_eq!(civilian.preferences.communication_style, Tone::Casual);
}

#[test]
fn recorded_interactions_append_and_touch_activity() {
    let system = system();
    let started = start(&system, "navy veteran", "session-log");
    assert_eq!(started.session.interaction_history.len(), 1);

    let updated = system
        .record_interaction(
            "session-log",
            Interaction::now(
                InteractionKind::RecommendationClick,
                json!({ "recommendation": "specialist001" }),
                true,
            ),
        )
        .expect("session exists");

    assert_eq!(updated.interaction_history.len(), 2);
    assert_eq!(
        updated.interaction_history[1].kind,
        InteractionKind::RecommendationClick
    );
    assert!(updated.last_activity >= started.session.last_activity);
}

#[test]
fn ending_a_session_removes_it() {
    let system = system();
    start(&system, "navy veteran", "session-end");

    let ended = system.end_session("session-end").expect("ended");
    assert_eq!(ended.session_id, "session-end");
    assert!(system.session("session-end").is_err());
    assert!(system.end_session("session-end").is_err());
}

#[test]
fn ending_a_session_releases_its_profile() {
    let system = system();
    let started = start(&system, "navy veteran", "session-release");
    assert_eq!(system.profiles().all_profiles().len(), 1);

    system.end_session("session-release").expect("ended");
    assert!(system.profiles().all_profiles().is_empty());
    assert!(system.profiles().get_profile(&started.profile.id).is_err());
}

#[test]
fn evicted_sessions_release_their_profiles() {
    let system = system_with(PersonalizationConfig {
        session_capacity: 2,
        ..PersonalizationConfig::default()
    });
    for session_id in ["one", "two", "three", "four"] {
        start(&system, "army veteran", session_id);
    }

    let profiles = system.profiles().all_profiles();
    assert_eq!(profiles.len(), 2);
    assert!(system.session("four").is_ok());
    for profile in profiles {
        let session_id = profile.id.0.trim_start_matches("session-");
        assert_eq!(system.session(session_id).expect("live").profile_id, profile.id);
    }
}

#[test]
fn switching_users_releases_the_previous_profile() {
    let system = system();
    start(&system, "navy veteran", "shared-tab");
    let switched = system
        .initialize_veteran_experience(ExperienceRequest {
            text: "navy veteran".to_string(),
            session_id: Some("shared-tab".to_string()),
            user_id: Some("user-9".to_string()),
            ..ExperienceRequest::default()
        })
        .expect("initializes");

    let profiles = system.profiles().all_profiles();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].id, switched.profile.id);
}

#[test]
fn upsert_creates_once_then_updates_in_place() {
    let store = InMemorySessionStore::default();
    let mut created = 0;
    let mut create = || {
        created += 1;
        record("tab", 0)
    };
    let mut mark = |session: &mut SessionRecord| {
        session.context.priority_needs.push("Ramp".to_string())
    };

    let first = store.upsert("tab", &mut create, &mut mark);
    let second = store.upsert("tab", &mut create, &mut mark);

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(created, 1);
    assert_eq!(store.len(), 1);
    let needs = &second.record.context.priority_needs;
    assert_eq!(needs.iter().filter(|need| *need == "Ramp").count(), 2);
}

#[test]
fn upsert_past_capacity_reports_the_evicted_session() {
    let store = InMemorySessionStore::with_capacity(1);
    store.set(record("old", 30));

    let upserted = store.upsert("new", &mut || record("new", 0), &mut |_| {});

    assert!(upserted.created);
    assert_eq!(upserted.evicted.len(), 1);
    assert_eq!(upserted.evicted[0].session_id, "old");
    assert!(store.get("old").is_none());
}
