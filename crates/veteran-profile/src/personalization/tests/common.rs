use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::config::PersonalizationConfig;
use crate::personalization::{
    personalization_router, ExperienceRequest, InMemorySessionStore, VeteranExperience,
    VeteranPersonalizationSystem,
};
use crate::profile::InMemoryProfileStore;
use crate::vocabulary::Vocabulary;

pub(super) type MemorySystem = VeteranPersonalizationSystem<InMemoryProfileStore, InMemorySessionStore>;

pub(super) const ARMY_COMBAT_DISABLED: &str =
    "I am an Army combat veteran with a 70% disability rating";

pub(super) fn system() -> MemorySystem {
    system_with(PersonalizationConfig::default())
}

pub(super) fn system_with(config: PersonalizationConfig) -> MemorySystem {
    let vocabulary = Arc::new(Vocabulary::standard().expect("embedded vocabulary parses"));
    VeteranPersonalizationSystem::in_memory(vocabulary, &config).expect("system builds")
}

pub(super) fn start(system: &MemorySystem, text: &str, session_id: &str) -> VeteranExperience {
    system
        .initialize_veteran_experience(ExperienceRequest {
            text: text.to_string(),
            session_id: Some(session_id.to_string()),
            ..ExperienceRequest::default()
        })
        .expect("experience initializes")
}

pub(super) fn router(system: MemorySystem) -> axum::Router {
    personalization_router(Arc::new(system))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
