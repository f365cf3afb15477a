use std::sync::Arc;

use crate::profile::{InMemoryProfileStore, VeteranProfile, VeteranProfileEngine};
use crate::vocabulary::Vocabulary;

pub(crate) fn vocabulary() -> Arc<Vocabulary> {
    Arc::new(Vocabulary::standard().expect("embedded vocabulary parses"))
}

pub(crate) fn engine() -> VeteranProfileEngine<InMemoryProfileStore> {
    VeteranProfileEngine::new(vocabulary(), Arc::new(InMemoryProfileStore::default()))
        .expect("engine builds")
}

pub(crate) fn classify(text: &str) -> VeteranProfile {
    engine().classify(text, None, None)
}
