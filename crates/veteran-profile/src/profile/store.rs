use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use super::domain::{ProfileId, VeteranProfile};

/// Lookups by an unknown key. Callers treat these as programming errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("session `{0}` not found")]
    SessionNotFound(String),
    #[error("profile `{0}` not found")]
    ProfileNotFound(String),
}

/// Keyed, session-lifetime profile storage.
pub trait ProfileStore: Send + Sync {
    fn get(&self, id: &ProfileId) -> Option<VeteranProfile>;
    fn set(&self, profile: VeteranProfile);
    fn delete(&self, id: &ProfileId) -> Option<VeteranProfile>;
    fn all(&self) -> Vec<VeteranProfile>;

    /// Read-modify-write under the store's own exclusion.
    fn modify(
        &self,
        id: &ProfileId,
        apply: &mut dyn FnMut(&mut VeteranProfile),
    ) -> Result<VeteranProfile, StoreError>;
}

#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<ProfileId, VeteranProfile>>,
}

impl InMemoryProfileStore {
    fn lock(&self) -> MutexGuard<'_, HashMap<ProfileId, VeteranProfile>> {
        self.profiles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get(&self, id: &ProfileId) -> Option<VeteranProfile> {
        self.lock().get(id).cloned()
    }

    fn set(&self, profile: VeteranProfile) {
        self.lock().insert(profile.id.clone(), profile);
    }

    fn delete(&self, id: &ProfileId) -> Option<VeteranProfile> {
        self.lock().remove(id)
    }

    fn all(&self) -> Vec<VeteranProfile> {
        let mut profiles: Vec<_> = self.lock().values().cloned().collect();
        profiles.sort_by(|left, right| left.id.cmp(&right.id));
        profiles
    }

    fn modify(
        &self,
        id: &ProfileId,
        apply: &mut dyn FnMut(&mut VeteranProfile),
    ) -> Result<VeteranProfile, StoreError> {
        let mut guard = self.lock();
        let profile = guard
            .get_mut(id)
            .ok_or_else(|| StoreError::ProfileNotFound(id.0.clone()))?;
        apply(profile);
        Ok(profile.clone())
    }
}
