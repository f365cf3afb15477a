use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::content::{PageContext, Tone};
use crate::profile::{CommunicationStyle, PriorityLevel, ProfileId, StoreError, VeteranProfile};

pub const DEFAULT_SESSION_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    FormInteraction,
    ContentView,
    RecommendationClick,
    DiscountApplied,
    SpecialistContact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    #[serde(default)]
    pub details: serde_json::Value,
    #[serde(default)]
    pub veteran_specific: bool,
}

impl Interaction {
    pub fn now(kind: InteractionKind, details: serde_json::Value, veteran_specific: bool) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            details,
            veteran_specific,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Detailed,
    Summary,
    Visual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    All,
    Important,
    Minimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPreferences {
    pub communication_style: Tone,
    pub content_format: ContentFormat,
    pub notification_level: NotificationLevel,
    pub accessibility_mode: bool,
}

impl SessionPreferences {
    pub fn for_profile(profile: &VeteranProfile) -> Self {
        let communication_style = match profile.communication_style {
            CommunicationStyle::MilitaryDirect => Tone::Military,
            CommunicationStyle::ProfessionalFormal => Tone::Formal,
            CommunicationStyle::CasualFriendly => Tone::Casual,
            CommunicationStyle::RespectfulDetailed => Tone::Respectful,
        };
        Self {
            communication_style,
            content_format: ContentFormat::Detailed,
            notification_level: if profile.priority_level == PriorityLevel::Immediate {
                NotificationLevel::All
            } else {
                NotificationLevel::Important
            },
            accessibility_mode: profile.disabled_veteran
                || !profile.accessibility_requirements.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub current_page: PageContext,
    pub project_interest: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_indicated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_indicated: Option<String>,
    pub priority_needs: Vec<String>,
}

/// Per-visitor state bound to one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub profile_id: ProfileId,
    pub start_time: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub interaction_history: Vec<Interaction>,
    pub preferences: SessionPreferences,
    pub context: SessionContext,
}

impl SessionRecord {
    pub fn new(session_id: String, profile: &VeteranProfile) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            profile_id: profile.id.clone(),
            start_time: now,
            last_activity: now,
            interaction_history: Vec::new(),
            preferences: SessionPreferences::for_profile(profile),
            context: SessionContext {
                current_page: PageContext::Homepage,
                project_interest: Vec::new(),
                budget_indicated: None,
                timeline_indicated: None,
                priority_needs: profile.construction_priorities.clone(),
            },
        }
    }

    pub fn record(&mut self, interaction: Interaction) {
        self.last_activity = interaction.timestamp.max(self.last_activity);
        self.interaction_history.push(interaction);
    }
}

/// Result of an insert-or-update, including any sessions pushed out by capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionUpsert {
    pub record: SessionRecord,
    pub created: bool,
    pub evicted: Vec<SessionRecord>,
}

/// Keyed session storage owned by the personalization system.
pub trait SessionStore: Send + Sync {
    fn get(&self, session_id: &str) -> Option<SessionRecord>;
    /// Insert or replace; returns whatever the insert evicted.
    fn set(&self, record: SessionRecord) -> Vec<SessionRecord>;
    fn delete(&self, session_id: &str) -> Option<SessionRecord>;
    fn len(&self) -> usize;

    /// Whether any live session is bound to `profile_id`.
    fn is_bound(&self, profile_id: &ProfileId) -> bool;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read-modify-write under the store's own exclusion.
    fn modify(
        &self,
        session_id: &str,
        apply: &mut dyn FnMut(&mut SessionRecord),
    ) -> Result<SessionRecord, StoreError>;

    /// Create the session if absent, then apply `update`, all under one exclusion.
    fn upsert(
        &self,
        session_id: &str,
        create: &mut dyn FnMut() -> SessionRecord,
        update: &mut dyn FnMut(&mut SessionRecord),
    ) -> SessionUpsert;
}

/// Bounded in-memory sessions; inserting past capacity evicts the least recently active.
#[derive(Debug)]
pub struct InMemorySessionStore {
    capacity: usize,
    sessions: Mutex<HashMap<String, SessionRecord>>,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SESSION_CAPACITY)
    }
}

impl InMemorySessionStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionRecord>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop least recently active sessions until within capacity, sparing `keep`.
    fn evict_over_capacity(
        &self,
        sessions: &mut HashMap<String, SessionRecord>,
        keep: &str,
    ) -> Vec<SessionRecord> {
        let mut evicted = Vec::new();
        while sessions.len() > self.capacity {
            let oldest = sessions
                .values()
                .filter(|session| session.session_id != keep)
                .min_by_key(|session| session.last_activity)
                .map(|session| session.session_id.clone());
            let Some(oldest) = oldest else { break };
            if let Some(record) = sessions.remove(&oldest) {
                debug!(session_id = %oldest, "session evicted at capacity");
                evicted.push(record);
            }
        }
        evicted
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, session_id: &str) -> Option<SessionRecord> {
        self.lock().get(session_id).cloned()
    }

    fn set(&self, record: SessionRecord) -> Vec<SessionRecord> {
        let mut sessions = self.lock();
        let keep = record.session_id.clone();
        sessions.insert(keep.clone(), record);
        self.evict_over_capacity(&mut sessions, &keep)
    }

    fn delete(&self, session_id: &str) -> Option<SessionRecord> {
        self.lock().remove(session_id)
    }

    fn len(&self) -> usize {
        self.lock().len()
    }

    fn is_bound(&self, profile_id: &ProfileId) -> bool {
        self.lock()
            .values()
            .any(|session| &session.profile_id == profile_id)
    }

    fn modify(
        &self,
        session_id: &str,
        apply: &mut dyn FnMut(&mut SessionRecord),
    ) -> Result<SessionRecord, StoreError> {
        let mut sessions = self.lock();
        let record = sessions
            .get_mut(session_id)
            .ok_or_else(|| StoreError::SessionNotFound(session_id.to_string()))?;
        apply(record);
        Ok(record.clone())
    }

    fn upsert(
        &self,
        session_id: &str,
        create: &mut dyn FnMut() -> SessionRecord,
        update: &mut dyn FnMut(&mut SessionRecord),
    ) -> SessionUpsert {
        let mut sessions = self.lock();
        let created = !sessions.contains_key(session_id);
        let record = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| create());
        update(record);
        let record = record.clone();
        let evicted = if created {
            self.evict_over_capacity(&mut sessions, session_id)
        } else {
            Vec::new()
        };
        SessionUpsert {
            record,
            created,
            evicted,
        }
    }
}
