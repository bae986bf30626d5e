use chrono::Utc;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};

use crate::models::progress::{DayNumber, ProgressError, ProgressState};

pub const DEFAULT_MAX_USERS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error("Progress is already tracked for the maximum of {0} users")]
    UserLimitReached(usize),
}

/// In-memory progress state, one entry per user.
///
/// Each user's state sits behind its own mutex, held for the whole of a
/// transition, so readers never see a half-applied unlock or replay switch.
/// The outer map lock is only held long enough to find (or create) that
/// entry.
///
/// Entries are created by `reset` and `complete_day` only, never by reads,
/// and at most `max_users` of them exist. Nothing is evicted.
#[derive(Clone)]
pub struct ProgressStore {
    users: Arc<RwLock<HashMap<String, Arc<Mutex<ProgressState>>>>>,
    max_users: usize,
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::with_max_users(DEFAULT_MAX_USERS)
    }
}

impl ProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_users(max_users: usize) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            max_users,
        }
    }

    async fn existing(&self, user_id: &str) -> Option<Arc<Mutex<ProgressState>>> {
        self.users.read().await.get(user_id).cloned()
    }

    async fn entry(&self, user_id: &str) -> Result<Arc<Mutex<ProgressState>>, StoreError> {
        if let Some(entry) = self.existing(user_id).await {
            return Ok(entry);
        }

        let mut users = self.users.write().await;
        if let Some(entry) = users.get(user_id) {
            return Ok(entry.clone());
        }
        if users.len() >= self.max_users {
            tracing::warn!(user_id = %user_id, max_users = self.max_users, "User limit reached");
            return Err(StoreError::UserLimitReached(self.max_users));
        }

        tracing::debug!(user_id = %user_id, "Creating initial progress");
        let entry = Arc::new(Mutex::new(ProgressState::new(user_id, Utc::now())));
        users.insert(user_id.to_string(), entry.clone());
        Ok(entry)
    }

    /// Current progress. Unknown users get the initial configuration
    /// without being tracked.
    pub async fn get(&self, user_id: &str) -> ProgressState {
        match self.existing(user_id).await {
            Some(entry) => entry.lock().await.clone(),
            None => ProgressState::new(user_id, Utc::now()),
        }
    }

    pub async fn reset(&self, user_id: &str) -> Result<ProgressState, StoreError> {
        let entry = self.entry(user_id).await?;
        let mut state = entry.lock().await;
        state.reset(Utc::now());
        tracing::info!(user_id = %user_id, "Progress reset");
        Ok(state.clone())
    }

    pub async fn complete_day(
        &self,
        user_id: &str,
        day: DayNumber,
    ) -> Result<ProgressState, StoreError> {
        let entry = self.entry(user_id).await?;
        let mut state = entry.lock().await;
        let was_replay = state.replay_mode();

        state.complete_day(day, Utc::now())?;

        tracing::info!(
            user_id = %user_id,
            day = day.get(),
            completed = state.completed_count(),
            "Day completed"
        );
        if state.replay_mode() && !was_replay {
            tracing::info!(user_id = %user_id, "All days completed, replay mode enabled");
        }

        Ok(state.clone())
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}
