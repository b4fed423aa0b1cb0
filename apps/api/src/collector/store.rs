use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;
use uuid::Uuid;

use crate::collector::session::{InFlightToken, Session, SessionView};
use crate::errors::AppError;
use crate::guidance::requester::{GenerationFailure, GuidanceReport};
use crate::profile::models::StudentProfile;
use crate::profile::validation::{validate, ValidationOutcome};

/// Upper bound on live sessions; `create` fails with `SessionLimit` beyond it.
pub const MAX_SESSIONS: usize = 1_000;
/// Sessions untouched for this long are evicted by the sweeper.
pub const SESSION_IDLE_TTL: Duration = Duration::from_secs(60 * 60);
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// In-memory session registry. Nothing is persisted; sessions end with the
/// process, on delete, or after `idle_ttl` without activity.
///
/// The lock is only held for short, synchronous edits and never across a model call.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_limits(MAX_SESSIONS, SESSION_IDLE_TTL)
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

/// Drops idle sessions. A session with a request in flight is kept regardless
/// of age so its outcome has somewhere to land.
fn evict_idle(sessions: &mut HashMap<Uuid, Session>, idle_ttl: Duration) -> usize {
    let now = Instant::now();
    let before = sessions.len();
    sessions.retain(|_, s| {
        s.in_flight.is_busy() || now.duration_since(s.last_active) < idle_ttl
    });
    before - sessions.len()
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
            idle_ttl,
        }
    }

    /// Opens a new session. At capacity, idle sessions are evicted first; if
    /// none are, the request fails with `SessionLimit`.
    pub async fn create(&self) -> Result<SessionView, AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            evict_idle(&mut sessions, self.idle_ttl);
            if sessions.len() >= self.max_sessions {
                return Err(AppError::SessionLimit);
            }
        }
        let session = Session::new();
        let view = session.view();
        sessions.insert(session.id, session);
        info!("Created session {}", view.id);
        Ok(view)
    }

    pub async fn view(&self, id: Uuid) -> Result<SessionView, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(Session::view)
            .ok_or_else(|| not_found(id))
    }

    /// Replaces the session's profile with `edit(current)`. When `edit` fails
    /// the stored profile is left exactly as it was.
    pub async fn update_profile<F>(&self, id: Uuid, edit: F) -> Result<SessionView, AppError>
    where
        F: FnOnce(StudentProfile) -> Result<StudentProfile, AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch();
        session.profile = edit(session.profile.clone())?;
        Ok(session.view())
    }

    /// Validates the current profile, then takes the in-flight slot and a
    /// snapshot of the profile and clears the previous error.
    ///
    /// An incomplete profile fails with `MissingFields` (recorded as the
    /// session's error) without touching the slot; only a complete profile can
    /// fail with `Busy`.
    pub async fn begin_submission(
        &self,
        id: Uuid,
    ) -> Result<(StudentProfile, InFlightToken), AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.touch();
        if let ValidationOutcome::Invalid(fields) = validate(&session.profile) {
            let err = AppError::MissingFields(fields);
            session.last_error = Some(err.user_message());
            return Err(err);
        }
        let token = session.in_flight.try_acquire().ok_or(AppError::Busy)?;
        session.last_error = None;
        Ok((session.profile.clone(), token))
    }

    /// Stores the outcome of a submission. A session deleted mid-request is ignored.
    pub async fn record_outcome(
        &self,
        id: Uuid,
        outcome: &Result<GuidanceReport, GenerationFailure>,
    ) {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(&id) {
            session.touch();
            match outcome {
                Ok(report) => {
                    session.report = Some(report.clone());
                    session.last_error = None;
                }
                Err(failure) => {
                    session.last_error = Some(failure.message().to_string());
                }
            }
        }
    }

    /// Discards the report, the error and the profile; the session starts over.
    /// Refused with `Busy` while a request is outstanding, since its outcome
    /// would land on the fresh session.
    pub async fn reset(&self, id: Uuid) -> Result<SessionView, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        if session.in_flight.is_busy() {
            return Err(AppError::Busy);
        }
        session.touch();
        session.profile = StudentProfile::default();
        session.report = None;
        session.last_error = None;
        Ok(session.view())
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                info!("Deleted session {id}");
                Ok(())
            }
            None => Err(not_found(id)),
        }
    }

    /// Evicts every session idle for longer than the store's TTL.
    pub async fn sweep_expired(&self) -> usize {
        let evicted = evict_idle(&mut *self.sessions.write().await, self.idle_ttl);
        if evicted > 0 {
            info!("Evicted {evicted} idle session(s)");
        }
        evicted
    }

    pub async fn active_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Background task: sweeps `store` every `SWEEP_INTERVAL` until the process exits.
pub async fn run_sweeper(store: Arc<SessionStore>) {
    let mut tick = tokio::time::interval(SWEEP_INTERVAL);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tick.tick().await;
        store.sweep_expired().await;
    }
}
