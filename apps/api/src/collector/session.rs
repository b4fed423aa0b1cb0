use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

use crate::guidance::requester::GuidanceReport;
use crate::profile::models::StudentProfile;

/// Single-slot guard for the outstanding guidance request of one session.
///
/// At most one `InFlightToken` exists per slot. A second `try_acquire` while a
/// token is alive returns `None`; the slot frees itself when the token drops,
/// including when the request future is cancelled mid-call.
#[derive(Debug, Clone, Default)]
pub struct InFlightSlot {
    busy: Arc<AtomicBool>,
}

#[derive(Debug)]
pub struct InFlightToken {
    busy: Arc<AtomicBool>,
}

impl InFlightSlot {
    pub fn try_acquire(&self) -> Option<InFlightToken> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightToken {
                busy: self.busy.clone(),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlightToken {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// One user's form session: exactly one profile, plus the outcome of the
/// last submission.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub profile: StudentProfile,
    pub report: Option<GuidanceReport>,
    pub last_error: Option<String>,
    pub in_flight: InFlightSlot,
    /// Last create, edit or submission; drives idle eviction.
    pub last_active: Instant,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            profile: StudentProfile::default(),
            report: None,
            last_error: None,
            in_flight: InFlightSlot::default(),
            last_active: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            id: self.id,
            created_at: self.created_at,
            profile: self.profile.clone(),
            budget_index: self.profile.budget_range.index(),
            loading: self.in_flight.is_busy(),
            report: self.report.clone(),
            error: self.last_error.clone(),
        }
    }
}

/// What clients see of a session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub profile: StudentProfile,
    pub budget_index: usize,
    pub loading: bool,
    pub report: Option<GuidanceReport>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_allows_single_token() {
        let slot = InFlightSlot::default();
        let token = slot.try_acquire().unwrap();
        assert!(slot.is_busy());
        assert!(slot.try_acquire().is_none());
        drop(token);
        assert!(!slot.is_busy());
        assert!(slot.try_acquire().is_some());
    }

    #[test]
    fn test_cloned_slot_shares_state() {
        let slot = InFlightSlot::default();
        let clone = slot.clone();
        let _token = slot.try_acquire().unwrap();
        assert!(clone.is_busy());
        assert!(clone.try_acquire().is_none());
    }

    #[test]
    fn test_new_session_view() {
        let session = Session::new();
        let view = session.view();
        assert_eq!(view.id, session.id);
        assert_eq!(view.budget_index, 1);
        assert!(!view.loading);
        assert!(view.report.is_none());
        assert!(view.error.is_none());
    }
}
