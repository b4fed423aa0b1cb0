//! Profile submission: validate → claim the in-flight slot → generate → record.

use tracing::{info, warn};
use uuid::Uuid;

use crate::collector::store::SessionStore;
use crate::errors::AppError;
use crate::guidance::requester::{generate_guidance, GuidanceReport};
use crate::llm_client::GenerativeModel;

/// Submits the session's current profile for guidance.
///
/// Validation runs on the same snapshot that is sent, and before the in-flight
/// slot is claimed, so an incomplete profile is reported as such even while
/// another request is outstanding. Edits made while the request is outstanding
/// do not affect it. The in-flight token is held until the outcome is recorded.
pub async fn submit(
    store: &SessionStore,
    model: &dyn GenerativeModel,
    id: Uuid,
) -> Result<GuidanceReport, AppError> {
    let (profile, token) = store.begin_submission(id).await.map_err(|e| {
        match &e {
            AppError::MissingFields(fields) => warn!(
                "Rejected submission for session {id}: {} missing field(s)",
                fields.len()
            ),
            AppError::Busy => {
                warn!("Rejected submission for session {id}: request already in flight")
            }
            _ => {}
        }
        e
    })?;

    info!("Submitting profile for session {id}");
    let outcome = generate_guidance(model, profile).await;
    store.record_outcome(id, &outcome).await;
    drop(token);

    Ok(outcome?)
}
