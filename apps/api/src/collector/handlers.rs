use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::BytesMut;
use uuid::Uuid;

use crate::collector::session::SessionView;
use crate::collector::submit::submit;
use crate::errors::AppError;
use crate::guidance::requester::GuidanceReport;
use crate::profile::image::{attach_image, remove_image, ImageUpload, MAX_IMAGE_BYTES};
use crate::profile::update::{apply, ProfileUpdate};
use crate::state::AppState;

/// Multipart part name carrying the marksheet image.
const IMAGE_FIELD: &str = "file";

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    Ok((StatusCode::CREATED, Json(state.sessions.create().await?)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.view(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/sessions/:id/profile
///
/// Body: `{ "field": "<name>", "value": <new value> }`.
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<SessionView>, AppError> {
    let field = update.field_name();
    let view = state
        .sessions
        .update_profile(id, |profile| apply(profile, update))
        .await?;
    tracing::debug!("Session {id}: updated {field}");
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/image
///
/// Multipart upload; the image is read from the `file` part.
pub async fn handle_attach_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    let upload = read_image_upload(multipart).await?;
    let view = state
        .sessions
        .update_profile(id, |profile| attach_image(profile, upload))
        .await?;
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id/image
pub async fn handle_remove_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .update_profile(id, |profile| Ok(remove_image(profile)))
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:id/submit
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GuidanceReport>, AppError> {
    let report = submit(&state.sessions, state.model.as_ref(), id).await?;
    Ok(Json(report))
}

/// POST /api/v1/sessions/:id/reset
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    Ok(Json(state.sessions.reset(id).await?))
}

/// Pulls the `file` part out of a multipart body.
///
/// The part is read chunk by chunk and abandoned as soon as it passes
/// `MAX_IMAGE_BYTES`, so oversized files never sit in memory in full.
async fn read_image_upload(mut multipart: Multipart) -> Result<ImageUpload, AppError> {
    while let Some(mut field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let mut bytes = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(upload_error)? {
            bytes.extend_from_slice(&chunk);
            if bytes.len() > MAX_IMAGE_BYTES {
                return Err(AppError::FileTooLarge {
                    size: bytes.len(),
                    limit: MAX_IMAGE_BYTES,
                });
            }
        }
        return Ok(ImageUpload {
            content_type,
            bytes: bytes.freeze(),
        });
    }

    Err(AppError::Validation(format!(
        "multipart body has no '{IMAGE_FIELD}' part"
    )))
}

/// A body cut off by the request size limit is an oversized file; any other
/// stream error is a decode failure.
fn upload_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge {
            size: MAX_IMAGE_BYTES + 1,
            limit: MAX_IMAGE_BYTES,
        }
    } else {
        AppError::DecodeFailure(err.body_text())
    }
}
