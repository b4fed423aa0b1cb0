pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};

use crate::collector::handlers;
use crate::guidance::handlers as guidance;
use crate::profile::image::MAX_IMAGE_BYTES;
use crate::state::AppState;

/// Headroom for multipart framing. The upload handler stops reading once the
/// file passes `MAX_IMAGE_BYTES`, and a body cut off here is reported as
/// FILE_TOO_LARGE as well.
const UPLOAD_BODY_LIMIT: usize = MAX_IMAGE_BYTES + 1024 * 1024;
/// A full profile with an inline data URL (base64 adds a third).
const PROFILE_BODY_LIMIT: usize = MAX_IMAGE_BYTES / 3 * 4 + 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/options", get(guidance::handle_options))
        // Stateless guidance
        .route(
            "/api/v1/guidance",
            post(guidance::handle_generate).layer(DefaultBodyLimit::max(PROFILE_BODY_LIMIT)),
        )
        // Profile Collector sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/profile",
            patch(handlers::handle_update_field),
        )
        .route(
            "/api/v1/sessions/:id/image",
            post(handlers::handle_attach_image)
                .delete(handlers::handle_remove_image)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/v1/sessions/:id/submit", post(handlers::handle_submit))
        .route("/api/v1/sessions/:id/reset", post(handlers::handle_reset))
        .with_state(state)
}
