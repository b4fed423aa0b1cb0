//! Guidance Requester — profile in, markdown report out.
//!
//! Flow: build_request → model.generate → fallback on empty text → GuidanceReport.
//! Any model error collapses into a single user-facing `GenerationFailure`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::guidance::prompts::EMPTY_RESPONSE_FALLBACK;
use crate::guidance::request::build_request;
use crate::llm_client::GenerativeModel;
use crate::profile::models::StudentProfile;

const GENERATION_FAILURE_MESSAGE: &str = "Failed to generate career guidance. Please try again.";

#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct GenerationFailure {
    message: String,
}

impl GenerationFailure {
    pub fn new() -> Self {
        Self {
            message: GENERATION_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for GenerationFailure {
    fn default() -> Self {
        Self::new()
    }
}

/// The model's markdown, returned verbatim. No structural validation is applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceReport {
    pub markdown: String,
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub used_image: bool,
}

/// Generates a career-guidance report for a profile snapshot. One attempt, no retry.
pub async fn generate_guidance(
    model: &dyn GenerativeModel,
    profile: StudentProfile,
) -> Result<GuidanceReport, GenerationFailure> {
    let request = build_request(&profile);
    let used_image = request.image_part_count() > 0;

    info!(
        "Requesting guidance from {} (image attached: {})",
        model.model_name(),
        used_image
    );

    let text = model.generate(&request).await.map_err(|e| {
        error!("Error generating guidance: {e}");
        GenerationFailure::new()
    })?;

    let markdown = if text.trim().is_empty() {
        EMPTY_RESPONSE_FALLBACK.to_string()
    } else {
        text
    };

    Ok(GuidanceReport {
        markdown,
        generated_at: Utc::now(),
        model: model.model_name().to_string(),
        used_image,
    })
}
