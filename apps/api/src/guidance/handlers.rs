//! Axum route handlers for the stateless Guidance API.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::guidance::requester::{generate_guidance, GuidanceReport};
use crate::profile::image::{check_inline_image, MAX_IMAGE_BYTES};
use crate::profile::models::{
    AcademicLevel, BudgetBand, CollegeType, LearningStyle, Stream, StudentProfile,
};
use crate::profile::validation::{validate, ValidationOutcome};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub levels: Vec<&'static str>,
    pub senior_levels: Vec<&'static str>,
    pub streams: Vec<&'static str>,
    pub learning_styles: Vec<&'static str>,
    pub college_types: Vec<&'static str>,
    /// Index in this list is the budget slider position.
    pub budget_bands: Vec<&'static str>,
    pub max_image_bytes: usize,
}

/// GET /api/v1/options
///
/// The fixed option sets a client needs to render the profile form.
pub async fn handle_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        levels: AcademicLevel::ALL.iter().map(|l| l.label()).collect(),
        senior_levels: AcademicLevel::ALL
            .iter()
            .filter(|l| l.is_senior())
            .map(|l| l.label())
            .collect(),
        streams: Stream::ALL.iter().map(|s| s.label()).collect(),
        learning_styles: LearningStyle::ALL.iter().map(|s| s.label()).collect(),
        college_types: CollegeType::ALL.iter().map(|c| c.label()).collect(),
        budget_bands: BudgetBand::ALL.iter().map(|b| b.label()).collect(),
        max_image_bytes: MAX_IMAGE_BYTES,
    })
}

/// POST /api/v1/guidance
///
/// One-shot generation from a complete profile (image, if any, as a data URL).
/// No session is created and nothing is kept.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(profile): Json<StudentProfile>,
) -> Result<Json<GuidanceReport>, AppError> {
    if let ValidationOutcome::Invalid(fields) = validate(&profile) {
        return Err(AppError::MissingFields(fields));
    }
    if let Some(image) = &profile.academic_result_image {
        check_inline_image(image)?;
    }

    let report = generate_guidance(state.model.as_ref(), profile).await?;
    Ok(Json(report))
}
