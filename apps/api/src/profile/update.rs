//! Field-level profile updates.
//!
//! Each update consumes the current profile and returns the next one. Nothing
//! here touches session state; the collector decides where the result lives.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::profile::models::{
    AcademicLevel, BudgetBand, CollegeType, LearningStyle, Stream, StudentProfile,
};

/// One editable field and its new value.
///
/// Wire shape: `{ "field": "budgetIndex", "value": 3 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ProfileUpdate {
    Name(String),
    Level(AcademicLevel),
    Stream(Option<Stream>),
    Interests(String),
    Strengths(String),
    Limitations(String),
    AcademicResults(String),
    /// Slider position 0–4, mapped through `BudgetBand::from_index`.
    BudgetIndex(usize),
    Location(String),
    CollegeType(Option<CollegeType>),
    LearningStyle(LearningStyle),
}

impl ProfileUpdate {
    pub fn field_name(&self) -> &'static str {
        match self {
            ProfileUpdate::Name(_) => "name",
            ProfileUpdate::Level(_) => "level",
            ProfileUpdate::Stream(_) => "stream",
            ProfileUpdate::Interests(_) => "interests",
            ProfileUpdate::Strengths(_) => "strengths",
            ProfileUpdate::Limitations(_) => "limitations",
            ProfileUpdate::AcademicResults(_) => "academicResults",
            ProfileUpdate::BudgetIndex(_) => "budgetRange",
            ProfileUpdate::Location(_) => "location",
            ProfileUpdate::CollegeType(_) => "collegeType",
            ProfileUpdate::LearningStyle(_) => "learningStyle",
        }
    }
}

/// Applies a single update. On error the caller keeps its original profile.
///
/// Changing `level` leaves `stream` untouched; the prompt renderer masks it
/// for levels without streams, so switching back to a senior level restores it.
pub fn apply(profile: StudentProfile, update: ProfileUpdate) -> Result<StudentProfile, AppError> {
    let next = match update {
        ProfileUpdate::Name(name) => StudentProfile { name, ..profile },
        ProfileUpdate::Level(level) => StudentProfile { level, ..profile },
        ProfileUpdate::Stream(stream) => StudentProfile { stream, ..profile },
        ProfileUpdate::Interests(interests) => StudentProfile {
            interests,
            ..profile
        },
        ProfileUpdate::Strengths(strengths) => StudentProfile {
            strengths,
            ..profile
        },
        ProfileUpdate::Limitations(limitations) => StudentProfile {
            limitations,
            ..profile
        },
        ProfileUpdate::AcademicResults(academic_results) => StudentProfile {
            academic_results,
            ..profile
        },
        ProfileUpdate::BudgetIndex(index) => {
            let budget_range = BudgetBand::from_index(index).ok_or_else(|| {
                AppError::Validation(format!(
                    "budgetIndex must be between 0 and {}, got {index}",
                    BudgetBand::ALL.len() - 1
                ))
            })?;
            StudentProfile {
                budget_range,
                ..profile
            }
        }
        ProfileUpdate::Location(location) => StudentProfile { location, ..profile },
        ProfileUpdate::CollegeType(college_type) => StudentProfile {
            college_type,
            ..profile
        },
        ProfileUpdate::LearningStyle(learning_style) => StudentProfile {
            learning_style,
            ..profile
        },
    };
    Ok(next)
}
