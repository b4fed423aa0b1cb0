use serde::{Deserialize, Serialize};

use crate::profile::models::StudentProfile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissingField {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<MissingField>),
}

impl ValidationOutcome {
    #[cfg(test)]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn missing(field: &str, reason: &str) -> MissingField {
    MissingField {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

/// Checks every required field and reports all gaps at once.
///
/// Required:
/// - name, interests, strengths: non-blank
/// - stream: only at senior levels (Class 12, Undergraduate)
/// - academicResults: non-blank unless a marksheet image is attached
///
/// Learning style is a typed field with a default and is always present.
pub fn validate(profile: &StudentProfile) -> ValidationOutcome {
    let mut gaps = Vec::new();

    if is_blank(&profile.name) {
        gaps.push(missing("name", "Full name is required"));
    }
    if profile.level.is_senior() && profile.stream.is_none() {
        gaps.push(missing(
            "stream",
            "Current stream is required for Class 12 and Undergraduate students",
        ));
    }
    if is_blank(&profile.interests) {
        gaps.push(missing("interests", "Interests & hobbies are required"));
    }
    if is_blank(&profile.strengths) {
        gaps.push(missing("strengths", "Strengths are required"));
    }
    if is_blank(&profile.academic_results) && !profile.has_image() {
        gaps.push(missing(
            "academicResults",
            "Enter academic results or upload a photo of the marksheet",
        ));
    }

    if gaps.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid(gaps)
    }
}
