//! Turns a `StudentProfile` into a `generateContent` request.

use crate::guidance::prompts::{
    GUIDANCE_SYSTEM, GUIDANCE_TEMPERATURE, NOT_APPLICABLE, NOT_PROVIDED,
    PROFILE_PROMPT_TEMPLATE, RESULTS_NOT_PROVIDED,
};
use crate::llm_client::{GenerateContentRequest, InlineData, Part};
use crate::profile::models::StudentProfile;

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder
    } else {
        trimmed
    }
}

/// Single-pass `{key}` substitution. Substituted values are never re-scanned,
/// so user text containing braces is copied through verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Renders the profile block. Absent optional fields become explicit placeholders;
/// the stream is "Not Applicable" whenever the level has no streams, regardless
/// of what the record still holds.
pub fn render_profile_text(profile: &StudentProfile) -> String {
    let stream = profile
        .effective_stream()
        .map(|s| s.label())
        .unwrap_or(NOT_APPLICABLE);
    let college_type = profile
        .college_type
        .map(|c| c.label())
        .unwrap_or(NOT_PROVIDED);

    fill_template(
        PROFILE_PROMPT_TEMPLATE,
        &[
            ("name", profile.name.trim()),
            ("level", profile.level.label()),
            ("stream", stream),
            ("interests", profile.interests.trim()),
            ("strengths", profile.strengths.trim()),
            (
                "limitations",
                or_placeholder(&profile.limitations, NOT_PROVIDED),
            ),
            (
                "academic_results",
                or_placeholder(&profile.academic_results, RESULTS_NOT_PROVIDED),
            ),
            ("budget_range", profile.budget_range.label()),
            ("location", or_placeholder(&profile.location, NOT_PROVIDED)),
            ("college_type", college_type),
            ("learning_style", profile.learning_style.label()),
        ],
    )
}

/// Builds the full request: one text part, plus one inline image part when a
/// marksheet is attached.
pub fn build_request(profile: &StudentProfile) -> GenerateContentRequest {
    let mut parts = vec![Part::Text {
        text: render_profile_text(profile),
    }];

    if let Some(image) = &profile.academic_result_image {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type().to_string(),
                data: image.payload().to_string(),
            },
        });
    }

    GenerateContentRequest::user(parts, GUIDANCE_SYSTEM, GUIDANCE_TEMPERATURE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::{
        AcademicLevel, BudgetBand, CollegeType, DataUrl, LearningStyle, Stream,
    };
    use crate::profile::update::{apply, ProfileUpdate};

    fn sample_profile() -> StudentProfile {
        StudentProfile {
            name: "Rahul Sharma".into(),
            level: AcademicLevel::Class12,
            stream: Some(Stream::SciencePcm),
            interests: "Video editing, puzzles".into(),
            strengths: "Good communication".into(),
            limitations: "Fear of public speaking".into(),
            academic_results: "Maths: 85/100".into(),
            academic_result_image: None,
            budget_range: BudgetBand::ThreeToSixLakhs,
            location: "Bangalore".into(),
            college_type: Some(CollegeType::Government),
            learning_style: LearningStyle::Practical,
        }
    }

    #[test]
    fn test_render_embeds_every_field() {
        let text = render_profile_text(&sample_profile());
        assert!(text.contains("Name: Rahul Sharma"));
        assert!(text.contains("Academic Level: Class 12"));
        assert!(text.contains("Stream: Science (PCM)"));
        assert!(text.contains("Interests: Video editing, puzzles"));
        assert!(text.contains("Strengths: Good communication"));
        assert!(text.contains("Limitations/Weaknesses: Fear of public speaking"));
        assert!(text.contains("Academic Results (Text Input): Maths: 85/100"));
        assert!(text.contains("Annual Education Budget: ₹3 - 6 Lakhs / Year"));
        assert!(text.contains("Preferred Location: Bangalore"));
        assert!(text.contains("Preferred College Type: Government / Public"));
        assert!(text.contains("Learning Style: Practical / Hands-on"));
        assert!(!text.contains('{'));
    }

    #[test]
    fn test_render_placeholders_for_absent_fields() {
        let profile = StudentProfile {
            limitations: String::new(),
            academic_results: "  ".into(),
            location: String::new(),
            college_type: None,
            ..sample_profile()
        };
        let text = render_profile_text(&profile);
        assert!(text.contains("Limitations/Weaknesses: Not provided"));
        assert!(text.contains("Academic Results (Text Input): Not provided in text."));
        assert!(text.contains("Preferred Location: Not provided"));
        assert!(text.contains("Preferred College Type: Not provided"));
    }

    #[test]
    fn test_stream_not_applicable_after_level_change() {
        for level in [AcademicLevel::Class10, AcademicLevel::Diploma] {
            let profile = apply(sample_profile(), ProfileUpdate::Level(level)).unwrap();
            assert_eq!(profile.stream, Some(Stream::SciencePcm));
            let text = render_profile_text(&profile);
            assert!(text.contains("Stream: Not Applicable"));
            assert!(!text.contains("Science (PCM)"));
        }
    }

    #[test]
    fn test_senior_level_without_stream_is_not_applicable() {
        let profile = StudentProfile {
            level: AcademicLevel::UndergraduateEarly,
            stream: None,
            ..sample_profile()
        };
        assert!(render_profile_text(&profile).contains("Stream: Not Applicable"));
    }

    #[test]
    fn test_user_braces_are_not_expanded() {
        let profile = StudentProfile {
            interests: "{stream} and {name}".into(),
            ..sample_profile()
        };
        let text = render_profile_text(&profile);
        assert!(text.contains("Interests: {stream} and {name}"));
    }

    #[test]
    fn test_fill_template_keeps_unknown_keys() {
        assert_eq!(fill_template("a {x} {y} {", &[("x", "1")]), "a 1 {y} {");
    }

    #[test]
    fn test_request_without_image_has_single_text_part() {
        let request = build_request(&sample_profile());
        assert_eq!(request.text_part_count(), 1);
        assert_eq!(request.image_part_count(), 0);
        assert_eq!(request.generation_config.temperature, GUIDANCE_TEMPERATURE);
        assert_eq!(
            request.system_instruction.parts,
            vec![Part::Text {
                text: GUIDANCE_SYSTEM.to_string()
            }]
        );
    }

    #[test]
    fn test_request_with_image_has_text_and_image_parts() {
        let profile = StudentProfile {
            academic_result_image: Some(DataUrl::from_bytes("image/jpeg", b"marksheet")),
            ..sample_profile()
        };
        let request = build_request(&profile);
        assert_eq!(request.text_part_count(), 1);
        assert_eq!(request.image_part_count(), 1);

        match &request.contents[0].parts[1] {
            Part::InlineData { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/jpeg");
                assert_eq!(inline_data.data, "bWFya3NoZWV0");
            }
            other => panic!("expected inline data, got {other:?}"),
        }
    }
}
