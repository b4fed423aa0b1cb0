use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Fixed option sets
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AcademicLevel {
    #[default]
    #[serde(rename = "Class 10")]
    Class10,
    #[serde(rename = "Class 12")]
    Class12,
    #[serde(rename = "Diploma")]
    Diploma,
    #[serde(rename = "Undergraduate (Early)")]
    UndergraduateEarly,
}

impl AcademicLevel {
    pub const ALL: [AcademicLevel; 4] = [
        AcademicLevel::Class10,
        AcademicLevel::Class12,
        AcademicLevel::Diploma,
        AcademicLevel::UndergraduateEarly,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AcademicLevel::Class10 => "Class 10",
            AcademicLevel::Class12 => "Class 12",
            AcademicLevel::Diploma => "Diploma",
            AcademicLevel::UndergraduateEarly => "Undergraduate (Early)",
        }
    }

    /// Senior tracks are the only levels where an academic stream applies.
    pub fn is_senior(self) -> bool {
        matches!(
            self,
            AcademicLevel::Class12 | AcademicLevel::UndergraduateEarly
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stream {
    #[serde(rename = "Science (PCM)")]
    SciencePcm,
    #[serde(rename = "Science (PCB)")]
    SciencePcb,
    #[serde(rename = "Science (PCMB)")]
    SciencePcmb,
    #[serde(rename = "Commerce (With Maths)")]
    CommerceWithMaths,
    #[serde(rename = "Commerce (Without Maths)")]
    CommerceWithoutMaths,
    #[serde(rename = "Arts / Humanities")]
    ArtsHumanities,
    #[serde(rename = "Vocational")]
    Vocational,
}

impl Stream {
    pub const ALL: [Stream; 7] = [
        Stream::SciencePcm,
        Stream::SciencePcb,
        Stream::SciencePcmb,
        Stream::CommerceWithMaths,
        Stream::CommerceWithoutMaths,
        Stream::ArtsHumanities,
        Stream::Vocational,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stream::SciencePcm => "Science (PCM)",
            Stream::SciencePcb => "Science (PCB)",
            Stream::SciencePcmb => "Science (PCMB)",
            Stream::CommerceWithMaths => "Commerce (With Maths)",
            Stream::CommerceWithoutMaths => "Commerce (Without Maths)",
            Stream::ArtsHumanities => "Arts / Humanities",
            Stream::Vocational => "Vocational",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LearningStyle {
    #[serde(rename = "Theoretical / Academic")]
    Theoretical,
    #[serde(rename = "Practical / Hands-on")]
    Practical,
    #[default]
    #[serde(rename = "Mixed")]
    Mixed,
}

impl LearningStyle {
    pub const ALL: [LearningStyle; 3] = [
        LearningStyle::Theoretical,
        LearningStyle::Practical,
        LearningStyle::Mixed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LearningStyle::Theoretical => "Theoretical / Academic",
            LearningStyle::Practical => "Practical / Hands-on",
            LearningStyle::Mixed => "Mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollegeType {
    #[serde(rename = "Government / Public")]
    Government,
    #[serde(rename = "Private")]
    Private,
    #[serde(rename = "Distance / Open")]
    DistanceOpen,
    #[serde(rename = "Online / Hybrid")]
    OnlineHybrid,
    #[serde(rename = "Any")]
    Any,
}

impl CollegeType {
    pub const ALL: [CollegeType; 5] = [
        CollegeType::Government,
        CollegeType::Private,
        CollegeType::DistanceOpen,
        CollegeType::OnlineHybrid,
        CollegeType::Any,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CollegeType::Government => "Government / Public",
            CollegeType::Private => "Private",
            CollegeType::DistanceOpen => "Distance / Open",
            CollegeType::OnlineHybrid => "Online / Hybrid",
            CollegeType::Any => "Any",
        }
    }
}

/// Annual education budget, selected on the form by a 0–4 slider index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum BudgetBand {
    #[serde(rename = "< ₹1 Lakh / Year")]
    UnderOneLakh,
    #[default]
    #[serde(rename = "₹1 - 3 Lakhs / Year")]
    OneToThreeLakhs,
    #[serde(rename = "₹3 - 6 Lakhs / Year")]
    ThreeToSixLakhs,
    #[serde(rename = "₹6 - 10 Lakhs / Year")]
    SixToTenLakhs,
    #[serde(rename = "> ₹10 Lakhs / Year")]
    OverTenLakhs,
}

impl BudgetBand {
    /// Ordered band table; position in this array is the slider index.
    pub const ALL: [BudgetBand; 5] = [
        BudgetBand::UnderOneLakh,
        BudgetBand::OneToThreeLakhs,
        BudgetBand::ThreeToSixLakhs,
        BudgetBand::SixToTenLakhs,
        BudgetBand::OverTenLakhs,
    ];

    pub fn from_index(index: usize) -> Option<BudgetBand> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            BudgetBand::UnderOneLakh => "< ₹1 Lakh / Year",
            BudgetBand::OneToThreeLakhs => "₹1 - 3 Lakhs / Year",
            BudgetBand::ThreeToSixLakhs => "₹3 - 6 Lakhs / Year",
            BudgetBand::SixToTenLakhs => "₹6 - 10 Lakhs / Year",
            BudgetBand::OverTenLakhs => "> ₹10 Lakhs / Year",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Data URL
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum DataUrlError {
    #[error("data URL must start with 'data:'")]
    MissingScheme,
    #[error("data URL must be base64 encoded")]
    NotBase64,
    #[error("data URL has no MIME type")]
    MissingMimeType,
    #[error("data URL payload is not valid base64")]
    InvalidPayload,
}

/// `data:<mime>;base64,<payload>` — the inline encoding of the marksheet image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUrl {
    raw: String,
    // byte offset of the payload inside `raw`
    payload_start: usize,
}

impl DataUrl {
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        let prefix = format!("data:{mime_type};base64,");
        let payload_start = prefix.len();
        let raw = prefix + &STANDARD.encode(bytes);
        Self { raw, payload_start }
    }

    pub fn parse(value: &str) -> Result<Self, DataUrlError> {
        let rest = value
            .strip_prefix("data:")
            .ok_or(DataUrlError::MissingScheme)?;
        let (mime, payload) = rest.split_once(";base64,").ok_or(DataUrlError::NotBase64)?;
        if mime.trim().is_empty() {
            return Err(DataUrlError::MissingMimeType);
        }
        STANDARD
            .decode(payload)
            .map_err(|_| DataUrlError::InvalidPayload)?;

        Ok(Self {
            raw: value.to_string(),
            payload_start: value.len() - payload.len(),
        })
    }

    pub fn mime_type(&self) -> &str {
        let header = &self.raw["data:".len()..self.payload_start];
        header.strip_suffix(";base64,").unwrap_or(header)
    }

    /// Base64 payload without the header.
    pub fn payload(&self) -> &str {
        &self.raw[self.payload_start..]
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_image(&self) -> bool {
        crate::profile::image::image_mime(self.mime_type()).is_some()
    }

    /// Size of the decoded payload in bytes.
    pub fn decoded_len(&self) -> usize {
        let payload = self.payload();
        let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
        (payload.len() / 4 * 3).saturating_sub(padding)
    }
}

impl TryFrom<String> for DataUrl {
    type Error = DataUrlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        DataUrl::parse(&value)
    }
}

impl From<DataUrl> for String {
    fn from(url: DataUrl) -> Self {
        url.raw
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Student profile
// ────────────────────────────────────────────────────────────────────────────

/// The full profile submitted for analysis. Treated as a value: updates go
/// through `profile::update::apply`, which returns a new profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentProfile {
    pub name: String,
    pub level: AcademicLevel,
    pub stream: Option<Stream>,
    pub interests: String,
    pub strengths: String,
    pub limitations: String,
    pub academic_results: String,
    pub academic_result_image: Option<DataUrl>,
    pub budget_range: BudgetBand,
    pub location: String,
    pub college_type: Option<CollegeType>,
    pub learning_style: LearningStyle,
}

impl StudentProfile {
    /// The stream that actually applies at the current level.
    pub fn effective_stream(&self) -> Option<Stream> {
        if self.level.is_senior() {
            self.stream
        } else {
            None
        }
    }

    pub fn has_image(&self) -> bool {
        self.academic_result_image.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_band_from_index_covers_all_bands() {
        for (i, band) in BudgetBand::ALL.iter().enumerate() {
            assert_eq!(BudgetBand::from_index(i), Some(*band));
            assert_eq!(band.index(), i);
        }
        assert_eq!(BudgetBand::from_index(5), None);
    }

    #[test]
    fn test_budget_band_labels_are_ordered() {
        assert_eq!(BudgetBand::from_index(0).unwrap().label(), "< ₹1 Lakh / Year");
        assert_eq!(BudgetBand::from_index(4).unwrap().label(), "> ₹10 Lakhs / Year");
    }

    #[test]
    fn test_default_profile_matches_form_defaults() {
        let p = StudentProfile::default();
        assert_eq!(p.level, AcademicLevel::Class10);
        assert_eq!(p.budget_range, BudgetBand::OneToThreeLakhs);
        assert_eq!(p.learning_style, LearningStyle::Mixed);
        assert!(p.academic_result_image.is_none());
    }

    #[test]
    fn test_senior_levels() {
        assert!(AcademicLevel::Class12.is_senior());
        assert!(AcademicLevel::UndergraduateEarly.is_senior());
        assert!(!AcademicLevel::Class10.is_senior());
        assert!(!AcademicLevel::Diploma.is_senior());
    }

    #[test]
    fn test_effective_stream_masked_below_senior_level() {
        let p = StudentProfile {
            level: AcademicLevel::Diploma,
            stream: Some(Stream::SciencePcm),
            ..Default::default()
        };
        assert_eq!(p.effective_stream(), None);
    }

    #[test]
    fn test_data_url_from_bytes() {
        let url = DataUrl::from_bytes("image/png", b"hello");
        assert_eq!(url.as_str(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(url.mime_type(), "image/png");
        assert_eq!(url.payload(), "aGVsbG8=");
        assert_eq!(url.decoded_len(), 5);
    }

    #[test]
    fn test_data_url_decoded_len_without_padding() {
        assert_eq!(DataUrl::from_bytes("image/png", b"abc").decoded_len(), 3);
        assert_eq!(DataUrl::from_bytes("image/png", b"").decoded_len(), 0);
    }

    #[test]
    fn test_data_url_parse_valid() {
        let url = DataUrl::parse("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(url.mime_type(), "image/jpeg");
        assert_eq!(url.payload(), "aGVsbG8=");
    }

    #[test]
    fn test_data_url_is_image() {
        assert!(DataUrl::from_bytes("image/jpeg", b"x").is_image());
        let pdf = DataUrl::parse("data:application/pdf;base64,aGVsbG8=").unwrap();
        assert!(!pdf.is_image());
    }

    #[test]
    fn test_data_url_parse_rejects_malformed() {
        assert_eq!(
            DataUrl::parse("image/png;base64,aGVsbG8="),
            Err(DataUrlError::MissingScheme)
        );
        assert_eq!(
            DataUrl::parse("data:image/png,hello"),
            Err(DataUrlError::NotBase64)
        );
        assert_eq!(
            DataUrl::parse("data:;base64,aGVsbG8="),
            Err(DataUrlError::MissingMimeType)
        );
        assert_eq!(
            DataUrl::parse("data:image/png;base64,@@@"),
            Err(DataUrlError::InvalidPayload)
        );
    }

    #[test]
    fn test_profile_deserializes_wire_labels() {
        let json = serde_json::json!({
            "name": "Rahul Sharma",
            "level": "Class 12",
            "stream": "Science (PCM)",
            "interests": "Electronics",
            "strengths": "Logic",
            "budgetRange": "₹3 - 6 Lakhs / Year",
            "collegeType": "Government / Public",
            "learningStyle": "Practical / Hands-on",
            "academicResultImage": "data:image/png;base64,aGVsbG8="
        });
        let p: StudentProfile = serde_json::from_value(json).unwrap();
        assert_eq!(p.level, AcademicLevel::Class12);
        assert_eq!(p.stream, Some(Stream::SciencePcm));
        assert_eq!(p.budget_range, BudgetBand::ThreeToSixLakhs);
        assert_eq!(p.college_type, Some(CollegeType::Government));
        assert_eq!(p.learning_style, LearningStyle::Practical);
        assert_eq!(p.academic_result_image.unwrap().mime_type(), "image/png");
    }

    #[test]
    fn test_profile_rejects_bad_data_url() {
        let json = serde_json::json!({
            "name": "A",
            "level": "Class 10",
            "interests": "x",
            "strengths": "y",
            "academicResultImage": "not-a-data-url"
        });
        assert!(serde_json::from_value::<StudentProfile>(json).is_err());
    }
}
