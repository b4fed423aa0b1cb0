//! Marksheet image attachment.

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;
use crate::profile::models::{DataUrl, StudentProfile};

/// Hard ceiling on the source file, checked before encoding.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A raw upload as received from the client.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Encodes the upload as a data URL and stores it on the profile, replacing
/// any earlier image. The profile is only returned modified on success.
pub fn attach_image(
    profile: StudentProfile,
    upload: ImageUpload,
) -> Result<StudentProfile, AppError> {
    if upload.bytes.len() > MAX_IMAGE_BYTES {
        return Err(AppError::FileTooLarge {
            size: upload.bytes.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }

    let mime_type = upload
        .content_type
        .as_deref()
        .and_then(image_mime)
        .ok_or_else(not_an_image)?;

    if upload.bytes.is_empty() {
        return Err(AppError::DecodeFailure("uploaded file is empty".to_string()));
    }

    let data_url = DataUrl::from_bytes(mime_type, &upload.bytes);
    debug!(
        "Attached {} byte image ({}) to profile",
        upload.bytes.len(),
        mime_type
    );

    Ok(StudentProfile {
        academic_result_image: Some(data_url),
        ..profile
    })
}

/// Checks an image that arrived already encoded, as in the stateless request:
/// same size ceiling and MIME rule as an upload.
pub fn check_inline_image(image: &DataUrl) -> Result<(), AppError> {
    let size = image.decoded_len();
    if size > MAX_IMAGE_BYTES {
        return Err(AppError::FileTooLarge {
            size,
            limit: MAX_IMAGE_BYTES,
        });
    }
    if !image.is_image() {
        return Err(not_an_image());
    }
    Ok(())
}

/// The bare `image/<subtype>` of a content type, parameters stripped.
/// `None` when the type is not an image.
pub fn image_mime(content_type: &str) -> Option<&str> {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    let subtype = mime.strip_prefix("image/")?;
    (!subtype.is_empty()).then_some(mime)
}

fn not_an_image() -> AppError {
    AppError::Validation("Only image files can be attached".to_string())
}

/// Clears the stored image. Calling it on a profile without an image is a no-op.
pub fn remove_image(profile: StudentProfile) -> StudentProfile {
    StudentProfile {
        academic_result_image: None,
        ..profile
    }
}
