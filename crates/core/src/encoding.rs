//! Base64 data-URL encoding for inline file storage.
//!
//! Uploads are gated on size and declared MIME type before encoding, with
//! the same messages the dashboard forms show to the admin.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CoreError;

/// Largest accepted image upload, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Largest accepted PDF upload, in bytes (10 MiB).
pub const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

pub const PDF_MIME: &str = "application/pdf";

/// Build a `data:<mime>;base64,<payload>` string.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Validate an image upload and encode it as a data URL.
pub fn encode_image(bytes: &[u8], mime: &str) -> Result<String, CoreError> {
    check_image_upload(bytes, mime)?;
    Ok(to_data_url(mime, bytes))
}

/// Validate a PDF upload and encode it as a data URL.
pub fn encode_pdf(bytes: &[u8], mime: &str) -> Result<String, CoreError> {
    check_not_empty(bytes)?;
    if bytes.len() > MAX_PDF_BYTES {
        return Err(CoreError::Validation(
            "PDF size should be less than 10MB".into(),
        ));
    }
    if mime != PDF_MIME {
        return Err(CoreError::Validation("File must be a PDF".into()));
    }
    Ok(to_data_url(mime, bytes))
}

/// Size and type gate for an image upload, without encoding it.
pub fn check_image_upload(bytes: &[u8], mime: &str) -> Result<(), CoreError> {
    check_not_empty(bytes)?;
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(CoreError::Validation(
            "Image size should be less than 5MB".into(),
        ));
    }
    if !mime.starts_with("image/") {
        return Err(CoreError::Validation("File must be an image".into()));
    }
    Ok(())
}

fn check_not_empty(bytes: &[u8]) -> Result<(), CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Validation("No file provided".into()));
    }
    Ok(())
}

/// A decoded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub data: Vec<u8>,
}

impl DataUrl {
    /// Whether `value` looks like a data URL rather than a remote link.
    pub fn is_data_url(value: &str) -> bool {
        value.starts_with("data:")
    }

    /// Parse a base64 data URL. Non-base64 data URLs are rejected.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        let rest = value
            .strip_prefix("data:")
            .ok_or_else(|| CoreError::Validation("Not a data URL".into()))?;

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| CoreError::Validation("Malformed data URL".into()))?;

        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| CoreError::Validation("Data URL is not base64 encoded".into()))?;

        let data = STANDARD
            .decode(payload.trim())
            .map_err(|e| CoreError::Validation(format!("Invalid base64 payload: {e}")))?;

        Ok(Self {
            mime: if mime.is_empty() {
                "text/plain".to_string()
            } else {
                mime.to_string()
            },
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn validation_message(err: CoreError) -> String {
        match err {
            CoreError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn image_is_encoded_with_its_mime_type() {
        let url = encode_image(b"\x89PNG", "image/png").unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn empty_upload_is_rejected() {
        let msg = validation_message(encode_image(b"", "image/png").unwrap_err());
        assert_eq!(msg, "No file provided");
        let msg = validation_message(encode_pdf(b"", PDF_MIME).unwrap_err());
        assert_eq!(msg, "No file provided");
    }

    #[test]
    fn image_over_five_mib_is_rejected() {
        let bytes = vec![0u8; MAX_IMAGE_BYTES + 1];
        let msg = validation_message(encode_image(&bytes, "image/jpeg").unwrap_err());
        assert_eq!(msg, "Image size should be less than 5MB");
    }

    #[test]
    fn image_at_exactly_five_mib_is_accepted() {
        let bytes = vec![0u8; MAX_IMAGE_BYTES];
        assert!(check_image_upload(&bytes, "image/jpeg").is_ok());
    }

    #[test]
    fn non_image_mime_is_rejected() {
        let msg = validation_message(encode_image(b"abc", "text/plain").unwrap_err());
        assert_eq!(msg, "File must be an image");
    }

    #[test]
    fn pdf_gates() {
        let too_big = vec![0u8; MAX_PDF_BYTES + 1];
        assert_eq!(
            validation_message(encode_pdf(&too_big, PDF_MIME).unwrap_err()),
            "PDF size should be less than 10MB"
        );
        assert_eq!(
            validation_message(encode_pdf(b"%PDF-1.7", "image/png").unwrap_err()),
            "File must be a PDF"
        );
        assert!(encode_pdf(b"%PDF-1.7", PDF_MIME)
            .unwrap()
            .starts_with("data:application/pdf;base64,"));
    }

    #[test]
    fn parse_recovers_payload() {
        let url = to_data_url(PDF_MIME, b"%PDF-1.7 body");
        let parsed = DataUrl::parse(&url).unwrap();
        assert_eq!(parsed.mime, PDF_MIME);
        assert_eq!(parsed.data, b"%PDF-1.7 body");
    }

    #[test]
    fn parse_rejects_plain_links_and_bad_payloads() {
        assert!(!DataUrl::is_data_url("https://example.com/cv.pdf"));
        assert_matches!(
            DataUrl::parse("https://example.com/cv.pdf"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            DataUrl::parse("data:text/plain,hello"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            DataUrl::parse("data:image/png;base64,@@@"),
            Err(CoreError::Validation(_))
        );
    }
}
