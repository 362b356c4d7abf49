//! Resume upload: file validation, S3 storage, and text extraction.

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;

/// Stored as the resume text when nothing could be extracted.
pub const PLACEHOLDER_TEXT: &str =
    "Resume uploaded successfully. Automatic text extraction is only available for PDF files.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Doc,
    Docx,
}

impl ResumeFormat {
    fn from_filename(filename: &str) -> Option<Self> {
        let extension = std::path::Path::new(filename)
            .extension()?
            .to_str()?
            .to_ascii_lowercase();
        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// Checks name, type, and size of an uploaded resume.
pub fn validate_upload(
    filename: &str,
    size: usize,
    max_bytes: usize,
) -> Result<ResumeFormat, AppError> {
    if filename.trim().is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    let format = ResumeFormat::from_filename(filename).ok_or_else(|| {
        AppError::Validation("Invalid file type. Please upload PDF, DOC, or DOCX".to_string())
    })?;
    if size == 0 {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if size > max_bytes {
        return Err(AppError::Validation(format!(
            "File size must be less than {}MB",
            max_bytes / (1024 * 1024)
        )));
    }
    Ok(format)
}

/// `resumes/<user_id>/<YYYYmmdd_HHMMSS>_<sanitized filename>`
pub fn resume_key(user_id: Uuid, uploaded_at: DateTime<Utc>, filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "resumes/{}/{}_{}",
        user_id,
        uploaded_at.format("%Y%m%d_%H%M%S"),
        safe
    )
}

pub async fn store_resume_file(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
    format: ResumeFormat,
    body: Bytes,
) -> Result<(), AppError> {
    s3.put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .content_type(format.content_type())
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    info!("Uploaded resume to s3://{bucket}/{key}");
    Ok(())
}

pub async fn delete_resume_file(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    key: &str,
) -> Result<(), AppError> {
    s3.delete_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 delete failed: {e}")))?;

    info!("Deleted resume s3://{bucket}/{key}");
    Ok(())
}

/// Extracts plain text from a PDF on a blocking thread. Other formats, failures,
/// and empty results yield `PLACEHOLDER_TEXT`.
pub async fn extract_text(format: ResumeFormat, body: Bytes) -> String {
    if format != ResumeFormat::Pdf {
        return PLACEHOLDER_TEXT.to_string();
    }

    let extracted =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&body)).await;

    match extracted {
        Ok(Ok(text)) => normalize_text(&text).unwrap_or_else(|| PLACEHOLDER_TEXT.to_string()),
        Ok(Err(e)) => {
            warn!("PDF text extraction failed: {e}");
            PLACEHOLDER_TEXT.to_string()
        }
        Err(e) => {
            warn!("PDF extraction task panicked: {e}");
            PLACEHOLDER_TEXT.to_string()
        }
    }
}

/// Drops blank lines and trailing whitespace; `None` if nothing is left.
fn normalize_text(text: &str) -> Option<String> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
