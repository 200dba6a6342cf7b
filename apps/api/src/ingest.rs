//! Input ingestion: resume uploads (PDF or UTF-8 text), the multipart
//! analysis form and job description limits.

use anyhow::anyhow;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("File too large. Maximum size is {max} bytes.")]
    FileTooLarge { max: usize },

    #[error("Failed to parse PDF: {0}")]
    Pdf(String),

    #[error("Could not decode file as UTF-8")]
    NotUtf8,

    #[error("Must provide resume_file or resume_text")]
    MissingResume,

    #[error("Job description too long. Maximum {max} characters.")]
    JdTooLong { max: usize },

    #[error("Invalid multipart body: {0}")]
    Multipart(String),
}

impl From<IngestError> for AppError {
    fn from(e: IngestError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Size limits applied to incoming documents.
#[derive(Debug, Clone, Copy)]
pub struct IngestLimits {
    pub max_upload_bytes: usize,
    pub max_jd_chars: usize,
}

/// Extracts resume text from uploaded bytes. `.pdf` files (any case) go
/// through the PDF text extractor; everything else must be UTF-8.
pub fn resume_text_from_upload(
    filename: &str,
    bytes: &[u8],
    max_bytes: usize,
) -> Result<String, IngestError> {
    if bytes.len() > max_bytes {
        return Err(IngestError::FileTooLarge { max: max_bytes });
    }

    if filename.to_lowercase().ends_with(".pdf") {
        let text =
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| IngestError::Pdf(e.to_string()))?;
        info!("Extracted {} chars from PDF {filename}", text.len());
        Ok(text)
    } else {
        String::from_utf8(bytes.to_vec()).map_err(|_| IngestError::NotUtf8)
    }
}

/// [`resume_text_from_upload`] on the blocking pool; PDF extraction is CPU
/// bound and must not stall the runtime.
pub async fn extract_resume_text(
    filename: String,
    bytes: Vec<u8>,
    max_bytes: usize,
) -> Result<String, AppError> {
    let text = run_blocking(move || resume_text_from_upload(&filename, &bytes, max_bytes)).await??;
    Ok(text)
}

async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(anyhow!("blocking extraction task failed: {e}")))
}

pub fn validate_jd(jd_text: &str, max_chars: usize) -> Result<(), IngestError> {
    if jd_text.chars().count() > max_chars {
        return Err(IngestError::JdTooLong { max: max_chars });
    }
    Ok(())
}

/// Fields of the `/api/ats-score` and `/api/analyze` forms.
#[derive(Debug, Clone, Default)]
pub struct AnalysisForm {
    pub resume_text: String,
    pub jd_text: String,
}

/// Body-limit rejections surface as `FileTooLarge`; anything else is a
/// malformed form.
fn multipart_error(e: MultipartError, max_upload_bytes: usize) -> IngestError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        IngestError::FileTooLarge {
            max: max_upload_bytes,
        }
    } else {
        IngestError::Multipart(e.to_string())
    }
}

/// Reads `resume_file`, `resume_text` and `jd_text` from a multipart body.
/// A non-empty file wins over the `resume_text` field.
pub async fn read_analysis_form(
    mut multipart: Multipart,
    limits: IngestLimits,
) -> Result<AnalysisForm, AppError> {
    let max = limits.max_upload_bytes;
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut resume_text: Option<String> = None;
    let mut jd_text = String::new();

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume_file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let mut bytes = Vec::new();
                while let Some(chunk) = field.chunk().await.map_err(|e| multipart_error(e, max))? {
                    if bytes.len() + chunk.len() > max {
                        warn!("Rejecting upload {filename:?}: over {max} bytes");
                        return Err(IngestError::FileTooLarge { max }.into());
                    }
                    bytes.extend_from_slice(&chunk);
                }
                if !bytes.is_empty() {
                    upload = Some((filename, bytes));
                }
            }
            "resume_text" => {
                resume_text = Some(field.text().await.map_err(|e| multipart_error(e, max))?);
            }
            "jd_text" => {
                jd_text = field.text().await.map_err(|e| multipart_error(e, max))?;
            }
            other => debug!("Ignoring unknown form field {other:?}"),
        }
    }

    validate_jd(&jd_text, limits.max_jd_chars)?;

    let resume_text = match (upload, resume_text) {
        (Some((filename, bytes)), _) => extract_resume_text(filename, bytes, max).await?,
        (None, Some(text)) if !text.trim().is_empty() => text,
        _ => return Err(IngestError::MissingResume.into()),
    };

    Ok(AnalysisForm {
        resume_text,
        jd_text,
    })
}
