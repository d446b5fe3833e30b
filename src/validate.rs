use crate::errors::AppError;
use crate::models::FileAttachment;
use base64::Engine;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

const ALLOWED_ATTACHMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/png",
    "image/jpeg",
];

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn for_field(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|error| error.field == field)
            .map(|error| error.message.as_str())
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        formatter.write_str(&joined)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        AppError::Validation(value.to_string())
    }
}

/// Collects per-field errors so a form can show all problems at once and
/// block submission, instead of failing on the first.
#[derive(Debug, Default)]
pub struct FormValidator {
    errors: Vec<FieldError>,
}

impl FormValidator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn require_text(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, "This field is required.");
        }
        self
    }

    pub fn require_email(&mut self, field: &str, value: &str) -> &mut Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.push(field, "This field is required.");
        } else if !EMAIL_RE.is_match(trimmed) {
            self.push(field, "Enter a valid email address.");
        }
        self
    }

    pub fn require_positive(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() || value <= 0.0 {
            self.push(field, "Enter a number greater than zero.");
        }
        self
    }

    pub fn require_non_negative(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() || value < 0.0 {
            self.push(field, "Enter a number of zero or more.");
        }
        self
    }

    pub fn require_date_order(
        &mut self,
        field: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> &mut Self {
        if end < start {
            self.push(field, "End date must not be before the start date.");
        }
        self
    }

    pub fn check_attachment(&mut self, field: &str, attachment: &FileAttachment) -> &mut Self {
        if !ALLOWED_ATTACHMENT_TYPES.contains(&attachment.mime_type.as_str()) {
            self.push(field, format!("File type '{}' is not allowed.", attachment.mime_type));
        }
        if attachment.size > MAX_ATTACHMENT_BYTES {
            self.push(field, "File exceeds the 5 MB limit.");
        }

        match decode_data_url(&attachment.data_url) {
            Some(bytes) => {
                if bytes.len() as u64 > MAX_ATTACHMENT_BYTES {
                    self.push(field, "File exceeds the 5 MB limit.");
                }
            }
            None => self.push(field, "File data is not a valid upload."),
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { errors: self.errors })
        }
    }
}

/// `data:<mime>;base64,<payload>` to raw bytes. Anything else is rejected.
fn decode_data_url(data_url: &str) -> Option<Vec<u8>> {
    let rest = data_url.strip_prefix("data:")?;
    let (_, payload) = rest.split_once(";base64,")?;
    base64::engine::general_purpose::STANDARD.decode(payload).ok()
}
