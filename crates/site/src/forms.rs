//! Client-side form validation.
//!
//! Mirrors what the contact and enrolment forms check before submit: every
//! required field must be non-blank, and email fields must hold a plausible
//! address. Nothing is sent anywhere; a valid contact form is only logged.

use core::fmt;

use mdi_core::Email;

/// Confirmation shown after the contact form is accepted.
pub const CONTACT_CONFIRMATION: &str = "TRANSMISSION RECEIVED. STANDBY FOR RESPONSE.";

/// Input control type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    TextArea,
}

/// One form control and its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub kind: FieldKind,
    pub value: String,
    pub required: bool,
}

impl FormField {
    /// A required control.
    #[must_use]
    pub fn required(name: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            value: value.into(),
            required: true,
        }
    }

    /// An optional control.
    #[must_use]
    pub fn optional(name: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind, value)
        }
    }

    /// Check this field alone.
    #[must_use]
    pub fn check(&self) -> Option<FieldProblem> {
        if !self.required {
            return None;
        }
        if self.value.trim().is_empty() {
            return Some(FieldProblem::Required);
        }
        if self.kind == FieldKind::Email && Email::parse(&self.value).is_err() {
            return Some(FieldProblem::InvalidEmail);
        }
        None
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Required,
    InvalidEmail,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Required => "This field is required",
            Self::InvalidEmail => "Please enter a valid email",
        })
    }
}

/// A rejected field and the message shown beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub problem: FieldProblem,
}

impl FieldError {
    #[must_use]
    pub fn new(field: impl Into<String>, problem: FieldProblem) -> Self {
        Self {
            field: field.into(),
            problem,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.problem)
    }
}

/// Validate every required field, collecting one error per failing field.
///
/// # Errors
///
/// Returns the failing fields in form order.
pub fn validate_form(fields: &[FormField]) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = fields
        .iter()
        .filter_map(|field| field.check().map(|p| FieldError::new(field.name.clone(), p)))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Clear every value, as the browser does after a successful submit.
pub fn reset_form(fields: &mut [FormField]) {
    for field in fields {
        field.value.clear();
    }
}

/// A validated contact-form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: Email,
    pub message: String,
}

impl ContactSubmission {
    /// Build a submission from the form's first text, email, and text-area
    /// controls.
    ///
    /// # Errors
    ///
    /// Returns the failing fields; a missing control counts as a blank
    /// required field.
    pub fn from_fields(fields: &[FormField]) -> Result<Self, Vec<FieldError>> {
        validate_form(fields)?;

        let find = |kind: FieldKind, fallback: &str| {
            fields
                .iter()
                .find(|f| f.kind == kind)
                .ok_or_else(|| FieldError::new(fallback, FieldProblem::Required))
        };

        let mut errors = Vec::new();
        let name = find(FieldKind::Text, "name").map_err(|e| errors.push(e)).ok();
        let email = find(FieldKind::Email, "email").map_err(|e| errors.push(e)).ok();
        let message = find(FieldKind::TextArea, "message")
            .map_err(|e| errors.push(e))
            .ok();

        let (Some(name), Some(email), Some(message)) = (name, email, message) else {
            return Err(errors);
        };

        let parsed = Email::parse(email.value.trim())
            .map_err(|_| vec![FieldError::new(email.name.clone(), FieldProblem::InvalidEmail)])?;

        Ok(Self {
            name: name.value.trim().to_owned(),
            email: parsed,
            message: message.value.trim().to_owned(),
        })
    }

    /// Accept the submission. There is no backend; the transmission is
    /// logged and the confirmation text returned.
    #[must_use]
    pub fn submit(&self) -> &'static str {
        tracing::info!(
            name = %self.name,
            email = %self.email,
            message_len = self.message.len(),
            "Transmission initiated"
        );
        CONTACT_CONFIRMATION
    }
}
