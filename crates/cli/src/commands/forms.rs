//! Form commands: the same checks the site runs before submitting.

use mdi_core::Email;
use mdi_site::error::{Result, SiteError};
use mdi_site::forms::{ContactSubmission, FieldKind, FormField};

use crate::surface::print_line;

/// Check an email address.
///
/// # Errors
///
/// Returns `SiteError::BadRequest` with the reason the address is invalid.
pub fn validate_email(email: &str) -> Result<()> {
    let email = Email::parse(email).map_err(|e| SiteError::BadRequest(e.to_string()))?;
    print_line(&format!("valid: {email}"));
    Ok(())
}

/// Validate and send the contact form.
///
/// # Errors
///
/// Returns `SiteError::InvalidForm` listing every failing field.
pub fn contact(name: &str, email: &str, message: &str) -> Result<()> {
    let fields = [
        FormField::required("name", FieldKind::Text, name),
        FormField::required("email", FieldKind::Email, email),
        FormField::required("message", FieldKind::TextArea, message),
    ];

    let submission = ContactSubmission::from_fields(&fields).map_err(SiteError::InvalidForm)?;
    print_line(submission.submit());
    Ok(())
}
