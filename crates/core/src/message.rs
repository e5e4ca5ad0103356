//! Contact form input.

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;

/// A message submitted through the public contact form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactMessage {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl ContactMessage {
    /// Trim every field, then validate.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let normalized = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        normalized
            .validate()
            .map_err(|e| CoreError::Validation(first_message(&e)))?;
        Ok(normalized)
    }
}

/// The first human readable message out of a validator error set.
pub fn first_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| field.to_string());
    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}"))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid input".to_string())
}
