//! Validated JSON extractor with automatic validation.
//!
//! This module provides [`ValidateJson`], an enhanced JSON extractor that
//! combines deserialization with automatic validation using the `validator`
//! crate.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::{Error, ErrorKind};

/// JSON extractor with automatic validation.
///
/// Works with any type that implements both `serde::Deserialize` and
/// `validator::Validate`. Field-level failures surface as a 400 with the
/// offending fields named.
///
/// Also see [`Json`].
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Returns the inner validated value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // First, deserialize the JSON
        let Json(data) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;

        // Then validate the deserialized data
        data.validate()?;
        Ok(Self(data))
    }
}

/// Formats a single validation error with its field name.
fn format_validation_error(field: &str, error: &validator::ValidationError) -> String {
    if let Some(custom_message) = &error.message {
        return format!("Field '{field}': {custom_message}");
    }

    let detail = match error.code.as_ref() {
        "email" => "must be a valid email address",
        "length" => "has invalid length",
        "range" => "is out of valid range",
        "required" => "is required and cannot be empty",
        code => return format!("Field '{field}' failed validation: {code}"),
    };

    format!("Field '{field}' {detail}")
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, field_errors)| {
                field_errors
                    .iter()
                    .map(move |error| format_validation_error(field, error))
            })
            .collect();

        let user_message = match messages.as_slice() {
            [] => "Validation failed".to_owned(),
            [single] => single.clone(),
            multiple => multiple.join(". "),
        };

        tracing::warn!(
            errors = ?errors.field_errors(),
            "Request validation failed"
        );

        ErrorKind::BadRequest
            .with_message(user_message)
            .with_resource("request")
            .into_static()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(email)]
        email: String,
        #[validate(length(min = 2, max = 10))]
        name: String,
    }

    #[test]
    fn validation_errors_become_bad_request() {
        let sample = Sample {
            email: "not-an-email".to_owned(),
            name: "x".to_owned(),
        };

        let errors = sample.validate().unwrap_err();
        let error = Error::from(errors);
        assert_eq!(error.kind(), ErrorKind::BadRequest);

        let message = error.message().unwrap_or_default().to_owned();
        assert!(message.contains("email") || message.contains("name"));
    }

    #[test]
    fn valid_payload_passes() {
        let sample = Sample {
            email: "staff@example.com".to_owned(),
            name: "Staff".to_owned(),
        };
        assert!(sample.validate().is_ok());
    }
}
