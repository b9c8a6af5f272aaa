use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{ApiError, FieldErrors};

/// A request body with field rules (via `validator`) and optional rules that
/// span several fields.
pub trait RequestSchema: DeserializeOwned + Validate {
    fn cross_field(&self) -> FieldErrors {
        FieldErrors::new()
    }
}

/// JSON body that has passed every rule of its [`RequestSchema`]. Handlers
/// taking this never see an invalid payload.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: RequestSchema,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        let mut field_errors = match value.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => collect_field_errors(&errors),
        };
        for (field, problem) in value.cross_field() {
            field_errors.entry(field).or_insert(problem);
        }

        if !field_errors.is_empty() {
            return Err(ApiError::validation_error("Validation failed", Some(field_errors)));
        }
        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        // Well-formed JSON of the wrong shape: missing or mistyped field.
        JsonRejection::JsonDataError(err) => ApiError::validation_error(err.body_text(), None),
        JsonRejection::JsonSyntaxError(err) => ApiError::invalid_json(err.body_text()),
        JsonRejection::MissingJsonContentType(err) => ApiError::invalid_json(err.body_text()),
        // Body cut off by the DefaultBodyLimit layer.
        other if other.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            ApiError::payload_too_large(other.body_text())
        }
        other => ApiError::bad_request(other.body_text()),
    }
}

fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let first = errs.first()?;
            let problem = match &first.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value ({})", first.code),
            };
            Some((field.to_string(), problem))
        })
        .collect()
}

/// E.164: a leading `+`, then 8 to 15 digits without a leading zero.
pub fn is_e164(phone: &str) -> bool {
    let Some(digits) = phone.strip_prefix('+') else {
        return false;
    };
    (8..=15).contains(&digits.len())
        && !digits.starts_with('0')
        && digits.bytes().all(|b| b.is_ascii_digit())
}
