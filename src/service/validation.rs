//! Request validation for device bodies.

use crate::error::AppError;
use crate::model::{CreateDeviceRequest, UpdateDeviceRequest};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn required(field: &'static str) -> Self {
        Self {
            field,
            message: format!("{} is required", field),
        }
    }
}

/// Implemented by request bodies that carry field rules.
pub trait Validate {
    fn field_errors(&self) -> Vec<FieldError>;
}

fn require_text(field: &'static str, value: &Option<String>, errors: &mut Vec<FieldError>) {
    let empty = value.as_deref().map(str::is_empty).unwrap_or(true);
    if empty {
        errors.push(FieldError::required(field));
    }
}

impl Validate for CreateDeviceRequest {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text("name", &self.name, &mut errors);
        require_text("type", &self.device_type, &mut errors);
        errors
    }
}

impl Validate for UpdateDeviceRequest {
    fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        require_text("name", &self.name, &mut errors);
        require_text("type", &self.device_type, &mut errors);
        errors
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// All field errors of `body`, joined into one validation error.
    pub fn validate<T: Validate>(body: &T) -> Result<(), AppError> {
        let errors = body.field_errors();
        if errors.is_empty() {
            return Ok(());
        }
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Err(AppError::Validation(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_body() {
        assert!(RequestValidator::validate(&CreateDeviceRequest::new("Device1", "Sensor")).is_ok());
    }

    #[test]
    fn reports_every_missing_field() {
        let errors = CreateDeviceRequest::default().field_errors();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "type"]);
    }

    #[test]
    fn whitespace_is_a_value_but_empty_is_missing() {
        assert!(RequestValidator::validate(&UpdateDeviceRequest::new("   ", "Sensor")).is_ok());
        match RequestValidator::validate(&UpdateDeviceRequest::new("", "Sensor")) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "name is required"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn joins_messages() {
        match RequestValidator::validate(&UpdateDeviceRequest::default()) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "name is required; type is required"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
