use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One field-level rejection reported by the check-persistence service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub field: String,
    pub reason: String,
}

impl ErrorDetail {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Body of a failed service response. Every member is optional: the presence
/// of a non-empty `details` list is what distinguishes a validation failure
/// from a generic one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ErrorDetail>>,
}

/// Failure envelope returned by the check-persistence service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

impl ErrorResponse {
    /// Field-level details, if this response carries any.
    pub fn validation_details(&self) -> Option<&[ErrorDetail]> {
        match self.error.as_ref().and_then(|body| body.details.as_deref()) {
            Some(details) if !details.is_empty() => Some(details),
            _ => None,
        }
    }
}

/// Failure raised by a check-persistence client.
#[derive(Debug, Clone, Error)]
pub enum CheckSubmitError {
    #[error("check rejected with {} field error(s)", .details.len())]
    Validation { details: Vec<ErrorDetail> },
    #[error("check delivery failed: {0}")]
    Transport(String),
}

impl From<ErrorResponse> for CheckSubmitError {
    fn from(response: ErrorResponse) -> Self {
        match response.validation_details() {
            Some(details) => Self::Validation {
                details: details.to_vec(),
            },
            None => {
                let message = response
                    .error
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| "service returned an error without details".to_string());
                Self::Transport(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detailed_response_classifies_as_validation() {
        let response = ErrorResponse {
            error: Some(ErrorBody {
                code: Some("VALIDATION".to_string()),
                message: Some("check rejected".to_string()),
                details: Some(vec![ErrorDetail::new("vehicleId", "required")]),
            }),
        };

        match CheckSubmitError::from(response) {
            CheckSubmitError::Validation { details } => {
                assert_eq!(details, vec![ErrorDetail::new("vehicleId", "required")]);
            }
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn empty_detail_list_classifies_as_transport() {
        let response = ErrorResponse {
            error: Some(ErrorBody {
                code: None,
                message: Some("boom".to_string()),
                details: Some(Vec::new()),
            }),
        };

        assert!(response.validation_details().is_none());
        match CheckSubmitError::from(response) {
            CheckSubmitError::Transport(message) => assert_eq!(message, "boom"),
            other => panic!("unexpected classification: {other:?}"),
        }
    }

    #[test]
    fn bare_envelope_classifies_as_transport() {
        let response: ErrorResponse = serde_json::from_str("{}").expect("parse");
        assert!(matches!(
            CheckSubmitError::from(response),
            CheckSubmitError::Transport(_)
        ));
    }
}
