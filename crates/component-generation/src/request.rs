//! Incoming generation requests and their validation

use serde::{Deserialize, Serialize};

use crate::error::{GenerationError, ValidationIssue};

pub const MIN_PROMPT_CHARS: usize = 10;
pub const MAX_PROMPT_CHARS: usize = 1000;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// A request to generate a component from a description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
            temperature: None,
        }
    }

    /// Check prompt length and temperature range.
    ///
    /// # Returns
    /// * `Ok(())` - The request can be sent
    /// * `Err(GenerationError::Invalid)` - Every issue found, in field order
    pub fn validate(&self) -> Result<(), GenerationError> {
        let mut issues = Vec::new();

        let length = self.prompt.chars().count();
        if length < MIN_PROMPT_CHARS {
            issues.push(ValidationIssue {
                field: "prompt",
                message: format!("Prompt must contain at least {} characters", MIN_PROMPT_CHARS),
            });
        } else if length > MAX_PROMPT_CHARS {
            issues.push(ValidationIssue {
                field: "prompt",
                message: format!("Prompt must contain at most {} characters", MAX_PROMPT_CHARS),
            });
        }

        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                issues.push(ValidationIssue {
                    field: "model",
                    message: "Model must not be empty".to_string(),
                });
            }
        }

        if let Some(t) = self.temperature {
            if !(0.0..=1.0).contains(&t) {
                issues.push(ValidationIssue {
                    field: "temperature",
                    message: "Temperature must be between 0 and 1".to_string(),
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(GenerationError::Invalid(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues(request: &GenerationRequest) -> Vec<ValidationIssue> {
        match request.validate() {
            Err(GenerationError::Invalid(issues)) => issues,
            other => panic!("expected invalid request, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_request() {
        let request: GenerationRequest =
            serde_json::from_str(r#"{"prompt": "a responsive navbar"}"#).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.temperature, None);
        assert_eq!(request.model, None);
    }

    #[test]
    fn test_prompt_length_bounds() {
        assert_eq!(issues(&GenerationRequest::new("too short"))[0].field, "prompt");
        assert!(GenerationRequest::new("exactly 10").validate().is_ok());
        assert!(GenerationRequest::new("x".repeat(1000)).validate().is_ok());
        assert_eq!(issues(&GenerationRequest::new("x".repeat(1001))).len(), 1);
    }

    #[test]
    fn test_temperature_range() {
        let mut request = GenerationRequest::new("a pricing table");
        request.temperature = Some(1.0);
        assert!(request.validate().is_ok());

        request.temperature = Some(1.5);
        let found = issues(&request);
        assert_eq!(found[0].field, "temperature");
    }

    #[test]
    fn test_collects_every_issue() {
        let request = GenerationRequest {
            prompt: "short".into(),
            model: Some(" ".into()),
            temperature: Some(-0.1),
        };
        let fields: Vec<_> = issues(&request).iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["prompt", "model", "temperature"]);
    }
}
