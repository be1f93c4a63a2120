use serde::Serialize;

use crate::validator::Validation;

/// Uniform result of a service operation.
///
/// Expected failures (validation, not-found) and unexpected faults both end
/// up as [`Outcome::Failure`]; callers never see a Rust error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success { message: String, value: T },
    Failure { message: String, details: Vec<String> },
}

impl<T> Outcome<T> {
    pub fn success(message: impl Into<String>, value: T) -> Self {
        Outcome::Success {
            message: message.into(),
            value,
        }
    }

    /// Failure whose only detail is the message itself.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Outcome::Failure {
            details: vec![message.clone()],
            message,
        }
    }

    /// Wraps a failed validation, prefixing its joined details.
    pub fn from_validation(prefix: &str, validation: Validation) -> Self {
        Outcome::Failure {
            message: format!("{prefix}: {}", validation.joined()),
            details: validation.details,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success { message, .. } | Outcome::Failure { message, .. } => message,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    /// Failure details; empty on success.
    pub fn details(&self) -> &[String] {
        match self {
            Outcome::Success { .. } => &[],
            Outcome::Failure { details, .. } => details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_carries_message_as_detail() {
        let outcome: Outcome<()> = Outcome::failure("Section not found");
        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), "Section not found");
        assert_eq!(outcome.details(), ["Section not found".to_string()]);
        assert!(outcome.value().is_none());
    }

    #[test]
    fn from_validation_joins_details() {
        let validation = Validation::fail_all(vec!["a".into(), "b".into()]);
        let outcome: Outcome<()> = Outcome::from_validation("Could not register", validation);
        assert_eq!(outcome.message(), "Could not register: a, b");
        assert_eq!(outcome.details().len(), 2);
    }

    #[test]
    fn success_exposes_value() {
        let outcome = Outcome::success("done", 42);
        assert!(outcome.is_success());
        assert_eq!(outcome.value(), Some(&42));
        assert!(outcome.details().is_empty());
        assert_eq!(outcome.into_value(), Some(42));
    }

    #[test]
    fn serializes_with_status_tag() {
        let outcome: Outcome<u32> = Outcome::failure("nope");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["details"][0], "nope");
    }
}
