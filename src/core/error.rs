//! Domain error type for plan inputs.

use thiserror::Error;

/// Errors raised while building a plan request.
///
/// The simulator itself has no fallible paths, so the only failure mode is an
/// input that violates the non-negativity or positivity constraints.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl PlanError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        PlanError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            PlanError::InvalidInput { field, .. } => field,
        }
    }
}

/// Checks that an amount or rate is finite and not negative.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64, PlanError> {
    if !value.is_finite() {
        return Err(PlanError::invalid(field, format!("must be a finite number, got {value}")));
    }
    if value < 0.0 {
        return Err(PlanError::invalid(field, format!("must be >= 0, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_field() {
        let err = PlanError::invalid("contribution", "must be >= 0, got -5");
        assert_eq!(
            err.to_string(),
            "Invalid input for contribution: must be >= 0, got -5"
        );
        assert_eq!(err.field(), "contribution");
    }

    #[test]
    fn rejects_nan_and_negative() {
        assert!(ensure_non_negative("rate", f64::NAN).is_err());
        assert!(ensure_non_negative("rate", f64::INFINITY).is_err());
        assert!(ensure_non_negative("rate", -0.01).is_err());
        assert_eq!(ensure_non_negative("rate", 0.0), Ok(0.0));
    }
}
