//! Accessor errors
//!
//! Every variant is fatal to the task that triggered it: the component has diverged
//! from the layout the task was written against.

/// Errors raised while resolving or reading a foreign slot
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// No slot with the requested name, storage and visibility
    #[error("{component}: {expected} '{field}' not found")]
    FieldNotFound {
        component: String,
        field: String,
        expected: String,
    },

    /// Slot exists but holds a different shape or type
    #[error("{component}.{field}: expected {expected}, found {found}")]
    TypeMismatch {
        component: String,
        field: String,
        expected: String,
        found: String,
    },

    /// Sequence length differs from the expected length
    #[error("{component}.{field}: expected length {expected}, got {actual}")]
    ShapeViolation {
        component: String,
        field: String,
        expected: usize,
        actual: usize,
    },

    /// A validator or bound rejected the value
    #[error("{component}.{field}: {message}")]
    ValueOutOfContract {
        component: String,
        field: String,
        message: String,
    },

    /// A whitelisted interaction did not apply to the slot
    #[error("{component}.{field}: interaction rejected: {reason}")]
    InteractionRejected {
        component: String,
        field: String,
        reason: String,
    },
}

impl AccessError {
    /// Field name the error refers to
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::FieldNotFound { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::ShapeViolation { field, .. }
            | Self::ValueOutOfContract { field, .. }
            | Self::InteractionRejected { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_violation_mentions_expected_length() {
        let err = AccessError::ShapeViolation {
            component: "iPhoneScript".into(),
            field: "pinDigits".into(),
            expected: 4,
            actual: 3,
        };
        let text = err.to_string();
        assert!(text.contains("expected length 4"));
        assert!(text.contains("got 3"));
        assert_eq!(err.field(), "pinDigits");
    }
}
