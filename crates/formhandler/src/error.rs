//! Error types for forms.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::validation::FieldId;

/// Form-specific errors.
///
/// These signal programming or configuration mistakes. A value that
/// simply fails a rule is never an error: validators answer `Ok(false)`
/// and the message ends up in [`ValidationErrors`].
#[derive(Debug, Error)]
pub enum FormError {
    /// A validator that only understands scalars was handed a list.
    #[error("validator on field {field} only works on scalar values")]
    ScalarRequired { field: FieldId },

    /// A validator was queried before being attached to a field.
    #[error("validator is not bound to a field")]
    UnboundValidator,

    /// A validator was bound to a second, different field.
    #[error("validator is already bound to field {bound}, cannot rebind to {requested}")]
    AlreadyBound { bound: FieldId, requested: FieldId },

    /// A field handle does not resolve in the registry it was used with.
    #[error("unknown field handle: {0}")]
    UnknownField(FieldId),

    /// Two fields with the same name were added to a form.
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    /// A validator was configured with an unusable pattern.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Submitted form data could not be decoded.
    #[error("failed to parse form data: {0}")]
    Parse(String),

    /// The DNS resolver could not be set up.
    #[error("resolver setup failed: {0}")]
    Resolver(String),

    /// Configuration, catalog or resolver table could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Collection of validation errors by field.
///
/// Fields are kept in name order so rendering and `Display` are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Errors keyed by field name.
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an error for a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns errors for a specific field.
    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    /// Returns all errors as a flat list.
    pub fn all_errors(&self) -> Vec<(&str, &str)> {
        self.errors
            .iter()
            .flat_map(|(field, messages)| {
                messages
                    .iter()
                    .map(move |msg| (field.as_str(), msg.as_str()))
            })
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{field}: {message}")?;
            }
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_grouped_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "Invalid email address.");
        errors.add("email", "This field is required.");
        errors.add("birthday", "This value is incorrect.");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email").map(Vec::len), Some(2));
        assert_eq!(
            errors.all_errors()[0],
            ("birthday", "This value is incorrect.")
        );
    }

    #[test]
    fn test_display_one_line_per_message() {
        let mut errors = ValidationErrors::new();
        errors.add("a", "first");
        errors.add("b", "second");
        assert_eq!(errors.to_string(), "a: first\nb: second\n");
    }

    #[test]
    fn test_scalar_required_message() {
        let err = FormError::ScalarRequired {
            field: FieldId::new(2),
        };
        assert_eq!(
            err.to_string(),
            "validator on field #2 only works on scalar values"
        );
    }
}
