//! Date validator.

use tracing::trace;

use super::{Validator, ValidatorBase};
use crate::date::parse_date;
use crate::error::Result;
use crate::messages::{DefaultCatalog, MessageCatalog, DOMAIN};
use crate::value::FieldValue;

const DEFAULT_MESSAGE: &str = "This value is incorrect.";

/// Accepts values that parse as a calendar date with at least a year and a
/// month, e.g. `2024-02-29` or `March 2024`.
///
/// Unparsable input, lists included, is simply invalid.
#[derive(Debug, Clone)]
pub struct DateValidator {
    base: ValidatorBase,
    required: bool,
}

impl DateValidator {
    /// Creates a required date validator with the default message.
    pub fn new() -> Self {
        Self::with_catalog(&DefaultCatalog)
    }

    /// Creates a required date validator, translating the default message.
    pub fn with_catalog(catalog: &dyn MessageCatalog) -> Self {
        Self {
            base: ValidatorBase::new(catalog.translate(DOMAIN, DEFAULT_MESSAGE)),
            required: true,
        }
    }

    /// Creates a date validator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            base: ValidatorBase::new(message),
            required: true,
        }
    }

    /// Sets whether an empty value fails.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets whether an empty value fails.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Returns whether an empty value fails.
    pub const fn is_required(&self) -> bool {
        self.required
    }
}

impl Default for DateValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for DateValidator {
    fn base(&self) -> &ValidatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ValidatorBase {
        &mut self.base
    }

    fn check(&self, value: &FieldValue) -> Result<bool> {
        if value.is_empty() && !self.required {
            return Ok(true);
        }

        let Some(text) = value.as_scalar() else {
            return Ok(false);
        };

        let parsed = parse_date(text);
        trace!(
            value = text,
            warnings = parsed.warning_count(),
            errors = parsed.error_count(),
            "parsed date"
        );
        Ok(parsed.is_calendar_date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::StaticCatalog;
    use crate::validation::testing::{bound, verdict};

    #[test]
    fn test_defaults() {
        let v = DateValidator::new();
        assert!(v.is_required());
        assert_eq!(v.error_message(), "This value is incorrect.");
    }

    #[test]
    fn test_calendar_overflow_is_invalid() {
        assert!(!verdict(DateValidator::new(), "2024-02-30"));
    }

    #[test]
    fn test_year_and_month_is_enough() {
        assert!(verdict(DateValidator::new(), "March 2024"));
        assert!(verdict(DateValidator::new(), "2024-02-29"));
    }

    #[test]
    fn test_empty_values() {
        assert!(!verdict(DateValidator::new(), ""));
        assert!(!verdict(DateValidator::new(), FieldValue::Null));
        assert!(verdict(DateValidator::new().required(false), ""));
        assert!(verdict(DateValidator::new().required(false), FieldValue::Null));
    }

    #[test]
    fn test_optional_still_checks_non_empty_values() {
        assert!(!verdict(DateValidator::new().required(false), "yesterday-ish"));
    }

    #[test]
    fn test_list_is_invalid_not_an_error() {
        let value = FieldValue::List(vec!["2024-01-01".to_string()]);
        assert!(!verdict(DateValidator::new(), value));
    }

    #[test]
    fn test_repeat_queries_agree() {
        let (fields, v) = bound(DateValidator::new(), "2024-01-15");
        let first = v.is_valid(&fields).unwrap();
        let second = v.is_valid(&fields).unwrap();
        assert!(first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_translated_message() {
        let catalog = StaticCatalog::new().with(DOMAIN, DEFAULT_MESSAGE, "Valeur incorrecte.");
        let v = DateValidator::with_catalog(&catalog);
        assert_eq!(v.error_message(), "Valeur incorrecte.");
    }

    #[test]
    fn test_set_required() {
        let mut v = DateValidator::new();
        v.set_required(false);
        assert!(!v.is_required());
        assert!(verdict(v, ""));
    }
}
