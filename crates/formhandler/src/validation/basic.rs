//! General-purpose validators.
//!
//! Apart from [`RequiredValidator`], these leave empty values alone:
//! pair them with a `RequiredValidator` when a value must be present.

use regex::Regex;

use super::{Validator, ValidatorBase};
use crate::error::Result;
use crate::value::FieldValue;

macro_rules! impl_base {
    () => {
        fn base(&self) -> &ValidatorBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ValidatorBase {
            &mut self.base
        }
    };
}

/// Validator that requires a non-blank value.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
    base: ValidatorBase,
}

impl RequiredValidator {
    /// Creates a new RequiredValidator with default message.
    pub fn new() -> Self {
        Self::with_message("This field is required.")
    }

    /// Creates a new RequiredValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            base: ValidatorBase::new(message),
        }
    }
}

impl Default for RequiredValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for RequiredValidator {
    impl_base!();

    fn check(&self, value: &FieldValue) -> Result<bool> {
        Ok(!value.is_blank())
    }
}

/// Validator that enforces a maximum length in characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    base: ValidatorBase,
    max_length: usize,
}

impl MaxLengthValidator {
    /// Creates a new MaxLengthValidator.
    pub fn new(max_length: usize) -> Self {
        Self::with_message(
            max_length,
            format!("Ensure this value has at most {max_length} characters."),
        )
    }

    /// Creates a new MaxLengthValidator with custom message.
    pub fn with_message(max_length: usize, message: impl Into<String>) -> Self {
        Self {
            base: ValidatorBase::new(message),
            max_length,
        }
    }
}

impl Validator for MaxLengthValidator {
    impl_base!();

    fn check(&self, value: &FieldValue) -> Result<bool> {
        let text = self.base.scalar(value)?;
        Ok(text.chars().count() <= self.max_length)
    }
}

/// Validator that enforces a minimum length in characters.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    base: ValidatorBase,
    min_length: usize,
}

impl MinLengthValidator {
    /// Creates a new MinLengthValidator.
    pub fn new(min_length: usize) -> Self {
        Self::with_message(
            min_length,
            format!("Ensure this value has at least {min_length} characters."),
        )
    }

    /// Creates a new MinLengthValidator with custom message.
    pub fn with_message(min_length: usize, message: impl Into<String>) -> Self {
        Self {
            base: ValidatorBase::new(message),
            min_length,
        }
    }
}

impl Validator for MinLengthValidator {
    impl_base!();

    fn check(&self, value: &FieldValue) -> Result<bool> {
        let text = self.base.scalar(value)?;
        Ok(text.is_empty() || text.chars().count() >= self.min_length)
    }
}

/// Validator for http(s) URLs.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    base: ValidatorBase,
}

impl UrlValidator {
    /// Creates a new UrlValidator with default message.
    pub fn new() -> Self {
        Self::with_message("Enter a valid URL.")
    }

    /// Creates a new UrlValidator with custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            base: ValidatorBase::new(message),
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for UrlValidator {
    impl_base!();

    fn check(&self, value: &FieldValue) -> Result<bool> {
        let text = self.base.scalar(value)?;
        Ok(text.is_empty()
            || text
                .strip_prefix("https://")
                .or_else(|| text.strip_prefix("http://"))
                .is_some_and(|rest| !rest.is_empty()))
    }
}

/// Validator using a custom regex pattern.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    base: ValidatorBase,
    pattern: Regex,
}

impl RegexValidator {
    /// Creates a new RegexValidator.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base: ValidatorBase::new(message),
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Validator for RegexValidator {
    impl_base!();

    fn check(&self, value: &FieldValue) -> Result<bool> {
        let text = self.base.scalar(value)?;
        Ok(text.is_empty() || self.pattern.is_match(text))
    }
}

/// Validator for numeric range.
#[derive(Debug, Clone)]
pub struct RangeValidator {
    base: ValidatorBase,
    min: Option<f64>,
    max: Option<f64>,
}

impl RangeValidator {
    /// Creates a new RangeValidator with min and max bounds.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("Value must be between {min} and {max}."),
            (Some(min), None) => format!("Value must be at least {min}."),
            (None, Some(max)) => format!("Value must be at most {max}."),
            (None, None) => "Enter a valid number.".to_string(),
        };
        Self::with_message(min, max, message)
    }

    /// Creates a new RangeValidator with custom message.
    pub fn with_message(min: Option<f64>, max: Option<f64>, message: impl Into<String>) -> Self {
        Self {
            base: ValidatorBase::new(message),
            min,
            max,
        }
    }
}

impl Validator for RangeValidator {
    impl_base!();

    fn check(&self, value: &FieldValue) -> Result<bool> {
        let text = self.base.scalar(value)?;
        if text.is_empty() {
            return Ok(true);
        }

        let Ok(num) = text.trim().parse::<f64>() else {
            return Ok(false);
        };

        Ok(num.is_finite()
            && self.min.map_or(true, |min| num >= min)
            && self.max.map_or(true, |max| num <= max))
    }
}
