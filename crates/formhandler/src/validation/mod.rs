//! Field validators.
//!
//! A validator judges the value of exactly one field. It is attached to a
//! [`Field`](crate::Field) while the form is being built and bound to that
//! field's [`FieldId`] when the field joins a form. It does not own the
//! field: it reads the value through a [`FieldSource`] (normally the form)
//! when asked for a verdict.
//!
//! Field values are fixed once submitted input has been bound, so the
//! first verdict is memoized and returned for every later query.

mod basic;
mod date;
mod email;

pub use basic::{
    MaxLengthValidator, MinLengthValidator, RangeValidator, RegexValidator, RequiredValidator,
    UrlValidator,
};
pub use date::DateValidator;
pub use email::EmailValidator;

use std::cell::Cell;
use std::fmt;

use crate::error::{FormError, Result};
use crate::field::Field;
use crate::value::FieldValue;

/// Handle to a field in a form's field registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(usize);

impl FieldId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the field in its registry.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read access to field values by handle.
pub trait FieldSource {
    /// Returns the current value of the field, if the handle resolves.
    fn field_value(&self, id: FieldId) -> Option<&FieldValue>;
}

impl FieldSource for [Field] {
    fn field_value(&self, id: FieldId) -> Option<&FieldValue> {
        self.get(id.index()).map(|field| &field.value)
    }
}

impl FieldSource for Vec<Field> {
    fn field_value(&self, id: FieldId) -> Option<&FieldValue> {
        self.as_slice().field_value(id)
    }
}

/// Memoized result of a validator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verdict {
    /// Not asked yet.
    #[default]
    Unevaluated,
    /// The value passed.
    Valid,
    /// The value failed.
    Invalid,
}

impl Verdict {
    /// Returns the boolean result, if evaluated.
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Unevaluated => None,
            Self::Valid => Some(true),
            Self::Invalid => Some(false),
        }
    }
}

impl From<bool> for Verdict {
    fn from(valid: bool) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::Invalid
        }
    }
}

/// State shared by every validator: message, bound field and verdict.
///
/// Cloning keeps the message only; the clone is unbound and unevaluated.
#[derive(Debug, Default)]
pub struct ValidatorBase {
    message: String,
    field: Option<FieldId>,
    verdict: Cell<Verdict>,
}

impl Clone for ValidatorBase {
    fn clone(&self) -> Self {
        Self::new(self.message.clone())
    }
}

impl ValidatorBase {
    /// Creates a base with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
            verdict: Cell::new(Verdict::Unevaluated),
        }
    }

    pub(crate) fn reset(&self) {
        self.verdict.set(Verdict::Unevaluated);
    }

    /// Returns the bound field, or an error when unbound.
    pub fn bound_field(&self) -> Result<FieldId> {
        self.field.ok_or(FormError::UnboundValidator)
    }

    /// Returns the scalar string of `value`, rejecting lists.
    ///
    /// `Null` reads as the empty string.
    pub fn scalar<'a>(&self, value: &'a FieldValue) -> Result<&'a str> {
        match value {
            FieldValue::Null => Ok(""),
            FieldValue::Scalar(s) => Ok(s),
            FieldValue::List(_) => Err(FormError::ScalarRequired {
                field: self.bound_field()?,
            }),
        }
    }
}

/// A rule that judges one field's value.
///
/// Implementors provide storage ([`base`](Self::base)) and the rule itself
/// ([`check`](Self::check)); binding, lookup and memoization come for free.
pub trait Validator: Send {
    /// Shared validator state.
    fn base(&self) -> &ValidatorBase;

    /// Mutable shared validator state.
    fn base_mut(&mut self) -> &mut ValidatorBase;

    /// Applies the rule to a value.
    ///
    /// Returns `Ok(false)` for values that fail the rule, and an error only
    /// for misuse such as handing a list to a scalar-only rule.
    fn check(&self, value: &FieldValue) -> Result<bool>;

    /// Returns whether the bound field's value passes this validator.
    ///
    /// The first answer is cached; errors are not.
    fn is_valid(&self, fields: &dyn FieldSource) -> Result<bool> {
        let base = self.base();
        if let Some(valid) = base.verdict.get().as_bool() {
            return Ok(valid);
        }

        let id = base.bound_field()?;
        let value = fields
            .field_value(id)
            .ok_or(FormError::UnknownField(id))?;
        let valid = self.check(value)?;
        base.verdict.set(valid.into());
        Ok(valid)
    }

    /// Returns the memoized verdict.
    fn verdict(&self) -> Verdict {
        self.base().verdict.get()
    }

    /// Returns the message shown when validation fails.
    fn error_message(&self) -> &str {
        &self.base().message
    }

    /// Replaces the message shown when validation fails.
    fn set_error_message(&mut self, message: String) {
        self.base_mut().message = message;
    }

    /// Returns the field this validator is bound to.
    fn field(&self) -> Option<FieldId> {
        self.base().field
    }

    /// Binds this validator to a field. Rebinding to the same field is a
    /// no-op; binding to a different one is an error.
    fn bind(&mut self, field: FieldId) -> Result<()> {
        let base = self.base_mut();
        match base.field {
            Some(bound) if bound != field => Err(FormError::AlreadyBound {
                bound,
                requested: field,
            }),
            _ => {
                base.field = Some(field);
                Ok(())
            }
        }
    }
}
