#![allow(dead_code)]

use formhandler::{Field, FieldValue, Form, FormError, Submission, Validator};

pub const FORM: &str = "test";

/// Flushes a one-field form whose field carries `validator`, submitting
/// `value`, and returns the validator's answer.
pub fn judge(
    validator: impl Validator + 'static,
    value: impl Into<FieldValue>,
) -> Result<bool, FormError> {
    let mut form = Form::new(FORM);
    let id = form.add_field(Field::text("subject", "Subject").validator(validator))?;
    form.flush(&submitted().with("subject", value))?;
    form.field(id).expect("field exists").validators[0].is_valid(&form)
}

pub fn valid(validator: impl Validator + 'static, value: impl Into<FieldValue>) -> bool {
    judge(validator, value).unwrap_or_else(|e| panic!("validator errored: {e}"))
}

/// A submission carrying the test form's submit marker.
pub fn submitted() -> Submission {
    Submission::new().with(format!("{FORM}_submit"), "1")
}

pub fn list(items: &[&str]) -> FieldValue {
    FieldValue::List(items.iter().map(|s| (*s).to_string()).collect())
}
