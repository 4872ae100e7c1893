//! Checkbox fields.
//!
//! An unticked box is missing from the submitted body and binds as
//! `Null`, so a required checkbox is one that must be ticked.

use crate::field::Field;
use crate::validation::RequiredValidator;
use crate::widgets::BootstrapCheckbox;

/// Creates a checkbox field.
pub fn checkbox_field(name: &str, label: &str, required: bool) -> Field {
    tick_box(Field::checkbox(name, label), required)
}

/// Creates a checkbox field styled as a switch.
pub fn switch_field(name: &str, label: &str, required: bool) -> Field {
    let widget = BootstrapCheckbox::switch().label(label);
    tick_box(Field::new(name, label, widget), required)
}

fn tick_box(field: Field, required: bool) -> Field {
    if required {
        field
            .required()
            .validator(RequiredValidator::with_message("This box must be ticked."))
    } else {
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::testing::verdict;
    use crate::validation::Validator;
    use crate::value::FieldValue;

    #[test]
    fn test_optional_checkbox() {
        let field = checkbox_field("newsletter", "Newsletter", false);
        assert_eq!(field.widget.input_type(), "checkbox");
        assert!(!field.required);
        assert!(field.validators.is_empty());
    }

    #[test]
    fn test_required_box_must_be_ticked() {
        let field = switch_field("terms", "I accept the terms", true);
        assert!(field.required);
        assert_eq!(field.validators[0].error_message(), "This box must be ticked.");

        let rule = || RequiredValidator::with_message("This box must be ticked.");
        assert!(!verdict(rule(), FieldValue::Null));
        assert!(verdict(rule(), "on"));
    }
}
