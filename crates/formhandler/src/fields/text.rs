//! Text field types.

use crate::field::Field;
use crate::validation::{
    DateValidator, EmailValidator, MaxLengthValidator, MinLengthValidator, RequiredValidator,
    UrlValidator,
};
use crate::widgets::{BootstrapTextInput, BootstrapTextarea};

/// Creates a single-line text field with a maximum length.
pub fn text_field(name: &str, label: &str, max_length: usize, required: bool) -> Field {
    let mut field = Field::text(name, label).validator(MaxLengthValidator::new(max_length));

    if required {
        field = field.required().validator(RequiredValidator::new());
    }

    field
}

/// Creates a multi-line text field.
pub fn textarea_field(name: &str, label: &str, rows: usize, required: bool) -> Field {
    let mut field = Field::textarea(name, label, rows);

    if required {
        field = field.required().validator(RequiredValidator::new());
    }

    field
}

/// Creates an email field. The email validator handles required-ness.
pub fn email_field(name: &str, label: &str, required: bool) -> Field {
    let field = Field::new(name, label, BootstrapTextInput::email())
        .validator(EmailValidator::new().required(required));

    if required {
        field.required()
    } else {
        field
    }
}

/// Creates a date field. The date validator handles required-ness.
pub fn date_field(name: &str, label: &str, required: bool) -> Field {
    let field = Field::new(name, label, BootstrapTextInput::date())
        .validator(DateValidator::new().required(required));

    if required {
        field.required()
    } else {
        field
    }
}

/// Creates a required password field.
pub fn password_field(name: &str, label: &str, min_length: Option<usize>) -> Field {
    let mut field = Field::new(name, label, BootstrapTextInput::password())
        .required()
        .validator(RequiredValidator::new());

    if let Some(min) = min_length {
        field = field.validator(MinLengthValidator::new(min));
    }

    field
}

/// Creates a URL field.
pub fn url_field(name: &str, label: &str, required: bool) -> Field {
    let mut field = Field::new(name, label, BootstrapTextInput::url())
        .validator(UrlValidator::new())
        .attr("placeholder", "https://");

    if required {
        field = field.required().validator(RequiredValidator::new());
    }

    field
}
