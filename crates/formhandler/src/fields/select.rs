//! Select field types.

use crate::field::Field;
use crate::validation::RequiredValidator;
use crate::widgets::{BootstrapRadioSelect, BootstrapSelect};

/// Creates a choice field (select/dropdown).
pub fn select_field(name: &str, label: &str, choices: Vec<(&str, &str)>, required: bool) -> Field {
    let field = Field::select(name, label).options(choices);
    require(field, required)
}

/// Creates a multiple choice field (multi-select).
pub fn multiple_select_field(
    name: &str,
    label: &str,
    choices: Vec<(&str, &str)>,
    required: bool,
) -> Field {
    let field = Field::new(name, label, BootstrapSelect::new().no_blank())
        .options(choices)
        .attr("multiple", "multiple");
    require(field, required)
}

/// Creates a choice field rendered as a radio group.
pub fn radio_field(name: &str, label: &str, choices: Vec<(&str, &str)>, required: bool) -> Field {
    let field = Field::new(name, label, BootstrapRadioSelect::new()).options(choices);
    require(field, required)
}

fn require(field: Field, required: bool) -> Field {
    if required {
        field.required().validator(RequiredValidator::new())
    } else {
        field
    }
}
