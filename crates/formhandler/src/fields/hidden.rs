//! Hidden field type.

use crate::field::Field;

/// Creates a hidden field.
pub fn hidden_field(name: &str, default: Option<&str>) -> Field {
    let field = Field::hidden(name);

    match default {
        Some(value) => field.default_value(value),
        None => field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;

    #[test]
    fn test_hidden_field() {
        let field = hidden_field("csrf_token", Some("abc123"));
        assert_eq!(field.name, "csrf_token");
        assert_eq!(field.default, FieldValue::from("abc123"));
        assert_eq!(hidden_field("x", None).default, FieldValue::Null);
    }
}
