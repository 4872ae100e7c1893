//! Form fields.

use crate::validation::Validator;
use crate::value::FieldValue;
use crate::widgets::{
    BootstrapCheckbox, BootstrapSelect, BootstrapTextInput, BootstrapTextarea, HiddenInput, Widget,
    WidgetAttrs,
};

/// A named input on a form.
///
/// A field owns its validators. Its `value` is bound from the submission
/// (or from `default`) when the form is flushed and is read-only after.
pub struct Field {
    /// Field name.
    pub name: String,
    /// Field label.
    pub label: String,
    /// Whether the field is marked as required when rendered.
    pub required: bool,
    /// The widget to render.
    pub widget: Box<dyn Widget>,
    /// Help text.
    pub help_text: Option<String>,
    /// Value used when the form was not submitted.
    pub default: FieldValue,
    /// Current value.
    pub value: FieldValue,
    /// Option key/label pairs for choice fields, in display order.
    pub choices: Vec<(String, String)>,
    /// Validators.
    pub validators: Vec<Box<dyn Validator>>,
    /// Widget attributes.
    pub attrs: WidgetAttrs,
    /// Whether the field is disabled.
    pub disabled: bool,
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("required", &self.required)
            .field("input_type", &self.widget.input_type())
            .field("default", &self.default)
            .field("value", &self.value)
            .field("choices", &self.choices)
            .field("validators", &self.validators.len())
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl Field {
    /// Creates a new field.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        widget: impl Widget + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: false,
            widget: Box::new(widget),
            help_text: None,
            default: FieldValue::Null,
            value: FieldValue::Null,
            choices: Vec::new(),
            validators: Vec::new(),
            attrs: WidgetAttrs::new(),
            disabled: false,
        }
    }

    /// Creates a plain text field.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, BootstrapTextInput::new())
    }

    /// Creates a multi-line text field.
    pub fn textarea(name: impl Into<String>, label: impl Into<String>, rows: usize) -> Self {
        Self::new(name, label, BootstrapTextarea::new(rows))
    }

    /// Creates a select field.
    pub fn select(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, BootstrapSelect::new())
    }

    /// Creates a checkbox field.
    pub fn checkbox(name: impl Into<String>, label: impl Into<String>) -> Self {
        let label = label.into();
        Self::new(name, label.clone(), BootstrapCheckbox::new().label(label))
    }

    /// Creates a hidden field.
    pub fn hidden(name: impl Into<String>) -> Self {
        Self::new(name, "", HiddenInput)
    }

    /// Marks the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = value.into();
        self
    }

    /// Sets the current value directly.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.value = value.into();
        self
    }

    /// Sets the choices of a choice field. Keys compare as strings.
    #[must_use]
    pub fn options<K, L>(mut self, options: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: ToString,
        L: Into<String>,
    {
        self.choices = options
            .into_iter()
            .map(|(k, l)| (k.to_string(), l.into()))
            .collect();
        self
    }

    /// Adds a validator.
    #[must_use]
    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Sets a widget attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Disables the field.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Returns the label for an option key.
    pub fn option_label(&self, key: &str) -> Option<&str> {
        self.choices
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, label)| label.as_str())
    }

    /// Returns whether the field submits several values.
    pub fn is_multiple(&self) -> bool {
        self.attrs.contains("multiple")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::RequiredValidator;

    #[test]
    fn test_field_builder() {
        let field = Field::text("username", "Username")
            .required()
            .validator(RequiredValidator::new())
            .help_text("Choose a unique username")
            .attr("placeholder", "Enter username");

        assert_eq!(field.name, "username");
        assert_eq!(field.label, "Username");
        assert!(field.required);
        assert_eq!(field.validators.len(), 1);
        assert_eq!(
            field.help_text,
            Some("Choose a unique username".to_string())
        );
        assert_eq!(field.value, FieldValue::Null);
    }

    #[test]
    fn test_select_options_with_mixed_keys() {
        let field = Field::select("status", "Status")
            .options([("in_process", "In process"), ("0", "Finished")])
            .default_value("0");

        assert_eq!(field.option_label("0"), Some("Finished"));
        assert_eq!(field.option_label("1"), None);
        assert_eq!(field.default, FieldValue::from("0"));

        let numeric = Field::select("n", "N").options([(1, "One"), (2, "Two")]);
        assert_eq!(numeric.option_label("2"), Some("Two"));
    }

    #[test]
    fn test_debug_skips_widget_internals() {
        let debug = format!("{:?}", Field::hidden("token"));
        assert!(debug.contains(r#"input_type: "hidden""#));
    }
}
