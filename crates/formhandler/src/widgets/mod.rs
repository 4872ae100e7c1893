//! Form widgets for rendering HTML inputs.

mod bootstrap;

pub use bootstrap::{
    BootstrapCheckbox, BootstrapRadioSelect, BootstrapSelect, BootstrapTextInput, BootstrapTextarea,
    CHECKED_VALUE,
};

use std::collections::BTreeMap;

use crate::value::FieldValue;

/// Attributes that can be applied to a widget.
///
/// Kept sorted so the rendered markup is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttrs {
    /// HTML attributes.
    pub attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.attrs.get(key)
    }

    /// Returns whether an attribute is set.
    pub fn contains(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    /// Renders attributes as an HTML attribute string, skipping `exclude`.
    pub fn to_html_except(&self, exclude: &[&str]) -> String {
        self.attrs
            .iter()
            .filter(|(k, _)| !exclude.contains(&k.as_str()))
            .map(|(k, v)| format!(r#" {}="{}""#, html_escape(k), html_escape(v)))
            .collect()
    }

    /// Renders attributes as an HTML attribute string.
    pub fn to_html(&self) -> String {
        self.to_html_except(&[])
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

/// Everything a widget needs to render one field.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// The field name (used for the name attribute).
    pub name: &'a str,
    /// The value to display.
    pub value: &'a FieldValue,
    /// Option key/label pairs, for choice widgets.
    pub choices: &'a [(String, String)],
    /// Additional HTML attributes.
    pub attrs: &'a WidgetAttrs,
}

impl<'a> RenderContext<'a> {
    /// Returns the `id` attribute, defaulting to `id_<name>`.
    pub fn id(&self) -> String {
        self.attrs
            .get("id")
            .cloned()
            .unwrap_or_else(|| format!("id_{}", self.name))
    }

    /// Returns the base class with any extra class appended.
    pub fn class(&self, base: &str) -> String {
        match self.attrs.get("class") {
            Some(extra) => format!("{base} {extra}"),
            None => base.to_string(),
        }
    }

    /// Returns a `value="..."` attribute for scalar values.
    pub fn value_attr(&self) -> String {
        self.value
            .as_scalar()
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default()
    }

    /// Returns whether the field accepts several values.
    pub fn is_multiple(&self) -> bool {
        self.attrs.contains("multiple")
    }

    /// Name attribute; multi-value fields submit as `name[]`.
    pub fn name_attr(&self) -> String {
        if self.is_multiple() {
            format!("{}[]", self.name)
        } else {
            self.name.to_string()
        }
    }

    /// Extra attributes other than `id` and `class`.
    pub fn extra_attrs(&self) -> String {
        self.attrs.to_html_except(&["id", "class"])
    }
}

/// Trait for form widgets that render HTML inputs.
pub trait Widget: Send + Sync {
    /// Renders the widget as HTML.
    fn render(&self, ctx: &RenderContext<'_>) -> String;

    /// Returns the HTML input type.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// A hidden input widget.
#[derive(Debug, Clone, Default)]
pub struct HiddenInput;

impl Widget for HiddenInput {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        format!(
            r#"<input type="hidden" name="{}"{}{}>"#,
            html_escape(ctx.name),
            ctx.value_attr(),
            ctx.attrs.to_html()
        )
    }

    fn input_type(&self) -> &str {
        "hidden"
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
pub(crate) fn render_with(widget: &dyn Widget, name: &str, value: FieldValue) -> String {
    render_full(widget, name, &value, &[], &WidgetAttrs::new())
}

#[cfg(test)]
pub(crate) fn render_full(
    widget: &dyn Widget,
    name: &str,
    value: &FieldValue,
    choices: &[(String, String)],
    attrs: &WidgetAttrs,
) -> String {
    widget.render(&RenderContext {
        name,
        value,
        choices,
        attrs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_input() {
        let html = render_with(&HiddenInput, "contact_submit", FieldValue::from("1"));
        assert_eq!(html, r#"<input type="hidden" name="contact_submit" value="1">"#);
    }

    #[test]
    fn test_hidden_input_escapes_value() {
        let html = render_with(&HiddenInput, "token", FieldValue::from("\"><script>"));
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_widget_attrs() {
        let attrs = WidgetAttrs::new()
            .with("class", "form-control")
            .with("id", "my-input");
        assert_eq!(attrs.to_html(), r#" class="form-control" id="my-input""#);
        assert_eq!(attrs.to_html_except(&["id"]), r#" class="form-control""#);
    }

    #[test]
    fn test_context_helpers() {
        let value = FieldValue::Null;
        let attrs = WidgetAttrs::new().with("multiple", "multiple").with("class", "is-invalid");
        let ctx = RenderContext {
            name: "tags",
            value: &value,
            choices: &[],
            attrs: &attrs,
        };
        assert_eq!(ctx.id(), "id_tags");
        assert_eq!(ctx.name_attr(), "tags[]");
        assert_eq!(ctx.class("form-select"), "form-select is-invalid");
        assert_eq!(ctx.value_attr(), "");
    }
}
