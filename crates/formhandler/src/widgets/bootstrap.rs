//! Bootstrap 5 form widgets.

use super::{html_escape, RenderContext, Widget};

/// Bootstrap 5 text input widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextInput {
    /// The HTML input type (text, email, password, date, etc.).
    pub input_type: String,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for BootstrapTextInput {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            placeholder: None,
        }
    }
}

impl BootstrapTextInput {
    /// Creates a new text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input of the given HTML type.
    pub fn of_type(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
            ..Default::default()
        }
    }

    /// Creates a password input.
    pub fn password() -> Self {
        Self::of_type("password")
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self::of_type("email")
    }

    /// Creates a number input.
    pub fn number() -> Self {
        Self::of_type("number")
    }

    /// Creates a date input.
    pub fn date() -> Self {
        Self::of_type("date")
    }

    /// Creates a URL input.
    pub fn url() -> Self {
        Self::of_type("url")
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl Widget for BootstrapTextInput {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        // Passwords are never echoed back.
        let value_attr = if self.input_type == "password" {
            String::new()
        } else {
            ctx.value_attr()
        };

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        format!(
            r#"<input type="{}" class="{}" id="{}" name="{}"{value_attr}{placeholder_attr}{}>"#,
            self.input_type,
            ctx.class("form-control"),
            html_escape(&ctx.id()),
            html_escape(ctx.name),
            ctx.extra_attrs()
        )
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// Bootstrap 5 textarea widget.
#[derive(Debug, Clone)]
pub struct BootstrapTextarea {
    /// Number of rows.
    pub rows: usize,
    /// Placeholder text.
    pub placeholder: Option<String>,
}

impl Default for BootstrapTextarea {
    fn default() -> Self {
        Self {
            rows: 4,
            placeholder: None,
        }
    }
}

impl BootstrapTextarea {
    /// Creates a new textarea with the specified rows.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            placeholder: None,
        }
    }

    /// Sets the placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }
}

impl Widget for BootstrapTextarea {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let content = ctx.value.as_scalar().map(html_escape).unwrap_or_default();

        let placeholder_attr = self
            .placeholder
            .as_ref()
            .map(|p| format!(r#" placeholder="{}""#, html_escape(p)))
            .unwrap_or_default();

        format!(
            r#"<textarea class="{}" id="{}" name="{}" rows="{}"{placeholder_attr}{}>{content}</textarea>"#,
            ctx.class("form-control"),
            html_escape(&ctx.id()),
            html_escape(ctx.name),
            self.rows,
            ctx.extra_attrs()
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// Bootstrap 5 select widget.
///
/// Options come from the field's choices. With a `multiple` attribute the
/// select submits `name[]` and every option contained in a list value is
/// selected.
#[derive(Debug, Clone)]
pub struct BootstrapSelect {
    /// Whether to include an empty option.
    pub include_blank: bool,
    /// Label for blank option.
    pub blank_label: String,
}

impl Default for BootstrapSelect {
    fn default() -> Self {
        Self {
            include_blank: true,
            blank_label: "---------".to_string(),
        }
    }
}

impl BootstrapSelect {
    /// Creates a new select with a blank option.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disables the blank option.
    #[must_use]
    pub fn no_blank(mut self) -> Self {
        self.include_blank = false;
        self
    }

    /// Sets the blank label.
    #[must_use]
    pub fn blank_label(mut self, label: impl Into<String>) -> Self {
        self.blank_label = label.into();
        self
    }
}

impl Widget for BootstrapSelect {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let mut options = String::new();

        if self.include_blank && !ctx.is_multiple() {
            options.push_str(&format!(
                r#"<option value="">{}</option>"#,
                html_escape(&self.blank_label)
            ));
        }

        for (key, label) in ctx.choices {
            let selected_attr = if ctx.value.contains(key) {
                " selected"
            } else {
                ""
            };
            options.push_str(&format!(
                r#"<option value="{}"{selected_attr}>{}</option>"#,
                html_escape(key),
                html_escape(label)
            ));
        }

        format!(
            r#"<select class="{}" id="{}" name="{}"{}>{options}</select>"#,
            ctx.class("form-select"),
            html_escape(&ctx.id()),
            html_escape(&ctx.name_attr()),
            ctx.extra_attrs()
        )
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// Value a checkbox submits when ticked.
pub const CHECKED_VALUE: &str = "on";

/// Bootstrap 5 checkbox, optionally styled as a switch.
///
/// Ticked when the bound value [`is_checked`](crate::FieldValue::is_checked).
/// Browsers omit unticked boxes from the body, so they bind as `Null`.
#[derive(Debug, Clone, Default)]
pub struct BootstrapCheckbox {
    label: Option<String>,
    switch: bool,
}

impl BootstrapCheckbox {
    /// Creates a plain checkbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a switch-style checkbox.
    pub fn switch() -> Self {
        Self {
            switch: true,
            ..Self::default()
        }
    }

    /// Sets the label shown next to the box.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Widget for BootstrapCheckbox {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let id = html_escape(&ctx.id());
        let wrapper = if self.switch {
            "form-check form-switch"
        } else {
            "form-check"
        };
        let checked = if ctx.value.is_checked() { " checked" } else { "" };
        let label = self.label.as_deref().map_or_else(String::new, |text| {
            format!(
                r#"<label class="form-check-label" for="{id}">{}</label>"#,
                html_escape(text)
            )
        });

        format!(
            r#"<div class="{wrapper}"><input class="{}" type="checkbox" id="{id}" name="{}" value="{CHECKED_VALUE}"{checked}{}>{label}</div>"#,
            ctx.class("form-check-input"),
            html_escape(ctx.name),
            ctx.extra_attrs()
        )
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

/// Bootstrap 5 radio select widget.
#[derive(Debug, Clone, Default)]
pub struct BootstrapRadioSelect {
    /// Whether to display inline.
    pub inline: bool,
}

impl BootstrapRadioSelect {
    /// Creates a new stacked radio group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the radios display inline.
    #[must_use]
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

impl Widget for BootstrapRadioSelect {
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let wrapper_class = if self.inline {
            "form-check form-check-inline"
        } else {
            "form-check"
        };

        ctx.choices
            .iter()
            .enumerate()
            .map(|(i, (key, label))| {
                let id = html_escape(&format!("{}_{i}", ctx.id()));
                let checked_attr = if ctx.value.contains(key) {
                    " checked"
                } else {
                    ""
                };
                format!(
                    r#"<div class="{wrapper_class}"><input class="form-check-input" type="radio" id="{id}" name="{}" value="{}"{checked_attr}><label class="form-check-label" for="{id}">{}</label></div>"#,
                    html_escape(ctx.name),
                    html_escape(key),
                    html_escape(label)
                )
            })
            .collect()
    }

    fn input_type(&self) -> &str {
        "radio"
    }
}
