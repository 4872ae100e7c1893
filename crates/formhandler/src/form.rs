//! Forms: the field registry, the flush lifecycle and rendering.

use std::collections::HashMap;

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Li, Ul};
use tracing::{debug, info};

use crate::config::FormConfig;
use crate::error::{FormError, Result, ValidationErrors};
use crate::field::Field;
use crate::submission::Submission;
use crate::validation::{FieldId, FieldSource, Validator};
use crate::value::FieldValue;
use crate::widgets::{HiddenInput, RenderContext, Widget, WidgetAttrs};

/// Key under which form-wide errors are collected.
pub const NON_FIELD_ERRORS: &str = "__all__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormState {
    Building,
    Flushed { submitted: bool },
}

/// A form: an ordered registry of fields plus the flush lifecycle.
///
/// ```rust
/// use formhandler::{fields, Form, Submission};
///
/// let mut form = Form::new("contact");
/// form.add_field(fields::email_field("email", "Email", true)).unwrap();
///
/// let body = "contact_submit=1&email=jane%40example.com";
/// let html = form.flush(&Submission::from_urlencoded(body).unwrap()).unwrap();
///
/// assert!(form.is_processed());
/// assert!(html.contains("jane@example.com"));
/// ```
#[derive(Debug)]
pub struct Form {
    name: String,
    action: String,
    config: FormConfig,
    fields: Vec<Field>,
    index: HashMap<String, FieldId>,
    errors: ValidationErrors,
    state: FormState,
}

impl Form {
    /// Creates an empty form with the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, FormConfig::default())
    }

    /// Creates an empty form with the given configuration.
    pub fn with_config(name: impl Into<String>, config: FormConfig) -> Self {
        Self {
            name: name.into(),
            action: String::new(),
            config,
            fields: Vec::new(),
            index: HashMap::new(),
            errors: ValidationErrors::new(),
            state: FormState::Building,
        }
    }

    /// Sets the URL the form posts to.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    /// Returns the form name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the configuration.
    pub const fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Adds a field and binds its validators to it.
    pub fn add_field(&mut self, mut field: Field) -> Result<FieldId> {
        if self.index.contains_key(&field.name) {
            return Err(FormError::DuplicateField(field.name));
        }

        let id = FieldId::new(self.fields.len());
        for validator in &mut field.validators {
            validator.bind(id)?;
        }

        debug!(form = %self.name, field = %field.name, %id, "added field");
        self.index.insert(field.name.clone(), id);
        self.fields.push(field);
        Ok(id)
    }

    /// Returns a field by handle.
    pub fn field(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.index())
    }

    /// Returns a field by name.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.index.get(name).and_then(|id| self.field(*id))
    }

    /// Returns the handle of a named field.
    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.index.get(name).copied()
    }

    /// Returns all fields in order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns the current value of a named field.
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.field_by_name(name).map(|field| &field.value)
    }

    /// Returns all current values by field name.
    pub fn values(&self) -> HashMap<&str, &FieldValue> {
        self.fields
            .iter()
            .map(|field| (field.name.as_str(), &field.value))
            .collect()
    }

    /// Binds values, validates when submitted, and renders the form.
    ///
    /// Only the first call binds and validates; verdicts are final for
    /// the form's lifetime, so later calls just render again.
    pub fn flush(&mut self, submission: &Submission) -> Result<String> {
        if self.state == FormState::Building {
            let submitted = submission.contains(&self.config.submit_marker(&self.name));
            self.bind(submission, submitted);

            if submitted {
                match self.validate() {
                    Ok(errors) => self.errors = errors,
                    Err(err) => {
                        // The next flush binds new values; drop verdicts read from these.
                        self.reset_verdicts();
                        return Err(err);
                    }
                }
            }
            self.state = FormState::Flushed { submitted };

            info!(
                form = %self.name,
                submitted,
                invalid_fields = self.errors.len(),
                "flushed form"
            );
        }

        Ok(self.render())
    }

    fn bind(&mut self, submission: &Submission, submitted: bool) {
        for field in &mut self.fields {
            field.value = if submitted {
                submission.get(&field.name).cloned().unwrap_or_default()
            } else {
                field.default.clone()
            };
        }
    }

    fn reset_verdicts(&self) {
        for validator in self.fields.iter().flat_map(|field| &field.validators) {
            validator.base().reset();
        }
    }

    // Must not run before values are bound: verdicts are memoized.
    fn validate(&self) -> Result<ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for field in &self.fields {
            for validator in &field.validators {
                if !validator.is_valid(self)? {
                    debug!(
                        form = %self.name,
                        field = %field.name,
                        message = validator.error_message(),
                        "validation failed"
                    );
                    errors.add(&field.name, validator.error_message());
                }
            }
        }

        Ok(errors)
    }

    /// Returns whether the form was submitted, every validator accepts
    /// its field's value and no form-wide error was added. False before
    /// the form has been flushed.
    pub fn is_valid(&self) -> Result<bool> {
        if !self.is_submitted() {
            return Ok(false);
        }
        Ok(self.validate()?.is_empty() && self.errors.get(NON_FIELD_ERRORS).is_none())
    }

    /// Returns whether the last flush saw this form's submit marker.
    pub fn is_submitted(&self) -> bool {
        matches!(self.state, FormState::Flushed { submitted: true })
    }

    /// Returns whether the form was submitted and every field is valid.
    pub fn is_processed(&self) -> bool {
        self.is_submitted() && self.errors.is_empty()
    }

    /// Returns the errors collected by the flush.
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Adds a form-wide error, e.g. after a failed business check.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.add(NON_FIELD_ERRORS, message);
    }

    /// Renders the form with Bootstrap 5 markup.
    pub fn render(&self) -> String {
        render_bootstrap_form(self)
    }
}

impl FieldSource for Form {
    fn field_value(&self, id: FieldId) -> Option<&FieldValue> {
        self.fields.as_slice().field_value(id)
    }
}

/// Renders a form field with Bootstrap 5 styling.
pub fn render_bootstrap_field(field: &Field, errors: &[String], config: &FormConfig) -> String {
    let id = format!("id_{}", field.name);
    let has_errors = !errors.is_empty();

    // Prepare widget attrs
    let mut attrs = field.attrs.clone();
    attrs.set("id", &id);

    if has_errors {
        let current_class = attrs.get("class").cloned().unwrap_or_default();
        attrs.set("class", format!("{current_class} is-invalid").trim());
    }

    if field.disabled {
        attrs.set("disabled", "disabled");
    }

    if field.required {
        attrs.set("required", "required");
    }

    let widget_html = field.widget.render(&RenderContext {
        name: &field.name,
        value: &field.value,
        choices: &field.choices,
        attrs: &attrs,
    });

    if field.widget.input_type() == "hidden" {
        return widget_html;
    }

    let required_marker = if field.required {
        config.required_marker.as_str()
    } else {
        ""
    };
    let label_text = format!("{}{required_marker}", field.label);
    // Checkboxes carry their own label next to the box.
    let label_html = if field.widget.input_type() == "checkbox" {
        String::new()
    } else {
        html! {
            label.for_(#id).class("form-label") { #label_text }
        }
        .render()
    };

    let help_text = field.help_text.clone();

    html! { div.class("mb-3") }
        .raw(&label_html)
        .raw(&widget_html)
        .children(errors, |error, div: Element<Div>| {
            div.class("invalid-feedback").text(error)
        })
        .when(help_text.is_some(), |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .text(help_text.as_deref().unwrap_or(""))
            })
        })
        .render()
}

/// Renders a complete form with Bootstrap 5 styling.
pub fn render_bootstrap_form(form: &Form) -> String {
    let config = form.config();
    let action = form.action.as_str();
    let method = config.method.as_str();
    let errors = form.errors();

    let mut html_form = html! {
        form.action(#action).method(#method)
    }
    .attr("name", form.name());

    // Non-field errors
    if let Some(form_errors) = errors.get(NON_FIELD_ERRORS) {
        html_form = html_form.child::<Div, _>(|d| {
            d.class("alert alert-danger")
                .attr("role", "alert")
                .child::<Ul, _>(|ul| {
                    ul.class("mb-0")
                        .children(form_errors.iter(), |e, li: Element<Li>| li.text(e))
                })
        });
    }

    // Render each field inside a wrapper div
    for field in form.fields() {
        let field_errors = errors.get(&field.name).cloned().unwrap_or_default();
        let field_html = render_bootstrap_field(field, &field_errors, config);
        html_form = html_form.child::<Div, _>(|d| d.raw(&field_html));
    }

    let marker = config.submit_marker(form.name());
    let marker_html = HiddenInput.render(&RenderContext {
        name: &marker,
        value: &FieldValue::from("1"),
        choices: &[],
        attrs: &WidgetAttrs::new(),
    });

    // Submit button
    let submit_label = config.submit_label.clone();
    html_form = html_form.child::<Div, _>(|d| {
        let btn = html! {
            button.type_("submit").class("btn btn-primary") {
                #submit_label
            }
        };
        d.raw(&marker_html).raw(btn.render())
    });

    html_form.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{date_field, email_field, select_field, text_field};
    use crate::validation::{EmailValidator, Verdict};

    fn contact_form() -> Form {
        let mut form = Form::new("contact").action("/contact");
        form.add_field(text_field("name", "Name", 50, true)).unwrap();
        form.add_field(email_field("email", "Email", true)).unwrap();
        form.add_field(date_field("birthday", "Birthday", false))
            .unwrap();
        form
    }

    #[test]
    fn test_add_field_binds_validators() {
        let mut form = Form::new("f");
        let id = form
            .add_field(email_field("email", "Email", true))
            .unwrap();
        let field = form.field(id).unwrap();
        assert_eq!(field.validators[0].field(), Some(id));
        assert_eq!(form.field_id("email"), Some(id));
    }

    #[test]
    fn test_duplicate_field_name() {
        let mut form = Form::new("f");
        form.add_field(Field::text("a", "A")).unwrap();
        assert!(matches!(
            form.add_field(Field::text("a", "Again")),
            Err(FormError::DuplicateField(name)) if name == "a"
        ));
    }

    #[test]
    fn test_prebound_validator_is_rejected() {
        let mut validator = EmailValidator::new();
        validator.bind(FieldId::new(5)).unwrap();
        let mut form = Form::new("f");
        assert!(matches!(
            form.add_field(Field::text("email", "Email").validator(validator)),
            Err(FormError::AlreadyBound { .. })
        ));
    }

    #[test]
    fn test_not_submitted_uses_defaults_and_skips_validation() {
        let mut form = Form::new("status");
        form.add_field(
            select_field("state", "State", vec![("a", "A"), ("0", "Finished")], true)
                .default_value("0"),
        )
        .unwrap();

        let html = form.flush(&Submission::new()).unwrap();
        assert!(!form.is_submitted());
        assert!(!form.is_processed());
        assert!(form.errors().is_empty());
        assert_eq!(form.value("state"), Some(&FieldValue::from("0")));
        assert!(html.contains(r#"value="0" selected"#));
        assert_eq!(
            form.field_by_name("state").unwrap().validators[0].verdict(),
            Verdict::Unevaluated
        );
    }

    #[test]
    fn test_valid_submission_is_processed() {
        let mut form = contact_form();
        let submission = Submission::new()
            .with("contact_submit", "1")
            .with("name", "Jane")
            .with("email", "jane@example.com");

        form.flush(&submission).unwrap();
        assert!(form.is_submitted());
        assert!(form.is_processed());
        assert!(form.is_valid().unwrap());
        assert_eq!(form.value("birthday"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_invalid_submission_collects_messages() {
        let mut form = contact_form();
        let submission = Submission::new()
            .with("contact_submit", "1")
            .with("email", "not-an-email")
            .with("birthday", "2024-02-30");

        let html = form.flush(&submission).unwrap();
        assert!(!form.is_processed());
        assert_eq!(
            form.errors().get("email"),
            Some(&vec!["Invalid email address.".to_string()])
        );
        assert_eq!(
            form.errors().get("birthday"),
            Some(&vec!["This value is incorrect.".to_string()])
        );
        assert_eq!(
            form.errors().get("name"),
            Some(&vec!["This field is required.".to_string()])
        );
        assert!(html.contains("is-invalid"));
        assert!(html.contains("Invalid email address."));
    }

    #[test]
    fn test_list_for_email_aborts_flush() {
        let mut form = contact_form();
        let submission = Submission::new()
            .with("contact_submit", "1")
            .with("email", vec!["1".to_string(), "2".to_string()]);
        assert!(matches!(
            form.flush(&submission),
            Err(FormError::ScalarRequired { .. })
        ));
    }

    #[test]
    fn test_failed_flush_does_not_keep_verdicts() {
        let mut form = contact_form();
        let misuse = Submission::new()
            .with("contact_submit", "1")
            .with("name", "")
            .with("email", vec!["a".to_string()]);
        assert!(form.flush(&misuse).is_err());
        assert!(!form.is_submitted());
        assert_eq!(
            form.field_by_name("name").unwrap().validators[0].verdict(),
            Verdict::Unevaluated
        );

        form.flush(
            &Submission::new()
                .with("contact_submit", "1")
                .with("name", "Jane")
                .with("email", "jane@example.com"),
        )
        .unwrap();
        assert_eq!(form.value("name"), Some(&FieldValue::from("Jane")));
        assert!(form.errors().is_empty());
        assert!(form.is_processed());
    }

    #[test]
    fn test_form_wide_error_makes_form_invalid() {
        let mut form = contact_form();
        form.flush(
            &Submission::new()
                .with("contact_submit", "1")
                .with("name", "Jane")
                .with("email", "jane@example.com"),
        )
        .unwrap();
        assert!(form.is_valid().unwrap());

        form.add_error("Address already registered.");
        assert!(!form.is_valid().unwrap());
        assert!(!form.is_processed());
    }

    #[test]
    fn test_second_flush_does_not_rebind() {
        let mut form = contact_form();
        form.flush(
            &Submission::new()
                .with("contact_submit", "1")
                .with("name", "Jane")
                .with("email", "jane@example.com"),
        )
        .unwrap();

        form.flush(&Submission::new().with("contact_submit", "1"))
            .unwrap();
        assert_eq!(form.value("name"), Some(&FieldValue::from("Jane")));
        assert!(form.is_processed());
    }

    #[test]
    fn test_render_field_no_errors() {
        let field = email_field("email", "Email", true)
            .help_text("We will never share your email")
            .with_value("test@example.com");

        let html = render_bootstrap_field(&field, &[], &FormConfig::default());
        assert!(html.contains("form-label"));
        assert!(html.contains("Email *"));
        assert!(html.contains("We will never share your email"));
        assert!(html.contains(r#"value="test@example.com""#));
        assert!(!html.contains("is-invalid"));
    }

    #[test]
    fn test_render_field_with_errors() {
        let field = email_field("email", "Email", false);
        let html = render_bootstrap_field(
            &field,
            &["Invalid email address.".to_string()],
            &FormConfig::default(),
        );
        assert!(html.contains("is-invalid"));
        assert!(html.contains("Invalid email address."));
    }

    #[test]
    fn test_render_form_has_marker_and_non_field_errors() {
        let mut form = contact_form();
        form.add_error("Please try again later.");
        let html = form.render();
        assert!(html.contains(r#"name="contact_submit""#));
        assert!(html.contains("alert alert-danger"));
        assert!(html.contains("Please try again later."));
        assert!(html.contains(r#"action="/contact""#));
        assert!(html.contains("Submit"));
    }
}
