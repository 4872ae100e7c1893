//! Form rendering and lifecycle options.

use serde::Deserialize;

use crate::error::Result;

/// Options shared by the forms of an application.
///
/// Passed explicitly to [`Form::with_config`](crate::Form::with_config);
/// every key is optional when loading from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// HTTP method of the rendered form.
    pub method: String,
    /// Label of the submit button.
    pub submit_label: String,
    /// Suffix appended to the form name for the hidden submit marker.
    pub submit_suffix: String,
    /// Text appended to the label of required fields.
    pub required_marker: String,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            method: "post".to_string(),
            submit_label: "Submit".to_string(),
            submit_suffix: "_submit".to_string(),
            required_marker: " *".to_string(),
        }
    }
}

impl FormConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Sets the submit button label.
    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// Returns the submit marker name for a form.
    pub fn submit_marker(&self, form_name: &str) -> String {
        format!("{form_name}{}", self.submit_suffix)
    }
}
