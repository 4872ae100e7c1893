//! Submitted form input.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{FormError, Result};
use crate::value::FieldValue;

/// Values submitted with a request, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    values: HashMap<String, FieldValue>,
}

impl Submission {
    /// Creates an empty submission (a plain page view).
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` body.
    ///
    /// `name[]` keys collect into a list; a repeated plain key keeps its
    /// last value.
    ///
    /// ```rust
    /// use formhandler::{FieldValue, Submission};
    ///
    /// let submission = Submission::from_urlencoded("name=Jane+Doe&tags[]=a&tags[]=b").unwrap();
    /// assert_eq!(submission.get("name"), Some(&FieldValue::from("Jane Doe")));
    /// assert!(submission.get("tags").unwrap().is_composite());
    /// ```
    pub fn from_urlencoded(body: &str) -> Result<Self> {
        let mut submission = Self::new();

        for pair in body.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(raw_key)?;
            let value = decode(raw_value)?;

            match key.strip_suffix("[]") {
                Some(name) => submission
                    .values
                    .entry(name.to_string())
                    .or_insert_with(|| FieldValue::List(Vec::new()))
                    .push(value),
                None => {
                    submission.values.insert(key, FieldValue::Scalar(value));
                }
            }
        }

        Ok(submission)
    }

    /// Decodes a JSON object of field values.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets a value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Returns the submitted value for a field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Returns whether a value was submitted under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns whether nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn decode(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| FormError::Parse(format!("{raw}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_pairs() {
        let submission =
            Submission::from_urlencoded("email=user%40example.com&name=Jane+Doe&empty=&flag")
                .unwrap();
        assert_eq!(
            submission.get("email"),
            Some(&FieldValue::from("user@example.com"))
        );
        assert_eq!(submission.get("name"), Some(&FieldValue::from("Jane Doe")));
        assert_eq!(submission.get("empty"), Some(&FieldValue::from("")));
        assert_eq!(submission.get("flag"), Some(&FieldValue::from("")));
        assert!(!submission.contains("missing"));
    }

    #[test]
    fn test_array_keys_collect() {
        let submission = Submission::from_urlencoded("ids%5B%5D=1&ids[]=2&ids[]=3").unwrap();
        assert_eq!(
            submission.get("ids"),
            Some(&FieldValue::List(vec![
                "1".to_string(),
                "2".to_string(),
                "3".to_string()
            ]))
        );
    }

    #[test]
    fn test_last_plain_value_wins() {
        let submission = Submission::from_urlencoded("a=1&a=2").unwrap();
        assert_eq!(submission.get("a"), Some(&FieldValue::from("2")));
    }

    #[test]
    fn test_malformed_encoding() {
        assert!(matches!(
            Submission::from_urlencoded("name=%FF%FE"),
            Err(FormError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let submission =
            Submission::from_json(r#"{ "email": "a@b.io", "ids": ["1", "2"], "gone": null }"#)
                .unwrap();
        assert_eq!(submission.get("email"), Some(&FieldValue::from("a@b.io")));
        assert!(submission.get("ids").unwrap().is_composite());
        assert_eq!(submission.get("gone"), Some(&FieldValue::Null));
        assert!(Submission::new().is_empty());
    }
}
