//! Message catalogs for user-facing validator text.
//!
//! Default messages are English literals looked up under the
//! [`DOMAIN`] domain, so an application can swap in translations without
//! touching validator code.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

/// Catalog domain used for every message this crate emits.
pub const DOMAIN: &str = "formhandler";

/// Source of translated messages.
pub trait MessageCatalog: Send + Sync {
    /// Returns the translation of `message` in `domain`, or the message
    /// itself when no translation exists.
    fn translate(&self, domain: &str, message: &str) -> String;
}

/// Catalog that returns every message untranslated.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalog;

impl MessageCatalog for DefaultCatalog {
    fn translate(&self, _domain: &str, message: &str) -> String {
        message.to_string()
    }
}

/// In-memory catalog: `domain -> (message -> translation)`.
///
/// ```rust
/// use formhandler::messages::{MessageCatalog, StaticCatalog, DOMAIN};
///
/// let catalog = StaticCatalog::from_json(
///     r#"{ "formhandler": { "Invalid email address.": "Adresse invalide." } }"#,
/// ).unwrap();
/// assert_eq!(
///     catalog.translate(DOMAIN, "Invalid email address."),
///     "Adresse invalide.",
/// );
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct StaticCatalog {
    domains: HashMap<String, HashMap<String, String>>,
}

impl StaticCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a JSON object of domains.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a translation.
    #[must_use]
    pub fn with(
        mut self,
        domain: impl Into<String>,
        message: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        self.domains
            .entry(domain.into())
            .or_default()
            .insert(message.into(), translation.into());
        self
    }
}

impl MessageCatalog for StaticCatalog {
    fn translate(&self, domain: &str, message: &str) -> String {
        self.domains
            .get(domain)
            .and_then(|messages| messages.get(message))
            .map_or_else(|| message.to_string(), Clone::clone)
    }
}
