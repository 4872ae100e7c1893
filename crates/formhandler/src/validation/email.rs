//! Email address validator.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{Validator, ValidatorBase};
use crate::dns::{domain_exists, shared_resolver, DnsResolver};
use crate::error::Result;
use crate::messages::{DefaultCatalog, MessageCatalog, DOMAIN};
use crate::value::FieldValue;

const DEFAULT_MESSAGE: &str = "Invalid email address.";

// No quoted local parts, no IDN, 2-4 letter TLD. ASCII case folding only:
// with Unicode on, `[a-z]` would also match U+017F and U+212A.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)^[_a-z0-9-]+(\.[_a-z0-9-]+)*@[a-z0-9-]+(\.[a-z0-9-]+)*(\.[a-z]{2,4})$")
        .expect("email pattern is valid")
});

/// Checks that a value looks like an email address, and optionally that
/// its domain exists in DNS.
///
/// Only scalar values are accepted; a list is a programming error and
/// yields [`FormError::ScalarRequired`](crate::FormError::ScalarRequired).
///
/// ```rust
/// use std::sync::Arc;
/// use formhandler::dns::StaticResolver;
/// use formhandler::validation::EmailValidator;
///
/// let validator = EmailValidator::new()
///     .required(false)
///     .check_if_domain_exists(true)
///     .resolver(Arc::new(StaticResolver::new().mx("example.com", "mx.example.com")));
/// assert!(validator.is_check_if_domain_exists());
/// ```
#[derive(Clone)]
pub struct EmailValidator {
    base: ValidatorBase,
    required: bool,
    check_if_domain_exists: bool,
    resolver: Option<Arc<dyn DnsResolver>>,
}

impl fmt::Debug for EmailValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailValidator")
            .field("base", &self.base)
            .field("required", &self.required)
            .field("check_if_domain_exists", &self.check_if_domain_exists)
            .finish_non_exhaustive()
    }
}

impl EmailValidator {
    /// Creates a required email validator with the default message.
    pub fn new() -> Self {
        Self::with_catalog(&DefaultCatalog)
    }

    /// Creates a required email validator, translating the default message.
    pub fn with_catalog(catalog: &dyn MessageCatalog) -> Self {
        Self::with_message(catalog.translate(DOMAIN, DEFAULT_MESSAGE))
    }

    /// Creates an email validator with a custom message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            base: ValidatorBase::new(message),
            required: true,
            check_if_domain_exists: false,
            resolver: None,
        }
    }

    /// Sets whether an empty value fails.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets whether the domain must exist in DNS.
    #[must_use]
    pub const fn check_if_domain_exists(mut self, check: bool) -> Self {
        self.check_if_domain_exists = check;
        self
    }

    /// Replaces the resolver used for domain checks. Without one, the
    /// process-wide [`shared_resolver`] is used.
    #[must_use]
    pub fn resolver(mut self, resolver: Arc<dyn DnsResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Sets whether an empty value fails.
    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    /// Returns whether an empty value fails.
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Sets whether the domain must exist in DNS.
    pub fn set_check_if_domain_exists(&mut self, check: bool) {
        self.check_if_domain_exists = check;
    }

    /// Returns whether the domain must exist in DNS.
    pub const fn is_check_if_domain_exists(&self) -> bool {
        self.check_if_domain_exists
    }
}

impl Default for EmailValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for EmailValidator {
    fn base(&self) -> &ValidatorBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ValidatorBase {
        &mut self.base
    }

    fn check(&self, value: &FieldValue) -> Result<bool> {
        let address = self.base.scalar(value)?;

        if address.is_empty() {
            return Ok(!self.required);
        }

        if !EMAIL_REGEX.is_match(address) {
            return Ok(false);
        }

        if self.check_if_domain_exists {
            let host = address
                .split_once('@')
                .map_or(address, |(_, host)| host);
            let resolver = self.resolver.clone().unwrap_or_else(shared_resolver);
            let exists = domain_exists(resolver.as_ref(), host);
            debug!(host, exists, "checked email domain");
            return Ok(exists);
        }

        Ok(true)
    }
}
