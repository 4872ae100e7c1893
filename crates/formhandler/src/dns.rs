//! DNS lookups used to check that an email domain exists.
//!
//! Resolvers advertise their capabilities when constructed; the check in
//! [`domain_exists`] picks its strategy from those capabilities instead of
//! probing the platform on every validation. [`default_resolver`] picks
//! the most capable resolver the host supports.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::net::{IpAddr, ToSocketAddrs};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use hickory_resolver::config::ResolverOpts;
use hickory_resolver::proto::rr::RecordType;
use hickory_resolver::Resolver;
use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{FormError, Result};

pub use hickory_resolver::config::ResolverConfig;

static SHARED: Lazy<Arc<dyn DnsResolver>> = Lazy::new(|| default_resolver(None));

/// Returns the process-wide resolver used by validators that were not
/// given one. Built on first use.
pub fn shared_resolver() -> Arc<dyn DnsResolver> {
    Arc::clone(&SHARED)
}

/// Builds an MX-capable [`NetworkResolver`] from the host's resolver
/// configuration, or a [`SystemResolver`] when that configuration cannot
/// be read.
pub fn default_resolver(timeout: Option<Duration>) -> Arc<dyn DnsResolver> {
    match NetworkResolver::from_system_conf(timeout) {
        Ok(resolver) => Arc::new(resolver),
        Err(err) => {
            warn!(%err, "falling back to platform host lookup");
            Arc::new(SystemResolver { timeout })
        }
    }
}

/// The DNS primitives needed by domain checks.
pub trait DnsResolver: Send + Sync {
    /// Whether [`lookup_mx`](Self::lookup_mx) and
    /// [`has_any_record`](Self::has_any_record) are usable.
    fn supports_mx(&self) -> bool;

    /// Returns the mail exchangers for `host`. Empty on failure.
    fn lookup_mx(&self, host: &str) -> Vec<String>;

    /// Returns whether `host` has any DNS record at all.
    fn has_any_record(&self, host: &str) -> bool;

    /// Resolves `host` to an address.
    fn resolve_host(&self, host: &str) -> Option<IpAddr>;
}

/// Returns whether mail for `host` could plausibly be delivered.
///
/// With MX support: an MX record, or failing that any record, is enough.
/// Without it: the host must resolve to an address. Lookup failures of
/// any kind count as "does not exist".
pub fn domain_exists(resolver: &dyn DnsResolver, host: &str) -> bool {
    if resolver.supports_mx() {
        let exchangers = resolver.lookup_mx(host);
        if !exchangers.is_empty() {
            debug!(host, ?exchangers, "domain has MX records");
            return true;
        }
        let exists = resolver.has_any_record(host);
        debug!(host, exists, "no MX records, checked for any record");
        exists
    } else {
        let address = resolver.resolve_host(host);
        debug!(host, ?address, "MX lookup unsupported, resolved host");
        address.is_some()
    }
}

/// Resolver backed by the platform's host lookup.
///
/// The standard library exposes no MX queries, so this resolver reports
/// no MX support and domain checks fall back to forward resolution.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver {
    timeout: Option<Duration>,
}

impl SystemResolver {
    /// Creates a resolver that waits as long as the platform does.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver that gives up after `timeout`.
    ///
    /// A lookup that times out counts as a failed resolution. The platform
    /// lookup cannot be cancelled, so every timed-out lookup leaves one
    /// detached thread running until the platform gives up.
    pub const fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Returns the configured timeout.
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn lookup(host: &str) -> Option<IpAddr> {
        (host, 0)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .map(|addr| addr.ip())
    }
}

impl DnsResolver for SystemResolver {
    fn supports_mx(&self) -> bool {
        false
    }

    fn lookup_mx(&self, _host: &str) -> Vec<String> {
        Vec::new()
    }

    fn has_any_record(&self, host: &str) -> bool {
        self.resolve_host(host).is_some()
    }

    fn resolve_host(&self, host: &str) -> Option<IpAddr> {
        let Some(timeout) = self.timeout else {
            return Self::lookup(host);
        };

        let (tx, rx) = mpsc::channel();
        let owned = host.to_string();
        thread::spawn(move || {
            let _ = tx.send(Self::lookup(&owned));
        });

        match rx.recv_timeout(timeout) {
            Ok(address) => address,
            Err(_) => {
                warn!(host, ?timeout, "host lookup timed out");
                None
            }
        }
    }
}

/// Resolver that queries DNS servers directly, with MX support.
///
/// Blocking. Must not be called from inside an async runtime.
pub struct NetworkResolver {
    inner: Resolver,
}

impl fmt::Debug for NetworkResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkResolver").finish_non_exhaustive()
    }
}

impl NetworkResolver {
    /// Uses the name servers and options the host is configured with.
    pub fn from_system_conf(timeout: Option<Duration>) -> Result<Self> {
        let (config, opts) = hickory_resolver::system_conf::read_system_conf()
            .map_err(|e| FormError::Resolver(e.to_string()))?;
        Self::build(config, opts, timeout)
    }

    /// Uses the given name servers with default options.
    pub fn with_config(config: ResolverConfig, timeout: Option<Duration>) -> Result<Self> {
        Self::build(config, ResolverOpts::default(), timeout)
    }

    fn build(
        config: ResolverConfig,
        mut opts: ResolverOpts,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        if let Some(timeout) = timeout {
            opts.timeout = timeout;
        }
        let inner = Resolver::new(config, opts).map_err(|e| FormError::Resolver(e.to_string()))?;
        Ok(Self { inner })
    }
}

// Queried fully qualified so search domains are not appended.
fn fqdn(host: &str) -> String {
    if host.ends_with('.') {
        host.to_string()
    } else {
        format!("{host}.")
    }
}

impl DnsResolver for NetworkResolver {
    fn supports_mx(&self) -> bool {
        true
    }

    fn lookup_mx(&self, host: &str) -> Vec<String> {
        match self.inner.mx_lookup(fqdn(host)) {
            Ok(lookup) => lookup.iter().map(|mx| mx.exchange().to_utf8()).collect(),
            Err(err) => {
                debug!(host, %err, "MX lookup failed");
                Vec::new()
            }
        }
    }

    // Many servers refuse ANY queries, so an address also counts.
    fn has_any_record(&self, host: &str) -> bool {
        self.inner.lookup(fqdn(host), RecordType::ANY).is_ok() || self.resolve_host(host).is_some()
    }

    fn resolve_host(&self, host: &str) -> Option<IpAddr> {
        self.inner
            .lookup_ip(fqdn(host))
            .ok()
            .and_then(|ips| ips.iter().next())
    }
}

/// Table-driven resolver for tests and offline deployments.
///
/// ```rust
/// use formhandler::dns::{domain_exists, StaticResolver};
///
/// let resolver = StaticResolver::new()
///     .mx("example.com", "mail.example.com");
/// assert!(domain_exists(&resolver, "example.com"));
/// assert!(!domain_exists(&resolver, "nowhere.invalid"));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticResolver {
    /// Whether MX lookups are answered.
    pub supports_mx: bool,
    /// Mail exchangers per domain.
    pub mx: HashMap<String, Vec<String>>,
    /// Domains that have some non-MX record.
    pub records: HashSet<String>,
    /// Forward resolution table.
    pub hosts: HashMap<String, IpAddr>,
}

impl Default for StaticResolver {
    fn default() -> Self {
        Self {
            supports_mx: true,
            mx: HashMap::new(),
            records: HashSet::new(),
            hosts: HashMap::new(),
        }
    }
}

impl StaticResolver {
    /// Creates an empty resolver with MX support.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty resolver that only does forward resolution.
    pub fn without_mx() -> Self {
        Self {
            supports_mx: false,
            ..Self::default()
        }
    }

    /// Loads a resolver table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Adds a mail exchanger for a domain.
    #[must_use]
    pub fn mx(mut self, domain: impl Into<String>, exchanger: impl Into<String>) -> Self {
        self.mx
            .entry(domain.into())
            .or_default()
            .push(exchanger.into());
        self
    }

    /// Marks a domain as having some non-MX record.
    #[must_use]
    pub fn record(mut self, domain: impl Into<String>) -> Self {
        self.records.insert(domain.into());
        self
    }

    /// Adds a forward resolution entry.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>, address: IpAddr) -> Self {
        self.hosts.insert(host.into(), address);
        self
    }
}

impl DnsResolver for StaticResolver {
    fn supports_mx(&self) -> bool {
        self.supports_mx
    }

    fn lookup_mx(&self, host: &str) -> Vec<String> {
        self.mx.get(host).cloned().unwrap_or_default()
    }

    fn has_any_record(&self, host: &str) -> bool {
        self.records.contains(host) || self.mx.contains_key(host) || self.hosts.contains_key(host)
    }

    fn resolve_host(&self, host: &str) -> Option<IpAddr> {
        self.hosts.get(host).copied()
    }
}
