//! Output group records and type-specific tuning.
//!
//! [`ProxyGroup`] is the single output entity of the composition engine.
//! A group either draws nodes from providers (`use` + `filter` + `url`) or
//! lists its members statically (`proxies`); the relay group is the only
//! group whose `proxies` entries are group names rather than providers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Health-check timeout for `fallback` groups, in milliseconds.
pub const FALLBACK_TIMEOUT_MS: u32 = 5000;

/// Health-check interval shared by all non-relay tuned groups, in seconds.
pub const STANDARD_INTERVAL_SECS: u32 = 600;

/// Latency tolerance for regular `url-test` groups, in milliseconds.
pub const URL_TEST_TOLERANCE_MS: u32 = 500;

/// Latency tolerance for the relay `url-test` group, in milliseconds.
///
/// Tighter than [`URL_TEST_TOLERANCE_MS`] because the relay arbitrates
/// between already-tested region groups.
pub const RELAY_TOLERANCE_MS: u32 = 100;

/// Health-check interval for the relay `url-test` group, in seconds.
pub const RELAY_INTERVAL_SECS: u32 = 300;

/// Node distribution strategy for `load-balance` groups.
pub const LOAD_BALANCE_STRATEGY: &str = "consistent-hashing";

/// The kind of a proxy group, as understood by Clash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    /// Manual selection by the user.
    #[serde(rename = "select")]
    Select,
    /// Automatic selection of the lowest-latency node.
    #[serde(rename = "url-test")]
    UrlTest,
    /// First healthy node in declaration order.
    #[serde(rename = "fallback")]
    Fallback,
    /// Requests spread across nodes.
    #[serde(rename = "load-balance")]
    LoadBalance,
}

impl GroupKind {
    /// Canonical Clash spelling of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::UrlTest => "url-test",
            Self::Fallback => "fallback",
            Self::LoadBalance => "load-balance",
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a group kind string is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown group type '{0}': expected select, url-test, fallback, or load-balance")]
pub struct UnknownGroupKind(pub String);

impl FromStr for GroupKind {
    type Err = UnknownGroupKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select" => Ok(Self::Select),
            "url-test" => Ok(Self::UrlTest),
            "fallback" => Ok(Self::Fallback),
            "load-balance" => Ok(Self::LoadBalance),
            other => Err(UnknownGroupKind(other.to_string())),
        }
    }
}

/// A fully-resolved proxy group record.
///
/// Optional fields are emitted only when set, so the serialized form
/// carries exactly the keys the downstream consumer expects for the
/// group's kind: `use`-backed groups carry `filter` and `url`,
/// statically-membered groups carry `proxies`, and numeric tuning fields
/// appear only for the kinds they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProxyGroup {
    /// Group name, unique across the whole output list.
    pub name: String,

    /// Group kind.
    #[serde(rename = "type")]
    pub kind: GroupKind,

    /// Static member list (group names, provider references, or `DIRECT`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxies: Option<Vec<String>>,

    /// Node-matching expression applied to provider nodes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Health-check URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Health-check timeout in milliseconds (`fallback` only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    /// Latency tolerance in milliseconds (`url-test` only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<u32>,

    /// Node distribution strategy (`load-balance` only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,

    /// Health-check interval in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,

    /// Providers the group draws nodes from.
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<String>>,
}

impl ProxyGroup {
    /// Creates a bare group with the given name and kind.
    #[must_use]
    pub const fn new(name: String, kind: GroupKind) -> Self {
        Self {
            name,
            kind,
            proxies: None,
            filter: None,
            url: None,
            timeout: None,
            tolerance: None,
            strategy: None,
            interval: None,
            providers: None,
        }
    }

    /// Sets the providers the group draws nodes from.
    #[must_use]
    pub fn with_providers(mut self, providers: Vec<String>) -> Self {
        self.providers = Some(providers);
        self
    }

    /// Sets the node-matching filter.
    #[must_use]
    pub fn with_filter(mut self, filter: String) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the health-check URL.
    #[must_use]
    pub fn with_url(mut self, url: String) -> Self {
        self.url = Some(url);
        self
    }

    /// Sets the static member list.
    #[must_use]
    pub fn with_proxies(mut self, proxies: Vec<String>) -> Self {
        self.proxies = Some(proxies);
        self
    }

    /// Applies the tuning constants regular groups use.
    ///
    /// `select` groups carry no tuning.
    #[must_use]
    pub fn with_standard_tuning(mut self) -> Self {
        match self.kind {
            GroupKind::Fallback => {
                self.timeout = Some(FALLBACK_TIMEOUT_MS);
                self.interval = Some(STANDARD_INTERVAL_SECS);
            }
            GroupKind::UrlTest => {
                self.tolerance = Some(URL_TEST_TOLERANCE_MS);
                self.interval = Some(STANDARD_INTERVAL_SECS);
            }
            GroupKind::LoadBalance => {
                self.strategy = Some(LOAD_BALANCE_STRATEGY.to_string());
                self.interval = Some(STANDARD_INTERVAL_SECS);
            }
            GroupKind::Select => {}
        }
        self
    }

    /// Applies the tuning constants the relay group uses.
    ///
    /// Identical to [`Self::with_standard_tuning`] except `url-test`
    /// gets a tighter tolerance and interval.
    #[must_use]
    pub fn with_relay_tuning(mut self) -> Self {
        if self.kind == GroupKind::UrlTest {
            self.tolerance = Some(RELAY_TOLERANCE_MS);
            self.interval = Some(RELAY_INTERVAL_SECS);
            self
        } else {
            self.with_standard_tuning()
        }
    }
}
