//! The complete Clash profile document.

use serde::Serialize;

use crate::compose::ProxyGroup;
use crate::config::ValidatedConfig;

use super::error::ProfileError;
use super::providers::provider_sources;

/// The full output document, serialized field-for-field.
#[derive(Debug, Serialize)]
pub struct Profile {
    /// HTTP proxy port
    pub port: u16,

    /// SOCKS proxy port
    #[serde(rename = "socks-port")]
    pub socks_port: u16,

    /// Allow LAN access
    #[serde(rename = "allow-lan")]
    pub allow_lan: bool,

    /// Routing mode
    pub mode: String,

    /// Log level
    #[serde(rename = "log-level")]
    pub log_level: String,

    /// External controller address
    #[serde(rename = "external-controller")]
    pub external_controller: String,

    /// Provider definitions
    #[serde(rename = "proxy-providers")]
    pub proxy_providers: serde_yaml::Mapping,

    /// The composed group list, in emission order
    #[serde(rename = "proxy-groups")]
    pub proxy_groups: Vec<ProxyGroup>,

    /// Rule-provider definitions, passed through verbatim
    #[serde(rename = "rule-providers")]
    pub rule_providers: serde_yaml::Mapping,

    /// Routing rules
    pub rules: Vec<String>,
}

/// Assembles the full profile from the validated configuration and the
/// composed groups.
///
/// # Errors
///
/// Returns an error if the provider section cannot be serialized.
pub fn assemble(
    config: &ValidatedConfig,
    proxy_groups: Vec<ProxyGroup>,
) -> Result<Profile, ProfileError> {
    Ok(Profile {
        port: config.general.port,
        socks_port: config.general.socks_port,
        allow_lan: config.general.allow_lan,
        mode: config.general.mode.clone(),
        log_level: config.general.log_level.clone(),
        external_controller: config.general.external_controller.clone(),
        proxy_providers: provider_sources(&config.policy.providers, &config.policy.test_url)?,
        proxy_groups,
        rule_providers: config.rule_providers.clone(),
        rules: config.rules.clone(),
    })
}
