//! The `proxy-providers` section of the output document.

use serde::Serialize;

use crate::compose::Provider;

use super::error::ProfileError;

/// Node-list refresh interval for providers, in seconds.
pub const PROVIDER_INTERVAL_SECS: u32 = 3600;

/// Provider health-check interval, in seconds.
pub const HEALTH_CHECK_INTERVAL_SECS: u32 = 300;

/// One provider entry in the `proxy-providers` section.
#[derive(Debug, Serialize)]
struct ProviderSource {
    #[serde(rename = "type")]
    kind: &'static str,
    path: String,
    url: String,
    interval: u32,
    #[serde(rename = "health-check")]
    health_check: HealthCheck,
}

#[derive(Debug, Serialize)]
struct HealthCheck {
    enable: bool,
    url: String,
    interval: u32,
}

/// Builds the `proxy-providers` mapping, one `http` entry per provider,
/// in declaration order.
///
/// # Errors
///
/// Returns an error if an entry cannot be serialized.
pub fn provider_sources(
    providers: &[Provider],
    test_url: &str,
) -> Result<serde_yaml::Mapping, ProfileError> {
    let mut mapping = serde_yaml::Mapping::new();

    for provider in providers {
        let source = ProviderSource {
            kind: "http",
            path: format!(
                "./profiles/proxies/{}_proxies.yaml",
                provider.name.to_lowercase()
            ),
            url: provider.url.clone(),
            interval: PROVIDER_INTERVAL_SECS,
            health_check: HealthCheck {
                enable: true,
                url: test_url.to_string(),
                interval: HEALTH_CHECK_INTERVAL_SECS,
            },
        };
        mapping.insert(
            serde_yaml::Value::from(provider.name.clone()),
            serde_yaml::to_value(&source)?,
        );
    }

    Ok(mapping)
}
