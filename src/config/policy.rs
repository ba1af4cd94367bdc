//! TOML policy file parsing.
//!
//! Defines the structure of the policy file with serde. The records are
//! structured (arrays of tables, explicit keys) rather than delimited
//! strings, so nothing is re-split downstream; the validation layer
//! ([`super::validated`]) turns this raw form into the engine's typed
//! [`crate::compose::Policy`].

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root structure of the policy file.
///
/// All sections are optional so a minimal policy only declares providers.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    /// Profile-wide settings and behavioral flags
    #[serde(default)]
    pub general: GeneralSection,

    /// Input/output file paths
    #[serde(default)]
    pub files: FilesSection,

    /// Upstream proxy providers, in declaration order
    #[serde(default)]
    pub providers: Vec<ProviderEntry>,

    /// Region definitions, in declaration order
    #[serde(default)]
    pub regions: Vec<RegionEntry>,

    /// Node exclusion keywords
    #[serde(default)]
    pub filter: FilterSection,

    /// Relay group declaration
    pub relay: Option<RelaySection>,

    /// Manual-select group declaration
    pub manual_select: Option<ManualSelectSection>,

    /// Default-node pins: group name to preferred first member
    #[serde(default)]
    pub pins: HashMap<String, String>,

    /// Per-main-group region lists; the single entry "manual" disables
    /// automatic region membership for that group
    #[serde(default)]
    pub main_regions: HashMap<String, Vec<String>>,

    /// Custom group declarations, in declaration order
    #[serde(default)]
    pub custom_groups: Vec<CustomGroupEntry>,
}

/// Profile-wide settings section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralSection {
    /// HTTP proxy port (default: 7890)
    pub port: Option<u16>,

    /// SOCKS proxy port (default: 7891)
    pub socks_port: Option<u16>,

    /// Allow LAN access (default: true)
    pub allow_lan: Option<bool>,

    /// Routing mode (default: "Rule")
    pub mode: Option<String>,

    /// Log level passed through to the profile (default: "info")
    pub log_level: Option<String>,

    /// External controller address (default: ":9090")
    pub external_controller: Option<String>,

    /// Health-check URL for providers and groups
    pub test_url: Option<String>,

    /// Default group type for region groups
    pub default_group_type: Option<String>,

    /// One merged group per region instead of one per (provider, region)
    #[serde(default)]
    pub merged_regions: bool,
}

/// Input/output path section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilesSection {
    /// Path to the rules document (default: config/rules.yaml)
    pub rules: Option<String>,

    /// Path the generated profile is written to
    pub output: Option<String>,
}

/// One upstream provider.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderEntry {
    /// Provider name; normalized to upper-case
    pub name: String,

    /// Fetch URL for the provider's node list
    pub url: String,
}

/// One region definition.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionEntry {
    /// Region name, used in group names and allow-lists
    pub name: String,

    /// Display emoji prefixed to group names
    pub emoji: String,

    /// Node-matching keywords; must be non-empty
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Restricts which providers this region draws from
    pub providers: Option<Vec<String>>,

    /// Per-region group type override
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Node exclusion section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Keywords excluding nodes from every built filter
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Relay group section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelaySection {
    /// Relay group name (default: "Relay")
    pub name: Option<String>,

    /// Relay group type (default: "fallback")
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Regions the relay aggregates; absent means all
    pub regions: Option<Vec<String>>,

    /// Main groups the relay is offered to; absent means all
    pub targets: Option<Vec<String>>,
}

/// Manual-select group section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManualSelectSection {
    /// Whether the group is generated at all
    #[serde(default)]
    pub enabled: bool,

    /// Group label (default: "Manual")
    pub name: Option<String>,

    /// Group emoji (default: "✋")
    pub emoji: Option<String>,
}

/// One custom group declaration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomGroupEntry {
    /// Group label; the emitted name is `{emoji}{label}`
    pub label: String,

    /// Display emoji
    pub emoji: String,

    /// Group type
    #[serde(rename = "type")]
    pub kind: String,

    /// Provider subset; absent means all providers
    pub providers: Option<Vec<String>>,

    /// Regions whose keywords form the group's filter
    #[serde(default)]
    pub regions: Vec<String>,

    /// Main groups the custom group is offered to; empty means all
    #[serde(default)]
    pub targets: Vec<String>,
}

impl PolicyFile {
    /// Loads the policy from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses the policy from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default policy file with comments.
#[must_use]
pub fn default_policy_template() -> String {
    r#"# Clash-Gen Policy File

[general]
# HTTP / SOCKS proxy ports
port = 7890
socks_port = 7891

# Allow LAN access
allow_lan = true

# Routing mode and log level passed through to the profile
mode = "Rule"
log_level = "info"

# External controller address
external_controller = ":9090"

# Health-check URL for providers and groups
# test_url = "http://connectivitycheck.gstatic.com/generate_204"

# Default type for region groups: select, url-test, fallback, load-balance
# default_group_type = "url-test"

# One merged group per region instead of one per (provider, region)
merged_regions = false

[files]
# Path to the rules document
rules = "config/rules.yaml"

# Path the generated profile is written to
output = "output/clash_profile.yaml"

# Upstream providers; at least one is required
[[providers]]
name = "A"
url = "https://example.com/subscription-a"

# Region definitions
[[regions]]
name = "HK"
emoji = "🇭🇰"
keywords = ["HK", "Hong Kong"]
# Restrict this region to specific providers:
# providers = ["A"]
# Override the default group type for this region:
# type = "fallback"

[filter]
# Keywords excluding nodes from every built filter
exclude = []

# Relay group aggregating the region groups
# [relay]
# name = "Relay"
# type = "url-test"
# regions = ["HK"]
# targets = ["Proxy"]

# Manual-select group over all providers
# [manual_select]
# enabled = true
# name = "Manual"
# emoji = "✋"

# Default-node pins: group name = preferred first member
# [pins]
# Proxy = "🇭🇰HK"

# Per-main-group region lists; ["manual"] disables automatic regions
# [main_regions]
# Proxy = ["HK"]

# Custom groups
# [[custom_groups]]
# label = "Stream"
# emoji = "🎬"
# type = "fallback"
# regions = ["HK"]
# providers = ["A"]
# targets = ["Proxy"]
"#
    .to_string()
}
