//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

use crate::compose::GroupKind;

/// Default policy file path.
pub const POLICY_FILE: &str = "config/policy.toml";

/// Default rules document path.
pub const RULES_FILE: &str = "config/rules.yaml";

/// Default output profile path.
pub const OUTPUT_FILE: &str = "output/clash_profile.yaml";

/// Default HTTP proxy port.
pub const PORT: u16 = 7890;

/// Default SOCKS proxy port.
pub const SOCKS_PORT: u16 = 7891;

/// Default LAN access setting.
pub const ALLOW_LAN: bool = true;

/// Default routing mode.
pub const MODE: &str = "Rule";

/// Default log level passed through to the profile.
pub const LOG_LEVEL: &str = "info";

/// Default external controller address.
pub const EXTERNAL_CONTROLLER: &str = ":9090";

/// Default health-check URL for providers and groups.
pub const TEST_URL: &str = "http://connectivitycheck.gstatic.com/generate_204";

/// Default group kind in per-provider region mode.
pub const PER_PROVIDER_GROUP_KIND: GroupKind = GroupKind::UrlTest;

/// Default group kind in merged region mode.
pub const MERGED_GROUP_KIND: GroupKind = GroupKind::Fallback;

/// Default relay group name.
pub const RELAY_NAME: &str = "Relay";

/// Default relay group kind.
pub const RELAY_KIND: GroupKind = GroupKind::Fallback;

/// Default manual-select group label.
pub const MANUAL_SELECT_LABEL: &str = "Manual";

/// Default manual-select group emoji.
pub const MANUAL_SELECT_EMOJI: &str = "✋";
