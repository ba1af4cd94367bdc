//! Shared builders for composition tests.

use std::collections::HashMap;

use super::group::GroupKind;
use super::policy::{Policy, Provider, Region};

/// Test health-check URL.
pub const TEST_URL: &str = "http://connectivitycheck.gstatic.com/generate_204";

/// Builds a provider with a synthetic URL.
pub fn provider(name: &str) -> Provider {
    Provider {
        name: name.to_string(),
        url: format!("https://example.com/{}", name.to_lowercase()),
    }
}

/// Builds a region with no provider restriction and no kind override.
pub fn region(name: &str, emoji: &str, keywords: &[&str]) -> Region {
    Region {
        name: name.to_string(),
        emoji: emoji.to_string(),
        keywords: keywords.iter().map(ToString::to_string).collect(),
        providers: None,
        kind: None,
    }
}

/// Builds a minimal per-provider-mode policy with the given providers and
/// no regions, exclusions, or group declarations.
pub fn policy_with_providers(names: &[&str]) -> Policy {
    Policy {
        providers: names.iter().map(|n| provider(n)).collect(),
        regions: Vec::new(),
        exclusions: Vec::new(),
        merged_regions: false,
        default_kind: GroupKind::UrlTest,
        test_url: TEST_URL.to_string(),
        pins: HashMap::new(),
        main_regions: HashMap::new(),
        custom_specs: Vec::new(),
        relay: None,
        manual_select: None,
        main_groups: Vec::new(),
        special_groups: Vec::new(),
    }
}

/// Builds the two-provider, one-region policy used by the scenario tests:
/// providers `A`/`B`, region `HK` with keywords `HK` and `Hong Kong`.
pub fn hk_policy() -> Policy {
    let mut policy = policy_with_providers(&["A", "B"]);
    policy.regions = vec![region("HK", "🇭🇰", &["HK", "Hong Kong"])];
    policy
}
