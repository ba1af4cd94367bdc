//! Engine input types.
//!
//! A [`Policy`] is the fully-validated input of one composition run:
//! providers, regions, exclusion keywords, behavioral flags, and the
//! group declarations. It is produced once per run by the configuration
//! layer ([`crate::config`]) and never mutated by the engine.

use std::collections::HashMap;

use super::group::GroupKind;

/// An upstream source of proxy nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Unique key, case-normalized to upper-case.
    pub name: String,
    /// Fetch URL for the provider's node list.
    pub url: String,
}

/// A labeled cluster of node-matching keywords plus a display emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Region name, used in group names and allow-lists.
    pub name: String,
    /// Display emoji prefixed to group names.
    pub emoji: String,
    /// Node-matching keywords; non-empty by construction, the
    /// configuration layer rejects zero-keyword regions.
    pub keywords: Vec<String>,
    /// Restricts which providers this region draws from.
    /// `None` means all providers.
    pub providers: Option<Vec<String>>,
    /// Per-region group kind override. `None` falls back to
    /// [`Policy::default_kind`].
    pub kind: Option<GroupKind>,
}

impl Region {
    /// Returns `true` if the region allows the named provider.
    #[must_use]
    pub fn allows_provider(&self, provider: &str) -> bool {
        self.providers
            .as_ref()
            .is_none_or(|allowed| allowed.iter().any(|p| p == provider))
    }
}

/// A custom group specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSpec {
    /// Group label; the emitted name is `{emoji}{label}`.
    pub label: String,
    /// Display emoji.
    pub emoji: String,
    /// Group kind.
    pub kind: GroupKind,
    /// Provider subset; `None` means all providers.
    pub providers: Option<Vec<String>>,
    /// Regions whose keywords form the group's filter.
    pub regions: Vec<String>,
    /// Main groups the custom group is offered to; empty means all.
    pub targets: Vec<String>,
}

/// The relay ("umbrella") group policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayPolicy {
    /// Relay group name.
    pub name: String,
    /// Relay group kind.
    pub kind: GroupKind,
    /// Regions whose groups the relay aggregates; `None` means all.
    pub regions: Option<Vec<String>>,
    /// Main groups the relay is offered to; `None` means all.
    pub targets: Option<Vec<String>>,
}

/// The manual-select group policy. Present only when enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualSelectPolicy {
    /// Group label; the emitted name is `{emoji}{label}`.
    pub label: String,
    /// Display emoji.
    pub emoji: String,
}

/// A declared main group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainGroup {
    /// Group name, referenced by rules.
    pub name: String,
    /// Group kind.
    pub kind: GroupKind,
}

/// A special group passed through verbatim with a static member list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialGroup {
    /// Group name.
    pub name: String,
    /// Group kind.
    pub kind: GroupKind,
    /// Static member list, emitted as-is.
    pub proxies: Vec<String>,
}

/// Region membership override for a main group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSelection {
    /// No region groups are added automatically.
    Manual,
    /// Only the named regions' groups are added.
    Regions(Vec<String>),
}

/// The complete, validated input of one composition run.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    /// Upstream providers, in declaration order.
    pub providers: Vec<Provider>,
    /// Regions, in declaration order.
    pub regions: Vec<Region>,
    /// Keywords excluding nodes from every built filter.
    pub exclusions: Vec<String>,
    /// One merged group per region instead of one per (provider, region).
    pub merged_regions: bool,
    /// Group kind for regions without an override.
    pub default_kind: GroupKind,
    /// Health-check URL carried by provider-backed groups.
    pub test_url: String,
    /// Default-node pins: group name to preferred first member.
    pub pins: HashMap<String, String>,
    /// Per-main-group region membership overrides.
    pub main_regions: HashMap<String, RegionSelection>,
    /// Custom group specifications, in declaration order.
    pub custom_specs: Vec<GroupSpec>,
    /// Relay group policy, if any.
    pub relay: Option<RelayPolicy>,
    /// Manual-select group policy, if enabled.
    pub manual_select: Option<ManualSelectPolicy>,
    /// Declared main groups, in declaration order.
    pub main_groups: Vec<MainGroup>,
    /// Special groups passed through verbatim.
    pub special_groups: Vec<SpecialGroup>,
}

impl Policy {
    /// Returns the provider names in declaration order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name.clone()).collect()
    }

    /// Returns `true` if a provider with the given name exists.
    #[must_use]
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.iter().any(|p| p.name == name)
    }

    /// Looks up a region by name.
    #[must_use]
    pub fn find_region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Looks up the pinned default node for a group, if any.
    #[must_use]
    pub fn pin_for(&self, group: &str) -> Option<&str> {
        self.pins.get(group).map(String::as_str)
    }
}
