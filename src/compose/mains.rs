//! Main group assembler.
//!
//! For each declared main group the assembler builds a static member list
//! in a fixed precedence order: pinned default node, region groups, custom
//! groups targeting this main, the relay group, the manual-select group,
//! and the terminal `DIRECT` fallback. Each candidate is added at most
//! once; the pinned default node, pushed first, therefore wins over any
//! later natural occurrence.

use super::custom::CustomGroup;
use super::group::ProxyGroup;
use super::policy::{Policy, RegionSelection};
use super::region::RegionGroup;

/// The sentinel member name for direct connections.
pub const DIRECT: &str = "DIRECT";

/// A member list that silently drops duplicate entries.
#[derive(Debug, Default)]
struct MemberList(Vec<String>);

impl MemberList {
    fn push(&mut self, member: impl Into<String>) {
        let member = member.into();
        if !self.0.contains(&member) {
            self.0.push(member);
        }
    }

    fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Builds the declared main groups followed by the pass-through special
/// groups.
#[must_use]
pub fn build_main_groups(
    policy: &Policy,
    region_groups: &[RegionGroup],
    custom_groups: &[CustomGroup],
    relay: Option<&ProxyGroup>,
    manual_select: Option<&ProxyGroup>,
) -> Vec<ProxyGroup> {
    let mut groups = Vec::new();

    for main in &policy.main_groups {
        let mut members = MemberList::default();

        // 1. Pinned default node goes first; absent pins are prepended
        //    rather than dropped, the member may come from a provider.
        if let Some(pin) = policy.pin_for(&main.name) {
            members.push(pin);
        }

        // 2. Region membership: allow-list, manual sentinel, or all.
        push_region_members(&mut members, policy, region_groups, &main.name);

        // 3. Custom groups targeting this main (empty targets = all mains).
        for custom in custom_groups {
            if custom.targets_main(&main.name) {
                members.push(custom.group.name.clone());
            }
        }

        // 4. Relay group, honoring its own target gate.
        if let Some(relay) = relay {
            if relay_targets_main(policy, &main.name) {
                members.push(relay.name.clone());
            }
        }

        // 5. Manual-select group.
        if let Some(manual) = manual_select {
            members.push(manual.name.clone());
        }

        // 6. Terminal direct-connection fallback.
        members.push(DIRECT);

        groups.push(ProxyGroup::new(main.name.clone(), main.kind).with_proxies(members.into_inner()));
    }

    // Special groups carry their member list verbatim.
    for special in &policy.special_groups {
        groups.push(
            ProxyGroup::new(special.name.clone(), special.kind)
                .with_proxies(special.proxies.clone()),
        );
    }

    groups
}

/// Adds the region groups a main group should offer.
fn push_region_members(
    members: &mut MemberList,
    policy: &Policy,
    region_groups: &[RegionGroup],
    main_name: &str,
) {
    match policy.main_regions.get(main_name) {
        Some(RegionSelection::Manual) => {
            tracing::debug!("Main group '{main_name}' is manual, no region groups added");
        }
        Some(RegionSelection::Regions(allowed)) => {
            for rg in region_groups {
                if allowed.iter().any(|r| *r == rg.region) {
                    members.push(rg.group.name.clone());
                }
            }
        }
        None => {
            for rg in region_groups {
                members.push(rg.group.name.clone());
            }
        }
    }
}

/// Returns `true` if the relay group is offered to the named main group.
fn relay_targets_main(policy: &Policy, main_name: &str) -> bool {
    policy
        .relay
        .as_ref()
        .and_then(|relay| relay.targets.as_ref())
        .is_none_or(|targets| targets.iter().any(|t| t == main_name))
}
