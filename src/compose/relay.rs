//! Relay group factory.
//!
//! Produces at most one "umbrella" group whose `proxies` list the region
//! group names (not providers), restricted to a configurable region
//! allow-list. A relay that would have zero members is skipped.

use super::diagnostics::Diagnostics;
use super::group::ProxyGroup;
use super::policy::Policy;
use super::region::RegionGroup;

/// Builds the relay group, if the policy declares one.
///
/// Aggregates the names of the already-generated region groups. If a
/// default-node pin is registered for the relay's own name and the pinned
/// member is present, it is moved to the front; a pin naming an absent
/// member is a warning, not an insertion.
#[must_use]
pub fn build_relay_group(
    policy: &Policy,
    region_groups: &[RegionGroup],
    diagnostics: &mut Diagnostics,
) -> Option<ProxyGroup> {
    let relay = policy.relay.as_ref()?;

    let mut proxies: Vec<String> = region_groups
        .iter()
        .filter(|rg| {
            relay
                .regions
                .as_ref()
                .is_none_or(|allowed| allowed.iter().any(|r| *r == rg.region))
        })
        .map(|rg| rg.group.name.clone())
        .collect();

    if proxies.is_empty() {
        diagnostics.warn(format!(
            "Relay group '{}' has no resolvable members, skipping",
            relay.name
        ));
        return None;
    }

    if let Some(pin) = policy.pin_for(&relay.name) {
        if let Some(position) = proxies.iter().position(|p| p == pin) {
            let pinned = proxies.remove(position);
            proxies.insert(0, pinned);
            tracing::debug!("Relay group '{}' default node set to '{pin}'", relay.name);
        } else {
            diagnostics.warn(format!(
                "Default node '{pin}' for relay group '{}' is not an available member",
                relay.name
            ));
        }
    }

    tracing::debug!(
        "Generated relay group '{}' with {} members",
        relay.name,
        proxies.len()
    );

    Some(
        ProxyGroup::new(relay.name.clone(), relay.kind)
            .with_proxies(proxies)
            .with_url(policy.test_url.clone())
            .with_relay_tuning(),
    )
}
