//! Composition driver.
//!
//! Sequences the factories and concatenates their output in the fixed
//! order downstream consumers rely on:
//! relay → main groups (including specials) → region groups → custom
//! groups → manual-select group.

use super::custom::build_custom_groups;
use super::diagnostics::Diagnostics;
use super::error::ComposeError;
use super::group::ProxyGroup;
use super::mains::build_main_groups;
use super::manual::build_manual_select_group;
use super::policy::Policy;
use super::region::build_region_groups;
use super::relay::build_relay_group;

/// The result of one composition run.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// The composed groups, in emission order.
    pub groups: Vec<ProxyGroup>,
    /// Warnings recorded by the factories.
    pub diagnostics: Diagnostics,
}

/// Composes the full, ordered proxy group list from a validated policy.
///
/// The composition is a pure function of the policy: running it twice on
/// identical inputs yields identical output.
///
/// # Errors
///
/// Returns [`ComposeError::NoProviders`] if the policy declares no
/// providers. Every other problem is recoverable and lands in the returned
/// [`Diagnostics`].
pub fn compose(policy: &Policy) -> Result<Composition, ComposeError> {
    if policy.providers.is_empty() {
        return Err(ComposeError::NoProviders);
    }

    let mut diagnostics = Diagnostics::new();

    let region_groups = build_region_groups(policy, &mut diagnostics);
    let custom_groups = build_custom_groups(policy, &mut diagnostics);
    let manual_select = build_manual_select_group(policy);
    let relay = build_relay_group(policy, &region_groups, &mut diagnostics);

    let main_groups = build_main_groups(
        policy,
        &region_groups,
        &custom_groups,
        relay.as_ref(),
        manual_select.as_ref(),
    );

    // Fixed emission order; a contract of the output, not an accident of
    // call sequence.
    let mut groups = Vec::new();
    groups.extend(relay);
    groups.extend(main_groups);
    groups.extend(region_groups.into_iter().map(|rg| rg.group));
    groups.extend(custom_groups.into_iter().map(|cg| cg.group));
    groups.extend(manual_select);

    tracing::info!("Composed {} proxy groups", groups.len());

    Ok(Composition {
        groups,
        diagnostics,
    })
}
