//! Manual-select group factory.
//!
//! Produces at most one `select` group exposing every provider directly,
//! with no filter and no per-region breakdown, for manual override.

use super::group::{GroupKind, ProxyGroup};
use super::policy::Policy;

/// Builds the manual-select group, if enabled by the policy.
#[must_use]
pub fn build_manual_select_group(policy: &Policy) -> Option<ProxyGroup> {
    let manual = policy.manual_select.as_ref()?;

    let name = format!("{}{}", manual.emoji, manual.label);
    tracing::debug!("Generated manual-select group '{name}'");

    Some(ProxyGroup::new(name, GroupKind::Select).with_providers(policy.provider_names()))
}
