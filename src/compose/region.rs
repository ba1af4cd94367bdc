//! Region group factory.
//!
//! Two mutually exclusive modes, selected by [`Policy::merged_regions`]:
//!
//! - **Per-provider**: one group per (provider, region) pair, named
//!   `{emoji}{region}_{provider}`, drawing from that single provider.
//! - **Merged**: one group per region, named `{emoji}{region}`, drawing
//!   from the region's allowed providers (default: all).
//!
//! Iteration is provider-major then region-minor in per-provider mode and
//! region-major in merged mode, both in declaration order, so the output
//! is deterministic for a given policy.

use super::diagnostics::Diagnostics;
use super::filter::build_filter;
use super::group::ProxyGroup;
use super::policy::Policy;

/// A region group plus the region it was generated for.
///
/// The region name is engine-internal: the relay factory and the main
/// assembler use it to apply region allow-lists. Only the inner group is
/// emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionGroup {
    /// Name of the region the group belongs to.
    pub region: String,
    /// The emitted group.
    pub group: ProxyGroup,
}

/// Builds the region groups for the policy's configured mode.
#[must_use]
pub fn build_region_groups(policy: &Policy, diagnostics: &mut Diagnostics) -> Vec<RegionGroup> {
    if policy.merged_regions {
        build_merged(policy, diagnostics)
    } else {
        build_per_provider(policy)
    }
}

/// One group per (provider, region) pair, provider-major.
///
/// A region with a provider restriction that excludes the current provider
/// is skipped for that provider.
fn build_per_provider(policy: &Policy) -> Vec<RegionGroup> {
    let mut groups = Vec::new();

    for provider in &policy.providers {
        for region in &policy.regions {
            if !region.allows_provider(&provider.name) {
                tracing::debug!(
                    "Skipping {} group for region {}: provider not in region allow-list",
                    provider.name,
                    region.name,
                );
                continue;
            }

            let name = format!("{}{}_{}", region.emoji, region.name, provider.name);
            let kind = region.kind.unwrap_or(policy.default_kind);
            let filter = build_filter(&region.keywords, &policy.exclusions);

            groups.push(RegionGroup {
                region: region.name.clone(),
                group: ProxyGroup::new(name, kind)
                    .with_providers(vec![provider.name.clone()])
                    .with_filter(filter)
                    .with_url(policy.test_url.clone())
                    .with_standard_tuning(),
            });
        }
    }

    tracing::debug!("Generated {} per-provider region groups", groups.len());
    groups
}

/// One merged group per region, region-major.
///
/// A region whose provider restriction resolves to an empty intersection
/// with the known providers is skipped with a warning.
fn build_merged(policy: &Policy, diagnostics: &mut Diagnostics) -> Vec<RegionGroup> {
    let mut groups = Vec::new();

    for region in &policy.regions {
        let selected = match &region.providers {
            Some(allowed) => {
                let selected: Vec<String> = allowed
                    .iter()
                    .filter(|p| policy.has_provider(p))
                    .cloned()
                    .collect();
                if selected.is_empty() {
                    diagnostics.warn(format!(
                        "Region '{}' references no known provider, skipping its group",
                        region.name
                    ));
                    continue;
                }
                selected
            }
            None => policy.provider_names(),
        };

        let name = format!("{}{}", region.emoji, region.name);
        let kind = region.kind.unwrap_or(policy.default_kind);
        let filter = build_filter(&region.keywords, &policy.exclusions);

        groups.push(RegionGroup {
            region: region.name.clone(),
            group: ProxyGroup::new(name, kind)
                .with_providers(selected)
                .with_filter(filter)
                .with_url(policy.test_url.clone())
                .with_standard_tuning(),
        });
    }

    tracing::debug!("Generated {} merged region groups", groups.len());
    groups
}
