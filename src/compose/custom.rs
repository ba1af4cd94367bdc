//! Custom group factory.
//!
//! Custom groups are ad-hoc provider-backed groups declared directly in
//! the policy, independent of the per-region factory. Each specification
//! is validated on its own; a bad spec is dropped with a warning and never
//! aborts the run.

use super::diagnostics::Diagnostics;
use super::filter::build_filter;
use super::group::ProxyGroup;
use super::policy::Policy;

/// A custom group plus its target-main annotation.
///
/// The annotation is engine-internal: the main assembler uses it to decide
/// which main groups offer the custom group, and only the inner group is
/// emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomGroup {
    /// The emitted group.
    pub group: ProxyGroup,
    /// Main groups the custom group is offered to; empty means all.
    pub targets: Vec<String>,
}

impl CustomGroup {
    /// Returns `true` if the custom group is offered to the named main group.
    #[must_use]
    pub fn targets_main(&self, main: &str) -> bool {
        self.targets.is_empty() || self.targets.iter().any(|t| t == main)
    }
}

/// Builds the custom groups from the policy's specifications.
#[must_use]
pub fn build_custom_groups(policy: &Policy, diagnostics: &mut Diagnostics) -> Vec<CustomGroup> {
    let mut groups = Vec::new();

    for spec in &policy.custom_specs {
        // Provider subset: explicit list intersected with known providers,
        // empty intersection drops the spec.
        let selected = match &spec.providers {
            Some(requested) => {
                let selected: Vec<String> = requested
                    .iter()
                    .filter(|p| policy.has_provider(p))
                    .cloned()
                    .collect();
                if selected.is_empty() {
                    diagnostics.warn(format!(
                        "Custom group '{}' references no known provider, skipping",
                        spec.label
                    ));
                    continue;
                }
                selected
            }
            None => policy.provider_names(),
        };

        // Region keyword union; unknown region names contribute nothing.
        let mut keywords = Vec::new();
        for region_name in &spec.regions {
            match policy.find_region(region_name) {
                Some(region) => keywords.extend(region.keywords.iter().cloned()),
                None => tracing::debug!(
                    "Custom group '{}': unknown region '{region_name}'",
                    spec.label
                ),
            }
        }
        if keywords.is_empty() {
            diagnostics.warn(format!(
                "Custom group '{}' resolves to no region keywords, skipping",
                spec.label
            ));
            continue;
        }

        let name = format!("{}{}", spec.emoji, spec.label);
        let filter = build_filter(&keywords, &policy.exclusions);

        groups.push(CustomGroup {
            group: ProxyGroup::new(name, spec.kind)
                .with_filter(filter)
                .with_url(policy.test_url.clone())
                .with_standard_tuning()
                .with_providers(selected),
            targets: spec.targets.clone(),
        });
    }

    if !groups.is_empty() {
        tracing::debug!("Generated {} custom groups", groups.len());
    }
    groups
}
