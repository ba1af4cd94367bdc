//! Tests for the region group factory.

use std::collections::BTreeSet;

use super::diagnostics::Diagnostics;
use super::group::{
    GroupKind, STANDARD_INTERVAL_SECS, URL_TEST_TOLERANCE_MS,
};
use super::region::build_region_groups;
use super::test_fixtures::{TEST_URL, hk_policy, policy_with_providers, region};

mod per_provider_mode {
    use super::*;

    #[test]
    fn emits_one_group_per_provider_region_pair() {
        let policy = hk_policy();
        let mut diag = Diagnostics::new();

        let groups = build_region_groups(&policy, &mut diag);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group.name, "🇭🇰HK_A");
        assert_eq!(groups[0].group.providers, Some(vec!["A".to_string()]));
        assert_eq!(groups[1].group.name, "🇭🇰HK_B");
        assert_eq!(groups[1].group.providers, Some(vec!["B".to_string()]));
        for rg in &groups {
            assert_eq!(rg.region, "HK");
            assert_eq!(rg.group.filter.as_deref(), Some("HK|Hong Kong"));
            assert_eq!(rg.group.url.as_deref(), Some(TEST_URL));
        }
        assert!(diag.is_empty());
    }

    #[test]
    fn iteration_is_provider_major_then_region_minor() {
        let mut policy = policy_with_providers(&["A", "B"]);
        policy.regions = vec![
            region("HK", "🇭🇰", &["HK"]),
            region("JP", "🇯🇵", &["JP"]),
        ];
        let mut diag = Diagnostics::new();

        let names: Vec<String> = build_region_groups(&policy, &mut diag)
            .into_iter()
            .map(|rg| rg.group.name)
            .collect();

        assert_eq!(names, ["🇭🇰HK_A", "🇯🇵JP_A", "🇭🇰HK_B", "🇯🇵JP_B"]);
    }

    #[test]
    fn region_provider_restriction_skips_other_providers() {
        let mut policy = hk_policy();
        policy.regions[0].providers = Some(vec!["B".to_string()]);
        let mut diag = Diagnostics::new();

        let groups = build_region_groups(&policy, &mut diag);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group.name, "🇭🇰HK_B");
        // A soft skip, not a warning.
        assert!(diag.is_empty());
    }

    #[test]
    fn default_kind_applies_standard_tuning() {
        let policy = hk_policy();
        let mut diag = Diagnostics::new();

        let groups = build_region_groups(&policy, &mut diag);

        assert_eq!(groups[0].group.kind, GroupKind::UrlTest);
        assert_eq!(groups[0].group.tolerance, Some(URL_TEST_TOLERANCE_MS));
        assert_eq!(groups[0].group.interval, Some(STANDARD_INTERVAL_SECS));
    }

    #[test]
    fn region_kind_override_wins_over_default() {
        let mut policy = hk_policy();
        policy.regions[0].kind = Some(GroupKind::LoadBalance);
        let mut diag = Diagnostics::new();

        let groups = build_region_groups(&policy, &mut diag);

        assert_eq!(groups[0].group.kind, GroupKind::LoadBalance);
        assert_eq!(groups[0].group.strategy.as_deref(), Some("consistent-hashing"));
    }

    #[test]
    fn exclusion_keywords_wrap_the_filter() {
        let mut policy = hk_policy();
        policy.exclusions = vec!["TEST".to_string()];
        let mut diag = Diagnostics::new();

        let groups = build_region_groups(&policy, &mut diag);

        assert_eq!(
            groups[0].group.filter.as_deref(),
            Some("(?!.*(TEST)).*(HK|Hong Kong)")
        );
    }
}

mod merged_mode {
    use super::*;

    #[test]
    fn emits_one_group_per_region_over_all_providers() {
        let mut policy = hk_policy();
        policy.merged_regions = true;
        let mut diag = Diagnostics::new();

        let groups = build_region_groups(&policy, &mut diag);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group.name, "🇭🇰HK");
        assert_eq!(
            groups[0].group.providers,
            Some(vec!["A".to_string(), "B".to_string()])
        );
        assert_eq!(groups[0].group.filter.as_deref(), Some("HK|Hong Kong"));
    }

    #[test]
    fn restriction_narrows_the_provider_set() {
        let mut policy = hk_policy();
        policy.merged_regions = true;
        policy.regions[0].providers = Some(vec!["B".to_string()]);
        let mut diag = Diagnostics::new();

        let groups = build_region_groups(&policy, &mut diag);

        assert_eq!(groups[0].group.providers, Some(vec!["B".to_string()]));
    }

    #[test]
    fn unknown_restricted_providers_skip_the_region_with_warning() {
        let mut policy = hk_policy();
        policy.merged_regions = true;
        policy.regions[0].providers = Some(vec!["NOPE".to_string()]);
        let mut diag = Diagnostics::new();

        let groups = build_region_groups(&policy, &mut diag);

        assert!(groups.is_empty());
        assert_eq!(diag.len(), 1);
        assert!(diag.warnings()[0].contains("HK"));
    }

    #[test]
    fn unknown_entries_in_restriction_are_dropped() {
        let mut policy = hk_policy();
        policy.merged_regions = true;
        policy.regions[0].providers = Some(vec!["NOPE".to_string(), "A".to_string()]);
        let mut diag = Diagnostics::new();

        let groups = build_region_groups(&policy, &mut diag);

        assert_eq!(groups[0].group.providers, Some(vec!["A".to_string()]));
    }
}

mod mode_equivalence {
    use super::*;

    /// The set of providers referenced across all region groups must be the
    /// same in both modes for the same restriction input.
    #[test]
    fn provider_coverage_matches_between_modes() {
        let mut per_provider = policy_with_providers(&["A", "B", "C"]);
        per_provider.regions = vec![
            region("HK", "🇭🇰", &["HK"]),
            region("JP", "🇯🇵", &["JP"]),
        ];
        per_provider.regions[1].providers = Some(vec!["C".to_string()]);

        let mut merged = per_provider.clone();
        merged.merged_regions = true;

        let coverage = |policy: &crate::compose::Policy| -> BTreeSet<String> {
            build_region_groups(policy, &mut Diagnostics::new())
                .into_iter()
                .flat_map(|rg| rg.group.providers.unwrap_or_default())
                .collect()
        };

        assert_eq!(coverage(&per_provider), coverage(&merged));
    }
}
