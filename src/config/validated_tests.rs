//! Tests for configuration validation and merging.

use std::path::Path;

use crate::compose::{GroupKind, RegionSelection};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::policy::PolicyFile;
use super::rules::RulesDoc;
use super::validated::ValidatedConfig;

fn cli(args: &[&str]) -> Cli {
    let mut full = vec!["clash-gen"];
    full.extend_from_slice(args);
    Cli::parse_from_iter(full)
}

fn policy(content: &str) -> PolicyFile {
    PolicyFile::parse(content).unwrap()
}

fn rules(content: &str) -> RulesDoc {
    RulesDoc::parse(content).unwrap()
}

const MINIMAL_POLICY: &str = r#"
[[providers]]
name = "a"
url = "https://example.com/a"
"#;

mod provider_validation {
    use super::*;

    #[test]
    fn provider_names_are_upper_cased() {
        let config =
            ValidatedConfig::from_raw(&policy(MINIMAL_POLICY), &rules("{}"), &cli(&[])).unwrap();
        assert_eq!(config.policy.providers[0].name, "A");
    }

    #[test]
    fn duplicate_providers_keep_the_first() {
        let config = ValidatedConfig::from_raw(
            &policy(
                r#"
[[providers]]
name = "a"
url = "https://example.com/first"

[[providers]]
name = "A"
url = "https://example.com/second"
"#,
            ),
            &rules("{}"),
            &cli(&[]),
        )
        .unwrap();

        assert_eq!(config.policy.providers.len(), 1);
        assert_eq!(config.policy.providers[0].url, "https://example.com/first");
    }

    #[test]
    fn invalid_provider_url_is_fatal() {
        let result = ValidatedConfig::from_raw(
            &policy("[[providers]]\nname = \"a\"\nurl = \"not a url\"\n"),
            &rules("{}"),
            &cli(&[]),
        );
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }
}

mod region_validation {
    use super::*;

    #[test]
    fn zero_keyword_region_is_dropped() {
        let config = ValidatedConfig::from_raw(
            &policy(
                r#"
[[providers]]
name = "a"
url = "https://example.com/a"

[[regions]]
name = "HK"
emoji = "🇭🇰"
keywords = []
"#,
            ),
            &rules("{}"),
            &cli(&[]),
        )
        .unwrap();

        assert!(config.policy.regions.is_empty());
    }

    #[test]
    fn invalid_keyword_is_fatal() {
        let result = ValidatedConfig::from_raw(
            &policy(
                r#"
[[providers]]
name = "a"
url = "https://example.com/a"

[[regions]]
name = "HK"
emoji = "🇭🇰"
keywords = ["[invalid"]
"#,
            ),
            &rules("{}"),
            &cli(&[]),
        );
        assert!(matches!(result, Err(ConfigError::InvalidKeyword { .. })));
    }

    #[test]
    fn region_restriction_is_upper_cased() {
        let config = ValidatedConfig::from_raw(
            &policy(
                r#"
[[providers]]
name = "a"
url = "https://example.com/a"

[[regions]]
name = "HK"
emoji = "🇭🇰"
keywords = ["HK"]
providers = ["a"]
"#,
            ),
            &rules("{}"),
            &cli(&[]),
        )
        .unwrap();

        assert_eq!(
            config.policy.regions[0].providers,
            Some(vec!["A".to_string()])
        );
    }

    #[test]
    fn unknown_region_kind_is_fatal() {
        let result = ValidatedConfig::from_raw(
            &policy(
                r#"
[[providers]]
name = "a"
url = "https://example.com/a"

[[regions]]
name = "HK"
emoji = "🇭🇰"
keywords = ["HK"]
type = "round-robin"
"#,
            ),
            &rules("{}"),
            &cli(&[]),
        );
        assert!(matches!(result, Err(ConfigError::InvalidGroupKind { .. })));
    }
}

mod default_kind {
    use super::*;

    #[test]
    fn per_provider_mode_defaults_to_url_test() {
        let config =
            ValidatedConfig::from_raw(&policy(MINIMAL_POLICY), &rules("{}"), &cli(&[])).unwrap();
        assert_eq!(config.policy.default_kind, GroupKind::UrlTest);
    }

    #[test]
    fn merged_mode_defaults_to_fallback() {
        let content = format!("[general]\nmerged_regions = true\n{MINIMAL_POLICY}");
        let config =
            ValidatedConfig::from_raw(&policy(&content), &rules("{}"), &cli(&[])).unwrap();
        assert_eq!(config.policy.default_kind, GroupKind::Fallback);
    }

    #[test]
    fn explicit_default_wins_over_mode() {
        let content = format!(
            "[general]\nmerged_regions = true\ndefault_group_type = \"load-balance\"\n{MINIMAL_POLICY}"
        );
        let config =
            ValidatedConfig::from_raw(&policy(&content), &rules("{}"), &cli(&[])).unwrap();
        assert_eq!(config.policy.default_kind, GroupKind::LoadBalance);
    }
}

mod custom_specs {
    use super::*;

    #[test]
    fn unknown_custom_kind_drops_only_that_spec() {
        let config = ValidatedConfig::from_raw(
            &policy(
                r#"
[[providers]]
name = "a"
url = "https://example.com/a"

[[custom_groups]]
label = "Broken"
emoji = "💥"
type = "round-robin"
regions = ["HK"]

[[custom_groups]]
label = "Stream"
emoji = "🎬"
type = "fallback"
regions = ["HK"]
"#,
            ),
            &rules("{}"),
            &cli(&[]),
        )
        .unwrap();

        assert_eq!(config.policy.custom_specs.len(), 1);
        assert_eq!(config.policy.custom_specs[0].label, "Stream");
    }
}

mod relay_and_manual {
    use super::*;

    #[test]
    fn relay_defaults_apply() {
        let content = format!("{MINIMAL_POLICY}\n[relay]\n");
        let config =
            ValidatedConfig::from_raw(&policy(&content), &rules("{}"), &cli(&[])).unwrap();

        let relay = config.policy.relay.unwrap();
        assert_eq!(relay.name, defaults::RELAY_NAME);
        assert_eq!(relay.kind, defaults::RELAY_KIND);
        assert_eq!(relay.regions, None);
        assert_eq!(relay.targets, None);
    }

    #[test]
    fn disabled_manual_select_is_absent() {
        let content = format!("{MINIMAL_POLICY}\n[manual_select]\nenabled = false\n");
        let config =
            ValidatedConfig::from_raw(&policy(&content), &rules("{}"), &cli(&[])).unwrap();
        assert!(config.policy.manual_select.is_none());
    }

    #[test]
    fn enabled_manual_select_gets_defaults() {
        let content = format!("{MINIMAL_POLICY}\n[manual_select]\nenabled = true\n");
        let config =
            ValidatedConfig::from_raw(&policy(&content), &rules("{}"), &cli(&[])).unwrap();

        let manual = config.policy.manual_select.unwrap();
        assert_eq!(manual.label, defaults::MANUAL_SELECT_LABEL);
        assert_eq!(manual.emoji, defaults::MANUAL_SELECT_EMOJI);
    }
}

mod main_region_overrides {
    use super::*;

    #[test]
    fn manual_sentinel_is_case_insensitive() {
        let content = format!("{MINIMAL_POLICY}\n[main_regions]\nProxy = [\"Manual\"]\n");
        let config =
            ValidatedConfig::from_raw(&policy(&content), &rules("{}"), &cli(&[])).unwrap();
        assert_eq!(
            config.policy.main_regions["Proxy"],
            RegionSelection::Manual
        );
    }

    #[test]
    fn region_list_is_preserved() {
        let content = format!("{MINIMAL_POLICY}\n[main_regions]\nProxy = [\"HK\", \"JP\"]\n");
        let config =
            ValidatedConfig::from_raw(&policy(&content), &rules("{}"), &cli(&[])).unwrap();
        assert_eq!(
            config.policy.main_regions["Proxy"],
            RegionSelection::Regions(vec!["HK".to_string(), "JP".to_string()])
        );
    }
}

mod declared_groups {
    use super::*;

    #[test]
    fn main_and_special_groups_are_typed() {
        let config = ValidatedConfig::from_raw(
            &policy(MINIMAL_POLICY),
            &rules(
                r"
proxy_groups:
  main_groups:
    - name: Proxy
      type: select
  special_groups:
    - name: Global
      type: select
      proxies: [DIRECT]
",
            ),
            &cli(&[]),
        )
        .unwrap();

        assert_eq!(config.policy.main_groups[0].name, "Proxy");
        assert_eq!(config.policy.main_groups[0].kind, GroupKind::Select);
        assert_eq!(config.policy.special_groups[0].proxies, ["DIRECT"]);
    }

    #[test]
    fn unknown_main_kind_is_fatal() {
        let result = ValidatedConfig::from_raw(
            &policy(MINIMAL_POLICY),
            &rules("proxy_groups:\n  main_groups:\n    - name: Proxy\n      type: bogus\n"),
            &cli(&[]),
        );
        assert!(matches!(result, Err(ConfigError::InvalidGroupKind { .. })));
    }
}

mod paths_and_settings {
    use super::*;

    #[test]
    fn output_defaults_then_policy_then_cli() {
        let base =
            ValidatedConfig::from_raw(&policy(MINIMAL_POLICY), &rules("{}"), &cli(&[])).unwrap();
        assert_eq!(base.output, Path::new(defaults::OUTPUT_FILE));

        let content = format!("{MINIMAL_POLICY}\n[files]\noutput = \"from_policy.yaml\"\n");
        let from_policy =
            ValidatedConfig::from_raw(&policy(&content), &rules("{}"), &cli(&[])).unwrap();
        assert_eq!(from_policy.output, Path::new("from_policy.yaml"));

        let from_cli = ValidatedConfig::from_raw(
            &policy(&content),
            &rules("{}"),
            &cli(&["--output", "from_cli.yaml"]),
        )
        .unwrap();
        assert_eq!(from_cli.output, Path::new("from_cli.yaml"));
    }

    #[test]
    fn general_settings_fall_back_to_defaults() {
        let config =
            ValidatedConfig::from_raw(&policy(MINIMAL_POLICY), &rules("{}"), &cli(&[])).unwrap();

        assert_eq!(config.general.port, defaults::PORT);
        assert_eq!(config.general.socks_port, defaults::SOCKS_PORT);
        assert_eq!(config.general.allow_lan, defaults::ALLOW_LAN);
        assert_eq!(config.general.mode, defaults::MODE);
        assert_eq!(config.general.external_controller, defaults::EXTERNAL_CONTROLLER);
        assert_eq!(config.policy.test_url, defaults::TEST_URL);
    }

    #[test]
    fn invalid_test_url_is_fatal() {
        let content = format!("[general]\ntest_url = \"::bad::\"\n{MINIMAL_POLICY}");
        let result = ValidatedConfig::from_raw(&policy(&content), &rules("{}"), &cli(&[]));
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }
}

mod file_loading {
    use std::io::Write;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn load_reads_policy_and_rules_from_disk() {
        let dir = TempDir::new().unwrap();
        let policy_path = dir.path().join("policy.toml");
        let rules_path = dir.path().join("rules.yaml");

        let mut policy_file = std::fs::File::create(&policy_path).unwrap();
        write!(
            policy_file,
            "{MINIMAL_POLICY}\n[files]\nrules = \"{}\"\n",
            rules_path.display()
        )
        .unwrap();
        std::fs::write(
            &rules_path,
            "proxy_groups:\n  main_groups:\n    - name: Proxy\n      type: select\n",
        )
        .unwrap();

        let config = ValidatedConfig::load(&cli(&[
            "--config",
            policy_path.to_str().unwrap(),
        ]))
        .unwrap();

        assert_eq!(config.policy.providers[0].name, "A");
        assert_eq!(config.policy.main_groups[0].name, "Proxy");
    }

    #[test]
    fn missing_policy_file_is_fatal() {
        let result = ValidatedConfig::load(&cli(&["--config", "/nonexistent/policy.toml"]));
        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}
