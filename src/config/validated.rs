//! Validated configuration after merging CLI, policy file, and rules
//! document.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction:
//! URLs are parsed, keywords are checked as regex fragments, group kind
//! strings become [`GroupKind`] values, and the raw policy records become
//! the engine's typed [`Policy`].
//!
//! # Failure policy
//!
//! Structural problems (unreadable files, invalid URLs, bad keywords,
//! unknown group kinds on regions/relay/mains) are fatal. A custom group
//! with an unknown kind is dropped with a warning, matching the engine's
//! per-spec skip contract. A region with zero keywords is likewise
//! dropped with a warning before it can reach the factories.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;
use url::Url;

use crate::compose::{
    GroupKind, GroupSpec, MainGroup, ManualSelectPolicy, Policy, Provider, Region,
    RegionSelection, RelayPolicy, SpecialGroup,
};

use super::cli::Cli;
use super::defaults;
use super::error::ConfigError;
use super::policy::{CustomGroupEntry, PolicyFile, RegionEntry, default_policy_template};
use super::rules::RulesDoc;

/// Profile-wide scalar settings passed through to the output document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralSettings {
    /// HTTP proxy port
    pub port: u16,
    /// SOCKS proxy port
    pub socks_port: u16,
    /// Allow LAN access
    pub allow_lan: bool,
    /// Routing mode
    pub mode: String,
    /// Log level
    pub log_level: String,
    /// External controller address
    pub external_controller: String,
}

/// Fully validated configuration ready for use by the application.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Profile-wide scalar settings
    pub general: GeneralSettings,

    /// The engine's validated input
    pub policy: Policy,

    /// Rule-provider definitions passed through verbatim
    pub rule_providers: serde_yaml::Mapping,

    /// Full rule list: custom rules followed by ruleset rules
    pub rules: Vec<String>,

    /// Path the generated profile is written to
    pub output: PathBuf,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ providers: {}, regions: {}, merged_regions: {}, mains: {}, \
             customs: {}, relay: {}, manual_select: {}, rules: {}, output: {} }}",
            self.policy.providers.len(),
            self.policy.regions.len(),
            self.policy.merged_regions,
            self.policy.main_groups.len(),
            self.policy.custom_specs.len(),
            self.policy.relay.is_some(),
            self.policy.manual_select.is_some(),
            self.rules.len(),
            self.output.display(),
        )
    }
}

impl ValidatedConfig {
    /// Loads and validates configuration from the CLI and the two input
    /// files.
    ///
    /// The policy path comes from `--config` (default
    /// `config/policy.toml`); the rules path from `--rules`, then the
    /// policy's `[files]` section, then the default.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be read or parsed, or the
    /// merged configuration is invalid.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let policy_path = cli
            .config
            .clone()
            .unwrap_or_else(|| PathBuf::from(defaults::POLICY_FILE));
        let file = PolicyFile::load(&policy_path)?;
        tracing::info!("Loaded policy file: {}", policy_path.display());

        let rules_path = cli.rules.clone().unwrap_or_else(|| {
            file.files
                .rules
                .as_ref()
                .map_or_else(|| PathBuf::from(defaults::RULES_FILE), PathBuf::from)
        });
        let rules = RulesDoc::load(&rules_path)?;
        tracing::info!("Loaded rules document: {}", rules_path.display());

        Self::from_raw(&file, &rules, cli)
    }

    /// Creates a validated configuration from parsed inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A provider or test URL is invalid
    /// - A keyword is not a valid regex fragment
    /// - A group kind on a region, the relay, a main group, or a special
    ///   group is unknown
    pub fn from_raw(file: &PolicyFile, rules: &RulesDoc, cli: &Cli) -> Result<Self, ConfigError> {
        let test_url = resolve_test_url(file)?;
        let providers = resolve_providers(file)?;
        let exclusions = resolve_exclusions(file)?;
        let regions = resolve_regions(file)?;
        let merged_regions = file.general.merged_regions;
        let default_kind = resolve_default_kind(file)?;
        let custom_specs = resolve_custom_specs(file);
        let relay = resolve_relay(file)?;
        let manual_select = resolve_manual_select(file);
        let main_regions = resolve_main_regions(file);
        let (main_groups, special_groups) = resolve_declared_groups(rules)?;

        let policy = Policy {
            providers,
            regions,
            exclusions,
            merged_regions,
            default_kind,
            test_url,
            pins: file.pins.clone(),
            main_regions,
            custom_specs,
            relay,
            manual_select,
            main_groups,
            special_groups,
        };

        Ok(Self {
            general: resolve_general(file),
            policy,
            rule_providers: rules.rule_providers.clone(),
            rules: rules.rules(),
            output: resolve_output(file, cli),
            verbose: cli.verbose,
        })
    }
}

/// Writes the default policy template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_policy(path: &Path) -> Result<(), ConfigError> {
    let template = default_policy_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn resolve_general(file: &PolicyFile) -> GeneralSettings {
    let general = &file.general;
    GeneralSettings {
        port: general.port.unwrap_or(defaults::PORT),
        socks_port: general.socks_port.unwrap_or(defaults::SOCKS_PORT),
        allow_lan: general.allow_lan.unwrap_or(defaults::ALLOW_LAN),
        mode: general.mode.clone().unwrap_or_else(|| defaults::MODE.to_string()),
        log_level: general
            .log_level
            .clone()
            .unwrap_or_else(|| defaults::LOG_LEVEL.to_string()),
        external_controller: general
            .external_controller
            .clone()
            .unwrap_or_else(|| defaults::EXTERNAL_CONTROLLER.to_string()),
    }
}

fn resolve_test_url(file: &PolicyFile) -> Result<String, ConfigError> {
    let test_url = file
        .general
        .test_url
        .clone()
        .unwrap_or_else(|| defaults::TEST_URL.to_string());
    validate_url("test_url", &test_url)?;
    Ok(test_url)
}

/// Upper-cases provider names and validates their URLs.
///
/// A name that repeats after normalization keeps its first occurrence;
/// the duplicate is dropped with a warning.
fn resolve_providers(file: &PolicyFile) -> Result<Vec<Provider>, ConfigError> {
    let mut providers: Vec<Provider> = Vec::new();

    for entry in &file.providers {
        let name = entry.name.to_uppercase();
        if providers.iter().any(|p| p.name == name) {
            tracing::warn!("Duplicate provider '{name}', keeping the first declaration");
            continue;
        }
        validate_url(&format!("provider '{name}'"), &entry.url)?;
        providers.push(Provider {
            name,
            url: entry.url.clone(),
        });
    }

    Ok(providers)
}

fn resolve_exclusions(file: &PolicyFile) -> Result<Vec<String>, ConfigError> {
    for keyword in &file.filter.exclude {
        validate_keyword("filter.exclude", keyword)?;
    }
    Ok(file.filter.exclude.clone())
}

/// Validates region entries; a region with zero keywords is dropped with
/// a warning before it can reach the factories.
fn resolve_regions(file: &PolicyFile) -> Result<Vec<Region>, ConfigError> {
    let mut regions = Vec::new();

    for entry in &file.regions {
        if entry.keywords.is_empty() {
            tracing::warn!("Region '{}' has no keywords, skipping", entry.name);
            continue;
        }
        for keyword in &entry.keywords {
            validate_keyword(&format!("region '{}'", entry.name), keyword)?;
        }
        regions.push(region_from_entry(entry)?);
    }

    Ok(regions)
}

fn region_from_entry(entry: &RegionEntry) -> Result<Region, ConfigError> {
    let kind = entry
        .kind
        .as_deref()
        .map(|k| parse_kind(&format!("region '{}'", entry.name), k))
        .transpose()?;

    Ok(Region {
        name: entry.name.clone(),
        emoji: entry.emoji.clone(),
        keywords: entry.keywords.clone(),
        providers: entry.providers.as_ref().map(|p| upper_cased(p)),
        kind,
    })
}

fn resolve_default_kind(file: &PolicyFile) -> Result<GroupKind, ConfigError> {
    match file.general.default_group_type.as_deref() {
        Some(kind) => parse_kind("general.default_group_type", kind),
        None if file.general.merged_regions => Ok(defaults::MERGED_GROUP_KIND),
        None => Ok(defaults::PER_PROVIDER_GROUP_KIND),
    }
}

/// Converts custom group entries to typed specs.
///
/// An unknown group kind drops only that spec, matching the engine's
/// per-spec skip contract.
fn resolve_custom_specs(file: &PolicyFile) -> Vec<GroupSpec> {
    let mut specs = Vec::new();

    for entry in &file.custom_groups {
        match custom_spec_from_entry(entry) {
            Ok(spec) => specs.push(spec),
            Err(e) => tracing::warn!("Skipping custom group '{}': {e}", entry.label),
        }
    }

    specs
}

fn custom_spec_from_entry(entry: &CustomGroupEntry) -> Result<GroupSpec, ConfigError> {
    let kind = parse_kind(&format!("custom group '{}'", entry.label), &entry.kind)?;

    Ok(GroupSpec {
        label: entry.label.clone(),
        emoji: entry.emoji.clone(),
        kind,
        providers: entry.providers.as_ref().map(|p| upper_cased(p)),
        regions: entry.regions.clone(),
        targets: entry.targets.clone(),
    })
}

fn resolve_relay(file: &PolicyFile) -> Result<Option<RelayPolicy>, ConfigError> {
    let Some(section) = &file.relay else {
        return Ok(None);
    };

    let name = section
        .name
        .clone()
        .unwrap_or_else(|| defaults::RELAY_NAME.to_string());
    let kind = match section.kind.as_deref() {
        Some(kind) => parse_kind(&format!("relay group '{name}'"), kind)?,
        None => defaults::RELAY_KIND,
    };

    Ok(Some(RelayPolicy {
        name,
        kind,
        regions: section.regions.clone(),
        targets: section.targets.clone(),
    }))
}

fn resolve_manual_select(file: &PolicyFile) -> Option<ManualSelectPolicy> {
    let section = file.manual_select.as_ref()?;
    if !section.enabled {
        return None;
    }

    Some(ManualSelectPolicy {
        label: section
            .name
            .clone()
            .unwrap_or_else(|| defaults::MANUAL_SELECT_LABEL.to_string()),
        emoji: section
            .emoji
            .clone()
            .unwrap_or_else(|| defaults::MANUAL_SELECT_EMOJI.to_string()),
    })
}

/// Interprets the per-main-group region lists; the single entry
/// "manual" (case-insensitive) disables automatic region membership.
fn resolve_main_regions(file: &PolicyFile) -> HashMap<String, RegionSelection> {
    file.main_regions
        .iter()
        .map(|(main, regions)| {
            let selection = if regions.len() == 1 && regions[0].eq_ignore_ascii_case("manual") {
                RegionSelection::Manual
            } else {
                RegionSelection::Regions(regions.clone())
            };
            (main.clone(), selection)
        })
        .collect()
}

fn resolve_declared_groups(
    rules: &RulesDoc,
) -> Result<(Vec<MainGroup>, Vec<SpecialGroup>), ConfigError> {
    let mut main_groups = Vec::new();
    for entry in &rules.proxy_groups.main_groups {
        main_groups.push(MainGroup {
            name: entry.name.clone(),
            kind: parse_kind(&format!("main group '{}'", entry.name), &entry.kind)?,
        });
    }

    let mut special_groups = Vec::new();
    for entry in &rules.proxy_groups.special_groups {
        special_groups.push(SpecialGroup {
            name: entry.name.clone(),
            kind: parse_kind(&format!("special group '{}'", entry.name), &entry.kind)?,
            proxies: entry.proxies.clone(),
        });
    }

    Ok((main_groups, special_groups))
}

fn resolve_output(file: &PolicyFile, cli: &Cli) -> PathBuf {
    cli.output.clone().unwrap_or_else(|| {
        file.files
            .output
            .as_ref()
            .map_or_else(|| PathBuf::from(defaults::OUTPUT_FILE), PathBuf::from)
    })
}

// Helper functions

fn parse_kind(context: &str, kind: &str) -> Result<GroupKind, ConfigError> {
    kind.parse::<GroupKind>()
        .map_err(|e| ConfigError::InvalidGroupKind {
            context: context.to_string(),
            source: e,
        })
}

fn validate_url(field: &str, url: &str) -> Result<(), ConfigError> {
    Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        field: field.to_string(),
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

fn validate_keyword(context: &str, keyword: &str) -> Result<(), ConfigError> {
    Regex::new(keyword).map_err(|e| ConfigError::InvalidKeyword {
        keyword: keyword.to_string(),
        context: context.to_string(),
        source: e,
    })?;
    Ok(())
}

fn upper_cased(names: &[String]) -> Vec<String> {
    names.iter().map(|n| n.to_uppercase()).collect()
}
