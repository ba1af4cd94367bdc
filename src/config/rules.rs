//! YAML rules document parsing.
//!
//! The rules document declares the main and special proxy groups plus the
//! routing material the generator passes through untouched: rule-provider
//! definitions, custom rules, and rule-set reference rules.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root structure of the rules document.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesDoc {
    /// Main and special group declarations
    #[serde(default)]
    pub proxy_groups: ProxyGroupsSection,

    /// Rule-provider definitions, passed through verbatim
    #[serde(default, rename = "rule-providers")]
    pub rule_providers: serde_yaml::Mapping,

    /// Custom routing rules
    #[serde(default)]
    pub custom_rules: CustomRules,

    /// Rules referencing the rule-providers, appended after the custom rules
    #[serde(default)]
    pub ruleset_rules: Vec<String>,
}

/// Group declarations section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyGroupsSection {
    /// Main groups, in declaration order
    #[serde(default)]
    pub main_groups: Vec<MainGroupEntry>,

    /// Special groups passed through with a static member list
    #[serde(default)]
    pub special_groups: Vec<SpecialGroupEntry>,
}

/// One declared main group.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MainGroupEntry {
    /// Group name
    pub name: String,

    /// Group type
    #[serde(rename = "type")]
    pub kind: String,
}

/// One special group with a verbatim member list.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecialGroupEntry {
    /// Group name
    pub name: String,

    /// Group type
    #[serde(rename = "type")]
    pub kind: String,

    /// Static member list
    pub proxies: Vec<String>,
}

/// Custom rules, either a flat list or the legacy category map.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CustomRules {
    /// Flat rule list
    List(Vec<String>),
    /// Legacy format: rules grouped under named categories
    Categories(serde_yaml::Mapping),
}

impl Default for CustomRules {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl CustomRules {
    /// Flattens the rules into a single list.
    ///
    /// For the legacy category map, rules are concatenated in category
    /// order; non-string entries are ignored.
    #[must_use]
    pub fn flatten(&self) -> Vec<String> {
        match self {
            Self::List(rules) => rules.clone(),
            Self::Categories(categories) => categories
                .values()
                .filter_map(|value| value.as_sequence())
                .flatten()
                .filter_map(|entry| entry.as_str().map(ToString::to_string))
                .collect(),
        }
    }
}

impl RulesDoc {
    /// Loads the rules document from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses the rules document from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Returns the full rule list: custom rules followed by ruleset rules.
    #[must_use]
    pub fn rules(&self) -> Vec<String> {
        let mut rules = self.custom_rules.flatten();
        rules.extend(self.ruleset_rules.iter().cloned());
        rules
    }
}
