//! Configuration layer for Clash-Gen.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML policy file parsing ([`PolicyFile`])
//! - YAML rules document parsing ([`RulesDoc`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Policy template generation ([`write_default_policy`])
//! - Default values ([`defaults`])
//!
//! # Inputs
//!
//! Two files feed one run:
//!
//! 1. **Policy file** (TOML) - providers, regions, exclusion keywords,
//!    behavioral flags, relay/manual-select/custom-group declarations,
//!    default-node pins.
//! 2. **Rules document** (YAML) - main and special group declarations,
//!    rule-provider definitions, and the rule lists, the latter passed
//!    through to the output verbatim.
//!
//! Paths are resolved with CLI flags taking precedence over the policy's
//! `[files]` section, which takes precedence over built-in defaults.

mod cli;
pub mod defaults;
mod error;
mod policy;
mod rules;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::ConfigError;
pub use policy::{PolicyFile, default_policy_template};
pub use rules::RulesDoc;
pub use validated::{GeneralSettings, ValidatedConfig, write_default_policy};
