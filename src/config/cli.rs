//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Clash-Gen: Declarative Clash Profile Generator
///
/// Composes a complete Clash profile from a TOML policy file and a
/// YAML rules document.
#[derive(Debug, Parser)]
#[command(name = "clash-gen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the policy file (default: config/policy.toml)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Path to the rules document (default: config/rules.yaml)
    #[arg(long, short)]
    pub rules: Option<PathBuf>,

    /// Path the generated profile is written to (default: output/clash_profile.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for clash-gen
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default policy file
    Init {
        /// Output path for the policy file
        #[arg(long, short, default_value = "policy.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
