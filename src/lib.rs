//! Clash-Gen: Declarative Clash Profile Generator
//!
//! A library for composing a complete Clash proxy profile from structured
//! policy inputs: provider definitions, region definitions, and
//! custom-group/relay/manual-select specifications.

pub mod compose;
pub mod config;
pub mod profile;
