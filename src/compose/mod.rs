//! Proxy group composition engine.
//!
//! This module turns provider definitions, region definitions, and
//! custom-group/override specifications into a fully-resolved, ordered,
//! deduplicated list of proxy groups.
//!
//! # Design
//!
//! - **Pure**: the whole composition is a deterministic function of a
//!   [`Policy`] value. No I/O happens inside the engine; loading the policy
//!   and writing the profile live in [`crate::config`] and
//!   [`crate::profile`].
//! - **Factories**: each group family has its own factory ([`region`],
//!   [`custom`], [`relay`], [`manual`], [`mains`]); the [`driver`]
//!   sequences them and concatenates their output in a fixed order.
//! - **Diagnostics**: recoverable problems (an unresolved region, an empty
//!   provider intersection, a relay with no members) are recorded in a
//!   [`Diagnostics`] collector and never abort the run. Only a policy with
//!   zero providers is fatal.

pub mod custom;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod filter;
pub mod group;
pub mod mains;
pub mod manual;
pub mod policy;
pub mod region;
pub mod relay;

#[cfg(test)]
mod region_tests;
#[cfg(test)]
mod test_fixtures;

pub use custom::CustomGroup;
pub use diagnostics::Diagnostics;
pub use driver::{Composition, compose};
pub use error::ComposeError;
pub use filter::build_filter;
pub use group::{GroupKind, ProxyGroup};
pub use policy::{
    GroupSpec, MainGroup, ManualSelectPolicy, Policy, Provider, Region, RegionSelection,
    RelayPolicy, SpecialGroup,
};
pub use region::RegionGroup;
