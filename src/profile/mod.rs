//! Output profile assembly and writing.
//!
//! Wraps the composed proxy groups into the complete Clash document:
//! runtime scalars, the `proxy-providers` section, the group list, and
//! the pass-through rule material. Serialization is plain `serde_yaml`;
//! the engine guarantees group order, this module only preserves it.

mod document;
mod error;
mod providers;
mod writer;


pub use document::{Profile, assemble};
pub use error::ProfileError;
pub use providers::{HEALTH_CHECK_INTERVAL_SECS, PROVIDER_INTERVAL_SECS, provider_sources};
pub use writer::save;
