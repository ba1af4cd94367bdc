//! Error types for the composition engine.

use thiserror::Error;

/// Fatal composition errors.
///
/// Everything else the engine encounters is recoverable and lands in
/// [`crate::compose::Diagnostics`] instead.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The policy declares no upstream providers.
    #[error("No proxy providers configured; at least one provider is required")]
    NoProviders,
}
