//! Application execution logic.
//!
//! One generation run: compose the proxy groups from the validated
//! policy, assemble the full profile document, and write it out.

use thiserror::Error;

use clash_gen::compose;
use clash_gen::config::ValidatedConfig;
use clash_gen::profile;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Group composition failed.
    #[error("Composition failed: {0}")]
    Compose(#[from] compose::ComposeError),

    /// Profile assembly or writing failed.
    #[error("Profile output failed: {0}")]
    Profile(#[from] profile::ProfileError),
}

/// Executes one generation run.
///
/// # Errors
///
/// Returns an error if composition produces no groups or the profile
/// cannot be assembled or written.
pub fn execute(config: &ValidatedConfig) -> Result<(), RunError> {
    let composition = compose::compose(&config.policy)?;

    if !composition.diagnostics.is_empty() {
        tracing::info!(
            "Composition finished with {} warning(s)",
            composition.diagnostics.len()
        );
    }

    let document = profile::assemble(config, composition.groups)?;
    profile::save(&document, &config.output)?;

    Ok(())
}
