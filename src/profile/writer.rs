//! YAML profile writing.

use std::path::Path;

use super::document::Profile;
use super::error::ProfileError;

/// Serializes the profile and writes it to `path`.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save(profile: &Profile, path: &Path) -> Result<(), ProfileError> {
    let content = serde_yaml::to_string(profile)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ProfileError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    std::fs::write(path, &content).map_err(|e| ProfileError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Profile written to {}", path.display());
    tracing::info!(
        "{} proxy groups, {} rules, {} bytes",
        profile.proxy_groups.len(),
        profile.rules.len(),
        content.len()
    );

    Ok(())
}
