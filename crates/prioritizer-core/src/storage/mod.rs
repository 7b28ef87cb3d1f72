//! Everything that touches the filesystem: profiles, the task log and the
//! first-run marker. The scoring engine itself never calls into here.

mod profile;
mod task_log;
mod welcome;

pub use profile::{LoadedProfile, ProfileLoader};
pub use task_log::TaskLog;
pub use welcome::WelcomeMarker;

use std::path::PathBuf;

use crate::error::ProfileError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "TASK_PRIORITIZER_HOME";

/// Returns `~/.config/task-prioritizer/`, or `$TASK_PRIORITIZER_HOME` if set.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ProfileError> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("task-prioritizer"),
    };

    std::fs::create_dir_all(&dir).map_err(|e| ProfileError::DataDir {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}
