//! First-run marker.

use std::path::{Path, PathBuf};

const MARKER_FILE: &str = ".welcomed";

/// Tracks whether the welcome banner has been shown.
#[derive(Debug, Clone)]
pub struct WelcomeMarker {
    path: PathBuf,
}

impl WelcomeMarker {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(MARKER_FILE),
        }
    }

    pub fn is_first_run(&self) -> bool {
        !self.path.exists()
    }

    /// # Errors
    /// Returns an error if the marker file cannot be created.
    pub fn mark_welcomed(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, b"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn first_run_until_marked() {
        let dir = TempDir::new().unwrap();
        let marker = WelcomeMarker::new(dir.path());
        assert!(marker.is_first_run());
        marker.mark_welcomed().unwrap();
        assert!(!marker.is_first_run());
        // Idempotent
        marker.mark_welcomed().unwrap();
        assert!(!marker.is_first_run());
    }
}
