//! Dotenv profiles.
//!
//! A profile is a `KEY=value` file. For `--profile NAME` the search order is:
//!
//! 1. `./.env.NAME`
//! 2. `<data_dir>/NAME.env`
//! 3. `./.env`
//! 4. `<data_dir>/default.env`
//!
//! The process environment is the base layer; values from the file override
//! it. The process environment itself is never modified.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::EngineConfig;
use crate::error::ProfileError;

/// A resolved and parsed profile.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    /// Requested profile name, if any
    pub name: Option<String>,
    /// File the values came from; `None` if no file was found
    pub path: Option<PathBuf>,
    pub config: EngineConfig,
}

/// Locates and reads profile files.
#[derive(Debug, Clone)]
pub struct ProfileLoader {
    project_dir: PathBuf,
    data_dir: PathBuf,
    base: HashMap<String, String>,
}

impl ProfileLoader {
    /// Search `project_dir` and `data_dir` with an empty base layer.
    pub fn new(project_dir: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            data_dir: data_dir.into(),
            base: HashMap::new(),
        }
    }

    /// Search the current directory and the data directory, on top of the
    /// process environment.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared.
    pub fn from_env() -> Result<Self, ProfileError> {
        let project_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut loader = Self::new(project_dir, super::data_dir()?);
        loader.base = std::env::vars().collect();
        Ok(loader)
    }

    /// Replace the base layer.
    pub fn with_base<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.base = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    fn named_candidates(&self, name: &str) -> [PathBuf; 2] {
        [
            self.project_dir.join(format!(".env.{name}")),
            self.data_dir.join(format!("{name}.env")),
        ]
    }

    /// First existing profile file for `name`, falling back to the default.
    pub fn resolve(&self, name: Option<&str>) -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(name) = name {
            candidates.extend(self.named_candidates(name));
        }
        candidates.push(self.project_dir.join(".env"));
        candidates.push(self.data_dir.join("default.env"));

        candidates.into_iter().find(|p| p.is_file())
    }

    /// Load the profile `name` (or the default) into an [`EngineConfig`].
    ///
    /// # Errors
    /// Returns an error if the resolved file cannot be read or parsed.
    pub fn load(&self, name: Option<&str>) -> Result<LoadedProfile, ProfileError> {
        let path = self.resolve(name);
        if let Some(requested) = name {
            let named = self.named_candidates(requested);
            if !path.as_ref().is_some_and(|p| named.contains(p)) {
                tracing::warn!("profile '{requested}' not found, falling back to the default");
            }
        }

        let mut vars = self.base.clone();
        if let Some(path) = &path {
            vars.extend(read_env_file(path)?);
            tracing::debug!("loaded profile from {}", path.display());
        }

        Ok(LoadedProfile {
            name: name.map(str::to_string),
            path,
            config: EngineConfig::from_vars(vars),
        })
    }
}

fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, ProfileError> {
    let load_failed = |message: String| ProfileError::LoadFailed {
        path: path.to_path_buf(),
        message,
    };
    dotenvy::from_path_iter(path)
        .map_err(|e| load_failed(e.to_string()))?
        .map(|item| item.map_err(|e| load_failed(e.to_string())))
        .collect()
}
