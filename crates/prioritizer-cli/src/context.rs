//! Per-invocation state shared by the commands.

use task_prioritizer_core::storage::data_dir;
use task_prioritizer_core::{EngineConfig, LoadedProfile, ProfileLoader, TaskLog, WelcomeMarker};

pub struct AppContext {
    pub profile: LoadedProfile,
    pub welcome: WelcomeMarker,
}

impl AppContext {
    pub fn load(profile: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        let loader = ProfileLoader::from_env()?;
        let profile = loader.load(profile)?;
        Ok(Self {
            profile,
            welcome: WelcomeMarker::new(data_dir()?),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.profile.config
    }

    pub fn profile_name(&self) -> Option<&str> {
        self.profile.name.as_deref()
    }

    pub fn task_log(&self) -> Result<TaskLog, Box<dyn std::error::Error>> {
        Ok(TaskLog::for_config(self.config())?)
    }
}
