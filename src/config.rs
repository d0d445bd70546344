use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::session::{Difficulty, ExperienceLevel, InterviewType, SessionConfig};

/// Setup-form defaults remembered between runs. Never holds session results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub role: String,
    pub company: String,
    pub experience_level: ExperienceLevel,
    pub interview_type: InterviewType,
    pub duration_minutes: u32,
    pub difficulty: Difficulty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            role: String::new(),
            company: String::new(),
            experience_level: ExperienceLevel::Mid,
            interview_type: InterviewType::Behavioral,
            duration_minutes: 30,
            difficulty: Difficulty::Medium,
        }
    }
}

impl From<&SessionConfig> for Config {
    fn from(sc: &SessionConfig) -> Self {
        Self {
            role: sc.role.clone(),
            company: sc.company.clone().unwrap_or_default(),
            experience_level: sc.experience_level,
            interview_type: sc.interview_type,
            duration_minutes: sc.duration_minutes,
            difficulty: sc.difficulty,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("rehearse_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
