use std::{fs, path::PathBuf};

use config::Config;
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::error::{ApplicationError, ApplicationResult};

fn airport_query_project_dir() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "airport_query")
}

/// User-tunable settings, read from `config.toml` in the platform config
/// directory. A missing file is seeded from the embedded default so the
/// user always has something to edit.
#[derive(Debug, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    pub corridor_nm: f64,
    pub nearest_count: usize,
    #[serde(default)]
    pub crosswind_limit_kt: Option<f64>,
}

impl Settings {
    pub fn load() -> ApplicationResult<Self> {
        let Some(dirs) = airport_query_project_dir() else {
            debug!("no home directory, using built-in defaults");
            return Self::from_str(include_str!("../config.toml"));
        };
        let config_dir = dirs.config_dir();
        let config_file = config_dir.join("config.toml");
        if !config_file.exists() {
            fs::create_dir_all(config_dir)?;
            fs::write(&config_file, include_str!("../config.toml"))?;
            debug!(path = %config_file.display(), "wrote default config file");
        }
        let settings = Config::builder()
            .add_source(config::File::from(config_file).required(true))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }

    fn from_str(raw: &str) -> ApplicationResult<Self> {
        Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()
            .map_err(ApplicationError::from)
    }
}
