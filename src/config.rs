use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::boundary::DEFAULT_REQUEST_TIMEOUT;
use crate::storage::sqlite::DEFAULT_BUSY_TIMEOUT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblingConfig {
    pub database: PathBuf,
    pub boundary_service_url: String,
    pub request_timeout_secs: u64,
    pub busy_timeout_secs: u64,
}

impl Default for AssemblingConfig {
    fn default() -> Self {
        Self {
            database: default_database_path_in(Path::new(".")),
            boundary_service_url: "http://localhost:5000/".to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT.as_secs(),
        }
    }
}

impl AssemblingConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("cgmes-assembling.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".cgmes-assembling").join("tracking.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<AssemblingConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: AssemblingConfig = toml::from_str(&contents)?;
    if config.request_timeout_secs == 0 {
        anyhow::bail!("request_timeout_secs in {} must be positive", path.display());
    }
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &AssemblingConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
