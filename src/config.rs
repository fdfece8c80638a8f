use std::{fs, path::{Path, PathBuf}, collections::BTreeMap};
use serde::{Serialize, Deserialize};
use anyhow::{self, Context};

use crate::backend::{check_key, DEFAULT_KEY};
use crate::core::{ActivityType, ShareTable, Split, ValidationError};

const APP_DIR: &str = "tourshare";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: Option<PathBuf>,
    pub key: String
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { data_dir: None, key: DEFAULT_KEY.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency: String,
    pub recent_limit: usize
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { currency: "₹".to_owned(), recent_limit: 10 }
    }
}

type SplitByActivity = BTreeMap<String, Split>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub display: DisplayConfig,
    pub shares: SplitByActivity
}

impl AppConfig {
    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath)
            .with_context(|| "failed to read config file")?;
        Self::parse(&file_content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(content)
            .with_context(|| "failed to parse config file")?;
        // share overrides must form a valid table
        config.share_table()?;
        check_key(&config.storage.key)
            .with_context(|| "invalid storage configuration")?;
        return Ok(config);
    }

    /// Reads `path` if given, else the per-user config file when it exists.
    pub fn locate(path: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = path {
            return Self::read(path)
                .with_context(|| format!("config file {}", path.display()));
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::read(&path)
                .with_context(|| format!("config file {}", path.display())),
            _ => Ok(AppConfig::default())
        }
    }

    pub fn share_table(&self) -> anyhow::Result<ShareTable> {
        let overrides = self.shares.iter()
            .map(|(key, split)| key.parse::<ActivityType>().map(|activity| (activity, *split)))
            .collect::<Result<Vec<_>, ValidationError>>()
            .with_context(|| "invalid revenue share configuration")?;
        ShareTable::with_overrides(overrides)
            .with_context(|| "invalid revenue share configuration")
    }

    pub fn data_dir(&self) -> PathBuf {
        match &self.storage.data_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
