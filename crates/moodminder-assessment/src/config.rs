use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Environment variable naming the config file to load.
pub const CONFIG_ENV: &str = "MOODMINDER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Question catalog to load instead of the builtin one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    #[serde(default)]
    pub classifier: ClassifierSettings,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            catalog_path: None,
            classifier: ClassifierSettings::default(),
        }
    }
}

/// Which mood-band classifier the engine uses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ClassifierSettings {
    /// Score-range lookup.
    #[default]
    Range,
    /// Model trained on synthetic responses, cached on disk.
    Learned(LearnedSettings),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnedSettings {
    /// Where the trained model is cached. Defaults to the platform cache
    /// directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
    pub samples: usize,
    pub seed: u64,
    pub epochs: usize,
    pub learning_rate: f64,
}

impl Default for LearnedSettings {
    fn default() -> Self {
        Self {
            cache_dir: None,
            samples: 1000,
            seed: 42,
            epochs: 200,
            learning_rate: 0.5,
        }
    }
}

pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("moodminder"))
}

/// `<platform config dir>/moodminder/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("moodminder").join("config.json"))
}

/// The file `MOODMINDER_CONFIG` names, else the default path.
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .or_else(default_config_path)
}

impl AssessmentConfig {
    /// Load the file named by `MOODMINDER_CONFIG`. Without the variable,
    /// load the default config file if one exists, else use defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(Path::new(&path));
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(&contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        let migrated = migrate(json, on_disk_version)?;
        let config: AssessmentConfig = serde_json::from_value(migrated)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        // Always write the current version, regardless of what was loaded.
        let mut stamped = self.clone();
        stamped.config_version = CURRENT_VERSION;
        let json = serde_json::to_string_pretty(&stamped)?;

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(io_err)?;
        }
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json.as_bytes()).map_err(io_err)?;
        std::fs::rename(&tmp_path, path).map_err(io_err)?;

        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, ConfigError> {
    if from_version > CURRENT_VERSION {
        return Err(ConfigError::UnsupportedVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: the pre-versioned config had a bare `use_model` flag instead
    // of a classifier section.
    if from_version < 1 {
        let obj = json.as_object_mut().ok_or(ConfigError::NotAnObject)?;
        let use_model = obj
            .remove("use_model")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if !obj.contains_key("classifier") {
            let mode = if use_model { "learned" } else { "range" };
            obj.insert("classifier".to_string(), serde_json::json!({ "mode": mode }));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (classifier section)");
    }

    Ok(json)
}
