use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

/// Engine configuration, loaded by the host application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default)]
    pub uncertain_policy: UncertainPolicy,
    #[serde(default)]
    pub booking: BookingPolicy,
    #[serde(default)]
    pub drafts: DraftSettings,
}

/// How an "unsure" answer to a general screening question is treated.
///
/// This is a policy input owned by the blood service, not something the
/// engine infers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum UncertainPolicy {
    /// Treated like "no". Only the final question can route to consultation.
    #[default]
    PassThrough,
    /// An otherwise eligible outcome becomes needs-consultation.
    Consult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct BookingPolicy {
    /// Minimum gap between a completed donation and the next appointment.
    pub min_days_between_donations: u16,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            min_days_between_donations: 84,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftSettings {
    pub enabled: bool,
    /// Where file-backed drafts live. `None` = the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for DraftSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: None,
        }
    }
}

pub fn load_config(path: &Path) -> Result<EngineConfig, CoreError> {
    let contents = std::fs::read_to_string(path)?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX));

    let migrated = migrate(json, on_disk_version)?;
    let config: EngineConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Load the config, falling back to defaults when the file is missing or unreadable.
pub fn load_config_or_default(path: &Path) -> EngineConfig {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return EngineConfig::default();
    }
    match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            EngineConfig::default()
        }
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, CoreError> {
    if from_version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedConfigVersion {
            found: from_version,
            supported: CURRENT_VERSION,
        });
    }

    // v0 → v1: drafts section added, enabled unless the file says otherwise
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| CoreError::InvalidConfig("config is not a JSON object".to_string()))?;
        obj.entry("drafts")
            .or_insert_with(|| serde_json::json!({ "enabled": true }));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(CURRENT_VERSION.into()),
        );
        tracing::info!("migrated config v0 → v1 (added drafts)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &EngineConfig) -> Result<(), CoreError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
