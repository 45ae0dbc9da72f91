//! Alarm settings service
//!
//! Persists per-prayer notification preferences as a versioned JSON
//! envelope. The in-memory copy is canonical; every mutation rewrites the
//! whole envelope to disk before returning, so readers always observe the
//! durable state.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::RwLock;

use crate::adhan::{Prayer, PRAYERS_IN_ORDER};
use crate::config::{
    ADJUSTMENT_SUFFIX, NOTIFY_SUFFIX, RESERVED_SETTING_KEYS, SETTINGS_FILE_NAME,
    SETTINGS_SCHEMA_VERSION, SOUND_SUFFIX,
};
use crate::error::{AppError, Result};

/// Which per-prayer setting a key addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Notify,
    Sound,
    Adjustment,
}

/// Derive the storage key for a `(prayer, kind)` pair, e.g. `FAJR_NOTIFY`.
/// Pure and collision-free across the full prayer x kind product.
pub fn setting_key(prayer: Prayer, kind: SettingKind) -> String {
    let suffix = match kind {
        SettingKind::Notify => NOTIFY_SUFFIX,
        SettingKind::Sound => SOUND_SUFFIX,
        SettingKind::Adjustment => ADJUSTMENT_SUFFIX,
    };
    format!("{}{}", prayer.storage_name(), suffix)
}

/// Versioned on-disk layout of the settings record. Version 0 predates the
/// envelope and is a bare flat map; the loader migrates it forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsEnvelope {
    pub schema_version: u32,
    #[serde(default)]
    pub settings: BTreeMap<String, bool>,
}

impl Default for SettingsEnvelope {
    fn default() -> Self {
        Self {
            schema_version: SETTINGS_SCHEMA_VERSION,
            settings: BTreeMap::new(),
        }
    }
}

/// Service owning the persisted alarm settings.
#[derive(Clone)]
pub struct AlarmSettingsService {
    settings_path: PathBuf,
    state: Arc<RwLock<SettingsEnvelope>>,
}

impl AlarmSettingsService {
    /// Load settings from `app_data_dir`, creating an empty record at the
    /// current schema version if none exist. Older layouts are migrated;
    /// an envelope from a future version is refused rather than risking a
    /// silent drop of user settings.
    pub async fn load(app_data_dir: PathBuf) -> Result<Self> {
        let settings_path = app_data_dir.join(SETTINGS_FILE_NAME);

        let envelope = if settings_path.exists() {
            let content = fs::read_to_string(&settings_path).await?;
            migrate(parse_snapshot(&content)?)?
        } else {
            tracing::info!("Alarm settings not found, starting with defaults");
            SettingsEnvelope::default()
        };

        let service = Self {
            settings_path,
            state: Arc::new(RwLock::new(envelope)),
        };
        service.persist().await?;
        Ok(service)
    }

    /// Read a setting. Absent means "unset", which callers treat
    /// differently from an explicit `false`.
    pub async fn get(&self, key: &str) -> Option<bool> {
        self.state.read().await.settings.get(key).copied()
    }

    /// Typed read for a `(prayer, kind)` pair.
    pub async fn get_for(&self, prayer: Prayer, kind: SettingKind) -> Option<bool> {
        self.get(&setting_key(prayer, kind)).await
    }

    /// Set a setting and write through to disk. Writes to reserved legacy
    /// key names are silently dropped.
    pub async fn set(&self, key: &str, value: bool) -> Result<()> {
        if is_reserved_key(key) {
            tracing::warn!("Ignoring write to reserved settings key {:?}", key);
            return Ok(());
        }

        {
            let mut state = self.state.write().await;
            state.settings.insert(key.to_string(), value);
        }
        self.persist().await
    }

    /// Typed write for a `(prayer, kind)` pair; cannot hit the
    /// reserved-key guard.
    pub async fn set_for(&self, prayer: Prayer, kind: SettingKind, value: bool) -> Result<()> {
        self.set(&setting_key(prayer, kind), value).await
    }

    /// Remove a setting (back to "unset"). No-op if absent.
    pub async fn remove(&self, key: &str) -> Result<()> {
        if is_reserved_key(key) {
            tracing::warn!("Ignoring removal of reserved settings key {:?}", key);
            return Ok(());
        }

        let removed = {
            let mut state = self.state.write().await;
            state.settings.remove(key).is_some()
        };
        if removed {
            self.persist().await?;
        }
        Ok(())
    }

    /// Bound setter for a fixed key, so reactive callers don't re-derive
    /// the key on every update.
    pub fn setter_for(&self, prayer: Prayer, kind: SettingKind) -> SettingSetter {
        SettingSetter {
            service: self.clone(),
            key: setting_key(prayer, kind),
        }
    }

    /// True if any prayer has its notification toggle set. Iterates the
    /// fixed prayer order and short-circuits on the first enabled one.
    pub async fn has_any_notification_enabled(&self) -> bool {
        let state = self.state.read().await;
        PRAYERS_IN_ORDER.iter().any(|&prayer| {
            state
                .settings
                .get(&setting_key(prayer, SettingKind::Notify))
                .copied()
                .unwrap_or(false)
        })
    }

    /// Write the whole envelope to disk. Mutations replace the durable
    /// snapshot as a unit, never as independent field writes.
    async fn persist(&self) -> Result<()> {
        let content = {
            let state = self.state.read().await;
            serde_json::to_string_pretty(&*state)?
        };
        fs::write(&self.settings_path, content).await?;
        tracing::debug!("Alarm settings saved to {:?}", self.settings_path);
        Ok(())
    }
}

/// Setter bound to one setting key.
#[derive(Clone)]
pub struct SettingSetter {
    service: AlarmSettingsService,
    key: String,
}

impl SettingSetter {
    pub async fn set(&self, value: bool) -> Result<()> {
        self.service.set(&self.key, value).await
    }
}

fn is_reserved_key(key: &str) -> bool {
    RESERVED_SETTING_KEYS.contains(&key)
}

/// Parse a persisted snapshot of any known version. A top-level
/// `schema_version` field marks the envelope layout; anything else is the
/// version-0 flat map, where non-boolean entries are dropped rather than
/// failing the whole load.
fn parse_snapshot(content: &str) -> Result<SettingsEnvelope> {
    let value: serde_json::Value = serde_json::from_str(content)?;

    if value.get("schema_version").is_some() {
        return Ok(serde_json::from_value(value)?);
    }

    let map = value.as_object().ok_or_else(|| {
        AppError::Migration("persisted settings are not a JSON object".to_string())
    })?;
    let settings = map
        .iter()
        .filter_map(|(k, v)| v.as_bool().map(|b| (k.clone(), b)))
        .collect();
    Ok(SettingsEnvelope {
        schema_version: 0,
        settings,
    })
}

/// Run ordered migration steps until the envelope reaches the current
/// version. Already-current input passes through unchanged.
fn migrate(mut envelope: SettingsEnvelope) -> Result<SettingsEnvelope> {
    if envelope.schema_version > SETTINGS_SCHEMA_VERSION {
        return Err(AppError::Migration(format!(
            "persisted settings have schema version {} but this build supports up to {}",
            envelope.schema_version, SETTINGS_SCHEMA_VERSION
        )));
    }

    while envelope.schema_version < SETTINGS_SCHEMA_VERSION {
        envelope = match envelope.schema_version {
            // v0 flat maps could carry the legacy store's own method names
            // as keys; strip them while wrapping in the envelope.
            0 => SettingsEnvelope {
                schema_version: 1,
                settings: envelope
                    .settings
                    .into_iter()
                    .filter(|(k, _)| !is_reserved_key(k))
                    .collect(),
            },
            v => {
                return Err(AppError::Migration(format!(
                    "no migration step defined from schema version {}",
                    v
                )))
            }
        };
        tracing::info!(
            "Migrated alarm settings to schema version {}",
            envelope.schema_version
        );
    }

    Ok(envelope)
}
