//! Application configuration constants
//!
//! Central location for configuration constants used by the settings
//! store and the alarm scheduler.

// ===== Settings Persistence =====

/// File name of the persisted alarm settings envelope, relative to the
/// application data directory.
pub const SETTINGS_FILE_NAME: &str = "alarm_settings.json";

/// Current schema version of the persisted settings envelope.
/// Version 0 is the legacy layout: a bare flat map with no envelope.
pub const SETTINGS_SCHEMA_VERSION: u32 = 1;

/// Key names that version-0 snapshots could carry alongside real settings
/// (the legacy store persisted its own method names). Writes to these are
/// silently dropped and they are stripped during migration.
pub const RESERVED_SETTING_KEYS: &[&str] = &["setSetting", "setSettingCurry", "removeSetting"];

// ===== Setting Key Suffixes =====

/// Suffix of per-prayer notification toggle keys (e.g. `FAJR_NOTIFY`).
pub const NOTIFY_SUFFIX: &str = "_NOTIFY";
/// Suffix of per-prayer sound toggle keys (e.g. `FAJR_SOUND`).
pub const SOUND_SUFFIX: &str = "_SOUND";
/// Suffix of per-prayer time adjustment keys (e.g. `FAJR_ADJUSTMENT`).
pub const ADJUSTMENT_SUFFIX: &str = "_ADJUSTMENT";

// ===== Notification Presentation =====

/// Status bar icon resource for alarm notifications.
pub const SMALL_ICON: &str = "ic_stat_name";

/// Press-action id that routes to the full-screen alarm surface.
pub const FULLSCREEN_ACTION_ID: &str = "fullscreen";

/// Press-action id that dismisses the alarm from a normal notification.
pub const DISMISS_ACTION_ID: &str = "dismiss_alarm";

/// Activity launched by the full-screen action for intrusive alarms.
pub const ALARM_ACTIVITY: &str = "com.github.meypod.al_azan.AlarmActivity";

/// Activity launched by the default press action for non-intrusive alarms.
pub const MAIN_ACTIVITY: &str = "com.github.meypod.al_azan.MainActivity";
