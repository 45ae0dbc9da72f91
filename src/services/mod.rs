//! Services module
//!
//! Business logic services built on the notification gateway and the
//! persisted settings envelope.

pub mod alarms;
pub mod settings;

pub use alarms::{AlarmRequest, AlarmService};
pub use settings::{AlarmSettingsService, SettingKind};
