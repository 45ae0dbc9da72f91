//! Notification primitive contract
//!
//! The OS notification subsystem (channel creation, trigger firing) lives
//! outside this crate. [`NotificationGateway`] is the contract the alarm
//! service requires from it; tests substitute a fake that records calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Channel importance, fixed to `High` for alarm channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Default,
    Low,
}

/// Lock-screen visibility, fixed to `Public` for alarm channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Secret,
}

/// Notification category hint for the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Alarm,
}

/// A notification channel to resolve or create. Creation is idempotent:
/// an existing channel with the same id is returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub id: String,
    pub name: String,
    pub importance: Importance,
    pub visibility: Visibility,
}

impl ChannelSpec {
    /// Alarm channel with the fixed importance/visibility policy.
    pub fn alarm(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            importance: Importance::High,
            visibility: Visibility::Public,
        }
    }
}

/// When and how a trigger notification fires. The tag doubles as the
/// trigger-kind discriminator on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trigger {
    Timestamp {
        /// Epoch milliseconds at which the notification fires.
        at_epoch_ms: i64,
        /// Fire even under doze/idle power states.
        allow_while_idle: bool,
    },
}

/// What happens when the user presses a notification or one of its
/// action buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressAction {
    pub id: String,
    #[serde(default)]
    pub launch_activity: Option<String>,
}

impl PressAction {
    pub fn launch(id: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            launch_activity: Some(activity.into()),
        }
    }
}

/// An action button attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    /// Localized button label.
    pub title: String,
    pub press_action: PressAction,
}

/// Android-specific presentation of an alarm notification. Resolved from
/// the sound classification by the alarm service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AndroidPresentation {
    pub channel_id: String,
    pub small_icon: String,
    pub category: Category,
    pub importance: Importance,
    /// Wake the screen when the notification fires.
    pub light_up_screen: bool,
    /// Remove the notification when the user taps it.
    pub auto_cancel: bool,
    /// Full-screen intent for intrusive alarms.
    #[serde(default)]
    pub full_screen_action: Option<PressAction>,
    /// Default tap action.
    pub press_action: PressAction,
    /// Keep the sound playing via a foreground service.
    pub as_foreground_service: bool,
    /// Extra action buttons (e.g. a localized Dismiss).
    #[serde(default)]
    pub actions: Vec<ActionButton>,
}

/// A fully-resolved trigger notification to register with the OS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSpec {
    /// Stable identity of the alarm slot; at most one active trigger may
    /// exist per id.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub android: AndroidPresentation,
    /// Opaque payload recovered verbatim by the trigger handler.
    pub payload: Value,
}

/// Outcome of a best-effort cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// An active trigger existed and was cancelled.
    Cancelled,
    /// No trigger was registered under the id; expected and harmless.
    NotFound,
}

/// Contract required from the OS notification subsystem.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Resolve or create a channel; returns the channel id. Idempotent.
    async fn create_channel(&self, channel: &ChannelSpec) -> Result<String>;

    /// Cancel the active trigger under `notif_id`, if any. `NotFound` is
    /// a success, not an error; `Err` means the call itself failed.
    async fn cancel_trigger_notification(&self, notif_id: &str) -> Result<CancelOutcome>;

    /// Register a notification bound to a trigger.
    async fn create_trigger_notification(
        &self,
        spec: NotificationSpec,
        trigger: Trigger,
    ) -> Result<()>;
}
