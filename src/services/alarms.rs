//! Alarm scheduling service
//!
//! Turns a fully-resolved alarm request into an OS trigger notification.
//! The central invariant is at most one active trigger per alarm slot:
//! any existing trigger under the request's id is cancelled before the
//! replacement is created.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adhan::Prayer;
use crate::config::{
    ALARM_ACTIVITY, DISMISS_ACTION_ID, FULLSCREEN_ACTION_ID, MAIN_ACTIVITY, SMALL_ICON,
};
use crate::error::{AppError, Result};
use crate::media::{classify, AudioEntry, SoundClassification};
use crate::notify::{
    ActionButton, AndroidPresentation, CancelOutcome, Category, ChannelSpec, Importance,
    NotificationGateway, NotificationSpec, PressAction, Trigger,
};

/// Everything needed to schedule one alarm notification. Constructed
/// fresh per attempt by the caller; the scheduler embeds it verbatim as
/// the notification payload so the trigger handler can recover full
/// context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmRequest {
    /// Stable identity of the alarm slot.
    pub notif_id: String,
    pub channel_id: String,
    pub channel_name: String,
    /// When the alarm fires.
    pub trigger_at: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub sound: Option<AudioEntry>,
    #[serde(default)]
    pub is_reminder: bool,
    pub prayer: Prayer,
}

/// Alarm scheduler backed by the OS notification subsystem.
#[derive(Clone)]
pub struct AlarmService {
    gateway: Arc<dyn NotificationGateway>,
}

impl AlarmService {
    pub fn new(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self { gateway }
    }

    /// Schedule the alarm, replacing any existing trigger under the same
    /// id. Channel resolution and trigger creation failures surface to
    /// the caller; a missing trigger during cancellation does not.
    pub async fn schedule(&self, request: &AlarmRequest) -> Result<()> {
        let channel_id = self
            .gateway
            .create_channel(&ChannelSpec::alarm(
                request.channel_id.clone(),
                request.channel_name.clone(),
            ))
            .await
            .map_err(|e| AppError::Channel(format!("failed to resolve channel: {}", e)))?;

        let classification = classify(request.sound.as_ref());

        // Cancel-before-create: the old trigger must be gone before the
        // replacement exists, so two triggers never race under one id.
        match self
            .gateway
            .cancel_trigger_notification(&request.notif_id)
            .await?
        {
            CancelOutcome::Cancelled => {
                tracing::info!("Replaced existing trigger for alarm {}", request.notif_id);
            }
            CancelOutcome::NotFound => {
                tracing::debug!("No existing trigger for alarm {}", request.notif_id);
            }
        }

        let trigger = Trigger::Timestamp {
            at_epoch_ms: request.trigger_at.timestamp_millis(),
            allow_while_idle: true,
        };

        let spec = NotificationSpec {
            id: request.notif_id.clone(),
            title: request.title.clone(),
            subtitle: request.subtitle.clone(),
            body: request.body.clone(),
            android: presentation_for(classification, &channel_id),
            payload: serde_json::json!({ "options": request }),
        };

        self.gateway
            .create_trigger_notification(spec, trigger)
            .await
            .map_err(|e| AppError::Trigger(format!("failed to create trigger: {}", e)))?;

        tracing::info!(
            "Scheduled {:?} alarm {} at {}",
            request.prayer,
            request.notif_id,
            request.trigger_at
        );
        Ok(())
    }
}

/// Resolve notification presentation from the sound classification.
pub fn presentation_for(
    classification: SoundClassification,
    channel_id: &str,
) -> AndroidPresentation {
    let alarm_surface = PressAction::launch(FULLSCREEN_ACTION_ID, ALARM_ACTIVITY);
    let dismiss_via_main = PressAction::launch(DISMISS_ACTION_ID, MAIN_ACTIVITY);
    let dismiss_button = ActionButton {
        title: "Dismiss".to_string(),
        press_action: PressAction {
            id: DISMISS_ACTION_ID.to_string(),
            launch_activity: None,
        },
    };

    let base = AndroidPresentation {
        channel_id: channel_id.to_string(),
        small_icon: SMALL_ICON.to_string(),
        category: Category::Alarm,
        importance: Importance::High,
        light_up_screen: false,
        auto_cancel: true,
        full_screen_action: None,
        press_action: dismiss_via_main,
        as_foreground_service: false,
        actions: Vec::new(),
    };

    match classification {
        // Full-screen alert owns the screen; it also handles dismissal,
        // so no extra button.
        SoundClassification::Intrusive => AndroidPresentation {
            light_up_screen: true,
            auto_cancel: false,
            full_screen_action: Some(alarm_surface.clone()),
            press_action: alarm_surface,
            as_foreground_service: true,
            ..base
        },
        SoundClassification::Silent => base,
        SoundClassification::Normal => AndroidPresentation {
            as_foreground_service: true,
            actions: vec![dismiss_button],
            ..base
        },
    }
}
