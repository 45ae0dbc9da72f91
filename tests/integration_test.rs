//! Integration tests for adhan-alarms
//!
//! These tests verify end-to-end functionality including:
//! - Settings persistence and migration across service instances
//! - Alarm scheduling against a fake notification gateway
//! - The at-most-one-active-trigger invariant on reschedule

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use adhan_alarms::adhan::Prayer;
use adhan_alarms::error::{AppError, Result};
use adhan_alarms::media::AudioEntry;
use adhan_alarms::notify::{
    CancelOutcome, ChannelSpec, NotificationGateway, NotificationSpec, Trigger,
};
use adhan_alarms::services::{AlarmRequest, AlarmService, AlarmSettingsService, SettingKind};

/// Ordered record of gateway calls, for asserting call sequencing.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GatewayCall {
    CreateChannel(String),
    CancelTrigger(String),
    CreateTrigger(String),
}

/// Fake notification subsystem tracking active trigger ids and channels.
#[derive(Default)]
struct FakeGateway {
    calls: Mutex<Vec<GatewayCall>>,
    channels: Mutex<HashMap<String, String>>,
    active: Mutex<HashMap<String, (NotificationSpec, Trigger)>>,
    fail_cancel: AtomicBool,
}

impl FakeGateway {
    fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn active_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.active.lock().unwrap().keys().cloned().collect();
        ids.sort();
        ids
    }

    fn active_notification(&self, id: &str) -> Option<(NotificationSpec, Trigger)> {
        self.active.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl NotificationGateway for FakeGateway {
    async fn create_channel(&self, channel: &ChannelSpec) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(GatewayCall::CreateChannel(channel.id.clone()));
        let mut channels = self.channels.lock().unwrap();
        channels
            .entry(channel.id.clone())
            .or_insert_with(|| channel.name.clone());
        Ok(channel.id.clone())
    }

    async fn cancel_trigger_notification(&self, notif_id: &str) -> Result<CancelOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push(GatewayCall::CancelTrigger(notif_id.to_string()));
        if self.fail_cancel.load(Ordering::SeqCst) {
            return Err(AppError::Generic("notification service unavailable".to_string()));
        }
        match self.active.lock().unwrap().remove(notif_id) {
            Some(_) => Ok(CancelOutcome::Cancelled),
            None => Ok(CancelOutcome::NotFound),
        }
    }

    async fn create_trigger_notification(
        &self,
        spec: NotificationSpec,
        trigger: Trigger,
    ) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(GatewayCall::CreateTrigger(spec.id.clone()));
        self.active
            .lock()
            .unwrap()
            .insert(spec.id.clone(), (spec, trigger));
        Ok(())
    }
}

fn fajr_request(trigger_at: chrono::DateTime<Utc>, sound: Option<AudioEntry>) -> AlarmRequest {
    AlarmRequest {
        notif_id: "fajr-alarm".to_string(),
        channel_id: "adhan".to_string(),
        channel_name: "Adhan".to_string(),
        trigger_at,
        title: "Fajr".to_string(),
        subtitle: Some("04:32".to_string()),
        body: None,
        sound,
        is_reminder: false,
        prayer: Prayer::Fajr,
    }
}

fn adhan_sound() -> AudioEntry {
    AudioEntry {
        id: "adhan_makkah".to_string(),
        label: "Makkah".to_string(),
        source: Some("adhan_makkah.mp3".to_string()),
        notification_only: false,
    }
}

#[tokio::test]
async fn test_schedule_creates_trigger_with_payload() {
    let gateway = Arc::new(FakeGateway::default());
    let service = AlarmService::new(gateway.clone());

    let at = Utc.with_ymd_and_hms(2024, 3, 10, 4, 32, 0).unwrap();
    let request = fajr_request(at, Some(adhan_sound()));
    service.schedule(&request).await.unwrap();

    assert_eq!(gateway.active_ids(), vec!["fajr-alarm".to_string()]);

    let (spec, trigger) = gateway.active_notification("fajr-alarm").unwrap();
    assert_eq!(spec.title, "Fajr");
    assert_eq!(spec.android.channel_id, "adhan");

    // Trigger fires at the requested instant, tolerating idle states.
    let Trigger::Timestamp {
        at_epoch_ms,
        allow_while_idle,
    } = trigger;
    assert_eq!(at_epoch_ms, at.timestamp_millis());
    assert!(allow_while_idle);

    // The full request is embedded verbatim for the trigger handler.
    let embedded: AlarmRequest = serde_json::from_value(spec.payload["options"].clone()).unwrap();
    assert_eq!(embedded, request);
}

#[tokio::test]
async fn test_reschedule_replaces_trigger_and_cancel_precedes_create() {
    let gateway = Arc::new(FakeGateway::default());
    let service = AlarmService::new(gateway.clone());

    let first = Utc.with_ymd_and_hms(2024, 3, 10, 4, 32, 0).unwrap();
    service.schedule(&fajr_request(first, None)).await.unwrap();
    service
        .schedule(&fajr_request(first + Duration::days(1), None))
        .await
        .unwrap();

    // At most one active trigger per alarm slot.
    assert_eq!(gateway.active_ids(), vec!["fajr-alarm".to_string()]);

    let (_, trigger) = gateway.active_notification("fajr-alarm").unwrap();
    let Trigger::Timestamp { at_epoch_ms, .. } = trigger;
    assert_eq!(at_epoch_ms, (first + Duration::days(1)).timestamp_millis());

    // Each schedule call cancels before it creates.
    let calls = gateway.calls();
    assert_eq!(
        calls,
        vec![
            GatewayCall::CreateChannel("adhan".to_string()),
            GatewayCall::CancelTrigger("fajr-alarm".to_string()),
            GatewayCall::CreateTrigger("fajr-alarm".to_string()),
            GatewayCall::CreateChannel("adhan".to_string()),
            GatewayCall::CancelTrigger("fajr-alarm".to_string()),
            GatewayCall::CreateTrigger("fajr-alarm".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_missing_trigger_on_cancel_does_not_block_scheduling() {
    let gateway = Arc::new(FakeGateway::default());
    let service = AlarmService::new(gateway.clone());

    // First schedule: nothing to cancel, which must be swallowed.
    let at = Utc::now() + Duration::hours(1);
    service.schedule(&fajr_request(at, None)).await.unwrap();
    assert_eq!(gateway.active_ids(), vec!["fajr-alarm".to_string()]);
}

#[tokio::test]
async fn test_cancel_transport_error_propagates() {
    let gateway = Arc::new(FakeGateway::default());
    gateway.fail_cancel.store(true, Ordering::SeqCst);
    let service = AlarmService::new(gateway.clone());

    let at = Utc::now() + Duration::hours(1);
    let result = service.schedule(&fajr_request(at, None)).await;
    assert!(result.is_err());

    // A failed cancellation must not leave a new trigger behind.
    assert!(gateway.active_ids().is_empty());
}

#[tokio::test]
async fn test_intrusive_and_silent_presentation_flow() {
    let gateway = Arc::new(FakeGateway::default());
    let service = AlarmService::new(gateway.clone());
    let at = Utc::now() + Duration::hours(1);

    service
        .schedule(&fajr_request(at, Some(adhan_sound())))
        .await
        .unwrap();
    let (spec, _) = gateway.active_notification("fajr-alarm").unwrap();
    assert!(spec.android.light_up_screen);
    assert!(!spec.android.auto_cancel);
    assert!(spec.android.actions.is_empty());

    service
        .schedule(&fajr_request(at, Some(AudioEntry::silent())))
        .await
        .unwrap();
    let (spec, _) = gateway.active_notification("fajr-alarm").unwrap();
    assert!(!spec.android.as_foreground_service);
    assert!(spec.android.auto_cancel);
    assert!(spec.android.actions.is_empty());
}

#[tokio::test]
async fn test_settings_drive_scheduling_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let settings = AlarmSettingsService::load(temp_dir.path().to_path_buf())
        .await
        .unwrap();
    let gateway = Arc::new(FakeGateway::default());
    let alarms = AlarmService::new(gateway.clone());

    assert!(!settings.has_any_notification_enabled().await);

    settings
        .set_for(Prayer::Fajr, SettingKind::Notify, true)
        .await
        .unwrap();
    assert!(settings.has_any_notification_enabled().await);

    if settings
        .get_for(Prayer::Fajr, SettingKind::Notify)
        .await
        .unwrap_or(false)
    {
        let at = Utc::now() + Duration::hours(8);
        alarms.schedule(&fajr_request(at, None)).await.unwrap();
    }
    assert_eq!(gateway.active_ids(), vec!["fajr-alarm".to_string()]);

    // Preferences survive a restart.
    drop(settings);
    let reloaded = AlarmSettingsService::load(temp_dir.path().to_path_buf())
        .await
        .unwrap();
    assert_eq!(
        reloaded.get_for(Prayer::Fajr, SettingKind::Notify).await,
        Some(true)
    );
}
