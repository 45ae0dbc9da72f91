//! Sound descriptors and classification
//!
//! An alarm's sound entry determines how the notification is presented:
//! a full adhan audio is intrusive (full-screen alert), the reserved
//! silent entry produces a background notification, and a short
//! notification chime is normal. Classification feeds the single
//! presentation-resolution function in the alarm service.

use serde::{Deserialize, Serialize};

/// Reserved id of the silent sound entry.
pub const SILENT_AUDIO_ID: &str = "silent";

/// A selectable alarm sound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioEntry {
    pub id: String,
    /// Human-readable label shown in the sound picker.
    pub label: String,
    /// File source of the audio; the silent entry has none.
    #[serde(default)]
    pub source: Option<String>,
    /// True for short notification chimes that should not take over the
    /// screen, false for full adhan recordings.
    #[serde(default)]
    pub notification_only: bool,
}

impl AudioEntry {
    /// The reserved silent entry.
    pub fn silent() -> Self {
        Self {
            id: SILENT_AUDIO_ID.to_string(),
            label: "Silent".to_string(),
            source: None,
            notification_only: false,
        }
    }
}

/// How an alarm sound drives notification presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundClassification {
    /// Full adhan audio: forcibly surfaces a full-screen alert.
    Intrusive,
    /// The silent entry: plain dismissible background notification.
    Silent,
    /// Neither intrusive nor silent (e.g. a short chime, or no sound set).
    Normal,
}

/// True if the entry is the reserved silent entry.
pub fn is_silent(entry: Option<&AudioEntry>) -> bool {
    matches!(entry, Some(e) if e.id == SILENT_AUDIO_ID)
}

/// True if the entry is a full alarm audio that should take over the
/// screen. Mutually exclusive with [`is_silent`].
pub fn is_intrusive(entry: Option<&AudioEntry>) -> bool {
    match entry {
        Some(e) => e.id != SILENT_AUDIO_ID && !e.notification_only,
        None => false,
    }
}

/// Classify a sound entry. An absent entry is `Normal`.
pub fn classify(entry: Option<&AudioEntry>) -> SoundClassification {
    if is_intrusive(entry) {
        SoundClassification::Intrusive
    } else if is_silent(entry) {
        SoundClassification::Silent
    } else {
        SoundClassification::Normal
    }
}
