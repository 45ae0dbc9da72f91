//! Prayer identifiers
//!
//! The fixed set of prayers (and pseudo-entries like midnight) that the
//! settings store and scheduler operate on. Keeping this a closed enum
//! makes "unrecognized prayer" unrepresentable rather than a runtime check.

use serde::{Deserialize, Serialize};

/// A prayer time slot, including the non-prayer markers (sunrise, sunset,
/// midnight) that still get their own notification settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
    Midnight,
}

/// Fixed iteration order for all recognized prayers. Aggregate queries and
/// any per-prayer trace output follow this order.
pub const PRAYERS_IN_ORDER: [Prayer; 8] = [
    Prayer::Fajr,
    Prayer::Sunrise,
    Prayer::Dhuhr,
    Prayer::Asr,
    Prayer::Sunset,
    Prayer::Maghrib,
    Prayer::Isha,
    Prayer::Midnight,
];

impl Prayer {
    /// Uppercase name used to derive storage keys (e.g. `FAJR`).
    pub fn storage_name(self) -> &'static str {
        match self {
            Prayer::Fajr => "FAJR",
            Prayer::Sunrise => "SUNRISE",
            Prayer::Dhuhr => "DHUHR",
            Prayer::Asr => "ASR",
            Prayer::Sunset => "SUNSET",
            Prayer::Maghrib => "MAGHRIB",
            Prayer::Isha => "ISHA",
            Prayer::Midnight => "MIDNIGHT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_names_are_unique() {
        for (i, a) in PRAYERS_IN_ORDER.iter().enumerate() {
            for b in &PRAYERS_IN_ORDER[i + 1..] {
                assert_ne!(a.storage_name(), b.storage_name());
            }
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Prayer::Fajr).unwrap();
        assert_eq!(json, "\"fajr\"");
        let back: Prayer = serde_json::from_str("\"midnight\"").unwrap();
        assert_eq!(back, Prayer::Midnight);
    }
}
