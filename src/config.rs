//! Picker constants and the runtime toggles built from them.

use crate::render::Rgb;
use log::warn;
use serde::{Deserialize, Serialize};

// Round timing
pub const COUNTDOWN_MS: u32 = 4000;
pub const REFRESH_INTERVAL_MS: u32 = 100;

// Tracker visuals
pub const TRACKER_SIZE_PX: u32 = 30;
pub const TOUCH_COUNT_INTENSITY_STEP: u32 = 24;

/// Player colors, assigned by position in the touch snapshot.
pub const PALETTE: [Rgb; 6] = [
    Rgb::new(0xE5, 0x00, 0x00),
    Rgb::new(0xFF, 0x8D, 0x00),
    Rgb::new(0xFF, 0xEE, 0x00),
    Rgb::new(0x02, 0x81, 0x21),
    Rgb::new(0x00, 0x4C, 0xFF),
    Rgb::new(0x77, 0x00, 0x88),
];

/// How the surface background reacts to the round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundMode {
    /// Fades from white to black while the countdown runs.
    #[default]
    CountdownFade,
    /// Grayscale proportional to the number of fingers down.
    TouchCount,
    Off,
}

/// Configuration for a picker instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    pub countdown_ms: u32,
    pub tracker_size_px: u32,
    pub background: BackgroundMode,
    pub debug_overlay: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            countdown_ms: COUNTDOWN_MS,
            tracker_size_px: TRACKER_SIZE_PX,
            background: BackgroundMode::default(),
            debug_overlay: false,
        }
    }
}

impl PickerConfig {
    /// Apply toggles from a page query string such as `?debug&background=touch-count`.
    ///
    /// Unknown keys and values are logged and skipped.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match (key, value) {
                ("debug", "" | "1" | "true") => config.debug_overlay = true,
                ("debug", _) => config.debug_overlay = false,
                ("background", "countdown-fade") => config.background = BackgroundMode::CountdownFade,
                ("background", "touch-count") => config.background = BackgroundMode::TouchCount,
                ("background", "off") => config.background = BackgroundMode::Off,
                _ => warn!("Ignoring unknown query option '{}'", pair),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_gives_defaults() {
        assert_eq!(PickerConfig::from_query(""), PickerConfig::default());
        assert_eq!(PickerConfig::from_query("?"), PickerConfig::default());
    }

    #[test]
    fn query_toggles_debug_and_background() {
        let config = PickerConfig::from_query("?debug&background=touch-count");
        assert!(config.debug_overlay);
        assert_eq!(config.background, BackgroundMode::TouchCount);
        assert_eq!(config.countdown_ms, COUNTDOWN_MS);
    }

    #[test]
    fn partial_config_object_fills_defaults() {
        let config: PickerConfig =
            serde_json::from_str(r#"{"countdownMs": 2500, "background": "touch-count"}"#).unwrap();
        assert_eq!(config.countdown_ms, 2_500);
        assert_eq!(config.background, BackgroundMode::TouchCount);
        assert_eq!(config.tracker_size_px, TRACKER_SIZE_PX);
        assert!(!config.debug_overlay);

        let empty: PickerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, PickerConfig::default());
    }

    #[test]
    fn config_uses_camel_case_keys() {
        let config = PickerConfig {
            debug_overlay: true,
            background: BackgroundMode::Off,
            ..PickerConfig::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["debugOverlay"], true);
        assert_eq!(value["trackerSizePx"], 30);
        assert_eq!(value["background"], "off");

        let back: PickerConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn unknown_background_mode_is_rejected() {
        assert!(serde_json::from_str::<PickerConfig>(r#"{"background": "rainbow"}"#).is_err());
    }

    #[test]
    fn unknown_options_are_skipped() {
        let config = PickerConfig::from_query("background=rainbow&players=12&debug=0");
        assert_eq!(config.background, BackgroundMode::CountdownFade);
        assert!(!config.debug_overlay);
    }
}
