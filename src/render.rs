//! Render model handed to the display layer, plus the small helpers that
//! compute its derived fields.

use crate::config::{BackgroundMode, TOUCH_COUNT_INTENSITY_STEP};
use crate::countdown::CountdownSession;
use crate::picker::PickerState;
use crate::tracker::TrackedTouch;
use serde::{Serialize, Serializer};
use std::fmt;

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

/// CSS hex notation, e.g. `#e50000`.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// JS hosts get colors as ready-to-use CSS strings.
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Everything the display layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderModel {
    pub state: PickerState,
    /// One entry per active touch, in snapshot order.
    pub trackers: Vec<TrackedTouch>,
    /// Last known position of the winning touch while picked or displaying.
    pub winner: Option<TrackedTouch>,
    pub remaining_ms: Option<u32>,
    pub countdown_label: Option<String>,
    pub background: Rgb,
    pub tracker_size_px: u32,
    pub debug_lines: Option<Vec<String>>,
}

/// Background color for the current frame.
pub fn background_color(
    mode: BackgroundMode,
    state: PickerState,
    countdown: Option<&CountdownSession>,
    touch_count: usize,
    now_ms: f64,
) -> Rgb {
    match mode {
        BackgroundMode::Off => Rgb::BLACK,
        BackgroundMode::TouchCount => {
            let intensity = (touch_count as u32).saturating_mul(TOUCH_COUNT_INTENSITY_STEP);
            Rgb::gray(intensity.min(255) as u8)
        }
        BackgroundMode::CountdownFade => match (state, countdown) {
            (PickerState::Countdown, Some(session)) => {
                let brightness = ((1.0 - session.progress(now_ms)) * 255.0).floor();
                Rgb::gray(brightness.clamp(0.0, 255.0) as u8)
            }
            _ => Rgb::BLACK,
        },
    }
}

/// Whole seconds left, rounded up: 4000ms shows "4", 1ms shows "1".
pub fn countdown_label(remaining_ms: u32) -> String {
    remaining_ms.div_ceil(1000).to_string()
}

/// Rounded coordinates per tracker, for the debug overlay.
pub fn debug_lines(trackers: &[TrackedTouch]) -> Vec<String> {
    trackers
        .iter()
        .map(|t| format!("{}, {}", t.x.round(), t.y.round()))
        .collect()
}
