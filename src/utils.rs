//! Browser glue: page clock, query string and touch event conversion.

use finger_picker::{PickerError, TouchPoint, TouchSnapshot};
use web_sys::TouchEvent;

/// Milliseconds on the page's monotonic clock, falling back to wall time.
pub fn now_ms() -> f64 {
    gloo_utils::window()
        .performance()
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// The current page's query string, or an empty string if unavailable.
pub fn page_query() -> String {
    gloo_utils::window().location().search().unwrap_or_default()
}

/// Collect every touch still on the surface after `event`.
///
/// `touches` (not `changedTouches`) is used so lifted fingers drop out.
pub fn snapshot_from_event(event: &TouchEvent) -> Result<TouchSnapshot, PickerError> {
    let list = event.touches();
    let points = (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|touch| TouchPoint {
            id: touch.identifier(),
            x: touch.client_x() as f64,
            y: touch.client_y() as f64,
        })
        .collect();
    TouchSnapshot::new(points)
}
