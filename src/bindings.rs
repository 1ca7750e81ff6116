//! JavaScript interop for hosts that drive the picker without Yew.
//!
//! The host owns the timer: it forwards every touch event to `onTouches`,
//! carries out the returned command (`{ kind: "arm", session, afterMs }` or
//! `{ kind: "disarm" }`), calls `onExpire(session)` when an armed timer fires,
//! and redraws from `render(nowMs)`.

use crate::{PickerConfig, PickerError, TouchPicker, TouchPoint, TouchSnapshot};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct PickerHandle {
    picker: TouchPicker,
    rng: StdRng,
}

fn to_js_error(err: PickerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
impl PickerHandle {
    /// Create a picker. `config` may be `undefined` or a partial config object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PickerHandle, JsValue> {
        let config: PickerConfig = if config.is_undefined() || config.is_null() {
            PickerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| to_js_error(PickerError::InvalidInput(e.to_string())))?
        };
        debug!("Creating picker handle with {:?}", config);
        Ok(PickerHandle {
            picker: TouchPicker::new(config),
            rng: StdRng::from_os_rng(),
        })
    }

    /// Feed an array of `{ id, x, y }` touches. Returns the timer command or `null`.
    #[wasm_bindgen(js_name = onTouches)]
    pub fn on_touches(&mut self, touches: JsValue, now_ms: f64) -> Result<JsValue, JsValue> {
        let points: Vec<TouchPoint> = serde_wasm_bindgen::from_value(touches)
            .map_err(|e| to_js_error(PickerError::InvalidInput(e.to_string())))?;
        let snapshot = TouchSnapshot::new(points).map_err(to_js_error)?;

        match self.picker.on_touches(&snapshot, now_ms) {
            Some(command) => serde_wasm_bindgen::to_value(&command).map_err(JsValue::from),
            None => Ok(JsValue::NULL),
        }
    }

    /// Deliver a timer expiry. Returns `false` if it was stale.
    #[wasm_bindgen(js_name = onExpire)]
    pub fn on_expire(&mut self, session: u32) -> bool {
        self.picker.on_expire(session, &mut self.rng)
    }

    /// Abandon the current round. Returns the timer command or `null`.
    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        match self.picker.reset() {
            Some(command) => serde_wasm_bindgen::to_value(&command).map_err(JsValue::from),
            None => Ok(JsValue::NULL),
        }
    }

    pub fn render(&self, now_ms: f64) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.picker.render(now_ms)).map_err(JsValue::from)
    }
}
