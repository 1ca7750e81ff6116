//! Multi-touch finger picker.
//!
//! Players hold their fingers on the screen, a countdown runs, and one touch is
//! picked at random. [`picker::TouchPicker`] is the state machine behind the
//! widget; the browser feeds it touch snapshots and timer expiries and draws
//! the [`render::RenderModel`] it returns.

use std::fmt;

pub mod bindings;
pub mod config;
pub mod countdown;
pub mod picker;
pub mod render;
pub mod tracker;

pub use config::{BackgroundMode, PickerConfig};
pub use countdown::{CountdownSession, ExpiryTimer, SessionId, TimerCommand};
pub use picker::{PickerState, TouchPicker};
pub use render::{RenderModel, Rgb};
pub use tracker::{Role, TouchId, TouchPoint, TouchSnapshot, TrackedTouch};

// Errors raised at the input boundary; the state machine itself never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerError {
    DuplicateTouchId(TouchId),
    NonFiniteCoordinate { id: TouchId },
    /// Input from a JS host that could not be decoded
    InvalidInput(String),
}

impl fmt::Display for PickerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerError::DuplicateTouchId(id) => {
                write!(f, "Touch id {} appears more than once in the snapshot", id)
            }
            PickerError::NonFiniteCoordinate { id } => {
                write!(f, "Touch {} has a non-finite coordinate", id)
            }
            PickerError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}
