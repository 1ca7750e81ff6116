//! Pure Yew view components for the picker surface.
//!
//! These components render based on props only; all state lives in the
//! picker behind `PickerArea`.

use finger_picker::Role;
use yew::prelude::*;

/// One colored circle centered under a finger.
#[derive(Properties, PartialEq)]
pub struct TouchTrackerProps {
    pub x: f64,
    pub y: f64,
    pub size: u32,
    pub color: AttrValue,
    pub role: Role,
}

#[function_component(TouchTracker)]
pub fn touch_tracker(props: &TouchTrackerProps) -> Html {
    let half = props.size as f64 / 2.0;
    let role_class = match props.role {
        Role::Neutral => "neutral",
        Role::Winner => "winner",
        Role::Loser => "loser",
    };

    html! {
        <div
            class={classes!("touch-tracker", role_class)}
            style={format!(
                "top: {:.1}px; left: {:.1}px; width: {size}px; height: {size}px; border-radius: {size}px; background-color: {};",
                props.y - half,
                props.x - half,
                props.color,
                size = props.size,
            )}
        />
    }
}

#[derive(Properties, PartialEq)]
pub struct CountdownDisplayProps {
    pub label: AttrValue,
}

#[function_component(CountdownDisplay)]
pub fn countdown_display(props: &CountdownDisplayProps) -> Html {
    html! {
        <div class="countdown">{ props.label.clone() }</div>
    }
}

/// Side panel listing rounded touch coordinates.
#[derive(Properties, PartialEq)]
pub struct DebugOverlayProps {
    pub lines: Vec<String>,
}

#[function_component(DebugOverlay)]
pub fn debug_overlay(props: &DebugOverlayProps) -> Html {
    html! {
        <div id="debug-area" class="debug-area">
            <code>{ props.lines.join("\n") }</code>
        </div>
    }
}
