//! Main module for the Finger Picker application using Yew.
//! Wires browser touch events and timers into the picker state machine.

use finger_picker::{
    config::REFRESH_INTERVAL_MS, ExpiryTimer, PickerConfig, PickerState, Role, SessionId,
    TouchPicker,
};
use gloo_timers::callback::{Interval, Timeout};
use log::{info, warn};
use yew::prelude::*;

mod components;
mod utils;

use components::{CountdownDisplay, DebugOverlay, TouchTracker};

// ──────────────────────────────────────────────────────────────────────────────
// Host timer

/// Expiry timer backed by a browser timeout.
///
/// Arming drops the previous `Timeout`, which cancels it, so only the latest
/// session can fire.
struct BrowserTimer {
    pending: Option<Timeout>,
    on_expire: Callback<SessionId>,
}

impl ExpiryTimer for BrowserTimer {
    fn arm(&mut self, session: SessionId, after_ms: u32) {
        let on_expire = self.on_expire.clone();
        self.pending = Some(Timeout::new(after_ms, move || on_expire.emit(session)));
    }

    fn disarm(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Touch surface

#[derive(Properties, PartialEq)]
struct PickerAreaProps {
    config: PickerConfig,
}

/// Full-screen touch surface driving one picker.
#[function_component(PickerArea)]
fn picker_area(props: &PickerAreaProps) -> Html {
    let picker = use_mut_ref({
        let config = props.config.clone();
        move || TouchPicker::new(config)
    });
    let model = use_state({
        let picker = picker.clone();
        move || picker.borrow().render(utils::now_ms())
    });

    // Timer expiry: second entry point into the picker
    let on_expire = {
        let picker = picker.clone();
        let model = model.clone();
        Callback::from(move |session: SessionId| {
            let mut picker = picker.borrow_mut();
            if picker.on_expire(session, &mut rand::rng()) {
                model.set(picker.render(utils::now_ms()));
            }
        })
    };
    let timer = use_mut_ref(move || BrowserTimer {
        pending: None,
        on_expire,
    });

    let ontouch = {
        let picker = picker.clone();
        let timer = timer.clone();
        let model = model.clone();
        Callback::from(move |e: TouchEvent| {
            let snapshot = match utils::snapshot_from_event(&e) {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    warn!("Ignoring touch event: {}", err);
                    return;
                }
            };
            let now = utils::now_ms();
            let mut picker = picker.borrow_mut();
            if let Some(command) = picker.on_touches(&snapshot, now) {
                timer.borrow_mut().apply(command);
            }
            model.set(picker.render(now));
        })
    };

    // Refresh the countdown label and background while the clock runs;
    // abandon the round on unmount.
    {
        let picker = picker.clone();
        let timer = timer.clone();
        let model = model.clone();
        use_effect_with((), move |_| {
            let ticker = {
                let picker = picker.clone();
                Interval::new(REFRESH_INTERVAL_MS, move || {
                    let picker = picker.borrow();
                    if picker.state() == PickerState::Countdown {
                        model.set(picker.render(utils::now_ms()));
                    }
                })
            };
            move || {
                drop(ticker);
                if let Some(command) = picker.borrow_mut().reset() {
                    timer.borrow_mut().apply(command);
                }
            }
        });
    }

    let size = model.tracker_size_px;
    // Shown separately only once the winning finger has left the surface
    let lifted_winner = model
        .winner
        .filter(|_| !model.trackers.iter().any(|t| t.role == Role::Winner));

    html! {
        <div id="container" class="picker-container">
            <div
                id="interaction-area"
                class={classes!("interaction-area", model.state.to_string())}
                style={format!("background-color: {};", model.background.to_string())}
                ontouchstart={ontouch.clone()}
                ontouchmove={ontouch.clone()}
                ontouchend={ontouch.clone()}
                ontouchcancel={ontouch}
            >
                { for model.trackers.iter().map(|t| html! {
                    <TouchTracker
                        key={t.id.to_string()}
                        x={t.x}
                        y={t.y}
                        size={size}
                        color={t.color.to_string()}
                        role={t.role}
                    />
                }) }
                if let Some(w) = lifted_winner {
                    <TouchTracker
                        key="winner"
                        x={w.x}
                        y={w.y}
                        size={size}
                        color={w.color.to_string()}
                        role={w.role}
                    />
                }
                if let Some(label) = model.countdown_label.clone() {
                    <CountdownDisplay label={label} />
                }
            </div>
            if let Some(lines) = model.debug_lines.clone() {
                <DebugOverlay lines={lines} />
            }
        </div>
    }
}

// ──────────────────────────────────────────────────────────────────────────────

/// App wrapper reading the page options.
#[function_component]
pub fn App() -> Html {
    let config = use_memo((), |_| PickerConfig::from_query(&utils::page_query()));
    html! {
        <PickerArea config={(*config).clone()} />
    }
}

/// Entry point: initializes logging and the Yew renderer.
fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    info!("Starting finger picker");
    yew::Renderer::<App>::new().render();
}
