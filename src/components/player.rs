use crate::components::{AudioState, Icon, PlayerState};
use crate::playback::{format_time, progress_percent};
use dioxus::prelude::*;

/// Progress bar and transport buttons.
#[component]
pub fn PlayerControls() -> Element {
    let player = use_context::<PlayerState>();
    let audio_state = use_context::<AudioState>();

    let current_time = (audio_state.current_time)();
    let duration = (audio_state.duration)();
    let percent = progress_percent(current_time, duration);

    rsx! {
        div { class: "controls",
            ProgressBar { current_time, duration, percent }

            div { class: "transport",
                ShuffleButton { active: (player.shuffle)() }
                PrevButton {}
                PlayPauseButton { playing: (player.is_playing)() }
                NextButton {}
                RepeatButton { active: (player.repeat)() }
            }
        }
    }
}

#[component]
fn ProgressBar(current_time: f64, duration: f64, percent: f64) -> Element {
    let mut audio_state = use_context::<AudioState>();
    let mut dragging = use_signal(|| None::<f64>);

    let shown_percent = dragging().unwrap_or(percent);
    let shown_time = dragging()
        .map(|value| value / 100.0 * duration)
        .unwrap_or(current_time);

    let on_seek_input = move |evt: Event<FormData>| {
        if let Ok(value) = evt.value().parse::<f64>() {
            dragging.set(Some(value.clamp(0.0, 100.0)));
        }
    };

    let on_seek_commit = move |evt: Event<FormData>| {
        dragging.set(None);
        if duration <= 0.0 || !duration.is_finite() {
            return;
        }
        if let Ok(value) = evt.value().parse::<f64>() {
            audio_state.seek(value.clamp(0.0, 100.0) / 100.0 * duration);
        }
    };

    rsx! {
        div { class: "progress",
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {shown_percent}%" }
                input {
                    r#type: "range",
                    min: "0",
                    max: "100",
                    step: "0.1",
                    value: "{shown_percent}",
                    class: "progress-input",
                    aria_label: "Seek",
                    oninput: on_seek_input,
                    onchange: on_seek_commit,
                }
            }
            div { class: "progress-times",
                span { "{format_time(shown_time)}" }
                span { "{format_time(duration)}" }
            }
        }
    }
}

#[component]
fn ShuffleButton(active: bool) -> Element {
    let mut player = use_context::<PlayerState>();

    rsx! {
        button {
            id: "shuffle-btn",
            class: if active { "control-button toggled" } else { "control-button" },
            aria_label: "Shuffle",
            onclick: move |_| player.toggle_shuffle(),
            Icon { name: "shuffle".to_string(), class: "icon-md".to_string() }
        }
    }
}

#[component]
fn PrevButton() -> Element {
    let mut player = use_context::<PlayerState>();

    rsx! {
        button {
            id: "prev-btn",
            class: "control-button",
            aria_label: "Previous",
            onclick: move |_| player.play_previous(),
            Icon { name: "prev".to_string(), class: "icon-lg".to_string() }
        }
    }
}

#[component]
fn PlayPauseButton(playing: bool) -> Element {
    let player = use_context::<PlayerState>();

    rsx! {
        button {
            id: "play-pause-btn",
            class: "play-button",
            aria_label: if playing { "Pause" } else { "Play" },
            onclick: move |_| player.toggle_play(),
            if playing {
                Icon { name: "pause".to_string(), class: "icon-xl".to_string() }
            } else {
                Icon { name: "play".to_string(), class: "icon-xl".to_string() }
            }
        }
    }
}

#[component]
fn NextButton() -> Element {
    let mut player = use_context::<PlayerState>();

    rsx! {
        button {
            id: "next-btn",
            class: "control-button",
            aria_label: "Next",
            onclick: move |_| player.play_next(),
            Icon { name: "next".to_string(), class: "icon-lg".to_string() }
        }
    }
}

#[component]
fn RepeatButton(active: bool) -> Element {
    let mut player = use_context::<PlayerState>();

    rsx! {
        button {
            id: "repeat-btn",
            class: if active { "control-button toggled" } else { "control-button" },
            aria_label: "Repeat",
            onclick: move |_| player.toggle_repeat(),
            Icon { name: "repeat".to_string(), class: "icon-md".to_string() }
        }
    }
}
