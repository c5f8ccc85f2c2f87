//! Audio Manager - owns the single audio element and keeps it in step with the
//! player state outside of the render cycle.

use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::components::{AudioState, PlayerState};
#[cfg(target_arch = "wasm32")]
use crate::playback::{on_track_ended, EndedAction};
#[cfg(target_arch = "wasm32")]
use tracing::debug;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

#[cfg(target_arch = "wasm32")]
const AUDIO_ELEMENT_ID: &str = "cadenza-audio";
#[cfg(target_arch = "wasm32")]
const POLL_INTERVAL_MS: u32 = 200;

/// Find the hidden audio element, creating it on first use.
#[cfg(target_arch = "wasm32")]
pub fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_attribute("preload", "auto").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

/// Start playback, ignoring autoplay rejections.
#[cfg(target_arch = "wasm32")]
fn try_play(audio: &HtmlAudioElement) {
    match audio.play() {
        Ok(promise) => {
            spawn(async move {
                if let Err(error) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    debug!(?error, "audio playback was rejected");
                }
            });
        }
        Err(error) => debug!(?error, "audio playback failed to start"),
    }
}

#[cfg(target_arch = "wasm32")]
#[component]
pub fn AudioController() -> Element {
    let player = use_context::<PlayerState>();
    let audio_state = use_context::<AudioState>();
    let mut last_src = use_signal(|| None::<String>);

    // Mirror the element into the shared signals.
    use_effect(move || {
        let mut player = player;
        let mut current_time = audio_state.current_time;
        let mut duration = audio_state.duration;
        let mut is_playing = player.is_playing;

        spawn(async move {
            let mut was_ended = false;
            loop {
                gloo_timers::future::TimeoutFuture::new(POLL_INTERVAL_MS).await;
                let Some(audio) = get_or_create_audio_element() else {
                    continue;
                };

                let time = audio.current_time();
                if time.is_finite() && (time - *current_time.peek()).abs() > f64::EPSILON {
                    current_time.set(time);
                }

                let length = audio.duration();
                if length.is_finite() && (length - *duration.peek()).abs() > f64::EPSILON {
                    duration.set(length);
                }

                let playing = !audio.paused();
                if playing != *is_playing.peek() {
                    is_playing.set(playing);
                }

                let ended = audio.ended();
                if ended && !was_ended {
                    match on_track_ended(*player.repeat.peek()) {
                        EndedAction::Restart => {
                            audio.set_current_time(0.0);
                            current_time.set(0.0);
                            try_play(&audio);
                        }
                        EndedAction::Advance => player.play_next(),
                    }
                }
                was_ended = ended;
            }
        });
    });

    // Swap the source when the song changes and honor play requests.
    use_effect(move || {
        let song = (player.current_song)();
        let requested = (player.play_requested)();
        let mut play_requested = player.play_requested;
        let mut current_time = audio_state.current_time;
        let mut duration = audio_state.duration;

        let Some(audio) = get_or_create_audio_element() else {
            return;
        };

        let src = song.map(|song| song.audio_url).unwrap_or_default();
        if last_src.peek().as_deref() != Some(src.as_str()) {
            last_src.set(Some(src.clone()));
            audio.set_src(&src);
            current_time.set(0.0);
            duration.set(0.0);
        }

        if requested {
            play_requested.set(false);
            if !src.is_empty() {
                try_play(&audio);
            }
        }
    });

    rsx! {}
}

/// Audio controller - no audio element outside the browser
#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn AudioController() -> Element {
    rsx! {}
}

/// Seek to a specific position in the current track
#[cfg(target_arch = "wasm32")]
pub fn seek_to(position: f64) {
    if let Some(audio) = get_or_create_audio_element() {
        audio.set_current_time(position);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn seek_to(_position: f64) {}

#[cfg(target_arch = "wasm32")]
pub fn play() {
    if let Some(audio) = get_or_create_audio_element() {
        try_play(&audio);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn play() {}

#[cfg(target_arch = "wasm32")]
pub fn pause() {
    if let Some(audio) = get_or_create_audio_element() {
        let _ = audio.pause();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn pause() {}
