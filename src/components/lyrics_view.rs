use crate::api::LyricLine;
use crate::components::{AudioState, Icon, PlayerState, SongInfoState};
use crate::playback::{active_lyric_index, lyric_to_center};
use dioxus::prelude::*;

const LYRICS_CONTAINER_ID: &str = "lyrics-scroll";

fn line_dom_id(index: usize) -> String {
    format!("{LYRICS_CONTAINER_ID}-line-{index}")
}

/// Synced lyrics; the active line is kept in the vertical center.
#[component]
pub fn LyricsView() -> Element {
    let song_info = use_context::<SongInfoState>();
    let mut audio_state = use_context::<AudioState>();
    let player = use_context::<PlayerState>();
    let mut last_centered = use_signal(|| None::<(String, usize)>);

    let lines = song_info.lyrics.read().clone();
    let active_index = active_lyric_index(&lines, (audio_state.current_time)());

    use_effect(move || {
        let active = active_lyric_index(&song_info.lyrics.read(), (audio_state.current_time)());
        let song_id = player
            .current_song
            .read()
            .as_ref()
            .map(|song| song.id.clone())
            .unwrap_or_default();

        if active.is_none() {
            if last_centered.peek().is_some() {
                last_centered.set(None);
            }
            return;
        }
        let Some(index) = lyric_to_center(last_centered.peek().as_ref(), &song_id, active) else {
            return;
        };

        let line_id = line_dom_id(index);
        let script = format!(
            r#"(function() {{
                const container = document.getElementById("{LYRICS_CONTAINER_ID}");
                const line = document.getElementById("{line_id}");
                if (!container || !line) return;
                const cRect = container.getBoundingClientRect();
                const lRect = line.getBoundingClientRect();
                const target = container.scrollTop + (lRect.top - cRect.top) - (cRect.height / 2) + (lRect.height / 2);
                container.scrollTo({{ top: target, behavior: "smooth" }});
            }})();"#
        );
        let _ = document::eval(&script);
        last_centered.set(Some((song_id, index)));
    });

    if (song_info.loading)() {
        return rsx! {
            div { class: "lyrics-status",
                Icon { name: "loader".to_string(), class: "icon-lg".to_string() }
                p { "Loading Lyrics..." }
            }
        };
    }

    if lines.is_empty() {
        return rsx! {
            div { class: "lyrics-status",
                p { "No Lyrics Available" }
            }
        };
    }

    rsx! {
        div { id: LYRICS_CONTAINER_ID, class: "lyrics-scroll no-scrollbar mask-fade",
            div { class: "lyrics-spacer" }
            for (index, LyricLine { time, text }) in lines.into_iter().enumerate() {
                p {
                    key: "{index}",
                    id: line_dom_id(index),
                    class: if active_index == Some(index) { "lyric-line active" } else { "lyric-line" },
                    onclick: move |_| audio_state.seek(time),
                    "{text}"
                }
            }
            div { class: "lyrics-spacer" }
        }
    }
}
