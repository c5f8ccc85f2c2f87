use crate::components::{Icon, PlayerState, SongInfoState};
use crate::playback::now_playing_labels;
use dioxus::prelude::*;

/// Artwork card with the current title, artist and like toggle.
#[component]
pub fn NowPlayingCard(on_show_lyrics: EventHandler<()>) -> Element {
    let mut player = use_context::<PlayerState>();
    let song_info = use_context::<SongInfoState>();

    let song = player.current_song.read().clone();
    let cover = song_info.cover.read().clone();
    let liked = player.is_current_liked();
    let playing = (player.is_playing)();

    let (title, artist) = now_playing_labels(song.as_ref());

    rsx! {
        div { class: "now-playing", onclick: move |_| on_show_lyrics.call(()),
            div { class: if playing { "artwork playing" } else { "artwork" },
                if cover.is_empty() {
                    div { class: "artwork-placeholder",
                        Icon { name: "music".to_string(), class: "icon-hero".to_string() }
                    }
                } else {
                    img { src: "{cover}", alt: "{title}" }
                }
            }
            div { class: "track-row",
                div { class: "track-meta",
                    h1 { class: "track-title", "{title}" }
                    p { class: "track-artist", "{artist}" }
                }
                button {
                    class: if liked { "like-button liked" } else { "like-button" },
                    aria_label: if liked { "Unlike" } else { "Like" },
                    disabled: song.is_none(),
                    onclick: move |evt: MouseEvent| {
                        evt.stop_propagation();
                        player.toggle_liked();
                    },
                    if liked {
                        Icon { name: "heart-filled".to_string(), class: "icon-md".to_string() }
                    } else {
                        Icon { name: "heart".to_string(), class: "icon-md".to_string() }
                    }
                }
            }
        }
    }
}
