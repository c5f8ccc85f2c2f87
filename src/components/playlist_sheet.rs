use crate::components::{Icon, PlayerState};
use crate::playback::filter_songs;
use dioxus::prelude::*;

/// Bottom sheet listing the playlist with search and refresh.
#[component]
pub fn PlaylistSheet(
    open: bool,
    on_close: EventHandler<()>,
    on_refresh: EventHandler<()>,
) -> Element {
    let mut player = use_context::<PlayerState>();
    let mut search_term = use_signal(String::new);

    if !open {
        return rsx! {};
    }

    let loading = (player.playlist_loading)();
    let current_id = player.current_song.read().as_ref().map(|song| song.id.clone());
    let term = search_term();
    let playlist = player.playlist.read();
    let visible: Vec<_> = filter_songs(&playlist, &term).into_iter().cloned().collect();
    drop(playlist);

    rsx! {
        div { class: "sheet-backdrop", onclick: move |_| on_close.call(()) }
        div { class: "sheet",
            button {
                class: "sheet-handle",
                aria_label: "Close playlist",
                onclick: move |_| on_close.call(()),
                span {}
            }

            div { class: "sheet-header",
                h2 { "Up Next" }
                button {
                    class: "icon-button",
                    aria_label: "Refresh playlist",
                    disabled: loading,
                    onclick: move |_| on_refresh.call(()),
                    if loading {
                        Icon { name: "loader".to_string(), class: "icon-md".to_string() }
                    } else {
                        Icon { name: "refresh".to_string(), class: "icon-md".to_string() }
                    }
                }
            }

            div { class: "sheet-search",
                Icon { name: "search".to_string(), class: "icon-sm".to_string() }
                input {
                    r#type: "text",
                    value: "{term}",
                    placeholder: "Search Songs...",
                    oninput: move |evt| search_term.set(evt.value()),
                }
                if !term.is_empty() {
                    button {
                        class: "icon-button",
                        aria_label: "Clear search",
                        onclick: move |_| search_term.set(String::new()),
                        Icon { name: "x".to_string(), class: "icon-sm".to_string() }
                    }
                }
            }

            div { class: "sheet-list no-scrollbar",
                if visible.is_empty() && !loading {
                    p { class: "sheet-empty", "No songs found" }
                }
                for song in visible {
                    button {
                        key: "{song.id}",
                        class: if current_id.as_deref() == Some(song.id.as_str()) { "song-row current" } else { "song-row" },
                        onclick: {
                            let song = song.clone();
                            move |_| {
                                player.select(song.clone());
                                on_close.call(());
                            }
                        },
                        div { class: "song-thumb",
                            if let Some(cover) = song.cover_url() {
                                img { src: "{cover}", alt: "", loading: "lazy" }
                            } else {
                                Icon { name: "music".to_string(), class: "icon-sm".to_string() }
                            }
                            if current_id.as_deref() == Some(song.id.as_str()) {
                                div { class: "equalizer",
                                    span {}
                                    span {}
                                    span {}
                                }
                            }
                        }
                        div { class: "song-meta",
                            p { class: "song-title", "{song.title}" }
                            p { class: "song-artist", "{song.artist}" }
                        }
                    }
                }
            }
        }
    }
}
