use dioxus::prelude::*;

pub const FALLBACK_BACKGROUND: &str =
    "https://images.unsplash.com/photo-1470225620780-dba8ba36b745?auto=format&fit=crop&w=1600&q=80";

/// Full-screen blurred cover art behind the player.
#[component]
pub fn ImmersiveBackground(cover: String) -> Element {
    let mut loaded_src = use_signal(String::new);
    let mut failed_src = use_signal(String::new);
    let src = backdrop_source(&cover, &failed_src.read());
    let visible = *loaded_src.read() == src;

    rsx! {
        div { class: "backdrop",
            img {
                class: if visible { "backdrop-image visible" } else { "backdrop-image" },
                src: "{src}",
                alt: "",
                onload: {
                    let src = src.clone();
                    move |_| loaded_src.set(src.clone())
                },
                onerror: {
                    let src = src.clone();
                    move |_| {
                        if src != FALLBACK_BACKGROUND {
                            failed_src.set(src.clone());
                        }
                    }
                },
            }
            div { class: "backdrop-blur" }
            div { class: "backdrop-gradient" }
        }
    }
}

/// The cover, unless it is blank or already failed to load.
fn backdrop_source(cover: &str, failed: &str) -> String {
    let cover = cover.trim();
    if cover.is_empty() || cover == failed {
        FALLBACK_BACKGROUND.to_string()
    } else {
        cover.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_for_blank_or_failed_covers() {
        assert_eq!(backdrop_source("", ""), FALLBACK_BACKGROUND);
        assert_eq!(backdrop_source("https://a.example/c.jpg", ""), "https://a.example/c.jpg");
        assert_eq!(
            backdrop_source("https://a.example/c.jpg", "https://a.example/c.jpg"),
            FALLBACK_BACKGROUND
        );
        assert_eq!(
            backdrop_source("https://b.example/d.jpg", "https://a.example/c.jpg"),
            "https://b.example/d.jpg"
        );
    }
}
