use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

mod api;
mod cache;
mod components;
mod db;
mod playback;

use components::AppShell;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to initialize logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Cadenza" }
        document::Meta { name: "viewport", content: "width=device-width, initial-scale=1, viewport-fit=cover" }
        document::Meta { name: "theme-color", content: "#0b0b0f" }
        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
