use dioxus::prelude::*;

/// Inline stroke icon. Filled variants (`play`, `pause`, `heart-filled`, ...) use
/// `currentColor` as their fill.
#[component]
pub fn Icon(name: String, class: String) -> Element {
    let filled = matches!(
        name.as_str(),
        "play" | "pause" | "prev" | "next" | "heart-filled" | "more"
    );
    let class = if name == "loader" {
        format!("{class} spin")
    } else {
        class
    };

    rsx! {
        svg {
            class: "{class}",
            view_box: "0 0 24 24",
            fill: if filled { "currentColor" } else { "none" },
            stroke: if filled { "none" } else { "currentColor" },
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            {glyph(&name)}
        }
    }
}

fn glyph(name: &str) -> Element {
    match name {
        "list" => rsx! {
            line { x1: "8", y1: "6", x2: "21", y2: "6" }
            line { x1: "8", y1: "12", x2: "21", y2: "12" }
            line { x1: "8", y1: "18", x2: "21", y2: "18" }
            circle { cx: "3.5", cy: "6", r: "1" }
            circle { cx: "3.5", cy: "12", r: "1" }
            circle { cx: "3.5", cy: "18", r: "1" }
        },
        "more" => rsx! {
            circle { cx: "5", cy: "12", r: "2" }
            circle { cx: "12", cy: "12", r: "2" }
            circle { cx: "19", cy: "12", r: "2" }
        },
        "heart" | "heart-filled" => rsx! {
            path { d: "M20.84 4.61a5.5 5.5 0 0 0-7.78 0L12 5.67l-1.06-1.06a5.5 5.5 0 0 0-7.78 7.78l1.06 1.06L12 21.23l7.78-7.78 1.06-1.06a5.5 5.5 0 0 0 0-7.78z" }
        },
        "shuffle" => rsx! {
            polyline { points: "16 3 21 3 21 8" }
            line { x1: "4", y1: "20", x2: "21", y2: "3" }
            polyline { points: "21 16 21 21 16 21" }
            line { x1: "15", y1: "15", x2: "21", y2: "21" }
            line { x1: "4", y1: "4", x2: "9", y2: "9" }
        },
        "repeat" => rsx! {
            polyline { points: "17 1 21 5 17 9" }
            path { d: "M3 11V9a4 4 0 0 1 4-4h14" }
            polyline { points: "7 23 3 19 7 15" }
            path { d: "M21 13v2a4 4 0 0 1-4 4H3" }
        },
        "play" => rsx! {
            polygon { points: "6 3 20 12 6 21 6 3" }
        },
        "pause" => rsx! {
            rect { x: "5", y: "3", width: "5", height: "18", rx: "1" }
            rect { x: "14", y: "3", width: "5", height: "18", rx: "1" }
        },
        "prev" => rsx! {
            polygon { points: "19 20 9 12 19 4 19 20" }
            rect { x: "4", y: "4", width: "3", height: "16", rx: "1" }
        },
        "next" => rsx! {
            polygon { points: "5 4 15 12 5 20 5 4" }
            rect { x: "17", y: "4", width: "3", height: "16", rx: "1" }
        },
        "music" => rsx! {
            path { d: "M9 18V5l12-2v13" }
            circle { cx: "6", cy: "18", r: "3" }
            circle { cx: "18", cy: "16", r: "3" }
        },
        "search" => rsx! {
            circle { cx: "11", cy: "11", r: "8" }
            line { x1: "21", y1: "21", x2: "16.65", y2: "16.65" }
        },
        "x" => rsx! {
            line { x1: "18", y1: "6", x2: "6", y2: "18" }
            line { x1: "6", y1: "6", x2: "18", y2: "18" }
        },
        "refresh" => rsx! {
            polyline { points: "23 4 23 10 17 10" }
            path { d: "M20.49 15a9 9 0 1 1-2.12-9.36L23 10" }
        },
        "loader" => rsx! {
            circle { cx: "12", cy: "12", r: "10", opacity: "0.25" }
            path { d: "M12 2a10 10 0 0 1 10 10", opacity: "0.75" }
        },
        "image" => rsx! {
            rect { x: "3", y: "3", width: "18", height: "18", rx: "2" }
            circle { cx: "8.5", cy: "8.5", r: "1.5" }
            polyline { points: "21 15 16 10 5 21" }
        },
        _ => rsx! {
            circle { cx: "12", cy: "12", r: "10" }
        },
    }
}
