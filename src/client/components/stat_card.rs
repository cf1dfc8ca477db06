use dioxus::prelude::*;

/// One dashboard tile
#[component]
pub fn StatCard(title: &'static str, value: u64, class: Option<&'static str>) -> Element {
    let class: &str = class.unwrap_or("");

    rsx!(
        div { class: "stat bg-base-200 rounded-box {class}",
            div { class: "stat-title", "{title}" }
            div { class: "stat-value", "{value}" }
        }
    )
}
