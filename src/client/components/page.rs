use dioxus::prelude::*;

/// Content area below the fixed navbar, with an optional page heading
#[component]
pub fn Page(class: Option<&'static str>, heading: Option<String>, children: Element) -> Element {
    let class = class.unwrap_or("");

    rsx!(
        div {
            class: "min-h-screen pt-[64px] p-4 {class}",
            if let Some(heading) = heading {
                h1 { class: "text-2xl p-2", "{heading}" }
            }
            {children}
        }
    )
}
