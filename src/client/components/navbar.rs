use dioxus::prelude::*;

use crate::client::{app::UserState, components::TitleButton, router::Route};

#[component]
pub fn Navbar() -> Element {
    let user_state = use_context::<Signal<UserState>>();
    let state = user_state.read();

    rsx! {
        div {
            class: "navbar bg-base-200 fixed",
            div {
                class: "navbar-start",
                TitleButton {}
            }
            div {
                class: "navbar-end",
                if let Some(user) = state.user.as_ref() {
                    div { class: "flex items-center gap-2",
                        Link {
                            to: user.landing_path.clone(),
                            class: "btn btn-ghost",
                            "{user.full_name()}"
                        }
                        a { href: "/api/auth/logout",
                            button {
                                class: "btn btn-outline",
                                "Logout"
                            }
                        }
                    }
                }
            }
        }

        Outlet::<Route> {}
    }
}
