use dioxus::document::{Meta, Title};
use dioxus::prelude::*;

use crate::client::{app::UserState, components::Page};

#[component]
pub fn PortalButton() -> Element {
    let user_state = use_context::<Signal<UserState>>();
    let state = user_state.read();

    rsx!(
        ul { class: "flex gap-2",
            if let Some(user) = state.user.as_ref() {
                li {
                    Link {
                        to: user.landing_path.clone(),
                        class: "btn btn-primary w-40",
                        "{user.role.portal_title()}"
                    }
                }
                li {
                    a { href: "/api/docs",
                        button {
                            class: "btn btn-secondary w-28",
                            "API Docs"
                        }
                    }
                }
            } else if state.fetched {
                li {
                    p { class: "text-sm",
                        "Sign in through the barangay identity provider to continue."
                    }
                }
            }
        }
    )
}

#[component]
pub fn Home() -> Element {
    rsx!(
        Title { "Barangay Home" }
        Meta {
            name: "description",
            content: "Barangay management platform for residents, health workers, tanods, and administrators."
        }
        Page { class: "flex items-center justify-center",
            div { class: "flex flex-col items-center gap-4",
                div { class: "flex items-center gap-2",
                    p { class: "text-2xl",
                        "Barangay"
                    }
                    p {
                        "v0.1.0-Alpha.1"
                    }
                }
                div {
                    PortalButton { }
                }
                div { class: "flex flex-col gap-2 px-4 max-w-256",
                    p {
                        "Keep the resident registry, security incident reports, health center appointments and document requests of the barangay in one place."
                    }
                    ul { class: "list-disc pl-6",
                        li { "Residents: request documents, book health center appointments and report incidents" }
                        li { "Health workers: confirm and complete appointments" }
                        li { "Tanods and emergency coordinators: triage, assign and resolve incidents" }
                        li { "Administrators: maintain the resident registry and process document requests" }
                    }
                }
            }
        }
    )
}
