use dioxus::document::Title;
use dioxus::prelude::*;

use crate::{
    client::{components::Page, util::realtime::use_live_resource},
    model::resident::ResidentDto,
};

/// Searchable table of the resident registry
///
/// Rows are kept current from the residents change stream while the page is open.
#[component]
pub fn Residents() -> Element {
    let live = use_live_resource::<ResidentDto>("/api/residents");
    let store = live.store;
    let mut query = use_signal(String::new);

    let store_ref = store.read();
    let rows = store_ref.search(&query.read());

    rsx!(
        Title { "Residents | Barangay" }
        Page { heading: "Resident registry".to_string(),
            div { class: "w-full max-w-[1440px] p-2 flex flex-col gap-4",
                div { class: "flex gap-2 items-center",
                    input {
                        class: "input input-bordered w-full max-w-96",
                        placeholder: "Search residents",
                        value: "{query}",
                        oninput: move |event| query.set(event.value()),
                    }
                    button {
                        class: "btn btn-outline",
                        disabled: store_ref.is_loading(),
                        onclick: move |_| live.reload(),
                        "Reload"
                    }
                }
                if let Some(error) = store_ref.error() {
                    div { class: "alert alert-error", "{error}" }
                }
                div { class: "overflow-x-auto",
                    table { class: "table table-md",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Purok" }
                                th { "Address" }
                                th { "Contact" }
                            }
                        }
                        tbody {
                            for resident in rows {
                                tr { key: "{resident.id}",
                                    td { "{resident.full_name()}" }
                                    td { {resident.purok.clone().unwrap_or_default()} }
                                    td { "{resident.address}" }
                                    td { {resident.phone.clone().or_else(|| resident.email.clone()).unwrap_or_default()} }
                                }
                            }
                        }
                    }
                }
            }
        }
    )
}
