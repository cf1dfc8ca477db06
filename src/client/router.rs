use dioxus::prelude::*;

use crate::client::{
    components::Navbar,
    routes::{Home, NotFound, Portal, Residents},
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]

    #[route("/")]
    Home {},

    #[route("/admin/residents")]
    Residents {},

    #[route("/:portal")]
    Portal { portal: String },

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}
