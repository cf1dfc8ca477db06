use dioxus::prelude::*;
#[cfg(feature = "web")]
use dioxus_logger::tracing;

use crate::{client::router::Route, model::user::UserDto};

/// The signed-in user shared with every route.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserState {
    pub user: Option<UserDto>,
    /// Whether the user request has completed, successfully or not
    pub fetched: bool,
}

#[component]
pub fn App() -> Element {
    #[allow(unused_mut)]
    let mut user_state = use_context_provider(|| Signal::new(UserState::default()));

    #[cfg(feature = "web")]
    {
        let future = use_resource(|| async move { crate::client::util::api::get_user().await });

        use_effect(move || match &*future.read() {
            Some(Ok(user)) => user_state.set(UserState {
                user: user.clone(),
                fetched: true,
            }),
            Some(Err(err)) => {
                tracing::error!("{}", err);

                user_state.set(UserState {
                    user: None,
                    fetched: true,
                });
            }
            None => (),
        });
    }

    rsx! {
        Router::<Route> {}
    }
}
