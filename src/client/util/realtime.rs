//! Keeps a [`ResourceStore`] current from the server's change stream.
//!
//! The stream of a table is opened when the component using [`use_live_resource`] mounts and
//! closed when it unmounts. Each `change` event patches the store row by row, a `resync` or
//! an undecodable change triggers a full load.

use dioxus::prelude::*;

use crate::store::{Record, ResourceStore};

/// A store kept current from its table's change stream.
pub struct LiveResource<T: Record + 'static> {
    pub store: Signal<ResourceStore<T>>,
    list_url: &'static str,
}

impl<T: Record + 'static> Clone for LiveResource<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Record + 'static> Copy for LiveResource<T> {}

impl<T: Record + 'static> LiveResource<T> {
    /// Starts a full load of the collection in the background.
    pub fn reload(&self) {
        #[cfg(feature = "web")]
        spawn(web::reload(*self));
    }
}

/// Loads the collection served at `list_url` and follows `T`'s change stream while the
/// calling component is mounted.
pub fn use_live_resource<T: Record + 'static>(list_url: &'static str) -> LiveResource<T> {
    let store = use_signal(ResourceStore::<T>::new);
    let live = LiveResource { store, list_url };

    #[cfg(feature = "web")]
    {
        let connection = use_hook(web::Connection::default);

        use_hook({
            let connection = connection.clone();

            move || {
                // Subscribe before loading so no change between the two is missed
                connection.open(live);
                live.reload();
            }
        });

        use_drop(move || connection.close());
    }

    live
}

#[cfg(feature = "web")]
mod web {
    use std::{cell::RefCell, rc::Rc};

    use dioxus::prelude::*;
    use dioxus_logger::tracing;
    use futures::{Stream, StreamExt};
    use gloo_net::eventsource::futures::EventSource;

    use super::LiveResource;
    use crate::{
        client::util::api::ApiSource,
        model::realtime::{FeedMessage, CHANGE_EVENT_NAME, RESYNC_EVENT_NAME},
        store::{ApplyOutcome, Record, RecordSource},
    };

    /// The open `EventSource` of a mounted component, if any.
    #[derive(Clone, Default)]
    pub struct Connection(Rc<RefCell<Option<EventSource>>>);

    impl Connection {
        pub fn open<T: Record + 'static>(&self, live: LiveResource<T>) {
            match subscribe::<T>() {
                Ok((source, messages)) => {
                    *self.0.borrow_mut() = Some(source);
                    spawn(follow(live, messages));
                }
                Err(err) => tracing::warn!("{}", err),
            }
        }

        pub fn close(&self) {
            if let Some(source) = self.0.borrow_mut().take() {
                source.close();
            }
        }
    }

    pub async fn reload<T: Record + 'static>(live: LiveResource<T>) {
        let mut store = live.store;

        let ticket = store.write().begin_load();
        let result = ApiSource::new(live.list_url).fetch_all().await;
        store.write().finish_load(ticket, result);
    }

    fn subscribe<T: Record>() -> Result<(EventSource, impl Stream<Item = FeedMessage>), String> {
        let url = format!("/api/realtime/{}", T::TABLE);

        let mut source = EventSource::new(&url)
            .map_err(|e| format!("Failed to open change stream {}: {:?}", url, e))?;
        let changes = source
            .subscribe(CHANGE_EVENT_NAME)
            .map_err(|e| format!("Failed to follow {} events: {:?}", CHANGE_EVENT_NAME, e))?;
        let resyncs = source
            .subscribe(RESYNC_EVENT_NAME)
            .map_err(|e| format!("Failed to follow {} events: {:?}", RESYNC_EVENT_NAME, e))?;

        let messages = futures::stream::select(changes, resyncs).filter_map(|item| async move {
            match item {
                Ok((event_name, message)) => {
                    let data = message.data().as_string().unwrap_or_default();

                    FeedMessage::from_server_event(&event_name, &data)
                }
                Err(err) => {
                    // The browser reconnects on its own, changes sent meanwhile are lost
                    tracing::debug!("Change stream interrupted: {:?}", err);

                    Some(FeedMessage::Resync)
                }
            }
        });

        Ok((source, messages))
    }

    async fn follow<T: Record + 'static>(
        live: LiveResource<T>,
        messages: impl Stream<Item = FeedMessage>,
    ) {
        let mut store = live.store;
        let mut messages = std::pin::pin!(messages);

        while let Some(message) = messages.next().await {
            if store.write().receive(&message) == ApplyOutcome::ReloadRequired {
                spawn(reload(live));
            }
        }
    }
}
