#![allow(non_snake_case)]

mod client;

use barangay::{model, store};

#[cfg(feature = "server")]
use barangay::server;

fn main() {
    #[cfg(not(feature = "server"))]
    dioxus::launch(client::App);

    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        use dioxus_logger::tracing;

        use crate::server::{config::Config, model::app::AppState, startup};

        dotenvy::dotenv().ok();
        let config = match Config::from_env() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            }
        };

        let session = startup::connect_to_session(&config).await?;
        let db = startup::connect_to_database(&config).await?;
        let feed = startup::build_change_feed(&config);

        tracing::info!("Starting server");

        let mut router = dioxus::server::router(client::App);
        let server_routes = server::router::routes()
            .with_state(AppState { db, feed })
            .layer(session);
        router = router.merge(server_routes);

        Ok(router)
    })
}
