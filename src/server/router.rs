//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Each endpoint is annotated with OpenAPI specifications via utoipa, which are collected into
/// a unified OpenAPI document served at `/api/docs/openapi.json`. Swagger UI is served at
/// `/api/docs`.
///
/// # Registered Endpoints
/// - `/api/auth` - Signed-in user and logout
/// - `/api/residents` - Resident registry
/// - `/api/incidents` - Security incident reports and their workflow
/// - `/api/appointments` - Health center appointments and free slots
/// - `/api/documents` - Document requests
/// - `/api/notifications` - Notifications of the signed-in user
/// - `/api/stats/dashboard` - Dashboard counts
/// - `/api/realtime/{table}` - Server-sent change events per table
///
/// # Returns
/// An Axum `Router<AppState>` ready to be merged into the main application router. The
/// session layer must be applied by the caller.
///
/// # Example
/// ```ignore
/// let app_state = AppState { db, feed };
/// let router = routes().with_state(app_state).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Barangay", description = "Barangay management API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Session user routes"),
        (name = controller::resident::RESIDENT_TAG, description = "Resident registry routes"),
        (name = controller::incident::INCIDENT_TAG, description = "Security incident routes"),
        (name = controller::appointment::APPOINTMENT_TAG, description = "Appointment routes"),
        (name = controller::document::DOCUMENT_TAG, description = "Document request routes"),
        (name = controller::notification::NOTIFICATION_TAG, description = "Notification routes"),
        (name = controller::stats::STATS_TAG, description = "Dashboard stat routes"),
        (name = controller::realtime::REALTIME_TAG, description = "Realtime change stream routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::get_user))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(
            controller::resident::get_residents,
            controller::resident::create_resident
        ))
        .routes(routes!(
            controller::resident::get_resident,
            controller::resident::update_resident,
            controller::resident::delete_resident
        ))
        .routes(routes!(
            controller::incident::get_incidents,
            controller::incident::create_incident
        ))
        .routes(routes!(
            controller::incident::get_incident,
            controller::incident::update_incident,
            controller::incident::close_incident
        ))
        .routes(routes!(controller::incident::set_incident_status))
        .routes(routes!(controller::incident::assign_incident))
        .routes(routes!(controller::incident::resolve_incident))
        .routes(routes!(
            controller::appointment::get_appointments,
            controller::appointment::create_appointment
        ))
        .routes(routes!(controller::appointment::get_available_slots))
        .routes(routes!(
            controller::appointment::get_appointment,
            controller::appointment::update_appointment,
            controller::appointment::delete_appointment
        ))
        .routes(routes!(controller::appointment::confirm_appointment))
        .routes(routes!(controller::appointment::cancel_appointment))
        .routes(routes!(controller::appointment::complete_appointment))
        .routes(routes!(controller::appointment::mark_appointment_no_show))
        .routes(routes!(
            controller::document::get_document_requests,
            controller::document::create_document_request
        ))
        .routes(routes!(controller::document::set_document_status))
        .routes(routes!(controller::notification::get_notifications))
        .routes(routes!(controller::notification::get_unread_count))
        .routes(routes!(controller::notification::mark_notification_read))
        .routes(routes!(controller::notification::mark_all_notifications_read))
        .routes(routes!(controller::stats::get_dashboard_stats))
        .routes(routes!(controller::realtime::subscribe))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
}
