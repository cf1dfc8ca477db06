use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{api::ErrorDto, stats::DashboardStatsDto},
    server::{
        controller::util::get_user::get_user_from_session, error::Error, model::app::AppState,
        service::stats::StatsService, util::access::require_staff,
    },
};

pub static STATS_TAG: &str = "stats";

/// Retrieve the dashboard counts
///
/// Counts that fail to compute are reported as zero.
#[utoipa::path(
    get,
    path = "/api/stats/dashboard",
    tag = STATS_TAG,
    responses(
        (status = 200, description = "Success when computing dashboard stats", body = DashboardStatsDto),
        (status = 403, description = "User is not staff", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;
    require_staff(&user, "view dashboard stats")?;

    let stats = StatsService::new(&state.db).get_dashboard_stats().await;

    Ok((StatusCode::OK, axum::Json(stats)))
}
