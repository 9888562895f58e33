use askama::Template;
use axum::{
    extract::State,
    http::{header::ACCEPT, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::{
    model::dashboard::DashboardStatsDto,
    server::{error::AppError, service::dashboard::DashboardService, state::AppState},
};

/// GET / - Dashboard with aggregate bot statistics
///
/// Renders the bot name, the summed member count of every guild the bot is in,
/// and the number of registered users.
///
/// # Content Negotiation
/// Requests whose `Accept` header contains `application/json` receive the
/// statistics as a `DashboardStatsDto`; everything else receives HTML.
///
/// # Returns
/// - `200 OK`: HTML page or DashboardStatsDto
/// - `500 Internal Server Error`: Database error while counting users, or the
///   page failed to render
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let stats = DashboardService::new(&state.db, &state.cache).stats().await?;

    if wants_json(&headers) {
        return Ok((StatusCode::OK, Json(stats)).into_response());
    }

    let html = DashboardTemplate::from(&stats).render()?;

    Ok((StatusCode::OK, Html(html)).into_response())
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"))
}

#[derive(Template)]
#[template(path = "dashboard.html", escape = "html")]
struct DashboardTemplate<'a> {
    bot_name: &'a str,
    member_count: u64,
    total: u64,
}

impl<'a> From<&'a DashboardStatsDto> for DashboardTemplate<'a> {
    fn from(stats: &'a DashboardStatsDto) -> Self {
        Self {
            bot_name: &stats.bot_name,
            member_count: stats.member_count,
            total: stats.total,
        }
    }
}
