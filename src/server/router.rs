use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::server::{controller::dashboard::get_dashboard, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .layer(TraceLayer::new_for_http())
}
