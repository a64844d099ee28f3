//! Operational HTTP endpoints.
//!
//! - `/`         : minimal HTML index linking to the metrics path
//! - `/healthz`  : liveness
//! - `<metrics>` : Prometheus text format (path from config)

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use nfmetrics_core::render::render_snapshot;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let path = &state.cfg().exporter.metrics_path;
    Html(format!(
        "<html>\n<head><title>NfSen Metric Exporter</title></head>\n<body>\n\
         <h1>NfSen Metric Exporter</h1>\n\
         <p><a href='{path}'>Metrics</a></p>\n\
         </body>\n</html>\n"
    ))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let snapshot = state.store().snapshot();
    let mut body = render_snapshot(&snapshot);
    body.push_str(&state.metrics().render());

    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        body,
    )
        .into_response()
}
