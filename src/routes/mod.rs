//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback (each widget slug is a client route)
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/widgets", get(http::http_widgets))
        .route("/api/v1/session", post(http::http_post_session))
        .route("/api/v1/session/:id", get(http::http_get_session))
        .route("/api/v1/answer", post(http::http_post_answer))
        .route("/api/v1/hint", get(http::http_get_hint))
        .route("/api/v1/solution", post(http::http_post_solution))
        .route("/api/v1/next", post(http::http_post_next))
        .route("/api/v1/check", post(http::http_post_check))
        .route("/api/v1/geometry/angle", post(http::http_post_angle))
        .route("/api/v1/circle/:mode", get(http::http_get_circle))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::QuizConfig;

    fn app() -> Router {
        build_router(Arc::new(AppState::from_config(QuizConfig::default())))
    }

    async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_and_catalogue() {
        let app = app();
        let (status, body) = call(&app, get("/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ok": true }));

        let (_, body) = call(&app, get("/api/v1/widgets")).await;
        let widgets = body.as_array().unwrap();
        assert_eq!(widgets.len(), 8);
        assert_eq!(widgets[0]["path"], "/angle-quiz");
    }

    #[tokio::test]
    async fn session_round_trip_over_http() {
        let app = app();
        let (status, s) = call(&app, post("/api/v1/session", json!({ "widget": "inequality", "level": 1 }))).await;
        assert_eq!(status, StatusCode::OK);
        let id = s["sessionId"].as_str().unwrap().to_string();
        assert_eq!(s["phase"], "answer_input");

        let (status, err) = call(&app, post("/api/v1/answer", json!({ "sessionId": id, "answers": ["  "] }))).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err["error"], "please enter an answer");

        let (status, s) = call(&app, post("/api/v1/answer", json!({ "sessionId": id, "answers": ["x=999"] }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(s["phase"], "submitted");
        assert_eq!(s["correct"], false);

        let (status, s) = call(&app, post("/api/v1/solution", json!({ "sessionId": id }))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(s["solution"].as_array().is_some_and(|steps| !steps.is_empty()));

        let (_, s) = call(&app, post("/api/v1/next", json!({ "sessionId": id }))).await;
        assert_eq!(s["phase"], "answer_input");
        assert!(s["feedback"].is_null());

        let (status, _) = call(&app, get(&format!("/api/v1/session/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(&app, get("/api/v1/session/missing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reveal_before_answer_conflicts() {
        let app = app();
        let (_, s) = call(&app, post("/api/v1/session", json!({ "widget": "angle-quiz" }))).await;
        let id = s["sessionId"].as_str().unwrap();
        let (status, _) = call(&app, post("/api/v1/solution", json!({ "sessionId": id }))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, hint) = call(&app, get(&format!("/api/v1/hint?sessionId={id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(hint["text"].is_string());
    }

    #[tokio::test]
    async fn stateless_endpoints() {
        let app = app();
        let (_, v) = call(
            &app,
            post("/api/v1/check", json!({ "answer": "x >= 3", "accepted": ["x≥3"], "profile": "inequality" })),
        )
        .await;
        assert_eq!(v["correct"], true);

        let (_, fig) = call(
            &app,
            post(
                "/api/v1/geometry/angle",
                json!({ "vertex": {"x": 0.0, "y": 0.0}, "arm1": {"x": 5.0, "y": 0.0}, "arm2": {"x": 0.0, "y": 5.0} }),
            ),
        )
        .await;
        assert_eq!(fig["degrees"], 90.0);

        let (status, fig) = call(&app, get("/api/v1/circle/tangent_props")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fig["mode"], "tangent_props");
        let (status, _) = call(&app, get("/api/v1/circle/hexagon")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
