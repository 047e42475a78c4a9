use super::*;

pub(super) fn build_app_router(state: Arc<AppState>) -> Router {
    let authed = Router::new()
        .route("/api/clips", get(list_clips).post(record_clip))
        .route("/api/clips/events", get(clip_events))
        .route("/api/delete_clip/:id", delete(delete_clip))
        .route("/api/download_clip/:id", get(download_clip))
        .route("/api/image/:name", get(get_image))
        .route("/api/video/:name", get(get_video))
        .route("/api/get_settings", get(get_settings))
        .route("/api/toggle_mode", post(toggle_mode))
        .route("/api/set_sensitivity", post(set_sensitivity))
        .route("/api/set_notification", post(set_notification))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/healthz", get(healthz))
        .merge(authed)
        .with_state(state)
}

async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };
    let Ok(value) = value.to_str() else {
        return unauthorized();
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };
    if token != state.dev_token {
        return unauthorized();
    }
    next.run(req).await
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
