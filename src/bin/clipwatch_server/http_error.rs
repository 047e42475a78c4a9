use super::*;

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({"error": message}))).into_response()
}

pub(super) fn unauthorized() -> Response {
    error_response(StatusCode::UNAUTHORIZED, "unauthorized")
}

pub(super) fn bad_request(err: anyhow::Error) -> Response {
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

pub(super) fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "not found")
}

pub(super) fn conflict(msg: &str) -> Response {
    error_response(StatusCode::CONFLICT, msg)
}

pub(super) fn internal_error(err: anyhow::Error) -> Response {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
}

pub(super) fn unavailable(msg: &str) -> Response {
    error_response(StatusCode::SERVICE_UNAVAILABLE, msg)
}
