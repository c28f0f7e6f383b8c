use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::rest_api::errors::error_response;
use crate::rest_api::SharedApp;

pub(crate) async fn clear(State(app): State<SharedApp>) -> Response {
    match app.service.clear().await {
        Ok(()) => Json(serde_json::json!({})).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn status(State(app): State<SharedApp>) -> Response {
    match app.service.status().await {
        Ok(status) => Json(status).into_response(),
        Err(err) => error_response(err),
    }
}
