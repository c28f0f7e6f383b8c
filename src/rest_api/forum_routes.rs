use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::ForumCreate;
use crate::rest_api::errors::error_response;
use crate::rest_api::{decode, SharedApp};
use crate::usecase::Created;

pub(crate) async fn create_forum(State(app): State<SharedApp>, body: Bytes) -> Response {
    let info: ForumCreate = match decode(&body) {
        Ok(info) => info,
        Err(err) => return error_response(err),
    };

    match app.forums.create(info).await {
        Ok(Created::New(forum)) => (StatusCode::CREATED, Json(forum)).into_response(),
        Ok(Created::Existing(forum)) => {
            (StatusCode::CONFLICT, Json(forum)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn forum_details(
    State(app): State<SharedApp>,
    Path(slug): Path<String>,
) -> Response {
    match app.forums.details(&slug).await {
        Ok(forum) => Json(forum).into_response(),
        Err(err) => error_response(err),
    }
}
