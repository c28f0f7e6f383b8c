use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::DomainError;
use crate::models::{ThreadCreate, ThreadUpdate, ThreadVote};
use crate::pagination::ThreadPaginator;
use crate::rest_api::errors::{error_response, respond_with};
use crate::rest_api::{decode, SharedApp};
use crate::usecase::Created;

pub(crate) async fn create_thread(
    State(app): State<SharedApp>,
    Path(slug): Path<String>,
    body: Bytes,
) -> Response {
    let info: ThreadCreate = match decode(&body) {
        Ok(info) => info,
        Err(err) => return error_response(err),
    };

    match app.threads.create(&slug, info).await {
        Ok(Created::New(thread)) => (StatusCode::CREATED, Json(thread)).into_response(),
        Ok(Created::Existing(thread)) => {
            (StatusCode::CONFLICT, Json(thread)).into_response()
        }
        // Observed behavior of this endpoint: an absent forum answers
        // 404 with the conflict body.
        Err(DomainError::DataConflict) => {
            respond_with(StatusCode::NOT_FOUND, DomainError::DataConflict)
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn threads_by_forum(
    State(app): State<SharedApp>,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let page = ThreadPaginator::from_query(&params);
    match app.threads.by_forum(&slug, &page).await {
        Ok(threads) => Json(threads).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn thread_details(
    State(app): State<SharedApp>,
    Path(slug_or_id): Path<String>,
) -> Response {
    match app.threads.details(&slug_or_id).await {
        Ok(thread) => Json(thread).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_thread(
    State(app): State<SharedApp>,
    Path(slug_or_id): Path<String>,
    body: Bytes,
) -> Response {
    let update: ThreadUpdate = match decode(&body) {
        Ok(update) => update,
        Err(err) => return error_response(err),
    };

    match app.threads.update(&slug_or_id, update).await {
        // Both arms collapse into one success response.
        Ok(updated) => Json(updated.into_record()).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn vote_thread(
    State(app): State<SharedApp>,
    Path(slug_or_id): Path<String>,
    body: Bytes,
) -> Response {
    let vote: ThreadVote = match decode(&body) {
        Ok(vote) => vote,
        Err(err) => return error_response(err),
    };

    match app.threads.vote(&slug_or_id, vote).await {
        Ok(thread) => Json(thread).into_response(),
        Err(err) => error_response(err),
    }
}
