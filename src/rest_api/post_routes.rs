use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::errors::DomainError;
use crate::models::{PostCreate, PostUpdate, Related};
use crate::pagination::PostPaginator;
use crate::rest_api::errors::error_response;
use crate::rest_api::{decode, SharedApp};

pub(crate) async fn create_posts(
    State(app): State<SharedApp>,
    Path(slug_or_id): Path<String>,
    body: Bytes,
) -> Response {
    let posts: Vec<PostCreate> = match decode(&body) {
        Ok(posts) => posts,
        Err(err) => return error_response(err),
    };

    match app.posts.create(&slug_or_id, posts).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn post_details(
    State(app): State<SharedApp>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let post_id: i64 = match id.parse() {
        Ok(post_id) => post_id,
        Err(_) => return error_response(DomainError::BadArguments),
    };
    let related = params
        .get("related")
        .map(|raw| Related::parse(raw))
        .unwrap_or_default();

    match app.posts.details(post_id, related).await {
        Ok(details) => Json(details).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_post(
    State(app): State<SharedApp>,
    Path(id): Path<String>,
    body: Bytes,
) -> Response {
    let post_id: i64 = match id.parse() {
        Ok(post_id) => post_id,
        Err(_) => return error_response(DomainError::BadArguments),
    };
    let update: PostUpdate = match decode(&body) {
        Ok(update) => update,
        Err(err) => return error_response(err),
    };

    match app.posts.update(post_id, update).await {
        Ok(post) => Json(post).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn posts_by_thread(
    State(app): State<SharedApp>,
    Path(slug_or_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let page = PostPaginator::from_query(&params);
    match app.posts.by_thread(&slug_or_id, &page).await {
        Ok(posts) => Json(posts).into_response(),
        Err(err) => error_response(err),
    }
}
