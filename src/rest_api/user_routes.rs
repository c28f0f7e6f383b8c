use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::{UserCreate, UserUpdate};
use crate::pagination::UserPaginator;
use crate::rest_api::errors::error_response;
use crate::rest_api::{decode, SharedApp};
use crate::usecase::NewUser;

pub(crate) async fn create_user(
    State(app): State<SharedApp>,
    Path(nickname): Path<String>,
    body: Bytes,
) -> Response {
    let info: UserCreate = match decode(&body) {
        Ok(info) => info,
        Err(err) => return error_response(err),
    };

    match app.users.create(info.into_user(nickname)).await {
        Ok(NewUser::Created(user)) => (StatusCode::CREATED, Json(user)).into_response(),
        Ok(NewUser::Conflict(existing)) => {
            (StatusCode::CONFLICT, Json(existing)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn user_profile(
    State(app): State<SharedApp>,
    Path(nickname): Path<String>,
) -> Response {
    match app.users.profile(&nickname).await {
        Ok(user) => Json(user).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_user(
    State(app): State<SharedApp>,
    Path(nickname): Path<String>,
    body: Bytes,
) -> Response {
    let update: UserUpdate = match decode(&body) {
        Ok(update) => update,
        Err(err) => return error_response(err),
    };

    match app.users.update_profile(&nickname, update).await {
        Ok(user) => Json(user).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn users_by_forum(
    State(app): State<SharedApp>,
    Path(slug): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let page = UserPaginator::from_query(&params);
    match app.users.by_forum(&slug, &page).await {
        Ok(users) => Json(users).into_response(),
        Err(err) => error_response(err),
    }
}
