//! Router assembly
//!
//! Wires the use cases over their PostgreSQL stores and binds every
//! route of the API. State is one shared, immutable bundle; handlers
//! are one-shot and keep no session state.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use deadpool_postgres::Pool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::rest_api::{forum_routes, post_routes, service_routes, thread_routes, user_routes};
use crate::storage::{PgForumStore, PgPostStore, PgServiceStore, PgThreadStore, PgUserStore};
use crate::usecase::{ForumUseCase, PostUseCase, ServiceUseCase, ThreadUseCase, UserUseCase};

/// The assembled application: every use case over its PostgreSQL
/// stores. Stores clone the pool handle, not connections.
pub struct AppState {
    pub users: UserUseCase<PgUserStore, PgForumStore>,
    pub forums: ForumUseCase<PgForumStore, PgUserStore>,
    pub threads: ThreadUseCase<PgThreadStore, PgForumStore>,
    pub posts: PostUseCase<PgPostStore, PgThreadStore, PgForumStore, PgUserStore>,
    pub service: ServiceUseCase<PgServiceStore>,
}

pub type SharedApp = Arc<AppState>;

impl AppState {
    pub fn new(pool: Pool) -> Self {
        AppState {
            users: UserUseCase::new(
                PgUserStore::new(pool.clone()),
                PgForumStore::new(pool.clone()),
            ),
            forums: ForumUseCase::new(
                PgForumStore::new(pool.clone()),
                PgUserStore::new(pool.clone()),
            ),
            threads: ThreadUseCase::new(
                PgThreadStore::new(pool.clone()),
                PgForumStore::new(pool.clone()),
            ),
            posts: PostUseCase::new(
                PgPostStore::new(pool.clone()),
                PgThreadStore::new(pool.clone()),
                PgForumStore::new(pool.clone()),
                PgUserStore::new(pool.clone()),
            ),
            service: ServiceUseCase::new(PgServiceStore::new(pool)),
        }
    }
}

/// Build the router over shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/forum/create", post(forum_routes::create_forum))
        .route("/api/forum/:slug/details", get(forum_routes::forum_details))
        .route("/api/forum/:slug/create", post(thread_routes::create_thread))
        .route("/api/forum/:slug/users", get(user_routes::users_by_forum))
        .route(
            "/api/forum/:slug/threads",
            get(thread_routes::threads_by_forum),
        )
        .route(
            "/api/post/:id/details",
            get(post_routes::post_details).post(post_routes::update_post),
        )
        .route("/api/service/clear", post(service_routes::clear))
        .route("/api/service/status", get(service_routes::status))
        .route(
            "/api/thread/:slug_or_id/create",
            post(post_routes::create_posts),
        )
        .route(
            "/api/thread/:slug_or_id/details",
            get(thread_routes::thread_details).post(thread_routes::update_thread),
        )
        .route(
            "/api/thread/:slug_or_id/posts",
            get(post_routes::posts_by_thread),
        )
        .route("/api/thread/:slug_or_id/vote", post(thread_routes::vote_thread))
        .route("/api/user/:nickname/create", post(user_routes::create_user))
        .route(
            "/api/user/:nickname/profile",
            get(user_routes::user_profile).post(user_routes::update_user),
        )
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(Arc::new(state))
}
