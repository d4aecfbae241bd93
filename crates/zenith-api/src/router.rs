//! Route definitions for the Zenith Drive HTTP API.
//!
//! Routes are grouped by domain and merged at the root. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
};

use crate::handlers;
use crate::state::AppState;

/// All routes, without the outer middleware stack.
pub fn build_router(state: &AppState) -> Router<AppState> {
    let max_upload = state.config.server.max_upload_bytes;

    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(content_routes())
        .merge(star_routes())
        .merge(file_routes(max_upload))
        .merge(permission_routes())
        .merge(folder_routes())
        .merge(billing_routes())
        .merge(object_routes())
        .route("/ws", get(handlers::ws::ws_upgrade))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::health::root))
}

/// Signup, login, profile
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/profile", get(handlers::auth::profile))
}

/// Merged folder/file listings
fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/browse", get(handlers::content::browse))
        .route("/search", get(handlers::content::search))
        .route("/trash", get(handlers::content::trash))
        .route("/recent", get(handlers::content::recent))
        .route("/shared-with-me", get(handlers::content::shared_with_me))
}

fn star_routes() -> Router<AppState> {
    Router::new().route(
        "/stars",
        get(handlers::star::list_starred)
            .post(handlers::star::star)
            .delete(handlers::star::unstar),
    )
}

/// Upload, lifecycle, links and grants
fn file_routes(max_upload: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/files/upload",
            post(handlers::file::upload_file).layer(DefaultBodyLimit::max(max_upload)),
        )
        .route("/files/{id}", delete(handlers::file::trash_file))
        .route("/files/{id}/restore", patch(handlers::file::restore_file))
        .route("/files/{id}/permanent", delete(handlers::file::purge_file))
        .route(
            "/files/{id}/shareable-link",
            get(handlers::file::shareable_link),
        )
        .route("/files/{id}/share", post(handlers::file::share_file))
        .route(
            "/files/{id}/permissions",
            get(handlers::file::list_permissions),
        )
}

fn permission_routes() -> Router<AppState> {
    Router::new().route(
        "/permissions/{id}",
        patch(handlers::permission::update_permission)
            .delete(handlers::permission::revoke_permission),
    )
}

/// Folder lifecycle and breadcrumbs
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders/{id}", delete(handlers::folder::trash_folder))
        .route(
            "/folders/{id}/restore",
            patch(handlers::folder::restore_folder),
        )
        .route(
            "/folders/{id}/permanent",
            delete(handlers::folder::purge_folder),
        )
        .route(
            "/folders/{id}/breadcrumbs",
            get(handlers::folder::breadcrumbs),
        )
}

fn billing_routes() -> Router<AppState> {
    Router::new().route(
        "/create-checkout-session",
        post(handlers::billing::create_checkout_session),
    )
}

/// Signed downloads for providers without native presigning
fn object_routes() -> Router<AppState> {
    Router::new().route("/objects/{token}", get(handlers::object::download))
}
