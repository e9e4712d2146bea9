/// API routes and handlers
pub mod colors;
pub mod snapshot;

use crate::context::AppContext;
use axum::Router;

/// Build API routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .merge(colors::routes())
        .merge(snapshot::routes())
}
