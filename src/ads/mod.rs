use axum::Router;

use crate::state::AppState;

mod dto;
pub mod handlers;
pub mod policy;
pub mod repo;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::write_routes())
}
