pub mod auth;
pub mod cart;
pub mod database;
pub mod export;
pub mod filters;
pub mod protected;
pub mod public;
pub mod questions;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub const API_PREFIX: &str = "/api";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().nest(API_PREFIX, api_router(state))
}

fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router())
        .merge(filters::router())
        .merge(auth::router(state.clone()))
        .merge(questions::router(state.clone()))
        .merge(cart::router(state.clone()))
        .merge(export::router(state.clone()))
        .merge(database::router(state.clone()))
        .merge(protected::router(state))
}
