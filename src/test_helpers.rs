use std::sync::Arc;

use axum::Router;
use sea_orm::{DatabaseBackend, MockDatabase};

use crate::{
    config::{AppConfig, AuthConfig},
    routes::router,
    state::AppState,
};

pub fn test_config(secret: &[u8]) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.auth = Some(AuthConfig {
        jwt_secret: String::from_utf8_lossy(secret).into_owned(),
        admin_email: "admin@example.com".to_string(),
        admin_password: "adminpassword".to_string(),
    });
    cfg
}

/// Router over a mock connection, for handler-level tests that never reach
/// the database.
pub fn test_router(secret: &[u8]) -> Router {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = AppState::new(test_config(secret), db);
    router(Arc::clone(&state))
}
