use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{auth::jwt::JwtKeys, config::AppConfig};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    pub jwt: JwtKeys,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Arc<Self> {
        let secret = config
            .auth
            .as_ref()
            .map(|auth| auth.jwt_secret.as_str())
            .unwrap_or_default();
        let jwt = JwtKeys::from_secret(secret.as_bytes());
        Arc::new(Self { config, db, jwt })
    }
}
