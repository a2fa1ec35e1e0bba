use uuid::Uuid;

use crate::{
    auth::{
        Role, TokenBundle,
        jwt::{JwtKeys, encode_token, make_access_claims},
        password::{hash_password, verify_password},
    },
    config::AuthConfig,
    db::dao::{DaoBase, DaoLayerError, RefreshTokenDao, UserDao},
    db::entities,
    error::AppError,
};

const ACCESS_TTL_SECS: usize = 15 * 60; // 15 minutes
const REFRESH_TTL_DAYS: i64 = 30;

#[derive(Clone)]
pub struct AuthService {
    user_dao: UserDao,
    refresh_token_dao: RefreshTokenDao,
    jwt: JwtKeys,
}

impl AuthService {
    pub fn new(user_dao: UserDao, refresh_token_dao: RefreshTokenDao, jwt: JwtKeys) -> Self {
        Self {
            user_dao,
            refresh_token_dao,
            jwt,
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<TokenBundle, AppError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::bad_request("Email required"));
        }

        if self.user_dao.find_by_email(email).await?.is_some() {
            return Err(AppError::conflict("User already exists"));
        }

        let password_hash = hash_password(password)?;
        let user = self
            .user_dao
            .create_user(email, &password_hash, Role::User.as_str())
            .await?;

        self.issue_tokens(&user).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<TokenBundle, AppError> {
        let user = self
            .user_dao
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

        let password_ok = verify_password(password, &user.password_hash)?;
        if !password_ok {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let now = chrono::Utc::now().fixed_offset();
        self.user_dao.set_last_login(&user.id, &now).await?;

        self.issue_tokens(&user).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenBundle, AppError> {
        let user_id = self
            .verify_refresh(refresh_token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

        let user = self
            .user_dao
            .find_by_id(user_id)
            .await
            .map_err(|err| match err {
                DaoLayerError::NotFound { .. } => AppError::unauthorized("User missing"),
                other => other.into(),
            })?;

        // Rotation: the presented token dies with the exchange.
        self.refresh_token_dao.revoke_token(refresh_token).await?;

        self.issue_tokens(&user).await
    }

    /// Returns the owning user only for a known, unrevoked, unexpired token.
    pub async fn verify_refresh(&self, refresh_token: &str) -> Result<Option<Uuid>, AppError> {
        let Some(token) = self
            .refresh_token_dao
            .find_active_by_token(refresh_token)
            .await?
        else {
            return Ok(None);
        };

        if token.revoked || token.expires_at < chrono::Utc::now().fixed_offset() {
            return Ok(None);
        }

        Ok(Some(token.user_id))
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        self.refresh_token_dao.revoke_token(refresh_token).await?;
        Ok(())
    }

    pub async fn revoke_all(&self, user_id: &Uuid) -> Result<u64, AppError> {
        Ok(self.refresh_token_dao.revoke_all_for_user(user_id).await?)
    }

    pub async fn cleanup_expired(&self) -> Result<u64, AppError> {
        Ok(self.refresh_token_dao.delete_expired().await?)
    }

    pub async fn find_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Option<entities::user::Model>, AppError> {
        match self.user_dao.find_by_id(*user_id).await {
            Ok(user) => Ok(Some(user)),
            Err(DaoLayerError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn seed_admin(&self, cfg: &AuthConfig) -> anyhow::Result<()> {
        if let Some(existing) = self
            .user_dao
            .find_by_email(&cfg.admin_email)
            .await
            .map_err(map_dao_error)?
        {
            tracing::info!("admin user already present: {}", existing.email);
            return Ok(());
        }

        let hash = hash_password(&cfg.admin_password)
            .map_err(|e| anyhow::anyhow!("admin seed hash error: {}", e.message()))?;
        let user = self
            .user_dao
            .create_user(&cfg.admin_email, &hash, Role::Admin.as_str())
            .await
            .map_err(map_dao_error)?;
        tracing::info!("seeded admin user {}", user.email);
        Ok(())
    }

    async fn issue_tokens(&self, user: &entities::user::Model) -> Result<TokenBundle, AppError> {
        let primary_role = Role::try_from(user.role.as_str()).unwrap_or(Role::User);
        let mut roles = vec![primary_role.clone()];
        if matches!(primary_role, Role::Admin) {
            roles.push(Role::User);
        }
        let claims = make_access_claims(&user.id, roles, ACCESS_TTL_SECS);
        let access_token = encode_token(&self.jwt, &claims)?;

        let refresh = self
            .refresh_token_dao
            .create_refresh_token(&user.id, Some(REFRESH_TTL_DAYS))
            .await?;

        Ok(TokenBundle {
            access_token,
            refresh_token: refresh.token,
            token_type: "Bearer",
            expires_in: ACCESS_TTL_SECS,
        })
    }
}

fn map_dao_error(err: DaoLayerError) -> anyhow::Error {
    anyhow::anyhow!(err.to_string())
}
