use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    if let Some(database) = cfg.database.as_ref() {
        if database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if database.min_idle > database.max_connections {
            errors.push(format!(
                "database.min_idle ({}) must be <= database.max_connections ({})",
                database.min_idle, database.max_connections
            ));
        }
    }

    if let Some(auth) = cfg.auth.as_ref() {
        if auth.admin_email.trim().is_empty() {
            errors.push("auth.admin_email must not be empty".to_string());
        }

        if auth.admin_password.len() < 8 {
            errors.push("auth.admin_password must be at least 8 characters".to_string());
        }

        if auth.jwt_secret.trim().is_empty() {
            errors.push("auth.jwt_secret must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::{AppConfig, AuthConfig, DatabaseConfig};

    fn auth(jwt_secret: &str, admin_password: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: jwt_secret.to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: admin_password.to_string(),
        }
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = AppConfig::default();
        validate(&cfg).expect("default config should validate");
    }

    #[test]
    fn collects_all_problems_at_once() {
        let cfg = AppConfig {
            database: Some(DatabaseConfig {
                url: "  ".to_string(),
                max_connections: 1,
                min_idle: 5,
            }),
            auth: Some(auth("", "short")),
            ..AppConfig::default()
        };

        let err = validate(&cfg).expect_err("config should be rejected");
        let message = err.to_string();
        assert!(message.contains("database.url"));
        assert!(message.contains("database.min_idle"));
        assert!(message.contains("auth.admin_password"));
        assert!(message.contains("auth.jwt_secret"));
    }

    #[test]
    fn accepts_complete_config() {
        let cfg = AppConfig {
            database: Some(DatabaseConfig {
                url: "sqlite://bank.db".to_string(),
                max_connections: 10,
                min_idle: 2,
            }),
            auth: Some(auth("secret-value", "adminpassword")),
            ..AppConfig::default()
        };

        validate(&cfg).expect("complete config should validate");
    }
}
