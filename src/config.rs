use std::{env, net::SocketAddr};

use crate::error::AppError;

pub const DEFAULT_SECRET_KEY: &str = "dev-key";
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub secret_key: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(
            env::var("APP_LISTEN_ADDR").ok(),
            env::var("SECRET_KEY").ok(),
        )
    }

    fn from_vars(
        listen_addr: Option<String>,
        secret_key: Option<String>,
    ) -> Result<Self, AppError> {
        let listen_addr: SocketAddr = listen_addr
            .as_deref()
            .unwrap_or(DEFAULT_LISTEN_ADDR)
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let secret_key = secret_key.unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string());

        Ok(Self {
            listen_addr,
            secret_key,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            secret_key: DEFAULT_SECRET_KEY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_vars(None, None).unwrap();
        assert_eq!(config.listen_addr, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.secret_key, "dev-key");
        assert!(config.uses_default_secret());
    }

    #[test]
    fn explicit_values_win() {
        let config =
            AppConfig::from_vars(Some("0.0.0.0:8080".into()), Some("s3cret".into())).unwrap();
        assert_eq!(config.listen_addr.port(), 8080);
        assert!(!config.uses_default_secret());
    }

    #[test]
    fn bad_listen_addr_is_a_config_error() {
        let err = AppConfig::from_vars(Some("nowhere".into()), None).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
