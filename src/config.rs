use std::net::SocketAddr;

use anyhow::Context;

/// Minimum length of `SECRET_KEY`, imposed by cookie key derivation.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub tmdb_image_url: String,
    pub tmdb_timeout_secs: u64,
    pub database_url: String,
    pub secret_key: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let tmdb_api_key = std::env::var("TMDB_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .unwrap_or_else(|_| "".to_string());
        let tmdb_base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());
        let tmdb_image_url = std::env::var("TMDB_IMAGE_URL")
            .unwrap_or_else(|_| "https://image.tmdb.org/t/p/w500".to_string());

        let tmdb_timeout_secs: u64 =
            std::env::var("TMDB_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(30);

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://movies.db?mode=rwc".to_string());

        let secret_key = std::env::var("SECRET_KEY").ok().filter(|s| !s.is_empty());
        if let Some(secret) = &secret_key {
            anyhow::ensure!(
                secret.len() >= MIN_SECRET_LEN,
                "SECRET_KEY must be at least {MIN_SECRET_LEN} bytes"
            );
        }

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            tmdb_api_key,
            tmdb_base_url,
            tmdb_image_url,
            tmdb_timeout_secs,
            database_url,
            secret_key,
        })
    }

    /// Key used to sign the CSRF cookie.
    pub fn cookie_key(&self) -> cookie::Key {
        match &self.secret_key {
            Some(secret) => cookie::Key::derive_from(secret.as_bytes()),
            None => {
                tracing::warn!("SECRET_KEY not set - generated a per-process signing key");
                cookie::Key::generate()
            }
        }
    }
}
