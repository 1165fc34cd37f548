use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use axum::http::HeaderValue;
use rand::{rngs::OsRng, RngCore};

use crate::auth::decode_secret_key;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub secret_key: Vec<u8>,
    pub session_ttl: Duration,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unset keys take their
    /// defaults; set but malformed keys are an error.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let listen_addr: SocketAddr = read("PRODUCAO_LISTEN_ADDR", "0.0.0.0:5000")
            .parse()
            .context("Invalid PRODUCAO_LISTEN_ADDR")?;
        let db_path = read("PRODUCAO_DB_PATH", "./db/app.db");

        let cors_allow: Vec<String> = read("PRODUCAO_CORS_ALLOW_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in cors_allow.iter().filter(|o| o.as_str() != "*") {
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid origin '{origin}' in PRODUCAO_CORS_ALLOW_ORIGINS"))?;
        }

        let timeout_ms: u64 = read("PRODUCAO_REQUEST_TIMEOUT_MS", "30000")
            .parse()
            .context("Invalid PRODUCAO_REQUEST_TIMEOUT_MS")?;
        let session_ttl_secs: u64 = read("PRODUCAO_SESSION_TTL_SECS", "43200")
            .parse()
            .context("Invalid PRODUCAO_SESSION_TTL_SECS")?;
        if session_ttl_secs == 0 {
            anyhow::bail!("PRODUCAO_SESSION_TTL_SECS must be greater than zero");
        }

        let secret_key = match lookup("PRODUCAO_SECRET_KEY") {
            Some(raw) => decode_secret_key(&raw).context("Invalid PRODUCAO_SECRET_KEY")?,
            None => {
                tracing::warn!(
                    "PRODUCAO_SECRET_KEY is not set; sessions will not survive a restart"
                );
                let mut bytes = vec![0u8; 32];
                OsRng.fill_bytes(&mut bytes);
                bytes
            }
        };

        let static_dir = read("PRODUCAO_STATIC_DIR", "dist");
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            secret_key,
            session_ttl: Duration::from_secs(session_ttl_secs),
            static_dir,
        })
    }
}
