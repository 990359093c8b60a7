use crate::errors::AppError;
use std::{env, net::SocketAddr};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub backend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            backend_url: resolve_backend_url(env::var("BACKEND_URL").ok())?,
        })
    }
}

pub fn resolve_backend_url(raw: Option<String>) -> Result<String, AppError> {
    let Some(raw) = raw.filter(|value| !value.trim().is_empty()) else {
        return Ok(DEFAULT_BACKEND_URL.to_string());
    };

    let url = raw.trim().trim_end_matches('/');
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config(format!(
            "BACKEND_URL must start with http:// or https://, got {url:?}"
        )));
    }

    Ok(url.to_string())
}
