use std::{env, fmt::Display, str::FromStr};

use axum::http::HeaderName;

pub mod cors;
pub mod security;

pub use cors::create_cors_layer;
pub use security::SecurityHeaders;

/// Correlates a request with its log lines; set or propagated on every response.
pub(crate) static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/event_registration";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            port: parse_or("PORT", DEFAULT_PORT),
            max_connections: parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        tracing::info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|e| {
        tracing::warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_falls_back_on_garbage() {
        std::env::set_var("EVENTREG_TEST_PORT", "not-a-port");
        assert_eq!(parse_or("EVENTREG_TEST_PORT", 5000u16), 5000);

        std::env::set_var("EVENTREG_TEST_PORT", " 8080 ");
        assert_eq!(parse_or("EVENTREG_TEST_PORT", 5000u16), 8080);
        std::env::remove_var("EVENTREG_TEST_PORT");
    }

    #[test]
    fn test_request_id_header_name() {
        assert_eq!(X_REQUEST_ID.as_str(), "x-request-id");
    }

    #[test]
    fn test_parse_or_missing_uses_default() {
        assert_eq!(parse_or("EVENTREG_TEST_UNSET_VAR", 7u32), 7);
    }
}
