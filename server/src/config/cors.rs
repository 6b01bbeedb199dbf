use std::{env, time::Duration};

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::X_REQUEST_ID;

/// The registration frontend's dev server.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173";

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

pub fn create_cors_layer() -> CorsLayer {
    let origins_str =
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());

    CorsLayer::new()
        .allow_origin(allowed_origins(&origins_str))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, X_REQUEST_ID.clone()])
        .expose_headers([header::CONTENT_TYPE, X_REQUEST_ID.clone()])
        .max_age(Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

fn allowed_origins(origins_str: &str) -> AllowOrigin {
    let origins = parse_origins(origins_str);

    if origins.is_empty() {
        tracing::warn!("CORS: No valid origins configured, allowing any origin");
        AllowOrigin::any()
    } else {
        tracing::info!("CORS: Configured with {} allowed origin(s)", origins.len());
        AllowOrigin::list(origins)
    }
}

fn parse_origins(origins_str: &str) -> Vec<HeaderValue> {
    origins_str
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => {
                tracing::debug!("CORS: Allowing origin: {}", origin);
                Some(value)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origin_is_valid() {
        assert_eq!(parse_origins(DEFAULT_ALLOWED_ORIGINS).len(), 1);
    }

    #[test]
    fn test_parse_origins_skips_blanks_and_garbage() {
        let origins = parse_origins(" http://a.test , ,http://b.test,bad\nvalue");
        assert_eq!(
            origins,
            vec![
                HeaderValue::from_static("http://a.test"),
                HeaderValue::from_static("http://b.test"),
            ]
        );
    }

    #[test]
    fn test_create_cors_layer() {
        let _layer = create_cors_layer();
    }
}
