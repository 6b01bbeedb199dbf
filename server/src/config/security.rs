use std::env;

use axum::http::{header, HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";

/// Hardening headers added to every API response.
#[derive(Debug, Clone, Copy)]
pub struct SecurityHeaders {
    include_hsts: bool,
}

impl SecurityHeaders {
    pub fn new(include_hsts: bool) -> Self {
        Self { include_hsts }
    }

    /// HSTS only makes sense behind HTTPS, so it is tied to `RUST_ENV=production`.
    pub fn from_env() -> Self {
        let is_production = env::var("RUST_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        if is_production {
            tracing::info!("Security: HSTS header enabled (production mode)");
        } else {
            tracing::info!("Security: HSTS header disabled (development mode)");
        }

        Self::new(is_production)
    }

    pub fn headers(&self) -> Vec<(HeaderName, HeaderValue)> {
        let mut headers = vec![
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
            (header::X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block")),
            (
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
            ),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ),
            (
                HeaderName::from_static("permissions-policy"),
                HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
            ),
        ];

        if self.include_hsts {
            headers.push((
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(HSTS_VALUE),
            ));
        }

        headers
    }

    /// Wraps every route of `router` with one header-setting layer per header.
    pub fn apply<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.headers()
            .into_iter()
            .fold(router, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::if_not_present(name, value))
            })
    }
}
