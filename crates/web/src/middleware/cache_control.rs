use std::{env, sync::OnceLock};

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

pub const CACHE_CONTROL_DISABLED_VAR: &str = "CACHE_CONTROL_DISABLED";

const CACHEABLE: &str = "public, s-maxage=3600, stale-while-revalidate=300";
const DISABLED: &str = "no-store";

fn cache_header() -> &'static HeaderValue {
    static VALUE: OnceLock<HeaderValue> = OnceLock::new();
    VALUE.get_or_init(|| {
        let disabled = env::var(CACHE_CONTROL_DISABLED_VAR)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        HeaderValue::from_static(if disabled { DISABLED } else { CACHEABLE })
    })
}

/// Stamps the CDN caching policy on successful responses. Error responses
/// stay uncached so clients retry them.
pub async fn cache_control_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    if response.status().is_success() {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, cache_header().clone());
    }
    response
}
