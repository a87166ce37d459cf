use actix_cors::Cors;
use actix_web::http::header;

/// Cross-origin policy: exactly one browser origin may call the API.
///
/// Requests whose `Origin` header names any other origin are rejected here
/// with a 400, before routing. Requests without an `Origin` header are not
/// cross-origin and pass through. Methods and request headers are not
/// restricted; preflights echo whatever the browser asks for.
pub fn build(allowed_origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(allowed_origin)
        .allow_any_method()
        .allow_any_header()
        .expose_headers(vec![header::CONTENT_TYPE])
        .block_on_origin_mismatch(true)
        .max_age(3600)
}
