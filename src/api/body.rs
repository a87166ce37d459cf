use actix_web::{dev::Payload, http::header, web, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use std::ops::Deref;

/// JSON request body in the manner of `express.json()`.
///
/// The body is parsed only when the request declares `application/json` and
/// carries content. Any other content type, or an empty body, yields
/// `T::default()` so every field reads as absent. Parse failures go through
/// the route's `JsonConfig` error handler.
pub struct JsonBody<T>(pub T);

impl<T> Deref for JsonBody<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

fn declares_json(req: &HttpRequest) -> bool {
    let is_json = matches!(
        req.mime_type(),
        Ok(Some(mime)) if mime.essence_str() == "application/json"
    );
    let is_empty = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .map(|len| len.as_bytes() == b"0")
        .unwrap_or(false);

    is_json && !is_empty
}

impl<T> FromRequest for JsonBody<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if !declares_json(req) {
            log::debug!("Body on {} is not JSON, treating it as empty", req.path());
            return Box::pin(async { Ok(JsonBody(T::default())) });
        }

        let json = web::Json::<T>::from_request(req, payload);
        Box::pin(async move { json.await.map(|web::Json(body)| JsonBody(body)) })
    }
}
