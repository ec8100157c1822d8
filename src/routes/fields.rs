use crate::db_models::cast::Fields;
use crate::errors::custom::BodyError;
use actix_web::dev::Payload;
use actix_web::web::Bytes;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    UrlEncoded,
    Other,
}

impl BodyKind {
    fn of(req: &HttpRequest) -> Self {
        let content_type = req.content_type();
        if content_type.eq_ignore_ascii_case("application/json")
            || content_type.to_ascii_lowercase().ends_with("+json")
        {
            BodyKind::Json
        } else if content_type.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
            BodyKind::UrlEncoded
        } else {
            BodyKind::Other
        }
    }
}

/// The request body as a loose field mapping.
///
/// JSON objects and URL-encoded forms are both accepted. A body of any other
/// content type reads as an empty mapping, so handlers always see the same
/// shape regardless of how the client posted.
#[derive(Debug, Default)]
pub struct RequestFields(pub Fields);

impl RequestFields {
    pub fn into_inner(self) -> Fields {
        self.0
    }
}

impl FromRequest for RequestFields {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let kind = BodyKind::of(req);
        let body = Bytes::from_request(req, payload);
        Box::pin(async move {
            let body = body.await?;
            Ok(RequestFields(parse(kind, &body)?))
        })
    }
}

fn parse(kind: BodyKind, body: &[u8]) -> Result<Fields, BodyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Fields::new());
    }
    match kind {
        BodyKind::Json => match serde_json::from_slice::<Value>(body)? {
            Value::Object(fields) => Ok(fields),
            _ => Err(BodyError::NotAnObject),
        },
        BodyKind::UrlEncoded => {
            let pairs: Vec<(String, String)> = serde_html_form::from_bytes(body)?;
            Ok(pairs
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect())
        }
        BodyKind::Other => Ok(Fields::new()),
    }
}
