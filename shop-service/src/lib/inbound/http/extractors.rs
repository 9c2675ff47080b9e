use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;

/// JSON body extractor that never rejects a payload it cannot parse.
///
/// An empty body, malformed JSON or a non-object value yields
/// `T::default()`, so field validation reports the first missing field
/// instead of a parser error. Body types decode each field with
/// [`string_field`] or [`bool_field`], so one mistyped field leaves the
/// others intact.
///
/// Failing to read the body at all (for example past the size limit)
/// keeps axum's own rejection and status.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read request body");
            e.into_response()
        })?;

        Ok(JsonBody(parse_or_default(&bytes)))
    }
}

fn parse_or_default<T: DeserializeOwned + Default>(bytes: &[u8]) -> T {
    if bytes.is_empty() {
        return T::default();
    }

    serde_json::from_slice(bytes).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Unusable JSON body, treating it as empty");
        T::default()
    })
}

/// A JSON string, or `None` for anything else.
pub fn string_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

/// A JSON boolean, or `None` for anything else.
pub fn bool_field<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(value) => Some(value),
        _ => None,
    })
}
