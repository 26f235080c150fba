use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// Parse a JSON request body, treating an empty, `null` or unreadable body
/// as absent.
///
/// Handlers take the raw body so that a bad payload reaches validation as
/// "no input" instead of being rejected by the `Json` extractor.
pub fn optional_json<T: DeserializeOwned>(body: &Bytes) -> Option<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }

    match serde_json::from_slice::<Option<T>>(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring unreadable request body");
            None
        }
    }
}
