//! HTTP response decoding.
//!
//! Responses are reduced to their status code and decoded JSON body. An
//! empty body or a `204 No Content` decodes to `null`.

use serde_json::Value;

use super::errors::TransportError;

/// A response received from the CloudLaunch API.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub code: u16,
    /// Decoded body; non-JSON text is kept as a JSON string.
    pub body: Value,
}

impl HttpResponse {
    /// Decodes a response body.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Decode`] if a successful response carries a
    /// body that is not JSON. Error responses keep non-JSON bodies as text.
    pub fn from_text(code: u16, text: &str) -> Result<Self, TransportError> {
        let body = if code == 204 || text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(text) {
                Ok(body) => body,
                Err(_) if code >= 400 => Value::String(text.to_string()),
                Err(e) => return Err(TransportError::Decode(e.to_string())),
            }
        };

        Ok(Self { code, body })
    }

    /// Returns `true` if the status code is below 400.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code < 400
    }

    /// Returns the body, or a [`TransportError::Response`] for 4xx/5xx.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Response`] carrying `url`, the status and
    /// the body when the status indicates failure.
    pub fn into_result(self, url: &str) -> Result<Value, TransportError> {
        if self.is_ok() {
            Ok(self.body)
        } else {
            Err(TransportError::Response {
                url: url.to_string(),
                code: self.code,
                body: self.body,
            })
        }
    }
}
