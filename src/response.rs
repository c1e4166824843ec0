//! Outcome of an invocation and the response envelope it renders to.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;

/// Message returned with every successful invocation.
pub const SUCCESS_MESSAGE: &str = "API and Lambda Integrated Successfully!";

/// Body of a 400 response.
pub const UNSUPPORTED_EVENT: &str = "Unsupported event";

/// File reported on success.
///
/// Always the direct-upload name, including on the storage-notification path.
pub const REPORTED_FILE: &str = "processed-api_upload.jpg";

/// Flat result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { file: String },
    /// The payload matched no known shape. Nothing was called.
    ClientError { message: String },
    /// Anything that failed after classification, stringified.
    ServerFault { message: String },
}

impl Outcome {
    pub fn success() -> Self {
        Outcome::Success {
            file: REPORTED_FILE.to_string(),
        }
    }

    pub fn unsupported() -> Self {
        Outcome::ClientError {
            message: UNSUPPORTED_EVENT.to_string(),
        }
    }

    pub fn fault(err: impl std::fmt::Display) -> Self {
        Outcome::ServerFault {
            message: err.to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Outcome::Success { .. } => 200,
            Outcome::ClientError { .. } => 400,
            Outcome::ServerFault { .. } => 500,
        }
    }

    /// Render the envelope. Only success carries headers.
    pub fn into_response(self) -> Response {
        let status_code = self.status_code();
        let mut headers = BTreeMap::new();

        let body = match self {
            Outcome::Success { file } => {
                headers.insert("Content-Type".to_string(), "application/json".to_string());
                headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
                json!({
                    "status": "success",
                    "message": SUCCESS_MESSAGE,
                    "file": file,
                })
            }
            // Bare string, unlike the other two bodies.
            Outcome::ClientError { message } => json!(message),
            Outcome::ServerFault { message } => json!({
                "status": "error",
                "message": message,
            }),
        };

        Response {
            status_code,
            headers,
            body: body.to_string(),
        }
    }
}

/// Proxy-integration response returned to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// JSON document encoded as a string.
    pub body: String,
}

impl Response {
    /// Parse the body back into JSON.
    pub fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn success_envelope() {
        let response = Outcome::success().into_response();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");

        let body = response.body_json().unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["message"], SUCCESS_MESSAGE);
        assert_eq!(body["file"], "processed-api_upload.jpg");
    }

    #[test]
    fn client_error_body_is_a_bare_string() {
        let response = Outcome::unsupported().into_response();
        assert_eq!(response.status_code, 400);
        assert!(response.headers.is_empty());
        assert_eq!(response.body, "\"Unsupported event\"");
    }

    #[test]
    fn fault_embeds_message() {
        let response = Outcome::fault("Access Denied").into_response();
        assert_eq!(response.status_code, 500);
        assert!(response.headers.is_empty());
        assert_eq!(
            response.body_json().unwrap(),
            serde_json::json!({ "status": "error", "message": "Access Denied" })
        );
    }

    #[test]
    fn serializes_as_proxy_response() {
        let value: Value = serde_json::to_value(Outcome::unsupported().into_response()).unwrap();
        assert_eq!(value["statusCode"], 400);
        assert!(value.get("headers").is_none(), "empty headers are omitted");
        assert_eq!(value["body"], "\"Unsupported event\"");

        let value: Value = serde_json::to_value(Outcome::success().into_response()).unwrap();
        assert_eq!(value["headers"]["Access-Control-Allow-Origin"], "*");
    }
}
