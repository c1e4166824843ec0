//! Classification of raw invocation payloads.
//!
//! A payload is inspected once, up front, and turned into a closed set of variants
//! before any storage call is made:
//!
//! - an object with a `body` key is a **direct upload** (API gateway proxy request);
//! - an object with a `Records` (or `records`) key is a **storage notification**;
//! - anything else is [`Classified::Unrecognized`].
//!
//! Only the first storage record is read. Both the S3 notification layout
//! (`s3.bucket.name` / `s3.object.key`) and the neutral
//! `storageEvent.bucketName` / `storageEvent.objectKey` layout are accepted.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use serde_json::Value;

use crate::error::RelayError;

/// Key under which a direct upload is stored in the origin bucket.
pub const DIRECT_UPLOAD_KEY: &str = "api_upload.jpg";

/// Prefix that turns an original key into its destination key.
pub const PROCESSED_PREFIX: &str = "processed-";

/// A recognised invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingEvent {
    /// The payload carried the image itself, already decoded.
    DirectUpload { body: Vec<u8> },
    /// An object landed in `source_bucket`; only its location is carried.
    StorageNotification {
        source_bucket: String,
        object_key: String,
    },
}

/// Result of inspecting a payload's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Event(IncomingEvent),
    Unrecognized,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StorageRecord {
    S3 {
        s3: S3Entity,
    },
    Neutral {
        #[serde(rename = "storageEvent")]
        storage_event: StorageRef,
    },
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: S3Bucket,
    object: S3Object,
}

#[derive(Debug, Deserialize)]
struct S3Bucket {
    name: String,
}

#[derive(Debug, Deserialize)]
struct S3Object {
    key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorageRef {
    bucket_name: String,
    object_key: String,
}

impl IncomingEvent {
    /// Inspect `payload` and decide which ingestion path it belongs to.
    ///
    /// An unrecognised shape is not an error. A recognised shape whose contents
    /// cannot be read (bad base64, empty record list, non-string body) is.
    pub fn classify(payload: &Value) -> Result<Classified, RelayError> {
        let Some(fields) = payload.as_object() else {
            return Ok(Classified::Unrecognized);
        };

        if let Some(body) = fields.get("body") {
            let encoded = fields.get("isBase64Encoded").is_some_and(is_truthy);
            let body = decode_body(body, encoded)?;
            return Ok(Classified::Event(IncomingEvent::DirectUpload { body }));
        }

        if let Some(records) = fields.get("Records").or_else(|| fields.get("records")) {
            return first_record(records).map(Classified::Event);
        }

        Ok(Classified::Unrecognized)
    }

    /// Name of the original object this event refers to.
    pub fn file_name(&self) -> &str {
        match self {
            IncomingEvent::DirectUpload { .. } => DIRECT_UPLOAD_KEY,
            IncomingEvent::StorageNotification { object_key, .. } => object_key,
        }
    }

    /// Key the processed artifact is stored under in the destination bucket.
    pub fn destination_key(&self) -> String {
        destination_key(self.file_name())
    }

    /// Short label used in logs and by the `classify` subcommand.
    pub fn kind(&self) -> &'static str {
        match self {
            IncomingEvent::DirectUpload { .. } => "direct-upload",
            IncomingEvent::StorageNotification { .. } => "storage-notification",
        }
    }
}

pub fn destination_key(original_key: &str) -> String {
    format!("{PROCESSED_PREFIX}{original_key}")
}

fn decode_body(body: &Value, encoded: bool) -> Result<Vec<u8>, RelayError> {
    let Value::String(text) = body else {
        return Err(RelayError::MalformedEvent(format!(
            "body must be a string, got {body}"
        )));
    };

    if !encoded {
        return Ok(text.as_bytes().to_vec());
    }

    // Non-alphabet characters (line breaks, stray punctuation) are discarded, not rejected.
    let compact: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();
    Ok(STANDARD.decode(compact)?)
}

/// Loose flag reading: `true`, non-zero numbers and non-empty strings, lists or
/// objects all count as set.
fn is_truthy(flag: &Value) -> bool {
    match flag {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn first_record(records: &Value) -> Result<IncomingEvent, RelayError> {
    let first = records
        .as_array()
        .ok_or_else(|| RelayError::MalformedEvent("Records must be a list".to_string()))?
        .first()
        .ok_or_else(|| RelayError::MalformedEvent("Records list is empty".to_string()))?;

    let record: StorageRecord = serde_json::from_value(first.clone()).map_err(|e| {
        RelayError::MalformedEvent(format!("unreadable storage record: {e}"))
    })?;

    let (source_bucket, object_key) = match record {
        StorageRecord::S3 { s3 } => (s3.bucket.name, s3.object.key),
        StorageRecord::Neutral { storage_event } => {
            (storage_event.bucket_name, storage_event.object_key)
        }
    };

    Ok(IncomingEvent::StorageNotification {
        source_bucket,
        object_key,
    })
}
