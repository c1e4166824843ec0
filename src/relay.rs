//! Moves image bytes from their origin into the destination bucket.

use tracing::{error, info};

use crate::config::RelayConfig;
use crate::contract::ObjectStore;
use crate::error::RelayError;
use crate::event::{IncomingEvent, DIRECT_UPLOAD_KEY};

/// What the relay stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relayed {
    pub destination_key: String,
}

/// Store or copy the event's object into `config.destination_bucket`.
///
/// Direct uploads are written twice: the original to the upload bucket, then the
/// same bytes under the processed key. Storage notifications become a single
/// server-side copy. The first failing call aborts the rest.
pub async fn relay(
    event: &IncomingEvent,
    config: &RelayConfig,
    store: &dyn ObjectStore,
) -> Result<Relayed, RelayError> {
    let destination_key = event.destination_key();

    match event {
        IncomingEvent::DirectUpload { body } => {
            info!(
                bucket = %config.upload_bucket,
                key = DIRECT_UPLOAD_KEY,
                bytes = body.len(),
                "[RELAY] Writing original upload"
            );
            store
                .put_object(&config.upload_bucket, DIRECT_UPLOAD_KEY, body.clone())
                .await
                .map_err(|e| {
                    error!(error = %e, bucket = %config.upload_bucket, "[RELAY][ERROR] put_object failed");
                    RelayError::Storage(e)
                })?;

            info!(
                bucket = %config.destination_bucket,
                key = %destination_key,
                "[RELAY] Writing processed copy"
            );
            store
                .put_object(&config.destination_bucket, &destination_key, body.clone())
                .await
                .map_err(|e| {
                    error!(error = %e, bucket = %config.destination_bucket, "[RELAY][ERROR] put_object failed");
                    RelayError::Storage(e)
                })?;
        }
        IncomingEvent::StorageNotification {
            source_bucket,
            object_key,
        } => {
            info!(
                source_bucket = %source_bucket,
                source_key = %object_key,
                dest_bucket = %config.destination_bucket,
                dest_key = %destination_key,
                "[RELAY] Copying notified object"
            );
            store
                .copy_object(
                    source_bucket,
                    object_key,
                    &config.destination_bucket,
                    &destination_key,
                )
                .await
                .map_err(|e| {
                    error!(error = %e, "[RELAY][ERROR] copy_object failed");
                    RelayError::Storage(e)
                })?;
        }
    }

    Ok(Relayed { destination_key })
}
