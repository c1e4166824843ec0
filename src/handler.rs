//! Entry point: classify → relay → notify → respond.
//!
//! [`handle`] is the only function the host needs. It never fails; every error past
//! classification is folded into a 500 [`Response`] by [`process`].

use serde_json::Value;
use tracing::{error, info, warn};

use crate::config::RelayConfig;
use crate::contract::{Notifier, ObjectStore};
use crate::error::RelayError;
use crate::event::{Classified, IncomingEvent};
use crate::notify::announce;
use crate::relay::relay;
use crate::response::{Outcome, Response};

/// Run one invocation and render its response envelope.
pub async fn handle(
    payload: &Value,
    config: &RelayConfig,
    store: &dyn ObjectStore,
    notifier: &dyn Notifier,
) -> Response {
    let outcome = process(payload, config, store, notifier).await;
    info!(status = outcome.status_code(), "[HANDLER] Invocation finished");
    outcome.into_response()
}

/// Run one invocation and return its flat outcome.
pub async fn process(
    payload: &Value,
    config: &RelayConfig,
    store: &dyn ObjectStore,
    notifier: &dyn Notifier,
) -> Outcome {
    match run_pipeline(payload, config, store, notifier).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "[HANDLER][ERROR] Invocation failed");
            Outcome::fault(e)
        }
    }
}

async fn run_pipeline(
    payload: &Value,
    config: &RelayConfig,
    store: &dyn ObjectStore,
    notifier: &dyn Notifier,
) -> Result<Outcome, RelayError> {
    let event = match IncomingEvent::classify(payload)? {
        Classified::Event(event) => event,
        Classified::Unrecognized => {
            warn!("[HANDLER] Unsupported event shape, nothing to do");
            return Ok(Outcome::unsupported());
        }
    };

    match &event {
        IncomingEvent::DirectUpload { .. } => info!("[HANDLER] API Gateway request received"),
        IncomingEvent::StorageNotification { .. } => info!("[HANDLER] Storage trigger received"),
    }

    let relayed = relay(&event, config, store).await?;
    info!(destination_key = %relayed.destination_key, "[HANDLER] Relay complete");

    announce(config.topic_arn.as_deref(), event.file_name(), notifier).await?;

    Ok(Outcome::success())
}
