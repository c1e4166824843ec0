use tracing::{error, info};

use crate::contract::Notifier;
use crate::error::RelayError;

/// Fixed-format announcement for a processed file.
pub fn success_message(file_name: &str) -> String {
    format!("Integration Success! {file_name} processed.")
}

/// Publish the announcement for `file_name` when a topic is configured.
///
/// Returns whether a message was published. No topic means nothing to do; an empty
/// topic never gets here since [`crate::config::RelayConfig::from_env`] drops it.
pub async fn announce(
    topic_arn: Option<&str>,
    file_name: &str,
    notifier: &dyn Notifier,
) -> Result<bool, RelayError> {
    let Some(topic) = topic_arn else {
        info!("[NOTIFY] No topic configured, skipping notification");
        return Ok(false);
    };

    let message = success_message(file_name);
    info!(topic = %topic, file = %file_name, "[NOTIFY] Publishing notification");
    notifier.publish(topic, &message).await.map_err(|e| {
        error!(error = %e, topic = %topic, "[NOTIFY][ERROR] publish failed");
        RelayError::Notification(e)
    })?;

    Ok(true)
}
