use tracing::{debug, info};

/// Bucket that receives direct uploads as-is.
pub const UPLOAD_BUCKET: &str = "gcp-image-pipeline-uploads-sai";

/// Bucket that receives every processed artifact.
pub const DESTINATION_BUCKET: &str = "gcp-image-pipeline-processed-sai";

/// Environment variable holding the notification topic.
pub const TOPIC_ENV: &str = "SNS_TOPIC_ARN";

/// Per-invocation relay settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub upload_bucket: String,
    pub destination_bucket: String,
    /// `None` disables notifications.
    pub topic_arn: Option<String>,
}

impl RelayConfig {
    /// Resolve the configuration for one invocation. An empty topic counts as unset.
    pub fn from_env() -> Self {
        let topic_arn = std::env::var(TOPIC_ENV)
            .ok()
            .filter(|topic| !topic.is_empty());

        RelayConfig {
            upload_bucket: UPLOAD_BUCKET.to_string(),
            destination_bucket: DESTINATION_BUCKET.to_string(),
            topic_arn,
        }
    }

    pub fn trace_loaded(&self) {
        info!(
            upload_bucket = %self.upload_bucket,
            destination_bucket = %self.destination_bucket,
            notifications = self.topic_arn.is_some(),
            "Loaded RelayConfig"
        );
        debug!(?self, "RelayConfig loaded (full debug)");
    }
}
