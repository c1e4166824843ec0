//! # contract: outbound capabilities of the relay
//!
//! The handler never talks to a cloud SDK directly. It is handed two capabilities:
//! an [`ObjectStore`] for writing and copying objects between buckets, and a
//! [`Notifier`] for publishing a human-readable message on a topic.
//!
//! ## Implementations
//! - [`crate::aws::S3Store`] and [`crate::aws::SnsNotifier`] wrap the AWS SDK clients.
//! - `MockObjectStore` and `MockNotifier` are generated by `mockall` for tests.
//!
//! ## Errors
//! Both traits return a boxed error. The handler does not distinguish fault kinds
//! beyond the error's display string, so implementors only need a readable message.

use async_trait::async_trait;

use mockall::automock;

/// Boxed error returned by every outbound call.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Object storage as seen by the relay: whole-object writes and server-side copies.
///
/// Implementors are stateless request issuers and are shared read-only across invocations.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `bytes` to `bucket` under `key`, replacing any existing object.
    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), BoxError>;

    /// Copy an object to another location without reading it into memory.
    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), BoxError>;
}

/// Publish-only view of a notification service.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish `message` on `topic`. Returns once the service accepted the message.
    async fn publish(&self, topic: &str, message: &str) -> Result<(), BoxError>;
}
