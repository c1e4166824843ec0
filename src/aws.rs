#![doc = "AWS-backed implementations of the relay's outbound capabilities."]
//
//! [`S3Store`] implements [`ObjectStore`] on top of `aws-sdk-s3` and [`SnsNotifier`]
//! implements [`Notifier`] on top of `aws-sdk-sns`. Both are thin: one SDK call per
//! trait method, with the SDK error flattened into a readable message.
//!
//! Clients are built once per process by [`AwsClients::from_env`] and shared by
//! reference across invocations.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::contract::{BoxError, Notifier, ObjectStore};

/// Everything but unreserved characters and the path separator.
const COPY_SOURCE_KEY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// `x-amz-copy-source` value for an object. S3 URL-decodes the header, so the key
/// must be percent-encoded.
pub fn copy_source(bucket: &str, key: &str) -> String {
    format!("{bucket}/{}", utf8_percent_encode(key, COPY_SOURCE_KEY))
}

pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        S3Store { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(&self, bucket: &str, key: &str, bytes: Vec<u8>) -> Result<(), BoxError> {
        tracing::debug!(bucket, key, bytes = bytes.len(), "S3 PutObject");
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| aws_sdk_s3::error::DisplayErrorContext(e).to_string())?;
        Ok(())
    }

    async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), BoxError> {
        let copy_source = copy_source(source_bucket, source_key);
        tracing::debug!(copy_source = %copy_source, dest_bucket, dest_key, "S3 CopyObject");
        self.client
            .copy_object()
            .bucket(dest_bucket)
            .key(dest_key)
            .copy_source(&copy_source)
            .send()
            .await
            .map_err(|e| aws_sdk_s3::error::DisplayErrorContext(e).to_string())?;
        Ok(())
    }
}

pub struct SnsNotifier {
    client: aws_sdk_sns::Client,
}

impl SnsNotifier {
    pub fn new(client: aws_sdk_sns::Client) -> Self {
        SnsNotifier { client }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, topic: &str, message: &str) -> Result<(), BoxError> {
        let output = self
            .client
            .publish()
            .topic_arn(topic)
            .message(message)
            .send()
            .await
            .map_err(|e| aws_sdk_sns::error::DisplayErrorContext(e).to_string())?;
        tracing::debug!(message_id = output.message_id().unwrap_or_default(), "SNS Publish accepted");
        Ok(())
    }
}

/// Process-wide service clients.
pub struct AwsClients {
    pub store: S3Store,
    pub notifier: SnsNotifier,
}

impl AwsClients {
    /// Build both clients from the standard AWS environment chain
    /// (`AWS_REGION`, credentials, `AWS_ENDPOINT_URL`, ...).
    pub async fn from_env() -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest()).load().await;
        tracing::info!(
            region = shared.region().map(|r| r.as_ref()).unwrap_or("<unset>"),
            "Initialized AWS clients from environment"
        );
        AwsClients {
            store: S3Store::new(aws_sdk_s3::Client::new(&shared)),
            notifier: SnsNotifier::new(aws_sdk_sns::Client::new(&shared)),
        }
    }
}
