use thiserror::Error;

use crate::contract::BoxError;

/// Every failure that can happen after an event has been recognised.
///
/// The display string is the bare underlying message; it is what ends up in the
/// `message` field of a 500 response.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The upload body claimed to be base64 but was not.
    #[error("{0}")]
    Decode(#[from] base64::DecodeError),

    /// A recognised field was present but had the wrong shape.
    #[error("{0}")]
    MalformedEvent(String),

    #[error("{0}")]
    Storage(BoxError),

    #[error("{0}")]
    Notification(BoxError),
}
