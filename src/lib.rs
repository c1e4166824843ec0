#![doc = "image-relay: relays uploaded images into a processed bucket and announces them."]

//! One function, two ingestion paths:
//!
//! - a direct upload, where the request body carries the image, is written to the
//!   upload bucket and again under its processed key;
//! - a storage notification, where only a bucket/key is carried, becomes a
//!   server-side copy into the processed bucket.
//!
//! An optional notification follows, and every invocation ends in one response
//! envelope. See [`handler::handle`].

pub mod aws;
pub mod cli;
pub mod config;
pub mod contract;
pub mod error;
pub mod event;
pub mod handler;
pub mod notify;
pub mod relay;
pub mod response;

pub use cli::{run, Cli, Commands};
