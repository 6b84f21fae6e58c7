// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the lifespan crates.
//!
//! Meant for development and tests only.
//!
//! # Contents
//!
//! - [`test_channel`] / [`test_channel_with_errors`]: push-driven source streams
//! - [`helpers`]: timed assertions on streams ([`unwrap_stream`], [`assert_stream_ended`], ...)
//! - [`CountingSource`]: a lifecycle source that counts its connections
//! - [`fixtures`]: owners already positioned somewhere in their episode
//!
//! # Example
//!
//! ```rust
//! use lifespan_test_utils::{test_channel, unwrap_stream, unwrap_value};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, mut stream) = test_channel::<u8>();
//! tx.send(7).unwrap();
//! assert_eq!(unwrap_value(Some(unwrap_stream(&mut stream, 500).await)), 7);
//! # }
//! ```

pub mod counting_source;
pub mod fixtures;
pub mod helpers;

pub use counting_source::CountingSource;
pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_stream, unwrap_value};

use futures::{Stream, StreamExt};
use lifespan_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Creates a channel whose receiving end is a stream of `StreamItem::Value`s.
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel that accepts `StreamItem<T>` for testing error propagation.
///
/// ```rust
/// use lifespan_test_utils::test_channel_with_errors;
/// use lifespan_core::{LifecycleError, StreamItem};
/// use futures::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let (tx, mut stream) = test_channel_with_errors::<i32>();
///
/// tx.send(StreamItem::Value(42)).unwrap();
/// tx.send(StreamItem::Error(LifecycleError::stream_error("boom"))).unwrap();
///
/// assert!(stream.next().await.unwrap().is_value());
/// assert!(stream.next().await.unwrap().is_error());
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send + Unpin,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
