// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Extension trait providing the `take_until_notified` operator.
//!
//! Mirrors a source stream until a separate notifier stream emits, then completes.
//!
//! # Behavior
//!
//! - The notifier is polled **before** the source on every poll, so a source item that
//!   becomes ready in the same turn as the notifier is never forwarded
//! - The first notifier value completes the stream
//! - A notifier error is forwarded once, then the stream completes
//! - A notifier that completes without emitting leaves the source mirrored untouched
//! - Source errors pass through unchanged
//! - On termination both the source and the notifier are dropped, releasing whatever
//!   subscriptions they hold
//!
//! # Example
//!
//! ```rust
//! use lifespan_core::StreamItem;
//! use lifespan_stream::TakeUntilExt;
//! use lifespan_test_utils::{assert_stream_ended, test_channel, unwrap_stream, unwrap_value};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let (tx, source) = test_channel::<i32>();
//! let (stop, notifier) = test_channel::<()>();
//!
//! let mut bounded = source.take_until_notified(notifier);
//!
//! tx.send(1).unwrap();
//! assert_eq!(unwrap_value(Some(unwrap_stream(&mut bounded, 500).await)), 1);
//!
//! stop.send(()).unwrap();
//! tx.send(2).unwrap();
//! assert_stream_ended(&mut bounded, 500).await;
//! # }
//! ```

mod implementation;

pub use implementation::{TakeUntil, TakeUntilExt};
