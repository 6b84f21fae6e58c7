// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reference-counted sharing of one lifecycle feed between many consumers.
//!
//! A [`SharedLifecycle`] wraps a [`LifecycleSource`](lifespan_core::LifecycleSource) so that
//! any number of subscribers observe the *same* emissions while the raw feed is connected
//! to only once.
//!
//! ## Characteristics
//!
//! - **Single connection**: the first subscriber connects to the raw feed; later subscribers
//!   attach to that connection.
//! - **Identical order**: every live subscriber receives every emission, in upstream order.
//! - **Buffered per subscriber**: a subscriber that is not being polled keeps what it missed,
//!   so two consumers driven by the same task never lose the first stage to each other.
//! - **Released with the last subscriber**: when the last live subscriber is dropped the raw
//!   connection is dropped too. A later subscriber connects again.
//! - **Latest on join**: a subscriber joining a connection that has already been polled first
//!   receives the latest stage that connection carried, then everything after it.
//!   [`subscribe_pair`](SharedLifecycle::subscribe_pair) attaches two subscribers that are
//!   guaranteed to observe the very same sequence.
//! - **Poll driven**: no task is spawned. Whichever subscriber is polled pulls the upstream
//!   and fans the item out to the others, waking them.
//! - **Woken together**: the upstream is polled with a waker owned by the share, so a new
//!   stage wakes every waiting subscriber, not only the one that polled last. A subscriber
//!   left idle never holds the others back.
//! - **Error/complete**: an upstream error is delivered to every subscriber, then all of them
//!   complete, as they do when the upstream completes.
//!
//! ## Example
//!
//! ```rust
//! use lifespan_core::{ActivityEvent, LifecycleSubject, StreamItem};
//! use lifespan_stream::SharedLifecycle;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let owner = LifecycleSubject::new();
//! let shared = SharedLifecycle::new(owner.clone());
//!
//! let mut first = shared.subscribe();
//! let mut rest = shared.subscribe();
//!
//! owner.next(ActivityEvent::Create).unwrap();
//! owner.next(ActivityEvent::Start).unwrap();
//!
//! // One connection, two consumers, same sequence
//! assert_eq!(first.next().await, Some(StreamItem::Value(ActivityEvent::Create)));
//! assert_eq!(rest.next().await, Some(StreamItem::Value(ActivityEvent::Create)));
//! assert_eq!(rest.next().await, Some(StreamItem::Value(ActivityEvent::Start)));
//! assert_eq!(shared.connection_count(), 1);
//! # }
//! ```

mod implementation;

pub use implementation::{SharedLifecycle, SharedSubscription};
