// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream operators that end a stream when its owner's lifecycle says so.
//!
//! A stream produced inside a UI component usually outlives the component unless something
//! ends it. This crate turns a lifecycle feed into a [`LifecycleTransformer`]: applied to a
//! source stream, it mirrors the source and completes the moment the lifecycle reaches the
//! right stage.
//!
//! # Architecture
//!
//! - **[`take_until_notified`](TakeUntilExt::take_until_notified)**: the termination primitive every
//!   binder is built on
//! - **[`SharedLifecycle`]**: one connection to a lifecycle feed, shared by reference-counted
//!   subscribers
//! - **Binders**: build a [`LifecycleTransformer`] from a feed
//! - **[`ComposeExt`]**: applies a transformer with `.compose(&transformer)`
//!
//! ## Binders
//!
//! | Binder | Ends the stream at |
//! |--------|--------------------|
//! | [`bind_until_event`] | the first occurrence of an explicit stage |
//! | [`bind_lifecycle`] | the stage a [`TransitionTable`](lifespan_core::TransitionTable) pairs with the stage current at subscription |
//! | [`bind_view`] | the first detach signal |
//! | [`Binder`] | either of the first two, validated at build time |
//!
//! # Errors
//!
//! Errors travel in-band as [`StreamItem::Error`](lifespan_core::StreamItem::Error). A source
//! error is forwarded and the bound stream keeps mirroring. A lifecycle error is forwarded
//! and the bound stream then completes. Binding once the owner reached its terminal stage
//! completes the stream without an error.
//!
//! # Logging
//!
//! Enable the `tracing` feature to route diagnostics through `tracing`. Without it, warnings
//! and errors go to stderr and debug messages are compiled out.
//!
//! # Example
//!
//! ```rust
//! use lifespan_core::{ActivityEvent, LifecycleSubject};
//! use lifespan_stream::{bind_activity, ComposeExt};
//! use lifespan_test_utils::{assert_stream_ended, test_channel, unwrap_stream, unwrap_value};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let owner = LifecycleSubject::new();
//! owner.next(ActivityEvent::Create).unwrap();
//!
//! let (tx, source) = test_channel::<i32>();
//! let mut bound = source.compose(&bind_activity(owner.clone()));
//!
//! tx.send(1).unwrap();
//! assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);
//!
//! // Created before binding, so only DESTROY ends it
//! owner.next(ActivityEvent::Stop).unwrap();
//! tx.send(2).unwrap();
//! assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 2);
//!
//! owner.next(ActivityEvent::Destroy).unwrap();
//! assert_stream_ended(&mut bound, 500).await;
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod bind_lifecycle;
pub mod bind_until_event;
pub mod bind_view;
pub mod binder;
pub mod prelude;
pub mod provider;
pub mod share;
pub mod take_until;
pub mod transformer;

pub use bind_lifecycle::{bind_activity, bind_fragment, bind_lifecycle, bind_lifecycle_with};
pub use bind_until_event::{
    bind_until_activity_event, bind_until_event, bind_until_event_with, bind_until_fragment_event,
};
pub use bind_view::bind_view;
pub use binder::Binder;
pub use provider::{LifecycleOwner, LifecycleProvider};
pub use share::{SharedLifecycle, SharedSubscription};
pub use take_until::{TakeUntil, TakeUntilExt};
pub use transformer::{ComposeExt, LifecycleTransformer, Notifier};
