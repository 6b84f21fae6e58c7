// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Lifespan
//!
//! Lifecycle-aware termination for async streams.
//!
//! ## Overview
//!
//! A stream started by a UI component (a screen, a fragment, a view) must stop when the
//! component leaves the state it was started in, or it keeps delivering into something that
//! is no longer there. Lifespan turns the component's lifecycle feed into a reusable
//! [`LifecycleTransformer`]: applied to any stream, it mirrors that stream and completes at
//! the right lifecycle stage.
//!
//! Three ways to pick the stage:
//!
//! - **Explicit**: [`bind_until_event`] ends at a stage named by the caller
//! - **Automatic**: [`bind_lifecycle`] (and [`bind_activity`], [`bind_fragment`]) ends at the
//!   stage that closes the window the stream was subscribed in
//! - **View detach**: [`bind_view`] ends on the first detach signal
//!
//! ## Quick Start
//!
//! ```rust
//! use lifespan_rx::prelude::*;
//! use lifespan_test_utils::test_channel;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let owner = LifecycleOwner::new();
//! owner.dispatch(ActivityEvent::Create).unwrap();
//! owner.dispatch(ActivityEvent::Start).unwrap();
//! owner.dispatch(ActivityEvent::Resume).unwrap();
//!
//! let (tx, frames) = test_channel::<u32>();
//! let mut frames = frames.compose(&owner.bind_to_lifecycle());
//!
//! tx.send(1).unwrap();
//! assert_eq!(frames.next().await, Some(StreamItem::Value(1)));
//!
//! // Bound while resumed: pausing ends the stream
//! owner.dispatch(ActivityEvent::Pause).unwrap();
//! assert_eq!(frames.next().await, None);
//! # }
//! ```

// Re-export core types
pub use lifespan_core::{
    from_fn, from_stream, ActivityEvent, ActivityTransitions, AtOrAfter, EventMatcher,
    ExactMatch, FragmentEvent, FragmentTransitions, LifecycleError, LifecycleEvent,
    LifecycleSource, LifecycleStream, LifecycleSubject, StageTable, StreamItem, SubjectError,
    TransitionTable,
};

// Re-export binders and operators
pub use lifespan_stream::{
    bind_activity, bind_fragment, bind_lifecycle, bind_lifecycle_with, bind_until_activity_event,
    bind_until_event, bind_until_event_with, bind_until_fragment_event, bind_view, Binder,
    ComposeExt, LifecycleOwner, LifecycleProvider, LifecycleTransformer, SharedLifecycle,
    TakeUntilExt,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use lifespan_stream::prelude::*;
}
