// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Binding a stream to the lifecycle window it was subscribed in.
//!
//! When a bound stream is first polled, the binder takes the owner's current stage from the
//! lifecycle feed, looks its termination stage up in a [`TransitionTable`], and then completes
//! the stream the first time a *later* emission matches that stage.
//!
//! The feed is shared through a [`SharedLifecycle`]: the stage lookup and the watch for the
//! termination stage are two subscribers of one connection, attached together, so both
//! observe the same emissions. Every application of one transformer shares that connection;
//! a bound stream created while it is open starts from the owner's latest stage.
//!
//! ## Edge cases
//!
//! | Feed situation | Bound stream |
//! |----------------|--------------|
//! | Current stage is the terminal one | completes immediately, without an error |
//! | Table has no entry for the current stage | emits that error, then completes |
//! | Feed errors before any stage | emits the error, then completes |
//! | Feed ends before any stage | mirrors the source until it ends |
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
//! owner.next(ActivityEvent::Start).unwrap();
//! owner.next(ActivityEvent::Resume).unwrap();
//!
//! let (tx, source) = test_channel::<&str>();
//! let mut bound = source.compose(&bind_activity(owner.clone()));
//!
//! tx.send("frame").unwrap();
//! assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), "frame");
//!
//! // Subscribed while resumed, so the binding ends at PAUSE
//! owner.next(ActivityEvent::Pause).unwrap();
//! assert_stream_ended(&mut bound, 500).await;
//! # }
//! ```

use crate::bind_until_event::first_match;
use crate::share::{SharedLifecycle, SharedSubscription};
use crate::transformer::{defer, LifecycleTransformer, Notifier};
use core::fmt::Debug;
use futures::future;
use futures::stream::{self, StreamExt};
use lifespan_core::{
    ActivityEvent, ActivityTransitions, EventMatcher, ExactMatch, FragmentEvent,
    FragmentTransitions, LifecycleSource, StreamItem, TransitionTable,
};
use std::sync::Arc;

/// Binds until the stage `table` pairs with the owner's stage at subscription time.
pub fn bind_lifecycle<E, L, R>(lifecycle: L, table: R) -> LifecycleTransformer
where
    L: LifecycleSource<E>,
    R: TransitionTable<E>,
    E: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    bind_lifecycle_with(lifecycle, table, ExactMatch)
}

/// Like [`bind_lifecycle`], comparing emitted stages with `matcher`.
pub fn bind_lifecycle_with<E, L, R, M>(lifecycle: L, table: R, matcher: M) -> LifecycleTransformer
where
    L: LifecycleSource<E>,
    R: TransitionTable<E>,
    M: EventMatcher<E>,
    E: Clone + Debug + Send + Sync + 'static,
{
    let shared = SharedLifecycle::new(lifecycle);
    let table = Arc::new(table);
    let matcher = Arc::new(matcher);

    LifecycleTransformer::from_notifier(move || {
        let shared = shared.clone();
        let table = Arc::clone(&table);
        let matcher = Arc::clone(&matcher);

        defer(move || {
            let (first, rest) = shared.subscribe_pair();
            stream::once(termination_notifier(first, rest, table, matcher)).flatten()
        })
    })
}

/// Binds a stream to an activity lifecycle using [`ActivityTransitions`].
pub fn bind_activity(lifecycle: impl LifecycleSource<ActivityEvent>) -> LifecycleTransformer {
    bind_lifecycle(lifecycle, ActivityTransitions)
}

/// Binds a stream to a fragment lifecycle using [`FragmentTransitions`].
pub fn bind_fragment(lifecycle: impl LifecycleSource<FragmentEvent>) -> LifecycleTransformer {
    bind_lifecycle(lifecycle, FragmentTransitions)
}

async fn termination_notifier<E, R, M>(
    first: SharedSubscription<E>,
    rest: SharedSubscription<E>,
    table: Arc<R>,
    matcher: Arc<M>,
) -> Notifier
where
    E: Clone + Debug + Send + Sync + 'static,
    R: TransitionTable<E>,
    M: EventMatcher<E>,
{
    let (head, first) = first.into_future().await;
    drop(first);

    let start = match head {
        Some(StreamItem::Value(start)) => start,
        Some(StreamItem::Error(err)) => {
            warn!("lifecycle feed failed before its first stage: {}", err);
            return stream::once(future::ready(StreamItem::Error(err))).boxed();
        }
        None => {
            debug!("lifecycle feed ended before its first stage, binding never terminates");
            return stream::empty().boxed();
        }
    };

    match table.termination_stage_for(&start) {
        Ok(end) => {
            debug!("bound at {:?}, terminating at {:?}", start, end);
            // `rest` also queued the starting stage
            first_match(rest.skip(1), end, matcher).boxed()
        }
        Err(err) if err.is_outside_lifecycle() => {
            debug!("bound at {:?}: {}", start, err);
            stream::once(future::ready(StreamItem::Value(()))).boxed()
        }
        Err(err) => {
            error!("cannot bind at {:?}: {}", start, err);
            stream::once(future::ready(StreamItem::Error(err))).boxed()
        }
    }
}
