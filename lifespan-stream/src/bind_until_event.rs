// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Binding a stream until one explicit lifecycle stage.
//!
//! The bound stream mirrors its source and completes the first time the lifecycle feed
//! emits the target stage. Later occurrences are irrelevant: the stream has already
//! completed. If the feed ends without ever emitting the target, the source is mirrored
//! for as long as it runs.
//!
//! Each application of the returned transformer opens its own connection to the feed,
//! when the bound stream is first polled.
//!
//! # Example
//!
//! ```rust
//! use lifespan_core::{ActivityEvent, LifecycleSubject};
//! use lifespan_stream::{bind_until_activity_event, ComposeExt};
//! use lifespan_test_utils::{assert_stream_ended, test_channel, unwrap_stream, unwrap_value};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let owner = LifecycleSubject::new();
//! let (tx, source) = test_channel::<i32>();
//!
//! let mut bound = source.compose(&bind_until_activity_event(owner.clone(), ActivityEvent::Stop));
//!
//! owner.next(ActivityEvent::Create).unwrap();
//! tx.send(1).unwrap();
//! assert_eq!(unwrap_value(Some(unwrap_stream(&mut bound, 500).await)), 1);
//!
//! owner.next(ActivityEvent::Stop).unwrap();
//! tx.send(2).unwrap();
//! assert_stream_ended(&mut bound, 500).await;
//! # }
//! ```

use crate::transformer::{defer, LifecycleTransformer};
use futures::future;
use futures::stream::{Stream, StreamExt};
use lifespan_core::{ActivityEvent, EventMatcher, ExactMatch, FragmentEvent, LifecycleSource, StreamItem};
use std::sync::Arc;

/// Binds until `event` is emitted by `lifecycle`, compared by value.
pub fn bind_until_event<E, L>(lifecycle: L, event: E) -> LifecycleTransformer
where
    L: LifecycleSource<E>,
    E: Clone + PartialEq + Send + Sync + 'static,
{
    bind_until_event_with(lifecycle, event, ExactMatch)
}

/// Binds until an emitted stage satisfies `matcher` against `event`.
pub fn bind_until_event_with<E, L, M>(lifecycle: L, event: E, matcher: M) -> LifecycleTransformer
where
    L: LifecycleSource<E>,
    E: Clone + Send + Sync + 'static,
    M: EventMatcher<E>,
{
    let lifecycle = Arc::new(lifecycle);
    let matcher = Arc::new(matcher);

    LifecycleTransformer::from_notifier(move || {
        let lifecycle = Arc::clone(&lifecycle);
        let matcher = Arc::clone(&matcher);
        let target = event.clone();
        defer(move || first_match(lifecycle.connect(), target, matcher))
    })
}

/// Binds a stream to an activity lifecycle until `event`.
pub fn bind_until_activity_event(
    lifecycle: impl LifecycleSource<ActivityEvent>,
    event: ActivityEvent,
) -> LifecycleTransformer {
    bind_until_event(lifecycle, event)
}

/// Binds a stream to a fragment lifecycle until `event`.
pub fn bind_until_fragment_event(
    lifecycle: impl LifecycleSource<FragmentEvent>,
    event: FragmentEvent,
) -> LifecycleTransformer {
    bind_until_event(lifecycle, event)
}

/// Fires once on the first stage matching `target`. Feed errors are forwarded.
pub(crate) fn first_match<E, S, M>(
    feed: S,
    target: E,
    matcher: Arc<M>,
) -> impl Stream<Item = StreamItem<()>> + Send
where
    S: Stream<Item = StreamItem<E>> + Send,
    E: Send + Sync,
    M: EventMatcher<E> + ?Sized,
{
    feed.filter_map(move |item| {
        future::ready(match item {
            StreamItem::Value(stage) if matcher.matches(&stage, &target) => {
                Some(StreamItem::Value(()))
            }
            StreamItem::Value(_) => None,
            StreamItem::Error(err) => Some(StreamItem::Error(err)),
        })
    })
    .take(1)
}
