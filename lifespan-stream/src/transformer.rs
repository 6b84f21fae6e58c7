// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The reusable transformation every binder returns.
//!
//! A [`LifecycleTransformer`] holds no subscription. Each time it is applied to a source it
//! builds a fresh termination notifier, and that notifier only subscribes to the lifecycle
//! feed when the bound stream is first polled. One transformer can therefore be applied to
//! any number of sources, each getting an independent, correctly terminated stream.
//!
//! ```rust
//! use lifespan_core::{ActivityEvent, LifecycleSubject};
//! use lifespan_stream::{bind_until_activity_event, ComposeExt};
//! use lifespan_test_utils::test_channel;
//!
//! # async fn example() {
//! let owner = LifecycleSubject::new();
//! let until_stop = bind_until_activity_event(owner.clone(), ActivityEvent::Stop);
//!
//! let (_tx_a, feed_a) = test_channel::<i32>();
//! let (_tx_b, feed_b) = test_channel::<String>();
//!
//! let _bound_a = feed_a.compose(&until_stop);
//! let _bound_b = feed_b.compose(&until_stop);
//! # }
//! ```

use crate::take_until::{TakeUntil, TakeUntilExt};
use futures::future;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use lifespan_core::StreamItem;
use std::sync::Arc;

/// Stream that fires once, with `Value(())`, when the bound stream must terminate.
pub type Notifier = BoxStream<'static, StreamItem<()>>;

type NotifierFactory = dyn Fn() -> Notifier + Send + Sync;

/// A reusable transformation that bounds a stream to a lifecycle window.
#[derive(Clone)]
pub struct LifecycleTransformer {
    notifier: Arc<NotifierFactory>,
}

impl LifecycleTransformer {
    /// Builds a transformer from a notifier factory.
    ///
    /// The factory is called once per application, and the stream it returns is not polled
    /// before the bound stream is.
    pub fn from_notifier<F>(factory: F) -> Self
    where
        F: Fn() -> Notifier + Send + Sync + 'static,
    {
        Self {
            notifier: Arc::new(factory),
        }
    }

    /// Applies the transformation to `source`.
    pub fn apply<S, T>(&self, source: S) -> TakeUntil<S, Notifier>
    where
        S: Stream<Item = StreamItem<T>>,
    {
        source.take_until_notified((self.notifier)())
    }
}

/// Extension trait for composing a [`LifecycleTransformer`] onto a stream.
pub trait ComposeExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Bounds this stream with `transformer`.
    fn compose(self, transformer: &LifecycleTransformer) -> TakeUntil<Self, Notifier> {
        transformer.apply(self)
    }
}

impl<S, T> ComposeExt<T> for S where S: Stream<Item = StreamItem<T>> {}

/// Defers building a stream until it is first polled.
pub(crate) fn defer<S, F>(factory: F) -> Notifier
where
    F: FnOnce() -> S + Send + 'static,
    S: Stream<Item = StreamItem<()>> + Send + 'static,
{
    stream::once(future::lazy(move |_| factory()))
        .flatten()
        .boxed()
}
