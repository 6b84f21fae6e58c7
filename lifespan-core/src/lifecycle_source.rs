// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The connection seam between an owner's lifecycle feed and the binders.
//!
//! A [`LifecycleSource`] is anything that can be *connected* to, yielding a fresh stream of
//! lifecycle stages. One call to [`connect`](LifecycleSource::connect) is one subscription
//! to the raw feed. Binders decide when, and how often, to connect.
//!
//! | Source | Each connection yields |
//! |--------|------------------------|
//! | [`LifecycleSubject`] | the current stage, then every later one |
//! | [`from_fn`] | whatever the closure builds (a cold feed) |
//! | [`from_stream`] | the wrapped stream once, then nothing |
//!
//! ```
//! use lifespan_core::{from_fn, ActivityEvent, LifecycleSource, StreamItem};
//! use futures::{stream, StreamExt};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source = from_fn(|| {
//!     stream::iter([ActivityEvent::Create, ActivityEvent::Start]).map(StreamItem::Value)
//! });
//!
//! // Cold: every connection restarts the sequence
//! let first: Vec<_> = source.connect().collect().await;
//! let second: Vec<_> = source.connect().collect().await;
//! assert_eq!(first, second);
//! # }
//! ```

use crate::lifecycle_mutex::Mutex;
use crate::{LifecycleSubject, StreamItem};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use std::sync::Arc;

/// A boxed stream of lifecycle items.
pub type LifecycleStream<E> = BoxStream<'static, StreamItem<E>>;

/// Something that can be connected to, yielding a stream of lifecycle stages.
pub trait LifecycleSource<E>: Send + Sync + 'static {
    /// Opens a new subscription to the raw lifecycle feed.
    fn connect(&self) -> LifecycleStream<E>;
}

impl<E: Clone + Send + Sync + 'static> LifecycleSource<E> for LifecycleSubject<E> {
    fn connect(&self) -> LifecycleStream<E> {
        self.replay()
    }
}

impl<E, L> LifecycleSource<E> for Arc<L>
where
    L: LifecycleSource<E> + ?Sized,
{
    fn connect(&self) -> LifecycleStream<E> {
        (**self).connect()
    }
}

/// A cold source: every connection calls the factory again.
pub struct FnSource<F> {
    factory: F,
}

/// Builds a cold [`LifecycleSource`] from a stream factory.
pub fn from_fn<E, S, F>(factory: F) -> FnSource<F>
where
    F: Fn() -> S + Send + Sync + 'static,
    S: Stream<Item = StreamItem<E>> + Send + 'static,
{
    FnSource { factory }
}

impl<E, S, F> LifecycleSource<E> for FnSource<F>
where
    E: Send + 'static,
    F: Fn() -> S + Send + Sync + 'static,
    S: Stream<Item = StreamItem<E>> + Send + 'static,
{
    fn connect(&self) -> LifecycleStream<E> {
        (self.factory)().boxed()
    }
}

/// A source backed by a single stream. The first connection takes it; later ones are empty.
pub struct OnceSource<S> {
    stream: Mutex<Option<S>>,
}

/// Wraps a one-shot stream as a [`LifecycleSource`].
pub fn from_stream<E, S>(stream: S) -> OnceSource<S>
where
    S: Stream<Item = StreamItem<E>> + Send + 'static,
{
    OnceSource {
        stream: Mutex::new(Some(stream)),
    }
}

impl<E, S> LifecycleSource<E> for OnceSource<S>
where
    E: Send + 'static,
    S: Stream<Item = StreamItem<E>> + Send + 'static,
{
    fn connect(&self) -> LifecycleStream<E> {
        match self.stream.lock().take() {
            Some(stream) => stream.boxed(),
            None => stream::empty().boxed(),
        }
    }
}
