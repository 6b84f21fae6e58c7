// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A [`LifecycleSource`] wrapper that records how it is connected to.

use futures::StreamExt;
use lifespan_core::{LifecycleSource, LifecycleStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts connections to the wrapped source, and how many of them are still open.
///
/// A connection stays open until the stream it returned is dropped. Clones share counters.
///
/// ```rust
/// use lifespan_core::{ActivityEvent, LifecycleSource, LifecycleSubject};
/// use lifespan_test_utils::CountingSource;
///
/// let source = CountingSource::new(LifecycleSubject::<ActivityEvent>::new());
/// let connection = source.connect();
/// assert_eq!((source.connect_count(), source.active_count()), (1, 1));
///
/// drop(connection);
/// assert_eq!(source.active_count(), 0);
/// ```
pub struct CountingSource<E> {
    inner: Arc<dyn LifecycleSource<E>>,
    connects: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
}

impl<E> Clone for CountingSource<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            connects: Arc::clone(&self.connects),
            active: Arc::clone(&self.active),
        }
    }
}

impl<E> CountingSource<E> {
    pub fn new(inner: impl LifecycleSource<E>) -> Self {
        Self {
            inner: Arc::new(inner),
            connects: Arc::new(AtomicUsize::new(0)),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Connections made so far.
    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Connections whose stream has not been dropped yet.
    pub fn active_count(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

struct ActiveGuard(Arc<AtomicUsize>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<E: Send + 'static> LifecycleSource<E> for CountingSource<E> {
    fn connect(&self) -> LifecycleStream<E> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_add(1, Ordering::SeqCst);
        let guard = ActiveGuard(Arc::clone(&self.active));

        self.inner
            .connect()
            .map(move |item| {
                let _open = &guard;
                item
            })
            .boxed()
    }
}
