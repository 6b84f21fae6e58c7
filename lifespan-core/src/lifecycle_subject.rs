// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, replaying subject used by owners to publish their lifecycle.
//!
//! A [`LifecycleSubject`] broadcasts every stage it is given to all current subscribers.
//! A new subscriber first receives the latest stage, so code that binds in the middle of
//! an episode learns where the owner currently is.
//!
//! ## Characteristics
//!
//! - **Hot**: stages sent before subscribing are not replayed, except the latest one.
//! - **Unbounded**: every subscriber gets its own unbounded channel.
//! - **Cheap to clone**: all clones share the same state.
//! - **Error/close**: an error is delivered to all subscribers and closes the subject.
//!
//! ## Example
//!
//! ```
//! use lifespan_core::{ActivityEvent, LifecycleSubject, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = LifecycleSubject::new();
//! subject.next(ActivityEvent::Create).unwrap();
//! subject.next(ActivityEvent::Start).unwrap();
//!
//! // Late subscriber sees the current stage first
//! let mut stream = subject.subscribe().unwrap();
//! subject.next(ActivityEvent::Resume).unwrap();
//! subject.close();
//!
//! assert_eq!(stream.next().await, Some(StreamItem::Value(ActivityEvent::Start)));
//! assert_eq!(stream.next().await, Some(StreamItem::Value(ActivityEvent::Resume)));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use crate::lifecycle_mutex::Mutex;
use crate::lifecycle_source::LifecycleStream;
use crate::{LifecycleError, StreamItem, SubjectError};
use async_channel::Sender;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

struct SubjectState<T> {
    closed: bool,
    latest: Option<T>,
    senders: Vec<Sender<StreamItem<T>>>,
}

/// A hot subject that replays its latest value to new subscribers.
///
/// See the [module documentation](crate::lifecycle_subject) for details.
pub struct LifecycleSubject<T: Clone + Send + Sync + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + Sync + 'static> LifecycleSubject<T> {
    /// Creates an open subject with no subscribers and no current value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                latest: None,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribes to the subject, starting with its latest value if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject has been closed.
    pub fn subscribe(&self) -> Result<LifecycleStream<T>, SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let (tx, rx) = async_channel::unbounded();
        if let Some(latest) = state.latest.clone() {
            // Fresh unbounded channel, cannot be full or closed
            let _ = tx.try_send(StreamItem::Value(latest));
        }
        state.senders.push(tx);
        Ok(Box::pin(rx))
    }

    /// Like [`subscribe`](Self::subscribe), but never fails.
    ///
    /// On a closed subject the returned stream yields the last value, if any, and ends.
    /// Binding to an owner that already reached its terminal stage therefore still observes
    /// that stage.
    pub fn replay(&self) -> LifecycleStream<T> {
        let latest = {
            let state = self.state.lock();
            if state.closed {
                Some(state.latest.clone())
            } else {
                None
            }
        };

        match latest {
            Some(latest) => stream::iter(latest.map(StreamItem::Value)).boxed(),
            None => self
                .subscribe()
                .unwrap_or_else(|_| stream::empty().boxed()),
        }
    }

    /// Sends an item to all active subscribers.
    ///
    /// Subscribers whose stream has been dropped are pruned here.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject has been closed.
    pub fn send(&self, item: StreamItem<T>) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        if let StreamItem::Value(value) = &item {
            state.latest = Some(value.clone());
        }

        state
            .senders
            .retain(|tx| tx.try_send(item.clone()).is_ok());
        Ok(())
    }

    /// Sends a value to all active subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject has been closed.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.send(StreamItem::Value(value))
    }

    /// Sends an error to all subscribers and closes the subject.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject was already closed.
    pub fn error(&self, err: LifecycleError) -> Result<(), SubjectError> {
        let result = self.send(StreamItem::Error(err));
        self.close();
        result
    }

    /// Closes the subject, completing every subscriber stream.
    ///
    /// Closing is idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    /// Returns `true` if the subject has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Returns the latest value sent, if any.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.state.lock().latest.clone()
    }

    /// Returns the number of subscribers still registered.
    ///
    /// Dropped subscribers are removed lazily on the next `send()`.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for LifecycleSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> Clone for LifecycleSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}
