// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Components that expose their own lifecycle.
//!
//! [`LifecycleProvider`] is implemented by anything that owns a lifecycle feed; it gets the
//! two binding entry points for free. [`LifecycleOwner`] is a ready-made provider driven by
//! explicit [`dispatch`](LifecycleOwner::dispatch) calls.

use crate::bind_lifecycle::bind_lifecycle;
use crate::bind_until_event::bind_until_event;
use crate::transformer::LifecycleTransformer;
use lifespan_core::{LifecycleEvent, LifecycleSource, LifecycleSubject, SubjectError};

/// A component with a lifecycle that streams can be bound to.
pub trait LifecycleProvider<E: LifecycleEvent> {
    /// The feed type handed to the binders.
    type Lifecycle: LifecycleSource<E>;

    /// The component's lifecycle feed.
    fn lifecycle(&self) -> Self::Lifecycle;

    /// Binds until `event` is emitted.
    fn bind_until_event(&self, event: E) -> LifecycleTransformer {
        bind_until_event(self.lifecycle(), event)
    }

    /// Binds to the window current at subscription time, using the topology's own table.
    fn bind_to_lifecycle(&self) -> LifecycleTransformer {
        bind_lifecycle(self.lifecycle(), E::Table::default())
    }
}

/// A lifecycle driven by hand, one stage at a time.
///
/// The owner remembers its current stage, so streams bound after the fact still start from
/// the right place. Dispatching the terminal stage closes the owner.
///
/// ```rust
/// use lifespan_core::ActivityEvent;
/// use lifespan_stream::{ComposeExt, LifecycleOwner, LifecycleProvider};
/// use lifespan_test_utils::{assert_stream_ended, test_channel};
///
/// # #[tokio::main]
/// # async fn main() {
/// let owner = LifecycleOwner::new();
/// owner.dispatch(ActivityEvent::Create).unwrap();
///
/// let (_tx, source) = test_channel::<u32>();
/// let mut bound = source.compose(&owner.bind_to_lifecycle());
///
/// owner.dispatch(ActivityEvent::Destroy).unwrap();
/// assert_stream_ended(&mut bound, 500).await;
/// assert!(owner.is_destroyed());
/// # }
/// ```
#[derive(Clone)]
pub struct LifecycleOwner<E: LifecycleEvent> {
    subject: LifecycleSubject<E>,
}

impl<E: LifecycleEvent> LifecycleOwner<E> {
    /// Creates an owner that has not emitted any stage yet.
    pub fn new() -> Self {
        Self {
            subject: LifecycleSubject::new(),
        }
    }

    /// Moves the owner to `stage`.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] once the terminal stage has been dispatched.
    pub fn dispatch(&self, stage: E) -> Result<(), SubjectError> {
        if self.subject.is_closed() {
            warn!("{} lifecycle already ended, dropping {}", E::topology(), stage);
            return Err(SubjectError::Closed);
        }

        self.subject.next(stage)?;
        if stage.is_terminal() {
            debug!("{} lifecycle reached {}", E::topology(), stage);
            self.subject.close();
        }
        Ok(())
    }

    /// The last dispatched stage.
    #[must_use]
    pub fn current(&self) -> Option<E> {
        self.subject.latest()
    }

    /// Returns `true` once the terminal stage has been dispatched.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.subject.is_closed()
    }
}

impl<E: LifecycleEvent> Default for LifecycleOwner<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: LifecycleEvent> LifecycleProvider<E> for LifecycleOwner<E> {
    type Lifecycle = LifecycleSubject<E>;

    fn lifecycle(&self) -> Self::Lifecycle {
        self.subject.clone()
    }
}
