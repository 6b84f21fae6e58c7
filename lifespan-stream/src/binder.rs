// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A validating builder over the binders.
//!
//! The free functions ([`bind_until_event`](crate::bind_until_event),
//! [`bind_lifecycle`](crate::bind_lifecycle)) cannot be misconfigured: their arguments are
//! required by the type system. [`Binder`] is for call sites that assemble a binding from
//! optional parts, and reports a missing or conflicting part as
//! [`LifecycleError::Configuration`] instead of producing a transformer.
//!
//! ```rust
//! use lifespan_core::{ActivityEvent, ActivityTransitions, LifecycleSubject};
//! use lifespan_stream::Binder;
//!
//! let owner = LifecycleSubject::<ActivityEvent>::new();
//!
//! assert!(Binder::new().lifecycle(owner.clone()).until(ActivityEvent::Stop).build().is_ok());
//! assert!(Binder::new().lifecycle(owner).table(ActivityTransitions).build().is_ok());
//! assert!(Binder::<ActivityEvent>::new().until(ActivityEvent::Stop).build().is_err());
//! ```

use crate::bind_lifecycle::bind_lifecycle_with;
use crate::bind_until_event::bind_until_event_with;
use crate::transformer::LifecycleTransformer;
use core::fmt::Debug;
use lifespan_core::{
    EventMatcher, ExactMatch, LifecycleError, LifecycleSource, Result, TransitionTable,
};
use std::sync::Arc;

/// Collects the parts of a binding and validates them in [`build`](Binder::build).
pub struct Binder<E> {
    lifecycle: Option<Arc<dyn LifecycleSource<E>>>,
    target: Option<E>,
    table: Option<Arc<dyn TransitionTable<E>>>,
    matcher: Arc<dyn EventMatcher<E>>,
}

impl<E> Binder<E>
where
    E: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    /// Starts an empty builder comparing stages with [`ExactMatch`].
    pub fn new() -> Self {
        Self {
            lifecycle: None,
            target: None,
            table: None,
            matcher: Arc::new(ExactMatch),
        }
    }

    /// Sets the lifecycle feed to bind to.
    #[must_use]
    pub fn lifecycle(mut self, lifecycle: impl LifecycleSource<E>) -> Self {
        self.lifecycle = Some(Arc::new(lifecycle));
        self
    }

    /// Ends the binding at an explicit stage.
    #[must_use]
    pub fn until(mut self, event: E) -> Self {
        self.target = Some(event);
        self
    }

    /// Infers the end stage from the stage current at subscription time.
    #[must_use]
    pub fn table(mut self, table: impl TransitionTable<E>) -> Self {
        self.table = Some(Arc::new(table));
        self
    }

    /// Replaces the stage comparison policy.
    #[must_use]
    pub fn matcher(mut self, matcher: impl EventMatcher<E>) -> Self {
        self.matcher = Arc::new(matcher);
        self
    }

    /// Builds the transformer.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Configuration`] when no lifecycle was given, or when not
    /// exactly one of [`until`](Self::until) and [`table`](Self::table) was set.
    pub fn build(self) -> Result<LifecycleTransformer> {
        let Some(lifecycle) = self.lifecycle else {
            return Err(LifecycleError::configuration("Lifecycle must be given"));
        };

        match (self.target, self.table) {
            (Some(event), None) => Ok(bind_until_event_with(lifecycle, event, self.matcher)),
            (None, Some(table)) => Ok(bind_lifecycle_with(lifecycle, table, self.matcher)),
            (None, None) => Err(LifecycleError::configuration("Event must be given")),
            (Some(_), Some(_)) => Err(LifecycleError::configuration(
                "an explicit event and a transition table cannot both be given",
            )),
        }
    }
}

impl<E> Default for Binder<E>
where
    E: Clone + PartialEq + Debug + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
