// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Policies deciding whether an emitted stage reached the binding's target stage.
//!
//! The binders default to [`ExactMatch`]. [`AtOrAfter`] is meant for ordinal lifecycles,
//! where an owner may jump past the target without emitting it.

use std::sync::Arc;

/// Compares an emitted lifecycle stage against the target stage.
pub trait EventMatcher<E>: Send + Sync + 'static {
    /// Returns `true` when `candidate` should end the binding aimed at `target`.
    fn matches(&self, candidate: &E, target: &E) -> bool;
}

impl<E, M> EventMatcher<E> for Arc<M>
where
    M: EventMatcher<E> + ?Sized,
{
    fn matches(&self, candidate: &E, target: &E) -> bool {
        (**self).matches(candidate, target)
    }
}

/// Value equality.
///
/// ```
/// use lifespan_core::{ActivityEvent, EventMatcher, ExactMatch};
///
/// assert!(ExactMatch.matches(&ActivityEvent::Stop, &ActivityEvent::Stop));
/// assert!(!ExactMatch.matches(&ActivityEvent::Destroy, &ActivityEvent::Stop));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatch;

impl<E: PartialEq> EventMatcher<E> for ExactMatch {
    fn matches(&self, candidate: &E, target: &E) -> bool {
        candidate == target
    }
}

/// Any stage ordered at or after the target.
///
/// ```
/// use lifespan_core::{ActivityEvent, AtOrAfter, EventMatcher};
///
/// assert!(AtOrAfter.matches(&ActivityEvent::Destroy, &ActivityEvent::Stop));
/// assert!(!AtOrAfter.matches(&ActivityEvent::Pause, &ActivityEvent::Stop));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AtOrAfter;

impl<E: PartialOrd> EventMatcher<E> for AtOrAfter {
    fn matches(&self, candidate: &E, target: &E) -> bool {
        candidate >= target
    }
}
