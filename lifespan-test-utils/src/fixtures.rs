// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lifecycle owners positioned inside their episode.

use lifespan_core::{LifecycleEvent, LifecycleSubject};

/// Stages of the episode up to and including `stage`.
pub fn episode_through<E: LifecycleEvent>(stage: E) -> Vec<E> {
    E::episode()
        .iter()
        .copied()
        .take_while(|candidate| *candidate <= stage)
        .collect()
}

/// Stages of the episode strictly after `stage`.
pub fn episode_after<E: LifecycleEvent>(stage: E) -> Vec<E> {
    E::episode()
        .iter()
        .copied()
        .filter(|candidate| *candidate > stage)
        .collect()
}

/// A subject that has already emitted every stage up to and including `stage`.
///
/// ```rust
/// use lifespan_core::ActivityEvent;
/// use lifespan_test_utils::fixtures::subject_at;
///
/// let owner = subject_at(ActivityEvent::Resume);
/// assert_eq!(owner.latest(), Some(ActivityEvent::Resume));
/// ```
pub fn subject_at<E: LifecycleEvent>(stage: E) -> LifecycleSubject<E> {
    let subject = LifecycleSubject::new();
    for step in episode_through(stage) {
        // A fresh subject is open, so this cannot fail
        let _ = subject.next(step);
    }
    subject
}
