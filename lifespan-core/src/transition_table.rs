// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Transition tables: the stage a binding must end at, given the stage it started at.
//!
//! Creation stages map to their matching destruction stage, and the two halves of a
//! visibility window (`RESUME`/`PAUSE`, `START`/`STOP`) map to the closing boundary, so a
//! binding made anywhere inside a window ends when that window closes.
//!
//! Looking up the terminal stage fails with
//! [`LifecycleError::OutsideLifecycle`]: the owner is already gone and there is no later
//! point at which the binding could safely end.
//!
//! # Example
//!
//! ```
//! use lifespan_core::{ActivityEvent, ActivityTransitions, TransitionTable};
//!
//! let table = ActivityTransitions;
//! assert_eq!(
//!     table.termination_stage_for(&ActivityEvent::Resume).unwrap(),
//!     ActivityEvent::Pause
//! );
//! ```

use crate::lifecycle_error::{LifecycleError, Result};
use crate::lifecycle_event::{ActivityEvent, FragmentEvent, LifecycleEvent};
use core::fmt::{Debug, Display};
use core::hash::Hash;
use std::collections::HashMap;
use std::sync::Arc;

/// Maps a starting stage to the stage at which a binding made there must end.
pub trait TransitionTable<E>: Send + Sync + 'static {
    /// Returns the termination stage for a binding that starts at `start`.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::OutsideLifecycle`] when `start` is the terminal stage
    /// - [`LifecycleError::UnsupportedStage`] when the table has no entry for `start`
    fn termination_stage_for(&self, start: &E) -> Result<E>;
}

impl<E, T> TransitionTable<E> for Arc<T>
where
    T: TransitionTable<E> + ?Sized,
{
    fn termination_stage_for(&self, start: &E) -> Result<E> {
        (**self).termination_stage_for(start)
    }
}

/// Transition table for [`ActivityEvent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityTransitions;

impl TransitionTable<ActivityEvent> for ActivityTransitions {
    fn termination_stage_for(&self, start: &ActivityEvent) -> Result<ActivityEvent> {
        match start {
            ActivityEvent::Create => Ok(ActivityEvent::Destroy),
            ActivityEvent::Start => Ok(ActivityEvent::Stop),
            ActivityEvent::Resume => Ok(ActivityEvent::Pause),
            ActivityEvent::Pause => Ok(ActivityEvent::Stop),
            ActivityEvent::Stop => Ok(ActivityEvent::Destroy),
            ActivityEvent::Destroy => Err(LifecycleError::outside_lifecycle(
                ActivityEvent::topology(),
            )),
        }
    }
}

/// Transition table for [`FragmentEvent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FragmentTransitions;

impl TransitionTable<FragmentEvent> for FragmentTransitions {
    fn termination_stage_for(&self, start: &FragmentEvent) -> Result<FragmentEvent> {
        match start {
            FragmentEvent::Attach => Ok(FragmentEvent::Detach),
            FragmentEvent::Create => Ok(FragmentEvent::Destroy),
            FragmentEvent::CreateView => Ok(FragmentEvent::DestroyView),
            FragmentEvent::Start => Ok(FragmentEvent::Stop),
            FragmentEvent::Resume => Ok(FragmentEvent::Pause),
            FragmentEvent::Pause => Ok(FragmentEvent::Stop),
            FragmentEvent::Stop => Ok(FragmentEvent::DestroyView),
            FragmentEvent::DestroyView => Ok(FragmentEvent::Destroy),
            FragmentEvent::Destroy => Ok(FragmentEvent::Detach),
            FragmentEvent::Detach => Err(LifecycleError::outside_lifecycle(
                FragmentEvent::topology(),
            )),
        }
    }
}

/// A data-driven table for lifecycles that are not one of the built-in topologies.
///
/// ```
/// use lifespan_core::{StageTable, TransitionTable};
///
/// let table = StageTable::new("Session", "closed")
///     .with("opened", "closed")
///     .with("active", "idle");
///
/// assert_eq!(table.termination_stage_for(&"active").unwrap(), "idle");
/// assert!(table.termination_stage_for(&"closed").unwrap_err().is_outside_lifecycle());
/// assert!(table.termination_stage_for(&"idle").unwrap_err().is_fatal());
/// ```
#[derive(Debug, Clone)]
pub struct StageTable<E> {
    topology: &'static str,
    terminal: E,
    transitions: HashMap<E, E>,
}

impl<E> StageTable<E>
where
    E: Clone + Eq + Hash,
{
    /// Creates an empty table for the named topology ending at `terminal`.
    pub fn new(topology: &'static str, terminal: E) -> Self {
        Self {
            topology,
            terminal,
            transitions: HashMap::new(),
        }
    }

    /// Adds the termination stage for bindings starting at `start`.
    #[must_use]
    pub fn with(mut self, start: E, end: E) -> Self {
        self.transitions.insert(start, end);
        self
    }

    /// Builds a table mirroring a topology's built-in table over its whole episode.
    pub fn from_topology() -> Self
    where
        E: LifecycleEvent,
    {
        let table = E::Table::default();
        E::episode()
            .iter()
            .filter(|stage| !stage.is_terminal())
            .filter_map(|stage| {
                table
                    .termination_stage_for(stage)
                    .ok()
                    .map(|end| (*stage, end))
            })
            .fold(Self::new(E::topology(), E::TERMINAL), |acc, (start, end)| {
                acc.with(start, end)
            })
    }
}

impl<E> TransitionTable<E> for StageTable<E>
where
    E: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static,
{
    fn termination_stage_for(&self, start: &E) -> Result<E> {
        if *start == self.terminal {
            return Err(LifecycleError::outside_lifecycle(self.topology));
        }

        self.transitions
            .get(start)
            .cloned()
            .ok_or_else(|| LifecycleError::unsupported_stage(start))
    }
}
