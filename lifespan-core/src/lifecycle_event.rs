// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lifecycle stages of an owning component.
//!
//! Two topologies are provided. Both enums are declared in canonical episode order, so the
//! derived `Ord` follows the order in which an owner emits its stages.
//!
//! ```
//! use lifespan_core::{ActivityEvent, LifecycleEvent};
//!
//! assert!(ActivityEvent::Create < ActivityEvent::Destroy);
//! assert_eq!(ActivityEvent::episode().last(), Some(&ActivityEvent::TERMINAL));
//! assert_eq!(ActivityEvent::Resume.to_string(), "RESUME");
//! ```

use crate::transition_table::{ActivityTransitions, FragmentTransitions, TransitionTable};
use core::fmt::{self, Debug, Display};
use core::hash::Hash;

/// A closed set of lifecycle stages with a fixed episode order.
pub trait LifecycleEvent:
    Copy + Eq + Ord + Hash + Debug + Display + Send + Sync + 'static
{
    /// The transition table used when a binding should infer its own end stage.
    type Table: TransitionTable<Self> + Default;

    /// The last stage of an episode. Nothing can be bound once it has been reached.
    const TERMINAL: Self;

    /// Human readable topology name, used in error messages.
    fn topology() -> &'static str;

    /// Every stage, in the order an owner emits them during one episode.
    fn episode() -> &'static [Self];

    /// Returns `true` for the terminal stage.
    fn is_terminal(&self) -> bool {
        *self == Self::TERMINAL
    }
}

/// Lifecycle of a screen-level owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActivityEvent {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
}

impl ActivityEvent {
    const EPISODE: [Self; 6] = [
        Self::Create,
        Self::Start,
        Self::Resume,
        Self::Pause,
        Self::Stop,
        Self::Destroy,
    ];
}

impl LifecycleEvent for ActivityEvent {
    type Table = ActivityTransitions;

    const TERMINAL: Self = Self::Destroy;

    fn topology() -> &'static str {
        "Activity"
    }

    fn episode() -> &'static [Self] {
        &Self::EPISODE
    }
}

impl Display for ActivityEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Create => "CREATE",
            Self::Start => "START",
            Self::Resume => "RESUME",
            Self::Pause => "PAUSE",
            Self::Stop => "STOP",
            Self::Destroy => "DESTROY",
        };
        f.write_str(tag)
    }
}

/// Lifecycle of a component hosted inside a screen-level owner.
///
/// Adds attachment and view-hierarchy stages around the screen-level ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FragmentEvent {
    Attach,
    Create,
    CreateView,
    Start,
    Resume,
    Pause,
    Stop,
    DestroyView,
    Destroy,
    Detach,
}

impl FragmentEvent {
    const EPISODE: [Self; 10] = [
        Self::Attach,
        Self::Create,
        Self::CreateView,
        Self::Start,
        Self::Resume,
        Self::Pause,
        Self::Stop,
        Self::DestroyView,
        Self::Destroy,
        Self::Detach,
    ];
}

impl LifecycleEvent for FragmentEvent {
    type Table = FragmentTransitions;

    const TERMINAL: Self = Self::Detach;

    fn topology() -> &'static str {
        "Fragment"
    }

    fn episode() -> &'static [Self] {
        &Self::EPISODE
    }
}

impl Display for FragmentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Attach => "ATTACH",
            Self::Create => "CREATE",
            Self::CreateView => "CREATE_VIEW",
            Self::Start => "START",
            Self::Resume => "RESUME",
            Self::Pause => "PAUSE",
            Self::Stop => "STOP",
            Self::DestroyView => "DESTROY_VIEW",
            Self::Destroy => "DESTROY",
            Self::Detach => "DETACH",
        };
        f.write_str(tag)
    }
}
