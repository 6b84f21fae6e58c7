// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types for lifecycle-bound streams.
//!
//! This crate holds everything the stream operators in `lifespan-stream` are built on:
//!
//! - **Lifecycle stages**: [`ActivityEvent`] and [`FragmentEvent`], two closed topologies
//!   described by the [`LifecycleEvent`] trait
//! - **Transition tables**: [`TransitionTable`] maps the stage a binding starts at to the
//!   stage at which it must end ([`ActivityTransitions`], [`FragmentTransitions`], [`StageTable`])
//! - **Event matchers**: [`EventMatcher`] decides whether an emitted stage reached the target
//! - **In-band errors**: [`StreamItem`] and [`LifecycleError`]
//! - **Lifecycle feeds**: [`LifecycleSubject`] and the [`LifecycleSource`] connection seam

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod event_matcher;
pub mod lifecycle_error;
pub mod lifecycle_event;
pub mod lifecycle_mutex;
pub mod lifecycle_source;
pub mod lifecycle_subject;
pub mod stream_item;
pub mod subject_error;
pub mod transition_table;

pub use self::event_matcher::{AtOrAfter, EventMatcher, ExactMatch};
pub use self::lifecycle_error::{IntoLifecycleError, LifecycleError, Result, ResultExt};
pub use self::lifecycle_event::{ActivityEvent, FragmentEvent, LifecycleEvent};
pub use self::lifecycle_source::{from_fn, from_stream, FnSource, LifecycleSource, LifecycleStream, OnceSource};
pub use self::lifecycle_subject::LifecycleSubject;
pub use self::stream_item::StreamItem;
pub use self::subject_error::SubjectError;
pub use self::transition_table::{
    ActivityTransitions, FragmentTransitions, StageTable, TransitionTable,
};
