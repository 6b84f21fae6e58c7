// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the binders, the extension traits and the core types.
//!
//! ```
//! use lifespan_stream::prelude::*;
//!
//! let owner = LifecycleOwner::<ActivityEvent>::new();
//! let _until_pause = owner.bind_until_event(ActivityEvent::Pause);
//! ```

pub use crate::bind_lifecycle::{bind_activity, bind_fragment, bind_lifecycle};
pub use crate::bind_until_event::{
    bind_until_activity_event, bind_until_event, bind_until_fragment_event,
};
pub use crate::bind_view::bind_view;
pub use crate::binder::Binder;
pub use crate::provider::{LifecycleOwner, LifecycleProvider};
pub use crate::share::SharedLifecycle;
pub use crate::take_until::TakeUntilExt;
pub use crate::transformer::{ComposeExt, LifecycleTransformer};
pub use lifespan_core::{
    ActivityEvent, FragmentEvent, LifecycleError, LifecycleEvent, LifecycleSource,
    LifecycleSubject, StreamItem,
};
