// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Binding a stream to a view that only signals when it is detached.
//!
//! Any value on the detach feed ends the binding, whatever it carries. An error on the feed
//! is forwarded to the bound stream, which then completes.

use crate::transformer::{defer, LifecycleTransformer};
use futures::stream::StreamExt;
use lifespan_core::LifecycleSource;
use std::sync::Arc;

/// Binds until `detaches` emits its first item.
///
/// ```rust
/// use lifespan_core::LifecycleSubject;
/// use lifespan_stream::{bind_view, ComposeExt};
/// use lifespan_test_utils::{assert_stream_ended, test_channel};
///
/// # #[tokio::main]
/// # async fn main() {
/// let detaches = LifecycleSubject::<()>::new();
/// let (_tx, source) = test_channel::<u8>();
/// let mut bound = source.compose(&bind_view(detaches.clone()));
///
/// detaches.next(()).unwrap();
/// assert_stream_ended(&mut bound, 500).await;
/// # }
/// ```
pub fn bind_view<D, L>(detaches: L) -> LifecycleTransformer
where
    L: LifecycleSource<D>,
    D: Send + 'static,
{
    let detaches = Arc::new(detaches);

    LifecycleTransformer::from_notifier(move || {
        let detaches = Arc::clone(&detaches);
        defer(move || detaches.connect().take(1).map(|item| item.map(|_| ())))
    })
}
