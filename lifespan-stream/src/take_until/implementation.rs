// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::pin::Pin;
use core::task::{Context, Poll};
use futures::Stream;
use lifespan_core::StreamItem;
use pin_project::pin_project;

/// Extension trait providing the `take_until_notified` operator for streams.
pub trait TakeUntilExt<T>: Stream<Item = StreamItem<T>> + Sized {
    /// Emits source items until `notifier` emits, then completes.
    ///
    /// See the [module-level documentation](crate::take_until) for the exact semantics.
    fn take_until_notified<N>(self, notifier: N) -> TakeUntil<Self, N>
    where
        N: Stream<Item = StreamItem<()>>;
}

impl<S, T> TakeUntilExt<T> for S
where
    S: Stream<Item = StreamItem<T>>,
{
    fn take_until_notified<N>(self, notifier: N) -> TakeUntil<Self, N>
    where
        N: Stream<Item = StreamItem<()>>,
    {
        TakeUntil::new(self, notifier)
    }
}

/// Stream returned by [`TakeUntilExt::take_until_notified`].
#[pin_project]
#[must_use = "streams do nothing unless polled"]
pub struct TakeUntil<S, N> {
    #[pin]
    source: Option<S>,
    #[pin]
    notifier: Option<N>,
}

impl<S, N> TakeUntil<S, N> {
    pub(crate) fn new(source: S, notifier: N) -> Self {
        Self {
            source: Some(source),
            notifier: Some(notifier),
        }
    }

    /// Returns `true` once the stream has terminated and released both inputs.
    pub fn is_terminated(&self) -> bool {
        self.source.is_none()
    }
}

impl<S, N, T> Stream for TakeUntil<S, N>
where
    S: Stream<Item = StreamItem<T>>,
    N: Stream<Item = StreamItem<()>>,
{
    type Item = StreamItem<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        // 1. Termination is checked first
        if let Some(notifier) = this.notifier.as_mut().as_pin_mut() {
            match notifier.poll_next(cx) {
                Poll::Ready(Some(StreamItem::Value(()))) => {
                    this.notifier.set(None);
                    this.source.set(None);
                    return Poll::Ready(None);
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    this.notifier.set(None);
                    this.source.set(None);
                    return Poll::Ready(Some(StreamItem::Error(err)));
                }
                Poll::Ready(None) => {
                    // Notifier ended without firing: the source is mirrored as is
                    this.notifier.set(None);
                }
                Poll::Pending => {}
            }
        }

        // 2. Forward the source
        let Some(source) = this.source.as_mut().as_pin_mut() else {
            return Poll::Ready(None);
        };

        match source.poll_next(cx) {
            Poll::Ready(None) => {
                this.source.set(None);
                this.notifier.set(None);
                Poll::Ready(None)
            }
            other => other,
        }
    }
}
