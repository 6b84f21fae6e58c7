// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use futures::stream::{Stream, StreamExt};
use futures::task::{self, ArcWake};
use lifespan_core::lifecycle_mutex::Mutex;
use lifespan_core::{LifecycleSource, LifecycleStream, StreamItem};
use std::collections::VecDeque;
use std::sync::Arc;

struct Slot<E> {
    id: u64,
    queue: VecDeque<StreamItem<E>>,
    finished: bool,
}

/// Wakers of the subscribers waiting for the upstream.
///
/// Kept outside the hub lock: the upstream may wake it while the hub is locked for a poll.
#[derive(Default)]
struct Waiters {
    pending: Mutex<Vec<(u64, Waker)>>,
}

impl Waiters {
    fn register(&self, id: u64, waker: &Waker) {
        let mut pending = self.pending.lock();
        match pending.iter_mut().find(|(slot, _)| *slot == id) {
            Some((_, registered)) => {
                if !registered.will_wake(waker) {
                    registered.clone_from(waker);
                }
            }
            None => pending.push((id, waker.clone())),
        }
    }

    fn remove(&self, id: u64) {
        self.pending.lock().retain(|(slot, _)| *slot != id);
    }

    /// Wakes every waiting subscriber except `origin`, which is already running.
    fn wake_except(&self, origin: Option<u64>) {
        let woken: Vec<Waker> = {
            let mut pending = self.pending.lock();
            let (keep, wake) = pending
                .drain(..)
                .partition::<Vec<_>, _>(|(slot, _)| Some(*slot) == origin);
            *pending = keep;
            wake.into_iter().map(|(_, waker)| waker).collect()
        };
        woken.into_iter().for_each(Waker::wake);
    }
}

impl ArcWake for Waiters {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.wake_except(None);
    }
}

struct Hub<E> {
    upstream: Option<LifecycleStream<E>>,
    waiters: Arc<Waiters>,
    upstream_waker: Waker,
    latest: Option<E>,
    polled: bool,
    slots: Vec<Slot<E>>,
    next_id: u64,
    connections: usize,
}

impl<E: Clone> Hub<E> {
    fn live(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.finished).count()
    }

    fn slot_mut(&mut self, id: u64) -> Option<&mut Slot<E>> {
        self.slots.iter_mut().find(|slot| slot.id == id)
    }

    /// Queues `item` for every live subscriber and wakes all of them except `origin`.
    fn broadcast(&mut self, item: &StreamItem<E>, origin: Option<u64>) {
        if let StreamItem::Value(stage) = item {
            self.latest = Some(stage.clone());
        }
        for slot in self.slots.iter_mut().filter(|slot| !slot.finished) {
            slot.queue.push_back(item.clone());
        }
        self.waiters.wake_except(origin);
    }

    /// Ends the current connection: live subscribers drain their queues and complete.
    fn finish(&mut self, origin: Option<u64>) -> Option<LifecycleStream<E>> {
        for slot in &mut self.slots {
            slot.finished = true;
        }
        self.waiters.wake_except(origin);
        self.upstream.take()
    }

    /// Polls the upstream on behalf of every subscriber: a new stage wakes all of them.
    fn poll_upstream(&mut self) -> Poll<Option<StreamItem<E>>> {
        let mut cx = Context::from_waker(&self.upstream_waker);
        match self.upstream.as_mut() {
            Some(upstream) => upstream.as_mut().poll_next(&mut cx),
            None => Poll::Ready(None),
        }
    }

    /// Pulls everything the open connection already holds, so `latest` is current.
    fn catch_up(&mut self) -> Option<LifecycleStream<E>> {
        let mut released = None;

        while self.upstream.is_some() {
            match self.poll_upstream() {
                Poll::Ready(Some(StreamItem::Value(stage))) => {
                    self.broadcast(&StreamItem::Value(stage), None);
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    self.broadcast(&StreamItem::Error(err), None);
                    released = self.finish(None);
                }
                Poll::Ready(None) => {
                    released = self.finish(None);
                }
                Poll::Pending => break,
            }
        }
        released
    }
}

/// A lifecycle feed shared by reference-counted subscribers.
///
/// See the [module-level documentation](crate::share) for details.
pub struct SharedLifecycle<E> {
    source: Arc<dyn LifecycleSource<E>>,
    hub: Arc<Mutex<Hub<E>>>,
}

impl<E> Clone for SharedLifecycle<E> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            hub: Arc::clone(&self.hub),
        }
    }
}

impl<E> SharedLifecycle<E>
where
    E: Clone + Send + 'static,
{
    /// Wraps a lifecycle source. Nothing connects until the first [`subscribe`](Self::subscribe).
    pub fn new(source: impl LifecycleSource<E>) -> Self {
        let waiters = Arc::new(Waiters::default());
        Self {
            source: Arc::new(source),
            hub: Arc::new(Mutex::new(Hub {
                upstream: None,
                upstream_waker: task::waker(Arc::clone(&waiters)),
                waiters,
                latest: None,
                polled: false,
                slots: Vec::new(),
                next_id: 0,
                connections: 0,
            })),
        }
    }

    /// Attaches a new subscriber, connecting to the raw feed if no connection is open.
    ///
    /// A subscriber joining a connection that has already been polled starts from the
    /// latest stage that connection carried.
    pub fn subscribe(&self) -> SharedSubscription<E> {
        let [subscription] = self.attach();
        subscription
    }

    /// Attaches two subscribers at once. Both observe exactly the same sequence.
    pub fn subscribe_pair(&self) -> (SharedSubscription<E>, SharedSubscription<E>) {
        let [first, second] = self.attach();
        (first, second)
    }

    fn attach<const N: usize>(&self) -> [SharedSubscription<E>; N] {
        let mut hub = self.hub.lock();

        let released = if hub.upstream.is_some() && hub.polled {
            hub.catch_up()
        } else {
            None
        };

        if hub.upstream.is_none() {
            hub.upstream = Some(self.source.connect());
            hub.latest = None;
            hub.polled = false;
            hub.connections += 1;
            debug!("shared lifecycle connected (connection #{})", hub.connections);
        }

        let subscriptions = core::array::from_fn(|_| {
            let id = hub.next_id;
            hub.next_id += 1;
            let queue = hub.latest.iter().cloned().map(StreamItem::Value).collect();
            hub.slots.push(Slot {
                id,
                queue,
                finished: false,
            });
            SharedSubscription {
                id,
                hub: Arc::clone(&self.hub),
            }
        });
        drop(hub);
        drop(released);

        subscriptions
    }

    /// Number of subscribers that can still receive emissions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.hub.lock().live()
    }

    /// Returns `true` while a connection to the raw feed is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.hub.lock().upstream.is_some()
    }

    /// Total number of connections made to the raw feed so far.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.hub.lock().connections
    }
}

impl<E> LifecycleSource<E> for SharedLifecycle<E>
where
    E: Clone + Send + 'static,
{
    fn connect(&self) -> LifecycleStream<E> {
        self.subscribe().boxed()
    }
}

/// One subscriber of a [`SharedLifecycle`].
///
/// Dropping it detaches the subscriber; dropping the last live one releases the raw feed.
pub struct SharedSubscription<E: Clone> {
    id: u64,
    hub: Arc<Mutex<Hub<E>>>,
}

impl<E: Clone> Stream for SharedSubscription<E> {
    type Item = StreamItem<E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let id = self.id;
        let mut guard = self.hub.lock();
        let hub = &mut *guard;
        let mut released = None;

        let result = loop {
            match hub.slot_mut(id) {
                None => break Poll::Ready(None),
                Some(slot) => {
                    if let Some(item) = slot.queue.pop_front() {
                        break Poll::Ready(Some(item));
                    }
                    if slot.finished {
                        break Poll::Ready(None);
                    }
                }
            }

            hub.waiters.register(id, cx.waker());
            hub.polled = true;
            match hub.poll_upstream() {
                Poll::Ready(Some(StreamItem::Value(stage))) => {
                    hub.broadcast(&StreamItem::Value(stage), Some(id));
                }
                Poll::Ready(Some(StreamItem::Error(err))) => {
                    hub.broadcast(&StreamItem::Error(err), Some(id));
                    released = hub.finish(Some(id));
                }
                Poll::Ready(None) => {
                    released = hub.finish(Some(id));
                }
                Poll::Pending => break Poll::Pending,
            }
        };

        drop(guard);
        drop(released);
        result
    }
}

impl<E: Clone> Drop for SharedSubscription<E> {
    fn drop(&mut self) {
        let mut guard = self.hub.lock();
        let hub = &mut *guard;
        hub.slots.retain(|slot| slot.id != self.id);
        hub.waiters.remove(self.id);

        let released = if hub.live() == 0 {
            hub.upstream.take()
        } else {
            None
        };
        drop(guard);

        if released.is_some() {
            debug!("shared lifecycle released, no subscribers left");
        }
    }
}
