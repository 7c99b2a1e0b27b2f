//! # Typed broadcaster — one value in, every registered endpoint out.
//!
//! [`Broadcaster<T>`] owns an identity-keyed registry of [`Endpoint<T>`]
//! handles and fans a published value out to all of them.
//!
//! ## Architecture
//! ```text
//! publish(v)
//!     │  snapshot registry (lock held only here)
//!     ├──► task 1 ──► endpoint1.offer(v)   (may wait for consumer)
//!     ├──► task 2 ──► endpoint2.offer(v)
//!     └──► task N ──► endpointN.offer(v)
//!          │
//!          └── join barrier: publish returns after the slowest offer
//!
//! try_publish(v)
//!     │  snapshot registry
//!     └──► endpoint1.try_offer(v) & ... & endpointN.try_offer(v)  (inline,
//!          never suspends; aggregate boolean, every member is attempted)
//! ```
//!
//! ## Rules
//! - **Snapshot semantics**: membership is captured atomically at the start
//!   of a publish; endpoints registered later are not contacted, endpoints
//!   removed later are tolerated as already-gone.
//! - **No cross-endpoint ordering**: deliveries to different endpoints race.
//! - **No per-offer timeout**: one stuck endpoint stalls `publish`
//!   indefinitely. Callers needing a deadline wrap the call themselves.
//! - **Structured fan-out**: delivery tasks live in a `JoinSet`; dropping an
//!   unfinished `publish` future aborts them instead of leaking them.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::broadcast::registry::Registry;
use crate::endpoints::Endpoint;
use crate::error::CastError;

/// One-to-many broadcaster over a fixed element type `T`.
///
/// All concurrency safety is internal: any number of tasks may call any
/// operation on one shared instance without external synchronization.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use chancast::{Broadcaster, ChannelEndpoint};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bc = Broadcaster::new();
/// let (ep, mut rx) = ChannelEndpoint::channel(8);
/// bc.register(Arc::new(ep.clone()));
///
/// bc.publish(&42).await;
/// assert_eq!(rx.recv().await, Some(42));
///
/// bc.unregister(&ep).unwrap();
/// assert!(bc.is_empty());
/// # }
/// ```
pub struct Broadcaster<T: Send + 'static> {
    registry: Registry<Arc<dyn Endpoint<T>>>,
}

impl<T: Send + 'static> Broadcaster<T> {
    /// Creates an empty broadcaster.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Registers an endpoint handle.
    ///
    /// Idempotent on identity: registering a handle (or a clone of it) twice
    /// leaves exactly one registry entry, so a later publish delivers once.
    pub fn register(&self, endpoint: Arc<dyn Endpoint<T>>) {
        self.registry.insert(endpoint.endpoint_id(), endpoint);
    }

    /// Removes an endpoint handle from the registry.
    ///
    /// After this returns, no publish that starts later will visit the
    /// endpoint. Returns [`CastError::NotFound`] if the handle is not
    /// currently registered.
    pub fn unregister(&self, endpoint: &dyn Endpoint<T>) -> Result<(), CastError> {
        self.registry.remove(endpoint.endpoint_id())
    }

    /// Number of currently registered endpoints.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if no endpoints are registered.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl<T: Clone + Send + 'static> Broadcaster<T> {
    /// Offers a clone of `value` to every registered endpoint without
    /// suspending.
    ///
    /// Returns `true` only if **every** snapshot member accepted; `false` if
    /// any declined. Every member is attempted even after a decline. The
    /// caller learns only the aggregate — not which endpoints declined. With
    /// zero registered endpoints the result is vacuously `true`.
    pub fn try_publish(&self, value: &T) -> bool {
        let snapshot = self.registry.snapshot();
        let mut accepted = true;
        for endpoint in &snapshot {
            accepted &= endpoint.try_offer(value.clone());
        }
        accepted
    }

    /// Delivers a clone of `value` to every registered endpoint, waiting
    /// until all of them have accepted.
    ///
    /// Each snapshot member is offered the value on its own delivery task;
    /// the call returns once all offers complete, so total latency is the
    /// maximum of the individual offer latencies, not their sum. With zero
    /// registered endpoints the call returns immediately.
    ///
    /// Must be called from within a tokio runtime (delivery tasks are
    /// spawned on it).
    pub async fn publish(&self, value: &T) {
        let snapshot = self.registry.snapshot();
        if snapshot.is_empty() {
            return;
        }

        let mut offers = JoinSet::new();
        for endpoint in snapshot {
            let value = value.clone();
            offers.spawn(async move { endpoint.offer(value).await });
        }
        // Join barrier. A panic inside an offer marks that delivery failed;
        // the remaining deliveries still complete.
        while let Some(res) = offers.join_next().await {
            let _ = res;
        }
    }
}

impl<T: Send + 'static> Default for Broadcaster<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::ChannelEndpoint;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    fn register_channel(
        bc: &Broadcaster<u64>,
        capacity: usize,
    ) -> (ChannelEndpoint<u64>, tokio::sync::mpsc::Receiver<u64>) {
        let (ep, rx) = ChannelEndpoint::channel(capacity);
        bc.register(Arc::new(ep.clone()));
        (ep, rx)
    }

    #[tokio::test]
    async fn try_publish_delivers_to_all_accepting_endpoints() {
        let bc = Broadcaster::new();
        let mut receivers = Vec::new();
        for _ in 0..3 {
            let (_ep, rx) = register_channel(&bc, 1);
            receivers.push(rx);
        }

        assert!(bc.try_publish(&7));

        for rx in &mut receivers {
            assert_eq!(rx.try_recv(), Ok(7));
            assert!(rx.try_recv().is_err(), "exactly one value per endpoint");
        }
    }

    #[test]
    fn try_publish_on_empty_registry_is_vacuously_true() {
        let bc = Broadcaster::<u64>::new();
        assert!(bc.try_publish(&1));
    }

    #[tokio::test]
    async fn try_publish_reports_false_when_any_endpoint_declines() {
        let bc = Broadcaster::new();
        let (full_ep, mut full_rx) = register_channel(&bc, 1);
        let (_open_ep, mut open_rx) = register_channel(&bc, 1);

        assert!(full_ep.try_offer(0)); // occupy the single slot

        assert!(!bc.try_publish(&7));

        // The decline is aggregate-only; the open endpoint was still offered.
        assert_eq!(open_rx.try_recv(), Ok(7));
        assert_eq!(full_rx.try_recv(), Ok(0));
        assert!(full_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn reregistering_same_handle_keeps_one_entry() {
        let bc = Broadcaster::new();
        let (ep, mut rx) = ChannelEndpoint::channel(4);

        bc.register(Arc::new(ep.clone()));
        bc.register(Arc::new(ep.clone()));
        assert_eq!(bc.len(), 1);

        assert!(bc.try_publish(&9));
        assert_eq!(rx.try_recv(), Ok(9));
        assert!(rx.try_recv().is_err(), "no double delivery");
    }

    #[tokio::test]
    async fn unregister_absent_handle_is_not_found() {
        let bc = Broadcaster::new();
        let (ep, _rx) = ChannelEndpoint::<u64>::channel(1);

        assert_eq!(bc.unregister(&ep), Err(CastError::NotFound));

        bc.register(Arc::new(ep.clone()));
        assert_eq!(bc.unregister(&ep), Ok(()));
        assert!(bc.is_empty());
        assert_eq!(bc.unregister(&ep), Err(CastError::NotFound));
    }

    #[tokio::test]
    async fn unregistered_endpoint_is_not_visited() {
        let bc = Broadcaster::new();
        let (gone_ep, mut gone_rx) = register_channel(&bc, 1);
        let (_kept_ep, mut kept_rx) = register_channel(&bc, 1);

        bc.unregister(&gone_ep).unwrap();
        assert!(bc.try_publish(&5));

        assert!(gone_rx.try_recv().is_err());
        assert_eq!(kept_rx.try_recv(), Ok(5));
    }

    #[tokio::test]
    async fn publish_on_empty_registry_returns_immediately() {
        let bc = Broadcaster::<u64>::new();
        bc.publish(&1).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn publish_waits_for_the_slowest_consumer() {
        let bc = Broadcaster::new();
        let started = Arc::new(AtomicUsize::new(0));
        let mut consumers = Vec::new();

        for _ in 0..10 {
            let (ep, mut rx) = register_channel(&bc, 1);
            // Occupy the single slot so the offer must wait for the consumer.
            assert!(ep.try_offer(0));

            let started = Arc::clone(&started);
            consumers.push(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                started.fetch_add(1, Ordering::SeqCst);
                assert_eq!(rx.recv().await, Some(0));
                assert_eq!(rx.recv().await, Some(1));
                assert!(rx.try_recv().is_err(), "exactly one published value");
            }));
        }

        let begin = Instant::now();
        bc.publish(&1).await;

        // Every offer had to wait for its consumer to start draining.
        assert!(begin.elapsed() >= Duration::from_millis(45));
        assert_eq!(started.load(Ordering::SeqCst), 10);

        for consumer in consumers {
            consumer.await.unwrap();
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn publish_observes_registry_snapshot() {
        let bc = Arc::new(Broadcaster::new());
        let (slow_ep, mut slow_rx) = register_channel(&bc, 1);
        assert!(slow_ep.try_offer(0)); // publish will block on this endpoint

        let publisher = tokio::spawn({
            let bc = Arc::clone(&bc);
            async move { bc.publish(&1).await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Registered mid-publish: not part of the snapshot, never contacted.
        let (_late_ep, mut late_rx) = register_channel(&bc, 1);

        assert_eq!(slow_rx.recv().await, Some(0));
        assert_eq!(slow_rx.recv().await, Some(1));
        publisher.await.unwrap();

        assert!(late_rx.try_recv().is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_mutation_never_corrupts_the_registry() {
        let bc = Arc::new(Broadcaster::<u64>::new());
        let mut workers = Vec::new();

        for _ in 0..100 {
            let bc = Arc::clone(&bc);
            workers.push(tokio::spawn(async move {
                let (ep, mut rx) = ChannelEndpoint::channel(64);
                let drain = tokio::spawn(async move { while rx.recv().await.is_some() {} });

                for i in 0..250u64 {
                    match i % 5 {
                        0 | 4 => bc.register(Arc::new(ep.clone())),
                        1 => {
                            let _ = bc.try_publish(&i);
                        }
                        2 => bc.publish(&i).await,
                        _ => {
                            let _ = bc.unregister(&ep);
                        }
                    }
                    if i % 16 == 0 {
                        tokio::task::yield_now().await;
                    }
                }

                let _ = bc.unregister(&ep);
                // Dropping the receiver closes the channel, so any in-flight
                // offer from another worker's publish completes immediately.
                drain.abort();
            }));
        }

        for worker in workers {
            worker.await.unwrap();
        }
        assert!(bc.is_empty());
        assert_eq!(bc.len(), 0);
    }
}
