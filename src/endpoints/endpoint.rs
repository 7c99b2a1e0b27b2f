//! # Core endpoint trait
//!
//! `Endpoint` is the extension point for plugging delivery targets into a
//! [`Broadcaster`](crate::Broadcaster). An endpoint is a channel-like handle:
//! it can be offered one value non-blockingly (`try_offer`) or blockingly
//! (`offer`), and it carries a stable identity so the registry can tell
//! whether two handles refer to the same underlying consumer.
//!
//! ## Contract
//! - `try_offer` must **never** suspend; a consumer that cannot take the
//!   value right now is a decline, not a wait.
//! - `offer` may suspend the calling task until the consumer accepts. A
//!   consumer that has gone away cannot be waited for; `offer` completes and
//!   the value is dropped.
//! - Clones of one handle must report the same [`EndpointId`], so
//!   re-registering a clone collapses to a single registry entry.
//!
//! ## Example (skeleton)
//! ```rust
//! use async_trait::async_trait;
//! use chancast::{Endpoint, EndpointId};
//!
//! struct Discard(EndpointId);
//!
//! #[async_trait]
//! impl Endpoint<u32> for Discard {
//!     fn endpoint_id(&self) -> EndpointId { self.0 }
//!     fn try_offer(&self, _value: u32) -> bool { true }
//!     async fn offer(&self, _value: u32) {}
//! }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

/// Global counter backing [`EndpointId::next`].
static NEXT_ENDPOINT_ID: AtomicUsize = AtomicUsize::new(0);

/// Stable identity of an endpoint handle.
///
/// Two handles are the same registry entry iff their ids are equal. Ids are
/// drawn from a process-wide counter, so identity is explicit rather than
/// derived from pointer or structural equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointId(usize);

impl EndpointId {
    /// Allocates a fresh id.
    ///
    /// Built-in handles call this once at construction and share the id
    /// across clones.
    pub fn next() -> Self {
        Self(NEXT_ENDPOINT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Contract for broadcast delivery targets.
///
/// Called from the publishing task (`try_offer`) or from a per-endpoint
/// delivery task spawned by `publish` (`offer`). Implementations should avoid
/// blocking the async runtime (prefer async waits in `offer`).
#[async_trait]
pub trait Endpoint<T: Send + 'static>: Send + Sync {
    /// Stable identity of this handle.
    fn endpoint_id(&self) -> EndpointId;

    /// Non-blocking delivery attempt. Returns `false` if the consumer
    /// declined (full or gone).
    fn try_offer(&self, value: T) -> bool;

    /// Blocking delivery. May suspend until the consumer accepts.
    async fn offer(&self, value: T);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = EndpointId::next();
        let b = EndpointId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn ids_are_copyable_keys() {
        let id = EndpointId::next();
        let copy = id;
        assert_eq!(id, copy);

        let mut set = std::collections::HashSet::new();
        assert!(set.insert(id));
        assert!(!set.insert(copy));
    }
}
