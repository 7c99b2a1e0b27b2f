//! # Built-in endpoint over a tokio mpsc channel.
//!
//! [`ChannelEndpoint`] adapts a [`tokio::sync::mpsc::Sender`] to the
//! [`Endpoint`] contract:
//! - `try_offer` maps to `try_send` (a full or closed channel is a decline);
//! - `offer` maps to `send().await` (waits for queue space; completes
//!   immediately if the receiver is gone, dropping the value).
//!
//! The wrapper assigns an [`EndpointId`] at construction. Clones share the
//! id, so a clone re-registered on the same broadcaster collapses to one
//! entry. Wrapping the same sender twice produces two distinct endpoints —
//! identity belongs to the handle, not to the channel behind it.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::endpoints::endpoint::{Endpoint, EndpointId};

/// Endpoint handle delivering values into a bounded mpsc channel.
pub struct ChannelEndpoint<T> {
    id: EndpointId,
    tx: mpsc::Sender<T>,
}

impl<T> ChannelEndpoint<T> {
    /// Wraps an existing sender as an endpoint handle.
    pub fn new(tx: mpsc::Sender<T>) -> Self {
        Self {
            id: EndpointId::next(),
            tx,
        }
    }

    /// Creates a fresh channel of the given capacity and returns the endpoint
    /// handle together with the consumer side.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<T>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Stable identity of this handle (shared by clones).
    pub fn id(&self) -> EndpointId {
        self.id
    }
}

// Manual impl: clones must keep the id, and `T: Clone` is not required.
impl<T> Clone for ChannelEndpoint<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            tx: self.tx.clone(),
        }
    }
}

#[async_trait]
impl<T: Send + 'static> Endpoint<T> for ChannelEndpoint<T> {
    fn endpoint_id(&self) -> EndpointId {
        self.id
    }

    fn try_offer(&self, value: T) -> bool {
        self.tx.try_send(value).is_ok()
    }

    async fn offer(&self, value: T) {
        // A closed channel means the consumer is gone; nothing to wait for.
        let _ = self.tx.send(value).await;
    }
}
