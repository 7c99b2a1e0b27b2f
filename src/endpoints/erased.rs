//! # Type-erased endpoints and tagged values.
//!
//! The typed [`Broadcaster`](crate::Broadcaster) fixes the element type at
//! compile time. The dynamic [`AnyBroadcaster`](crate::AnyBroadcaster)
//! instead moves the check to runtime, which needs two erased shapes:
//!
//! - [`AnyValue`] — a published value plus an explicit runtime type tag
//!   (`TypeId` and type name), so mismatches can be detected and named;
//! - [`AnyEndpoint`] — an endpoint whose element type is hidden behind the
//!   trait but still reported via [`AnyEndpoint::element_type`], so the
//!   registry can fix its element type at first registration.
//!
//! [`erase`] wraps any typed endpoint into an [`AnyEndpointRef`]. Offers on
//! the erased endpoint downcast the tagged value back to the concrete element
//! type; the broadcaster validates the tag before fan-out, so the downcast
//! inside delivery never fails in practice.

use std::any::{Any, TypeId};
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::endpoints::channel::ChannelEndpoint;
use crate::endpoints::endpoint::{Endpoint, EndpointId};

/// Shared reference to a type-erased endpoint.
pub type AnyEndpointRef = Arc<dyn AnyEndpoint>;

/// A value carrying its own runtime type tag.
///
/// Cheap to clone (the payload is behind an `Arc`); fan-out clones the
/// concrete element out of the shared payload per endpoint.
#[derive(Clone)]
pub struct AnyValue {
    payload: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl AnyValue {
    /// Wraps a concrete value, recording its type tag.
    pub fn new<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            payload: Arc::new(value),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Runtime type of the wrapped value.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Human-readable name of the wrapped type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Borrows the payload as `T`, if the tag matches.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

/// Object-safe face of an endpoint with its element type erased.
pub trait AnyEndpoint: Send + Sync {
    /// Stable identity of the underlying handle.
    fn endpoint_id(&self) -> EndpointId;

    /// Element type the underlying endpoint accepts.
    fn element_type(&self) -> TypeId;

    /// Human-readable name of the element type (for mismatch messages).
    fn element_type_name(&self) -> &'static str;

    /// Non-blocking delivery of a tagged value. A value whose tag does not
    /// match the element type is a decline.
    fn try_offer_any(&self, value: &AnyValue) -> bool;

    /// Blocking delivery of a tagged value. A mismatched tag completes
    /// immediately without delivering.
    fn offer_any(&self, value: AnyValue) -> BoxFuture<'static, ()>;
}

/// Erasing adapter over a typed endpoint.
struct ErasedEndpoint<T: Send + 'static> {
    inner: Arc<dyn Endpoint<T>>,
}

impl<T: Clone + Send + Sync + 'static> AnyEndpoint for ErasedEndpoint<T> {
    fn endpoint_id(&self) -> EndpointId {
        self.inner.endpoint_id()
    }

    fn element_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn element_type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn try_offer_any(&self, value: &AnyValue) -> bool {
        match value.downcast_ref::<T>() {
            Some(v) => self.inner.try_offer(v.clone()),
            None => false,
        }
    }

    fn offer_any(&self, value: AnyValue) -> BoxFuture<'static, ()> {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            if let Some(v) = value.downcast_ref::<T>() {
                inner.offer(v.clone()).await;
            }
        })
    }
}

/// Erases a typed endpoint into an [`AnyEndpointRef`].
pub fn erase<T: Clone + Send + Sync + 'static>(endpoint: Arc<dyn Endpoint<T>>) -> AnyEndpointRef {
    Arc::new(ErasedEndpoint { inner: endpoint })
}

impl<T: Clone + Send + Sync + 'static> ChannelEndpoint<T> {
    /// Erases this handle for use with an [`AnyBroadcaster`](crate::AnyBroadcaster).
    pub fn erased(&self) -> AnyEndpointRef {
        let endpoint: Arc<dyn Endpoint<T>> = Arc::new(self.clone());
        erase(endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_value_carries_its_tag() {
        let v = AnyValue::new(42u32);
        assert_eq!(v.type_id(), TypeId::of::<u32>());
        assert_eq!(v.type_name(), "u32");
        assert_eq!(v.downcast_ref::<u32>(), Some(&42));
        assert!(v.downcast_ref::<i64>().is_none());
    }

    #[tokio::test]
    async fn erased_endpoint_preserves_identity_and_type() {
        let (ep, mut rx) = ChannelEndpoint::<String>::channel(1);
        let erased = ep.erased();

        assert_eq!(erased.endpoint_id(), ep.id());
        assert_eq!(erased.element_type(), TypeId::of::<String>());

        assert!(erased.try_offer_any(&AnyValue::new("hi".to_string())));
        assert_eq!(rx.recv().await.as_deref(), Some("hi"));
    }

    #[tokio::test]
    async fn mismatched_tag_is_a_decline() {
        let (ep, mut rx) = ChannelEndpoint::<String>::channel(1);
        let erased = ep.erased();

        assert!(!erased.try_offer_any(&AnyValue::new(5u8)));
        erased.offer_any(AnyValue::new(5u8)).await; // no delivery, no hang
        assert!(rx.try_recv().is_err());
    }
}
