//! # Dynamic broadcaster — element type checked at runtime.
//!
//! [`AnyBroadcaster`] is the type-erased rendition of
//! [`Broadcaster`](crate::Broadcaster), for callers that need one broadcaster
//! type across element types. Handles arrive as `Box<dyn Any>` and values as
//! tagged [`AnyValue`]s, so two checks the typed API gets from the compiler
//! are performed dynamically instead:
//!
//! - **Kind check** at registration: the boxed handle must contain an
//!   [`AnyEndpointRef`] (see [`erase`](crate::erase) /
//!   [`ChannelEndpoint::erased`](crate::ChannelEndpoint::erased)). Anything
//!   else is a programmer error and panics with
//!   [`CastError::InvalidEndpointKind`].
//! - **Element type check**: the first successful registration fixes the
//!   registry's element type. A later handle or published value of a
//!   different type panics with [`CastError::TypeMismatch`].
//!
//! Both are deliberate hard failures, caught at the misuse site rather than
//! deferred or ignored. Delivery semantics (snapshot, aggregate boolean,
//! join barrier) match the typed broadcaster.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::task::JoinSet;

use crate::endpoints::{AnyEndpoint, AnyEndpointRef, AnyValue, EndpointId};
use crate::error::CastError;

/// Element type fixed at first registration.
#[derive(Clone, Copy)]
struct ElementTag {
    type_id: TypeId,
    type_name: &'static str,
}

impl ElementTag {
    fn assert_matches(&self, actual_id: TypeId, actual_name: &'static str) {
        if self.type_id != actual_id {
            panic!(
                "{}",
                CastError::TypeMismatch {
                    expected: self.type_name,
                    actual: actual_name,
                }
            );
        }
    }
}

/// Registry state. Tag and membership change under one critical section so
/// two racing first registrations cannot disagree on the element type.
struct State {
    element: Option<ElementTag>,
    entries: HashMap<EndpointId, AnyEndpointRef>,
}

/// One-to-many broadcaster with a runtime-checked element type.
///
/// # Example
/// ```
/// use chancast::{AnyBroadcaster, AnyValue, ChannelEndpoint};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let bc = AnyBroadcaster::new();
/// let (ep, mut rx) = ChannelEndpoint::<String>::channel(8);
/// bc.register(Box::new(ep.erased()));
///
/// bc.publish(&AnyValue::new("hello".to_string())).await;
/// assert_eq!(rx.recv().await.as_deref(), Some("hello"));
/// # }
/// ```
pub struct AnyBroadcaster {
    state: Mutex<State>,
}

impl AnyBroadcaster {
    /// Creates an empty broadcaster with no element type established yet.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                element: None,
                entries: HashMap::new(),
            }),
        }
    }

    /// Registers a boxed endpoint handle.
    ///
    /// Idempotent on identity, like the typed `register`.
    ///
    /// # Panics
    /// - [`CastError::InvalidEndpointKind`] if the box does not contain an
    ///   [`AnyEndpointRef`].
    /// - [`CastError::TypeMismatch`] if the endpoint's element type differs
    ///   from the one fixed at first registration.
    pub fn register(&self, handle: Box<dyn Any + Send + Sync>) {
        let endpoint: AnyEndpointRef = match handle.downcast::<AnyEndpointRef>() {
            Ok(endpoint) => *endpoint,
            Err(_) => panic!("{}", CastError::InvalidEndpointKind),
        };

        let mut state = self.state.lock();
        match state.element {
            Some(tag) => {
                tag.assert_matches(endpoint.element_type(), endpoint.element_type_name())
            }
            None => {
                state.element = Some(ElementTag {
                    type_id: endpoint.element_type(),
                    type_name: endpoint.element_type_name(),
                });
            }
        }
        state.entries.insert(endpoint.endpoint_id(), endpoint);
    }

    /// Removes an endpoint handle from the registry.
    ///
    /// Returns [`CastError::NotFound`] if the handle is not currently
    /// registered. The element type stays fixed even when the registry
    /// drains.
    pub fn unregister(&self, endpoint: &dyn AnyEndpoint) -> Result<(), CastError> {
        match self.state.lock().entries.remove(&endpoint.endpoint_id()) {
            Some(_) => Ok(()),
            None => Err(CastError::NotFound),
        }
    }

    /// Offers the value to every registered endpoint without suspending.
    ///
    /// Aggregate result only, as in the typed broadcaster: `true` iff every
    /// snapshot member accepted; vacuously `true` when empty.
    ///
    /// # Panics
    /// [`CastError::TypeMismatch`] if an element type has been established
    /// and the value's tag differs from it.
    pub fn try_publish(&self, value: &AnyValue) -> bool {
        let snapshot = self.checked_snapshot(value);
        let mut accepted = true;
        for endpoint in &snapshot {
            accepted &= endpoint.try_offer_any(value);
        }
        accepted
    }

    /// Delivers the value to every registered endpoint, waiting until all of
    /// them have accepted (one delivery task per endpoint, join barrier).
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Panics
    /// Same type check as [`AnyBroadcaster::try_publish`].
    pub async fn publish(&self, value: &AnyValue) {
        let snapshot = self.checked_snapshot(value);
        if snapshot.is_empty() {
            return;
        }

        let mut offers = JoinSet::new();
        for endpoint in snapshot {
            offers.spawn(endpoint.offer_any(value.clone()));
        }
        while let Some(res) = offers.join_next().await {
            let _ = res;
        }
    }

    /// Number of currently registered endpoints.
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    /// Returns true if no endpoints are registered.
    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    /// Validates the value's tag and captures the membership atomically.
    fn checked_snapshot(&self, value: &AnyValue) -> Vec<AnyEndpointRef> {
        let state = self.state.lock();
        if let Some(tag) = state.element {
            tag.assert_matches(value.type_id(), value.type_name());
        }
        state.entries.values().cloned().collect()
    }
}

impl Default for AnyBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}
