use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;

use crate::endpoints::endpoint::{Endpoint, EndpointId};

/// Base endpoint that accepts every value and logs it to stdout.
///
/// Enabled via the `logging` feature. Useful for demos and debugging.
pub struct LogEndpoint<T> {
    id: EndpointId,
    _marker: PhantomData<fn(T)>,
}

impl<T> LogEndpoint<T> {
    /// Creates a logging endpoint with a fresh identity.
    pub fn new() -> Self {
        Self {
            id: EndpointId::next(),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for LogEndpoint<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for LogEndpoint<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Debug + Send + 'static> Endpoint<T> for LogEndpoint<T> {
    fn endpoint_id(&self) -> EndpointId {
        self.id
    }

    fn try_offer(&self, value: T) -> bool {
        println!("[chancast] delivered value={value:?}");
        true
    }

    async fn offer(&self, value: T) {
        println!("[chancast] delivered value={value:?}");
    }
}
