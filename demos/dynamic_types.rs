//! # Example: dynamic_types
//!
//! Use the type-erased `AnyBroadcaster` when one broadcaster type has to
//! serve different element types across instances.
//!
//! Demonstrates how to:
//! - Register erased endpoints (`ChannelEndpoint::erased`, `erase`).
//! - Publish tagged values (`AnyValue`) and let the registry enforce the
//!   element type fixed at first registration.
//! - Mix a channel consumer with the built-in `LogEndpoint`.
//!
//! ## Run
//! ```bash
//! cargo run --example dynamic_types --features logging
//! ```

use std::sync::Arc;

use chancast::{erase, AnyBroadcaster, AnyValue, ChannelEndpoint, Endpoint, LogEndpoint};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bc = AnyBroadcaster::new();

    // First registration fixes the element type to String.
    let (ep, mut rx) = ChannelEndpoint::<String>::channel(4);
    bc.register(Box::new(ep.erased()));

    // A second, structurally different endpoint for the same element type.
    let log: Arc<dyn Endpoint<String>> = Arc::new(LogEndpoint::new());
    bc.register(Box::new(erase(log)));

    bc.publish(&AnyValue::new("broadcast to both".to_string())).await;
    println!("[channel] got {:?}", rx.recv().await);

    // A value of the wrong element type would panic here:
    // bc.publish(&AnyValue::new(42u32)).await;

    Ok(())
}
