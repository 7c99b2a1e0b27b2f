//! # chancast
//!
//! **chancast** is a small one-to-many broadcasting library for Rust.
//!
//! It keeps a runtime registry of channel-like delivery targets
//! ([`Endpoint`] handles) and fans a single published value out to every
//! registered one, either best-effort without blocking ([`Broadcaster::try_publish`])
//! or waiting until every endpoint has accepted ([`Broadcaster::publish`]).
//! Endpoints can be registered and removed while deliveries are in flight.
//!
//! ## Architecture
//! ```text
//!                 register / unregister (any task, any time)
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │  Broadcaster<T>  /  AnyBroadcaster                        │
//! │  - Registry: { EndpointId → endpoint handle }  (mutex)    │
//! │  - snapshot taken atomically per publish call             │
//! └──────┬───────────────────┬───────────────────┬────────────┘
//!        ▼                   ▼                   ▼
//!   offer task 1        offer task 2        offer task N
//!   endpoint1.offer     endpoint2.offer     endpointN.offer
//!        │                   │                   │
//!        └───────────────────┴───────────────────┘
//!                   join barrier: publish(v) returns
//!                   once the slowest offer completes
//! ```
//!
//! `try_publish` needs no tasks: it walks the snapshot inline with
//! `try_offer` and reports the aggregate boolean.
//!
//! ## Two broadcasters
//! | Type                 | Element type check                  | Misuse surface                      |
//! |----------------------|-------------------------------------|-------------------------------------|
//! | [`Broadcaster<T>`]   | compile time                        | none (the compiler rejects it)      |
//! | [`AnyBroadcaster`]   | runtime, fixed at first registration| panics: wrong handle kind, wrong type|
//!
//! ## Guarantees and limits
//! - **Snapshot semantics**: a publish observes the registry at some instant
//!   during the call; later registrations are not contacted.
//! - **No cross-publish ordering**, no per-endpoint result reporting, no
//!   per-offer timeout: one stuck endpoint stalls `publish` until its
//!   consumer accepts. Callers needing deadlines wrap the call.
//! - **No leaked tasks**: delivery tasks are joined (or aborted if the
//!   publish future is dropped).
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogEndpoint`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use chancast::{Broadcaster, CastError, ChannelEndpoint};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), CastError> {
//!     let bc = Broadcaster::new();
//!
//!     let (ep_a, mut rx_a) = ChannelEndpoint::channel(8);
//!     let (ep_b, mut rx_b) = ChannelEndpoint::channel(8);
//!     bc.register(Arc::new(ep_a.clone()));
//!     bc.register(Arc::new(ep_b.clone()));
//!
//!     // Blocking fan-out: returns once both endpoints accepted.
//!     bc.publish(&"tick").await;
//!     assert_eq!(rx_a.recv().await, Some("tick"));
//!     assert_eq!(rx_b.recv().await, Some("tick"));
//!
//!     // Best-effort fan-out: aggregate boolean, never suspends.
//!     assert!(bc.try_publish(&"tock"));
//!
//!     bc.unregister(&ep_a)?;
//!     bc.unregister(&ep_b)?;
//!     assert!(bc.is_empty());
//!     Ok(())
//! }
//! ```

mod broadcast;
mod endpoints;
mod error;

// ---- Public re-exports ----

pub use broadcast::{AnyBroadcaster, Broadcaster};
pub use endpoints::{
    erase, AnyEndpoint, AnyEndpointRef, AnyValue, ChannelEndpoint, Endpoint, EndpointId,
};
pub use error::CastError;

// Optional: expose a simple built-in logging endpoint (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use endpoints::LogEndpoint;
