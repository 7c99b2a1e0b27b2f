//! Broadcasting core: registry, typed and dynamic broadcasters.
//!
//! This module contains the fan-out machinery. The only public API from this
//! module is the pair of broadcaster types; the registry store is internal.
//!
//! Internal modules:
//! - [`registry`]: identity-keyed endpoint set behind a single mutex;
//! - [`broadcaster`]: [`Broadcaster<T>`] — element type fixed at compile time;
//! - [`dynamic`]: [`AnyBroadcaster`] — element type fixed at first
//!   registration and checked at runtime.

mod broadcaster;
mod dynamic;
mod registry;

pub use broadcaster::Broadcaster;
pub use dynamic::AnyBroadcaster;
