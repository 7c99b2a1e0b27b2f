//! Endpoint handles: delivery targets for the broadcaster.
//!
//! This module provides the [`Endpoint`] trait and the built-in handle types
//! a [`Broadcaster`](crate::Broadcaster) fans out to.
//!
//! ## Contents
//! - [`Endpoint`], [`EndpointId`] — the delivery contract and handle identity
//! - [`ChannelEndpoint`] — built-in handle over `tokio::sync::mpsc`
//! - [`AnyEndpoint`], [`AnyValue`], [`erase`] — the type-erased shapes used
//!   by [`AnyBroadcaster`](crate::AnyBroadcaster)
//!
//! ## Quick reference
//! - **Blocking path**: `Endpoint::offer` — may suspend until the consumer
//!   accepts; driven by `publish` on its own delivery task.
//! - **Non-blocking path**: `Endpoint::try_offer` — never suspends; driven
//!   inline by `try_publish`.

mod channel;
mod endpoint;
mod erased;

pub use channel::ChannelEndpoint;
pub use endpoint::{Endpoint, EndpointId};
pub use erased::{erase, AnyEndpoint, AnyEndpointRef, AnyValue};

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogEndpoint;
