//! # Example: fanout
//!
//! Fan one published value out to several channel consumers.
//!
//! Demonstrates how to:
//! - Register a few [`ChannelEndpoint`]s on a shared `Broadcaster`.
//! - Use `publish` (waits for every consumer) vs `try_publish` (best effort).
//! - Unregister an endpoint while the others keep receiving.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► spawn 3 consumer tasks, each draining its own channel
//!   ├─► bc.publish(n)      — returns once all consumers accepted
//!   ├─► bc.unregister(ep0) — consumer 0 stops receiving
//!   └─► bc.try_publish(n)  — aggregate boolean, never suspends
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example fanout
//! ```

use std::sync::Arc;

use chancast::{Broadcaster, ChannelEndpoint};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bc = Broadcaster::new();

    // 1) Register three endpoints, each drained by its own consumer task
    let mut endpoints = Vec::new();
    for i in 0..3u32 {
        let (ep, mut rx) = ChannelEndpoint::channel(1);
        bc.register(Arc::new(ep.clone()));
        endpoints.push(ep);

        tokio::spawn(async move {
            while let Some(value) = rx.recv().await {
                println!("[consumer {i}] got {value}");
            }
        });
    }

    // 2) Blocking fan-out: each call returns once all three accepted
    for n in 0..3u64 {
        bc.publish(&n).await;
    }

    // 3) Drop one consumer from the set; the others keep receiving
    bc.unregister(&endpoints[0])?;
    println!("unregistered consumer 0, {} endpoints left", bc.len());
    bc.publish(&99).await;

    // 4) Best-effort fan-out: false as soon as any consumer can't keep up
    let all_accepted = bc.try_publish(&100);
    println!("try_publish accepted by all: {all_accepted}");

    // Let the consumers print before exiting.
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    Ok(())
}
