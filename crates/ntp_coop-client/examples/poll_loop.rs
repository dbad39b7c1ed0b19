// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Drive the sync engine from a simple cooperative loop.
//!
//! The loop stands in for an embedded scheduler: each pass polls the engine
//! once and then does "other work" (here, sleeping). The engine never blocks
//! the loop; it sends a request when its timer expires and picks up the reply
//! on a later pass.
//!
//! Run with:
//!   cargo run -p ntp_coop-client --example poll_loop -- [server] [passes]
//!
//! Set `RUST_LOG=debug` to also see link and socket diagnostics.

use std::time::Duration;

use ntp_coop::{Clock, StdClock, StdNetwork, SyncConfig, SyncEngine};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let server = args.next().unwrap_or_else(|| "pool.ntp.org".to_string());
    let passes: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600);

    let config = SyncConfig::new(server)
        .with_local_port(0)
        .with_update_interval(Duration::from_secs(30))
        .with_retry_interval(Duration::from_secs(5));
    let mut engine = SyncEngine::new(StdNetwork::new(), StdClock::new(), config);

    let mut last_printed = 0;
    for _ in 0..passes {
        let outcome = engine.poll();
        if outcome.received
            && let Some(boot) = engine.boot_timestamp()
        {
            println!("synchronized, first sync at {}", boot.iso());
        }

        if engine.is_time_set() {
            let now = engine.get_epoch_time();
            if now != last_printed {
                println!(
                    "unix time {} (next request in {:?})",
                    now,
                    engine.timer().remaining(engine.clock().now_ms())
                );
                last_printed = now;
            }
        }

        std::thread::sleep(Duration::from_millis(100));
    }

    engine.end();
}
