//! Async trace propagation example.
//!
//! Demonstrates how each spawned task carries its own trace id across
//! `.await` points while sibling tasks stay isolated.
//!
//! Run with: cargo run --example async_tracing

use std::time::Duration;

use nexlog_setup::{init_from_env, log_debug, log_info, shutdown, Logger, TraceId, WithTrace};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger = init_from_env()?;

    log_info!(logger, "starting async tracing example");

    // Each batch runs under its own trace id; their lines interleave but
    // never mix ids.
    let handle1 = tokio::spawn(WithTrace::with_id(
        TraceId::from("batch-1"),
        process_batch(logger.clone(), "batch-1", 3),
    ));
    let handle2 = tokio::spawn(WithTrace::with_id(
        TraceId::from("batch-2"),
        process_batch(logger.clone(), "batch-2", 2),
    ));

    let _ = tokio::join!(handle1, handle2);

    log_info!(logger, "all batches complete");
    shutdown();
    Ok(())
}

async fn process_batch(logger: Logger, batch_name: &str, count: usize) {
    for index in 0..count {
        log_debug!(logger, { "batch" => batch_name, "item" => index }, "processing item");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    log_info!(logger, { "batch" => batch_name }, "batch processing complete");
}
