//! Basic logging example demonstrating sinks and structured fields.
//!
//! Run with: cargo run --example basic_logging
//! Set NEXLOG_LEVEL=DEBUG to see the debug line.

use nexlog_setup::{
    init_from_env, log_debug, log_error, log_info, log_warn, scope, shutdown, TraceId,
};

fn main() -> anyhow::Result<()> {
    let logger = init_from_env()?;

    log_info!(logger, "application started");

    // Plain messages at different levels.
    log_debug!(logger, "this is a debug message");
    log_info!(logger, "this is an info message");
    log_warn!(logger, "this is a warning message");

    // Structured fields are appended to the line in insertion order.
    log_info!(
        logger,
        { "request_id" => "abc123", "duration_ms" => 42 },
        "processing request"
    );

    // Every line inside a scope carries its trace id.
    {
        let _scope = scope(TraceId::from("req-abc123"));
        log_info!(logger, "inside a traced request");
        if let Err(e) = load_state("/path/to/state") {
            log_error!(logger, err = e, "failed to load state");
        }
    }

    log_debug!(logger, "application shutting down");
    shutdown();
    Ok(())
}

fn load_state(path: &str) -> std::io::Result<String> {
    std::fs::read_to_string(path)
}
