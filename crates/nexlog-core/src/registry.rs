// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2025 Nexlog Contributors

//! Process-wide named-logger registry.
//!
//! The registry carries a single application logger configuration with a
//! well-defined lifecycle: configured once at startup, torn down once at
//! shutdown. A second configure call is a warned no-op (idempotent startup
//! beats hot-reload), and reconfiguration of the underlying core is an
//! atomic swap, so concurrent log calls see a fully-old or fully-new sink
//! set.

use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use crate::logger::{Logger, LoggerCore};

/// Result of a [`configure`](crate::configurator::LoggerConfigurator::configure) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigureOutcome {
    /// First configuration; the supplied sink set is now in effect.
    Configured,
    /// The process was already configured; the first configuration stays in
    /// effect and a one-time warning was emitted.
    AlreadyConfigured,
}

struct Registry {
    state: Mutex<RegistryState>,
    configured: AtomicBool,
    shut_down: AtomicBool,
    reconfigure_warnings: AtomicUsize,
}

struct RegistryState {
    app: Logger,
    server_access: Option<Logger>,
    server_error: Option<Logger>,
}

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| Registry {
        state: Mutex::new(RegistryState {
            app: Logger::standalone("app", LoggerCore::default_console()),
            server_access: None,
            server_error: None,
        }),
        configured: AtomicBool::new(false),
        shut_down: AtomicBool::new(false),
        reconfigure_warnings: AtomicUsize::new(0),
    })
}

fn lock_state() -> std::sync::MutexGuard<'static, RegistryState> {
    match registry().state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Install the startup configuration. Called by
/// [`LoggerConfigurator::configure`](crate::configurator::LoggerConfigurator::configure).
///
/// The first call wins; later calls leave the existing configuration in
/// effect, emit a single warning per process, and report
/// [`ConfigureOutcome::AlreadyConfigured`].
pub(crate) fn install(
    app_name: &str,
    core: LoggerCore,
    server_access: Option<LoggerCore>,
    server_error: Option<LoggerCore>,
) -> (Logger, ConfigureOutcome) {
    let reg = registry();
    if reg.configured.swap(true, Ordering::SeqCst) {
        if reg.reconfigure_warnings.fetch_add(1, Ordering::SeqCst) == 0 {
            warn(&format!(
                "logger '{app_name}' is already configured; skipping reconfiguration"
            ));
        }
        let state = lock_state();
        return (state.app.clone(), ConfigureOutcome::AlreadyConfigured);
    }

    let mut state = lock_state();
    // Existing handles obtained before configuration keep working: they
    // share the app core cell, which is swapped here atomically.
    let app = Logger::new(Arc::from(app_name), state.app.core_cell());
    app.swap_core(Arc::new(core));
    state.app = app.clone();
    state.server_access = server_access
        .map(|core| Logger::standalone(format!("{app_name}.server.access"), core));
    state.server_error =
        server_error.map(|core| Logger::standalone(format!("{app_name}.server.error"), core));
    (app, ConfigureOutcome::Configured)
}

/// Get a handle to the application logger (`None`) or a child of it
/// (`Some("db")` gives `<app>.db`).
///
/// Usable before configuration: an unconfigured process logs to a default
/// console sink at INFO rather than dropping events.
pub fn get_logger(name: Option<&str>) -> Logger {
    let state = lock_state();
    match name {
        None => state.app.clone(),
        Some(suffix) => state.app.child(suffix),
    }
}

/// The access logger installed by the server-log redirect, when enabled.
pub fn server_access_logger() -> Option<Logger> {
    lock_state().server_access.clone()
}

/// The error logger installed by the server-log redirect, when enabled.
pub fn server_error_logger() -> Option<Logger> {
    lock_state().server_error.clone()
}

/// How many redundant configure calls this process has seen. The stderr
/// warning is printed only for the first one.
pub fn redundant_configure_count() -> usize {
    registry().reconfigure_warnings.load(Ordering::SeqCst)
}

/// Orderly teardown: flush and shut down every configured sink exactly
/// once. Safe to call more than once; later calls are no-ops. Sinks whose
/// shutdown fails internally must self-report rather than panic, so this
/// never crashes the process on exit.
pub fn shutdown() {
    let reg = registry();
    if reg.shut_down.swap(true, Ordering::SeqCst) {
        return;
    }
    let loggers: Vec<Logger> = {
        let state = lock_state();
        let mut all = vec![state.app.clone()];
        all.extend(state.server_access.clone());
        all.extend(state.server_error.clone());
        all
    };
    for logger in loggers {
        let _ = logger.flush();
        for sink in &logger_core_sinks(&logger) {
            sink.shutdown();
        }
    }
}

fn logger_core_sinks(logger: &Logger) -> Vec<Arc<dyn crate::sink::Sink>> {
    match logger.core_cell().read() {
        Ok(core) => core.sinks.clone(),
        Err(poisoned) => poisoned.into_inner().sinks.clone(),
    }
}

/// One-line startup warning on stderr, the channel the logging layer uses
/// for its own diagnostics.
pub(crate) fn warn(message: &str) {
    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "nexlog: warning: {message}");
}
