//! Diagnostics for the `tripsict` binary.
//!
//! Logs go to stderr through a `tracing` subscriber so that list and JSON
//! output on stdout can be piped. `RUST_LOG` wins over the `-v`/`-q` flags.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How chatty the binary is, picked from `-q` and repeated `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and errors, e.g. an unreadable stored sequence.
    #[default]
    Normal,
    /// Adds debug output such as storage reads and writes.
    Verbose,
    /// Everything, including per-record tracing.
    Trace,
}

impl Verbosity {
    /// The most detailed level let through.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    ///
    /// Only this crate's events are enabled; dependencies stay silent.
    #[must_use]
    pub fn directive(self) -> String {
        format!("tripsict={}", self.level())
    }
}

/// Install the global subscriber. Later calls are no-ops.
///
/// ```no_run
/// use tripsict::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Route warnings to the test harness's captured output.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tripsict=warn")
        .with_test_writer()
        .try_init();
}
