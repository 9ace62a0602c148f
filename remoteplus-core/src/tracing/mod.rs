//! Tracing integration for structured logging
//!
//! This module provides utilities for setting up the `tracing` subscriber for
//! `Remote++` and the standard span names used around persistence and
//! connection actions. The library never installs a subscriber on its own;
//! the embedding host calls [`init_tracing`] once at startup.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Global flag indicating whether tracing has been initialized
static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Target prefix used by this crate's log events
const CRATE_TARGET: &str = "remoteplus_core";

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// Tracing already initialized
    #[error("Tracing has already been initialized")]
    AlreadyInitialized,

    /// Failed to create log file
    #[error("Failed to create log file: {0}")]
    FileCreationFailed(String),
}

/// Result type for tracing operations
pub type TracingResult<T> = Result<T, TracingError>;

/// Tracing log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TracingLevel {
    /// Only errors
    Error,
    /// Errors and warnings
    Warn,
    /// Errors, warnings and info (default)
    #[default]
    Info,
    /// All above plus debug messages
    Debug,
    /// All messages
    Trace,
}

impl TracingLevel {
    /// Converts to tracing crate's Level
    #[must_use]
    pub const fn to_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Output destination for tracing logs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Output to stdout
    Stdout,
    /// Output to stderr
    #[default]
    Stderr,
    /// Output to a file, truncated on start
    File(PathBuf),
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Log level for this crate
    pub level: TracingLevel,
    /// Output destination
    pub output: TracingOutput,
    /// Custom filter string (overrides level if set)
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Creates a new tracing configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the output destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Sets a custom filter string
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Builds the `EnvFilter` directive for this configuration
    #[must_use]
    pub fn filter_directive(&self) -> String {
        self.filter
            .clone()
            .unwrap_or_else(|| format!("{CRATE_TARGET}={}", self.level))
    }
}

/// Initializes the tracing subscriber with the given configuration
///
/// This function should be called once at startup. A failed attempt leaves
/// nothing installed, so it may be retried with a different configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Tracing has already been initialized
/// - The filter string is invalid or the subscriber fails to initialize
/// - File output is configured but the file cannot be created
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    if is_tracing_initialized() {
        return Err(TracingError::AlreadyInitialized);
    }

    let filter = if let Some(ref custom_filter) = config.filter {
        EnvFilter::try_new(custom_filter)
            .map_err(|e| TracingError::InitializationFailed(e.to_string()))?
    } else {
        EnvFilter::try_new(config.filter_directive()).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    match &config.output {
        TracingOutput::Stdout => install(filter, std::io::stdout, true)?,
        TracingOutput::Stderr => install(filter, std::io::stderr, true)?,
        TracingOutput::File(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| TracingError::FileCreationFailed(e.to_string()))?;
            install(filter, std::sync::Mutex::new(file), false)?;
        }
    }

    TRACING_INITIALIZED.store(true, Ordering::SeqCst);
    tracing::info!(level = %config.level, "Tracing initialized");

    Ok(())
}

fn install<W>(filter: EnvFilter, writer: W, ansi: bool) -> TracingResult<()>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(ansi)
                .with_writer(writer),
        )
        .try_init()
        .map_err(|e| TracingError::InitializationFailed(e.to_string()))
}

/// Checks if tracing has been initialized
#[must_use]
pub fn is_tracing_initialized() -> bool {
    TRACING_INITIALIZED.load(Ordering::SeqCst)
}

/// Standard span names for `Remote++` operations
pub mod span_names {
    /// Connections file load span
    pub const CONFIG_LOAD: &str = "config.load";
    /// Connections file save span
    pub const CONFIG_SAVE: &str = "config.save";
    /// Connection establishment span
    pub const CONNECTION_ESTABLISH: &str = "connection.establish";
    /// Auto-connect span
    pub const AUTO_CONNECT: &str = "connection.auto_connect";
    /// Leader/follower swap span
    pub const SWAP_MODE: &str = "connection.swap_mode";
    /// Connect-to-default action span
    pub const CONNECT_DEFAULT: &str = "connection.connect_default";
}
