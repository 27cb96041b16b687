//! Crash and analytics reporting.
//!
//! The [`ReportingGate`] owns the two user-facing reporting flags and
//! forwards events to external backends. Backends are opaque SDKs behind
//! the [`AnalyticsBackend`] and [`CrashBackend`] traits. Forwarding is
//! best-effort: a failing backend is logged and otherwise ignored.
//!
//! The restricted build never constructs a backend at all; see
//! [`BuildVariant`].

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

pub mod events;
pub mod gate;
pub mod log_backend;

pub use gate::{ReportingGate, TelemetryBackends};
pub use log_backend::LogBackend;

/// Event parameters forwarded with [`AnalyticsBackend::log_event`].
pub type EventPayload = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// Build variant
// ---------------------------------------------------------------------------

/// Distribution flavour the binary was built for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildVariant {
    /// Store build with analytics and crash reporting SDKs.
    #[default]
    Standard,
    /// Build that must never load proprietary telemetry SDKs.
    Restricted,
}

impl BuildVariant {
    /// Capabilities this variant provides.
    pub fn capabilities(self) -> TelemetryCapabilities {
        TelemetryCapabilities {
            analytics_available: self == Self::Standard,
        }
    }
}

/// What the current build can do, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryCapabilities {
    /// Analytics and crash backends may be constructed and called.
    pub analytics_available: bool,
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// The user's reporting preferences.
///
/// Writes are last-write-wins; there is a single writer in practice (the
/// settings screen).
#[derive(Debug)]
pub struct ReportingFlags {
    crash_reporting: AtomicBool,
    analytics_reporting: AtomicBool,
}

impl ReportingFlags {
    /// Flags with explicit initial values.
    pub fn new(crash_reporting: bool, analytics_reporting: bool) -> Self {
        Self {
            crash_reporting: AtomicBool::new(crash_reporting),
            analytics_reporting: AtomicBool::new(analytics_reporting),
        }
    }

    /// Whether crash reports are collected.
    pub fn crash_reporting(&self) -> bool {
        self.crash_reporting.load(Ordering::Relaxed)
    }

    /// Whether analytics events are collected.
    pub fn analytics_reporting(&self) -> bool {
        self.analytics_reporting.load(Ordering::Relaxed)
    }

    pub(crate) fn set_crash_reporting(&self, value: bool) {
        self.crash_reporting.store(value, Ordering::Relaxed);
    }

    pub(crate) fn set_analytics_reporting(&self, value: bool) {
        self.analytics_reporting.store(value, Ordering::Relaxed);
    }
}

impl Default for ReportingFlags {
    fn default() -> Self {
        Self::new(true, true)
    }
}

// ---------------------------------------------------------------------------
// Backends
// ---------------------------------------------------------------------------

/// Errors reported by telemetry backends.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The SDK is not initialised or not linked in.
    #[error("telemetry backend unavailable: {0}")]
    Unavailable(String),
    /// The SDK rejected the call.
    #[error("telemetry backend rejected call: {0}")]
    Rejected(String),
}

/// Analytics SDK surface.
pub trait AnalyticsBackend: Send + Sync {
    /// Record a named event.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the SDK fails.
    fn log_event(&self, name: &str, payload: Option<&EventPayload>) -> Result<(), BackendError>;

    /// Record the screen the user is looking at.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the SDK fails.
    fn set_current_screen(&self, name: &str) -> Result<(), BackendError>;

    /// Turn analytics collection on or off.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the SDK fails.
    fn set_collection_enabled(&self, enabled: bool) -> Result<(), BackendError>;
}

/// Crash reporting SDK surface.
pub trait CrashBackend: Send + Sync {
    /// Turn crash report collection on or off.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the SDK fails.
    fn set_collection_enabled(&self, enabled: bool) -> Result<(), BackendError>;
}
