//! The reporting gate: flag storage plus best-effort forwarding.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use super::{
    AnalyticsBackend, BackendError, BuildVariant, CrashBackend, EventPayload, ReportingFlags,
    TelemetryCapabilities,
};

/// The SDK handles a standard build forwards to.
pub struct TelemetryBackends {
    /// Analytics SDK.
    pub analytics: Box<dyn AnalyticsBackend>,
    /// Crash reporting SDK.
    pub crash: Box<dyn CrashBackend>,
}

/// Process-wide facade over the reporting flags and telemetry backends.
///
/// Construct once at startup and share by reference (or `Arc`). None of its
/// methods fail: backend errors and panics are logged and discarded.
pub struct ReportingGate {
    flags: ReportingFlags,
    capabilities: TelemetryCapabilities,
    backends: Option<TelemetryBackends>,
}

impl ReportingGate {
    /// Build a gate for `variant`.
    ///
    /// `make_backends` runs only when the variant provides analytics, so a
    /// restricted build never initialises an SDK.
    pub fn new<F>(variant: BuildVariant, flags: ReportingFlags, make_backends: F) -> Self
    where
        F: FnOnce() -> TelemetryBackends,
    {
        let capabilities = variant.capabilities();
        let backends = capabilities.analytics_available.then(make_backends);
        tracing::debug!(
            ?variant,
            crash_reporting = flags.crash_reporting(),
            analytics_reporting = flags.analytics_reporting(),
            "reporting gate initialised"
        );
        Self {
            flags,
            capabilities,
            backends,
        }
    }

    /// A gate that keeps flags but never forwards anything.
    pub fn restricted(flags: ReportingFlags) -> Self {
        Self {
            flags,
            capabilities: BuildVariant::Restricted.capabilities(),
            backends: None,
        }
    }

    /// Capabilities of the build this gate was created for.
    pub fn capabilities(&self) -> TelemetryCapabilities {
        self.capabilities
    }

    /// Current flag values.
    pub fn flags(&self) -> &ReportingFlags {
        &self.flags
    }

    /// Whether crash reports are collected.
    pub fn crash_reporting_enabled(&self) -> bool {
        self.flags.crash_reporting()
    }

    /// Whether analytics events are collected.
    pub fn analytics_reporting_enabled(&self) -> bool {
        self.flags.analytics_reporting()
    }

    /// Store the crash reporting flag and pass it to the crash backend.
    ///
    /// The backend is called on every invocation, even when the value is
    /// unchanged. Returns `value`.
    pub fn set_crash_reporting_enabled(&self, value: bool) -> bool {
        self.flags.set_crash_reporting(value);
        if let Some(backends) = &self.backends {
            best_effort("crash.set_collection_enabled", || {
                backends.crash.set_collection_enabled(value)
            });
        }
        value
    }

    /// Store the analytics flag and pass it to the analytics backend.
    ///
    /// Same contract as [`Self::set_crash_reporting_enabled`].
    pub fn set_analytics_reporting_enabled(&self, value: bool) -> bool {
        self.flags.set_analytics_reporting(value);
        if let Some(backends) = &self.backends {
            best_effort("analytics.set_collection_enabled", || {
                backends.analytics.set_collection_enabled(value)
            });
        }
        value
    }

    /// Push the current flag values to both backends.
    ///
    /// Call once after startup so the SDKs match the stored preferences.
    pub fn apply_flags(&self) {
        self.set_crash_reporting_enabled(self.crash_reporting_enabled());
        self.set_analytics_reporting_enabled(self.analytics_reporting_enabled());
    }

    /// Record an analytics event. No-op in the restricted build.
    pub fn log_event(&self, name: &str, payload: Option<&EventPayload>) {
        if let Some(backends) = &self.backends {
            best_effort("analytics.log_event", || {
                backends.analytics.log_event(name, payload)
            });
        }
    }

    /// Record the current screen. No-op in the restricted build.
    pub fn set_current_screen(&self, name: &str) {
        if let Some(backends) = &self.backends {
            best_effort("analytics.set_current_screen", || {
                backends.analytics.set_current_screen(name)
            });
        }
    }
}

impl fmt::Debug for ReportingGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportingGate")
            .field("flags", &self.flags)
            .field("capabilities", &self.capabilities)
            .field("forwarding", &self.backends.is_some())
            .finish()
    }
}

fn best_effort<F>(call: &'static str, f: F)
where
    F: FnOnce() -> Result<(), BackendError>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::warn!(call, error = %e, "telemetry call failed"),
        Err(_) => tracing::warn!(call, "telemetry backend panicked"),
    }
}
