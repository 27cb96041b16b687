//! A backend that writes telemetry calls to the structured log.
//!
//! Used by the CLI and on platforms without an analytics SDK, where the
//! log is the only sink.

use super::{AnalyticsBackend, BackendError, CrashBackend, EventPayload};
use crate::logging::TELEMETRY_TARGET;

/// Logs every backend call at `info` under the `telemetry` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBackend;

impl AnalyticsBackend for LogBackend {
    fn log_event(&self, name: &str, payload: Option<&EventPayload>) -> Result<(), BackendError> {
        let payload = payload
            .map(|p| serde_json::Value::Object(p.clone()).to_string())
            .unwrap_or_default();
        tracing::info!(target: TELEMETRY_TARGET, event = name, %payload, "analytics event");
        Ok(())
    }

    fn set_current_screen(&self, name: &str) -> Result<(), BackendError> {
        tracing::info!(target: TELEMETRY_TARGET, screen = name, "current screen");
        Ok(())
    }

    fn set_collection_enabled(&self, enabled: bool) -> Result<(), BackendError> {
        tracing::info!(target: TELEMETRY_TARGET, enabled, "analytics collection toggled");
        Ok(())
    }
}

impl CrashBackend for LogBackend {
    fn set_collection_enabled(&self, enabled: bool) -> Result<(), BackendError> {
        tracing::info!(target: TELEMETRY_TARGET, enabled, "crash collection toggled");
        Ok(())
    }
}
