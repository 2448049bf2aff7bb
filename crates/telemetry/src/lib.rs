//! Logging bootstrap for shelf binaries.

use shelf_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::{fmt, EnvFilter};

/// Build the event filter: `RUST_LOG` wins over the configured level.
pub fn env_filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_level))
}

/// Initialize the global tracing subscriber.
///
/// Logs go to stderr. Safe to call more than once; later calls leave the
/// first subscriber in place.
pub fn init(settings: &TelemetrySettings) {
    let builder = fmt()
        .with_env_filter(env_filter(settings))
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = match settings.log_format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Pretty => builder.try_init().is_ok(),
    };

    if installed {
        tracing::info!(
            target: "shelf-telemetry",
            format = ?settings.log_format,
            level = %settings.log_level,
            "telemetry initialized"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent() {
        let settings = TelemetrySettings::default();
        init(&settings);
        init(&settings);
    }

    #[test]
    fn configured_level_is_used_without_rust_log() {
        let settings = TelemetrySettings {
            log_format: LogFormat::Json,
            log_level: "debug".to_string(),
        };
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(env_filter(&settings).to_string(), "debug");
        }
    }
}
