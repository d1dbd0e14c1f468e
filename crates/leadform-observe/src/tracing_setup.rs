//! Tracing subscriber initialization with structured logging and optional
//! OpenTelemetry trace export.
//!
//! # Usage
//!
//! ```no_run
//! use leadform_observe::{TracingOptions, init_tracing, shutdown_tracing};
//!
//! init_tracing(TracingOptions::default()).unwrap();
//! // ... run the form session ...
//! shutdown_tracing();
//! ```

use std::sync::OnceLock;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Service name reported to OpenTelemetry.
pub const SERVICE_NAME: &str = "leadform";

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Stores the OTel tracer provider so it can be shut down cleanly on exit.
static TRACER_PROVIDER: OnceLock<SdkTracerProvider> = OnceLock::new();

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracingOptions {
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
    /// Bridge spans to OpenTelemetry with a stdout exporter.
    pub otel: bool,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the global tracing subscriber.
///
/// - Installs a `fmt` layer with target visibility, as text or JSON.
/// - When `options.otel` is set, additionally bridges spans to
///   OpenTelemetry using a stdout exporter.
/// - Respects `RUST_LOG`, defaulting to `info`.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(options: TracingOptions) -> Result<(), Box<dyn std::error::Error>> {
    let text_layer = (!options.json).then(|| tracing_subscriber::fmt::layer().with_target(true));
    let json_layer = options
        .json
        .then(|| tracing_subscriber::fmt::layer().json().with_target(true));

    let provider = options.otel.then(|| {
        SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .build()
    });
    let otel_layer = provider
        .as_ref()
        .map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME)));

    let installed = tracing_subscriber::registry()
        .with(env_filter())
        .with(text_layer)
        .with(json_layer)
        .with(otel_layer)
        .try_init();

    // The global provider is only replaced once the subscriber that feeds it is live.
    if let Err(err) = installed {
        if let Some(provider) = provider {
            let _ = provider.shutdown();
        }
        return Err(err.into());
    }
    if let Some(provider) = provider {
        let _ = TRACER_PROVIDER.set(provider.clone());
        opentelemetry::global::set_tracer_provider(provider);
    }

    Ok(())
}

/// Flush pending traces and shut down the OpenTelemetry tracer provider.
///
/// A no-op when OTel was not enabled.
pub fn shutdown_tracing() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            eprintln!("Warning: OTel tracer provider shutdown error: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let first = init_tracing(TracingOptions::default());
        assert!(first.is_ok());

        let second = init_tracing(TracingOptions {
            json: true,
            otel: false,
        });
        assert!(second.is_err());

        let with_otel = init_tracing(TracingOptions {
            json: false,
            otel: true,
        });
        assert!(with_otel.is_err());
        assert!(TRACER_PROVIDER.get().is_none());

        tracing::info!("tracing initialized once");
        shutdown_tracing();
    }

    #[test]
    fn test_default_options_are_plain_text_without_otel() {
        let options = TracingOptions::default();
        assert!(!options.json);
        assert!(!options.otel);
    }
}
