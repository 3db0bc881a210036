use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{prelude::*, EnvFilter, Registry};

/// Installs the global bunyan JSON subscriber. `RUST_LOG` overrides the
/// default `INFO` filter. Records emitted through `log` (actix's request
/// logger among them) are forwarded as well.
pub fn init(app_name: &str) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("INFO"));
    let formatting_layer = BunyanFormattingLayer::new(app_name.to_string(), std::io::stdout);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
        .try_init()
}
