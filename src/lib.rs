pub mod config;
pub mod observation;

pub use observation::observer::{observe, Observer};
pub use observation::schema::{
    ExtractResult, ExtractedValue, ObservationResult, RequirementsResult, Unknown,
};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the binary. RUST_LOG overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
