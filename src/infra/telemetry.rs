use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub const CELLS_PRESENTED_TOTAL: &str = "nbfolio_cells_presented_total";
pub const CELLS_DEGRADED_TOTAL: &str = "nbfolio_cells_degraded_total";
pub const FILES_GENERATED_TOTAL: &str = "nbfolio_files_generated_total";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            CELLS_PRESENTED_TOTAL,
            Unit::Count,
            "Total number of notebook cells turned into display payloads."
        );
        describe_counter!(
            CELLS_DEGRADED_TOTAL,
            Unit::Count,
            "Total number of cells presented as unknown."
        );
        describe_counter!(
            FILES_GENERATED_TOTAL,
            Unit::Count,
            "Total number of project files written by export."
        );
    });
}
