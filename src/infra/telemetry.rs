use std::sync::Once;

use metrics::{Unit, describe_counter, describe_histogram};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

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
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
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
            "sentiero_sitemap_cache_hit_total",
            Unit::Count,
            "Total number of sitemap document cache hits."
        );
        describe_counter!(
            "sentiero_sitemap_cache_miss_total",
            Unit::Count,
            "Total number of sitemap document cache misses (including expiries)."
        );
        describe_counter!(
            "sentiero_sitemap_cache_store_total",
            Unit::Count,
            "Total number of sitemap documents written to the cache."
        );
        describe_counter!(
            "sentiero_sitemap_cache_purge_total",
            Unit::Count,
            "Total number of coarse cache purges triggered by content mutation."
        );
        describe_histogram!(
            "sentiero_sitemap_generate_ms",
            Unit::Milliseconds,
            "Sitemap document generation latency in milliseconds."
        );
    });
}
