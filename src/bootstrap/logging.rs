//! Setup for the application logging.
use std::sync::Once;

use roomtracker_configuration::{Logging, Threshold};
use tracing::level_filters::LevelFilter;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber from the configured threshold.
///
/// It is idempotent: only the first call installs the subscriber, so tests
/// can call it freely.
pub fn setup(logging: &Logging) {
    let level = map_threshold(logging.threshold);

    if level == LevelFilter::OFF {
        return;
    }

    INIT.call_once(|| {
        tracing_subscriber::fmt().with_max_level(level).init();

        tracing::info!("Logging initialized");
    });
}

fn map_threshold(threshold: Threshold) -> LevelFilter {
    match threshold {
        Threshold::Off => LevelFilter::OFF,
        Threshold::Error => LevelFilter::ERROR,
        Threshold::Warn => LevelFilter::WARN,
        Threshold::Info => LevelFilter::INFO,
        Threshold::Debug => LevelFilter::DEBUG,
        Threshold::Trace => LevelFilter::TRACE,
    }
}
