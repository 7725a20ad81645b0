//! Setup of the configuration, the logging and the service container.
use roomtracker_configuration::{Configuration, Info};

use crate::bootstrap::logging;
use crate::container::AppContainer;

/// Loads the configuration from the environment, initializes the global
/// services and wires the application container.
///
/// # Panics
///
/// Will panic if the configuration or the wired services are invalid, since
/// the application cannot run without them.
#[must_use]
pub fn setup() -> (Configuration, AppContainer) {
    let info = Info::gather_from_env();

    let configuration = Configuration::load(&info).expect("configuration should be correct");

    initialize_global_services(&configuration);

    tracing::info!("Configuration:\n{}", configuration.to_toml());

    let app_container = AppContainer::initialize(&configuration).expect("the application services should initialize");

    (configuration, app_container)
}

/// Initializes the process-wide state: the logging subscriber and the static
/// time values. It must run once, before anything else.
pub fn initialize_global_services(configuration: &Configuration) {
    initialize_static();
    logging::setup(&configuration.logging);
}

fn initialize_static() {
    roomtracker_clock::initialize_static();
}
