use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, Layer, Registry, prelude::*};

const DEV_FILTER: &str = "info,products_api=debug,domain_products=debug,tower_http=debug";
const PROD_FILTER: &str = "info,tower_http=warn,mongodb=warn";

/// Install the color-eyre report hook: error locations on, environment section off.
///
/// Later calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// `RUST_LOG` when set, otherwise the default for `environment`
fn filter_for(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if environment.is_production() {
            PROD_FILTER
        } else {
            DEV_FILTER
        })
    })
}

fn fmt_layer(environment: &Environment) -> Box<dyn Layer<Registry> + Send + Sync> {
    if environment.is_production() {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(false)
            .with_line_number(false)
            .boxed()
    }
}

/// Global subscriber: JSON lines in production, pretty output in development.
///
/// Span traces are captured for eyre reports. Once a subscriber is installed
/// further calls do nothing, so tests may call this freely.
pub fn init_tracing(environment: &Environment) {
    let result = tracing_subscriber::registry()
        .with(fmt_layer(environment))
        .with(tracing_error::ErrorLayer::default())
        .with(filter_for(environment))
        .try_init();

    match result {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
}
