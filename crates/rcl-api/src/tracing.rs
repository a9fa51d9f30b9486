//! Log output for the service.
//!
//! Development builds print readable multi-line events; production emits one
//! JSON object per line. `RUST_LOG` overrides the default filter in both.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

pub fn init_tracing(env: &Environment) {
    let filter = env_filter(env);
    let registry = tracing_subscriber::registry();

    if env.is_development() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_file(true)
                    .pretty()
                    .with_filter(filter),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .flatten_event(true)
                    .with_target(true)
                    .with_filter(filter),
            )
            .init();
    }

    tracing::info!(environment = ?env, "Tracing initialized");
}

fn env_filter(env: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(env)))
}

const fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "debug,rcl_review=debug,tower_http=debug",
        Environment::Production => "info,rcl_review=info,tower_http=info",
    }
}
