use std::sync::OnceLock;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config;

static INIT: OnceLock<bool> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "studio_client=info,studio_app=info,studio_admin=info";

/// Install the global tracing subscriber (env filter + fmt layer).
///
/// Runs at most once per process. Returns `false` when telemetry is disabled
/// in config or another subscriber was already installed.
pub fn init_tracing() -> bool {
    *INIT.get_or_init(|| {
        if !config::config().features.telemetry {
            eprintln!("[telemetry] disabled in config");
            return false;
        }
        let installed = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| DEFAULT_FILTER.into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .is_ok();
        if installed {
            tracing::debug!("Tracing subscriber installed");
        }
        installed
    })
}
