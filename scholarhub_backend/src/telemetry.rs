use tracing_subscriber::EnvFilter;

use crate::utils::APP_NAME;

/// Installs the global tracing subscriber. `RUST_LOG` wins when set; otherwise
/// only this crate logs at `info`. Later calls are no-ops, so tests and the
/// binary can both call it.
pub fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(format!("{APP_NAME}=info")));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
