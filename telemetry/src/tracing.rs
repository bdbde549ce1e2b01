use std::sync::Mutex;

// `::` disambiguates the crate from this module, which shares its name.
use ::tracing::info;
use tracing_subscriber::EnvFilter;

// Tracks whether a global subscriber has already been installed.
//
// Installing a global subscriber twice fails, and while `init_tracing` is not
// called multiple times during normal operations, it is called multiple times
// during tests, so this guard is essential.
static TRACING_INITIALIZED: Mutex<bool> = Mutex::new(false);

/// Initializes a formatted tracing subscriber with env-filter support.
///
/// The filter is read from `RUST_LOG`, defaulting to `info` when unset.
/// Subsequent calls are no-ops, which keeps repeated initialization from
/// tests safe.
pub fn init_tracing(service_name: &str) {
    let mut initialized = TRACING_INITIALIZED.lock().unwrap();
    if *initialized {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    *initialized = true;

    info!(service = service_name, "tracing initialized");
}

/// Initializes tracing for test binaries.
///
/// Uses a test writer so output is captured per test, and tolerates the
/// subscriber already being installed by an earlier test.
pub fn init_test_tracing() {
    let mut initialized = TRACING_INITIALIZED.lock().unwrap();
    if *initialized {
        return;
    }

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
    *initialized = true;
}
