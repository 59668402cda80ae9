//! Shared helpers for unit tests.

use std::sync::Once;

/// Install a `fmt` subscriber when `RUST_LOG` is set, once per process.
///
/// Run with `RUST_LOG=ir_blocks=trace` to see block allocation events.
pub(crate) fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer().with_target(true))
                .with(EnvFilter::from_default_env())
                .try_init();
        }
    });
}
