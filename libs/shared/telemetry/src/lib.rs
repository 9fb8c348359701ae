// [libs/shared/telemetry/src/lib.rs]
/*!
 * =================================================================
 * APARATO: TELEMETRY INITIALIZER (V1.0)
 * CLASIFICACIÓN: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: INICIALIZACIÓN DEL SUMIDERO DE TRAZADO ESTRUCTURADO
 * =================================================================
 */

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global `tracing` subscriber for a binary entry point.
///
/// Honors `RUST_LOG` when set; otherwise defaults to `debug` in debug
/// builds and `info` in release builds. Safe to call once per process;
/// a second call is a logic error in the caller, not in this crate.
pub fn init_tracing(service_name: &str) {
    let default_directive = if cfg!(debug_assertions) { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{service_name}={default_directive}")));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
