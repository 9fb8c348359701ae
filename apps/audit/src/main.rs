// [apps/audit/src/main.rs]
/*!
 * APARATO: AUDIT SHELL (ENTRY POINT)
 * RESPONSABILIDAD: CLI PARA EL MOTOR BATCH-GCD
 *
 * `audit <modulus-list>` — runs E–H over the modulus list, writing
 * matches to standard output as `<decimal-index>,<hex-divisor>`, one
 * per line. Exit code 0 on success (including "no matches"); non-zero
 * on fatal error.
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, instrument};

use keyaudit_audit_lib::{pad_to_power_of_two, read_modulus_list};
use keyaudit_domain_models::SharedFactorMatch;
use keyaudit_infra_coordinator::{default_worker_count, run_audit};

/// Ejecuta el motor batch-GCD sobre una lista de módulos RSA.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Detecta pares de módulos RSA con factor primo compartido (árbol de productos/residuos de Bernstein)."
)]
struct CommandArguments {
    /// Ruta a la lista de módulos (hexadecimal por línea, o forma binaria empaquetada).
    modulus_list: PathBuf,

    /// Número de workers. Por defecto: la mayor potencia de dos de núcleos lógicos que divide n.
    #[arg(long)]
    workers: Option<usize>,
}

#[instrument]
fn main() -> Result<()> {
    keyaudit_shared_telemetry::init_tracing("keyaudit_audit");

    let cli_configuration = CommandArguments::parse();
    info!(path = ?cli_configuration.modulus_list, "iniciando comando audit");

    let moduli = read_modulus_list(&cli_configuration.modulus_list)
        .with_context(|| format!("failed to read modulus list {:?}", cli_configuration.modulus_list))?;
    let moduli = pad_to_power_of_two(moduli);

    if moduli.is_empty() {
        info!("lista de módulos vacía; nada que auditar");
        return Ok(());
    }

    let worker_count = cli_configuration
        .workers
        .unwrap_or_else(|| default_worker_count(moduli.len()));
    info!(modulus_count = moduli.len(), worker_count, "particionando auditoría");

    let matches = run_audit(moduli, worker_count).context("batch-GCD audit failed")?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    use std::io::Write as _;
    for found in matches {
        let line = SharedFactorMatch::new(found.index, found.divisor.to_bytes_be()).to_output_line();
        writeln!(handle, "{line}")?;
    }

    Ok(())
}
