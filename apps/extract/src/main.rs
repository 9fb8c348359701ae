// [apps/extract/src/main.rs]
/*!
 * APARATO: EXTRACT SHELL (ENTRY POINT)
 * RESPONSABILIDAD: CLI PARA LA EXTRACCIÓN DE MÓDULOS RSA
 *
 * `extract <keys-dir> <out-modulus-list>` — runs A→B→C over every
 * chunk in `keys-dir`, writing unique canonical moduli to
 * `out-modulus-list` as one lowercase hex value per line.
 */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, instrument};

use keyaudit_core_probabilistic::{BloomModulusSet, ExactModulusSet, ModulusDeduplicator};
use keyaudit_extract_lib::ExtractionPipeline;

/// Extrae y deduplica módulos RSA a partir de un directorio de journals.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Extrae módulos RSA únicos desde journals de claves SSH (A→B→C)."
)]
struct CommandArguments {
    /// Directorio con los fragmentos de journal (`keys-NNNN.json[.xz]`).
    keys_directory: PathBuf,

    /// Ruta de salida para la lista de módulos (una línea hexadecimal por módulo).
    out_modulus_list: PathBuf,

    /// Volumen esperado de claves distintas, usado para dimensionar el filtro de Bloom.
    #[arg(long, default_value_t = keyaudit_core_probabilistic::DEFAULT_EXPECTED_MODULI)]
    expected_keys: usize,

    /// Tasa de falsos positivos objetivo del filtro de Bloom.
    #[arg(long, default_value_t = keyaudit_core_probabilistic::DEFAULT_FALSE_POSITIVE_RATE)]
    false_positive_rate: f64,

    /// Usa un conjunto exacto (HashSet) en lugar del filtro de Bloom; determinista, más memoria.
    #[arg(long)]
    exact: bool,
}

#[instrument]
fn main() -> Result<()> {
    keyaudit_shared_telemetry::init_tracing("keyaudit_extract");

    let cli_configuration = CommandArguments::parse();
    info!(directory = ?cli_configuration.keys_directory, "iniciando comando extract");

    let moduli = if cli_configuration.exact {
        run_with_deduplicator(&cli_configuration, ExactModulusSet::new())?
    } else {
        run_with_deduplicator(
            &cli_configuration,
            BloomModulusSet::new(cli_configuration.expected_keys, cli_configuration.false_positive_rate),
        )?
    };

    write_modulus_list(&cli_configuration.out_modulus_list, &moduli)
        .with_context(|| format!("failed to write modulus list to {:?}", cli_configuration.out_modulus_list))?;

    info!(count = moduli.len(), "lista de módulos escrita");
    Ok(())
}

fn run_with_deduplicator<D: ModulusDeduplicator>(
    cli_configuration: &CommandArguments,
    deduplicator: D,
) -> Result<Vec<Vec<u8>>> {
    let mut pipeline = ExtractionPipeline::new(&cli_configuration.keys_directory, deduplicator);
    pipeline.run().context("extraction pipeline failed")
}

fn write_modulus_list(path: &std::path::Path, moduli: &[Vec<u8>]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for modulus in moduli {
        writeln!(writer, "{}", hex::encode(modulus))?;
    }
    writer.flush()?;
    Ok(())
}
