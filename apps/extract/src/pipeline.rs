// [apps/extract/src/pipeline.rs]
/*!
 * APARATO: EXTRACTION PIPELINE (ESTRATO L6)
 * RESPONSABILIDAD: ORQUESTACIÓN DE INGESTA → PARSEO → DEDUPLICACIÓN
 *
 * Ties the low-level journal/sshkey/dedup primitives together the
 * way the CLI needs them, leaving each primitive free of pipeline
 * concerns.
 */

use std::path::{Path, PathBuf};

use keyaudit_core_probabilistic::ModulusDeduplicator;
use keyaudit_domain_journal::JournalError;
use keyaudit_domain_sshkey::KeyOutcome;
use tracing::{debug, info, instrument, warn};

/// Runs A→B→C over every chunk in a journal directory, producing the
/// ordered list of distinct canonical moduli (first-seen order).
pub struct ExtractionPipeline<D: ModulusDeduplicator> {
    journal_directory: PathBuf,
    deduplicator: D,
}

impl<D: ModulusDeduplicator> ExtractionPipeline<D> {
    /// Builds a pipeline reading `journal_directory`, deduplicating
    /// through `deduplicator`.
    pub fn new(journal_directory: &Path, deduplicator: D) -> Self {
        Self {
            journal_directory: journal_directory.to_path_buf(),
            deduplicator,
        }
    }

    /// Executes the full extraction, returning distinct canonical
    /// moduli in first-seen order.
    ///
    /// # Errors
    /// Fatal if journal discovery or decoding fails. A single malformed
    /// or non-RSA key is noise, not an error, and is silently skipped.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> Result<Vec<Vec<u8>>, ExtractionError> {
        info!(journal_directory = ?self.journal_directory, "iniciando extracción de módulos");

        let records = keyaudit_domain_journal::read_journal(&self.journal_directory)?;

        let mut moduli = Vec::new();
        let mut keys_seen = 0u64;
        let mut rsa_keys_seen = 0u64;

        for record in records {
            let record = record?;
            for key_line in &record.keys {
                keys_seen += 1;
                match keyaudit_domain_sshkey::parse_authorized_keys_line(key_line) {
                    KeyOutcome::Rsa { modulus } => {
                        rsa_keys_seen += 1;
                        if self.deduplicator.observe(&modulus) {
                            moduli.push(modulus);
                        }
                    }
                    KeyOutcome::NotRsa => {}
                    KeyOutcome::Malformed(reason) => {
                        debug!(user_id = record.user.id, %reason, "clave ssh-rsa descartada por formato inválido");
                    }
                }
            }
        }

        if rsa_keys_seen == 0 && keys_seen > 0 {
            warn!(keys_seen, "ninguna clave ssh-rsa encontrada en el journal");
        }

        info!(
            keys_seen,
            rsa_keys_seen,
            distinct_moduli = moduli.len(),
            "extracción completada"
        );
        Ok(moduli)
    }
}

/// A fatal extraction failure. A corrupt journal invalidates the run.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// Journal discovery or decoding failed.
    #[error(transparent)]
    Journal(#[from] JournalError),
}
