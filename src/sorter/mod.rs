//! Classifies an arrived PDF and moves it to its destination folder

use crate::config::Config;
use crate::error::SortError;
use crate::parser::{
    BillKind, billed_month_for, classify, extract_gas_date, extract_light_date, find_gas_account,
    gas_bill_filename, light_bill_filename,
};
use crate::pdf::TextExtractor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a successful move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub kind: BillKind,
    pub account_id: String,
    pub billed_month: &'static str,
    pub destination: PathBuf,
}

/// Classifier-mover for a single PDF at a time
pub struct Sorter<E> {
    config: Config,
    extractor: E,
}

impl<E: TextExtractor> Sorter<E> {
    pub fn new(config: Config, extractor: E) -> Self {
        Self { config, extractor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Classify `path` and move it. On any error the file is left in place.
    pub fn process(&self, path: &Path) -> Result<MoveOutcome, SortError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();

        let text = self.extractor.extract_text(path);
        debug!("Extracted {} characters from {}", text.len(), path.display());

        match classify(file_name, &text, &self.config) {
            Some(BillKind::Light) => {
                info!("File matches light bill name '{}'", file_name);
                self.process_light(path, &text)
            }
            Some(BillKind::Gas) => self.process_gas(path, &text),
            None if text.trim().is_empty() => Err(SortError::ExtractionFailed(path.to_path_buf())),
            None => Err(SortError::UnrecognizedBill(path.to_path_buf())),
        }
    }

    fn process_light(&self, path: &Path, text: &str) -> Result<MoveOutcome, SortError> {
        let date = extract_light_date(text).ok_or_else(|| SortError::DateNotFound {
            kind: BillKind::Light,
            path: path.to_path_buf(),
        })?;

        let billed_month = billed_month_for(date, self.config.billed_month_offset);
        let account_id = self.config.light_account_id.clone();
        let destination = self
            .config
            .light_dest_dir
            .join(light_bill_filename(&account_id, billed_month));

        info!("Moving light bill to: {}", destination.display());
        move_file(path, &destination)?;

        Ok(MoveOutcome {
            kind: BillKind::Light,
            account_id,
            billed_month,
            destination,
        })
    }

    fn process_gas(&self, path: &Path, text: &str) -> Result<MoveOutcome, SortError> {
        let date = extract_gas_date(text).ok_or_else(|| SortError::DateNotFound {
            kind: BillKind::Gas,
            path: path.to_path_buf(),
        })?;

        let billed_month = billed_month_for(date, self.config.billed_month_offset);
        let account_id = find_gas_account(text, &self.config.gas_account_ids)
            .ok_or_else(|| SortError::AccountNotIdentified(path.to_path_buf()))?
            .to_string();
        let destination = self
            .config
            .gas_dest_dir
            .join(gas_bill_filename(&account_id, billed_month));

        info!("Moving gas bill to: {}", destination.display());
        move_file(path, &destination)?;

        Ok(MoveOutcome {
            kind: BillKind::Gas,
            account_id,
            billed_month,
            destination,
        })
    }
}

/// Move a file, replacing any existing destination.
/// Falls back to copy + delete when a plain rename fails (e.g. across devices).
/// On failure the source is left in place and no copy remains at the destination.
fn move_file(from: &Path, to: &Path) -> Result<(), SortError> {
    let move_err = |source| SortError::MoveFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    let rename_err = match std::fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    if let Err(e) = std::fs::copy(from, to) {
        debug!("Copy fallback for {} failed: {}", from.display(), e);
        return Err(move_err(rename_err));
    }

    if let Err(e) = std::fs::remove_file(from) {
        let _ = std::fs::remove_file(to);
        return Err(move_err(e));
    }

    Ok(())
}
