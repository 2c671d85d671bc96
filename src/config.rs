//! Runtime configuration loaded once at startup

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Filename the electricity supplier uses for downloaded statements
pub const LIGHT_STATEMENT_FILENAME: &str = "EstadoCuenta.pdf";

/// Default number of months between the document date and the billed month
const DEFAULT_BILLED_MONTH_OFFSET: u32 = 1;

/// Default wait after a `.tmp` marker appears
const DEFAULT_TMP_SETTLE_SECS: u64 = 5;

/// Immutable application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Watched folder (non-recursive)
    pub source_dir: PathBuf,
    /// Destination for gas bills
    pub gas_dest_dir: PathBuf,
    /// Destination for light bills
    pub light_dest_dir: PathBuf,
    /// Known gas accounts, in match priority order
    pub gas_account_ids: Vec<String>,
    /// The single known light account
    pub light_account_id: String,
    /// Months subtracted from the document date to get the billed month
    pub billed_month_offset: u32,
    /// How long to wait for a download to finish after a `.tmp` marker
    pub tmp_settle_delay: Duration,
}

impl Config {
    /// Load from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .with_context(|| format!("missing required setting {key}"))
        };

        let billed_month_offset = match lookup("BILLED_MONTH_OFFSET") {
            Some(raw) if !raw.trim().is_empty() => {
                let offset: u32 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("BILLED_MONTH_OFFSET is not a number: {raw}"))?;
                if offset > 11 {
                    bail!("BILLED_MONTH_OFFSET must be between 0 and 11, got {offset}");
                }
                offset
            }
            _ => DEFAULT_BILLED_MONTH_OFFSET,
        };

        let tmp_settle_secs = match lookup("TMP_SETTLE_SECS") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .with_context(|| format!("TMP_SETTLE_SECS is not a number: {raw}"))?,
            _ => DEFAULT_TMP_SETTLE_SECS,
        };

        Ok(Self {
            source_dir: PathBuf::from(required("SOURCE_DIR")?),
            gas_dest_dir: PathBuf::from(required("GAS_DEST_DIR")?),
            light_dest_dir: PathBuf::from(required("LIGHT_DEST_DIR")?),
            gas_account_ids: parse_account_ids(&lookup("GAS_ACCOUNT_IDS").unwrap_or_default()),
            light_account_id: required("LIGHT_ACCOUNT_ID")?,
            billed_month_offset,
            tmp_settle_delay: Duration::from_secs(tmp_settle_secs),
        })
    }

    /// Filenames that identify a light bill, in lookup order
    pub fn light_bill_filenames(&self) -> [String; 2] {
        [
            format!("{}.pdf", self.light_account_id),
            LIGHT_STATEMENT_FILENAME.to_string(),
        ]
    }

    /// Whether a base filename marks a light bill
    pub fn is_light_bill_filename(&self, file_name: &str) -> bool {
        self.light_bill_filenames().iter().any(|n| n == file_name)
    }

    /// Fail early if the watched folder is unusable
    pub fn validate(&self) -> Result<()> {
        ensure_dir(&self.source_dir, "SOURCE_DIR")?;
        ensure_dir(&self.gas_dest_dir, "GAS_DEST_DIR")?;
        ensure_dir(&self.light_dest_dir, "LIGHT_DEST_DIR")
    }
}

fn ensure_dir(path: &Path, key: &str) -> Result<()> {
    if !path.is_dir() {
        bail!("{key} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Comma-separated ids; blanks dropped, duplicates keep their first position
fn parse_account_ids(raw: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for id in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !ids.iter().any(|existing| existing == id) {
            ids.push(id.to_string());
        }
    }
    ids
}
