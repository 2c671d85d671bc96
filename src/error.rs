//! Reasons a bill is left where it arrived

use crate::parser::BillKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("no text could be extracted from {0}")]
    ExtractionFailed(PathBuf),

    #[error("could not extract a date from {kind} bill {path}")]
    DateNotFound { kind: BillKind, path: PathBuf },

    #[error("no known gas account found in {0}")]
    AccountNotIdentified(PathBuf),

    #[error("could not identify type or date in {0}")]
    UnrecognizedBill(PathBuf),

    #[error("neither {expected:?} appeared in {dir} after waiting")]
    TmpTargetNotFound { expected: Vec<String>, dir: PathBuf },

    #[error("failed to move {from} to {to}: {source}")]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
