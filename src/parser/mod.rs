//! Text analysis - bill classification and naming

mod account;
mod date;

pub use account::find_gas_account;
pub use date::{
    MONTH_NAMES, MONTH_TRANSLATIONS, billed_month, billed_month_for, extract_gas_date,
    extract_light_date, translate_month_abbrev,
};

use crate::config::Config;
use std::fmt;

/// Marker phrase for natural-gas invoices (matched case-insensitively)
const GAS_MARKER: &str = "gas natural";

/// Bill category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillKind {
    Light,
    Gas,
}

impl fmt::Display for BillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillKind::Light => f.write_str("light"),
            BillKind::Gas => f.write_str("gas"),
        }
    }
}

/// Decide the bill category
/// The filename is authoritative for light bills; gas bills are found by content.
pub fn classify(file_name: &str, text: &str, config: &Config) -> Option<BillKind> {
    if config.is_light_bill_filename(file_name) {
        return Some(BillKind::Light);
    }

    if text.to_lowercase().contains(GAS_MARKER) {
        return Some(BillKind::Gas);
    }

    None
}

/// Destination filename for a light bill
pub fn light_bill_filename(account_id: &str, month: &str) -> String {
    format!("Light bill - {} ({}).pdf", account_id, month)
}

/// Destination filename for a gas bill
pub fn gas_bill_filename(account_id: &str, month: &str) -> String {
    format!("Gas bill - {} ({}).pdf", account_id, month)
}
