//! Date extraction and billed-month arithmetic

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// Month labels, index 0 = January
pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Spanish month abbreviations and the English ones chrono understands.
/// Checked in order; the first match wins.
pub const MONTH_TRANSLATIONS: &[(&str, &str)] = &[
    ("Ene", "Jan"),
    ("Feb", "Feb"),
    ("Mar", "Mar"),
    ("Abr", "Apr"),
    ("May", "May"),
    ("Jun", "Jun"),
    ("Jul", "Jul"),
    ("Ago", "Aug"),
    ("Sep", "Sep"),
    ("Set", "Sep"),
    ("Oct", "Oct"),
    ("Nov", "Nov"),
    ("Dic", "Dec"),
];

/// DD-Mon-YYYY after a due-date label
static LABELED_LIGHT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Fecha\s+de\s+Vencimiento|Vencimiento)[\s\S]{0,50}?(\d{2})-(\p{L}{3})-(\d{4})")
        .expect("valid labeled light date regex")
});

/// DD-Mon-YYYY anywhere
static LIGHT_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2})-(\p{L}{3})-(\d{4})").expect("valid light date regex")
});

/// DD/MM/YYYY anywhere
static GAS_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}/\d{2}/\d{4}").expect("valid gas date regex"));

/// Map a local month abbreviation to its canonical form.
/// Abbreviations not in the table are returned unchanged.
pub fn translate_month_abbrev(abbrev: &str) -> &str {
    MONTH_TRANSLATIONS
        .iter()
        .find(|(local, _)| local.eq_ignore_ascii_case(abbrev))
        .map(|(_, canonical)| *canonical)
        .unwrap_or(abbrev)
}

/// Due date of a light bill
/// Priority: labeled date > first DD-Mon-YYYY in the text.
/// An unparseable labeled date is not replaced by an unlabeled one.
pub fn extract_light_date(text: &str) -> Option<NaiveDate> {
    let caps = LABELED_LIGHT_DATE
        .captures(text)
        .or_else(|| LIGHT_DATE.captures(text))?;

    let day = caps.get(1)?.as_str();
    let month = translate_month_abbrev(caps.get(2)?.as_str());
    let year = caps.get(3)?.as_str();

    NaiveDate::parse_from_str(&format!("{}-{}-{}", day, month, year), "%d-%b-%Y").ok()
}

/// Date of a gas bill: the first DD/MM/YYYY in the text, if it is a real date
pub fn extract_gas_date(text: &str) -> Option<NaiveDate> {
    let m = GAS_DATE.find(text)?;
    NaiveDate::parse_from_str(m.as_str(), "%d/%m/%Y").ok()
}

/// Label of the month `offset` months before `month` (1-based), wrapping past January
pub fn billed_month(month: u32, offset: u32) -> &'static str {
    let month0 = month.clamp(1, 12) - 1;
    let index = (month0 + 12 - offset % 12) % 12;
    MONTH_NAMES[index as usize]
}

/// Billed month for a document date
pub fn billed_month_for(date: NaiveDate, offset: u32) -> &'static str {
    billed_month(date.month(), offset)
}
