//! Bill sorter - files downloaded utility-bill PDFs automatically
//!
//! # Features
//! - Watches a download folder for new PDFs and `.tmp` download markers
//! - Classifies light (electricity) and natural-gas bills
//! - Derives the billed month from the date printed on the bill
//! - Moves each bill to its destination folder under a descriptive name

pub mod config;
pub mod error;
pub mod parser;
pub mod pdf;
pub mod sorter;
pub mod watcher;

pub use config::Config;
pub use error::SortError;
pub use parser::BillKind;
pub use sorter::{MoveOutcome, Sorter};
