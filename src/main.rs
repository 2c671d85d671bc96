//! Bill sorter - main entry point

use anyhow::Result;
use bill_sorter::pdf::PdfTextExtractor;
use bill_sorter::watcher::{self, ArrivalFilter};
use bill_sorter::{Config, Sorter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging
    tracing_subscriber::fmt::init();

    // Load .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    config.validate()?;

    let filter = ArrivalFilter::new(Sorter::new(config, PdfTextExtractor));
    watcher::run(filter, tokio::signal::ctrl_c()).await
}
