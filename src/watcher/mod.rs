//! Folder watcher - filters arrival events and feeds them to the sorter one at a time

use crate::error::SortError;
use crate::pdf::TextExtractor;
use crate::sorter::{MoveOutcome, Sorter};
use anyhow::{Context, Result};
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{info, warn};

/// Pending arrivals held while a file is being handled.
/// When full, the notification thread waits rather than dropping events.
const EVENT_QUEUE_CAPACITY: usize = 64;

/// What happened to a single arrival notification
#[derive(Debug)]
pub enum Arrival {
    /// Directory or unsupported extension
    Ignored,
    /// The PDF was no longer there when its turn came
    AlreadyGone,
    /// The sorter ran (or the `.tmp` target could not be found)
    Sorted(Result<MoveOutcome, SortError>),
}

/// Decides which arrivals reach the sorter
pub struct ArrivalFilter<E> {
    sorter: Sorter<E>,
}

impl<E: TextExtractor> ArrivalFilter<E> {
    pub fn new(sorter: Sorter<E>) -> Self {
        Self { sorter }
    }

    /// Handle one creation notification to completion
    pub async fn handle(&self, path: &Path) -> Arrival {
        if path.is_dir() {
            return Arrival::Ignored;
        }

        info!("New file detected: {}", path.display());

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let result = match extension.as_deref() {
            Some("tmp") => self.resolve_download().await,
            Some("pdf") => {
                if !path.is_file() {
                    info!("{} is already gone, skipping", path.display());
                    return Arrival::AlreadyGone;
                }
                self.sorter.process(path)
            }
            _ => {
                info!("File ignored (not a PDF): {}", path.display());
                return Arrival::Ignored;
            }
        };

        match &result {
            Ok(outcome) => info!(
                "Filed {} bill for {} ({}) at {}",
                outcome.kind,
                outcome.account_id,
                outcome.billed_month,
                outcome.destination.display()
            ),
            Err(e) => warn!("{}", e),
        }

        Arrival::Sorted(result)
    }

    /// Wait for an in-progress download, then look for the light bill it should produce
    async fn resolve_download(&self) -> Result<MoveOutcome, SortError> {
        let config = self.sorter.config();
        info!(
            "Temporary file detected, waiting {:?} for the download to finish",
            config.tmp_settle_delay
        );
        sleep(config.tmp_settle_delay).await;

        let candidates = config.light_bill_filenames();
        for name in &candidates {
            let candidate = config.source_dir.join(name);
            if candidate.is_file() {
                info!("Found {} after waiting", name);
                return self.sorter.process(&candidate);
            }
        }

        Err(SortError::TmpTargetNotFound {
            expected: candidates.to_vec(),
            dir: config.source_dir.clone(),
        })
    }
}

/// Paths an event makes appear in the watched folder.
/// Files moved in from elsewhere count as arrivals, not only fresh creations.
fn arrival_paths(event: Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(RenameMode::To)) => event.paths,
        // [from, to]
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            event.paths.into_iter().nth(1).into_iter().collect()
        }
        _ => Vec::new(),
    }
}

/// Queue the arrivals of one notification, in order.
/// Blocks while the queue is full; returns false once the consumer is gone.
fn forward_event(tx: &mpsc::Sender<PathBuf>, result: Result<Event, notify::Error>) -> bool {
    match result {
        Ok(event) => arrival_paths(event)
            .into_iter()
            .all(|path| tx.blocking_send(path).is_ok()),
        Err(e) => {
            warn!("Watch error: {}", e);
            true
        }
    }
}

/// Watch the source folder until `shutdown` resolves, handling arrivals strictly in order
pub async fn run<E, S>(filter: ArrivalFilter<E>, shutdown: S) -> Result<()>
where
    E: TextExtractor,
    S: Future<Output = std::io::Result<()>>,
{
    let source_dir = filter.sorter.config().source_dir.clone();
    let (tx, mut rx) = mpsc::channel::<PathBuf>(EVENT_QUEUE_CAPACITY);

    // The callback runs on the notifier's own thread, so blocking there is fine
    let mut watcher = RecommendedWatcher::new(
        move |result: Result<Event, notify::Error>| {
            forward_event(&tx, result);
        },
        notify::Config::default(),
    )
    .context("failed to create filesystem watcher")?;

    watcher
        .watch(&source_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", source_dir.display()))?;

    info!("Watching {} for new bills...", source_dir.display());

    tokio::pin!(shutdown);

    loop {
        let path = tokio::select! {
            signal = &mut shutdown => {
                signal.context("failed to listen for shutdown signal")?;
                info!("Interrupt received, stopping watcher");
                break;
            }
            arrival = rx.recv() => match arrival {
                Some(path) => path,
                None => break,
            },
        };

        // Shutdown is honoured during the `.tmp` wait. `Sorter::process` parses the
        // PDF and moves the file synchronously on this single worker, so a signal
        // arriving then takes effect once that file is done.
        tokio::select! {
            signal = &mut shutdown => {
                signal.context("failed to listen for shutdown signal")?;
                info!("Interrupt received while handling {}, stopping watcher", path.display());
                break;
            }
            _ = filter.handle(&path) => {}
        }
    }

    drop(watcher);
    info!("Watcher stopped");
    Ok(())
}
