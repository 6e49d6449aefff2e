//! `--watch`: recompiles whenever the entry file or a file it reads changes
//! (spec §9 supplemented features). `notify` emits filesystem events; an
//! 80ms debounce collapses the burst of events most editors fire for a
//! single save.

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::Duration;
use tracing::{debug, warn};

const DEBOUNCE: Duration = Duration::from_millis(80);

/// Watches `dir` and calls `on_change` once per debounced burst of events,
/// forever (an operator interrupts the binary with Ctrl-C to stop).
pub fn watch(dir: &Path, mut on_change: impl FnMut()) -> notify::Result<()> {
    let (tx, rx) = channel::<notify::Result<Event>>();
    let mut watcher: RecommendedWatcher = notify::recommended_watcher(tx)?;
    watcher.watch(dir, RecursiveMode::Recursive)?;

    loop {
        match rx.recv() {
            Ok(Ok(_first)) => {
                // Drain whatever else arrives within the debounce window so
                // one save (which often touches a file twice) triggers one
                // recompile.
                loop {
                    match rx.recv_timeout(DEBOUNCE) {
                        Ok(Ok(_)) => continue,
                        Ok(Err(e)) => warn!(error = %e, "watch error while debouncing"),
                        Err(RecvTimeoutError::Timeout) => break,
                        Err(RecvTimeoutError::Disconnected) => return Ok(()),
                    }
                }
                debug!("file change detected, recompiling");
                on_change();
            }
            Ok(Err(e)) => warn!(error = %e, "watch error"),
            Err(_) => return Ok(()),
        }
    }
}
