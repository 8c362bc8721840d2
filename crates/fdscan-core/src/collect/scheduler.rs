//! Collection scheduler: a fixed worker pool draining the PID list.
//!
//! The registry is fully populated before any worker can observe it; the
//! workers then race over a single shared cursor, so each PID is claimed by
//! exactly one worker. A worker enumerates its claimed process completely
//! before the next claim. `thread::scope` is the join barrier: control
//! returns to the caller only after every worker has drained the list, and
//! nothing reads the records concurrently after that point.
//!
//! There is no ordering across processes while workers race; each worker
//! tags results with the registry index, and the merge after the join
//! restores registry order.

use super::enumerate::enumerate;
use super::registry;
use super::types::ProcRecord;
use fdscan_common::{Error, ProcessId, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tracing::{debug, span, Level};

/// Default worker-pool size. Fixed at startup, independent of how many
/// processes end up in the registry.
pub const DEFAULT_WORKERS: usize = 4;

/// Options for a collection run.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Worker-pool size; values below 1 are clamped to 1.
    pub workers: usize,
    /// Restrict the scan to these PIDs (empty = the whole process table).
    pub pids: Vec<u32>,
}

impl Default for CollectOptions {
    fn default() -> Self {
        CollectOptions {
            workers: DEFAULT_WORKERS,
            pids: Vec::new(),
        }
    }
}

/// Run one collection pass: populate the registry, fan PIDs out to the
/// worker pool, and return the records in registry order after the join
/// barrier. No cancellation, no timeout, no retries: a started run always
/// drains the list or aborts on a fatal error.
pub fn collect(options: &CollectOptions) -> Result<Vec<ProcRecord>> {
    let _span = span!(Level::DEBUG, "collect").entered();

    let pids: Vec<ProcessId> = if options.pids.is_empty() {
        registry::collect_pids()?
    } else {
        options.pids.iter().copied().map(ProcessId).collect()
    };

    let procs = run_pool(&pids, options.workers.max(1))?;
    debug!(
        processes = procs.len(),
        files = procs.iter().map(|p| p.files.len()).sum::<usize>(),
        "collection complete"
    );
    Ok(procs)
}

/// Drain `pids` with `workers` threads over a shared atomic cursor.
///
/// `fetch_add` gives at-most-once delivery without a lock around the list;
/// the slice itself is immutable while the scope is live. A panicking
/// worker surfaces as a fatal error, as does any fatal enumeration error.
fn run_pool(pids: &[ProcessId], workers: usize) -> Result<Vec<ProcRecord>> {
    let cursor = AtomicUsize::new(0);

    let joined: Vec<thread::Result<Vec<(usize, Result<ProcRecord>)>>> = thread::scope(|s| {
        let cursor = &cursor;
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                s.spawn(move || {
                    let mut local = Vec::new();
                    loop {
                        let index = cursor.fetch_add(1, Ordering::Relaxed);
                        let Some(&pid) = pids.get(index) else {
                            break;
                        };
                        local.push((index, enumerate(pid)));
                    }
                    local
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join()).collect()
    });

    let mut indexed = Vec::with_capacity(pids.len());
    for outcome in joined {
        let local = outcome.map_err(|_| Error::WorkerPanicked)?;
        indexed.extend(local);
    }
    indexed.sort_by_key(|&(index, _)| index);
    indexed.into_iter().map(|(_, record)| record).collect()
}
