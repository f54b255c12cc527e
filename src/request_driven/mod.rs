/*! The request-driven schedulability tests.

Request-driven analysis bounds the blocking of every accelerator
request of a task individually and sums the per-request bounds. The
[serial] variant assumes a serialized accelerator (one request at a
time); the [concurrent] variant admits fraction-sharable requests and
bounds direct blocking with the wavefront and liquefaction
constructions of [crate::wavefront]. */

use crate::task::Task;
use crate::time::Time;

pub mod concurrent;
pub mod serial;

#[cfg(test)]
mod tests;

/// Per-task result tables of a request-driven analysis.
#[derive(Debug, Clone)]
pub struct Bounds {
    /// Worst-case response time per task, in priority order.
    pub response_times: Vec<Time>,
    /// Direct blocking per request, one row per task indexed by
    /// segment position.
    pub request_blocking: Vec<Vec<Time>>,
}

/// Prioritized blocking under the request-driven approach: at each of
/// the `n + 1` suspension boundaries of task `index`, one largest
/// CPU-side intervention of every lower-priority task on the same core
/// may execute. Tasks without accelerator requests suffer this too.
pub fn prioritized_blocking(tasks: &[Task], index: usize) -> Time {
    let task = &tasks[index];
    let per_boundary: Time = tasks
        .iter()
        .skip(index + 1)
        .filter(|lp| lp.core() == task.core())
        .map(|lp| lp.max_intervention())
        .sum();
    (task.num_segments() as Time + 1.0) * per_boundary
}
