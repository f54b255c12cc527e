/*! The job-driven schedulability tests.

Job-driven analysis bounds the blocking of a whole job at once instead
of request by request: all accelerator requests released within the
job's response window are charged together. The [serial] variant
assumes a serialized accelerator; the [concurrent] variant (JDC)
spreads the other tasks' requests over the sharable capacity via a
single job-wide liquefaction, with a request-oriented refinement
(RO-JDC) that advances through the job's own requests. */

use crate::task::Task;
use crate::taskset;
use crate::time::Time;

pub mod concurrent;
pub mod serial;


/// Per-task result tables of a concurrent job-driven analysis.
#[derive(Debug, Clone)]
pub struct Bounds {
    /// Worst-case response time per task, in priority order.
    pub response_times: Vec<Time>,
    /// Direct blocking per job.
    pub job_blocking: Vec<Time>,
}

/// Prioritized blocking under the job-driven approach: every instance
/// of a lower-priority task on the same core that falls in the window
/// contributes its total CPU-side intervention,
/// `Σ_{j > index, core(j) = core(index)} θ_j(window) · ΣGm_j`.
pub fn prioritized_blocking(tasks: &[Task], index: usize, window: Time) -> Time {
    let task = &tasks[index];
    tasks
        .iter()
        .skip(index + 1)
        .filter(|lp| lp.core() == task.core())
        .map(|lp| taskset::theta(lp, window) * lp.total_intervention())
        .sum()
}
