/*! Per-request indirect blocking and concurrency-induced
serialization (CIS) bounds.

While a request occupies a fraction `F` of the accelerator, CPU-side
interventions of higher-priority tasks on the same core that fit in the
remaining `1 − F` of capacity can preempt the requester's dispatch. The
CIS term pessimistically charges the largest such intervention of every
higher-priority task, once per suspension boundary. */

use crate::task::Task;
use crate::time::Time;

/// Number of self-suspensions per accelerator request.
const ETA: f64 = 1.0;

/// Worst-case concurrency-induced serialization suffered by request
/// `seg` of task `index`:
/// `(η + 1) · Σ_{j < index, core(j) = core(index)} max Gm_j | F_j ≤ 1 − F`.
pub fn request_cis(tasks: &[Task], index: usize, seg: usize) -> Time {
    let task = &tasks[index];
    let segment = &task.segments()[seg];
    if segment.length() == 0.0 {
        return 0.0;
    }

    let residual = 1.0 - segment.fraction;
    let blocking: Time = tasks[..index]
        .iter()
        .filter(|hp| hp.core() == task.core())
        .map(|hp| hp.max_intervention_within(residual))
        .sum();
    (ETA + 1.0) * blocking
}

/// Worst-case indirect blocking suffered by request `seg` of task
/// `index`. With a single accelerator there are no other resources to
/// wait for; the hook is retained for multi-accelerator extensions.
pub fn request_indirect_blocking(_tasks: &[Task], _index: usize, _seg: usize) -> Time {
    0.0
}

/// Worst-case response time of one request: its own execution plus
/// indirect blocking plus CIS.
pub fn request_response_time(tasks: &[Task], index: usize, seg: usize) -> Time {
    let segment = &tasks[index].segments()[seg];
    if segment.length() == 0.0 {
        return 0.0;
    }
    segment.length()
        + request_indirect_blocking(tasks, index, seg)
        + request_cis(tasks, index, seg)
}
