/*! The hybrid schedulability tests.

The hybrid analysis combines the request-driven and job-driven bounds:
both are valid upper bounds on direct blocking, so per task the smaller
of the two is taken, and a differential prioritized-blocking term is
added on top. The [serial] variant reconstructs the combination from
the serial tables; the [concurrent] variant takes the minimum of the
stored concurrent tables directly. */

use crate::task::Task;
use crate::taskset;
use crate::time::Time;

pub mod concurrent;
pub mod serial;

#[cfg(test)]
mod tests;

/// Prioritized blocking as a wave over each lower-priority task's
/// CPU-side interventions: walk the task's interventions in descending
/// order, granting each `φ = min(θ, budget)` execution slots out of an
/// `n + 1` suspension-boundary budget, until the budget or the
/// interventions run out.
///
/// Shared by the hybrid variants and the FIFO test, which both start
/// the walk at the largest intervention.
pub fn prioritized_blocking_wave(tasks: &[Task], index: usize, window: Time) -> Time {
    let task = &tasks[index];
    let boundaries = task.num_segments() as Time + 1.0;

    let mut blocking = 0.0;
    for lp in tasks.iter().skip(index + 1) {
        if lp.core() != task.core() {
            continue;
        }
        let theta = taskset::theta(lp, window);
        let interventions = lp.interventions_descending();

        let mut budget = boundaries;
        let mut rank = 0;
        let mut intervention = interventions.first().copied().unwrap_or(0.0);
        while budget > 0.0 && intervention > 0.0 {
            let phi = theta.min(budget);
            budget -= phi;
            blocking += phi * intervention;

            rank += 1;
            intervention = interventions.get(rank).copied().unwrap_or(0.0);
        }
    }
    blocking
}
