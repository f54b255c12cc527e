/*! Task-vector level queries and priority orderings.

A task set is an ordered `Vec<Task>` in which *position is priority*:
index 0 is the highest-priority task. The engines rely on this
invariant; use [sort_by_priority] (or any [PriorityOrder]) to establish
it before analysis. */

use std::cmp::Ordering;

use auto_impl::auto_impl;

use crate::task::{InvalidTask, Task};
use crate::time::{ceil_comp, Time};

/// A total priority ordering over tasks, chosen by the driver.
///
/// Implementations must form a strict weak order: `precedes(a, b)`
/// returns true iff `a` takes priority over `b`. Ties are broken by
/// the stable sort, i.e. tasks keep their relative input order.
#[auto_impl(&, Box)]
pub trait PriorityOrder {
    /// Does `a` take priority over `b`?
    fn precedes(&self, a: &Task, b: &Task) -> bool;

    /// The ordering induced by [PriorityOrder::precedes].
    fn ordering(&self, a: &Task, b: &Task) -> Ordering {
        if self.precedes(a, b) {
            Ordering::Less
        } else if self.precedes(b, a) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Rate-monotonic priorities: shorter period, higher priority.
#[derive(Debug, Clone, Copy, Default)]
pub struct RateMonotonic;

impl PriorityOrder for RateMonotonic {
    fn precedes(&self, a: &Task, b: &Task) -> bool {
        a.period() < b.period()
    }
}

/// Deadline-monotonic priorities: shorter deadline, higher priority.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeadlineMonotonic;

impl PriorityOrder for DeadlineMonotonic {
    fn precedes(&self, a: &Task, b: &Task) -> bool {
        a.deadline() < b.deadline()
    }
}

/// Establish the position-is-priority invariant under the given order.
pub fn sort_by_priority<P: PriorityOrder + ?Sized>(tasks: &mut [Task], order: &P) {
    tasks.sort_by(|a, b| order.ordering(a, b));
}

/// Upper bound on the number of instances of a low-priority task that
/// effectively fall within a window of length `window`, discounting the
/// task's own CPU demand: `θ = ⌈(window + D − E) / T⌉`.
pub fn theta(lp_task: &Task, window: Time) -> Time {
    ceil_comp((window + lp_task.deadline() - lp_task.cpu_demand()) / lp_task.period())
}

/// Total CPU utilization of the set: `Σ (C + ΣGm) / T`.
pub fn cpu_utilization(tasks: &[Task]) -> f64 {
    tasks.iter().map(|t| t.utilization()).sum()
}

/// CPU utilization contributed by accelerator-using tasks only.
pub fn accelerator_user_cpu_utilization(tasks: &[Task]) -> f64 {
    tasks
        .iter()
        .filter(|t| t.num_segments() != 0)
        .map(|t| t.utilization())
        .sum()
}

/// Accelerator utilization of the set: `Σ ΣGe / T`.
pub fn accelerator_utilization(tasks: &[Task]) -> f64 {
    tasks
        .iter()
        .map(|t| t.total_execution() / t.period())
        .sum()
}

/// Clone the whole vector with CPU and accelerator frequencies scaled.
pub fn scale_frequencies(
    tasks: &[Task],
    cpu_factor: f64,
    accel_factor: f64,
) -> Result<Vec<Task>, InvalidTask> {
    tasks
        .iter()
        .map(|t| {
            let mut scaled = t.clone();
            scaled.scale_cpu(cpu_factor)?;
            scaled.scale_accel(accel_factor)?;
            Ok(scaled)
        })
        .collect()
}
