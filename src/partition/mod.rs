/*! Worst-Fit-Decreasing task-to-core partitioning.

Tasks are placed one by one in decreasing CPU-utilization order, each
on the least-loaded candidate core whose resulting partial set the
chosen analysis accepts. A rejected core is excluded and the placement
retried; the partition is infeasible once every candidate core of some
task has been excluded.

The synchronization-aware variant first packs all accelerator-using
(self-suspending) tasks onto a reserved block of cores, sized
proportionally to their share of the CPU utilization, so that
accelerator clients are not spread across the whole platform. */

use thiserror::Error;

use crate::analysis::Analysis;
use crate::policy::Policy;
use crate::task::Task;
use crate::taskset::{self, PriorityOrder};

#[cfg(test)]
mod tests;

/// Partitioning failure: some task could not be placed on any
/// candidate core.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PartitionError {
    #[error("every candidate core was excluded while placing a task")]
    Infeasible,
}

/// A successful partition: the priority-sorted task vector with final
/// core assignments, and the analysis of that final assignment.
#[derive(Debug, Clone)]
pub struct Partitioned {
    pub tasks: Vec<Task>,
    pub analysis: Analysis,
}

/// The core with minimum utilization among `start_core..`, excluding
/// the listed cores. Ties go to the lowest core index.
fn least_loaded_core(core_util: &[f64], start_core: usize, excluded: &[usize]) -> Option<usize> {
    core_util
        .iter()
        .enumerate()
        .skip(start_core)
        .filter(|(core, _)| !excluded.contains(core))
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(core, _)| core)
}

/// Place one task: try candidate cores in least-loaded order until the
/// analysis accepts the grown set, excluding each rejected core.
fn place_task<P: PriorityOrder + ?Sized>(
    task: &Task,
    mapped: &mut Vec<Task>,
    core_util: &mut [f64],
    start_core: usize,
    policy: Policy,
    order: &P,
) -> Result<Analysis, PartitionError> {
    let utilization = task.utilization();
    let slot = mapped.len();
    mapped.push(task.clone());

    let mut excluded = Vec::new();
    loop {
        let chosen = match least_loaded_core(core_util, start_core, &excluded) {
            Some(core) => core,
            None => {
                log::debug!("no candidate core left, partition infeasible");
                return Err(PartitionError::Infeasible);
            }
        };
        mapped[slot].set_core(chosen);

        let mut by_priority = mapped.clone();
        taskset::sort_by_priority(&mut by_priority, order);
        let analysis = policy.analyze(&by_priority);

        if analysis.verdict.is_schedulable() {
            core_util[chosen] += utilization;
            log::debug!("placed task with utilization {utilization} on core {chosen}");
            return Ok(analysis);
        }
        log::debug!("core {chosen} rejected by the analysis, excluding it");
        excluded.push(chosen);
    }
}

/// Clone and order the input by decreasing utilization, marking every
/// task unassigned (core index `num_cores` is off the platform).
fn utilization_ordered(tasks: &[Task], num_cores: usize) -> Vec<Task> {
    let mut ordered = tasks.to_vec();
    for task in &mut ordered {
        task.set_core(num_cores);
    }
    ordered.sort_by(|a, b| b.utilization().total_cmp(&a.utilization()));
    ordered
}

/// The WFD partitioning algorithm over the chosen analysis policy.
///
/// On success the returned vector is sorted by `order` (the engines'
/// position-is-priority contract) and carries the core assignments.
pub fn worst_fit_decreasing<P: PriorityOrder + ?Sized>(
    tasks: &[Task],
    num_cores: usize,
    policy: Policy,
    order: &P,
) -> Result<Partitioned, PartitionError> {
    let ordered = utilization_ordered(tasks, num_cores);
    let mut mapped = Vec::with_capacity(ordered.len());
    let mut core_util = vec![0.0; num_cores];

    let mut analysis = policy.analyze(&mapped);
    for task in &ordered {
        analysis = place_task(task, &mut mapped, &mut core_util, 0, policy, order)?;
    }

    taskset::sort_by_priority(&mut mapped, order);
    Ok(Partitioned {
        tasks: mapped,
        analysis,
    })
}

/// The synchronization-aware WFD partitioning algorithm.
///
/// Accelerator-using tasks are placed first, restricted to the
/// reserved top block of `⌈num_cores · U_accel / U⌉` cores; the
/// remaining tasks are then placed across the whole platform.
pub fn sync_aware_worst_fit_decreasing<P: PriorityOrder + ?Sized>(
    tasks: &[Task],
    num_cores: usize,
    policy: Policy,
    order: &P,
) -> Result<Partitioned, PartitionError> {
    let cpu_util = taskset::cpu_utilization(tasks);
    let accel_cpu_util = taskset::accelerator_user_cpu_utilization(tasks);
    let reserved = if cpu_util > 0.0 {
        ((num_cores as f64 * accel_cpu_util / cpu_util).ceil() as usize).min(num_cores)
    } else {
        0
    };
    let reserved_start = num_cores - reserved;

    let ordered = utilization_ordered(tasks, num_cores);
    let mut mapped = Vec::with_capacity(ordered.len());
    let mut core_util = vec![0.0; num_cores];

    let mut analysis = policy.analyze(&mapped);
    for task in ordered.iter().filter(|t| t.uses_accelerator()) {
        analysis = place_task(task, &mut mapped, &mut core_util, reserved_start, policy, order)?;
    }
    for task in ordered.iter().filter(|t| !t.uses_accelerator()) {
        analysis = place_task(task, &mut mapped, &mut core_util, 0, policy, order)?;
    }

    taskset::sort_by_priority(&mut mapped, order);
    Ok(Partitioned {
        tasks: mapped,
        analysis,
    })
}
