use assert_approx_eq::assert_approx_eq;

use crate::analysis::Verdict;
use crate::partition::{sync_aware_worst_fit_decreasing, worst_fit_decreasing, PartitionError};
use crate::policy::Policy;
use crate::taskset::RateMonotonic;
use crate::tests::task;

#[test]
fn wfd_spreads_identical_tasks_evenly() {
    let tasks = vec![
        task(2.0, 20.0, 20.0, &[(0.0, 1.0, 1.0)]),
        task(2.0, 20.0, 20.0, &[(0.0, 1.0, 1.0)]),
        task(2.0, 20.0, 20.0, &[(0.0, 1.0, 1.0)]),
        task(2.0, 20.0, 20.0, &[(0.0, 1.0, 1.0)]),
    ];
    let partitioned =
        worst_fit_decreasing(&tasks, 2, Policy::RequestDriven, &RateMonotonic).unwrap();
    assert_eq!(partitioned.tasks.len(), 4);
    let on_core = |core| {
        partitioned
            .tasks
            .iter()
            .filter(|t| t.core() == core)
            .count()
    };
    assert_eq!(on_core(0), 2);
    assert_eq!(on_core(1), 2);
    assert_eq!(partitioned.analysis.verdict, Verdict::Schedulable);
}

#[test]
fn wfd_verdict_is_reproducible_on_the_returned_assignment() {
    let tasks = vec![
        task(2.0, 20.0, 20.0, &[(0.0, 1.0, 1.0)]),
        task(2.0, 20.0, 20.0, &[(0.0, 1.0, 1.0)]),
        task(5.0, 50.0, 50.0, &[]),
    ];
    let policy = Policy::HybridConc;
    let partitioned = worst_fit_decreasing(&tasks, 2, policy, &RateMonotonic).unwrap();
    let replay = policy.analyze(&partitioned.tasks);
    assert_eq!(replay.verdict, partitioned.analysis.verdict);
    assert_eq!(replay.response_times, partitioned.analysis.response_times);
}

#[test]
fn wfd_retries_excluded_cores_with_a_new_assignment() {
    // The least-loaded core holds the big-intervention task, whose
    // prioritized blocking sinks the latecomer there; the retry on the
    // busier core succeeds.
    let tasks = vec![
        task(40.0, 100.0, 100.0, &[]),
        task(30.0, 100.0, 100.0, &[(4.0, 1.0, 1.0)]),
        task(0.5, 10.0, 10.0, &[(0.0, 0.5, 1.0)]),
    ];
    let partitioned =
        worst_fit_decreasing(&tasks, 2, Policy::RequestDriven, &RateMonotonic).unwrap();
    let latecomer = partitioned
        .tasks
        .iter()
        .find(|t| t.period() == 10.0)
        .unwrap();
    let intervention_heavy = partitioned
        .tasks
        .iter()
        .find(|t| t.max_intervention() == 4.0)
        .unwrap();
    assert_eq!(latecomer.core(), 0);
    assert_eq!(intervention_heavy.core(), 1);
    assert_eq!(partitioned.analysis.verdict, Verdict::Schedulable);
}

#[test]
fn wfd_reports_infeasible_once_every_core_is_excluded() {
    let tasks = vec![task(15.0, 20.0, 20.0, &[]), task(15.0, 20.0, 20.0, &[])];
    let result = worst_fit_decreasing(&tasks, 1, Policy::RequestDriven, &RateMonotonic);
    assert_eq!(result.unwrap_err(), PartitionError::Infeasible);
}

#[test]
fn wfd_on_an_empty_set_is_a_no_op() {
    let partitioned =
        worst_fit_decreasing(&[], 2, Policy::RequestDriven, &RateMonotonic).unwrap();
    assert!(partitioned.tasks.is_empty());
    assert_eq!(partitioned.analysis.verdict, Verdict::Schedulable);
}

#[test]
fn sync_aware_wfd_reserves_cores_for_suspending_tasks() {
    let tasks = vec![
        task(2.0, 20.0, 20.0, &[(0.0, 2.0, 1.0)]),
        task(2.0, 20.0, 20.0, &[(0.0, 2.0, 1.0)]),
        task(2.0, 20.0, 20.0, &[]),
        task(2.0, 20.0, 20.0, &[]),
    ];
    // Accelerator users carry half the CPU utilization, so one of the
    // two cores is reserved for them (the top one).
    let partitioned =
        sync_aware_worst_fit_decreasing(&tasks, 2, Policy::RequestDriven, &RateMonotonic).unwrap();
    for placed in &partitioned.tasks {
        if placed.uses_accelerator() {
            assert_eq!(placed.core(), 1);
        } else {
            assert_eq!(placed.core(), 0);
        }
    }
    assert_eq!(partitioned.analysis.verdict, Verdict::Schedulable);
}

#[test]
fn sync_aware_wfd_without_accelerator_users_degenerates_to_wfd() {
    let tasks = vec![task(2.0, 20.0, 20.0, &[]), task(3.0, 30.0, 30.0, &[])];
    let partitioned =
        sync_aware_worst_fit_decreasing(&tasks, 2, Policy::RequestDriven, &RateMonotonic).unwrap();
    assert_eq!(partitioned.tasks.len(), 2);
    assert_eq!(partitioned.analysis.verdict, Verdict::Schedulable);
    let plain = worst_fit_decreasing(&tasks, 2, Policy::RequestDriven, &RateMonotonic).unwrap();
    let cores = |p: &crate::partition::Partitioned| {
        let mut c: Vec<usize> = p.tasks.iter().map(|t| t.core()).collect();
        c.sort_unstable();
        c
    };
    assert_eq!(cores(&partitioned), cores(&plain));
}

#[test]
fn assigned_utilization_spread() {
    // WFD keeps the load balanced: the two heavy tasks land on
    // different cores.
    let tasks = vec![
        task(8.0, 20.0, 20.0, &[]),
        task(8.0, 20.0, 20.0, &[]),
        task(1.0, 20.0, 20.0, &[]),
        task(1.0, 20.0, 20.0, &[]),
    ];
    let partitioned =
        worst_fit_decreasing(&tasks, 2, Policy::RequestDriven, &RateMonotonic).unwrap();
    let heavy_cores: Vec<usize> = partitioned
        .tasks
        .iter()
        .filter(|t| t.cpu_wcet() == 8.0)
        .map(|t| t.core())
        .collect();
    assert_eq!(heavy_cores.len(), 2);
    assert_ne!(heavy_cores[0], heavy_cores[1]);
    let util: f64 = partitioned
        .tasks
        .iter()
        .filter(|t| t.core() == 0)
        .map(|t| t.utilization())
        .sum();
    assert_approx_eq!(util, 0.45);
}
