use assert_approx_eq::assert_approx_eq;

use crate::analysis::Verdict;
use crate::policy::Policy;
use crate::request_driven::{concurrent, prioritized_blocking, serial};
use crate::tests::{paper_example, task};

#[test]
fn serial_paper_example() {
    let tasks = paper_example();
    let bounds = serial::response_time_bounds(&tasks);
    assert_approx_eq!(bounds.response_times[0], 23.0);
    assert_approx_eq!(bounds.response_times[1], 53.0);
    assert_approx_eq!(bounds.request_blocking[0][0], 5.0);
    assert_approx_eq!(bounds.request_blocking[1][0], 8.0);

    let analysis = Policy::RequestDriven.analyze(&tasks);
    assert_eq!(analysis.verdict, Verdict::Schedulable);
}

#[test]
fn serial_accelerator_user_behind_cpu_task() {
    // The CPU-only task takes the accelerator user's interventions for
    // free (there are none); the accelerator user only suffers
    // interference from the CPU-only task.
    let tasks = vec![
        task(5.0, 20.0, 20.0, &[]),
        task(5.0, 40.0, 40.0, &[(0.0, 10.0, 1.0)]),
    ];
    assert_approx_eq!(prioritized_blocking(&tasks, 0), 0.0);

    let bounds = serial::response_time_bounds(&tasks);
    assert_approx_eq!(bounds.response_times[0], 5.0);
    assert_approx_eq!(bounds.response_times[1], 20.0);
}

#[test]
fn prioritized_blocking_is_zero_without_lower_priority_tasks() {
    let tasks = paper_example();
    assert_approx_eq!(prioritized_blocking(&tasks, tasks.len() - 1), 0.0);
}

#[test]
fn serial_overload_is_rejected_without_divergence() {
    // ΣG > D: the recurrence converges immediately, above the deadline.
    let tasks = vec![task(25.0, 50.0, 50.0, &[(0.0, 26.0, 1.0)])];
    let bounds = serial::response_time_bounds(&tasks);
    assert_approx_eq!(bounds.response_times[0], 51.0);
    assert_eq!(
        Policy::RequestDriven.analyze(&tasks).verdict,
        Verdict::Unschedulable { task: 0 }
    );
}

#[test]
fn serial_divergent_recurrence_is_reported_infeasible() {
    // Higher-priority demand saturates the core, so the lowest-priority
    // task's recurrence climbs past 5·D and is cut off there.
    let tasks = vec![
        task(25.0, 50.0, 50.0, &[]),
        task(25.0, 50.0, 50.0, &[]),
        task(10.0, 50.0, 50.0, &[]),
    ];
    let bounds = serial::response_time_bounds(&tasks);
    assert_approx_eq!(bounds.response_times[0], 25.0);
    assert_approx_eq!(bounds.response_times[1], 50.0);
    assert!(bounds.response_times[2].is_infinite());
    assert_eq!(
        Policy::RequestDriven.analyze(&tasks).verdict,
        Verdict::Unschedulable { task: 2 }
    );
}

#[test]
fn concurrent_paper_example() {
    let tasks = paper_example();
    let bounds = concurrent::response_time_bounds(&tasks, false);
    // The whole-accelerator request of the top task admits no
    // liquefied low-priority mass, so its direct blocking vanishes.
    assert_approx_eq!(bounds.response_times[0], 18.0);
    assert_approx_eq!(bounds.response_times[1], 53.0);
    assert_approx_eq!(bounds.request_blocking[0][0], 0.0);
    assert_approx_eq!(bounds.request_blocking[1][0], 8.0);
}

#[test]
fn concurrent_wavefront_liquefaction_mode() {
    let tasks = paper_example();
    let bounds = concurrent::response_time_bounds(&tasks, true);
    // Folding the wavefront mass into the liquefaction sum keeps the
    // low-priority request visible to the top task.
    assert_approx_eq!(bounds.response_times[0], 23.0);
    assert_approx_eq!(bounds.response_times[1], 53.0);
    assert_approx_eq!(bounds.request_blocking[0][0], 5.0);
    assert_approx_eq!(bounds.request_blocking[1][0], 8.0);
}

#[test]
fn concurrent_half_fraction_pair() {
    // Two half-accelerator tasks: the wavefront of the top task is
    // filled by the bottom one, leaving (almost) no capacity for
    // liquefaction, and the bin-fill phase exits degenerately at zero.
    let tasks = vec![
        task(2.0, 20.0, 20.0, &[(0.0, 10.0, 0.5)]),
        task(2.0, 20.0, 20.0, &[(0.0, 10.0, 0.5)]),
    ];
    let bounds = concurrent::response_time_bounds(&tasks, false);
    assert_approx_eq!(bounds.response_times[0], 12.0);
    assert_approx_eq!(bounds.response_times[1], 24.0);
    assert_approx_eq!(bounds.request_blocking[0][0], 0.0);
    assert_approx_eq!(bounds.request_blocking[1][0], 8.0);
    assert_eq!(
        Policy::RequestDrivenConc {
            wavefront_liquefaction: false
        }
        .analyze(&tasks)
        .verdict,
        Verdict::Unschedulable { task: 1 }
    );
}

#[test]
fn concurrent_simple_mode_is_no_tighter() {
    // The simplified mode keeps the full wavefront mass liquid, so its
    // bounds dominate the bin-fill variant's.
    let tasks = vec![
        task(2.0, 20.0, 20.0, &[(0.0, 10.0, 0.5)]),
        task(2.0, 20.0, 20.0, &[(0.0, 10.0, 0.5)]),
    ];
    let precise = concurrent::response_time_bounds(&tasks, false);
    let simple = concurrent::response_time_bounds(&tasks, true);
    for (p, s) in precise.response_times.iter().zip(&simple.response_times) {
        assert!(p <= s);
    }
    assert_approx_eq!(simple.response_times[0], 20.0);
}
