use assert_approx_eq::assert_approx_eq;

use crate::analysis::{AnalysisContext, Verdict};
use crate::fifo;
use crate::policy::Policy;
use crate::request_driven;
use crate::tests::{paper_example, task};

#[test]
fn fifo_paper_example() {
    let tasks = paper_example();
    let response_times = fifo::response_time_bounds(&tasks);
    assert_approx_eq!(response_times[0], 23.0);
    assert_approx_eq!(response_times[1], 53.0);
    assert_eq!(
        Policy::FifoConc.analyze(&tasks).verdict,
        Verdict::Schedulable
    );
}

#[test]
fn direct_blocking_charges_one_maximum_per_task() {
    let tasks = vec![
        task(2.0, 20.0, 20.0, &[(0.0, 10.0, 0.5)]),
        task(2.0, 20.0, 20.0, &[(0.0, 10.0, 0.5)]),
        task(5.0, 50.0, 50.0, &[]),
    ];
    let ctx = AnalysisContext::new(&tasks);
    assert_approx_eq!(fifo::request_direct_blocking(&ctx, 0), 10.0);
    assert_approx_eq!(fifo::request_direct_blocking(&ctx, 1), 10.0);
    // a task without accelerator execution is never blocked directly
    assert_approx_eq!(fifo::request_direct_blocking(&ctx, 2), 0.0);
}

#[test]
fn fraction_sharing_flips_fifo_rejection() {
    // Under FIFO the two half-accelerator requests serialize and the
    // top task misses; the concurrent request-driven test sees the
    // shared capacity and accepts it.
    let tasks = vec![
        task(2.0, 20.0, 20.0, &[(0.0, 10.0, 0.5)]),
        task(2.0, 20.0, 20.0, &[(0.0, 10.0, 0.5)]),
    ];
    let fifo_bounds = fifo::response_time_bounds(&tasks);
    assert_approx_eq!(fifo_bounds[0], 22.0);
    assert_eq!(
        Policy::FifoConc.analyze(&tasks).verdict,
        Verdict::Unschedulable { task: 0 }
    );

    let conc = request_driven::concurrent::response_time_bounds(&tasks, false);
    assert!(conc.response_times[0] <= tasks[0].deadline());
    assert!(conc.response_times[0] < fifo_bounds[0]);
}
