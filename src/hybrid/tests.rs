use assert_approx_eq::assert_approx_eq;

use crate::analysis::{AnalysisContext, Verdict};
use crate::hybrid::{concurrent, prioritized_blocking_wave, serial};
use crate::policy::Policy;
use crate::tests::{paper_example, task};

#[test]
fn serial_paper_example() {
    let tasks = paper_example();
    let analysis = Policy::Hybrid.analyze(&tasks);
    // The per-predecessor minimum of the request- and job-driven
    // arrival counts recovers the request-driven bound here.
    assert_approx_eq!(analysis.response_times[0], 23.0);
    assert_approx_eq!(analysis.response_times[1], 53.0);
    assert_eq!(analysis.verdict, Verdict::Schedulable);
}

#[test]
fn serial_combination_is_no_worse_than_either_bound() {
    let tasks = paper_example();
    let rd = crate::request_driven::serial::response_time_bounds(&tasks);
    let jd = crate::job_driven::serial::response_time_bounds(&tasks);
    let hybrid =
        serial::response_time_bounds(&tasks, &rd.response_times, &jd, &rd.request_blocking);
    for index in 0..tasks.len() {
        assert!(hybrid[index] <= rd.response_times[index].max(jd[index]));
    }
}

#[test]
fn concurrent_paper_example() {
    let tasks = paper_example();
    let analysis = Policy::HybridConc.analyze(&tasks);
    assert_approx_eq!(analysis.response_times[0], 18.0);
    assert_approx_eq!(analysis.response_times[1], 53.0);
    assert_approx_eq!(analysis.request_blocking[0][0], 0.0);
    assert_approx_eq!(analysis.request_blocking[1][0], 8.0);
    assert_approx_eq!(analysis.job_blocking[0], 5.0);
    assert_approx_eq!(analysis.job_blocking[1], 16.0);
    assert_eq!(analysis.verdict, Verdict::Schedulable);
}

#[test]
fn concurrent_direct_blocking_takes_the_smaller_bound() {
    let tasks = paper_example();
    let request_blocking = vec![vec![0.0], vec![8.0]];
    let job_blocking = vec![5.0, 16.0];
    let first = concurrent::direct_blocking_init(&tasks, 0, &request_blocking, &job_blocking);
    let second = concurrent::direct_blocking_init(&tasks, 1, &request_blocking, &job_blocking);
    assert_approx_eq!(first, 0.0);
    assert_approx_eq!(second, 8.0);
    assert!(first <= job_blocking[0] && first <= request_blocking[0].iter().sum::<f64>());
    assert!(second <= job_blocking[1] && second <= request_blocking[1].iter().sum::<f64>());
}

#[test]
fn prioritized_wave_grants_theta_slots_per_intervention() {
    let tasks = vec![
        task(1.0, 10.0, 10.0, &[(0.0, 1.0, 1.0)]),
        task(1.0, 50.0, 50.0, &[(2.0, 1.0, 0.5), (3.0, 1.0, 0.5)]),
    ];
    // θ(t1, 5) = 1: one slot each for the two largest interventions.
    assert_approx_eq!(prioritized_blocking_wave(&tasks, 0, 5.0), 5.0);
    // θ(t1, 60) = 3, but the boundary budget n + 1 = 2 caps the wave
    // at the largest intervention.
    assert_approx_eq!(prioritized_blocking_wave(&tasks, 0, 60.0), 6.0);
}

#[test]
fn lp_direct_wave_uses_the_largest_owners_arrival_bound() {
    let tasks = vec![
        task(1.0, 10.0, 10.0, &[(0.0, 1.0, 1.0), (0.0, 1.0, 1.0)]),
        task(1.0, 50.0, 50.0, &[(0.0, 4.0, 1.0)]),
        task(1.0, 60.0, 60.0, &[(0.0, 3.0, 1.0)]),
    ];
    let ctx = AnalysisContext::new(&tasks);
    // θ(t1, 5) = 2 covers the whole two-request budget with the
    // largest low-priority response time.
    assert_approx_eq!(serial::lp_direct_blocking(&ctx, 0, 5.0), 8.0);
}
