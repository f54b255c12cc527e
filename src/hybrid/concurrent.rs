//! Hybrid analysis for a fraction-sharable (concurrent) accelerator.

use crate::analysis::{self, AnalysisContext};
use crate::fixed_point;
use crate::task::Task;
use crate::time::Time;

use super::prioritized_blocking_wave;

/// Direct blocking of task `index`: the request-driven figure (sum of
/// its per-request direct blocking) and the job-driven figure are both
/// valid upper bounds, so the smaller one is charged.
pub fn direct_blocking_init(
    tasks: &[Task],
    index: usize,
    request_blocking: &[Vec<Time>],
    job_blocking: &[Time],
) -> Time {
    if tasks[index].num_segments() == 0 {
        return 0.0;
    }
    let request_driven: Time = request_blocking[index].iter().sum();
    let job_driven = job_blocking[index];
    job_driven.min(request_driven)
}

/// Compute response-time bounds for the whole set, re-using the
/// blocking tables of prior concurrent request-driven and job-driven
/// runs on the same set. Lower-priority response times are
/// conservatively taken to be the deadlines until overwritten.
pub fn response_time_bounds(
    tasks: &[Task],
    request_blocking: &[Vec<Time>],
    job_blocking: &[Time],
) -> Vec<Time> {
    let ctx = AnalysisContext::new(tasks);
    let mut response_times: Vec<Time> = tasks.iter().map(|t| t.deadline()).collect();

    for index in 0..tasks.len() {
        let task = &tasks[index];
        let limit = fixed_point::divergence_limit(task.deadline());
        let init = task.cpu_wcet() + ctx.total_response(index);
        let blocking_init = direct_blocking_init(tasks, index, request_blocking, job_blocking);

        let bound = fixed_point::search(limit, |assumed| {
            init + blocking_init
                + prioritized_blocking_wave(tasks, index, assumed)
                + analysis::interference(tasks, index, &response_times, assumed)
        });
        response_times[index] = bound.unwrap_or(Time::INFINITY);
    }

    response_times
}
