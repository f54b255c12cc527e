use crate::analysis::{self, AnalysisContext};
use crate::cis;
use crate::fixed_point;
use crate::hybrid::prioritized_blocking_wave;
use crate::task::Task;
use crate::time::Time;

/// Direct blocking of any one request of task `index` under FIFO
/// arbitration: the largest segment response time of every other
/// accelerator-using task, each charged once.
pub fn request_direct_blocking(ctx: &AnalysisContext, index: usize) -> Time {
    let tasks = ctx.tasks();
    if !tasks[index].uses_accelerator() {
        return 0.0;
    }
    tasks
        .iter()
        .enumerate()
        .filter(|(j, other)| *j != index && other.uses_accelerator())
        .map(|(j, _)| ctx.max_response(j))
        .sum()
}

/// Total request-level blocking of task `index`: per request, direct
/// blocking plus indirect blocking plus CIS. Prioritized blocking is
/// window-dependent and added inside the response-time recurrence.
fn task_blocking(ctx: &AnalysisContext, index: usize) -> Time {
    let tasks = ctx.tasks();
    tasks[index]
        .segments()
        .iter()
        .enumerate()
        .filter(|(_, seg)| seg.length() != 0.0)
        .map(|(k, _)| {
            request_direct_blocking(ctx, index)
                + cis::request_indirect_blocking(tasks, index, k)
                + cis::request_cis(tasks, index, k)
        })
        .sum()
}

/// Compute response-time bounds for the whole set under FIFO
/// arbitration at the accelerator. Prioritized blocking uses the same
/// wave construction as the hybrid tests.
pub fn response_time_bounds(tasks: &[Task]) -> Vec<Time> {
    let ctx = AnalysisContext::new(tasks);
    let mut response_times = vec![0.0; tasks.len()];

    for index in 0..tasks.len() {
        let task = &tasks[index];
        let limit = fixed_point::divergence_limit(task.deadline());
        let blocking = task_blocking(&ctx, index);
        let init = task.cpu_wcet() + task.total_segment_time() + blocking;

        let bound = fixed_point::search(limit, |assumed| {
            init + prioritized_blocking_wave(tasks, index, assumed)
                + analysis::interference(tasks, index, &response_times, assumed)
        });
        response_times[index] = bound.unwrap_or(Time::INFINITY);
    }

    response_times
}
