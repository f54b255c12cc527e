//! Job-driven analysis for a serialized (non-concurrent) accelerator.

use crate::analysis::{self, AnalysisContext};
use crate::fixed_point;
use crate::task::Task;
use crate::time::{ceil_comp, Time};

use super::prioritized_blocking;

/// Direct blocking of one job of task `index`: each of its requests
/// may find the largest low-priority request on the accelerator, and
/// every higher-priority request released within the window delays it
/// once.
pub fn direct_blocking(ctx: &AnalysisContext, index: usize, resp: &[Time], window: Time) -> Time {
    let tasks = ctx.tasks();
    let task = &tasks[index];
    if !task.uses_accelerator() {
        return 0.0;
    }

    let mut blocking = task.num_segments() as Time * ctx.max_lp_response(index);
    for (j, hp) in tasks[..index].iter().enumerate() {
        if !hp.uses_accelerator() {
            continue;
        }
        let arrivals = ceil_comp((window + resp[j] - hp.cpu_demand()) / hp.period());
        for (k, seg) in hp.segments().iter().enumerate() {
            if seg.execution != 0.0 {
                blocking += arrivals * ctx.segment_response(j, k);
            }
        }
    }
    blocking
}

/// Compute response-time bounds for the whole set. The recurrence
/// starts from `C + ΣH` so that indirect blocking and CIS are already
/// accounted for by the pre-computed segment response times.
pub fn response_time_bounds(tasks: &[Task]) -> Vec<Time> {
    let ctx = AnalysisContext::new(tasks);
    let mut response_times = vec![0.0; tasks.len()];

    for index in 0..tasks.len() {
        let task = &tasks[index];
        let limit = fixed_point::divergence_limit(task.deadline());
        let init = task.cpu_wcet() + ctx.total_response(index);

        let bound = fixed_point::search(limit, |assumed| {
            let mut rhs = init + prioritized_blocking(tasks, index, assumed);
            if task.num_segments() != 0 {
                rhs += direct_blocking(&ctx, index, &response_times, assumed);
            }
            rhs + analysis::interference(tasks, index, &response_times, assumed)
        });
        response_times[index] = bound.unwrap_or(Time::INFINITY);
    }

    response_times
}
