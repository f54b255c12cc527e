//! Request-driven analysis for a serialized (non-concurrent) accelerator.

use crate::analysis::{self, AnalysisContext};
use crate::cis;
use crate::fixed_point::{self, SearchResult};
use crate::task::Task;
use crate::time::{ceil_comp, Time};

use super::{prioritized_blocking, Bounds};

/// Direct blocking of one request of task `index`: one largest
/// low-priority request holds the accelerator when the request is
/// issued, and every higher-priority request released while the
/// blocking lasts prolongs it. Identical for all requests of the task,
/// and zero for tasks without accelerator execution.
pub fn request_direct_blocking(
    ctx: &AnalysisContext,
    index: usize,
    resp: &[Time],
    limit: Time,
) -> SearchResult {
    let tasks = ctx.tasks();
    if !tasks[index].uses_accelerator() {
        return Ok(0.0);
    }
    // Even a low-priority request faces blocking from high-priority
    // tasks, so the recurrence below runs with an empty low-priority
    // side as well.
    let lp_max = ctx.max_lp_response(index);
    fixed_point::search(limit, |assumed| {
        let mut blocking = lp_max;
        for (j, hp) in tasks[..index].iter().enumerate() {
            if !hp.uses_accelerator() {
                continue;
            }
            let arrivals = ceil_comp((assumed + resp[j] - hp.cpu_demand()) / hp.period());
            for (k, seg) in hp.segments().iter().enumerate() {
                if seg.execution != 0.0 {
                    blocking += arrivals * ctx.segment_response(j, k);
                }
            }
        }
        blocking
    })
}

/// Total blocking of task `index`: prioritized blocking plus, per
/// request, direct blocking, indirect blocking, and CIS. Records each
/// request's direct blocking in `row`.
fn task_blocking(
    ctx: &AnalysisContext,
    index: usize,
    resp: &[Time],
    limit: Time,
    row: &mut [Time],
) -> SearchResult {
    let tasks = ctx.tasks();
    let mut blocking = prioritized_blocking(tasks, index);
    for (k, seg) in tasks[index].segments().iter().enumerate() {
        if seg.length() == 0.0 {
            continue;
        }
        let direct = match request_direct_blocking(ctx, index, resp, limit) {
            Ok(direct) => direct,
            Err(failure) => {
                row[k] = Time::INFINITY;
                return Err(failure);
            }
        };
        row[k] = direct;
        blocking += direct
            + cis::request_indirect_blocking(tasks, index, k)
            + cis::request_cis(tasks, index, k);
    }
    Ok(blocking)
}

/// Compute response-time bounds for the whole set, walking tasks in
/// ascending priority index so every task only reads the final bounds
/// of its predecessors.
pub fn response_time_bounds(tasks: &[Task]) -> Bounds {
    let ctx = AnalysisContext::new(tasks);
    let mut response_times = vec![0.0; tasks.len()];
    let mut request_blocking = Vec::with_capacity(tasks.len());

    for index in 0..tasks.len() {
        let task = &tasks[index];
        let limit = fixed_point::divergence_limit(task.deadline());
        let mut row = vec![0.0; task.num_segments()];

        let bound = task_blocking(&ctx, index, &response_times, limit, &mut row)
            .and_then(|blocking| {
                let init = task.cpu_wcet() + task.total_segment_time() + blocking;
                fixed_point::search(limit, |assumed| {
                    init + analysis::interference(tasks, index, &response_times, assumed)
                })
            });
        response_times[index] = bound.unwrap_or(Time::INFINITY);
        request_blocking.push(row);
    }

    Bounds {
        response_times,
        request_blocking,
    }
}
