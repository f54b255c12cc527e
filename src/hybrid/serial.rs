//! Hybrid analysis for a serialized (non-concurrent) accelerator.

use crate::analysis::{self, AnalysisContext};
use crate::fixed_point;
use crate::task::Task;
use crate::taskset;
use crate::time::{ceil_comp, Time};

use super::prioritized_blocking_wave;

/// Differential direct blocking due to lower-priority requests: a wave
/// over the largest low-priority segment response times, granting each
/// `ψ = min(θ, budget)` slots out of an `n`-request budget. The
/// arrival bound `θ` is taken from the owner of the largest segment.
pub fn lp_direct_blocking(ctx: &AnalysisContext, index: usize, window: Time) -> Time {
    let tasks = ctx.tasks();
    if !tasks[index].uses_accelerator() {
        return 0.0;
    }

    let ranking = ctx.lp_ranking(index);
    let first = match ranking.kth(1) {
        Some(entry) if entry.response > 0.0 => *entry,
        _ => return 0.0,
    };
    let theta = taskset::theta(&tasks[first.task], window);

    let mut budget = tasks[index].num_segments() as Time;
    let mut blocking = 0.0;
    let mut rank = 1;
    let mut response = first.response;
    while budget > 0.0 && response > 0.0 {
        let psi = theta.min(budget);
        budget -= psi;
        blocking += psi * response;

        rank += 1;
        response = ranking.kth(rank).map(|e| e.response).unwrap_or(0.0);
    }
    blocking
}

/// Direct blocking due to higher-priority requests, combining the two
/// bounds per predecessor: `α` counts arrivals the job-driven way
/// (within the whole response window), `β` the request-driven way
/// (within each request's blocking), and the smaller count is charged
/// with the predecessor's segment response times.
pub fn direct_blocking_init(
    ctx: &AnalysisContext,
    index: usize,
    resp_rd: &[Time],
    resp_jd: &[Time],
    request_blocking: &[Vec<Time>],
) -> Time {
    let tasks = ctx.tasks();
    let task = &tasks[index];
    if task.num_segments() == 0 {
        return 0.0;
    }

    let mut blocking = 0.0;
    for (j, hp) in tasks[..index].iter().enumerate() {
        if !hp.uses_accelerator() {
            continue;
        }
        let demand = hp.cpu_demand();
        let alpha = ceil_comp((resp_jd[index] + resp_jd[j] - demand) / hp.period());
        let beta: Time = task
            .segments()
            .iter()
            .enumerate()
            .filter(|(_, seg)| seg.execution != 0.0)
            .map(|(k, _)| ceil_comp((request_blocking[index][k] + resp_rd[j] - demand) / hp.period()))
            .sum();
        let delta = beta.min(alpha);

        for (k, seg) in hp.segments().iter().enumerate() {
            if seg.execution != 0.0 {
                blocking += delta * ctx.segment_response(j, k);
            }
        }
    }
    blocking
}

/// Compute response-time bounds for the whole set, re-using the
/// response times and per-request blocking of prior serial
/// request-driven and job-driven runs on the same set.
pub fn response_time_bounds(
    tasks: &[Task],
    resp_rd: &[Time],
    resp_jd: &[Time],
    request_blocking: &[Vec<Time>],
) -> Vec<Time> {
    let ctx = AnalysisContext::new(tasks);
    let mut response_times = vec![0.0; tasks.len()];

    for index in 0..tasks.len() {
        let task = &tasks[index];
        let limit = fixed_point::divergence_limit(task.deadline());
        let init = task.cpu_wcet() + ctx.total_response(index);
        let blocking_init = direct_blocking_init(&ctx, index, resp_rd, resp_jd, request_blocking);

        let bound = fixed_point::search(limit, |assumed| {
            let mut rhs = init + blocking_init + prioritized_blocking_wave(tasks, index, assumed);
            if task.num_segments() != 0 {
                rhs += lp_direct_blocking(&ctx, index, assumed);
            }
            rhs + analysis::interference(tasks, index, &response_times, assumed)
        });
        response_times[index] = bound.unwrap_or(Time::INFINITY);
    }

    response_times
}
