//! Request-driven analysis for a fraction-sharable (concurrent)
//! accelerator.

use crate::analysis::{self, AnalysisContext};
use crate::cis;
use crate::fixed_point::{self, SearchResult};
use crate::task::Task;
use crate::time::{floor_comp, Time};
use crate::wavefront::{blocking_fraction, liquefaction_mass, Wavefront};

use super::{prioritized_blocking, Bounds};

/// Direct blocking of request `seg` of task `index` on the concurrent
/// accelerator.
///
/// The wavefront stacks the largest low-priority requests that occupy
/// the residual capacity while this request holds its fraction. With
/// `wavefront_liquefaction` set, the wavefront mass is folded straight
/// into the liquefaction sum; otherwise a bin-fill phase walks the
/// wavefront layers from the top down and checks whether liquefied
/// mass from the rest of the set suffices to keep each partially
/// filled layer busy. A bin count that stops advancing is a degenerate
/// fixed point; the current bound is returned as a safety exit.
pub fn request_direct_blocking(
    ctx: &AnalysisContext,
    index: usize,
    seg: usize,
    resp: &[Time],
    limit: Time,
    wavefront_liquefaction: bool,
) -> SearchResult {
    let tasks = ctx.tasks();
    if !tasks[index].uses_accelerator() {
        return Ok(0.0);
    }
    let fraction = tasks[index].segments()[seg].fraction;
    let capacity = blocking_fraction(fraction);
    let wavefront = Wavefront::build(ctx, index, fraction);

    let mut blocking = 0.0;
    let mut used_mass = 0.0;
    if !wavefront_liquefaction {
        // Fill the partially occupied wavefront bins from the top down.
        let mut instant: Time = 0.0;
        for layer in wavefront.layers.iter().rev() {
            let prev_instant = instant;
            if layer.residual_fraction <= 0.0 {
                // Bin already full, discard.
                instant = floor_comp(layer.length);
                continue;
            }

            let mut liquefied =
                liquefaction_mass(ctx, index, fraction, prev_instant, resp) - used_mass;
            instant = floor_comp(layer.length);
            let required = (instant - prev_instant) * layer.residual_fraction;

            let mut prev_bins = 0.0;
            while liquefied < required {
                let bins = floor_comp(liquefied / required * (instant - prev_instant));
                if prev_bins == bins {
                    // Degenerate fixed point: the bin count stopped
                    // advancing, so the current bound stands.
                    return Ok(prev_instant + bins);
                }
                liquefied =
                    liquefaction_mass(ctx, index, fraction, prev_instant + bins, resp) - used_mass;
                prev_bins = bins;
            }

            used_mass += required;
            blocking = instant;
        }
    }

    let init = blocking;
    fixed_point::search(limit, |assumed| {
        let mut liquefied = liquefaction_mass(ctx, index, fraction, assumed, resp);
        if wavefront_liquefaction {
            liquefied += wavefront.mass;
        } else {
            // The mass spent filling the wavefront bins is not
            // available to extend the blocking further.
            liquefied -= used_mass;
        }
        init + floor_comp(liquefied / capacity)
    })
}

/// Total blocking of task `index`: prioritized blocking plus, per
/// request, direct blocking, indirect blocking, and CIS.
fn task_blocking(
    ctx: &AnalysisContext,
    index: usize,
    resp: &[Time],
    limit: Time,
    wavefront_liquefaction: bool,
    row: &mut [Time],
) -> SearchResult {
    let tasks = ctx.tasks();
    let mut blocking = prioritized_blocking(tasks, index);
    for (k, seg) in tasks[index].segments().iter().enumerate() {
        if seg.length() == 0.0 {
            continue;
        }
        let direct =
            match request_direct_blocking(ctx, index, k, resp, limit, wavefront_liquefaction) {
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

/// Compute response-time bounds for the whole set.
///
/// The blocking bound of a task also depends on *lower*-priority
/// requests, whose final bounds are not known yet when the task is
/// analyzed; their response times are conservatively taken to be their
/// deadlines until overwritten.
pub fn response_time_bounds(tasks: &[Task], wavefront_liquefaction: bool) -> Bounds {
    let ctx = AnalysisContext::new(tasks);
    let mut response_times: Vec<Time> = tasks.iter().map(|t| t.deadline()).collect();
    let mut request_blocking = Vec::with_capacity(tasks.len());

    for index in 0..tasks.len() {
        let task = &tasks[index];
        let limit = fixed_point::divergence_limit(task.deadline());
        let mut row = vec![0.0; task.num_segments()];

        let bound = task_blocking(
            &ctx,
            index,
            &response_times,
            limit,
            wavefront_liquefaction,
            &mut row,
        )
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
