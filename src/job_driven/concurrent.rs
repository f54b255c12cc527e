//! Job-driven analysis for a fraction-sharable (concurrent)
//! accelerator (JDC), with the request-oriented refinement (RO-JDC).

use crate::analysis::{self, AnalysisContext};
use crate::fixed_point;
use crate::task::Task;
use crate::time::{floor_comp, Time};
use crate::wavefront::{blocking_fraction, liquefaction_mass, Wavefront};

use super::{prioritized_blocking, Bounds};

/// Direct blocking of one job: a single wavefront gated by the job's
/// maximum fraction, charged once per request, plus a job-wide
/// liquefaction mass, spread over the blocking capacity.
pub fn direct_blocking(ctx: &AnalysisContext, index: usize, resp: &[Time], window: Time) -> Time {
    let task = &ctx.tasks()[index];
    if !task.uses_accelerator() {
        return 0.0;
    }

    let fraction = task.max_fraction();
    let capacity = blocking_fraction(fraction);
    let wavefront = Wavefront::build_clamped(ctx, index, fraction);
    let liquefied = liquefaction_mass(ctx, index, fraction, window, resp);

    floor_comp((liquefied + task.num_segments() as Time * wavefront.mass) / capacity)
}

/// Request-oriented direct blocking of one job (RO-JDC): walk the
/// job's own requests in execution order, rebuilding the wavefront per
/// request. Requests before the one realizing the running maximum
/// fraction are charged wavefront mass only; at each maximum realizer
/// the job-wide liquefaction mass is added once and the maximum
/// advances past it.
pub fn request_oriented_direct_blocking(
    ctx: &AnalysisContext,
    index: usize,
    resp: &[Time],
    window: Time,
) -> Time {
    let task = &ctx.tasks()[index];
    if !task.uses_accelerator() {
        return 0.0;
    }

    let (_, mut max_index) = task.max_fraction_from(0);
    let mut blocking = 0.0;
    for (k, seg) in task.segments().iter().enumerate() {
        let fraction = seg.fraction;
        let capacity = blocking_fraction(fraction);
        let wavefront = Wavefront::build_clamped(ctx, index, fraction);

        let liquefied = if k < max_index {
            wavefront.mass
        } else {
            let mass =
                wavefront.mass + liquefaction_mass(ctx, index, task.max_fraction(), window, resp);
            max_index = task.max_fraction_from(k + 1).1;
            mass
        };
        blocking += floor_comp(liquefied / capacity);
    }
    blocking
}

/// Compute response-time bounds for the whole set, selecting the
/// request-oriented refinement with `request_oriented`.
pub fn response_time_bounds(tasks: &[Task], request_oriented: bool) -> Bounds {
    let ctx = AnalysisContext::new(tasks);
    let mut response_times = vec![0.0; tasks.len()];
    let mut job_blocking = vec![0.0; tasks.len()];

    let direct = |index: usize, resp: &[Time], window: Time| {
        if request_oriented {
            request_oriented_direct_blocking(&ctx, index, resp, window)
        } else {
            direct_blocking(&ctx, index, resp, window)
        }
    };

    for index in 0..tasks.len() {
        let task = &tasks[index];
        let limit = fixed_point::divergence_limit(task.deadline());
        let init = task.cpu_wcet() + ctx.total_response(index);

        let bound = fixed_point::search(limit, |assumed| {
            let mut rhs = init + prioritized_blocking(tasks, index, assumed);
            if task.num_segments() != 0 {
                rhs += direct(index, &response_times, assumed);
            }
            rhs + analysis::interference(tasks, index, &response_times, assumed)
        });

        match bound {
            Ok(window) => {
                response_times[index] = window;
                if task.num_segments() != 0 {
                    job_blocking[index] = direct(index, &response_times, window);
                }
            }
            Err(_) => {
                response_times[index] = Time::INFINITY;
                job_blocking[index] = Time::INFINITY;
            }
        }
    }

    Bounds {
        response_times,
        job_blocking,
    }
}
