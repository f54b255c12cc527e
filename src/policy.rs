/*! Policy selection: a uniform dispatch over the analysis engines.

The partitioner (and any other driver) selects one [Policy] value and
calls [Policy::analyze]; combination policies run their constituent
engines internally, in the required order. */

use crate::analysis::{self, Analysis};
use crate::task::Task;
use crate::time::Time;
use crate::{fifo, hybrid, job_driven, request_driven};

/// The available schedulability tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Serial request-driven test.
    RequestDriven,
    /// Serial job-driven test.
    JobDriven,
    /// Serial hybrid test (runs the serial request- and job-driven
    /// tests first and combines their tables).
    Hybrid,
    /// Concurrent request-driven test; `wavefront_liquefaction`
    /// selects the simplified mode that folds the wavefront mass into
    /// the liquefaction sum instead of running the bin-fill phase.
    RequestDrivenConc { wavefront_liquefaction: bool },
    /// Concurrent job-driven test; `request_oriented` selects the
    /// RO-JDC refinement.
    JobDrivenConc { request_oriented: bool },
    /// Concurrent hybrid test (runs the concurrent request-driven test
    /// and RO-JDC first and combines their tables).
    HybridConc,
    /// FIFO arbitration at the concurrent accelerator.
    FifoConc,
}

impl Policy {
    /// Run the selected test on a priority-ordered task vector.
    ///
    /// An empty vector is vacuously schedulable.
    pub fn analyze(&self, tasks: &[Task]) -> Analysis {
        match *self {
            Policy::RequestDriven => {
                let bounds = request_driven::serial::response_time_bounds(tasks);
                finish(
                    tasks,
                    bounds.response_times,
                    bounds.request_blocking,
                    Vec::new(),
                )
            }
            Policy::JobDriven => {
                let response_times = job_driven::serial::response_time_bounds(tasks);
                finish(tasks, response_times, Vec::new(), Vec::new())
            }
            Policy::Hybrid => {
                let rd = request_driven::serial::response_time_bounds(tasks);
                let jd = job_driven::serial::response_time_bounds(tasks);
                let response_times = hybrid::serial::response_time_bounds(
                    tasks,
                    &rd.response_times,
                    &jd,
                    &rd.request_blocking,
                );
                finish(tasks, response_times, rd.request_blocking, Vec::new())
            }
            Policy::RequestDrivenConc {
                wavefront_liquefaction,
            } => {
                let bounds =
                    request_driven::concurrent::response_time_bounds(tasks, wavefront_liquefaction);
                finish(
                    tasks,
                    bounds.response_times,
                    bounds.request_blocking,
                    Vec::new(),
                )
            }
            Policy::JobDrivenConc { request_oriented } => {
                let bounds = job_driven::concurrent::response_time_bounds(tasks, request_oriented);
                finish(tasks, bounds.response_times, Vec::new(), bounds.job_blocking)
            }
            Policy::HybridConc => {
                let rd = request_driven::concurrent::response_time_bounds(tasks, false);
                let jd = job_driven::concurrent::response_time_bounds(tasks, true);
                let response_times = hybrid::concurrent::response_time_bounds(
                    tasks,
                    &rd.request_blocking,
                    &jd.job_blocking,
                );
                finish(
                    tasks,
                    response_times,
                    rd.request_blocking,
                    jd.job_blocking,
                )
            }
            Policy::FifoConc => {
                let response_times = fifo::response_time_bounds(tasks);
                finish(tasks, response_times, Vec::new(), Vec::new())
            }
        }
    }
}

fn finish(
    tasks: &[Task],
    response_times: Vec<Time>,
    request_blocking: Vec<Vec<Time>>,
    job_blocking: Vec<Time>,
) -> Analysis {
    let verdict = analysis::verdict(tasks, &response_times);
    Analysis {
        response_times,
        request_blocking,
        job_blocking,
        verdict,
    }
}
