/*! Shared analysis state and result tables.

An [AnalysisContext] owns the per-segment worst-case response times
(`H`) pre-computed by [crate::cis] before any engine runs, together
with ranked views over low-priority segments that the engines' wave
constructions walk. The context borrows the task vector and lives for
one engine invocation, so the tasks themselves stay immutable. */

use itertools::Itertools;

use crate::cis;
use crate::task::Task;
use crate::time::{ceil_comp, Fraction, Time};

/// One candidate segment in a descending ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedSegment {
    /// Pre-computed worst-case response time (`H`) of the segment.
    pub response: Time,
    /// Accelerator fraction demanded by the segment.
    pub fraction: Fraction,
    /// Index of the owning task in the task vector.
    pub task: usize,
}

/// Segments ordered by descending response time. Equal response times
/// keep task-vector enumeration order, so repeated [Ranking::kth]
/// calls walk duplicates one by one.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    entries: Vec<RankedSegment>,
}

impl Ranking {
    /// The `rank`-th largest entry, 1-based. `None` once the
    /// candidates are exhausted.
    pub fn kth(&self, rank: usize) -> Option<&RankedSegment> {
        debug_assert!(rank > 0);
        self.entries.get(rank - 1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Analysis-scoped view of a task vector: the tasks plus the
/// pre-computed response time of every accelerator segment.
pub struct AnalysisContext<'a> {
    tasks: &'a [Task],
    segment_response: Vec<Vec<Time>>,
}

impl<'a> AnalysisContext<'a> {
    /// Pre-compute the response time of every segment of every task.
    /// Engines treat these values as opaque afterwards.
    pub fn new(tasks: &'a [Task]) -> Self {
        let segment_response = (0..tasks.len())
            .map(|i| {
                (0..tasks[i].num_segments())
                    .map(|k| cis::request_response_time(tasks, i, k))
                    .collect()
            })
            .collect();
        AnalysisContext {
            tasks,
            segment_response,
        }
    }

    pub fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    /// Pre-computed response time (`H`) of segment `seg` of task `task`.
    pub fn segment_response(&self, task: usize, seg: usize) -> Time {
        self.segment_response[task][seg]
    }

    /// Largest segment response time of a single task (`max H`).
    pub fn max_response(&self, task: usize) -> Time {
        self.segment_response[task].iter().copied().fold(0.0, Time::max)
    }

    /// Sum of the segment response times of a single task (`ΣH`).
    pub fn total_response(&self, task: usize) -> Time {
        self.segment_response[task].iter().sum()
    }

    /// Largest segment response time among tasks of lower priority
    /// than `pivot`. Zero when no such segment exists.
    pub fn max_lp_response(&self, pivot: usize) -> Time {
        self.lp_ranking(pivot)
            .kth(1)
            .map(|e| e.response)
            .unwrap_or(0.0)
    }

    /// Owner of the largest low-priority segment response time.
    /// Defaults to `pivot + 1` when no candidate exists, mirroring the
    /// scan that starts there.
    pub fn max_lp_response_task(&self, pivot: usize) -> usize {
        self.lp_ranking(pivot)
            .kth(1)
            .map(|e| e.task)
            .unwrap_or(pivot + 1)
    }

    /// All segments of tasks with lower priority than `pivot`, ranked
    /// by descending response time.
    pub fn lp_ranking(&self, pivot: usize) -> Ranking {
        self.lp_ranking_min_fraction(pivot, 0.0)
    }

    /// As [AnalysisContext::lp_ranking], restricted to segments whose
    /// fraction is at least `fraction_min`.
    pub fn lp_ranking_min_fraction(&self, pivot: usize, fraction_min: Fraction) -> Ranking {
        let entries = self
            .tasks
            .iter()
            .enumerate()
            .skip(pivot + 1)
            .flat_map(|(j, task)| {
                task.segments()
                    .iter()
                    .enumerate()
                    .filter(move |(_, seg)| seg.fraction >= fraction_min)
                    .map(move |(k, seg)| RankedSegment {
                        response: self.segment_response(j, k),
                        fraction: seg.fraction,
                        task: j,
                    })
            })
            .sorted_by(|a, b| b.response.total_cmp(&a.response))
            .collect();
        Ranking { entries }
    }
}

/// Delay due to higher-priority CPU execution on the same core during
/// a window of length `window`. Accelerator-using predecessors are
/// charged with their full CPU demand and a carry-in shifted by their
/// own response time; CPU-only predecessors with the classic
/// `⌈window / T⌉ · C` term.
pub fn interference(tasks: &[Task], index: usize, resp: &[Time], window: Time) -> Time {
    let core = tasks[index].core();
    tasks[..index]
        .iter()
        .enumerate()
        .filter(|(_, hp)| hp.core() == core)
        .map(|(j, hp)| {
            if hp.uses_accelerator() {
                let demand = hp.cpu_demand();
                ceil_comp((window + resp[j] - demand) / hp.period()) * demand
            } else {
                ceil_comp(window / hp.period()) * hp.cpu_wcet()
            }
        })
        .sum()
}

/// The outcome of a schedulability test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every task meets its deadline.
    Schedulable,
    /// The first task (in priority order) that misses its deadline.
    Unschedulable { task: usize },
}

impl Verdict {
    pub fn is_schedulable(&self) -> bool {
        matches!(self, Verdict::Schedulable)
    }
}

/// Compare the computed response-time bounds against the deadlines.
pub fn verdict(tasks: &[Task], response_times: &[Time]) -> Verdict {
    for (index, task) in tasks.iter().enumerate() {
        let bound = response_times[index];
        if bound <= task.deadline() {
            log::debug!(
                "task {index} schedulable, response time {bound} <= deadline {}",
                task.deadline()
            );
        } else {
            log::debug!(
                "task {index} not schedulable, response time {bound} > deadline {}",
                task.deadline()
            );
            return Verdict::Unschedulable { task: index };
        }
    }
    Verdict::Schedulable
}

/// Engine output: per-task response-time bounds, the blocking tables
/// the engine populates, and the resulting verdict.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Worst-case response time per task, in priority order. Infinite
    /// for tasks whose recurrence diverged.
    pub response_times: Vec<Time>,
    /// Direct blocking per request, request-driven engines only.
    pub request_blocking: Vec<Vec<Time>>,
    /// Direct blocking per job, concurrent job-driven engines only.
    pub job_blocking: Vec<Time>,
    /// The schedulability verdict for the whole set.
    pub verdict: Verdict,
}
