/*! The task model: periodic tasks whose jobs alternate CPU execution
with self-suspending accelerator segments.

A [Task] is an immutable analysis input: it is validated once at
construction time, optionally rescaled by a frequency-search
collaborator, and then frozen for the duration of an analysis run.
Only the core assignment may change between runs (the partitioner owns
that). */

use itertools::Itertools;
use thiserror::Error;

use crate::time::{Fraction, Time};

/// Error raised when task parameters are rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidTask {
    /// Constrained deadlines only: `D ≤ T`.
    #[error("deadline {deadline} exceeds period {period}")]
    DeadlineExceedsPeriod { deadline: Time, period: Time },

    /// All time quantities are non-negative reals.
    #[error("negative {field} value {value}")]
    Negative { field: &'static str, value: Time },

    /// A task must recur.
    #[error("period must be positive, got {0}")]
    NonPositivePeriod(Time),

    /// A request demands a non-trivial share of the accelerator.
    #[error("accelerator fraction {0} outside (0, 1]")]
    FractionOutOfRange(Fraction),

    /// Frequency scaling factors are relative to a nominal maximum of 1.
    #[error("frequency scaling factor {0} exceeds nominal frequency")]
    FrequencyAboveNominal(f64),
}

/// Error raised by the checked segment accessor.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("segment index {index} out of range for task with {count} segments")]
pub struct BadSegmentIndex {
    pub index: usize,
    pub count: usize,
}

/// One accelerator request within a job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// CPU-side intervention time accompanying the request (`Gm`).
    pub intervention: Time,
    /// Raw accelerator execution time (`Ge`).
    pub execution: Time,
    /// Fraction of the accelerator capacity demanded (`F`).
    pub fraction: Fraction,
}

impl Segment {
    /// Construct a validated accelerator segment.
    pub fn new(intervention: Time, execution: Time, fraction: Fraction) -> Result<Self, InvalidTask> {
        if intervention < 0.0 {
            return Err(InvalidTask::Negative {
                field: "intervention",
                value: intervention,
            });
        }
        if execution < 0.0 {
            return Err(InvalidTask::Negative {
                field: "execution",
                value: execution,
            });
        }
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(InvalidTask::FractionOutOfRange(fraction));
        }
        Ok(Segment {
            intervention,
            execution,
            fraction,
        })
    }

    /// Total length of the request: CPU intervention plus accelerator
    /// execution (`G = Gm + Ge`).
    pub fn length(&self) -> Time {
        self.intervention + self.execution
    }
}

/// A periodic task with a constrained deadline and an ordered sequence
/// of accelerator segments. Segment order is execution order within a
/// job; the vector position of a task in a task set is its priority
/// (see [crate::taskset]).
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    cpu_wcet: Time,
    deadline: Time,
    period: Time,
    segments: Vec<Segment>,
    core: usize,
    cpu_frequency: f64,
    accel_frequency: f64,
}

impl Task {
    /// Construct a validated task from raw parameters. The segment
    /// vector may be empty for a CPU-only task.
    pub fn new(
        cpu_wcet: Time,
        deadline: Time,
        period: Time,
        segments: Vec<Segment>,
    ) -> Result<Self, InvalidTask> {
        if cpu_wcet < 0.0 {
            return Err(InvalidTask::Negative {
                field: "cpu_wcet",
                value: cpu_wcet,
            });
        }
        if period <= 0.0 {
            return Err(InvalidTask::NonPositivePeriod(period));
        }
        if deadline < 0.0 {
            return Err(InvalidTask::Negative {
                field: "deadline",
                value: deadline,
            });
        }
        if deadline > period {
            return Err(InvalidTask::DeadlineExceedsPeriod { deadline, period });
        }
        Ok(Task {
            cpu_wcet,
            deadline,
            period,
            segments,
            core: 0,
            cpu_frequency: 1.0,
            accel_frequency: 1.0,
        })
    }

    pub fn cpu_wcet(&self) -> Time {
        self.cpu_wcet
    }

    pub fn deadline(&self) -> Time {
        self.deadline
    }

    pub fn period(&self) -> Time {
        self.period
    }

    /// The core this task is assigned to. Defaults to core 0, which is
    /// the correct assignment for uniprocessor analyses; the
    /// partitioner reassigns it on multicore platforms.
    pub fn core(&self) -> usize {
        self.core
    }

    pub fn set_core(&mut self, core: usize) {
        self.core = core;
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Checked segment access.
    pub fn segment(&self, index: usize) -> Result<&Segment, BadSegmentIndex> {
        self.segments.get(index).ok_or(BadSegmentIndex {
            index,
            count: self.segments.len(),
        })
    }

    /// Total CPU intervention time across all segments (`ΣGm`).
    pub fn total_intervention(&self) -> Time {
        self.segments.iter().map(|s| s.intervention).sum()
    }

    /// Total accelerator execution time across all segments (`ΣGe`).
    pub fn total_execution(&self) -> Time {
        self.segments.iter().map(|s| s.execution).sum()
    }

    /// Total length of all segments (`Σ(Gm + Ge)`).
    pub fn total_segment_time(&self) -> Time {
        self.segments.iter().map(|s| s.length()).sum()
    }

    /// Largest CPU intervention among segments whose fraction does not
    /// exceed `fraction`. Zero when no segment qualifies.
    pub fn max_intervention_within(&self, fraction: Fraction) -> Time {
        self.segments
            .iter()
            .filter(|s| s.fraction <= fraction)
            .map(|s| s.intervention)
            .fold(0.0, Time::max)
    }

    /// Largest CPU intervention among all segments.
    pub fn max_intervention(&self) -> Time {
        self.max_intervention_within(1.0)
    }

    /// Largest accelerator fraction demanded by any segment. Zero for
    /// a CPU-only task.
    pub fn max_fraction(&self) -> Fraction {
        self.segments.iter().map(|s| s.fraction).fold(0.0, f64::max)
    }

    /// Largest accelerator fraction among segments `[start, n)`,
    /// together with the position of its first occurrence. An empty
    /// range yields `(0.0, start)`.
    pub fn max_fraction_from(&self, start: usize) -> (Fraction, usize) {
        let mut max = 0.0;
        let mut index = start;
        for (k, seg) in self.segments.iter().enumerate().skip(start) {
            if seg.fraction > max {
                max = seg.fraction;
                index = k;
            }
        }
        (max, index)
    }

    /// Segment CPU interventions in descending order; equal values
    /// keep their segment order.
    pub fn interventions_descending(&self) -> Vec<Time> {
        self.segments
            .iter()
            .map(|s| s.intervention)
            .sorted_by(|a, b| b.total_cmp(a))
            .collect()
    }

    /// Total CPU time demanded per period (`E = C + ΣGm`).
    pub fn cpu_demand(&self) -> Time {
        self.cpu_wcet + self.total_intervention()
    }

    /// CPU utilization of the task (`E / T`).
    pub fn utilization(&self) -> f64 {
        self.cpu_demand() / self.period
    }

    /// Whether the task suspends on the accelerator at all (`ΣGe ≠ 0`).
    pub fn uses_accelerator(&self) -> bool {
        self.total_execution() != 0.0
    }

    /// Rescale CPU-side quantities (`C`, all `Gm`) for a CPU clock at
    /// `factor` of nominal speed. Repeated calls are relative to the
    /// nominal frequency, not the previously scaled one.
    pub fn scale_cpu(&mut self, factor: f64) -> Result<(), InvalidTask> {
        if factor > 1.0 {
            return Err(InvalidTask::FrequencyAboveNominal(factor));
        }
        let ratio = self.cpu_frequency / factor;
        self.cpu_wcet *= ratio;
        for seg in &mut self.segments {
            seg.intervention *= ratio;
        }
        self.cpu_frequency = factor;
        Ok(())
    }

    /// Rescale accelerator execution times (`Ge`) for an accelerator
    /// clock at `factor` of nominal speed.
    pub fn scale_accel(&mut self, factor: f64) -> Result<(), InvalidTask> {
        if factor > 1.0 {
            return Err(InvalidTask::FrequencyAboveNominal(factor));
        }
        let ratio = self.accel_frequency / factor;
        for seg in &mut self.segments {
            seg.execution *= ratio;
        }
        self.accel_frequency = factor;
        Ok(())
    }

    /// Multiply all time parameters by an integer factor and floor
    /// them, removing accumulated floating-point noise.
    pub fn timescale(&mut self, scaling_factor: u32) {
        let s = scaling_factor as Time;
        self.cpu_wcet = (self.cpu_wcet * s).floor();
        for seg in &mut self.segments {
            seg.intervention = (seg.intervention * s).floor();
            seg.execution = (seg.execution * s).floor();
        }
        self.deadline = (self.deadline * s).floor();
        self.period = (self.period * s).floor();
    }
}
