//! Analyzer constants and the bounds assumed of task-set generators.

use crate::time::{Fraction, Time};

/// Minimum task period produced by a task-set generator.
pub const MIN_PERIOD: Time = 5.0;

/// Maximum task period. `MAX_PERIOD + 1` exceeds every possible
/// segment response time, so it doubles as an "infinity" pivot.
pub const MAX_PERIOD: Time = 500.0;

/// Maximum number of tasks on a single core.
pub const MAX_TASKS: usize = 10;

/// Maximum number of tasks on a four-core platform.
pub const MAX_TASKS_QUAD_CORE: usize = 15;

/// Maximum number of accelerator segments per task.
pub const MAX_ACCEL_SEGMENTS: usize = 5;

/// Number of shares the accelerator capacity is divided into.
pub const FRACTION_GRANULARITY: u32 = 10;

/// Largest fraction of the accelerator a single request may demand.
pub const MAX_ACCEL_FRACTION: Fraction = 1.0;

/// Share of generated tasks that carry accelerator segments.
pub const ACCEL_TASK_SHARE: f64 = 0.5;

/// Upper bound on the CPU-intervention utilization of a generated segment.
pub const CPU_INTERVENTION_UTIL: f64 = 0.1;

/// Upper bound on the CPU-intervention time of a generated segment.
pub const CPU_INTERVENTION_BOUND: Time = 1.0;

/// Compensation term for floating-point drift in ceilings, floors,
/// and fixed-point convergence tests.
pub const EPSILON: f64 = 0.001;
