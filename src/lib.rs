/*! Schedulability analysis for periodic real-time task sets whose jobs
alternate CPU execution with self-suspending accelerator (GPU)
segments.

Given a task set, a task-to-core assignment, and a priority ordering
(position in the vector is priority), the analyzers compute a
worst-case response-time bound for every task and decide whether all
deadlines are met. Blocking at the accelerator is bounded under a
family of policies (request-driven, job-driven, hybrid, and FIFO),
each for a serialized accelerator and, where applicable, for a
fraction-sharable (concurrent) one. On top of the analyzers, the
[partition] module assigns tasks to cores with Worst-Fit-Decreasing
heuristics until every placed task passes the chosen analysis. */

pub mod analysis;
pub mod cis;
pub mod config;
pub mod fifo;
pub mod fixed_point;
pub mod hybrid;
pub mod hyperperiod;
pub mod job_driven;
pub mod partition;
pub mod policy;
pub mod request_driven;
pub mod task;
pub mod taskset;
pub mod time;
pub mod wavefront;
