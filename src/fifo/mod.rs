/*! The FIFO-arbitration schedulability test for the concurrent
accelerator.

Under first-come first-served arbitration a request can be overtaken by
at most one pending request of every other task, so direct blocking is
bounded by one maximum segment response time per accelerator-using
task, regardless of priority. */

mod rta;
pub use rta::{request_direct_blocking, response_time_bounds};

#[cfg(test)]
mod tests;
