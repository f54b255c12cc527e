use thiserror::Error;

use crate::config::EPSILON;
use crate::time::Time;

/// Error type returned when a fixed-point search fails.
#[derive(Debug, Error, Copy, Clone, PartialEq, PartialOrd)]
pub enum SearchFailure {
    /// No fixed point found below the given divergence threshold.
    #[error("no fixed point less than {limit} found")]
    DivergenceLimitExceeded { limit: Time },
}

pub type SearchResult = Result<Time, SearchFailure>;

/// Divergence threshold for the per-task recurrences: a response time
/// beyond five deadlines is declared infeasible.
pub fn divergence_limit(deadline: Time) -> Time {
    5.0 * deadline
}

/// Conduct an iterative fixed-point search up to a given divergence
/// threshold.
///
/// `rhs` is the right-hand side of the recurrence `x = rhs(x)`; it
/// must be monotone non-decreasing in its argument. The iteration
/// starts from zero and terminates when two successive iterates agree
/// to within [EPSILON], or fails once an iterate exceeds
/// `divergence_limit`.
pub fn search<RHS>(divergence_limit: Time, rhs: RHS) -> SearchResult
where
    RHS: Fn(Time) -> Time,
{
    let mut assumed = 0.0;
    loop {
        let next = rhs(assumed);
        if (next - assumed).abs() <= EPSILON {
            // we have converged
            return Ok(next);
        }
        if next > divergence_limit {
            // if we get here, we failed to converge => no solution
            return Err(SearchFailure::DivergenceLimitExceeded {
                limit: divergence_limit,
            });
        }
        // continue iterating
        assumed = next;
    }
}
