/*! Wavefront and liquefaction constructions over fractional
accelerator requests.

On a fraction-sharable accelerator, a request that demands fraction `F`
leaves `1 − F` of the capacity to others. The *wavefront* is the
irreducible stack of largest low-priority requests that physically fit
into that residual capacity at once; the *liquefaction mass* spreads
every other request's accelerator time, weighted by the share it can
actually occupy, across the blocking capacity. The concurrent engines
combine the two into direct-blocking bounds. */

use crate::analysis::AnalysisContext;
use crate::config::FRACTION_GRANULARITY;
use crate::time::{ceil_comp, Fraction, Time};

/// Blocking-fraction capacity left to other requests:
/// `φ* = 1 − F + 1/γ` with `γ` the fraction granularity.
pub fn blocking_fraction(fraction: Fraction) -> Fraction {
    1.0 - fraction + 1.0 / FRACTION_GRANULARITY as f64
}

/// One layer of the wavefront: a low-priority request in flight and
/// the capacity still unfilled once it is admitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// Response time of the admitted request.
    pub length: Time,
    /// Residual blocking capacity after admitting it; non-positive
    /// once the stack is full.
    pub residual_fraction: Fraction,
}

/// The stack of concurrently admitted low-priority requests for one
/// pivot request, plus the accumulated wavefront mass.
#[derive(Debug, Clone, Default)]
pub struct Wavefront {
    pub layers: Vec<Layer>,
    pub mass: Time,
}

impl Wavefront {
    /// Request-level wavefront: admit the next-largest low-priority
    /// request with fraction at least `fraction` until the blocking
    /// capacity is exhausted. The final layer's share is trimmed to
    /// the capacity actually left for it.
    pub fn build(ctx: &AnalysisContext, pivot: usize, fraction: Fraction) -> Self {
        Self::construct(ctx, pivot, fraction, false)
    }

    /// Job-level wavefront: as [Wavefront::build], but each admitted
    /// request's share is clamped to the blocking fraction before it
    /// contributes mass.
    pub fn build_clamped(ctx: &AnalysisContext, pivot: usize, fraction: Fraction) -> Self {
        Self::construct(ctx, pivot, fraction, true)
    }

    fn construct(
        ctx: &AnalysisContext,
        pivot: usize,
        fraction: Fraction,
        clamp_shares: bool,
    ) -> Self {
        let capacity = blocking_fraction(fraction);
        let ranking = ctx.lp_ranking_min_fraction(pivot, fraction);

        let mut layers = Vec::new();
        let mut mass = 0.0;
        let mut left_over = capacity;
        let mut rank = 1;
        loop {
            let (length, mut share) = match ranking.kth(rank) {
                Some(entry) => (entry.response, entry.fraction),
                None => (0.0, 0.0),
            };
            left_over -= share;
            layers.push(Layer {
                length,
                residual_fraction: left_over,
            });
            if clamp_shares {
                if share > capacity {
                    share = capacity;
                }
            } else if left_over < 0.0 {
                share += left_over;
            }
            mass += length * share;

            if !(left_over > 0.0 && length > 0.0) {
                break;
            }
            rank += 1;
        }
        Wavefront { layers, mass }
    }
}

/// Liquefied mass supplied by all other tasks within an interval of
/// length `instant`: per task `j ≠ pivot`, up to
/// `β_j = ⌈(instant + W_j − E_j) / T_j⌉` instances arrive, and each
/// admitted segment contributes `β_j · H_{j,k} · min(F_{j,k}, φ*)`.
/// Higher-priority tasks contribute all segments; lower-priority tasks
/// only segments with fraction strictly below `pivot_fraction`.
pub fn liquefaction_mass(
    ctx: &AnalysisContext,
    pivot: usize,
    pivot_fraction: Fraction,
    instant: Time,
    resp: &[Time],
) -> Time {
    let capacity = blocking_fraction(pivot_fraction);
    let mut mass = 0.0;
    for (j, other) in ctx.tasks().iter().enumerate() {
        if j == pivot || !other.uses_accelerator() {
            continue;
        }
        let arrivals = ceil_comp((instant + resp[j] - other.cpu_demand()) / other.period());
        for (k, seg) in other.segments().iter().enumerate() {
            if seg.execution == 0.0 {
                continue;
            }
            if j < pivot || seg.fraction < pivot_fraction {
                mass += arrivals * ctx.segment_response(j, k) * seg.fraction.min(capacity);
            }
        }
    }
    mass
}
