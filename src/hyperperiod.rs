/*! Hyperperiod utilities over the floored, integral task periods. */

use crate::task::Task;
use crate::time::Time;

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Least common multiple of the floored task periods. Zero if any
/// period floors to zero.
pub fn hyperperiod(tasks: &[Task]) -> u64 {
    tasks.iter().fold(1, |acc, task| {
        let period = task.period().floor() as u64;
        let divisor = gcd(acc, period);
        if divisor == 0 {
            0
        } else {
            acc / divisor * period
        }
    })
}

/// Total CPU time demanded in one hyperperiod:
/// `Σ (C_i + ΣGm_i) · (H / ⌊T_i⌋)`.
pub fn cpu_time_in_hyperperiod(tasks: &[Task]) -> Time {
    let horizon = hyperperiod(tasks) as Time;
    tasks
        .iter()
        .map(|task| task.cpu_demand() * (horizon / task.period().floor()))
        .sum()
}

/// Total accelerator time demanded in one hyperperiod:
/// `Σ ΣGe_i · (H / ⌊T_i⌋)`.
pub fn accel_time_in_hyperperiod(tasks: &[Task]) -> Time {
    let horizon = hyperperiod(tasks) as Time;
    tasks
        .iter()
        .map(|task| task.total_execution() * (horizon / task.period().floor()))
        .sum()
}
