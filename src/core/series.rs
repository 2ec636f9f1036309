//! Per-period row generation.
//!
//! Two step disciplines exist and are kept apart on purpose: `chained`
//! threads state from one period into the next, `independent` evaluates
//! every period from the fixed starting inputs. Which one a formula uses
//! changes its results, so formulas pick one explicitly.

/// Produces exactly `horizon` rows for periods `1..=horizon`, feeding each
/// period's output state into the next period's step. Also returns the
/// state after the last period (the seed when `horizon` is zero).
pub fn chained<S, R, F>(horizon: u32, seed: S, mut step: F) -> (Vec<R>, S)
where
    F: FnMut(u32, &S) -> (R, S),
{
    let mut rows = Vec::with_capacity(horizon as usize);
    let mut state = seed;
    for period in 1..=horizon {
        let (row, next) = step(period, &state);
        rows.push(row);
        state = next;
    }
    (rows, state)
}

/// Produces exactly `horizon` rows for periods `1..=horizon`, each computed
/// from the period number alone.
pub fn independent<R, F>(horizon: u32, step: F) -> Vec<R>
where
    F: FnMut(u32) -> R,
{
    (1..=horizon).map(step).collect()
}
