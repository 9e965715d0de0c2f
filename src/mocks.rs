//!
//! Mock emission matrices for testing
//!
//! All of them use the default alphabet `{a,b,c,d}` + blank `^`
//! (columns `a,b,c,d,^`).
//!
use crate::emission::{generate, normalize_rows, Emissions};
use ndarray::array;

///
/// Row-stochastic `3x5` emissions.
///
/// With label `bab` and `T=3`, the only valid path is `b a b`, so
/// `P = 0.4 * 0.5 * 0.3 = 0.06`.
///
pub fn mock_bab_emissions() -> Emissions {
    array![
        [0.1, 0.4, 0.1, 0.1, 0.3],
        [0.5, 0.1, 0.1, 0.1, 0.2],
        [0.2, 0.3, 0.1, 0.1, 0.3],
    ]
}

///
/// Random row-stochastic emissions of `n_steps` rows from seed
///
pub fn mock_random_emissions(n_steps: usize, seed: u64) -> Emissions {
    normalize_rows(generate(n_steps, 5, seed))
}
