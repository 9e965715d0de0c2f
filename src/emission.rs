//!
//! Emission matrix `y[t, k]`
//!
//! Row `t` is the output distribution of the network at timestep `t` and
//! column `k` is a symbol of the alphabet (in `Alphabet` index order).
//!
use crate::alphabet::Alphabet;
use crate::error::{CTCError, Result};
use ndarray::{Array2, Axis};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Type of emission matrix of shape `(T, K)`
pub type Emissions = Array2<f64>;

/// Number of timesteps `T`
pub fn n_steps(emissions: &Emissions) -> usize {
    emissions.nrows()
}

///
/// Check that the emission matrix can be used with the alphabet:
/// it has `K = |alphabet|` columns, at least one row, and every value is
/// finite and non-negative.
///
/// Rows are not required to sum to 1.
///
pub fn validate(alphabet: &Alphabet, emissions: &Emissions) -> Result<()> {
    let (n_steps, n_symbols) = emissions.dim();
    if n_steps == 0 || n_symbols != alphabet.len() {
        return Err(CTCError::shape_mismatch(
            format!("(T>0, {})", alphabet.len()),
            format!("({}, {})", n_steps, n_symbols),
        ));
    }
    for ((t, k), &value) in emissions.indexed_iter() {
        if !value.is_finite() || value < 0.0 {
            return Err(CTCError::InvalidEmission { t, k, value });
        }
    }
    Ok(())
}

///
/// generate random emission matrix of shape `(n_steps, n_symbols)` from seed.
/// each value is uniform in `[0, 1)` and rows are not normalized.
///
pub fn generate(n_steps: usize, n_symbols: usize, seed: u64) -> Emissions {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    Array2::from_shape_simple_fn((n_steps, n_symbols), || rng.gen::<f64>())
}

///
/// Divide each row by its sum so that every row is a distribution.
/// All-zero rows are left as they are.
///
pub fn normalize_rows(mut emissions: Emissions) -> Emissions {
    for mut row in emissions.axis_iter_mut(Axis(0)) {
        let total = row.sum();
        if total > 0.0 {
            row /= total;
        }
    }
    emissions
}

/// Convert the matrix into plain `Vec<Vec<f64>>` (row = timestep)
pub fn to_rows(matrix: &Array2<f64>) -> Vec<Vec<f64>> {
    matrix.outer_iter().map(|row| row.to_vec()).collect()
}

///
/// Row-wise softmax of unnormalized scores (logits)
///
pub fn softmax(logits: &Array2<f64>) -> Emissions {
    let mut ret = logits.clone();
    for mut row in ret.axis_iter_mut(Axis(0)) {
        let max = row.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        row.mapv_inplace(|x| (x - max).exp());
        let total = row.sum();
        row /= total;
    }
    ret
}
