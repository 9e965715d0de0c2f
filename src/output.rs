//!
//! Forward/Backward result for a (label, emissions) pair
//!
//! ```text
//! P(l|y) = F[T-1,S-1] + F[T-1,S-2]
//!        = B[0,0] + B[0,1]
//!        = \sum_s F[t,s] B[t,s] / y[t,l'[s]]   (for any t)
//! ```
//!
use crate::alphabet::{Alphabet, Symbol};
use crate::backward::{build_beta, incoming_beta};
use crate::emission::{self, Emissions};
use crate::error::{CTCError, Result};
use crate::forward::build_alpha;
use crate::label::{label_to_string, pad_label, PaddedLabel};
use crate::table::DPTable;
use log::debug;

///
/// Struct that stores both Forward and Backward tables
/// of the padded label for the given emissions.
///
#[derive(Debug, Clone, PartialEq)]
pub struct CTCOutput {
    pub padded: PaddedLabel,
    pub forward: DPTable,
    pub backward: DPTable,
}

///
/// Check the inputs and run Forward and Backward on them.
///
/// Forward and Backward are independent, so they run in parallel with `rayon::join`.
///
pub fn build_tables(
    alphabet: &Alphabet,
    label: &[Symbol],
    emissions: &Emissions,
) -> Result<CTCOutput> {
    emission::validate(alphabet, emissions)?;
    if label.is_empty() {
        return Err(CTCError::EmptyLabel);
    }
    let n_steps = emission::n_steps(emissions);
    if n_steps < label.len() {
        return Err(CTCError::LabelTooLong {
            label_len: label.len(),
            n_steps,
        });
    }
    let padded = pad_label(alphabet, label)?;
    debug!(
        "building tables label={} padded={} T={} S={}",
        label_to_string(label),
        padded,
        n_steps,
        padded.len()
    );
    let (forward, backward) = rayon::join(
        || build_alpha(&padded, emissions),
        || build_beta(&padded, emissions),
    );
    Ok(CTCOutput::new(padded, forward, backward))
}

///
/// Full probability from either Forward or Backward table
///
pub fn sequence_probability(table: &DPTable) -> f64 {
    table.full_prob()
}

impl CTCOutput {
    pub fn new(padded: PaddedLabel, forward: DPTable, backward: DPTable) -> Self {
        // check forward/backward is created by build_alpha/build_beta
        assert!(forward.is_forward());
        assert!(!backward.is_forward());
        assert_eq!(forward.values.dim(), backward.values.dim());
        assert_eq!(forward.n_positions(), padded.len());
        CTCOutput {
            padded,
            forward,
            backward,
        }
    }
    pub fn n_steps(&self) -> usize {
        self.forward.n_steps()
    }
    /// Calculate the full probability `P(l|y)` from **forward** result.
    pub fn to_full_prob_forward(&self) -> f64 {
        self.forward.full_prob()
    }
    /// Calculate the full probability `P(l|y)` from **backward** result.
    pub fn to_full_prob_backward(&self) -> f64 {
        self.backward.full_prob()
    }
    ///
    /// CTC loss `-ln P(l|y)`
    ///
    /// `+inf` if the label cannot be emitted.
    ///
    pub fn to_loss(&self) -> f64 {
        -self.to_full_prob_forward().ln()
    }
    ///
    /// Total prob of paths passing through some padded position at timestep `t`
    ///
    /// ```text
    /// \sum_s F[t,s] B[t,s] / y[t,l'[s]] = \sum_s F[t,s] B'[t,s]
    /// ```
    ///
    /// Every path visits exactly one position at `t`, so this equals `P(l|y)`
    /// for all `t`.
    ///
    pub fn to_state_prob_sum(&self, t: usize) -> f64 {
        (0..self.padded.len())
            .map(|s| self.forward.values[[t, s]] * incoming_beta(&self.backward, &self.padded, t, s))
            .sum()
    }
    /// Split into `(alpha, beta)`
    pub fn into_tables(self) -> (DPTable, DPTable) {
        (self.forward, self.backward)
    }
}
