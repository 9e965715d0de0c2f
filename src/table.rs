//!
//! Table definitions
//!
//! ## DPTable
//!
//! the prob assigned for each (timestep, padded position)
//!
//! `F[t,s]` (alpha) or `B[t,s]` (beta)
//!
use ndarray::Array2;

///
/// Forward/Backward DP table of shape `(T, S)`
///
/// * `T` is the number of timesteps (rows of the emission matrix)
/// * `S` is the length of the padded label
///
#[derive(Debug, Clone, PartialEq)]
pub struct DPTable {
    pub values: Array2<f64>,
    pub is_forward: bool,
}

impl DPTable {
    pub fn zero(n_steps: usize, n_positions: usize, is_forward: bool) -> Self {
        DPTable {
            values: Array2::zeros((n_steps, n_positions)),
            is_forward,
        }
    }
    /// Number of timesteps `T`
    pub fn n_steps(&self) -> usize {
        self.values.nrows()
    }
    /// Length of padded label `S`
    pub fn n_positions(&self) -> usize {
        self.values.ncols()
    }
    pub fn is_forward(&self) -> bool {
        self.is_forward
    }
    ///
    /// `table[t, s]` where `s` may be out of `[0, S)`.
    ///
    /// No path reaches an invalid position, so it has zero probability.
    ///
    pub fn get(&self, t: usize, s: isize) -> f64 {
        if s < 0 || s as usize >= self.n_positions() {
            0.0
        } else {
            self.values[[t, s as usize]]
        }
    }
    pub fn set(&mut self, t: usize, s: usize, value: f64) {
        self.values[[t, s]] = value;
    }
    ///
    /// Full probability `P(l|y)` from the boundary cells
    ///
    /// ```text
    /// forward:  P = F[T-1, S-1] + F[T-1, S-2]
    /// backward: P = B[0, 0] + B[0, 1]
    /// ```
    ///
    /// A valid path ends at the last blank or the last symbol, and starts at
    /// the first blank or the first symbol.
    ///
    pub fn full_prob(&self) -> f64 {
        let s_last = self.n_positions() as isize - 1;
        if self.is_forward() {
            let t_last = self.n_steps() - 1;
            self.get(t_last, s_last) + self.get(t_last, s_last - 1)
        } else {
            self.get(0, 0) + self.get(0, 1)
        }
    }
}

impl std::fmt::Display for DPTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_forward() {
            writeln!(f, "forward")?;
        } else {
            writeln!(f, "backward")?;
        }
        for (t, row) in self.values.outer_iter().enumerate() {
            write!(f, "{}", t)?;
            for value in row.iter() {
                write!(f, "\t{:.6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
