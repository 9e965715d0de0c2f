//!
//! Gradient of `ln P(l|y)` with respect to the emissions
//!
//! ```text
//! dlnP/dy[t,k] = 1/P \sum_{s: l'[s]=k} F[t,s] B[t,s] / y[t,k]^2
//! ```
//!
//! Each path visits exactly one position at `t`, so `P` is linear in `y[t,k]`
//! and `F[t,s] B[t,s] / y[t,k]^2 = F'[t,s] B'[t,s]` is the coefficient of
//! position `s`.
//!
use crate::alphabet::Symbol;
use crate::backward::incoming_beta;
use crate::emission::Emissions;
use crate::error::{CTCError, Result};
use crate::forward::incoming_alpha;
use crate::output::{build_tables, CTCOutput};
use crate::params::{CTCParams, ZeroEmissionPolicy};
use log::{debug, warn};
use ndarray::Array2;

///
/// Compute `dlnP/dy` of shape `(T, K)` for the label.
///
/// Columns of symbols not in the label have gradient 0.
///
pub fn compute_gradients(
    params: &CTCParams,
    emissions: &Emissions,
    label: &[Symbol],
) -> Result<Array2<f64>> {
    let output = build_tables(&params.alphabet, label, emissions)?;
    output.to_gradients(emissions, params.zero_emission)
}

impl CTCOutput {
    ///
    /// Compute `dlnP/dy` from the Forward/Backward tables.
    ///
    /// `emissions` must be the matrix that the tables were built from.
    /// It needs `T` rows, a column for every index read by the padded label,
    /// and finite non-negative values.
    ///
    pub fn to_gradients(
        &self,
        emissions: &Emissions,
        policy: ZeroEmissionPolicy,
    ) -> Result<Array2<f64>> {
        self.check_emissions(emissions)?;
        let p = self.to_full_prob_forward();
        if p == 0.0 {
            return Err(CTCError::ZeroProbability);
        }

        let mut grads = Array2::zeros(emissions.dim());
        let mut n_zero_emissions = 0;
        for t in 0..self.n_steps() {
            for s in 0..self.padded.len() {
                let k = self.padded.index(s);
                let y = emissions[[t, k]];
                let d_p_d_y = if y > 0.0 {
                    self.forward.values[[t, s]] * self.backward.values[[t, s]] / (y * y)
                } else {
                    match policy {
                        ZeroEmissionPolicy::Fail => return Err(CTCError::ZeroEmission { t, k }),
                        ZeroEmissionPolicy::Limit => {
                            n_zero_emissions += 1;
                            incoming_alpha(&self.forward, &self.padded, t, s)
                                * incoming_beta(&self.backward, &self.padded, t, s)
                        }
                    }
                };
                grads[[t, k]] += d_p_d_y;
            }
        }
        if n_zero_emissions > 0 {
            warn!(
                "{} zero emissions were replaced by the limit y->0",
                n_zero_emissions
            );
        }
        debug!("P={} grads computed for T={}", p, self.n_steps());
        Ok(grads / p)
    }
    fn check_emissions(&self, emissions: &Emissions) -> Result<()> {
        let n_columns = self.padded.indices().iter().max().map_or(0, |&k| k + 1);
        let (n_steps, n_symbols) = emissions.dim();
        if n_steps != self.n_steps() || n_symbols < n_columns {
            return Err(CTCError::shape_mismatch(
                format!("({}, >={})", self.n_steps(), n_columns),
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::*;
    use ndarray::array;

    #[test]
    fn gradient_bab_single_path() {
        // single path b->a->b, so P = y[0,b] y[1,a] y[2,b]
        // and dlnP/dy = 1/y on the path, 0 elsewhere.
        let y = mock_bab_emissions();
        let g = compute_gradients(&CTCParams::default(), &y, b"bab").unwrap();
        assert_eq!(g.dim(), (3, 5));
        assert_abs_diff_eq!(
            g,
            array![
                [0.0, 2.5, 0.0, 0.0, 0.0],
                [2.0, 0.0, 0.0, 0.0, 0.0],
                [0.0, 1.0 / 0.3, 0.0, 0.0, 0.0]
            ],
            epsilon = 1e-9
        );
    }
    #[test]
    fn gradient_bab_four_steps() {
        let y = array![
            [0.1, 0.4, 0.1, 0.1, 0.3],
            [0.3, 0.1, 0.1, 0.1, 0.4],
            [0.5, 0.1, 0.1, 0.1, 0.2],
            [0.2, 0.3, 0.1, 0.1, 0.3],
        ];
        let o = build_tables(&Default::default(), b"bab", &y).unwrap();
        assert_abs_diff_eq!(o.to_full_prob_forward(), 0.0669, epsilon = 1e-12);
        let g = o.to_gradients(&y, ZeroEmissionPolicy::Fail).unwrap();
        assert_abs_diff_eq!(
            g,
            array![
                [0.0, 2.331838565022421, 0.0, 0.0, 0.22421524663677125],
                [1.614349775784753, 1.5695067264573983, 0.0, 0.0, 0.8968609865470849],
                [1.569506726457399, 1.0762331838565018, 0.0, 0.0, 0.5381165919282509],
                [0.0, 3.1539611360239164, 0.0, 0.0, 0.179372197309417]
            ],
            epsilon = 1e-9
        );
    }
    #[test]
    fn gradient_zero_emission_fail() {
        let mut y = mock_bab_emissions();
        y[[1, 4]] = 0.0;
        assert_eq!(
            compute_gradients(&CTCParams::default(), &y, b"bab"),
            Err(CTCError::ZeroEmission { t: 1, k: 4 })
        );
        // zero in a column that the label never reads is fine
        let mut y = mock_bab_emissions();
        y[[1, 2]] = 0.0;
        let g = compute_gradients(&CTCParams::default(), &y, b"bab").unwrap();
        assert_eq!(g[[1, 2]], 0.0);
    }
    #[test]
    fn gradient_zero_emission_limit() {
        let params = CTCParams::default().with_zero_emission(ZeroEmissionPolicy::Limit);
        let mut y0 = mock_random_emissions(5, 3);
        y0[[2, 4]] = 0.0;
        let mut y1 = y0.clone();
        y1[[2, 4]] = 1e-12;
        let g0 = compute_gradients(&params, &y0, b"dcd").unwrap();
        let g1 = compute_gradients(&CTCParams::default(), &y1, b"dcd").unwrap();
        assert!(g0.iter().all(|x| x.is_finite()));
        assert_abs_diff_eq!(g0, g1, epsilon = 1e-6);
        assert!(g0[[2, 4]] > 0.0);
    }
    #[test]
    fn gradient_emissions_of_other_shape() {
        let o = build_tables(&Default::default(), b"bab", &mock_bab_emissions()).unwrap();
        let policy = ZeroEmissionPolicy::Fail;
        assert!(matches!(
            o.to_gradients(&mock_random_emissions(4, 0), policy),
            Err(CTCError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            o.to_gradients(&mock_random_emissions(2, 0), policy),
            Err(CTCError::ShapeMismatch { .. })
        ));
        // blank is column 4, so 4 columns are not enough
        assert!(matches!(
            o.to_gradients(&Array2::from_elem((3, 4), 0.25), policy),
            Err(CTCError::ShapeMismatch { .. })
        ));
        let mut y = mock_bab_emissions();
        y[[2, 0]] = f64::INFINITY;
        assert_eq!(
            o.to_gradients(&y, policy),
            Err(CTCError::InvalidEmission {
                t: 2,
                k: 0,
                value: f64::INFINITY
            })
        );
    }
    #[test]
    fn gradient_zero_probability() {
        // "aa" needs at least 3 steps
        let y = mock_random_emissions(2, 0);
        assert_eq!(
            compute_gradients(&CTCParams::default(), &y, b"aa"),
            Err(CTCError::ZeroProbability)
        );
    }
}
