//!
//! CTCParams
//!
use crate::alphabet::Alphabet;
use crate::error::{CTCError, Result};

///
/// How the gradient treats `y[t,k] = 0` at a `(t,k)` read by the padded label.
///
/// `dlnP/dy[t,k] = 1/P \sum_{s: l'[s]=k} F[t,s] B[t,s] / y[t,k]^2`
/// divides by zero in that case.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroEmissionPolicy {
    /// Return `CTCError::ZeroEmission`.
    Fail,
    /// Use `F[t,s] B[t,s] / y^2 = F'[t,s] B'[t,s]`, which is the limit as `y -> 0`.
    Limit,
}

impl Default for ZeroEmissionPolicy {
    fn default() -> Self {
        ZeroEmissionPolicy::Fail
    }
}

///
/// Parameters of CTC calculation
///
#[derive(Debug, Clone, PartialEq)]
pub struct CTCParams {
    /// symbols and blank, fixed for a run
    pub alphabet: Alphabet,
    pub zero_emission: ZeroEmissionPolicy,
    /// absolute tolerance used when comparing probabilities in self-checks
    pub tolerance: f64,
    /// relative tolerance used together with `tolerance`
    pub max_relative: f64,
}

fn check_tolerance(value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CTCError::InvalidTolerance { value })
    }
}

impl CTCParams {
    pub fn new(alphabet: Alphabet) -> CTCParams {
        CTCParams {
            alphabet,
            ..CTCParams::default()
        }
    }
    pub fn with_zero_emission(mut self, zero_emission: ZeroEmissionPolicy) -> CTCParams {
        self.zero_emission = zero_emission;
        self
    }
    pub fn with_tolerance(mut self, tolerance: f64) -> Result<CTCParams> {
        self.tolerance = check_tolerance(tolerance)?;
        Ok(self)
    }
    pub fn with_max_relative(mut self, max_relative: f64) -> Result<CTCParams> {
        self.max_relative = check_tolerance(max_relative)?;
        Ok(self)
    }
}

impl Default for CTCParams {
    fn default() -> Self {
        CTCParams {
            alphabet: Alphabet::default(),
            zero_emission: ZeroEmissionPolicy::Fail,
            // numpy.isclose defaults
            tolerance: 1e-8,
            max_relative: 1e-5,
        }
    }
}

impl std::fmt::Display for CTCParams {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "alphabet={} zero_emission={:?} tolerance={} max_relative={}",
            self.alphabet, self.zero_emission, self.tolerance, self.max_relative
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_tolerance() {
        let params = CTCParams::default()
            .with_tolerance(1e-6)
            .unwrap()
            .with_max_relative(0.0)
            .unwrap();
        assert_eq!(params.tolerance, 1e-6);
        assert_eq!(params.max_relative, 0.0);
        assert_eq!(
            CTCParams::default().with_tolerance(-1.0),
            Err(CTCError::InvalidTolerance { value: -1.0 })
        );
        assert_eq!(
            CTCParams::default().with_max_relative(f64::INFINITY),
            Err(CTCError::InvalidTolerance {
                value: f64::INFINITY
            })
        );
        assert!(matches!(
            CTCParams::default().with_tolerance(f64::NAN),
            Err(CTCError::InvalidTolerance { .. })
        ));
    }
}
