//!
//! Self-checks of the Forward/Backward tables
//!
//! Uses a label with a single valid path of length `T` (no blanks), so that
//! `P(l|y)` can be computed independently as a plain product of emissions.
//!
use crate::alphabet::Alphabet;
use crate::emission::{self, Emissions};
use crate::error::{CTCError, Result};
use crate::label::{label_to_string, Label};
use crate::output::build_tables;
use crate::params::CTCParams;
use itertools::Itertools;

///
/// Label whose t-th symbol is the `t mod n_plain`-th plain symbol.
///
/// Neighboring symbols differ if the alphabet has two or more plain symbols,
/// so the label of length `T` has exactly one valid path in `T` steps.
///
pub fn cyclic_label(alphabet: &Alphabet, n_steps: usize) -> Label {
    let plain = alphabet.plain_symbols();
    if plain.is_empty() {
        return Label::new();
    }
    (0..n_steps).map(|t| plain[t % plain.len()]).collect()
}

///
/// `\prod_t y[t, l[t]]`
///
/// Needs `|l| <= T`.
///
pub fn manual_prob(alphabet: &Alphabet, label: &[u8], emissions: &Emissions) -> Result<f64> {
    let n_steps = emission::n_steps(emissions);
    if label.len() > n_steps {
        return Err(CTCError::LabelTooLong {
            label_len: label.len(),
            n_steps,
        });
    }
    label
        .iter()
        .enumerate()
        .map(|(t, &symbol)| -> Result<f64> { Ok(emissions[[t, alphabet.index_of(symbol)?]]) })
        .product()
}

///
/// Result of a single comparison
///
#[derive(Debug, Clone, PartialEq)]
pub struct CheckItem {
    pub name: String,
    pub expected: f64,
    pub empirical: f64,
    pub is_ok: bool,
}

impl CheckItem {
    ///
    /// `empirical` is ok if it is within `params.tolerance` (absolute) or
    /// `params.max_relative` (relative) of `expected`.
    ///
    pub fn new(name: impl Into<String>, expected: f64, empirical: f64, params: &CTCParams) -> Self {
        CheckItem {
            name: name.into(),
            expected,
            empirical,
            is_ok: relative_eq!(
                empirical,
                expected,
                epsilon = params.tolerance,
                max_relative = params.max_relative
            ),
        }
    }
}

impl std::fmt::Display for CheckItem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "[Test {}] {} check: gt score: {:.6} empirical score: {:.6}",
            if self.is_ok { "OK" } else { "FAIL" },
            self.name,
            self.expected,
            self.empirical
        )
    }
}

///
/// Collection of check results for a label
///
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub label: Label,
    pub items: Vec<CheckItem>,
}

impl CheckReport {
    pub fn is_all_ok(&self) -> bool {
        self.items.iter().all(|item| item.is_ok)
    }
    pub fn n_failed(&self) -> usize {
        self.items.iter().filter(|item| !item.is_ok).count()
    }
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "GT Label: '{}'", label_to_string(&self.label))?;
        write!(f, "{}", self.items.iter().join("\n"))
    }
}

///
/// Build the tables for `cyclic_label` and compare
///
/// * `F[T-1,S-1] + F[T-1,S-2]` with the manual product
/// * `B[0,0] + B[0,1]` with the manual product
/// * `\sum_s F[t,s] B[t,s] / y[t,l'[s]]` with the manual product, for each `t`
///
pub fn run_checks(params: &CTCParams, emissions: &Emissions) -> Result<CheckReport> {
    let alphabet = &params.alphabet;
    let n_steps = emission::n_steps(emissions);
    let label = cyclic_label(alphabet, n_steps);
    let output = build_tables(alphabet, &label, emissions)?;
    let expected = manual_prob(alphabet, &label, emissions)?;

    let mut items = vec![
        CheckItem::new(
            "Alpha DP",
            expected,
            output.to_full_prob_forward(),
            params,
        ),
        CheckItem::new(
            "Beta DP",
            expected,
            output.to_full_prob_backward(),
            params,
        ),
    ];
    for t in 0..n_steps {
        items.push(CheckItem::new(
            format!("State sum @ t={}", t),
            expected,
            output.to_state_prob_sum(t),
            params,
        ));
    }
    Ok(CheckReport { label, items })
}
