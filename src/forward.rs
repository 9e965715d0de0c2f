//!
//! Forward algorithm definitions
//!
//! ```text
//! F[t,s] = P(emits y[0..=t] along a path prefix of l' ending at l'[s])
//! ```
//!
use crate::emission::Emissions;
use crate::label::PaddedLabel;
use crate::table::DPTable;

///
/// Run Forward algorithm to the emissions
///
/// Rows are filled in increasing `t`, since `F[t]` only reads `F[t-1]`.
///
pub fn build_alpha(padded: &PaddedLabel, emissions: &Emissions) -> DPTable {
    let n_steps = emissions.nrows();
    let mut table = DPTable::zero(n_steps, padded.len(), true);
    for t in 0..n_steps {
        for s in 0..padded.len() {
            let p_emit = emissions[[t, padded.index(s)]];
            let value = incoming_alpha(&table, padded, t, s) * p_emit;
            table.set(t, s, value);
        }
    }
    table
}

///
/// Forward prob flowing into `(t, s)` before emitting `y[t, l'[s]]`
///
/// For `t=0`, only the first blank and the first symbol can be a start.
///
/// ```text
/// F'[0,s] = 1 (s=0,1)
///           0 (otherwise)
/// ```
///
/// For `t>0`,
///
/// ```text
/// F'[t,s] = F[t-1,s] + F[t-1,s-1]               (l'[s] = blank or l'[s] = l'[s-2])
///           F[t-1,s] + F[t-1,s-1] + F[t-1,s-2]  (otherwise)
/// ```
///
/// and `F[t,s] = F'[t,s] y[t, l'[s]]`.
///
pub fn incoming_alpha(table: &DPTable, padded: &PaddedLabel, t: usize, s: usize) -> f64 {
    if t == 0 {
        return if s <= 1 { 1.0 } else { 0.0 };
    }
    let i = s as isize;
    let from_stay_or_next = table.get(t - 1, i) + table.get(t - 1, i - 1);
    if padded.is_blank(s) || padded.is_repeat_of_prev(s) {
        from_stay_or_next
    } else {
        // skip over the blank between two different symbols
        from_stay_or_next + table.get(t - 1, i - 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::label::pad_label;
    use ndarray::array;

    #[test]
    fn forward_single_symbol() {
        let alphabet = Alphabet::new(b"a", b'^').unwrap();
        let padded = pad_label(&alphabet, b"a").unwrap();
        // columns: a, ^
        let y = array![[0.6, 0.4], [0.3, 0.7]];
        let f = build_alpha(&padded, &y);
        assert!(f.is_forward());
        assert_eq!(f.values.dim(), (2, 3));
        assert_abs_diff_eq!(f.values, array![[0.4, 0.6, 0.0], [0.28, 0.3, 0.42]], epsilon = 1e-12);
        // paths: aa (0.18) + a^ (0.42) + ^a (0.12)
        assert_abs_diff_eq!(f.full_prob(), 0.72, epsilon = 1e-12);
    }
    #[test]
    fn forward_repeated_symbol_cannot_skip_blank() {
        let alphabet = Alphabet::new(b"a", b'^').unwrap();
        let padded = pad_label(&alphabet, b"aa").unwrap();
        // the only valid path of length 3 is a^a
        let y = array![[0.5, 0.5], [0.5, 0.5], [0.5, 0.5]];
        let f = build_alpha(&padded, &y);
        assert_abs_diff_eq!(f.full_prob(), 0.125, epsilon = 1e-12);
        // with 2 steps "aa" collapses into "a", so no valid path
        let y2 = array![[0.5, 0.5], [0.5, 0.5]];
        let f2 = build_alpha(&padded, &y2);
        assert_eq!(f2.full_prob(), 0.0);
    }
    #[test]
    fn forward_first_row() {
        let alphabet = Alphabet::default();
        let padded = pad_label(&alphabet, b"bab").unwrap();
        let y = array![[0.1, 0.2, 0.3, 0.15, 0.25]];
        let f = build_alpha(&padded, &y);
        assert_abs_diff_eq!(
            f.values,
            array![[0.25, 0.2, 0.0, 0.0, 0.0, 0.0, 0.0]],
            epsilon = 1e-12
        );
        // label longer than 1 cannot be emitted in a single step
        assert_eq!(f.full_prob(), 0.0);
    }
}
