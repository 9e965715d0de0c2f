//!
//! Backward algorithm definitions
//!
//! ```text
//! B[t,s] = P(emits y[t..T] along a path suffix of l' starting at l'[s])
//! ```
//!
use crate::emission::Emissions;
use crate::label::PaddedLabel;
use crate::table::DPTable;

///
/// Run Backward algorithm to the emissions
///
/// Rows are filled in decreasing `t`, since `B[t]` only reads `B[t+1]`.
///
pub fn build_beta(padded: &PaddedLabel, emissions: &Emissions) -> DPTable {
    let n_steps = emissions.nrows();
    let mut table = DPTable::zero(n_steps, padded.len(), false);
    for t in (0..n_steps).rev() {
        for s in (0..padded.len()).rev() {
            let p_emit = emissions[[t, padded.index(s)]];
            let value = incoming_beta(&table, padded, t, s) * p_emit;
            table.set(t, s, value);
        }
    }
    table
}

///
/// Backward prob flowing into `(t, s)` from `t+1`, before emitting `y[t, l'[s]]`
///
/// For `t=T-1`, only the last blank and the last symbol can be an end.
///
/// ```text
/// B'[T-1,s] = 1 (s=S-1,S-2)
///             0 (otherwise)
/// ```
///
/// For `t<T-1`,
///
/// ```text
/// B'[t,s] = B[t+1,s] + B[t+1,s+1]               (l'[s] = blank or l'[s] = l'[s+2])
///           B[t+1,s] + B[t+1,s+1] + B[t+1,s+2]  (otherwise)
/// ```
///
/// and `B[t,s] = B'[t,s] y[t, l'[s]]`.
///
pub fn incoming_beta(table: &DPTable, padded: &PaddedLabel, t: usize, s: usize) -> f64 {
    if t + 1 == table.n_steps() {
        return if s + 2 >= padded.len() { 1.0 } else { 0.0 };
    }
    let i = s as isize;
    let from_stay_or_next = table.get(t + 1, i) + table.get(t + 1, i + 1);
    if padded.is_blank(s) || padded.is_repeat_of_next(s) {
        from_stay_or_next
    } else {
        from_stay_or_next + table.get(t + 1, i + 2)
    }
}
