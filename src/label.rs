//!
//! Target labels and their blank-padded form
//!
//! ```text
//! label        l  =   b a b
//! padded label l' = ^ b ^ a ^ b ^
//! ```
//!
//! `|l'| = 2|l| + 1`, even positions of `l'` are blank and odd positions are `l`.
//!
use crate::alphabet::{Alphabet, Symbol};
use crate::error::{CTCError, Result};

/// Target label (sequence of plain symbols)
pub type Label = Vec<Symbol>;

/// Convert Label into &str, useful in displaying
pub fn label_to_string(label: &[Symbol]) -> String {
    String::from_utf8_lossy(label).into_owned()
}

///
/// Padded label `l'`
///
/// Symbols are resolved into column indices of the emission matrix when padding,
/// so the DP never looks up the alphabet.
///
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedLabel {
    symbols: Vec<Symbol>,
    indices: Vec<usize>,
    blank_index: usize,
}

///
/// Insert the blank before, between and after every symbol of the label.
///
/// Fails if the label has a symbol outside of the alphabet, or the blank itself.
///
pub fn pad_label(alphabet: &Alphabet, label: &[Symbol]) -> Result<PaddedLabel> {
    let blank = alphabet.blank();
    let blank_index = alphabet.blank_index();
    let n = 2 * label.len() + 1;
    let mut symbols = Vec::with_capacity(n);
    let mut indices = Vec::with_capacity(n);
    symbols.push(blank);
    indices.push(blank_index);
    for (position, &symbol) in label.iter().enumerate() {
        if alphabet.is_blank(symbol) {
            return Err(CTCError::BlankInLabel { position });
        }
        symbols.push(symbol);
        indices.push(alphabet.index_of(symbol)?);
        symbols.push(blank);
        indices.push(blank_index);
    }
    Ok(PaddedLabel {
        symbols,
        indices,
        blank_index,
    })
}

impl PaddedLabel {
    /// Length of the padded label `S`
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
    /// Length of the original label `L = (S-1)/2`
    pub fn label_len(&self) -> usize {
        (self.len() - 1) / 2
    }
    /// Symbol at padded position `s`
    pub fn symbol(&self, s: usize) -> Symbol {
        self.symbols[s]
    }
    /// Emission column index read at padded position `s`
    pub fn index(&self, s: usize) -> usize {
        self.indices[s]
    }
    pub fn is_blank(&self, s: usize) -> bool {
        self.indices[s] == self.blank_index
    }
    ///
    /// `l'[s] == l'[s-2]`
    ///
    /// A path cannot jump over the blank between two equal symbols.
    /// Blank positions are always "repeated" in this sense.
    ///
    pub fn is_repeat_of_prev(&self, s: usize) -> bool {
        s >= 2 && self.indices[s - 2] == self.indices[s]
    }
    ///
    /// `l'[s] == l'[s+2]`, the mirrored version of `is_repeat_of_prev`.
    ///
    pub fn is_repeat_of_next(&self, s: usize) -> bool {
        s + 2 < self.len() && self.indices[s + 2] == self.indices[s]
    }
    ///
    /// Padded positions reading the emission column `k`
    ///
    pub fn positions_of(&self, k: usize) -> impl Iterator<Item = usize> + '_ {
        self.indices
            .iter()
            .enumerate()
            .filter(move |&(_, &index)| index == k)
            .map(|(s, _)| s)
    }
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl std::fmt::Display for PaddedLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", label_to_string(&self.symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(b"bab", "^b^a^b^" ; "bab")]
    #[test_case(b"a", "^a^" ; "single symbol")]
    #[test_case(b"aa", "^a^a^" ; "repeated symbol")]
    #[test_case(b"", "^" ; "empty label")]
    fn pad(label: &[u8], expected: &str) {
        let a = Alphabet::default();
        let padded = pad_label(&a, label).unwrap();
        assert_eq!(padded.to_string(), expected);
        assert_eq!(padded.len(), 2 * label.len() + 1);
        assert_eq!(padded.label_len(), label.len());
        for s in 0..padded.len() {
            assert_eq!(padded.is_blank(s), s % 2 == 0);
        }
    }
    #[test]
    fn pad_indices() {
        let a = Alphabet::default();
        let padded = pad_label(&a, b"bab").unwrap();
        assert_eq!(padded.indices(), &[4, 1, 4, 0, 4, 1, 4]);
        assert_eq!(padded.positions_of(1).collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(padded.positions_of(4).collect::<Vec<_>>(), vec![0, 2, 4, 6]);
        assert_eq!(padded.positions_of(2).count(), 0);
    }
    #[test]
    fn pad_repeats() {
        let a = Alphabet::default();
        let padded = pad_label(&a, b"aab").unwrap();
        // ^ a ^ a ^ b ^
        assert!(!padded.is_repeat_of_prev(1));
        assert!(padded.is_repeat_of_prev(3));
        assert!(!padded.is_repeat_of_prev(5));
        assert!(padded.is_repeat_of_prev(2));
        assert!(padded.is_repeat_of_next(1));
        assert!(!padded.is_repeat_of_next(3));
        assert!(!padded.is_repeat_of_next(5));
        assert!(!padded.is_repeat_of_next(6));
    }
    #[test]
    fn pad_invalid() {
        let a = Alphabet::default();
        assert_eq!(
            pad_label(&a, b"bxb"),
            Err(CTCError::UnknownSymbol { symbol: b'x' })
        );
        assert_eq!(
            pad_label(&a, b"b^b"),
            Err(CTCError::BlankInLabel { position: 1 })
        );
    }
}
