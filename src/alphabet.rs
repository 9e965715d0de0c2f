//!
//! Alphabet of CTC outputs
//!
//! plain symbols and a single blank symbol, with a fixed bijection
//! `symbol <-> index` that defines the column order of the emission matrix.
//!
use crate::error::{CTCError, Result};

/// Type of symbols (ascii bytes)
pub type Symbol = u8;

/// Default blank symbol `^`
pub const BLANK: Symbol = b'^';

/// Default plain symbols
pub const PLAIN_SYMBOLS: [Symbol; 4] = [b'a', b'b', b'c', b'd'];

///
/// Alphabet
///
/// Index of `symbols[i]` is `i`. Blank is always the last entry.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Alphabet {
    /// plain symbols followed by the blank
    symbols: Vec<Symbol>,
    /// `index[symbol] = Some(i)` if symbol is in the alphabet
    index: [Option<usize>; 256],
}

impl Alphabet {
    ///
    /// Create alphabet from plain symbols and a blank.
    ///
    /// Column index of plain symbol `plain[i]` is `i`, and blank is `plain.len()`.
    ///
    pub fn new(plain: &[Symbol], blank: Symbol) -> Result<Alphabet> {
        let mut index = [None; 256];
        let mut symbols = Vec::with_capacity(plain.len() + 1);
        for &symbol in plain.iter().chain(std::iter::once(&blank)) {
            let slot = &mut index[symbol as usize];
            if slot.is_some() {
                return Err(CTCError::DuplicateSymbol { symbol });
            }
            *slot = Some(symbols.len());
            symbols.push(symbol);
        }
        Ok(Alphabet { symbols, index })
    }
    /// Number of symbols including blank `K`
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
    /// Number of plain symbols `K-1`
    pub fn n_plain(&self) -> usize {
        self.symbols.len() - 1
    }
    /// Plain symbols in index order
    pub fn plain_symbols(&self) -> &[Symbol] {
        &self.symbols[..self.n_plain()]
    }
    /// The blank symbol
    pub fn blank(&self) -> Symbol {
        self.symbols[self.blank_index()]
    }
    /// Column index of the blank symbol
    pub fn blank_index(&self) -> usize {
        self.n_plain()
    }
    pub fn is_blank(&self, symbol: Symbol) -> bool {
        symbol == self.blank()
    }
    ///
    /// symbol -> index
    ///
    pub fn index_of(&self, symbol: Symbol) -> Result<usize> {
        self.index[symbol as usize].ok_or(CTCError::UnknownSymbol { symbol })
    }
    ///
    /// index -> symbol
    ///
    pub fn symbol_of(&self, index: usize) -> Option<Symbol> {
        self.symbols.get(index).copied()
    }
    /// Iterator over `(index, symbol)` including the blank
    pub fn iter(&self) -> impl Iterator<Item = (usize, Symbol)> + '_ {
        self.symbols.iter().copied().enumerate()
    }
}

/// `{a,b,c,d}` with blank `^`
impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::new(&PLAIN_SYMBOLS, BLANK).expect("default alphabet has no duplicates")
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, symbol) in self.iter() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", char::from(symbol), i)?;
        }
        Ok(())
    }
}
