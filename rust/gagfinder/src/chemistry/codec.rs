//! Text encoding shared by elemental formulas and monosaccharide compositions.
//!
//! Both are written as runs of `<Symbol><count>` where the symbol is an
//! uppercase letter followed by lowercase letters and a missing count means 1.

use crate::errors::FormulaError;

/// Fixed-shape record of signed counts indexed by a symbol alphabet.
pub trait SymbolCounts: Default {
    /// Human readable name used in error messages.
    const KIND: &'static str;
    /// Alphabet in canonical serialization order.
    const SYMBOLS: &'static [&'static str];

    fn count_at(&self, index: usize) -> i32;
    fn count_at_mut(&mut self, index: usize) -> &mut i32;
}

/// Emits every symbol with a positive count, in alphabet order.
///
/// ```
/// use gagfinder::chemistry::{
///     Composition,
///     encode,
/// };
///
/// let comp = Composition {
///     d: 1,
///     n: 1,
///     s: 2,
///     ..Default::default()
/// };
/// assert_eq!(encode(&comp), "DNS2");
/// ```
pub fn encode<T: SymbolCounts>(counts: &T) -> String {
    let mut out = String::new();
    for (i, sym) in T::SYMBOLS.iter().enumerate() {
        let n = counts.count_at(i);
        if n > 0 {
            out.push_str(sym);
            if n > 1 {
                out.push_str(&n.to_string());
            }
        }
    }
    out
}

/// Parses a symbol string; every character must belong to a token.
pub fn decode<T: SymbolCounts>(input: &str) -> Result<T, FormulaError> {
    if input.is_empty() {
        return Err(FormulaError::Empty { kind: T::KIND });
    }
    let bytes = input.as_bytes();
    let mut out = T::default();
    let mut pos = 0;
    while pos < bytes.len() {
        if !bytes[pos].is_ascii_uppercase() {
            return Err(FormulaError::Malformed {
                kind: T::KIND,
                input: input.to_string(),
                position: pos,
            });
        }
        let sym_start = pos;
        pos += 1;
        while pos < bytes.len() && bytes[pos].is_ascii_lowercase() {
            pos += 1;
        }
        let symbol = &input[sym_start..pos];
        let digits_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        let count = if digits_start == pos {
            1
        } else {
            input[digits_start..pos]
                .parse::<i32>()
                .map_err(|_| FormulaError::CountOverflow {
                    kind: T::KIND,
                    symbol: symbol.to_string(),
                    input: input.to_string(),
                })?
        };
        let index = T::SYMBOLS.iter().position(|s| *s == symbol).ok_or_else(|| {
            FormulaError::UnknownSymbol {
                kind: T::KIND,
                symbol: symbol.to_string(),
                input: input.to_string(),
            }
        })?;
        let slot = out.count_at_mut(index);
        *slot = slot
            .checked_add(count)
            .ok_or_else(|| FormulaError::CountOverflow {
                kind: T::KIND,
                symbol: symbol.to_string(),
                input: input.to_string(),
            })?;
    }
    Ok(out)
}
