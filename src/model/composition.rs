// src/model/composition.rs

use super::elements::{self, Element};
use thiserror::Error;

/// Why a formula string could not be turned into a composition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    #[error("formula is empty")]
    Empty,

    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("unknown element symbol {0:?}")]
    UnknownElement(String),

    #[error("unbalanced group bracket at position {0}")]
    UnbalancedGroup(usize),

    #[error("invalid amount {0:?}")]
    InvalidAmount(String),

    #[error("total amount must be positive")]
    NonPositiveTotal,
}

/// Elemental make-up of a compound, in order of first appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    entries: Vec<(&'static Element, f64)>,
}

impl Composition {
    /// Parses formulas such as `Fe2O3`, `Ca(OH)2`, `K4[Fe(CN)6]`,
    /// `Li0.5CoO2` or the hydrate `CuSO4·5H2O`.
    pub fn parse(formula: &str) -> Result<Self, CompositionError> {
        let chars: Vec<char> = formula.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.is_empty() {
            return Err(CompositionError::Empty);
        }

        let mut parser = FormulaParser { chars, pos: 0 };
        let mut comp = Composition { entries: Vec::new() };

        loop {
            let multiplier = parser.amount()?.unwrap_or(1.0);
            let part = parser.sequence(0)?;
            if part.entries.is_empty() {
                return Err(parser.unexpected());
            }
            comp.merge(&part, multiplier);

            match parser.peek() {
                None => break,
                Some('·') | Some('*') => parser.pos += 1,
                Some(')') | Some(']') => return Err(CompositionError::UnbalancedGroup(parser.pos)),
                Some(_) => return Err(parser.unexpected()),
            }
        }

        comp.entries.retain(|(_, amt)| *amt != 0.0);
        if comp.total() <= 0.0 {
            return Err(CompositionError::NonPositiveTotal);
        }
        Ok(comp)
    }

    fn add(&mut self, element: &'static Element, amount: f64) {
        if let Some(entry) = self.entries.iter_mut().find(|(e, _)| e.number == element.number) {
            entry.1 += amount;
        } else {
            self.entries.push((element, amount));
        }
    }

    fn merge(&mut self, other: &Composition, factor: f64) {
        for (el, amt) in &other.entries {
            self.add(el, amt * factor);
        }
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, amt)| amt).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn amount_of(&self, symbol: &str) -> f64 {
        self.entries
            .iter()
            .find(|(e, _)| e.symbol == symbol)
            .map(|(_, amt)| *amt)
            .unwrap_or(0.0)
    }

    /// (element, molar fraction) pairs; fractions sum to one.
    pub fn fractions(&self) -> Vec<(&'static Element, f64)> {
        let total = self.total();
        self.entries.iter().map(|(e, amt)| (*e, amt / total)).collect()
    }

    /// Reduced-order formula string, e.g. `Fe2O3`.
    pub fn formula(&self) -> String {
        self.entries
            .iter()
            .map(|(e, amt)| {
                if (*amt - 1.0).abs() < 1e-9 {
                    e.symbol.clone()
                } else if (amt.fract()).abs() < 1e-9 {
                    format!("{}{}", e.symbol, *amt as i64)
                } else {
                    format!("{}{}", e.symbol, amt)
                }
            })
            .collect()
    }
}

struct FormulaParser {
    chars: Vec<char>,
    pos: usize,
}

impl FormulaParser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self) -> CompositionError {
        match self.peek() {
            Some(ch) => CompositionError::UnexpectedChar { ch, pos: self.pos },
            None => CompositionError::UnexpectedChar { ch: '\0', pos: self.pos },
        }
    }

    /// Parses elements and groups until a closing bracket, separator or end.
    fn sequence(&mut self, depth: usize) -> Result<Composition, CompositionError> {
        let mut comp = Composition { entries: Vec::new() };

        while let Some(ch) = self.peek() {
            match ch {
                'A'..='Z' => {
                    let element = self.element()?;
                    let amount = self.amount()?.unwrap_or(1.0);
                    comp.add(element, amount);
                }
                '(' | '[' => {
                    let open_pos = self.pos;
                    let close = if ch == '(' { ')' } else { ']' };
                    self.pos += 1;
                    let inner = self.sequence(depth + 1)?;
                    if self.peek() != Some(close) {
                        return Err(CompositionError::UnbalancedGroup(open_pos));
                    }
                    self.pos += 1;
                    if inner.entries.is_empty() {
                        return Err(CompositionError::UnexpectedChar { ch: close, pos: self.pos - 1 });
                    }
                    let amount = self.amount()?.unwrap_or(1.0);
                    comp.merge(&inner, amount);
                }
                ')' | ']' => {
                    if depth == 0 {
                        return Err(CompositionError::UnbalancedGroup(self.pos));
                    }
                    break;
                }
                '·' | '*' => break,
                _ => return Err(self.unexpected()),
            }
        }

        Ok(comp)
    }

    fn element(&mut self) -> Result<&'static Element, CompositionError> {
        let start = self.pos;
        self.pos += 1;
        while let Some(c) = self.peek() {
            if c.is_ascii_lowercase() {
                self.pos += 1;
            } else {
                break;
            }
        }
        let symbol: String = self.chars[start..self.pos].iter().collect();
        elements::lookup(&symbol).ok_or(CompositionError::UnknownElement(symbol))
    }

    fn amount(&mut self) -> Result<Option<f64>, CompositionError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if start == self.pos {
            return Ok(None);
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
            _ => Err(CompositionError::InvalidAmount(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn simple_binary() {
        let c = Composition::parse("Fe2O3").unwrap();
        assert_eq!(c.len(), 2);
        assert!(approx(c.amount_of("Fe"), 2.0));
        assert!(approx(c.amount_of("O"), 3.0));
        assert!(approx(c.total(), 5.0));
        assert_eq!(c.formula(), "Fe2O3");
    }

    #[test]
    fn single_element() {
        let c = Composition::parse("Fe").unwrap();
        assert_eq!(c.len(), 1);
        assert!(approx(c.fractions()[0].1, 1.0));
    }

    #[test]
    fn nested_groups() {
        let c = Composition::parse("K4[Fe(CN)6]").unwrap();
        assert!(approx(c.amount_of("K"), 4.0));
        assert!(approx(c.amount_of("Fe"), 1.0));
        assert!(approx(c.amount_of("C"), 6.0));
        assert!(approx(c.amount_of("N"), 6.0));

        let c = Composition::parse("Ca(OH)2").unwrap();
        assert!(approx(c.amount_of("O"), 2.0));
        assert!(approx(c.amount_of("H"), 2.0));
    }

    #[test]
    fn repeated_elements_merge() {
        let c = Composition::parse("CH3COOH").unwrap();
        assert_eq!(c.len(), 3);
        assert!(approx(c.amount_of("C"), 2.0));
        assert!(approx(c.amount_of("H"), 4.0));
        assert!(approx(c.amount_of("O"), 2.0));
    }

    #[test]
    fn fractional_amounts() {
        let c = Composition::parse("Li0.5CoO2").unwrap();
        assert!(approx(c.amount_of("Li"), 0.5));
        assert!(approx(c.total(), 3.5));
    }

    #[test]
    fn hydrate_with_multiplier() {
        let c = Composition::parse("CuSO4·5H2O").unwrap();
        assert!(approx(c.amount_of("O"), 9.0));
        assert!(approx(c.amount_of("H"), 10.0));
        let star = Composition::parse("CuSO4*5H2O").unwrap();
        assert_eq!(c, star);
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(Composition::parse(" Na Cl ").unwrap(), Composition::parse("NaCl").unwrap());
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Composition::parse(""), Err(CompositionError::Empty));
        assert_eq!(Composition::parse("   "), Err(CompositionError::Empty));
        assert!(matches!(
            Composition::parse("Xx9Zz"),
            Err(CompositionError::UnknownElement(s)) if s == "Xx"
        ));
        assert!(matches!(Composition::parse("fe2o3"), Err(CompositionError::UnexpectedChar { .. })));
        assert!(matches!(Composition::parse("Fe2(O3"), Err(CompositionError::UnbalancedGroup(_))));
        assert!(matches!(Composition::parse("FeO)"), Err(CompositionError::UnbalancedGroup(_))));
        assert!(matches!(Composition::parse("Fe(]"), Err(CompositionError::UnbalancedGroup(_))));
        assert!(matches!(Composition::parse("Fe1.2.3"), Err(CompositionError::InvalidAmount(_))));
        assert_eq!(Composition::parse("Fe0O0"), Err(CompositionError::NonPositiveTotal));
        assert!(Composition::parse("Fe-O").is_err());
        assert!(Composition::parse("()").is_err());
    }
}
