// src/model/elements.rs

use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded reference table (one row per element, Z = 1..=94).
const ELEMENT_TABLE: &str = include_str!("../../data/elements.csv");

const TABLE_COLUMNS: usize = 15;

/// Tabulated properties of a single element.
///
/// Values that the magpie property set derives (periodic table position,
/// unfilled shell counts, total valence) are computed from the tabulated
/// ones rather than stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub symbol: String,
    pub number: u32,
    pub mendeleev_number: f64,
    pub atomic_weight: f64,
    pub melting_t: f64,
    pub covalent_radius: f64,
    pub electronegativity: f64,
    pub ns_valence: f64,
    pub np_valence: f64,
    pub nd_valence: f64,
    pub nf_valence: f64,
    pub gs_volume_pa: f64,
    pub gs_bandgap: f64,
    pub gs_magmom: f64,
    pub space_group_number: f64,
}

impl Element {
    /// Period of the element (1-based).
    pub fn row(&self) -> u32 {
        match self.number {
            0..=2 => 1,
            3..=10 => 2,
            11..=18 => 3,
            19..=36 => 4,
            37..=54 => 5,
            55..=86 => 6,
            _ => 7,
        }
    }

    /// Group of the element (1..=18). Lanthanides and actinides sit in group 3.
    pub fn column(&self) -> u32 {
        let z = self.number;
        match z {
            1 => 1,
            2 => 18,
            3..=18 => {
                let start = if z <= 10 { 3 } else { 11 };
                let offset = z - start;
                if offset < 2 { offset + 1 } else { offset + 11 }
            }
            19..=54 => {
                let start = if z <= 36 { 19 } else { 37 };
                z - start + 1
            }
            _ => {
                let start = if z <= 86 { 55 } else { 87 };
                let offset = z - start;
                match offset {
                    0 | 1 => offset + 1,
                    2..=16 => 3,
                    _ => offset - 17 + 4,
                }
            }
        }
    }

    pub fn ns_unfilled(&self) -> f64 {
        unfilled(self.ns_valence, 2.0)
    }

    pub fn np_unfilled(&self) -> f64 {
        unfilled(self.np_valence, 6.0)
    }

    pub fn nd_unfilled(&self) -> f64 {
        unfilled(self.nd_valence, 10.0)
    }

    pub fn nf_unfilled(&self) -> f64 {
        unfilled(self.nf_valence, 14.0)
    }

    pub fn n_valence(&self) -> f64 {
        self.ns_valence + self.np_valence + self.nd_valence + self.nf_valence
    }

    pub fn n_unfilled(&self) -> f64 {
        self.ns_unfilled() + self.np_unfilled() + self.nd_unfilled() + self.nf_unfilled()
    }
}

// An empty shell counts as having no unfilled states.
fn unfilled(occupied: f64, capacity: f64) -> f64 {
    if occupied > 0.0 {
        capacity - occupied
    } else {
        0.0
    }
}

static ELEMENTS: OnceLock<HashMap<String, Element>> = OnceLock::new();

fn table() -> &'static HashMap<String, Element> {
    ELEMENTS.get_or_init(|| match parse_table(ELEMENT_TABLE) {
        Ok(rows) => rows.into_iter().map(|e| (e.symbol.clone(), e)).collect(),
        Err(e) => {
            log::error!("Element table is corrupt: {}", e);
            HashMap::new()
        }
    })
}

/// Looks up an element by its case-sensitive symbol ("Fe", not "FE").
pub fn lookup(symbol: &str) -> Option<&'static Element> {
    table().get(symbol)
}

/// Returns the atomic number (Z) for a given element symbol.
pub fn get_atomic_number(symbol: &str) -> Option<u32> {
    lookup(symbol).map(|e| e.number)
}

pub fn element_count() -> usize {
    table().len()
}

fn parse_table(text: &str) -> Result<Vec<Element>, String> {
    let mut rows = Vec::new();
    let mut header_seen = false;

    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !header_seen {
            header_seen = true;
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != TABLE_COLUMNS {
            return Err(format!(
                "line {}: expected {} columns, found {}",
                line_no + 1,
                TABLE_COLUMNS,
                parts.len()
            ));
        }

        let num = |idx: usize| -> Result<f64, String> {
            parts[idx]
                .parse::<f64>()
                .map_err(|_| format!("line {}: bad number {:?}", line_no + 1, parts[idx]))
        };

        let number: u32 = parts[1]
            .parse()
            .map_err(|_| format!("line {}: bad atomic number {:?}", line_no + 1, parts[1]))?;

        rows.push(Element {
            symbol: parts[0].to_string(),
            number,
            mendeleev_number: num(2)?,
            atomic_weight: num(3)?,
            melting_t: num(4)?,
            covalent_radius: num(5)?,
            electronegativity: num(6)?,
            ns_valence: num(7)?,
            np_valence: num(8)?,
            nd_valence: num(9)?,
            nf_valence: num(10)?,
            gs_volume_pa: num(11)?,
            gs_bandgap: num(12)?,
            gs_magmom: num(13)?,
            space_group_number: num(14)?,
        });
    }

    if rows.is_empty() {
        return Err("no element rows".to_string());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_table_parses() {
        let rows = parse_table(ELEMENT_TABLE).unwrap();
        assert_eq!(rows.len(), 94);
        for (i, e) in rows.iter().enumerate() {
            assert_eq!(e.number as usize, i + 1, "{} out of order", e.symbol);
        }
        assert_eq!(element_count(), 94);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(get_atomic_number("Fe"), Some(26));
        assert_eq!(get_atomic_number("FE"), None);
        assert_eq!(get_atomic_number("Xx"), None);
    }

    #[test]
    fn periodic_position() {
        let cases = [
            ("H", 1, 1),
            ("He", 1, 18),
            ("B", 2, 13),
            ("Na", 3, 1),
            ("Fe", 4, 8),
            ("Kr", 4, 18),
            ("Ag", 5, 11),
            ("Gd", 6, 3),
            ("Hf", 6, 4),
            ("Pb", 6, 14),
            ("Rn", 6, 18),
            ("U", 7, 3),
        ];
        for (sym, row, col) in cases {
            let e = lookup(sym).unwrap();
            assert_eq!(e.row(), row, "row of {}", sym);
            assert_eq!(e.column(), col, "column of {}", sym);
        }
    }

    #[test]
    fn shell_counts() {
        let fe = lookup("Fe").unwrap();
        assert_eq!(fe.n_valence(), 8.0);
        assert_eq!(fe.nd_unfilled(), 4.0);
        assert_eq!(fe.np_unfilled(), 0.0);
        assert_eq!(fe.n_unfilled(), 4.0);

        let o = lookup("O").unwrap();
        assert_eq!(o.np_unfilled(), 2.0);
        assert_eq!(o.ns_unfilled(), 0.0);

        let pd = lookup("Pd").unwrap();
        assert_eq!(pd.ns_unfilled(), 0.0);
        assert_eq!(pd.n_unfilled(), 0.0);
    }
}
