// src/utils/report.rs

use crate::error::PredictionError;
use crate::model::composition::Composition;
use crate::pipeline::PredictionResult;

/// Human-readable summary of one prediction, printed by `--report`.
pub fn prediction_summary(formula: &str, outcome: &Result<PredictionResult, PredictionError>) -> String {
    let mut out = String::new();
    out.push_str(&format!("Formula: {}\n", formula.trim()));

    if let Ok(comp) = Composition::parse(formula) {
        out.push_str(&composition_table(&comp));
    }

    match outcome {
        Ok(r) => {
            out.push_str(&format!("Class:     {}\n", r.class));
            out.push_str(&format!("Band gap:  {:.3} eV\n", r.gap));
            out.push_str(&format!("Score:     {:.1} / 100\n", r.score));
            out.push_str(&format!(
                "Radar:     gap {:.3}  stability {:.2}  magnetization {:.2}  score {:.3}\n",
                r.radar.gap(),
                r.radar.stability(),
                r.radar.magnetization(),
                r.radar.score()
            ));
        }
        Err(e) => out.push_str(&format!("Error: {}\n", e)),
    }
    out
}

/// Element breakdown with molar fractions and a few key properties.
pub fn composition_table(comp: &Composition) -> String {
    let mut out = String::new();
    out.push_str("--------------------------------------------------\n");
    out.push_str(&format!(
        "{:<8} {:<8} {:<10} {:<10} {:<10}\n",
        "Element", "Z", "Amount", "Fraction", "EN"
    ));
    out.push_str("--------------------------------------------------\n");

    for (el, frac) in comp.fractions() {
        out.push_str(&format!(
            "{:<8} {:<8} {:<10.4} {:<10.4} {:<10.2}\n",
            el.symbol,
            el.number,
            comp.amount_of(&el.symbol),
            frac,
            el.electronegativity
        ));
    }
    out.push_str("--------------------------------------------------\n");
    out
}
