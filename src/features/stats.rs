// src/features/stats.rs

use std::fmt;

/// Weighted statistics computed over the elements of a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Minimum,
    Maximum,
    Range,
    Mean,
    AvgDev,
    Mode,
}

impl Stat {
    /// Order used for the magpie preset.
    pub const MAGPIE: [Stat; 6] = [
        Stat::Minimum,
        Stat::Maximum,
        Stat::Range,
        Stat::Mean,
        Stat::AvgDev,
        Stat::Mode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stat::Minimum => "minimum",
            Stat::Maximum => "maximum",
            Stat::Range => "range",
            Stat::Mean => "mean",
            Stat::AvgDev => "avg_dev",
            Stat::Mode => "mode",
        }
    }

    /// Evaluates the statistic. `values` and `weights` are parallel slices;
    /// weights are molar fractions and are expected to sum to one.
    pub fn compute(self, values: &[f64], weights: &[f64]) -> f64 {
        match self {
            Stat::Minimum => minimum(values),
            Stat::Maximum => maximum(values),
            Stat::Range => maximum(values) - minimum(values),
            Stat::Mean => mean(values, weights),
            Stat::AvgDev => avg_dev(values, weights),
            Stat::Mode => mode(values, weights),
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn minimum(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn maximum(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn mean(values: &[f64], weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    values.iter().zip(weights).map(|(v, w)| v * w).sum::<f64>() / total
}

fn avg_dev(values: &[f64], weights: &[f64]) -> f64 {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let m = mean(values, weights);
    values.iter().zip(weights).map(|(v, w)| (v - m).abs() * w).sum::<f64>() / total
}

/// Value of the most abundant element; ties go to the smallest value.
fn mode(values: &[f64], weights: &[f64]) -> f64 {
    let max_w = weights.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    values
        .iter()
        .zip(weights)
        .filter(|&(_, &w)| is_close(w, max_w))
        .map(|(&v, _)| v)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
        .unwrap_or(0.0)
}

// Same tolerances as numpy.isclose.
fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-8 + 1e-5 * b.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUES: [f64; 2] = [1.83, 3.44];
    const WEIGHTS: [f64; 2] = [0.4, 0.6];

    #[test]
    fn extremes_and_range() {
        assert_eq!(Stat::Minimum.compute(&VALUES, &WEIGHTS), 1.83);
        assert_eq!(Stat::Maximum.compute(&VALUES, &WEIGHTS), 3.44);
        assert!((Stat::Range.compute(&VALUES, &WEIGHTS) - 1.61).abs() < 1e-12);
    }

    #[test]
    fn weighted_mean_and_deviation() {
        let m = Stat::Mean.compute(&VALUES, &WEIGHTS);
        assert!((m - (0.4 * 1.83 + 0.6 * 3.44)).abs() < 1e-12);

        let d = Stat::AvgDev.compute(&VALUES, &WEIGHTS);
        let expected = 0.4 * (1.83 - m).abs() + 0.6 * (3.44 - m).abs();
        assert!((d - expected).abs() < 1e-12);
    }

    #[test]
    fn mode_prefers_heaviest_weight() {
        assert_eq!(Stat::Mode.compute(&VALUES, &WEIGHTS), 3.44);
    }

    #[test]
    fn mode_tie_resolves_to_minimum() {
        assert_eq!(Stat::Mode.compute(&[0.93, 3.16], &[0.5, 0.5]), 0.93);
    }

    #[test]
    fn single_element_statistics() {
        for stat in Stat::MAGPIE {
            let v = stat.compute(&[26.0], &[1.0]);
            let expected = match stat {
                Stat::Range | Stat::AvgDev => 0.0,
                _ => 26.0,
            };
            assert_eq!(v, expected, "{}", stat);
        }
    }

    #[test]
    fn labels() {
        let labels: Vec<_> = Stat::MAGPIE.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["minimum", "maximum", "range", "mean", "avg_dev", "mode"]);
    }
}
