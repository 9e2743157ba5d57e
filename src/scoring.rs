// src/scoring.rs
//! Turns the gate outcome and predicted gap into the electronic score and
//! the four radar metrics.

use serde::{Deserialize, Serialize};

/// Gap (eV) at which the match score peaks.
pub const GAP_TARGET: f64 = 1.75;
/// Width of the Gaussian match curve (eV).
pub const GAP_SIGMA: f64 = 2.0;
/// Gaps strictly above this earn the higher stability bonus.
pub const STABILITY_THRESHOLD: f64 = 3.0;
pub const STABILITY_HIGH: f64 = 0.8;
pub const STABILITY_LOW: f64 = 0.5;
pub const GAP_WEIGHT: f64 = 0.7;
pub const STABILITY_WEIGHT: f64 = 0.3;
/// Gap that saturates the radar gap axis.
pub const RADAR_GAP_SCALE: f64 = 6.0;

pub const METALLIC_SCORE: f64 = 25.0;
pub const METALLIC_STABILITY: f64 = 0.4;
pub const METALLIC_MAGNETIZATION: f64 = 0.2;
pub const INSULATOR_MAGNETIZATION: f64 = 0.5;

/// Radar axes in display order: gap, stability, magnetization, score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadarVector(pub [f64; 4]);

impl RadarVector {
    pub fn gap(&self) -> f64 {
        self.0[0]
    }

    pub fn stability(&self) -> f64 {
        self.0[1]
    }

    pub fn magnetization(&self) -> f64 {
        self.0[2]
    }

    pub fn score(&self) -> f64 {
        self.0[3]
    }

    pub fn as_array(&self) -> [f64; 4] {
        self.0
    }
}

/// Scored outcome of one prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub gap: f64,
    pub score: f64,
    pub stability: f64,
    pub magnetization: f64,
    pub radar: RadarVector,
}

/// Unnormalised Gaussian centred on the target gap, 1.0 at the peak.
pub fn gap_match(gap: f64) -> f64 {
    let d = gap - GAP_TARGET;
    (-(d * d) / (2.0 * GAP_SIGMA * GAP_SIGMA)).exp()
}

pub fn stability_bonus(gap: f64) -> f64 {
    if gap > STABILITY_THRESHOLD {
        STABILITY_HIGH
    } else {
        STABILITY_LOW
    }
}

/// Rounds to `decimals` places the way Python's `round(x, n)` does: on the
/// exact binary value, with ties going to the even digit. Float formatting
/// already rounds exactly, so the value is printed and read back.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Fixed outcome for compositions the gatekeeper calls metallic.
pub fn score_metallic() -> Assessment {
    Assessment {
        gap: 0.0,
        score: METALLIC_SCORE,
        stability: METALLIC_STABILITY,
        magnetization: METALLIC_MAGNETIZATION,
        radar: RadarVector([
            0.0,
            METALLIC_STABILITY,
            METALLIC_MAGNETIZATION,
            METALLIC_SCORE / 100.0,
        ]),
    }
}

/// Scores an insulator. The caller guarantees `gap` is finite; negative
/// estimates are floored to zero.
pub fn score_insulator(gap: f64) -> Assessment {
    let gap = gap.max(0.0);
    let stability = stability_bonus(gap);
    let raw = (gap_match(gap) * GAP_WEIGHT + stability * STABILITY_WEIGHT) * 100.0;
    let score = round_to(raw, 1).clamp(0.0, 100.0);

    Assessment {
        gap,
        score,
        stability,
        magnetization: INSULATOR_MAGNETIZATION,
        radar: RadarVector([
            (gap / RADAR_GAP_SCALE).clamp(0.0, 1.0),
            stability,
            INSULATOR_MAGNETIZATION,
            score / 100.0,
        ]),
    }
}
