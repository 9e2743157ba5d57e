// src/features/element_property.rs

use super::stats::Stat;
use crate::model::composition::Composition;
use crate::model::elements::Element;

/// Prefix shared by every magpie column name.
pub const MAGPIE_PREFIX: &str = "MagpieData";

/// Elemental properties of the magpie preset, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Number,
    MendeleevNumber,
    AtomicWeight,
    MeltingT,
    Column,
    Row,
    CovalentRadius,
    Electronegativity,
    NsValence,
    NpValence,
    NdValence,
    NfValence,
    NValence,
    NsUnfilled,
    NpUnfilled,
    NdUnfilled,
    NfUnfilled,
    NUnfilled,
    GsVolumePa,
    GsBandgap,
    GsMagmom,
    SpaceGroupNumber,
}

impl Property {
    pub const MAGPIE: [Property; 22] = [
        Property::Number,
        Property::MendeleevNumber,
        Property::AtomicWeight,
        Property::MeltingT,
        Property::Column,
        Property::Row,
        Property::CovalentRadius,
        Property::Electronegativity,
        Property::NsValence,
        Property::NpValence,
        Property::NdValence,
        Property::NfValence,
        Property::NValence,
        Property::NsUnfilled,
        Property::NpUnfilled,
        Property::NdUnfilled,
        Property::NfUnfilled,
        Property::NUnfilled,
        Property::GsVolumePa,
        Property::GsBandgap,
        Property::GsMagmom,
        Property::SpaceGroupNumber,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Property::Number => "Number",
            Property::MendeleevNumber => "MendeleevNumber",
            Property::AtomicWeight => "AtomicWeight",
            Property::MeltingT => "MeltingT",
            Property::Column => "Column",
            Property::Row => "Row",
            Property::CovalentRadius => "CovalentRadius",
            Property::Electronegativity => "Electronegativity",
            Property::NsValence => "NsValence",
            Property::NpValence => "NpValence",
            Property::NdValence => "NdValence",
            Property::NfValence => "NfValence",
            Property::NValence => "NValence",
            Property::NsUnfilled => "NsUnfilled",
            Property::NpUnfilled => "NpUnfilled",
            Property::NdUnfilled => "NdUnfilled",
            Property::NfUnfilled => "NfUnfilled",
            Property::NUnfilled => "NUnfilled",
            Property::GsVolumePa => "GSvolume_pa",
            Property::GsBandgap => "GSbandgap",
            Property::GsMagmom => "GSmagmom",
            Property::SpaceGroupNumber => "SpaceGroupNumber",
        }
    }

    pub fn value(self, e: &Element) -> f64 {
        match self {
            Property::Number => f64::from(e.number),
            Property::MendeleevNumber => e.mendeleev_number,
            Property::AtomicWeight => e.atomic_weight,
            Property::MeltingT => e.melting_t,
            Property::Column => f64::from(e.column()),
            Property::Row => f64::from(e.row()),
            Property::CovalentRadius => e.covalent_radius,
            Property::Electronegativity => e.electronegativity,
            Property::NsValence => e.ns_valence,
            Property::NpValence => e.np_valence,
            Property::NdValence => e.nd_valence,
            Property::NfValence => e.nf_valence,
            Property::NValence => e.n_valence(),
            Property::NsUnfilled => e.ns_unfilled(),
            Property::NpUnfilled => e.np_unfilled(),
            Property::NdUnfilled => e.nd_unfilled(),
            Property::NfUnfilled => e.nf_unfilled(),
            Property::NUnfilled => e.n_unfilled(),
            Property::GsVolumePa => e.gs_volume_pa,
            Property::GsBandgap => e.gs_bandgap,
            Property::GsMagmom => e.gs_magmom,
            Property::SpaceGroupNumber => e.space_group_number,
        }
    }
}

/// Column name for one (statistic, property) pair.
pub fn feature_label(stat: Stat, property: Property) -> String {
    format!("{} {} {}", MAGPIE_PREFIX, stat.label(), property.name())
}

/// All 132 magpie column names, property-major.
pub fn magpie_feature_labels() -> Vec<String> {
    Property::MAGPIE
        .iter()
        .flat_map(|&p| Stat::MAGPIE.iter().map(move |&s| feature_label(s, p)))
        .collect()
}

/// Computes every magpie feature for a composition, in label order.
pub fn featurize(comp: &Composition) -> Vec<(String, f64)> {
    let fractions = comp.fractions();
    let weights: Vec<f64> = fractions.iter().map(|(_, w)| *w).collect();

    let mut out = Vec::with_capacity(Property::MAGPIE.len() * Stat::MAGPIE.len());
    for property in Property::MAGPIE {
        let values: Vec<f64> = fractions.iter().map(|(e, _)| property.value(e)).collect();
        for stat in Stat::MAGPIE {
            out.push((feature_label(stat, property), stat.compute(&values, &weights)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(features: &[(String, f64)], name: &str) -> f64 {
        features.iter().find(|(n, _)| n == name).map(|(_, v)| *v).unwrap()
    }

    #[test]
    fn preset_has_132_unique_labels() {
        let labels = magpie_feature_labels();
        assert_eq!(labels.len(), 132);
        let unique: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), 132);
        assert_eq!(labels[0], "MagpieData minimum Number");
        assert_eq!(labels[5], "MagpieData mode Number");
        assert_eq!(labels[131], "MagpieData mode SpaceGroupNumber");
    }

    #[test]
    fn featurize_matches_labels() {
        let comp = Composition::parse("Fe2O3").unwrap();
        let features = featurize(&comp);
        let names: Vec<String> = features.iter().map(|(n, _)| n.clone()).collect();
        assert_eq!(names, magpie_feature_labels());
        assert!(features.iter().all(|(_, v)| v.is_finite()));
    }

    #[test]
    fn iron_oxide_values() {
        let comp = Composition::parse("Fe2O3").unwrap();
        let f = featurize(&comp);
        assert_eq!(lookup(&f, "MagpieData minimum Number"), 8.0);
        assert_eq!(lookup(&f, "MagpieData maximum Number"), 26.0);
        assert!((lookup(&f, "MagpieData mean Number") - (0.4 * 26.0 + 0.6 * 8.0)).abs() < 1e-12);
        assert_eq!(lookup(&f, "MagpieData mode Number"), 8.0);
        assert!((lookup(&f, "MagpieData range Electronegativity") - 1.61).abs() < 1e-9);
    }

    #[test]
    fn pure_metal_has_no_spread() {
        let comp = Composition::parse("Fe").unwrap();
        let f = featurize(&comp);
        assert_eq!(lookup(&f, "MagpieData range Electronegativity"), 0.0);
        assert_eq!(lookup(&f, "MagpieData avg_dev AtomicWeight"), 0.0);
        assert_eq!(lookup(&f, "MagpieData mean Column"), 8.0);
    }
}
