//! Material-name resolution for extractor output.
//!
//! Sits in front of the engine: raw names become canonical material ids
//! (or stay as-is and pick up the default factor), and fractions are
//! rescaled to sum to 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::factors::{FactorTables, DEFAULT_KEY};
use crate::model::{MaterialComposition, ProductDescription};

/// Minimum normalized Levenshtein similarity for a fuzzy match.
pub const FUZZY_SIMILARITY_FLOOR: f64 = 0.70;
/// Fractions are rescaled only when their sum is off by more than this.
pub const RENORMALIZE_TOLERANCE: f64 = 0.01;
/// Above this length ratio a name is also scored against windows of the longer one.
pub const PARTIAL_LENGTH_RATIO: f64 = 1.5;
const PARTIAL_SCALE: f64 = 0.9;
const LONG_PARTIAL_SCALE: f64 = 0.6;
/// Extracted weights are floored at 10 g.
pub const MIN_WEIGHT_KG: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Canonical(String),
    Alias { alias: String, canonical: String },
    Fuzzy { canonical: String, score: f64 },
    /// No match; the key is kept and the engine falls back to the default factor.
    Unresolved(String),
}

impl Resolution {
    pub fn material(&self) -> &str {
        match self {
            Resolution::Canonical(m) | Resolution::Unresolved(m) => m,
            Resolution::Alias { canonical, .. } | Resolution::Fuzzy { canonical, .. } => {
                canonical
            }
        }
    }

    pub fn into_material(self) -> String {
        match self {
            Resolution::Canonical(m) | Resolution::Unresolved(m) => m,
            Resolution::Alias { canonical, .. } | Resolution::Fuzzy { canonical, .. } => {
                canonical
            }
        }
    }
}

/// Maps one raw material name onto a material id.
pub trait MaterialResolver {
    fn resolve(&self, raw: &str) -> Resolution;
}

/// Lowercase, trim, spaces and hyphens to underscores.
pub fn canonical_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Normalized Levenshtein similarity in [0, 1].
///
/// When one name is more than 1.5x longer than the other, the shorter one is
/// also slid over the longer one and the best window counts, scaled by 0.9
/// (0.6 from a ratio of 8 up). `aluminum_alloy` vs `aluminum` scores 0.9.
pub fn similarity(a: &str, b: &str) -> f64 {
    let full = strsim::normalized_levenshtein(a, b);
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let (short, short_len, long, long_len) = if a_len <= b_len {
        (a, a_len, b, b_len)
    } else {
        (b, b_len, a, a_len)
    };
    if short_len == 0 {
        return full;
    }
    let ratio = long_len as f64 / short_len as f64;
    if ratio <= PARTIAL_LENGTH_RATIO {
        return full;
    }
    let scale = if ratio < 8.0 {
        PARTIAL_SCALE
    } else {
        LONG_PARTIAL_SCALE
    };

    let bounds: Vec<usize> = long
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(long.len()))
        .collect();
    let partial = bounds
        .windows(short_len + 1)
        .map(|w| strsim::normalized_levenshtein(short, &long[w[0]..w[short_len]]))
        .fold(0.0, f64::max);
    full.max(partial * scale)
}

/// Resolver over the factor tables: exact id, alias, then fuzzy match.
#[derive(Debug, Clone, Copy)]
pub struct CatalogResolver<'t> {
    tables: &'t FactorTables,
    similarity_floor: f64,
}

impl<'t> CatalogResolver<'t> {
    pub fn new(tables: &'t FactorTables) -> Self {
        Self {
            tables,
            similarity_floor: FUZZY_SIMILARITY_FLOOR,
        }
    }

    pub fn with_similarity_floor(mut self, floor: f64) -> Self {
        self.similarity_floor = floor;
        self
    }

    /// Best-scoring canonical id at or above the floor; earlier keys win ties.
    fn closest(&self, key: &str) -> Option<(&'t str, f64)> {
        let mut best: Option<(&'t str, f64)> = None;
        for candidate in self.tables.materials() {
            let score = similarity(key, candidate);
            if score < self.similarity_floor {
                continue;
            }
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((candidate, score));
            }
        }
        best
    }
}

impl MaterialResolver for CatalogResolver<'_> {
    fn resolve(&self, raw: &str) -> Resolution {
        let key = canonical_key(raw);
        if self.tables.is_known_material(&key) {
            return Resolution::Canonical(key);
        }
        if let Some(canonical) = self.tables.alias(&key) {
            return Resolution::Alias {
                canonical: canonical.to_string(),
                alias: key,
            };
        }
        match self.closest(&key) {
            Some((canonical, score)) => {
                info!(raw = %key, %canonical, score, "fuzzy matched material");
                Resolution::Fuzzy {
                    canonical: canonical.to_string(),
                    score,
                }
            }
            None => {
                warn!(raw = %key, "no match for material, default factor applies");
                Resolution::Unresolved(key)
            }
        }
    }
}

/// Resolves every name, merges duplicates and rescales fractions to sum to 1.
pub fn normalize_composition<R>(resolver: &R, raw: &BTreeMap<String, f64>) -> MaterialComposition
where
    R: MaterialResolver + ?Sized,
{
    let mut resolved = MaterialComposition::new();
    for (name, fraction) in raw {
        let material = resolver.resolve(name).into_material();
        *resolved.entry(material).or_insert(0.0) += fraction;
    }

    let total: f64 = resolved.values().sum();
    if total > 0.0 && (total - 1.0).abs() > RENORMALIZE_TOLERANCE {
        info!(total, "normalizing material fractions to 1.0");
        for fraction in resolved.values_mut() {
            *fraction /= total;
        }
    }
    resolved
}

fn default_weight() -> f64 {
    1.0
}

/// Product data as the extractor emits it, before any cleanup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub materials: BTreeMap<String, f64>,
    #[serde(default = "default_weight")]
    pub weight_kg: f64,
    #[serde(default)]
    pub category: String,
}

pub fn normalize_product<R>(resolver: &R, raw: &RawProduct) -> ProductDescription
where
    R: MaterialResolver + ?Sized,
{
    let category = raw.category.trim().to_lowercase();
    ProductDescription {
        materials: normalize_composition(resolver, &raw.materials),
        weight_kg: raw.weight_kg.max(MIN_WEIGHT_KG),
        category: if category.is_empty() {
            DEFAULT_KEY.to_string()
        } else {
            category
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn keys_are_canonicalized() {
        assert_eq!(canonical_key("  Stainless Steel "), "stainless_steel");
        assert_eq!(canonical_key("Li-Ion"), "li_ion");
    }

    #[test]
    fn resolution_layers() {
        let tables = FactorTables::builtin();
        let r = CatalogResolver::new(&tables);
        assert_eq!(r.resolve("Steel"), Resolution::Canonical("steel".into()));
        assert_eq!(
            r.resolve("Aluminium"),
            Resolution::Alias {
                alias: "aluminium".into(),
                canonical: "aluminum".into()
            }
        );
        match r.resolve("alumnum") {
            Resolution::Fuzzy { canonical, score } => {
                assert_eq!(canonical, "aluminum");
                assert!(score >= FUZZY_SIMILARITY_FLOOR);
            }
            other => panic!("expected fuzzy match, got {other:?}"),
        }
        assert_eq!(
            r.resolve("Mystery Goo"),
            Resolution::Unresolved("mystery_goo".into())
        );
    }

    #[test]
    fn partial_windows_score_compound_names() {
        assert!((similarity("aluminum_alloy", "aluminum") - 0.9).abs() < 1e-12);
        assert!((similarity("steel", "steel_frame") - 0.9).abs() < 1e-12);
        assert_eq!(similarity("alumnum", "aluminum"), 1.0 - 1.0 / 8.0);
        assert_eq!(similarity("", "steel"), 0.0);
    }

    #[test]
    fn compound_names_resolve_to_their_base_material() {
        let tables = FactorTables::builtin();
        let r = CatalogResolver::new(&tables);
        for (name, expected) in [
            ("aluminum alloy", "aluminum"),
            ("steel frame", "steel"),
            ("ABS plastic", "abs"),
            ("tempered glass", "glass"),
        ] {
            match r.resolve(name) {
                Resolution::Fuzzy { canonical, score } => {
                    assert_eq!(canonical, expected, "{name}");
                    assert!(score >= FUZZY_SIMILARITY_FLOOR);
                }
                other => panic!("{name}: expected fuzzy match, got {other:?}"),
            }
        }
        let out = normalize_composition(&r, &raw(&[("aluminum alloy", 1.0)]));
        assert_eq!(tables.material_factor(out.keys().next().unwrap()), 14.8);
    }

    #[test]
    fn raising_the_floor_disables_fuzzy_matches() {
        let tables = FactorTables::builtin();
        let r = CatalogResolver::new(&tables).with_similarity_floor(1.1);
        assert_eq!(r.resolve("alumnum").material(), "alumnum");
    }

    #[test]
    fn duplicates_merge_and_fractions_rescale() {
        let tables = FactorTables::builtin();
        let r = CatalogResolver::new(&tables);
        let out = normalize_composition(&r, &raw(&[("wood", 0.5), ("pine", 0.5), ("iron", 1.0)]));
        assert_eq!(out.len(), 2);
        assert!((out["softwood"] - 0.5).abs() < 1e-12);
        assert!((out["steel"] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn near_unit_sums_are_left_alone() {
        let tables = FactorTables::builtin();
        let r = CatalogResolver::new(&tables);
        let out = normalize_composition(&r, &raw(&[("steel", 0.6), ("abs", 0.395)]));
        assert_eq!(out["steel"], 0.6);
        assert_eq!(out["abs"], 0.395);
    }

    #[test]
    fn product_cleanup() {
        let tables = FactorTables::builtin();
        let r = CatalogResolver::new(&tables);
        let product: RawProduct =
            serde_json::from_str(r#"{ "materials": { "Cotton": 1.0 }, "weight_kg": 0.0 }"#).unwrap();
        let d = normalize_product(&r, &product);
        assert_eq!(d.weight_kg, MIN_WEIGHT_KG);
        assert_eq!(d.category, "default");
        assert_eq!(d.materials.keys().collect::<Vec<_>>(), ["cotton"]);

        let product = RawProduct {
            category: " Electronics ".into(),
            ..product
        };
        assert_eq!(normalize_product(&r, &product).category, "electronics");
    }

    struct Identity;

    impl MaterialResolver for Identity {
        fn resolve(&self, raw: &str) -> Resolution {
            Resolution::Unresolved(raw.to_string())
        }
    }

    #[test]
    fn resolver_is_pluggable() {
        let out = normalize_composition(&Identity, &raw(&[("Wood", 2.0)]));
        assert_eq!(out["Wood"], 1.0);
    }
}
