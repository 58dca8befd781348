use std::collections::BTreeMap;

use crate::error::LcaError;
use crate::factors::{DisposalScenario, FactorTables};
use crate::graph::FlowGraph;
use crate::model::{LcaResult, MaterialDetail, PhaseTotals, ProductDescription, Summary};

/// Absolute tolerance for the carbon balance identity.
pub const BALANCE_TOLERANCE: f64 = 1e-9;

/// Rebuilds the total from the stored phases and compares it with `total`.
///
/// NaN anywhere counts as a violation.
pub fn verify_balance(phases: &PhaseTotals, total: f64) -> Result<(), LcaError> {
    let reconstructed: f64 = phases.iter().map(|(_, v)| v).sum();
    let drift = (total - reconstructed).abs();
    if drift <= BALANCE_TOLERANCE {
        Ok(())
    } else {
        Err(LcaError::BalanceViolation {
            total,
            reconstructed,
        })
    }
}

/// Five-phase lifecycle model over a fixed set of factor tables.
///
/// Pure and synchronous: no logging, no I/O, no interior state.
#[derive(Debug, Clone, Copy)]
pub struct LcaEngine<'t> {
    tables: &'t FactorTables,
}

impl<'t> LcaEngine<'t> {
    pub fn new(tables: &'t FactorTables) -> Self {
        Self { tables }
    }

    pub fn compute(
        &self,
        description: &ProductDescription,
        scenario: &str,
    ) -> Result<LcaResult, LcaError> {
        let t = self.tables;
        let w = description.weight_kg;
        let category = description.category.as_str();

        // A: cradle-to-gate, per material.
        let mut per_material = Vec::with_capacity(description.materials.len());
        let mut per_material_weights = BTreeMap::new();
        for (name, &fraction) in &description.materials {
            let weight_kg = w * fraction;
            let factor = t.material_factor(name);
            per_material.push(MaterialDetail {
                name: name.clone(),
                fraction,
                weight_kg,
                impact: weight_kg * factor,
                factor,
            });
            per_material_weights.insert(name.clone(), weight_kg);
        }
        let extraction: f64 = per_material.iter().map(|m| m.impact).sum();

        // B..D: scalar, product-level.
        let manufacturing = w * t.manufacturing_factor(category);
        let transport = w * t.transport_factor_per_1000km() * t.transport_distance_1000km();
        let use_phase = w * t.use_phase_factor(category) * t.product_lifetime_years();

        // E: scenario blend over the summed material weight.
        let (scenario_used, mix) = t.resolve_scenario(scenario);
        let end_of_life = self.end_of_life_with(&per_material_weights, mix)?;

        let phase_totals = PhaseTotals {
            extraction,
            manufacturing,
            transport,
            use_phase,
            end_of_life,
        };
        let total = extraction + manufacturing + transport + use_phase + end_of_life;
        verify_balance(&phase_totals, total)?;

        let flow_graph = FlowGraph::hub_and_spoke(
            per_material.iter().map(|m| (m.name.as_str(), m.impact)),
            &phase_totals,
        );

        Ok(LcaResult {
            phase_totals,
            total,
            per_material,
            per_material_weights,
            flow_graph,
            scenario_used: scenario_used.to_string(),
            summary: Summary {
                weight_kg: w,
                category: description.category.clone(),
                scenario_requested: scenario.to_string(),
            },
        })
    }

    /// Phase E for `scenario` from per-material weights alone.
    pub fn end_of_life(
        &self,
        weights: &BTreeMap<String, f64>,
        scenario: &str,
    ) -> Result<f64, LcaError> {
        let (_, mix) = self.tables.resolve_scenario(scenario);
        self.end_of_life_with(weights, mix)
    }

    /// Phase E under every configured scenario, keyed by scenario name.
    pub fn compare_scenarios(
        &self,
        weights: &BTreeMap<String, f64>,
    ) -> Result<BTreeMap<String, f64>, LcaError> {
        self.tables
            .scenario_names()
            .map(|name| Ok((name.to_string(), self.end_of_life(weights, name)?)))
            .collect()
    }

    fn end_of_life_with(
        &self,
        weights: &BTreeMap<String, f64>,
        mix: &DisposalScenario,
    ) -> Result<f64, LcaError> {
        let blended = self.tables.blended_eol_factor(mix)?;
        let total_weight: f64 = weights.values().sum();
        Ok(total_weight * blended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::{FactorConfig, DEFAULT_KEY};
    use crate::model::Phase;

    fn steel() -> ProductDescription {
        ProductDescription::new([("steel", 1.0)], 1.0, DEFAULT_KEY)
    }

    #[test]
    fn steel_baseline_phases() {
        let tables = FactorTables::builtin();
        let r = LcaEngine::new(&tables).compute(&steel(), "baseline").unwrap();
        let p = r.phase_totals;
        assert!((p.extraction - 2.0).abs() < 1e-9);
        assert!((p.manufacturing - tables.manufacturing_factor("default")).abs() < 1e-9);
        assert!((p.transport - 0.5).abs() < 1e-9);
        assert!((p.use_phase - 0.5).abs() < 1e-9);
        assert!((p.end_of_life - 0.44).abs() < 1e-9);
        assert!((r.total - 4.94).abs() < 1e-9);
        assert_eq!(r.scenario_used, "baseline");
    }

    #[test]
    fn unknown_material_and_category_use_defaults() {
        let tables = FactorTables::builtin();
        let d = ProductDescription::new([("moon_rock", 1.0)], 2.0, "spacecraft");
        let r = LcaEngine::new(&tables).compute(&d, "baseline").unwrap();
        assert_eq!(r.per_material[0].factor, tables.default_material_factor());
        assert_eq!(tables.default_material_factor(), 3.0);
        assert!((r.phase_totals.extraction - 6.0).abs() < 1e-9);
        assert!((r.phase_totals.manufacturing - 3.0).abs() < 1e-9);
        assert!((r.phase_totals.use_phase - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_scenario_falls_back_to_baseline() {
        let tables = FactorTables::builtin();
        let engine = LcaEngine::new(&tables);
        let fallback = engine.compute(&steel(), "zero_waste_utopia").unwrap();
        let baseline = engine.compute(&steel(), "baseline").unwrap();
        assert_eq!(fallback.scenario_used, "baseline");
        assert_eq!(fallback.summary.scenario_requested, "zero_waste_utopia");
        assert_eq!(fallback.phase_totals, baseline.phase_totals);
    }

    #[test]
    fn end_of_life_uses_summed_material_weight() {
        let tables = FactorTables::builtin();
        // Fractions deliberately sum to 0.5.
        let d = ProductDescription::new([("steel", 0.25), ("glass", 0.25)], 4.0, "kitchen");
        let r = LcaEngine::new(&tables).compute(&d, "worst_case").unwrap();
        assert!((r.phase_totals.end_of_life - 2.0 * 0.6).abs() < 1e-9);
        assert!((r.phase_totals.transport - 4.0 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn recomputed_end_of_life_matches_engine() {
        let tables = FactorTables::builtin();
        let engine = LcaEngine::new(&tables);
        let d = ProductDescription::new([("aluminum", 0.7), ("abs", 0.3)], 3.0, "electronics");
        for scenario in ["baseline", "best_case", "worst_case"] {
            let r = engine.compute(&d, scenario).unwrap();
            let eol = engine.end_of_life(&r.per_material_weights, scenario).unwrap();
            assert!((eol - r.phase_totals.end_of_life).abs() < 1e-12);
        }
    }

    #[test]
    fn scenarios_are_ordered_by_recycling_share() {
        let tables = FactorTables::builtin();
        let engine = LcaEngine::new(&tables);
        let weights = BTreeMap::from([("cotton".to_string(), 0.8), ("pet".to_string(), 0.2)]);
        let eol = engine.compare_scenarios(&weights).unwrap();
        assert_eq!(eol.len(), 3);
        assert!(eol["best_case"] <= eol["baseline"]);
        assert!(eol["baseline"] <= eol["worst_case"]);
        assert!(eol["best_case"] < 0.0);
    }

    #[test]
    fn balance_check_rejects_drift() {
        let phases = PhaseTotals {
            extraction: 1.0,
            manufacturing: 1.0,
            transport: 1.0,
            use_phase: 1.0,
            end_of_life: 1.0,
        };
        assert!(verify_balance(&phases, 5.0).is_ok());
        assert!(matches!(
            verify_balance(&phases, 5.000001),
            Err(LcaError::BalanceViolation { .. })
        ));
        assert!(verify_balance(&phases, f64::NAN).is_err());
    }

    #[test]
    fn balance_holds_for_every_category_and_scenario() {
        let tables = FactorTables::builtin();
        let engine = LcaEngine::new(&tables);
        let d = ProductDescription::new(
            [("softwood", 0.4), ("steel", 0.35), ("nylon", 0.2), ("mystery", 0.05)],
            7.3,
            "",
        );
        let categories: Vec<String> = tables.categories().map(str::to_string).collect();
        for category in categories {
            for scenario in ["baseline", "best_case", "worst_case", "nope"] {
                let d = ProductDescription {
                    category: category.clone(),
                    ..d.clone()
                };
                let r = engine.compute(&d, scenario).unwrap();
                let sum: f64 = Phase::ALL.iter().map(|p| r.phase_totals.get(*p)).sum();
                assert!((r.total - sum).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn scenario_without_method_coefficient_is_fatal() {
        let tables = FactorTables::builtin();
        let mut cfg = FactorConfig::default();
        cfg.eol_methods.remove("incineration");
        assert!(FactorTables::try_from(cfg).is_err());

        // A mixture that never went through validation.
        let broken = DisposalScenario::new([("landfill", 0.5), ("pyrolysis", 0.5)]);
        let engine = LcaEngine::new(&tables);
        let weights = BTreeMap::from([("steel".to_string(), 1.0)]);
        assert!(matches!(
            engine.end_of_life_with(&weights, &broken),
            Err(LcaError::UnknownEolMethod(m)) if m == "pyrolysis"
        ));
    }
}
