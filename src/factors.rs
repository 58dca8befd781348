use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data;
use crate::error::LcaError;

/// Fallback key in the category tables.
pub const DEFAULT_KEY: &str = "default";
/// Scenario used when a requested name is unknown.
pub const BASELINE_SCENARIO: &str = "baseline";

/// Scenario fractions must sum to 1 within this tolerance.
const SCENARIO_SUM_TOLERANCE: f64 = 1e-6;

fn owned_map(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

/// A named mixture of disposal methods, method -> fraction of product mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisposalScenario {
    mix: BTreeMap<String, f64>,
}

impl DisposalScenario {
    pub fn new<I, K>(mix: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            mix: mix.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            mix: owned_map(pairs),
        }
    }

    pub fn fraction(&self, method: &str) -> f64 {
        self.mix.get(method).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.mix.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Fractions must be finite, non-negative and sum to 1.
    fn validate(&self, name: &str) -> Result<(), LcaError> {
        let invalid = |reason: String| LcaError::InvalidScenario {
            name: name.to_string(),
            reason,
        };
        if self.mix.is_empty() {
            return Err(invalid("no disposal methods".into()));
        }
        for (method, fraction) in &self.mix {
            if !fraction.is_finite() || *fraction < 0.0 {
                return Err(invalid(format!("fraction for `{method}` is {fraction}")));
            }
        }
        let sum: f64 = self.mix.values().sum();
        if (sum - 1.0).abs() > SCENARIO_SUM_TOLERANCE {
            return Err(invalid(format!("fractions sum to {sum}, expected 1.0")));
        }
        Ok(())
    }
}

/// Category -> coefficient with a mandatory fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable {
    default: f64,
    entries: BTreeMap<String, f64>,
}

impl CategoryTable {
    pub fn new(default: f64, mut entries: BTreeMap<String, f64>) -> Self {
        entries.remove(DEFAULT_KEY);
        Self { default, entries }
    }

    /// Builds a table from a map that carries its fallback under `default`.
    pub fn from_map(kind: &'static str, mut map: BTreeMap<String, f64>) -> Result<Self, LcaError> {
        let default = map
            .remove(DEFAULT_KEY)
            .ok_or(LcaError::MissingDefault(kind))?;
        Ok(Self::new(default, map))
    }

    pub fn get(&self, category: &str) -> f64 {
        self.entries.get(category).copied().unwrap_or(self.default)
    }

    /// Known categories, `default` included.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .map(String::as_str)
            .chain(std::iter::once(DEFAULT_KEY))
    }
}

/// Serializable mirror of [`FactorTables`]; fields left out take the builtin values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorConfig {
    pub materials: BTreeMap<String, f64>,
    pub default_material_factor: f64,
    pub aliases: BTreeMap<String, String>,
    pub manufacturing: BTreeMap<String, f64>,
    pub use_phase: BTreeMap<String, f64>,
    pub transport_factor_per_1000km: f64,
    pub transport_distance_1000km: f64,
    pub product_lifetime_years: f64,
    pub eol_methods: BTreeMap<String, f64>,
    pub scenarios: BTreeMap<String, DisposalScenario>,
}

impl Default for FactorConfig {
    fn default() -> Self {
        let mut manufacturing = owned_map(data::MANUFACTURING_FACTORS);
        manufacturing.insert(DEFAULT_KEY.into(), data::DEFAULT_MANUFACTURING_FACTOR);
        let mut use_phase = owned_map(data::USE_PHASE_FACTORS);
        use_phase.insert(DEFAULT_KEY.into(), data::DEFAULT_USE_PHASE_FACTOR);

        Self {
            materials: owned_map(data::MATERIAL_FACTORS),
            default_material_factor: data::DEFAULT_MATERIAL_FACTOR,
            aliases: data::MATERIAL_ALIASES
                .iter()
                .map(|(a, c)| ((*a).to_string(), (*c).to_string()))
                .collect(),
            manufacturing,
            use_phase,
            transport_factor_per_1000km: data::TRANSPORT_FACTOR,
            transport_distance_1000km: data::DEFAULT_TRANSPORT_DISTANCE_KKM,
            product_lifetime_years: data::DEFAULT_PRODUCT_LIFETIME_YEARS,
            eol_methods: owned_map(data::EOL_METHOD_FACTORS),
            scenarios: data::EOL_SCENARIOS
                .iter()
                .map(|(name, mix)| ((*name).to_string(), DisposalScenario::from_pairs(mix)))
                .collect(),
        }
    }
}

/// Immutable emission factor tables, built once and shared by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorTables {
    materials: BTreeMap<String, f64>,
    default_material_factor: f64,
    aliases: BTreeMap<String, String>,
    manufacturing: CategoryTable,
    use_phase: CategoryTable,
    transport_factor_per_1000km: f64,
    transport_distance_1000km: f64,
    product_lifetime_years: f64,
    eol_methods: BTreeMap<String, f64>,
    scenarios: BTreeMap<String, DisposalScenario>,
    baseline: DisposalScenario,
}

impl Default for FactorTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<FactorConfig> for FactorTables {
    type Error = LcaError;

    fn try_from(cfg: FactorConfig) -> Result<Self, Self::Error> {
        let manufacturing = CategoryTable::from_map("manufacturing", cfg.manufacturing)?;
        let use_phase = CategoryTable::from_map("use-phase", cfg.use_phase)?;
        let baseline = cfg
            .scenarios
            .get(BASELINE_SCENARIO)
            .cloned()
            .ok_or(LcaError::MissingBaseline)?;

        let tables = Self {
            materials: cfg.materials,
            default_material_factor: cfg.default_material_factor,
            aliases: cfg.aliases,
            manufacturing,
            use_phase,
            transport_factor_per_1000km: cfg.transport_factor_per_1000km,
            transport_distance_1000km: cfg.transport_distance_1000km,
            product_lifetime_years: cfg.product_lifetime_years,
            eol_methods: cfg.eol_methods,
            scenarios: cfg.scenarios,
            baseline,
        };
        tables.validate()?;
        Ok(tables)
    }
}

impl FactorTables {
    /// Literature tables shipped with the crate.
    pub fn builtin() -> Self {
        let cfg = FactorConfig::default();
        Self {
            materials: cfg.materials,
            default_material_factor: cfg.default_material_factor,
            aliases: cfg.aliases,
            manufacturing: CategoryTable::new(data::DEFAULT_MANUFACTURING_FACTOR, cfg.manufacturing),
            use_phase: CategoryTable::new(data::DEFAULT_USE_PHASE_FACTOR, cfg.use_phase),
            transport_factor_per_1000km: cfg.transport_factor_per_1000km,
            transport_distance_1000km: cfg.transport_distance_1000km,
            product_lifetime_years: cfg.product_lifetime_years,
            eol_methods: cfg.eol_methods,
            scenarios: cfg.scenarios,
            baseline: DisposalScenario::from_pairs(data::BASELINE_MIX),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, LcaError> {
        let cfg: FactorConfig = serde_json::from_str(s)?;
        Self::try_from(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LcaError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Checks scenario mixtures against the disposal method table.
    pub fn validate(&self) -> Result<(), LcaError> {
        for (name, scenario) in &self.scenarios {
            scenario.validate(name)?;
            for (method, _) in scenario.iter() {
                self.eol_method_factor(method)?;
            }
        }
        Ok(())
    }

    pub fn material_factor(&self, material: &str) -> f64 {
        self.materials
            .get(material)
            .copied()
            .unwrap_or(self.default_material_factor)
    }

    pub fn is_known_material(&self, material: &str) -> bool {
        self.materials.contains_key(material)
    }

    pub fn materials(&self) -> impl Iterator<Item = &str> {
        self.materials.keys().map(String::as_str)
    }

    pub fn default_material_factor(&self) -> f64 {
        self.default_material_factor
    }

    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn manufacturing_factor(&self, category: &str) -> f64 {
        self.manufacturing.get(category)
    }

    pub fn use_phase_factor(&self, category: &str) -> f64 {
        self.use_phase.get(category)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.manufacturing.categories()
    }

    pub fn transport_factor_per_1000km(&self) -> f64 {
        self.transport_factor_per_1000km
    }

    pub fn transport_distance_1000km(&self) -> f64 {
        self.transport_distance_1000km
    }

    pub fn product_lifetime_years(&self) -> f64 {
        self.product_lifetime_years
    }

    /// Exact match only: a method without a coefficient is a configuration error.
    pub fn eol_method_factor(&self, method: &str) -> Result<f64, LcaError> {
        self.eol_methods
            .get(method)
            .copied()
            .ok_or_else(|| LcaError::UnknownEolMethod(method.to_string()))
    }

    /// Returns the scenario actually applied and its mixture, falling back to baseline.
    pub fn resolve_scenario<'a>(&'a self, name: &str) -> (&'a str, &'a DisposalScenario) {
        match self.scenarios.get_key_value(name) {
            Some((key, scenario)) => (key.as_str(), scenario),
            None => (BASELINE_SCENARIO, &self.baseline),
        }
    }

    pub fn scenario_names(&self) -> impl Iterator<Item = &str> {
        self.scenarios.keys().map(String::as_str)
    }

    /// Σ fraction_m × coefficient_m over the scenario's methods.
    pub fn blended_eol_factor(&self, scenario: &DisposalScenario) -> Result<f64, LcaError> {
        scenario.iter().try_fold(0.0, |acc, (method, fraction)| {
            Ok(acc + fraction * self.eol_method_factor(method)?)
        })
    }
}
