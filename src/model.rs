use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::FlowGraph;
use crate::round;

/// Material id -> mass fraction of the product. Fractions are trusted as given.
pub type MaterialComposition = BTreeMap<String, f64>;

/// Structured product description handed over by the extraction step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDescription {
    pub materials: MaterialComposition,
    pub weight_kg: f64,
    /// Advisory; unknown categories use the table defaults.
    pub category: String,
}

impl ProductDescription {
    pub fn new<I, K>(materials: I, weight_kg: f64, category: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self {
            materials: materials.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            weight_kg,
            category: category.into(),
        }
    }
}

/// The five lifecycle phases, A through E.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    Extraction,
    Manufacturing,
    Transport,
    Use,
    EndOfLife,
}

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Extraction,
        Phase::Manufacturing,
        Phase::Transport,
        Phase::Use,
        Phase::EndOfLife,
    ];

    /// Stable flow-graph node id.
    pub fn node_id(self) -> &'static str {
        match self {
            Phase::Extraction => "extraction",
            Phase::Manufacturing => "manufacturing",
            Phase::Transport => "transport",
            Phase::Use => "use",
            Phase::EndOfLife => "eol",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Extraction => "Raw Material Extraction",
            Phase::Manufacturing => "Manufacturing",
            Phase::Transport => "Transportation",
            Phase::Use => "Use Phase",
            Phase::EndOfLife => "End of Life",
        }
    }
}

/// Signed per-phase totals, kg CO2e.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseTotals {
    #[serde(serialize_with = "round::serialize")]
    pub extraction: f64,
    #[serde(serialize_with = "round::serialize")]
    pub manufacturing: f64,
    #[serde(serialize_with = "round::serialize")]
    pub transport: f64,
    #[serde(rename = "use", serialize_with = "round::serialize")]
    pub use_phase: f64,
    #[serde(serialize_with = "round::serialize")]
    pub end_of_life: f64,
}

impl PhaseTotals {
    pub fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Extraction => self.extraction,
            Phase::Manufacturing => self.manufacturing,
            Phase::Transport => self.transport,
            Phase::Use => self.use_phase,
            Phase::EndOfLife => self.end_of_life,
        }
    }

    /// Phases in A..E order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, f64)> + '_ {
        Phase::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

/// Per-material line of the detail report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDetail {
    pub name: String,
    #[serde(serialize_with = "round::serialize")]
    pub fraction: f64,
    #[serde(serialize_with = "round::serialize")]
    pub weight_kg: f64,
    #[serde(rename = "impact_kg_co2e", serialize_with = "round::serialize")]
    pub impact: f64,
    #[serde(serialize_with = "round::serialize")]
    pub factor: f64,
}

/// Echo of the request, for consumers that persist the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(serialize_with = "round::serialize")]
    pub weight_kg: f64,
    pub category: String,
    pub scenario_requested: String,
}

/// Complete output of one engine run. Numbers are full precision in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LcaResult {
    pub phase_totals: PhaseTotals,
    #[serde(rename = "total_co2e_kg", serialize_with = "round::serialize")]
    pub total: f64,
    pub per_material: Vec<MaterialDetail>,
    /// Lets consumers recompute end of life for another scenario locally.
    #[serde(serialize_with = "round::serialize_map")]
    pub per_material_weights: BTreeMap<String, f64>,
    pub flow_graph: FlowGraph,
    pub scenario_used: String,
    pub summary: Summary,
}
