//! Hub-and-spoke flow graph.
//!
//! Materials feed the extraction hub and every phase feeds the `total` sink
//! directly. Phases are never chained, so no node implies a running total.
//! Edge values are magnitudes; signs live in [`PhaseTotals`].

use serde::{Deserialize, Serialize};

use crate::model::{Phase, PhaseTotals};
use crate::round;

/// Flows at or below this magnitude get no edge.
pub const NEGLIGIBLE_FLOW: f64 = 0.001;

pub const TOTAL_NODE_ID: &str = "total";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Material,
    Extraction,
    Manufacturing,
    Transport,
    Use,
    Eol,
    Total,
}

impl From<Phase> for NodeKind {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Extraction => NodeKind::Extraction,
            Phase::Manufacturing => NodeKind::Manufacturing,
            Phase::Transport => NodeKind::Transport,
            Phase::Use => NodeKind::Use,
            Phase::EndOfLife => NodeKind::Eol,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    pub phase: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    /// Always >= 0.
    #[serde(serialize_with = "round::serialize")]
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
}

pub fn material_node_id(material: &str) -> String {
    format!("mat_{material}")
}

/// `recycled_aluminum` -> `Recycled Aluminum`.
pub fn material_label(material: &str) -> String {
    let mut label = String::with_capacity(material.len());
    let mut prev_alpha = false;
    for c in material.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_alpha {
                label.extend(c.to_lowercase());
            } else {
                label.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            label.push(c);
            prev_alpha = false;
        }
    }
    label
}

fn significant(value: f64) -> Option<f64> {
    let magnitude = value.abs();
    (magnitude > NEGLIGIBLE_FLOW).then_some(magnitude)
}

impl FlowGraph {
    /// Builds the graph from signed material impacts and phase totals.
    pub fn hub_and_spoke<'a, I>(material_impacts: I, phases: &PhaseTotals) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut graph = FlowGraph::default();
        let mut material_edges = Vec::new();

        for (material, impact) in material_impacts {
            let id = material_node_id(material);
            if let Some(value) = significant(impact) {
                material_edges.push(FlowEdge {
                    source: id.clone(),
                    target: Phase::Extraction.node_id().to_string(),
                    value,
                });
            }
            graph.nodes.push(FlowNode {
                id,
                label: material_label(material),
                phase: NodeKind::Material,
            });
        }

        for phase in Phase::ALL {
            graph.nodes.push(FlowNode {
                id: phase.node_id().to_string(),
                label: phase.label().to_string(),
                phase: phase.into(),
            });
        }
        graph.nodes.push(FlowNode {
            id: TOTAL_NODE_ID.to_string(),
            label: "Total CO2e".to_string(),
            phase: NodeKind::Total,
        });

        graph.edges = material_edges;
        for (phase, total) in phases.iter() {
            if let Some(value) = significant(total) {
                graph.edges.push(FlowEdge {
                    source: phase.node_id().to_string(),
                    target: TOTAL_NODE_ID.to_string(),
                    value,
                });
            }
        }
        graph
    }

    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&FlowEdge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phases() -> PhaseTotals {
        PhaseTotals {
            extraction: -3.0,
            manufacturing: 3.0,
            transport: 1.0,
            use_phase: 0.0005,
            end_of_life: -0.18,
        }
    }

    #[test]
    fn labels_are_title_cased() {
        assert_eq!(material_label("recycled_aluminum"), "Recycled Aluminum");
        assert_eq!(material_label("abs"), "Abs");
        assert_eq!(material_label("ABS"), "Abs");
        assert_eq!(material_label("carbon_fiber2x"), "Carbon Fiber2X");
    }

    #[test]
    fn every_phase_spokes_into_total() {
        let g = FlowGraph::hub_and_spoke([("softwood", -3.0)], &phases());
        assert_eq!(g.nodes.len(), 1 + 5 + 1);
        assert!(g.node("mat_softwood").is_some());
        assert!(g.node("total").is_some());
        for e in &g.edges {
            assert!(e.target == "extraction" || e.target == "total");
            assert!(e.source != "extraction" || e.target == "total");
        }
        assert!(g.edge("extraction", "manufacturing").is_none());
    }

    #[test]
    fn edge_values_are_magnitudes() {
        let g = FlowGraph::hub_and_spoke([("softwood", -3.0)], &phases());
        assert_eq!(g.edge("mat_softwood", "extraction").unwrap().value, 3.0);
        assert_eq!(g.edge("extraction", "total").unwrap().value, 3.0);
        assert_eq!(g.edge("eol", "total").unwrap().value, 0.18);
        assert!(g.edges.iter().all(|e| e.value >= 0.0));
    }

    #[test]
    fn negligible_flows_are_omitted() {
        let g = FlowGraph::hub_and_spoke([("steel", 2.0), ("tin", 0.001)], &phases());
        assert!(g.edge("mat_steel", "extraction").is_some());
        assert!(g.edge("mat_tin", "extraction").is_none());
        assert!(g.node("mat_tin").is_some());
        assert!(g.edge("use", "total").is_none());
        assert_eq!(g.edges.len(), 1 + 4);
    }
}
