#![forbid(unsafe_code)]

//! Lifecycle greenhouse-gas assessment of a physical product.
//!
//! [`LcaEngine::compute`] turns a [`ProductDescription`] and a disposal
//! scenario name into five phase totals (extraction, manufacturing,
//! transport, use, end of life), a balance-verified grand total and a
//! hub-and-spoke flow graph. All coefficients come from an immutable
//! [`FactorTables`] passed in by the caller.

pub mod data;
pub mod engine;
pub mod error;
pub mod factors;
pub mod graph;
pub mod model;
pub mod normalize;
pub mod round;

pub use engine::{verify_balance, LcaEngine, BALANCE_TOLERANCE};
pub use error::LcaError;
pub use factors::{CategoryTable, DisposalScenario, FactorConfig, FactorTables};
pub use graph::{FlowEdge, FlowGraph, FlowNode, NodeKind, NEGLIGIBLE_FLOW};
pub use model::{
    LcaResult, MaterialComposition, MaterialDetail, Phase, PhaseTotals, ProductDescription,
    Summary,
};
pub use normalize::{CatalogResolver, MaterialResolver, RawProduct, Resolution};
