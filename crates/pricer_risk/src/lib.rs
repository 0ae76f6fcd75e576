//! Risk metrics and model-risk aggregation.
//!
//! Builds on the engines: generic bump-and-reprice metrics, the parallel
//! model comparison runner with per-engine failure isolation, parameter
//! sensitivity sweeps, and CSV/JSON report export.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod comparison;
pub mod metrics;
pub mod report;
pub mod sweeps;

pub use comparison::ModelComparison;
pub use metrics::{effective_metrics, EffectiveMetrics, DEFAULT_BUMP};
pub use report::ReportError;
pub use sweeps::{SweepKind, SweepResult};
