//! # Engine Module
//!
//! The stateful part of the library: graph contraction and the fragmenter built on it.
//!
//! - **Graphs** ([`graph`]) - `WeightedGraph` and the size-bounded `ContractableGraph`
//!   over any [`graph::Mergeable`] payload
//! - **Fragmentation** ([`fragmenter`]) - `MolecularFragmenter`: contraction, bond
//!   capping, fragment reordering and output
//! - **Configuration** ([`config`]) - `FragmentationConfig` and its builder
//! - **Progress Monitoring** ([`progress`]) - Progress events and the callback reporter
//! - **Error Handling** ([`error`]) - `EngineError`

pub mod config;
pub mod error;
pub mod fragmenter;
pub mod graph;
pub mod progress;
