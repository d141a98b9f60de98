//! # fragmentino
//!
//! Size-bounded fragmentation of molecular structures.
//!
//! A molecule is turned into a graph with one vertex per atom and one edge per covalent
//! bond, weighted by bond length. Edges are then contracted greedily, shortest first,
//! as long as the merged vertex stays within a maximum atom count. Bonds that survive
//! contraction cross fragment boundaries and can be capped with hydrogen atoms.
//!
//! ## Layers
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Molecule`, `Element`), bond
//!   detection, geometry helpers and file I/O.
//!
//! - **[`engine`]: The Logic Core.** The generic contractable graph, the stateful
//!   `MolecularFragmenter`, configuration, errors and progress reporting.
//!
//! - **[`workflows`]: The Public API.** One-call pipelines that tie `core` and `engine`
//!   together.

pub mod core;
pub mod engine;
pub mod workflows;
