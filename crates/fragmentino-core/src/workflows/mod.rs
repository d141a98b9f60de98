//! # Workflows Module
//!
//! High-level entry points that run a complete fragmentation pipeline.
//!
//! - **Fragmentation Workflow** ([`fragment`]) - Fragment a molecule, then optionally cap
//!   cut bonds, move the central fragment to the front and group fragments by size,
//!   reporting progress throughout.

pub mod fragment;
