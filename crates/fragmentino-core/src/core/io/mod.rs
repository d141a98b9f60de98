//! Provides input/output functionality for molecular file formats.
//!
//! Coordinate files are read and written through the [`traits::MolecularFile`] trait;
//! [`xyz`] is the supported format. [`summary`] writes per-fragment CSV reports.

pub mod summary;
pub mod traits;
pub mod xyz;
