//! Core data structures for the converted structure.
//!
//! Atoms are kept in one ordered sequence; residues and chains are contiguous runs within
//! it rather than separate containers. The atom-type catalog that names each atom lives
//! here as well, since both the parameter reader and the coordinate decoder share it.

pub mod atom;
pub mod catalog;
pub mod structure;
pub mod types;
