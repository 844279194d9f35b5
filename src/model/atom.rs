//! Per-atom record carried from coordinate decoding through to PDB serialization.
//!
//! A Tinker coordinate file has no residue or chain structure of its own, so every field
//! beyond the serial number, the raw type label, and the position is reconstructed by the
//! pipeline: names come from the atom-type catalog, residue numbers from the decoder's
//! scaffolding counter, and chain labels from backbone geometry.

use super::types::{Element, Name4, Point};
use smol_str::SmolStr;
use std::fmt;

/// One atom of the converted structure.
///
/// Residues are not separate objects; they are contiguous runs of atoms sharing chain,
/// residue number, and insertion code (see [`Structure::residue_spans`](super::structure::Structure::residue_spans)).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number copied from the coordinate file.
    pub serial: usize,
    /// Tinker atom label (e.g. `CT`, `HC`); informational only.
    pub raw_label: SmolStr,
    /// Atom name in PDB column form (e.g. `" CA "`); blank when the type was unresolved.
    pub name: Name4,
    /// Residue name in PDB column form (e.g. `"GLY "`).
    pub res_name: Name4,
    /// Chain label; empty until chains are assigned.
    pub chain_id: SmolStr,
    pub res_seq: i32,
    pub insertion_code: char,
    /// Cartesian coordinates measured in ångströms.
    pub pos: Point,
    /// Marks atoms belonging to ligands, ions, solvent, or capping groups.
    pub is_het: bool,
}

impl Atom {
    /// Creates an atom with blank names, no chain, and residue number zero.
    pub fn new(serial: usize, raw_label: &str, pos: Point) -> Self {
        Self {
            serial,
            raw_label: SmolStr::new(raw_label),
            name: Name4::BLANK,
            res_name: Name4::BLANK,
            chain_id: SmolStr::default(),
            res_seq: 0,
            insertion_code: ' ',
            pos,
            is_het: false,
        }
    }

    /// Computes the squared Euclidean distance to another atom in ångström squared units.
    pub fn distance_squared(&self, other: &Atom) -> f64 {
        nalgebra::distance_squared(&self.pos, &other.pos)
    }

    pub fn element(&self) -> Element {
        self.name.element()
    }

    /// True when the left-justified atom name starts with `H`.
    pub fn is_hydrogen(&self) -> bool {
        self.name.first_char() == 'H'
    }

    /// PDB record tag for this atom.
    pub fn record_type(&self) -> &'static str {
        if self.is_het { "HETATM" } else { "ATOM" }
    }

    /// Residue identity before chain assignment: number plus insertion code.
    pub fn residue_key(&self) -> (i32, char) {
        (self.res_seq, self.insertion_code)
    }

    /// True when both atoms belong to the same residue run.
    pub fn same_residue(&self, other: &Atom) -> bool {
        self.chain_id == other.chain_id && self.residue_key() == other.residue_key()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Atom {{ serial: {}, name: \"{}\", residue: \"{}\" {}{}, pos: [{:.3}, {:.3}, {:.3}] }}",
            self.serial,
            self.name,
            self.res_name,
            self.res_seq,
            self.insertion_code.to_string().trim(),
            self.pos.x,
            self.pos.y,
            self.pos.z
        )
    }
}
