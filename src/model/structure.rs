use super::atom::Atom;
use std::fmt;
use std::ops::Range;

/// Ordered atom sequence produced by the coordinate decoder.
///
/// File order is preserved by every pipeline stage; passes rewrite names, chain labels,
/// and residue numbers in place but never reorder, insert, or drop atoms.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    /// Title text captured from the coordinate header.
    pub title: String,
    /// Periodic cell vectors when the coordinate file carried a box line.
    pub box_vectors: Option<[[f64; 3]; 3]>,
    atoms: Vec<Atom>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_atoms(atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            ..Self::default()
        }
    }

    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter_atoms(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    pub fn iter_atoms_mut(&mut self) -> std::slice::IterMut<'_, Atom> {
        self.atoms.iter_mut()
    }

    /// Splits the atom sequence into residue runs.
    ///
    /// A run ends as soon as the next atom differs in chain label, residue number, or
    /// insertion code, so a residue identity that reappears later forms a new run.
    pub fn residue_spans(&self) -> Vec<Range<usize>> {
        let mut spans = Vec::new();
        let mut start = 0;
        for i in 1..=self.atoms.len() {
            if i == self.atoms.len() || !self.atoms[i].same_residue(&self.atoms[start]) {
                spans.push(start..i);
                start = i;
            }
        }
        spans
    }

    pub fn residue_count(&self) -> usize {
        self.residue_spans().len()
    }

    /// Chain labels in order of first appearance.
    pub fn chain_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for atom in &self.atoms {
            if !ids.contains(&atom.chain_id.as_str()) {
                ids.push(atom.chain_id.as_str());
            }
        }
        ids
    }

    pub fn chain_count(&self) -> usize {
        self.chain_ids().len()
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Structure {{ chains: {}, residues: {}, atoms: {} }}",
            self.chain_count(),
            self.residue_count(),
            self.atom_count()
        )
    }
}
