//! Name normalization passes applied after decoding.
//!
//! Tinker types name chemically equivalent atoms identically (every β-hydrogen of a
//! residue is `HB`, both carboxylate oxygens of Asp are `OD`). These passes restore the
//! distinct PDB names. Each pass is a single left-to-right scan that only rewrites
//! [`Atom::name`]; ordering, residue membership, and
//! coordinates are never touched.

use crate::model::atom::Atom;
use crate::model::structure::Structure;
use crate::model::types::Name4;
use std::ops::Range;

/// Residues whose paired heavy atoms share one Tinker name, and the names to number.
const BRANCHED_ATOMS: &[(&[&str], &[&str])] = &[
    (&["ASP", "GLU"], &["OD", "OE"]),
    (&["TYR", "PHE"], &["CD", "CE"]),
    (&["ARG"], &["NH"]),
];

/// Number of names rewritten by each pass of [`normalize_names`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    pub hydrogens: usize,
    pub terminal_oxygens: usize,
    pub branched_atoms: usize,
    pub isoleucine_deltas: usize,
}

impl NormalizeSummary {
    pub fn total(&self) -> usize {
        self.hydrogens + self.terminal_oxygens + self.branched_atoms + self.isoleucine_deltas
    }
}

/// Runs the four normalization passes in their required order.
///
/// # Arguments
///
/// * `structure` - Decoded structure whose residue numbers still come from the decoder.
///
/// # Returns
///
/// A [`NormalizeSummary`] counting the renamed atoms per pass.
pub fn normalize_names(structure: &mut Structure) -> NormalizeSummary {
    let summary = NormalizeSummary {
        hydrogens: disambiguate_hydrogens(structure),
        terminal_oxygens: fix_terminal_oxygens(structure),
        branched_atoms: number_branched_atoms(structure),
        isoleucine_deltas: fix_isoleucine_delta(structure),
    };
    log::debug!(
        "normalized {} atom names ({} hydrogens, {} terminal oxygens, {} branched atoms, {} ILE CD)",
        summary.total(),
        summary.hydrogens,
        summary.terminal_oxygens,
        summary.branched_atoms,
        summary.isoleucine_deltas
    );
    summary
}

/// Gives numbered names to hydrogens that share a base name within one hydrogen run.
///
/// A run is a stretch of consecutive hydrogens inside one residue. Members of a run
/// with the same name form a group; the second member becomes `…2`, the third `…3`, and
/// so on. The first member keeps its bare name when the second member directly follows
/// it and becomes `…1` otherwise. Digits already in a name do not exempt it (the
/// N-terminal `H3` triple becomes `H3`, `H32`, `H33`); a name without a free column
/// stays as it is.
pub fn disambiguate_hydrogens(structure: &mut Structure) -> usize {
    let atoms = structure.atoms_mut();
    let mut renamed = 0;

    for run in hydrogen_runs(atoms) {
        let mut done = vec![false; run.len()];

        for offset in 0..run.len() {
            if done[offset] {
                continue;
            }
            let name = atoms[run.start + offset].name;
            let members: Vec<usize> = (offset..run.len())
                .filter(|&i| atoms[run.start + i].name == name)
                .collect();
            for &i in &members {
                done[i] = true;
            }

            if members.len() < 2 {
                continue;
            }

            for (k, &i) in members.iter().enumerate().skip(1) {
                if atoms[run.start + i].name.insert_digit(k as u32 + 1) {
                    renamed += 1;
                }
            }
            if members[1] != members[0] + 1 && atoms[run.start + members[0]].name.insert_digit(1)
            {
                renamed += 1;
            }
        }
    }

    renamed
}

fn hydrogen_runs(atoms: &[Atom]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut i = 0;
    while i < atoms.len() {
        if !atoms[i].is_hydrogen() {
            i += 1;
            continue;
        }
        let start = i;
        while i + 1 < atoms.len()
            && atoms[i + 1].is_hydrogen()
            && atoms[i + 1].same_residue(&atoms[start])
        {
            i += 1;
        }
        i += 1;
        runs.push(start..i);
    }
    runs
}

/// Renames the first `OXT` of each residue to the carbonyl oxygen `O`.
pub fn fix_terminal_oxygens(structure: &mut Structure) -> usize {
    let spans = structure.residue_spans();
    let atoms = structure.atoms_mut();
    let mut renamed = 0;

    for span in spans {
        if let Some(atom) = atoms[span].iter_mut().find(|a| a.name.is("OXT")) {
            atom.name = Name4::new(" O  ");
            renamed += 1;
        }
    }

    renamed
}

/// Numbers paired side-chain atoms in order of appearance: Asp/Glu `OD`/`OE`, Tyr/Phe
/// `CD`/`CE`, and Arg `NH` become `…1`, `…2`, ….
pub fn number_branched_atoms(structure: &mut Structure) -> usize {
    let spans = structure.residue_spans();
    let atoms = structure.atoms_mut();
    let mut renamed = 0;

    for span in spans {
        let residue = &mut atoms[span];
        let Some(first) = residue.first() else {
            continue;
        };
        let res_name = first.res_name;
        let Some((_, labels)) = BRANCHED_ATOMS
            .iter()
            .find(|(names, _)| names.iter().any(|n| res_name.is(n)))
        else {
            continue;
        };

        for label in labels.iter() {
            let mut count = 1;
            for atom in residue.iter_mut().filter(|a| a.name.is(label)) {
                if atom.name.insert_digit(count) {
                    renamed += 1;
                }
                count += 1;
            }
        }
    }

    renamed
}

/// Renames Ile `CD` to the PDB `CD1`.
pub fn fix_isoleucine_delta(structure: &mut Structure) -> usize {
    let mut renamed = 0;
    for atom in structure
        .iter_atoms_mut()
        .filter(|a| a.res_name.is("ILE") && a.name.is("CD"))
    {
        atom.name = Name4::new(" CD1");
        renamed += 1;
    }
    renamed
}
