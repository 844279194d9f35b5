//! Chain assignment from backbone geometry.
//!
//! Tinker coordinates carry no chain field, so chains are inferred residue by residue:
//! a residue continues the previous chain when its backbone is bonded (or at least
//! close) to the previous residue's backbone. Labels come from the caller first and are
//! generated (`A`…`Z`, `a`…`z`, `1`…`9`, `0`, `62`, `63`, …) once those run out.

use crate::model::atom::Atom;
use crate::model::structure::Structure;
use crate::model::types::{Name4, Point};
use crate::ops::error::Error;
use smol_str::SmolStr;
use std::fmt;

/// Squared C(i-1)–N(i) distance above which two residues are not peptide-bonded (Å²).
pub const PEPTIDE_BOND_CUTOFF_SQ: f64 = 3.5;
/// Squared CA(i-1)–CA(i) distance above which two residues are not consecutive (Å²).
pub const CA_CA_CUTOFF_SQ: f64 = 16.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainConfig {
    /// Labels used for the first, second, … chain before generated labels take over.
    pub labels: Vec<String>,
    /// Start a new chain when a polymer residue follows a hetero residue and continuity
    /// cannot be decided from the backbone.
    pub bump_on_het: bool,
}

/// Identity of one residue as shown in diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueRef {
    pub res_name: Name4,
    pub chain_id: SmolStr,
    pub res_seq: i32,
    pub insertion_code: char,
}

impl ResidueRef {
    fn of(atom: &Atom) -> Self {
        Self {
            res_name: atom.res_name,
            chain_id: atom.chain_id.clone(),
            res_seq: atom.res_seq,
            insertion_code: atom.insertion_code,
        }
    }
}

impl fmt::Display for ResidueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}.{}{}",
            self.res_name.trimmed(),
            self.chain_id,
            self.res_seq,
            self.insertion_code.to_string().trim()
        )
    }
}

/// Two consecutive polymer residues whose continuity could not be tested because
/// backbone atoms are missing. They are kept in the same chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuityGap {
    /// The residue or residues lacking backbone atoms.
    pub residues: Vec<ResidueRef>,
    /// Backbone atoms whose absence prevented the test (`CA`, `N`, `C`).
    pub missing_atoms: Vec<&'static str>,
}

impl fmt::Display for ContinuityGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let residues: Vec<String> = self.residues.iter().map(ToString::to_string).collect();
        write!(
            f,
            "atoms missing in {} {}: {}",
            if self.residues.len() > 1 { "residues" } else { "residue" },
            residues.join(" and "),
            self.missing_atoms.join(" ")
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainReport {
    /// Labels of the chains, in order.
    pub labels: Vec<SmolStr>,
    pub gaps: Vec<ContinuityGap>,
}

impl ChainReport {
    pub fn chain_count(&self) -> usize {
        self.labels.len()
    }
}

/// Returns the generated label for the zero-based chain number `n`.
pub fn chain_label(n: usize) -> SmolStr {
    match n {
        0..26 => SmolStr::new(char::from(b'A' + n as u8).to_string()),
        26..52 => SmolStr::new(char::from(b'a' + (n - 26) as u8).to_string()),
        52..61 => SmolStr::new((n - 51).to_string()),
        61 => SmolStr::new_static("0"),
        _ => SmolStr::new(n.to_string()),
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Backbone {
    n: Option<Point>,
    ca: Option<Point>,
    c: Option<Point>,
}

impl Backbone {
    fn of(residue: &[Atom]) -> Self {
        let find = |label: &str| {
            residue
                .iter()
                .rfind(|atom| atom.name.is(label))
                .map(|atom| atom.pos)
        };
        Self {
            n: find("N"),
            ca: find("CA"),
            c: find("C"),
        }
    }
}

enum Continuity {
    Continuous,
    Break,
    Unknown,
}

fn continuity(prev: &Backbone, current: &Backbone) -> Continuity {
    let split_if = |far: bool| {
        if far {
            Continuity::Break
        } else {
            Continuity::Continuous
        }
    };

    match (prev.c, current.n, prev.ca, current.ca) {
        (Some(c), Some(n), _, _) => {
            split_if(nalgebra::distance_squared(&c, &n) > PEPTIDE_BOND_CUTOFF_SQ)
        }
        (_, _, Some(ca_prev), Some(ca)) => {
            split_if(nalgebra::distance_squared(&ca_prev, &ca) > CA_CA_CUTOFF_SQ)
        }
        _ => Continuity::Unknown,
    }
}

/// Assigns a chain label to every atom.
///
/// Residues are the contiguous runs reported by [`Structure::residue_spans`]. For each
/// residue after the first, continuity with its predecessor is decided by, in order:
///
/// 1. the C(i-1)–N(i) distance when both atoms exist,
/// 2. otherwise the CA(i-1)–CA(i) distance when both atoms exist,
/// 3. otherwise no break. Between two polymer residues a [`ContinuityGap`] is logged
///    and reported; with [`ChainConfig::bump_on_het`] a polymer residue that follows a
///    hetero residue starts a new chain.
///
/// # Errors
///
/// Returns [`Error::InvalidChainLabel`] if a configured label is empty or contains
/// whitespace.
pub fn assign_chains(structure: &mut Structure, config: &ChainConfig) -> Result<ChainReport, Error> {
    for label in &config.labels {
        if label.is_empty() {
            return Err(Error::invalid_chain_label(label, "label is empty"));
        }
        if label.chars().any(char::is_whitespace) {
            return Err(Error::invalid_chain_label(label, "label contains whitespace"));
        }
    }

    let mut report = ChainReport::default();
    let spans = structure.residue_spans();
    if spans.is_empty() {
        return Ok(report);
    }

    let atoms = structure.atoms_mut();
    let mut explicit = config.labels.iter().map(SmolStr::new);
    let mut chain_num = 0;
    let mut label = explicit.next().unwrap_or_else(|| chain_label(0));
    announce_label(&label);
    report.labels.push(label.clone());

    let mut prev: Option<(Backbone, usize)> = None;

    for span in spans {
        let start = span.start;
        let backbone = Backbone::of(&atoms[span.clone()]);

        if let Some((prev_backbone, prev_start)) = prev {
            let new_chain = match continuity(&prev_backbone, &backbone) {
                Continuity::Continuous => false,
                Continuity::Break => true,
                Continuity::Unknown => {
                    let prev_het = atoms[prev_start].is_het;
                    let het = atoms[start].is_het;

                    if !prev_het && !het {
                        let gap = describe_gap(
                            &prev_backbone,
                            &backbone,
                            &atoms[prev_start],
                            &atoms[start],
                            &label,
                        );
                        log::warn!("{}; keeping chain {}", gap, label);
                        report.gaps.push(gap);
                    }

                    config.bump_on_het && prev_het && !het
                }
            };

            if new_chain {
                chain_num += 1;
                label = explicit.next().unwrap_or_else(|| chain_label(chain_num));
                log::debug!(
                    "chain {} starts at {}",
                    label,
                    ResidueRef::of(&atoms[start])
                );
                announce_label(&label);
                report.labels.push(label.clone());
            }
        }

        for atom in &mut atoms[span] {
            atom.chain_id = label.clone();
        }
        prev = Some((backbone, start));
    }

    Ok(report)
}

fn announce_label(label: &str) {
    if label.chars().count() > 1 {
        log::warn!(
            "chain label '{}' is wider than the PDB chain column and is written as '{}'",
            label,
            label.chars().next().unwrap_or(' ')
        );
    }
}

fn describe_gap(
    prev: &Backbone,
    current: &Backbone,
    prev_atom: &Atom,
    current_atom: &Atom,
    label: &SmolStr,
) -> ContinuityGap {
    let prev_incomplete = prev.c.is_none() || prev.ca.is_none();
    let current_incomplete = current.n.is_none() || current.ca.is_none();

    let previous = ResidueRef::of(prev_atom);
    let mut current_ref = ResidueRef::of(current_atom);
    current_ref.chain_id = label.clone();

    let residues = match (prev_incomplete, current_incomplete) {
        (true, true) => vec![previous, current_ref],
        (true, false) => vec![previous],
        _ => vec![current_ref],
    };

    let mut missing_atoms = Vec::new();
    if prev.ca.is_none() || current.ca.is_none() {
        missing_atoms.push("CA");
    }
    if current.n.is_none() {
        missing_atoms.push("N");
    }
    if prev.c.is_none() {
        missing_atoms.push("C");
    }

    ContinuityGap {
        residues,
        missing_atoms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Builder {
        atoms: Vec<Atom>,
    }

    impl Builder {
        fn new() -> Self {
            Self { atoms: Vec::new() }
        }

        fn residue(mut self, res: &str, seq: i32, het: bool, atoms: &[(&str, [f64; 3])]) -> Self {
            for (name, [x, y, z]) in atoms {
                let mut atom = Atom::new(self.atoms.len() + 1, "XX", Point::new(*x, *y, *z));
                atom.name = Name4::new(name);
                atom.res_name = Name4::new(res);
                atom.res_seq = seq;
                atom.is_het = het;
                self.atoms.push(atom);
            }
            self
        }

        fn build(self) -> Structure {
            Structure::with_atoms(self.atoms)
        }
    }

    fn backbone(offset: f64) -> [(&'static str, [f64; 3]); 3] {
        [
            (" N  ", [offset, 0.0, 0.0]),
            (" CA ", [offset + 1.45, 0.0, 0.0]),
            (" C  ", [offset + 2.5, 0.9, 0.0]),
        ]
    }

    fn chain_ids(structure: &Structure) -> Vec<String> {
        structure
            .residue_spans()
            .into_iter()
            .map(|span| structure.atoms()[span.start].chain_id.to_string())
            .collect()
    }

    #[test]
    fn chain_label_follows_the_generated_sequence() {
        assert_eq!(chain_label(0), "A");
        assert_eq!(chain_label(25), "Z");
        assert_eq!(chain_label(26), "a");
        assert_eq!(chain_label(51), "z");
        assert_eq!(chain_label(52), "1");
        assert_eq!(chain_label(60), "9");
        assert_eq!(chain_label(61), "0");
        assert_eq!(chain_label(62), "62");
        assert_eq!(chain_label(100), "100");
    }

    #[test]
    fn bonded_residues_share_a_chain() {
        // C at x=2.5,y=0.9; next N at x=3.8 gives a C-N distance of about 1.58 Å.
        let mut s = Builder::new()
            .residue("GLY ", 1, false, &backbone(0.0))
            .residue("GLY ", 2, false, &backbone(3.8))
            .build();
        let report = assign_chains(&mut s, &ChainConfig::default()).unwrap();

        assert_eq!(chain_ids(&s), vec!["A", "A"]);
        assert_eq!(report.chain_count(), 1);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn long_peptide_bond_starts_a_new_chain() {
        let mut s = Builder::new()
            .residue("GLY ", 1, false, &backbone(0.0))
            .residue("GLY ", 2, false, &backbone(20.0))
            .residue("GLY ", 3, false, &backbone(23.8))
            .build();
        let report = assign_chains(&mut s, &ChainConfig::default()).unwrap();

        assert_eq!(chain_ids(&s), vec!["A", "B", "B"]);
        assert_eq!(report.labels, vec![SmolStr::new("A"), SmolStr::new("B")]);
    }

    #[test]
    fn ca_only_residues_use_the_looser_cutoff() {
        let mut s = Builder::new()
            .residue("ALA ", 1, false, &[(" CA ", [0.0, 0.0, 0.0])])
            .residue("ALA ", 2, false, &[(" CA ", [3.8, 0.0, 0.0])])
            .residue("ALA ", 3, false, &[(" CA ", [8.0, 0.0, 0.0])])
            .build();
        let report = assign_chains(&mut s, &ChainConfig::default()).unwrap();

        // 3.8² = 14.44 stays, 4.2² = 17.64 breaks.
        assert_eq!(chain_ids(&s), vec!["A", "A", "B"]);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn peptide_bond_test_takes_priority_over_ca_distance() {
        let mut s = Builder::new()
            .residue(
                "GLY ",
                1,
                false,
                &[(" CA ", [0.0, 0.0, 0.0]), (" C  ", [1.0, 0.0, 0.0])],
            )
            .residue(
                "GLY ",
                2,
                false,
                &[(" N  ", [3.5, 0.0, 0.0]), (" CA ", [3.0, 0.0, 0.0])],
            )
            .build();
        assign_chains(&mut s, &ChainConfig::default()).unwrap();

        assert_eq!(chain_ids(&s), vec!["A", "B"]);
    }

    #[test]
    fn missing_backbone_warns_but_keeps_the_chain() {
        let mut s = Builder::new()
            .residue("GLY ", 1, false, &backbone(0.0))
            .residue("UNK ", 2, false, &[(" CB ", [50.0, 0.0, 0.0])])
            .build();
        let report = assign_chains(&mut s, &ChainConfig::default()).unwrap();

        assert_eq!(chain_ids(&s), vec!["A", "A"]);
        assert_eq!(report.gaps.len(), 1);
        let gap = &report.gaps[0];
        assert_eq!(gap.residues.len(), 1);
        assert_eq!(gap.residues[0].res_seq, 2);
        assert_eq!(gap.missing_atoms, vec!["CA", "N"]);
        assert_eq!(gap.to_string(), "atoms missing in residue UNK A.2: CA N");
    }

    #[test]
    fn gap_names_both_residues_when_both_lack_backbone() {
        let mut s = Builder::new()
            .residue("UNK ", 1, false, &[(" CB ", [0.0, 0.0, 0.0])])
            .residue("UNK ", 2, false, &[(" CB ", [5.0, 0.0, 0.0])])
            .build();
        let report = assign_chains(&mut s, &ChainConfig::default()).unwrap();

        assert_eq!(
            report.gaps[0].to_string(),
            "atoms missing in residues UNK A.1 and UNK A.2: CA N C"
        );
    }

    #[test]
    fn hetero_neighbours_are_not_reported() {
        let mut s = Builder::new()
            .residue("GLY ", 1, false, &backbone(0.0))
            .residue("HOH ", 2, true, &[(" O  ", [40.0, 0.0, 0.0])])
            .residue("HOH ", 3, true, &[(" O  ", [45.0, 0.0, 0.0])])
            .build();
        let report = assign_chains(&mut s, &ChainConfig::default()).unwrap();

        assert_eq!(chain_ids(&s), vec!["A", "A", "A"]);
        assert!(report.gaps.is_empty());
    }

    #[test]
    fn bump_on_het_splits_polymer_after_hetero_residue() {
        let build = || {
            Builder::new()
                .residue("HOH ", 1, true, &[(" O  ", [40.0, 0.0, 0.0])])
                .residue("GLY ", 2, false, &backbone(0.0))
                .build()
        };

        let mut plain = build();
        assign_chains(&mut plain, &ChainConfig::default()).unwrap();
        assert_eq!(chain_ids(&plain), vec!["A", "A"]);

        let mut bumped = build();
        let config = ChainConfig {
            bump_on_het: true,
            ..ChainConfig::default()
        };
        assign_chains(&mut bumped, &config).unwrap();
        assert_eq!(chain_ids(&bumped), vec!["A", "B"]);
    }

    #[test]
    fn explicit_labels_are_used_before_generated_ones() {
        let mut s = Builder::new()
            .residue("GLY ", 1, false, &backbone(0.0))
            .residue("GLY ", 2, false, &backbone(20.0))
            .residue("GLY ", 3, false, &backbone(40.0))
            .build();
        let config = ChainConfig {
            labels: vec!["H".into(), "L".into()],
            bump_on_het: false,
        };
        assign_chains(&mut s, &config).unwrap();

        // The generated label is picked by chain number, not by labels consumed.
        assert_eq!(chain_ids(&s), vec!["H", "L", "C"]);
    }

    #[test]
    fn invalid_labels_are_rejected() {
        let mut s = Builder::new()
            .residue("GLY ", 1, false, &backbone(0.0))
            .build();
        for bad in ["", "A B"] {
            let config = ChainConfig {
                labels: vec![bad.into()],
                bump_on_het: false,
            };
            assert!(matches!(
                assign_chains(&mut s, &config),
                Err(Error::InvalidChainLabel { .. })
            ));
        }
    }

    #[test]
    fn empty_structure_has_no_chains() {
        let mut s = Structure::new();
        let report = assign_chains(&mut s, &ChainConfig::default()).unwrap();
        assert_eq!(report.chain_count(), 0);
    }
}
