//! Post-decoding passes that turn named atoms into a chain-annotated, renumbered
//! structure: name normalization, chain assignment, and residue renumbering.

mod chain;
mod error;
mod normalize;
mod renumber;

pub use chain::{
    CA_CA_CUTOFF_SQ, ChainConfig, ChainReport, ContinuityGap, PEPTIDE_BOND_CUTOFF_SQ,
    ResidueRef, assign_chains, chain_label,
};
pub use error::Error;
pub use normalize::{
    NormalizeSummary, disambiguate_hydrogens, fix_isoleucine_delta, fix_terminal_oxygens,
    normalize_names, number_branched_atoms,
};
pub use renumber::renumber_residues;
