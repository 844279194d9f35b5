//! The complete Tinker-to-PDB pipeline.
//!
//! Stages run strictly in order, each consuming the previous one's output in full:
//! catalog loading, coordinate decoding, name normalization, chain assignment, and
//! residue renumbering. Output is written only after every stage has succeeded.

use crate::io::{self, DecodeReport};
use crate::model::catalog::{AtomTypeCatalog, CatalogConfig, RejectedType};
use crate::model::structure::Structure;
use crate::ops::{self, ChainConfig, ChainReport, NormalizeSummary};
use crate::typing::{RuleError, RuleSet};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Ops(#[from] ops::Error),

    #[error(transparent)]
    Rules(#[from] RuleError),
}

impl Error {
    /// Names the file an input error came from.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Io(err) => Self::Io(err.with_path(path)),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertConfig {
    pub catalog: CatalogConfig,
    pub chains: ChainConfig,
}

/// Diagnostics gathered across all stages of one conversion.
#[derive(Debug, Clone, Default)]
pub struct ConversionReport {
    pub catalog_entries: usize,
    pub rejected_types: Vec<RejectedType>,
    pub decode: DecodeReport,
    pub normalized: NormalizeSummary,
    pub chains: ChainReport,
}

#[derive(Debug, Clone)]
pub struct Conversion {
    pub structure: Structure,
    pub report: ConversionReport,
}

/// Reads the parameter file into an atom-type catalog.
pub fn load_catalog<R: BufRead>(
    params: R,
    rules: &RuleSet,
    config: &CatalogConfig,
) -> Result<AtomTypeCatalog, Error> {
    let catalog = io::read_parameter_catalog(params, rules, config)?;
    log::debug!(
        "catalog holds {} atom types ({} rejected)",
        catalog.len(),
        catalog.rejected().len()
    );
    Ok(catalog)
}

/// Applies normalization, chain assignment, and renumbering to a decoded structure.
pub fn prepare_structure(
    structure: &mut Structure,
    chains: &ChainConfig,
) -> Result<(NormalizeSummary, ChainReport), Error> {
    let normalized = ops::normalize_names(structure);
    let chain_report = ops::assign_chains(structure, chains)?;
    ops::renumber_residues(structure);
    Ok((normalized, chain_report))
}

/// Decodes coordinates against an existing catalog and runs every post-decoding stage.
pub fn convert_coordinates<R: BufRead>(
    coords: R,
    catalog: &AtomTypeCatalog,
    config: &ConvertConfig,
) -> Result<Conversion, Error> {
    let (mut structure, decode) = io::read_xyz_structure(coords, catalog, config.catalog.policy)?;
    let (normalized, chains) = prepare_structure(&mut structure, &config.chains)?;

    Ok(Conversion {
        structure,
        report: ConversionReport {
            catalog_entries: catalog.len(),
            rejected_types: catalog.rejected().to_vec(),
            decode,
            normalized,
            chains,
        },
    })
}

/// Converts a Tinker coordinate file into PDB records.
///
/// # Arguments
///
/// * `params` - Tinker parameter file supplying the atom-type descriptions.
/// * `coords` - Tinker `.xyz` coordinate file.
/// * `out` - Destination for the PDB records.
/// * `rules` - Naming rules, usually [`default_rules`](crate::default_rules).
/// * `config` - Catalog policy and chain options.
///
/// # Errors
///
/// Any fatal input problem aborts the conversion before anything is written.
pub fn convert<P: BufRead, C: BufRead, W: Write>(
    params: P,
    coords: C,
    out: W,
    rules: &RuleSet,
    config: &ConvertConfig,
) -> Result<Conversion, Error> {
    let catalog = load_catalog(params, rules, &config.catalog)?;
    let conversion = convert_coordinates(coords, &catalog, config)?;
    io::write_pdb_structure(out, &conversion.structure)?;
    Ok(conversion)
}
