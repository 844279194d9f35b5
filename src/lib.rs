//! # tinker-pdb
//!
//! **tinker-pdb** converts Tinker molecular-dynamics coordinate files (`.xyz`) into PDB
//! records. A Tinker file lists only serial numbers, coordinates, and numeric force-field
//! atom types; residue names, atom names, chains, and residue numbers are reconstructed
//! from the force-field parameter file and from backbone geometry.
//!
//! ## Pipeline
//!
//! 1. **Catalog** – `atom` records of the parameter file are resolved by an ordered
//!    first-match [`RuleSet`] into residue name, atom name, and hetero flag per type.
//! 2. **Decoding** – each coordinate line is named through the catalog; unknown types keep
//!    blank names unless [`TypePolicy::Strict`] is requested.
//! 3. **Normalization** – duplicated hydrogen names, terminal oxygens, paired side-chain
//!    atoms, and the isoleucine δ-carbon receive their PDB names.
//! 4. **Chains** – residue continuity is judged from C–N and CA–CA distances.
//! 5. **Renumbering** – residues are numbered densely from 1 within each chain.
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{BufReader, BufWriter};
//! use tinker_pdb::{ConvertConfig, convert, default_rules};
//!
//! let params = BufReader::new(File::open("amber99.prm")?);
//! let coords = BufReader::new(File::open("peptide.xyz")?);
//! let out = BufWriter::new(File::create("peptide.pdb")?);
//!
//! let conversion = convert(params, coords, out, default_rules(), &ConvertConfig::default())?;
//! println!("{}", conversion.structure);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod db;
mod model;

pub mod convert;
pub mod io;
pub mod ops;
pub mod typing;

pub use convert::{Conversion, ConversionReport, ConvertConfig, convert};
pub use db::{default_rules, load_rules, parse_rules};
pub use model::atom::Atom;
pub use model::catalog::{
    AtomTypeCatalog, AtomTypeEntry, CatalogConfig, RejectedType, Rejection, TypePolicy,
};
pub use model::structure::Structure;
pub use model::types::{Element, Name4, Point};
pub use typing::RuleSet;
