mod error;
mod locate;
mod pdb;
mod prm;
mod xyz;

pub use prm::reader::read as read_parameter_catalog;

pub use xyz::reader::{DecodeReport, read as read_xyz_structure};

pub use pdb::writer::write_structure as write_pdb_structure;

pub use locate::{DATA_DIR_VAR, locate_in, locate_parameter_file};

pub use error::Error;
