//! Resolution of the parameter-file argument against the Tinker data directory.

use super::error::Error;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming the directory that holds Tinker parameter files.
pub const DATA_DIR_VAR: &str = "TINKERDATA";

/// Finds a parameter file, falling back to the directory named by `TINKERDATA`.
pub fn locate_parameter_file(name: &Path) -> Result<PathBuf, Error> {
    let data_dir = env::var_os(DATA_DIR_VAR).map(PathBuf::from);
    locate_in(name, data_dir.as_deref())
}

/// Tries `name` as given, then inside `data_dir`. A name without an extension is also
/// tried with `.prm` appended.
pub fn locate_in(name: &Path, data_dir: Option<&Path>) -> Result<PathBuf, Error> {
    let mut candidates = vec![name.to_path_buf()];
    if name.extension().is_none() {
        candidates.push(name.with_extension("prm"));
    }

    if let Some(dir) = data_dir.filter(|_| name.is_relative()) {
        let in_dir: Vec<PathBuf> = candidates.iter().map(|c| dir.join(c)).collect();
        candidates.extend(in_dir);
    }

    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| Error::ParameterFileNotFound {
            name: name.to_path_buf(),
            data_dir: data_dir.map(Path::to_path_buf),
        })
}
