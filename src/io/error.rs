use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse {format} {path_desc}: {details} (line {line_number})",
        path_desc = PathDisplay(path)
    )]
    Parse {
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: String,
    },

    #[error(
        "no atom records found in {path_desc}",
        path_desc = PathDisplay(path)
    )]
    EmptyCoordinates { path: Option<PathBuf> },

    #[error(
        "parameter file '{}' not found{hint}",
        name.display(),
        hint = SearchHint(data_dir)
    )]
    ParameterFileNotFound {
        name: PathBuf,
        data_dir: Option<PathBuf>,
    },

    #[error("atom {serial} has type {type_index}, which no parameter-file entry resolves")]
    UnresolvedType { serial: usize, type_index: u32 },

    #[error("atom type {type_index} exceeds the catalog capacity of {capacity} types")]
    CapacityExceeded { type_index: u32, capacity: u32 },
}

impl Error {
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }

    pub fn parse(
        format: &'static str,
        path: Option<PathBuf>,
        line_number: usize,
        details: impl Into<String>,
    ) -> Self {
        Self::Parse {
            format,
            path,
            line_number,
            details: details.into(),
        }
    }

    pub fn empty_coordinates(path: Option<PathBuf>) -> Self {
        Self::EmptyCoordinates { path }
    }

    /// Attaches a file path to errors that were raised while reading an anonymous stream.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        let path = Some(path.into());
        match self {
            Self::Io { source, .. } => Self::Io { path, source },
            Self::Parse {
                format,
                line_number,
                details,
                ..
            } => Self::Parse {
                format,
                path,
                line_number,
                details,
            },
            Self::EmptyCoordinates { .. } => Self::EmptyCoordinates { path },
            other => other,
        }
    }
}

struct PathDisplay<'a>(&'a Option<PathBuf>);

impl<'a> fmt::Display for PathDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}

struct SearchHint<'a>(&'a Option<PathBuf>);

impl<'a> fmt::Display for SearchHint<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(dir) => write!(f, " (also searched '{}')", dir.display()),
            None => write!(
                f,
                "; try setting the {} environment variable",
                super::locate::DATA_DIR_VAR
            ),
        }
    }
}
