use std::fs::File;
use std::io::{self as stdio, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

use tinker_pdb::Structure;
use tinker_pdb::io::{locate_parameter_file, write_pdb_structure};

pub mod summary;

/// Resolves the parameter-file argument, consulting `TINKERDATA` when needed.
pub fn locate_params(name: &Path) -> Result<PathBuf> {
    locate_parameter_file(name).context("Unable to open the Tinker parameter file")
}

pub fn open_file(path: &Path) -> Result<BufReader<File>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Opens the coordinate input: the given file, or stdin when it is not a terminal.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => Ok(Box::new(open_file(path)?)),
        None => {
            let stdin = stdio::stdin();
            if stdin.is_terminal() {
                bail!(
                    "No INPUT provided and stdin is a TTY. Name an XYZ file or pipe one into tinkerpdb."
                );
            }
            Ok(Box::new(BufReader::new(stdin.lock())))
        }
    }
}

pub fn describe_source(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "stdin".to_string(),
    }
}

/// Writes the structure as PDB to the given file or to stdout.
pub fn save_output(structure: &Structure, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_pdb_structure(&mut writer, structure)
                .with_context(|| format!("Failed to write PDB output to {}", path.display()))?;
            writer.flush().context("Failed to flush output writer")?;
        }
        None => {
            let stdout = stdio::stdout();
            let handle = stdout.lock();
            let mut writer = BufWriter::new(handle);
            write_pdb_structure(&mut writer, structure)
                .context("Failed to write PDB output to stdout")?;
            writer.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

pub fn stderr_is_interactive() -> bool {
    stdio::stderr().is_terminal()
}

/// Wraps a pipeline stage with a spinner rendered to stderr when `enabled`.
pub fn run_with_spinner<T, F>(message: &str, enabled: bool, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    if !enabled {
        return work();
    }

    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}
