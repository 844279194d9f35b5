use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;

use tinker_pdb::convert::{self, ConvertConfig};
use tinker_pdb::ops::ChainConfig;
use tinker_pdb::{CatalogConfig, RuleSet, TypePolicy, default_rules, load_rules};

mod commands;

use commands::summary;

#[derive(Parser, Debug)]
#[command(
    name = "tinkerpdb",
    about = "Converts a Tinker XYZ coordinate file into a PDB file, reconstructing residue names, atom names, chains, and residue numbers.",
    version,
    author
)]
struct Cli {
    /// Comma-separated chain labels used in order before generated labels (A, B, ...).
    #[arg(short = 'c', long = "chains", value_name = "LABELS", value_delimiter = ',')]
    chains: Vec<String>,
    /// TOML naming-rule table replacing the built-in AMBER99 rules.
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,
    /// Fail on atom types the parameter file does not resolve instead of leaving names blank.
    #[arg(long)]
    strict: bool,
    /// Reject parameter-file atom types at or above this index.
    #[arg(long, value_name = "N")]
    type_capacity: Option<u32>,
    /// Start a new chain when a polymer residue follows a hetero residue without backbone data.
    #[arg(long)]
    bump_chain_on_het: bool,
    /// Print a chain and conversion summary to stderr.
    #[arg(long)]
    summary: bool,
    /// Only report errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
    /// Report debugging detail.
    #[arg(short, long)]
    verbose: bool,
    /// Tinker parameter file (looked up in $TINKERDATA when not found as given).
    #[arg(value_name = "PARAMS")]
    params: PathBuf,
    /// Tinker XYZ input. When omitted, stdin is used.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// PDB output. When omitted, stdout is used.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,
}

impl Cli {
    fn log_filter(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }

    fn convert_config(&self) -> ConvertConfig {
        ConvertConfig {
            catalog: CatalogConfig {
                capacity: self.type_capacity,
                policy: if self.strict {
                    TypePolicy::Strict
                } else {
                    TypePolicy::Lenient
                },
            },
            chains: ChainConfig {
                labels: self.chains.clone(),
                bump_on_het: self.bump_chain_on_het,
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();

    let custom_rules: RuleSet;
    let rules = match &cli.rules {
        Some(path) => {
            custom_rules = load_rules(path)
                .with_context(|| format!("Failed to load naming rules from {}", path.display()))?;
            &custom_rules
        }
        None => default_rules(),
    };

    let config = cli.convert_config();
    let show_spinner = !cli.quiet && commands::stderr_is_interactive();

    let params_path = commands::locate_params(&cli.params)?;
    let catalog = commands::run_with_spinner("Reading atom types", show_spinner, || {
        let reader = commands::open_file(&params_path)?;
        convert::load_catalog(reader, rules, &config.catalog)
            .map_err(|e| e.with_path(&params_path))
            .context("Failed to read the Tinker parameter file")
    })?;

    let coords = commands::open_input(cli.input.as_deref())?;
    let conversion = commands::run_with_spinner("Converting coordinates", show_spinner, || {
        convert::convert_coordinates(coords, &catalog, &config)
            .map_err(|e| match &cli.input {
                Some(path) => e.with_path(path),
                None => e,
            })
            .with_context(|| {
                format!(
                    "Failed to convert {}",
                    commands::describe_source(cli.input.as_deref())
                )
            })
    })?;

    commands::save_output(&conversion.structure, cli.output.as_deref())?;

    if cli.summary {
        summary::print(&conversion)?;
    }

    Ok(())
}
