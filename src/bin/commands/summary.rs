use std::io::{self, Write};

use anyhow::{Context, Result};
use prettytable::{Table, format, row};

use tinker_pdb::Structure;
use tinker_pdb::convert::Conversion;

/// Prints the chain breakdown and conversion diagnostics to stderr.
pub fn print(conversion: &Conversion) -> Result<()> {
    let chains = collect_chain_rows(&conversion.structure);
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "tinkerpdb Conversion Report")?;
    writeln!(&mut stderr)?;

    let mut chain_table = Table::new();
    print_boxed_label(&mut stderr, "Chain Breakdown")?;
    chain_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    chain_table.set_titles(row!["Chain", "Residues", "Atoms", "Hetero Atoms"]);
    for chain in &chains {
        chain_table.add_row(row![chain.id, chain.residues, chain.atoms, chain.hetero_atoms]);
    }
    chain_table
        .print(&mut stderr)
        .context("Failed to render chain summary")?;
    writeln!(&mut stderr)?;

    let report = &conversion.report;
    let structure = &conversion.structure;

    let mut summary_table = Table::new();
    print_boxed_label(&mut stderr, "Conversion Summary")?;
    summary_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary_table.set_titles(row!["Metric", "Value"]);
    summary_table.add_row(row![
        "Atoms (read / declared)",
        format!("{} / {}", structure.atom_count(), report.decode.declared_atoms)
    ]);
    summary_table.add_row(row!["Catalog Atom Types", report.catalog_entries]);
    summary_table.add_row(row!["Rejected Atom Types", report.rejected_types.len()]);
    summary_table.add_row(row!["Unresolved Atoms", report.decode.unresolved_atoms()]);
    summary_table.add_row(row!["Renamed Atoms", report.normalized.total()]);
    summary_table.add_row(row!["Continuity Warnings", report.chains.gaps.len()]);
    let periodic = if structure.box_vectors.is_some() {
        "Yes"
    } else {
        "No"
    };
    summary_table.add_row(row!["Periodic Box", periodic]);
    summary_table
        .print(&mut stderr)
        .context("Failed to render conversion summary")?;

    Ok(())
}

fn collect_chain_rows(structure: &Structure) -> Vec<ChainRow> {
    let mut rows: Vec<ChainRow> = Vec::new();
    for span in structure.residue_spans() {
        let residue = &structure.atoms()[span];
        let id = residue[0].chain_id.to_string();
        let hetero = residue.iter().filter(|a| a.is_het).count();

        match rows.last_mut() {
            Some(row) if row.id == id => {
                row.residues += 1;
                row.atoms += residue.len();
                row.hetero_atoms += hetero;
            }
            _ => rows.push(ChainRow {
                id,
                residues: 1,
                atoms: residue.len(),
                hetero_atoms: hetero,
            }),
        }
    }
    rows
}

fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> io::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}

#[derive(Debug)]
struct ChainRow {
    id: String,
    residues: usize,
    atoms: usize,
    hetero_atoms: usize,
}
