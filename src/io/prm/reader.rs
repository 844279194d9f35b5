use crate::io::error::Error;
use crate::model::catalog::{AtomTypeCatalog, AtomTypeEntry, CatalogConfig, Rejection, TypePolicy};
use crate::typing::{RuleSet, resolve_description};
use std::io::BufRead;

const FORMAT: &str = "PRM";

/// Builds the atom-type catalog from the `atom` records of a Tinker parameter file.
///
/// Records look like `atom  1  14  N  "Glycine N"  7  14.010  3`. Every other line is
/// ignored. Descriptions that no rule resolves are recorded as rejections on the
/// returned catalog and leave their type index without an entry.
pub fn read<R: BufRead>(
    reader: R,
    rules: &RuleSet,
    config: &CatalogConfig,
) -> Result<AtomTypeCatalog, Error> {
    let mut catalog = AtomTypeCatalog::new();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|e| Error::from_io(e, None))?;

        let Some((type_index, description)) = parse_atom_record(&line, line_number)? else {
            continue;
        };

        if let Some(capacity) = config.capacity.filter(|&cap| type_index >= cap) {
            if config.policy == TypePolicy::Strict {
                return Err(Error::CapacityExceeded {
                    type_index,
                    capacity,
                });
            }
            log::warn!(
                "atom type {} exceeds the catalog capacity of {} types; dropped",
                type_index,
                capacity
            );
            catalog.reject(type_index, Rejection::CapacityExceeded { capacity });
            continue;
        }

        match resolve_description(rules, description) {
            Some(resolution) => {
                let replaced = catalog.insert(AtomTypeEntry {
                    type_index,
                    res_name: resolution.res_name,
                    atom_name: resolution.atom_name,
                    is_het: resolution.is_het,
                });
                if replaced.is_some() {
                    log::debug!(
                        "atom type {} redefined on line {}",
                        type_index,
                        line_number
                    );
                }
            }
            None => {
                log::debug!(
                    "atom type {} (\"{}\") matched no naming rule",
                    type_index,
                    description
                );
                catalog.reject(
                    type_index,
                    Rejection::Unmatched {
                        description: description.to_string(),
                    },
                );
            }
        }
    }

    Ok(catalog)
}

/// Returns the type index and quoted description of an `atom` record, or `None` for any
/// other line.
fn parse_atom_record(line: &str, line_number: usize) -> Result<Option<(u32, &str)>, Error> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("atom") {
        return Ok(None);
    }

    let type_index = tokens
        .next()
        .ok_or_else(|| Error::parse(FORMAT, None, line_number, "missing atom type index"))?
        .parse::<u32>()
        .map_err(|_| Error::parse(FORMAT, None, line_number, "invalid atom type index"))?;

    let description = quoted(line).ok_or_else(|| {
        Error::parse(
            FORMAT,
            None,
            line_number,
            "missing quoted atom type description",
        )
    })?;

    Ok(Some((type_index, description)))
}

fn quoted(line: &str) -> Option<&str> {
    let start = line.find('"')? + 1;
    let len = line[start..].find('"')?;
    Some(&line[start..start + len])
}
