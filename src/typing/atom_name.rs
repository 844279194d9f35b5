//! Conversion of a description word into a PDB-style four-column atom name.

use crate::model::types::Name4;

/// Derives the standardized atom name from the selected description word.
///
/// The rules, in order:
///
/// 1. A word starting with `Oxygen` becomes `" O  "` and one starting with `Hydrogen`
///    becomes `" H  "` (water descriptions spell the element out).
/// 2. Any charge suffix is cut at the first `+` or `-` and the rest is upper-cased.
/// 3. A charged word is an ion: single letters get one leading blank (`" K  "`), longer
///    symbols start in column 0 (`"NA  "`).
/// 4. An uncharged four-letter name rotates its last character to the front
///    (`HD11` → `1HD1`), matching the PDB convention for four-character hydrogens.
/// 5. Anything else gets a single leading blank (`CA` → `" CA "`).
pub fn standard_atom_name(word: &str) -> Name4 {
    if word.starts_with("Oxygen") {
        return Name4::new(" O  ");
    }
    if word.starts_with("Hydrogen") {
        return Name4::new(" H  ");
    }

    let is_ion = word.contains(['+', '-']);
    let stripped = word
        .split(['+', '-'])
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();

    let name = if is_ion {
        if stripped.len() == 1 {
            format!(" {stripped}")
        } else {
            stripped
        }
    } else if stripped.len() == 4 {
        let (head, last) = stripped.split_at(3);
        format!("{last}{head}")
    } else {
        format!(" {stripped}")
    };

    Name4::new(&name)
}
