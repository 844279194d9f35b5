use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    catalog::{AtomTypeCatalog, TypePolicy},
    structure::Structure,
    types::{Name4, Point},
};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::ops::Range;

const FORMAT: &str = "XYZ";

const SERIAL: Range<usize> = 0..6;
const LABEL: Range<usize> = 8..11;
const X: Range<usize> = 11..23;
const Y: Range<usize> = 23..35;
const Z: Range<usize> = 35..47;
const TYPE: Range<usize> = 47..53;

/// What the decoder observed besides the atoms themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Atom count announced on the header line.
    pub declared_atoms: usize,
    /// Atoms per type index that the catalog could not resolve.
    pub unresolved: BTreeMap<u32, usize>,
}

impl DecodeReport {
    pub fn unresolved_atoms(&self) -> usize {
        self.unresolved.values().sum()
    }

    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Scaffolding residue numbering assigned while decoding.
///
/// A new residue starts at the first atom, at every backbone nitrogen, when the hetero
/// flag flips, when a hetero residue name changes, and when a hetero heavy atom repeats
/// the name of its residue's first atom (consecutive waters or ions).
#[derive(Debug, Default)]
struct ResidueCounter {
    current: i32,
    first_atom: Option<Name4>,
    last: Option<(Name4, bool)>,
}

impl ResidueCounter {
    fn next(&mut self, res_name: Name4, atom_name: Name4, is_het: bool) -> i32 {
        let resolved = !res_name.is_blank();
        let starts = self.first_atom.is_none()
            || atom_name.is("N")
            || (resolved
                && self.last.is_some_and(|(name, het)| {
                    het != is_het || (is_het && name != res_name)
                }))
            || (resolved
                && is_het
                && !atom_name.is_blank()
                && atom_name.first_char() != 'H'
                && self.first_atom == Some(atom_name));

        if starts {
            self.current += 1;
            self.first_atom = Some(atom_name);
            self.last = None;
        }
        if resolved {
            self.last = Some((res_name, is_het));
        }
        self.current
    }
}

/// Decodes a Tinker `.xyz` coordinate file, naming each atom through the catalog.
///
/// The first line carries the atom count and a title. An optional periodic-box line of
/// six numbers may follow. Each atom line uses Tinker's fixed columns: serial, label,
/// x, y, z, and type index, followed by connectivity which is ignored.
pub fn read<R: BufRead>(
    reader: R,
    catalog: &AtomTypeCatalog,
    policy: TypePolicy,
) -> Result<(Structure, DecodeReport), Error> {
    let mut lines = reader.lines();
    let mut structure = Structure::new();
    let mut report = DecodeReport::default();

    let header = lines
        .next()
        .transpose()
        .map_err(|e| Error::from_io(e, None))?
        .ok_or_else(|| Error::parse(FORMAT, None, 1, "missing atom count header"))?;
    let (declared, title) = parse_header(&header)?;
    report.declared_atoms = declared;
    structure.title = title.to_string();

    let mut counter = ResidueCounter::default();
    let mut first_record = true;

    for (index, line) in lines.enumerate() {
        let line_number = index + 2;
        let line = line.map_err(|e| Error::from_io(e, None))?;
        if line.trim().is_empty() {
            continue;
        }

        if first_record {
            first_record = false;
            if let Some(cell) = parse_box(&line) {
                structure.box_vectors = Some(cell_vectors(cell));
                continue;
            }
        }

        let record = parse_atom_line(&line, line_number)?;
        let mut atom = Atom::new(record.serial, record.label, record.pos);

        match catalog.get(record.type_index) {
            Some(entry) => {
                atom.name = entry.atom_name;
                atom.res_name = entry.res_name;
                atom.is_het = entry.is_het;
            }
            None if policy == TypePolicy::Strict => {
                return Err(Error::UnresolvedType {
                    serial: record.serial,
                    type_index: record.type_index,
                });
            }
            None => {
                *report.unresolved.entry(record.type_index).or_default() += 1;
            }
        }

        atom.res_seq = counter.next(atom.res_name, atom.name, atom.is_het);
        structure.push(atom);
    }

    if structure.is_empty() {
        return Err(Error::empty_coordinates(None));
    }

    if declared != structure.atom_count() {
        log::warn!(
            "header declares {} atoms but {} were read",
            declared,
            structure.atom_count()
        );
    }

    if !report.is_clean() {
        let types: Vec<String> = report.unresolved.keys().map(u32::to_string).collect();
        log::warn!(
            "{} atoms have unresolved types and keep blank names (types: {})",
            report.unresolved_atoms(),
            types.join(", ")
        );
    }

    Ok((structure, report))
}

struct AtomLine<'a> {
    serial: usize,
    label: &'a str,
    pos: Point,
    type_index: u32,
}

fn parse_header(line: &str) -> Result<(usize, &str), Error> {
    let trimmed = line.trim_start();
    let count = trimmed
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::parse(FORMAT, None, 1, "missing atom count header"))?;
    let declared = count
        .parse::<usize>()
        .map_err(|_| Error::parse(FORMAT, None, 1, format!("invalid atom count '{count}'")))?;
    Ok((declared, trimmed[count.len()..].trim()))
}

/// Recognizes Tinker's unit-cell line: exactly six reals `a b c alpha beta gamma`.
fn parse_box(line: &str) -> Option<[f64; 6]> {
    let values: Vec<f64> = line
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<Result<_, _>>()
        .ok()?;
    <[f64; 6]>::try_from(values).ok()
}

/// Converts cell lengths and angles (degrees) into lattice vectors with `a` along x.
fn cell_vectors([a, b, c, alpha, beta, gamma]: [f64; 6]) -> [[f64; 3]; 3] {
    let (cos_a, cos_b) = (alpha.to_radians().cos(), beta.to_radians().cos());
    let (sin_g, cos_g) = gamma.to_radians().sin_cos();

    let cx = c * cos_b;
    let cy = c * (cos_a - cos_b * cos_g) / sin_g;
    let cz = (c * c - cx * cx - cy * cy).max(0.0).sqrt();

    [[a, 0.0, 0.0], [b * cos_g, b * sin_g, 0.0], [cx, cy, cz]]
}

fn parse_atom_line(line: &str, line_number: usize) -> Result<AtomLine<'_>, Error> {
    let serial = column(line, SERIAL, "serial number", line_number)?
        .parse::<usize>()
        .map_err(|_| Error::parse(FORMAT, None, line_number, "invalid serial number"))?;
    let label = column(line, LABEL, "atom label", line_number)?;
    let x = parse_coord(line, X, "x", line_number)?;
    let y = parse_coord(line, Y, "y", line_number)?;
    let z = parse_coord(line, Z, "z", line_number)?;
    let type_index = column(line, TYPE, "atom type", line_number)?
        .parse::<u32>()
        .map_err(|_| Error::parse(FORMAT, None, line_number, "invalid atom type index"))?;

    Ok(AtomLine {
        serial,
        label,
        pos: Point::new(x, y, z),
        type_index,
    })
}

fn column<'a>(
    line: &'a str,
    range: Range<usize>,
    what: &str,
    line_number: usize,
) -> Result<&'a str, Error> {
    line.get(range).map(str::trim).ok_or_else(|| {
        Error::parse(
            FORMAT,
            None,
            line_number,
            format!("atom record too short for the {what} field"),
        )
    })
}

fn parse_coord(line: &str, range: Range<usize>, axis: &str, line_number: usize) -> Result<f64, Error> {
    column(line, range, axis, line_number)?
        .parse::<f64>()
        .map_err(|_| Error::parse(FORMAT, None, line_number, format!("invalid {axis} coordinate")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::AtomTypeEntry;
    use std::io::Cursor;

    fn catalog() -> AtomTypeCatalog {
        let mut catalog = AtomTypeCatalog::new();
        for (type_index, res, atom, is_het) in [
            (1, "GLY ", " N  ", false),
            (2, "GLY ", " CA ", false),
            (3, "GLY ", " C  ", false),
            (4, "HOH ", " O  ", true),
            (5, "HOH ", " H  ", true),
            (6, "NA  ", "NA  ", true),
        ] {
            catalog.insert(AtomTypeEntry {
                type_index,
                res_name: Name4::new(res),
                atom_name: Name4::new(atom),
                is_het,
            });
        }
        catalog
    }

    fn line(serial: usize, label: &str, pos: [f64; 3], type_index: u32) -> String {
        format!(
            "{:6}  {:<3}{:12.6}{:12.6}{:12.6}{:6}",
            serial, label, pos[0], pos[1], pos[2], type_index
        )
    }

    fn decode(text: &str, policy: TypePolicy) -> Result<(Structure, DecodeReport), Error> {
        read(Cursor::new(text), &catalog(), policy)
    }

    #[test]
    fn read_decodes_header_and_atoms() {
        let text = format!(
            "     2  Glycine fragment\n{}     2\n{}\n",
            line(1, "N", [0.0, 0.0, 0.0], 1),
            line(2, "CT", [1.0, 0.0, 0.0], 2)
        );
        let (structure, report) = decode(&text, TypePolicy::Lenient).unwrap();

        assert_eq!(structure.title, "Glycine fragment");
        assert_eq!(report.declared_atoms, 2);
        assert!(report.is_clean());
        assert_eq!(structure.atom_count(), 2);

        let ca = &structure.atoms()[1];
        assert_eq!(ca.serial, 2);
        assert_eq!(ca.raw_label, "CT");
        assert_eq!(ca.name, Name4::new(" CA "));
        assert_eq!(ca.res_name, Name4::new("GLY "));
        assert_eq!(ca.pos, Point::new(1.0, 0.0, 0.0));
        assert!(structure.box_vectors.is_none());
    }

    #[test]
    fn backbone_nitrogen_starts_a_new_residue() {
        let text = format!(
            "6\n{}\n{}\n{}\n{}\n{}\n{}\n",
            line(1, "N", [0.0, 0.0, 0.0], 1),
            line(2, "CT", [1.4, 0.0, 0.0], 2),
            line(3, "C", [2.4, 1.0, 0.0], 3),
            line(4, "N", [3.6, 1.0, 0.0], 1),
            line(5, "CT", [4.9, 1.0, 0.0], 2),
            line(6, "C", [5.9, 2.0, 0.0], 3),
        );
        let (structure, _) = decode(&text, TypePolicy::Lenient).unwrap();

        let numbers: Vec<i32> = structure.iter_atoms().map(|a| a.res_seq).collect();
        assert_eq!(numbers, vec![1, 1, 1, 2, 2, 2]);
    }

    #[test]
    fn solvent_and_ions_are_split_into_residues() {
        let text = format!(
            "8\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n{}\n",
            line(1, "N", [0.0, 0.0, 0.0], 1),
            line(2, "CT", [1.4, 0.0, 0.0], 2),
            line(3, "OW", [9.0, 0.0, 0.0], 4),
            line(4, "HW", [9.9, 0.0, 0.0], 5),
            line(5, "HW", [9.0, 0.9, 0.0], 5),
            line(6, "OW", [12.0, 0.0, 0.0], 4),
            line(7, "Na", [15.0, 0.0, 0.0], 6),
            line(8, "Na", [18.0, 0.0, 0.0], 6),
        );
        let (structure, _) = decode(&text, TypePolicy::Lenient).unwrap();

        let numbers: Vec<i32> = structure.iter_atoms().map(|a| a.res_seq).collect();
        assert_eq!(numbers, vec![1, 1, 2, 2, 2, 3, 4, 5]);
    }

    #[test]
    fn unresolved_type_is_blank_when_lenient() {
        let text = format!(
            "2\n{}\n{}\n",
            line(1, "N", [0.0, 0.0, 0.0], 1),
            line(2, "XX", [1.0, 0.0, 0.0], 812)
        );
        let (structure, report) = decode(&text, TypePolicy::Lenient).unwrap();

        let atom = &structure.atoms()[1];
        assert!(atom.name.is_blank());
        assert!(atom.res_name.is_blank());
        assert_eq!(atom.res_seq, 1);
        assert_eq!(report.unresolved.get(&812), Some(&1));
        assert_eq!(report.unresolved_atoms(), 1);
    }

    #[test]
    fn unresolved_type_is_fatal_when_strict() {
        let text = format!("1\n{}\n", line(7, "XX", [0.0, 0.0, 0.0], 812));
        let err = decode(&text, TypePolicy::Strict).unwrap_err();

        assert!(matches!(
            err,
            Error::UnresolvedType {
                serial: 7,
                type_index: 812
            }
        ));
    }

    #[test]
    fn box_line_after_header_becomes_unit_cell() {
        let text = format!(
            "1  boxed\n   30.000000   40.000000   50.000000   90.000000   90.000000   90.000000\n{}\n",
            line(1, "OW", [0.0, 0.0, 0.0], 4)
        );
        let (structure, _) = decode(&text, TypePolicy::Lenient).unwrap();

        let cell = structure.box_vectors.unwrap();
        assert!((cell[0][0] - 30.0).abs() < 1e-9);
        assert!((cell[1][1] - 40.0).abs() < 1e-9);
        assert!((cell[2][2] - 50.0).abs() < 1e-9);
        assert!(cell[1][0].abs() < 1e-9);
        assert!(cell[2][0].abs() < 1e-9);
        assert_eq!(structure.atom_count(), 1);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = format!("1\n\n{}\n\n", line(1, "N", [0.0, 0.0, 0.0], 1));
        let (structure, _) = decode(&text, TypePolicy::Lenient).unwrap();
        assert_eq!(structure.atom_count(), 1);
    }

    #[test]
    fn count_mismatch_is_not_fatal() {
        let text = format!("5\n{}\n", line(1, "N", [0.0, 0.0, 0.0], 1));
        let (structure, report) = decode(&text, TypePolicy::Lenient).unwrap();
        assert_eq!(report.declared_atoms, 5);
        assert_eq!(structure.atom_count(), 1);
    }

    #[test]
    fn missing_or_invalid_header_is_fatal() {
        assert!(matches!(
            decode("", TypePolicy::Lenient),
            Err(Error::Parse { line_number: 1, .. })
        ));
        assert!(matches!(
            decode("abc title\n", TypePolicy::Lenient),
            Err(Error::Parse { line_number: 1, .. })
        ));
    }

    #[test]
    fn header_without_atoms_is_empty_coordinates() {
        assert!(matches!(
            decode("0  nothing\n", TypePolicy::Lenient),
            Err(Error::EmptyCoordinates { .. })
        ));
    }

    #[test]
    fn malformed_atom_line_is_fatal() {
        let short = "1\n     1  N      0.000000\n";
        assert!(matches!(
            decode(short, TypePolicy::Lenient),
            Err(Error::Parse { line_number: 2, .. })
        ));

        let mut bad = line(1, "N", [0.0, 0.0, 0.0], 1);
        bad.replace_range(11..23, "    garbage ");
        let text = format!("1\n{bad}\n");
        assert!(matches!(
            decode(&text, TypePolicy::Lenient),
            Err(Error::Parse { line_number: 2, .. })
        ));
    }
}
