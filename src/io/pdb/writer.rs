use crate::io::error::Error;
use crate::model::{atom::Atom, structure::Structure};
use std::io::Write;

const TITLE_WIDTH: usize = 70;

/// Serializes a converted structure as PDB records.
///
/// Output order: `CRYST1` (when a periodic box is known), `TITLE`, one `ATOM`/`HETATM`
/// record per atom in sequence order, a `TER` after the last polymer atom of every chain,
/// and a closing `END`. Atom serials are the ones read from the coordinate file.
pub fn write_structure<W: Write>(writer: W, structure: &Structure) -> Result<(), Error> {
    let mut ctx = WriterContext::new(writer);

    ctx.write_cryst1(structure.box_vectors)?;

    ctx.write_title(&structure.title)?;

    ctx.write_atoms(structure)?;

    ctx.write_end()?;

    Ok(())
}

struct WriterContext<W> {
    writer: W,
}

impl<W: Write> WriterContext<W> {
    fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_cryst1(&mut self, box_vectors: Option<[[f64; 3]; 3]>) -> Result<(), Error> {
        if let Some(vectors) = box_vectors {
            let v1 = nalgebra::Vector3::from(vectors[0]);
            let v2 = nalgebra::Vector3::from(vectors[1]);
            let v3 = nalgebra::Vector3::from(vectors[2]);

            let a = v1.norm();
            let b = v2.norm();
            let c = v3.norm();

            let alpha = v2.angle(&v3).to_degrees();
            let beta = v1.angle(&v3).to_degrees();
            let gamma = v1.angle(&v2).to_degrees();

            writeln!(
                self.writer,
                "CRYST1{:9.3}{:9.3}{:9.3}{:7.2}{:7.2}{:7.2} P 1           1",
                a, b, c, alpha, beta, gamma
            )
            .map_err(|e| Error::from_io(e, None))?;
        }
        Ok(())
    }

    fn write_title(&mut self, title: &str) -> Result<(), Error> {
        let chars: Vec<char> = title.trim().chars().collect();

        for (i, chunk) in chars.chunks(TITLE_WIDTH).enumerate() {
            let text: String = chunk.iter().collect();
            let line = if i == 0 {
                format!("TITLE     {}", text)
            } else {
                format!("TITLE   {:2}{}", i + 1, text)
            };
            writeln!(self.writer, "{}", line).map_err(|e| Error::from_io(e, None))?;
        }
        Ok(())
    }

    fn write_atoms(&mut self, structure: &Structure) -> Result<(), Error> {
        for chain in structure.atoms().chunk_by(|a, b| a.chain_id == b.chain_id) {
            let last_polymer = chain.iter().rposition(|atom| !atom.is_het);

            for (i, atom) in chain.iter().enumerate() {
                self.write_atom_record(atom)?;

                if Some(i) == last_polymer {
                    self.write_ter_record(atom)?;
                }
            }
        }
        Ok(())
    }

    fn write_atom_record(&mut self, atom: &Atom) -> Result<(), Error> {
        let element_str = format!("{:>2}", atom.element().symbol().to_uppercase());

        writeln!(
            self.writer,
            "{:6}{:5} {:4} {:4}{:1}{:4}{:1}   {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}          {:2}",
            atom.record_type(),
            atom.serial % 100000,
            atom.name.as_str(),
            atom.res_name.as_str(),
            chain_column(&atom.chain_id),
            atom.res_seq % 10000,
            atom.insertion_code,
            atom.pos.x,
            atom.pos.y,
            atom.pos.z,
            1.00,
            0.00,
            element_str
        )
        .map_err(|e| Error::from_io(e, None))
    }

    fn write_ter_record(&mut self, last: &Atom) -> Result<(), Error> {
        writeln!(
            self.writer,
            "TER   {:5}      {:4}{:1}{:4}{:1}",
            (last.serial + 1) % 100000,
            last.res_name.as_str(),
            chain_column(&last.chain_id),
            last.res_seq % 10000,
            last.insertion_code
        )
        .map_err(|e| Error::from_io(e, None))
    }

    fn write_end(&mut self) -> Result<(), Error> {
        writeln!(self.writer, "END").map_err(|e| Error::from_io(e, None))?;
        self.writer.flush().map_err(|e| Error::from_io(e, None))
    }
}

fn chain_column(chain_id: &str) -> char {
    chain_id.chars().next().unwrap_or(' ')
}
