use crate::model::structure::Structure;
use smol_str::SmolStr;

/// Rewrites residue numbers as a dense 1-based sequence per chain and clears insertion
/// codes.
///
/// A new number is issued whenever the (number, insertion code) pair changes from one
/// atom to the next; the counter restarts at 1 whenever the chain label changes.
pub fn renumber_residues(structure: &mut Structure) {
    let mut counter = 0;
    let mut last_key: Option<(i32, char)> = None;
    let mut last_chain: Option<SmolStr> = None;

    for atom in structure.iter_atoms_mut() {
        let key = atom.residue_key();
        if last_key != Some(key) {
            last_key = Some(key);
            counter += 1;
        }

        if last_chain.as_ref() != Some(&atom.chain_id) {
            last_chain = Some(atom.chain_id.clone());
            counter = 1;
        }

        atom.res_seq = counter;
        atom.insertion_code = ' ';
    }
}
