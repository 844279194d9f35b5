//! Embedded atom-type naming rules.
//!
//! The default rule table ships inside the binary as `rules/amber99.toml` and is parsed
//! once on first use. Alternative tables with the same schema can be loaded at runtime.

mod loader;
mod schema;
mod store;

pub use loader::{load_rules, parse_rules};

use crate::typing::RuleSet;

/// The built-in AMBER99 rule table.
pub fn default_rules() -> &'static RuleSet {
    store::get_rules()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typing::resolve_description;

    fn resolve(description: &str) -> (String, String, bool) {
        let hit = resolve_description(default_rules(), description)
            .unwrap_or_else(|| panic!("no rule for {description:?}"));
        (
            hit.res_name.as_str().to_string(),
            hit.atom_name.as_str().to_string(),
            hit.is_het,
        )
    }

    #[test]
    fn default_rules_is_shared() {
        assert!(std::ptr::eq(default_rules(), default_rules()));
    }

    #[test]
    fn amino_acid_descriptions() {
        assert_eq!(resolve("Glycine N"), ("GLY ".into(), " N  ".into(), false));
        assert_eq!(resolve("Isoleucine CD"), ("ILE ".into(), " CD ".into(), false));
        assert_eq!(resolve("Tryptophan CZ2"), ("TRP ".into(), " CZ2".into(), false));
        assert_eq!(resolve("Cysteine (SH) SG"), ("CYS ".into(), " SG ".into(), false));
        assert_eq!(resolve("Histidine (+) HD1"), ("HIS ".into(), " HD1".into(), false));
        assert_eq!(resolve("Leucine HD11"), ("LEU ".into(), "1HD1".into(), false));
        assert_eq!(resolve("Ornithine NE"), ("ORN ".into(), " NE ".into(), true));
    }

    #[test]
    fn terminal_descriptions_take_residue_from_second_word() {
        assert_eq!(
            resolve("N-Terminal ALA H3"),
            ("ALA ".into(), " H3 ".into(), false)
        );
        assert_eq!(
            resolve("N-Terminal PRO HN 1"),
            ("PRO ".into(), " 1  ".into(), false)
        );
        assert_eq!(
            resolve("C-Terminal AIB OXT"),
            ("AIB ".into(), " OXT".into(), true)
        );
        assert_eq!(
            resolve("C-Terminal GLY OXT"),
            ("GLY ".into(), " OXT".into(), false)
        );
        assert_eq!(
            resolve("C-Terminal Amide N"),
            ("CTER".into(), " N  ".into(), false)
        );
    }

    #[test]
    fn nucleic_acid_and_cap_descriptions() {
        assert_eq!(resolve("R-Adenosine C8"), ("  A ".into(), " C8 ".into(), false));
        assert_eq!(resolve("D-Thymidine C7"), (" DT ".into(), " C7 ".into(), false));
        assert_eq!(resolve("R-5'-Hydroxyl O5'"), ("HYD ".into(), " O5'".into(), true));
    }

    #[test]
    fn water_and_ion_descriptions() {
        assert_eq!(resolve("TIP3P Oxygen"), ("HOH ".into(), " O  ".into(), true));
        assert_eq!(resolve("TIP3P Hydrogen"), ("HOH ".into(), " H  ".into(), true));
        assert_eq!(resolve("Na+ Sodium Ion"), ("NA  ".into(), "NA  ".into(), true));
        assert_eq!(resolve("K+ Potassium Ion"), ("K   ".into(), " K  ".into(), true));
        assert_eq!(resolve("Cl- Chloride Ion"), ("CL  ".into(), "CL  ".into(), true));
    }

    #[test]
    fn unmatched_description_resolves_to_none() {
        assert!(resolve_description(default_rules(), "Mystery Atom").is_none());
        assert!(resolve_description(default_rules(), "Glycine").is_none());
    }
}
