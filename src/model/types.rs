use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

pub type Point = Point3<f64>;

/// Fixed-width, space-padded four-column name field.
///
/// Both atom and residue names travel through the pipeline in the exact column form
/// they occupy in a PDB record, so `" CA "` and `"CA  "` are distinct values. The
/// all-blank value marks a name that could not be resolved.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Name4([u8; 4]);

impl Name4 {
    /// The unresolved name: four blanks.
    pub const BLANK: Name4 = Name4(*b"    ");

    /// Builds a name from text, padding with blanks or truncating to four columns.
    ///
    /// Non-ASCII characters are replaced by `?` so the field always stays four bytes wide.
    pub fn new(text: &str) -> Self {
        let mut bytes = *b"    ";
        for (slot, ch) in bytes.iter_mut().zip(text.chars()) {
            *slot = if ch.is_ascii() { ch as u8 } else { b'?' };
        }
        Self(bytes)
    }

    pub fn as_str(&self) -> &str {
        // Every constructor stores ASCII bytes only.
        std::str::from_utf8(&self.0).unwrap_or("????")
    }

    pub fn trimmed(&self) -> &str {
        self.as_str().trim()
    }

    pub fn is_blank(&self) -> bool {
        self.0 == Self::BLANK.0
    }

    /// Returns the left-justified form, e.g. `" HB "` becomes `"HB  "`.
    pub fn justified(&self) -> Name4 {
        Name4::new(self.as_str().trim_start())
    }

    /// Compares the left-justified form against a bare label such as `"OXT"`.
    pub fn is(&self, label: &str) -> bool {
        self.justified() == Name4::new(label)
    }

    pub fn first_char(&self) -> char {
        self.as_str().trim_start().chars().next().unwrap_or(' ')
    }

    /// Writes the leading digit of `number` into the first free column of the name.
    ///
    /// The search skips column 0 so that a name in PDB column form (`" HB "`) receives the
    /// digit after its label (`" HB2"`). Column 0 is used only when it is the sole blank.
    /// A name with no blank column is left untouched and `false` is returned.
    pub fn insert_digit(&mut self, number: u32) -> bool {
        let digit = number.to_string().as_bytes()[0];
        let slot = self.0[1..]
            .iter()
            .position(|&b| b == b' ')
            .map(|i| i + 1)
            .or_else(|| (self.0[0] == b' ').then_some(0));
        match slot {
            Some(i) => {
                self.0[i] = digit;
                true
            }
            None => false,
        }
    }

    /// Element symbol implied by the name's position in columns 13–14.
    ///
    /// A leading blank or digit means a one-letter element held in the second column;
    /// otherwise the first two columns hold a two-letter symbol.
    pub fn element(&self) -> Element {
        let bytes = self.0;
        let symbol = if bytes[0] == b' ' || bytes[0].is_ascii_digit() {
            &self.as_str()[1..2]
        } else {
            self.as_str()[0..2].trim_end()
        };
        Element::from_symbol(symbol)
    }
}

impl Default for Name4 {
    fn default() -> Self {
        Self::BLANK
    }
}

impl fmt::Debug for Name4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.as_str())
    }
}

impl fmt::Display for Name4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name4 {
    fn from(text: &str) -> Self {
        Name4::new(text)
    }
}

/// Elements that occur in biomolecular force-field atom names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    H,
    Li,
    C,
    N,
    O,
    F,
    Na,
    Mg,
    P,
    S,
    Cl,
    K,
    Ca,
    Zn,
    Br,
    Rb,
    I,
    Cs,
    Ba,
    Unknown,
}

impl Element {
    pub fn symbol(&self) -> &'static str {
        match self {
            Element::H => "H",
            Element::Li => "Li",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::Na => "Na",
            Element::Mg => "Mg",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::K => "K",
            Element::Ca => "Ca",
            Element::Zn => "Zn",
            Element::Br => "Br",
            Element::Rb => "Rb",
            Element::I => "I",
            Element::Cs => "Cs",
            Element::Ba => "Ba",
            Element::Unknown => "",
        }
    }

    /// Case-insensitive lookup; anything unrecognized maps to [`Element::Unknown`].
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim().to_ascii_uppercase().as_str() {
            "H" => Element::H,
            "LI" => Element::Li,
            "C" => Element::C,
            "N" => Element::N,
            "O" => Element::O,
            "F" => Element::F,
            "NA" => Element::Na,
            "MG" => Element::Mg,
            "P" => Element::P,
            "S" => Element::S,
            "CL" => Element::Cl,
            "K" => Element::K,
            "CA" => Element::Ca,
            "ZN" => Element::Zn,
            "BR" => Element::Br,
            "RB" => Element::Rb,
            "I" => Element::I,
            "CS" => Element::Cs,
            "BA" => Element::Ba,
            _ => Element::Unknown,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Element {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Element::from_symbol(s) {
            Element::Unknown => Err(format!("Invalid element symbol: {}", s)),
            element => Ok(element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name4_pads_and_truncates_to_four_columns() {
        assert_eq!(Name4::new("CA").as_str(), "CA  ");
        assert_eq!(Name4::new(" N").as_str(), " N  ");
        assert_eq!(Name4::new("CTERMINAL").as_str(), "CTER");
        assert!(Name4::new("").is_blank());
    }

    #[test]
    fn name4_justified_strips_leading_blanks() {
        assert_eq!(Name4::new(" HB ").justified().as_str(), "HB  ");
        assert_eq!(Name4::new("1HD1").justified().as_str(), "1HD1");
        assert!(Name4::new(" OXT").is("OXT"));
        assert!(!Name4::new(" OXT").is("O"));
    }

    #[test]
    fn insert_digit_uses_first_blank_after_column_zero() {
        let mut name = Name4::new(" HB ");
        name.insert_digit(2);
        assert_eq!(name.as_str(), " HB2");

        let mut name = Name4::new(" H  ");
        name.insert_digit(3);
        assert_eq!(name.as_str(), " H3 ");

        let mut name = Name4::new("HB  ");
        name.insert_digit(1);
        assert_eq!(name.as_str(), "HB1 ");
    }

    #[test]
    fn insert_digit_falls_back_to_column_zero_then_gives_up() {
        let mut name = Name4::new(" HB1");
        assert!(name.insert_digit(2));
        assert_eq!(name.as_str(), "2HB1");

        let mut name = Name4::new("1HD1");
        assert!(!name.insert_digit(4));
        assert_eq!(name.as_str(), "1HD1");
    }

    #[test]
    fn insert_digit_uses_leading_digit_of_multi_digit_numbers() {
        let mut name = Name4::new(" H  ");
        name.insert_digit(12);
        assert_eq!(name.as_str(), " H1 ");
    }

    #[test]
    fn element_follows_pdb_column_convention() {
        assert_eq!(Name4::new(" CA ").element(), Element::C);
        assert_eq!(Name4::new("CA  ").element(), Element::Ca);
        assert_eq!(Name4::new("1HD1").element(), Element::H);
        assert_eq!(Name4::new(" K  ").element(), Element::K);
        assert_eq!(Name4::new("CL  ").element(), Element::Cl);
        assert_eq!(Name4::BLANK.element(), Element::Unknown);
    }

    #[test]
    fn element_from_str_rejects_unknown_symbols() {
        assert_eq!("Na".parse::<Element>(), Ok(Element::Na));
        assert!("Xx".parse::<Element>().is_err());
    }
}
