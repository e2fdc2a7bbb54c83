use super::residue::AtomResidueInfo;
use super::types::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub formal_charge: i8,
    pub implicit_hydrogens: u8,
    pub isotope: Option<u16>,
    pub is_aromatic: bool,
    pub position: Option<[f64; 3]>,
}

impl Atom {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            formal_charge: 0,
            implicit_hydrogens: 0,
            isotope: None,
            is_aromatic: false,
            position: None,
        }
    }

    pub fn at(element: Element, position: [f64; 3]) -> Self {
        Self {
            position: Some(position),
            ..Self::new(element)
        }
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.formal_charge = charge;
        self
    }

    pub fn with_implicit_hydrogens(mut self, count: u8) -> Self {
        self.implicit_hydrogens = count;
        self
    }
}

/// Placeholder atom carrying a textual label (R-groups, attachment points,
/// unresolved fragments) instead of a concrete chemical meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoAtom {
    pub base: Atom,
    pub label: String,
}

impl PseudoAtom {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: Atom::new(Element::C),
            label: label.into(),
        }
    }

    pub fn with_base(label: impl Into<String>, base: Atom) -> Self {
        Self {
            base,
            label: label.into(),
        }
    }
}

/// Closed set of match primitives for [`QueryAtom`]. Substructure searches
/// evaluate a pattern against candidate atoms; the graph core itself never
/// interprets patterns beyond storing them.
#[derive(Debug, Clone, PartialEq)]
pub enum AtomPattern {
    Any,
    Element(Element),
    AnyOf(Vec<Element>),
    Aromatic(bool),
    Charged(i8),
}

impl AtomPattern {
    pub fn matches(&self, atom: &Atom) -> bool {
        match self {
            AtomPattern::Any => true,
            AtomPattern::Element(e) => atom.element == *e,
            AtomPattern::AnyOf(set) => set.contains(&atom.element),
            AtomPattern::Aromatic(flag) => atom.is_aromatic == *flag,
            AtomPattern::Charged(charge) => atom.formal_charge == *charge,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryAtom {
    pub base: Atom,
    pub pattern: AtomPattern,
}

impl QueryAtom {
    pub fn new(pattern: AtomPattern) -> Self {
        Self {
            base: Atom::new(Element::C),
            pattern,
        }
    }

    pub fn matches(&self, atom: &Atom) -> bool {
        self.pattern.matches(atom)
    }
}

/// Atom annotated with macromolecular record context (residue, chain).
#[derive(Debug, Clone, PartialEq)]
pub struct RecordAtom {
    pub base: Atom,
    pub residue: AtomResidueInfo,
}

impl RecordAtom {
    pub fn new(base: Atom, residue: AtomResidueInfo) -> Self {
        Self { base, residue }
    }
}
