use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(pub(crate) String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid bond order string: '{0}'")]
pub struct ParseBondOrderError(pub(crate) String);

macro_rules! elements {
    ($($name:ident = $num:literal $sym:literal),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Element {
            $($name = $num,)+
        }

        impl Element {
            #[inline]
            pub fn atomic_number(&self) -> u8 {
                *self as u8
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Element::$name => $sym,)+
                }
            }

            pub fn from_atomic_number(number: u8) -> Option<Element> {
                match number {
                    $($num => Some(Element::$name),)+
                    _ => None,
                }
            }
        }

        impl FromStr for Element {
            type Err = ParseElementError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($sym => Ok(Element::$name),)+
                    _ => Err(ParseElementError(s.to_string())),
                }
            }
        }
    };
}

elements! {
    H = 1 "H", He = 2 "He", Li = 3 "Li", Be = 4 "Be", B = 5 "B",
    C = 6 "C", N = 7 "N", O = 8 "O", F = 9 "F", Ne = 10 "Ne",
    Na = 11 "Na", Mg = 12 "Mg", Al = 13 "Al", Si = 14 "Si", P = 15 "P",
    S = 16 "S", Cl = 17 "Cl", Ar = 18 "Ar", K = 19 "K", Ca = 20 "Ca",
    Sc = 21 "Sc", Ti = 22 "Ti", V = 23 "V", Cr = 24 "Cr", Mn = 25 "Mn",
    Fe = 26 "Fe", Co = 27 "Co", Ni = 28 "Ni", Cu = 29 "Cu", Zn = 30 "Zn",
    Ga = 31 "Ga", Ge = 32 "Ge", As = 33 "As", Se = 34 "Se", Br = 35 "Br",
    Kr = 36 "Kr", Rb = 37 "Rb", Sr = 38 "Sr", Y = 39 "Y", Zr = 40 "Zr",
    Nb = 41 "Nb", Mo = 42 "Mo", Tc = 43 "Tc", Ru = 44 "Ru", Rh = 45 "Rh",
    Pd = 46 "Pd", Ag = 47 "Ag", Cd = 48 "Cd", In = 49 "In", Sn = 50 "Sn",
    Sb = 51 "Sb", Te = 52 "Te", I = 53 "I", Xe = 54 "Xe", Cs = 55 "Cs",
    Ba = 56 "Ba", La = 57 "La", Ce = 58 "Ce", Pr = 59 "Pr", Nd = 60 "Nd",
    Pm = 61 "Pm", Sm = 62 "Sm", Eu = 63 "Eu", Gd = 64 "Gd", Tb = 65 "Tb",
    Dy = 66 "Dy", Ho = 67 "Ho", Er = 68 "Er", Tm = 69 "Tm", Yb = 70 "Yb",
    Lu = 71 "Lu", Hf = 72 "Hf", Ta = 73 "Ta", W = 74 "W", Re = 75 "Re",
    Os = 76 "Os", Ir = 77 "Ir", Pt = 78 "Pt", Au = 79 "Au", Hg = 80 "Hg",
    Tl = 81 "Tl", Pb = 82 "Pb", Bi = 83 "Bi", Po = 84 "Po", At = 85 "At",
    Rn = 86 "Rn", Fr = 87 "Fr", Ra = 88 "Ra", Ac = 89 "Ac", Th = 90 "Th",
    Pa = 91 "Pa", U = 92 "U", Np = 93 "Np", Pu = 94 "Pu", Am = 95 "Am",
    Cm = 96 "Cm", Bk = 97 "Bk", Cf = 98 "Cf", Es = 99 "Es", Fm = 100 "Fm",
    Md = 101 "Md", No = 102 "No", Lr = 103 "Lr", Rf = 104 "Rf", Db = 105 "Db",
    Sg = 106 "Sg", Bh = 107 "Bh", Hs = 108 "Hs", Mt = 109 "Mt", Ds = 110 "Ds",
    Rg = 111 "Rg", Cn = 112 "Cn", Nh = 113 "Nh", Fl = 114 "Fl", Mc = 115 "Mc",
    Lv = 116 "Lv", Ts = 117 "Ts", Og = 118 "Og",
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Integral bond multiplicity. Aromaticity is not an order; it is carried as
/// an explicit flag on [`Bond`](super::bond::Bond).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
}

impl BondOrder {
    #[inline]
    pub fn numeric(&self) -> u32 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quadruple => 4,
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondOrder::Single => write!(f, "Single"),
            BondOrder::Double => write!(f, "Double"),
            BondOrder::Triple => write!(f, "Triple"),
            BondOrder::Quadruple => write!(f, "Quadruple"),
        }
    }
}

impl FromStr for BondOrder {
    type Err = ParseBondOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "1" => Ok(BondOrder::Single),
            "double" | "2" => Ok(BondOrder::Double),
            "triple" | "3" => Ok(BondOrder::Triple),
            "quadruple" | "4" => Ok(BondOrder::Quadruple),
            _ => Err(ParseBondOrderError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn element_from_str_valid() {
        assert_eq!(Element::from_str("H").unwrap(), Element::H);
        assert_eq!(Element::from_str("Cl").unwrap(), Element::Cl);
        assert_eq!(Element::from_str("Fe").unwrap(), Element::Fe);
        assert_eq!(Element::from_str("Og").unwrap(), Element::Og);
    }

    #[test]
    fn element_from_str_is_case_sensitive() {
        let err = Element::from_str("h").unwrap_err();
        assert_eq!(
            format!("{}", err),
            "invalid or unsupported element symbol: 'h'"
        );
    }

    #[test]
    fn element_symbol_display_and_atomic_number() {
        assert_eq!(Element::Na.symbol(), "Na");
        assert_eq!(Element::Na.to_string(), "Na");
        assert_eq!(Element::Na.atomic_number(), 11u8);
        assert_eq!(Element::C.atomic_number(), 6u8);
    }

    #[test]
    fn element_atomic_number_round_trip() {
        assert_eq!(Element::from_atomic_number(1), Some(Element::H));
        assert_eq!(Element::from_atomic_number(26), Some(Element::Fe));
        assert_eq!(Element::from_atomic_number(118), Some(Element::Og));
        assert_eq!(Element::from_atomic_number(0), None);
        assert_eq!(Element::from_atomic_number(119), None);
    }

    #[test]
    fn bondorder_from_str_variants() {
        assert_eq!(BondOrder::from_str("single").unwrap(), BondOrder::Single);
        assert_eq!(BondOrder::from_str("1").unwrap(), BondOrder::Single);
        assert_eq!(BondOrder::from_str("Double").unwrap(), BondOrder::Double);
        assert_eq!(BondOrder::from_str("3").unwrap(), BondOrder::Triple);
        assert_eq!(
            BondOrder::from_str("quadruple").unwrap(),
            BondOrder::Quadruple
        );
    }

    #[test]
    fn bondorder_from_str_invalid() {
        let err = BondOrder::from_str("aromatic").unwrap_err();
        assert_eq!(format!("{}", err), "invalid bond order string: 'aromatic'");
    }

    #[test]
    fn bondorder_numeric_and_ordering() {
        assert_eq!(BondOrder::Single.numeric(), 1);
        assert_eq!(BondOrder::Double.numeric(), 2);
        assert_eq!(BondOrder::Triple.numeric(), 3);
        assert_eq!(BondOrder::Quadruple.numeric(), 4);
        assert!(BondOrder::Single < BondOrder::Double);
        assert!(BondOrder::Triple < BondOrder::Quadruple);
    }
}
