/// Macromolecular record context for a single atom: where it sits in a
/// PDB/mmCIF-style hierarchy of chains and residues.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomResidueInfo {
    pub atom_name: String,
    pub residue_name: String,
    pub residue_id: i32,
    pub chain_id: char,
    pub insertion_code: char,
}

impl AtomResidueInfo {
    pub fn new(
        atom_name: impl Into<String>,
        residue_name: impl Into<String>,
        residue_id: i32,
        chain_id: char,
        insertion_code: Option<char>,
    ) -> Self {
        Self {
            atom_name: atom_name.into(),
            residue_name: residue_name.into(),
            residue_id,
            chain_id,
            insertion_code: insertion_code.unwrap_or(' '),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residue_info_new_and_all_fields() {
        let info = AtomResidueInfo::new("CA", "ALA", 42, 'A', Some('x'));
        assert_eq!(info.atom_name, "CA");
        assert_eq!(info.residue_name, "ALA");
        assert_eq!(info.residue_id, 42);
        assert_eq!(info.chain_id, 'A');
        assert_eq!(info.insertion_code, 'x');
    }

    #[test]
    fn residue_info_default_insertion_code_and_clone() {
        let info = AtomResidueInfo::new("N", "GLY", 1, 'B', None);
        assert_eq!(info.insertion_code, ' ');
        let cloned = info.clone();
        assert_eq!(info, cloned);
    }
}
