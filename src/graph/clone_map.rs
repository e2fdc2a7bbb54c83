//! Identity-preserving structural cloning.
//!
//! Cloning rebuilds the container in strict dependency order — atoms, bonds,
//! electron entries, stereo descriptors, substructure groups — recording
//! every original→clone pair in an explicit [`IdentityMap`] and relinking all
//! cross-references through it. Later entity kinds may reference earlier
//! ones, so a map miss during relinking means the order was violated: that is
//! a programming error and panics rather than silently substituting a
//! default.
//!
//! Aggregating containers (reaction sets, multi-structure sequences) clone
//! nested structures through [`Molecule::clone_into`] with one shared map, so
//! references across member structures stay consistent.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::container::{Molecule, SubstructureGroup};
use super::handle::{AtomRef, BondRef};

/// Original-entity → clone-entity mapping, keyed on unwrapped payload
/// identity.
#[derive(Default)]
pub struct IdentityMap {
    atoms: FxHashMap<usize, AtomRef>,
    bonds: FxHashMap<usize, BondRef>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The clone recorded for `original`, if any.
    pub fn atom(&self, original: &AtomRef) -> Option<AtomRef> {
        self.atoms.get(&original.identity()).cloned()
    }

    /// The clone recorded for `original`, if any.
    pub fn bond(&self, original: &BondRef) -> Option<BondRef> {
        self.bonds.get(&original.identity()).cloned()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub(crate) fn record_atom(&mut self, original: &AtomRef, clone: AtomRef) {
        self.atoms.insert(original.identity(), clone);
    }

    pub(crate) fn record_bond(&mut self, original: &BondRef, clone: BondRef) {
        self.bonds.insert(original.identity(), clone);
    }

    /// Relink lookup that must succeed; a miss is a broken dependency-order
    /// invariant, never a recoverable condition.
    pub(crate) fn mapped_atom(&self, original: &AtomRef) -> AtomRef {
        match self.atom(original) {
            Some(clone) => clone,
            None => panic!(
                "identity map has no clone for an atom; \
                 entities must be cloned in dependency order"
            ),
        }
    }

    /// See [`IdentityMap::mapped_atom`].
    pub(crate) fn mapped_bond(&self, original: &BondRef) -> BondRef {
        match self.bond(original) {
            Some(clone) => clone,
            None => panic!(
                "identity map has no clone for a bond; \
                 entities must be cloned in dependency order"
            ),
        }
    }
}

impl std::fmt::Debug for IdentityMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityMap")
            .field("atoms", &self.atoms.len())
            .field("bonds", &self.bonds.len())
            .finish()
    }
}

impl SubstructureGroup {
    pub(crate) fn remap(&self, map: &IdentityMap) -> SubstructureGroup {
        SubstructureGroup {
            name: self.name.clone(),
            atoms: self.atoms.iter().map(|a| map.mapped_atom(a)).collect(),
            bonds: self.bonds.iter().map(|b| map.mapped_bond(b)).collect(),
        }
    }
}

impl Molecule {
    /// Structurally isomorphic deep clone plus the identity map relating the
    /// two containers.
    pub fn clone_mapped(&self) -> (Molecule, IdentityMap) {
        let mut map = IdentityMap::new();
        let clone = self.clone_into(&mut map);
        (clone, map)
    }

    /// Deep clone recording into a caller-supplied map, so composite
    /// containers can thread one map through every nested clone.
    pub fn clone_into(&self, map: &mut IdentityMap) -> Molecule {
        self.copy_structure(map, true)
    }

    /// Shallow structural copy: fresh topology over the *same* payload
    /// identities. Mutating a shared payload is visible in both containers;
    /// mutating either container's topology is not.
    pub fn shallow_copy(&self) -> Molecule {
        let mut map = IdentityMap::new();
        self.copy_structure(&mut map, false)
    }

    fn copy_structure(&self, map: &mut IdentityMap, deep: bool) -> Molecule {
        let mut out =
            Molecule::with_mode_and_capacity(self.is_notifying(), self.atoms.len(), self.bonds.len());

        // Atoms first: everything later references them through the map.
        let mut atoms = Vec::with_capacity(self.atoms.len());
        for atom in &self.atoms {
            let payload = if deep {
                atom.inner.payload.deep_clone()
            } else {
                atom.inner.payload.share()
            };
            let clone = AtomRef::from_payload(payload);
            map.record_atom(atom, clone.clone());
            atoms.push(clone);
        }
        out.install_atoms(atoms);

        let mut bonds = Vec::with_capacity(self.bonds.len());
        for bond in &self.bonds {
            let payload = if deep {
                bond.inner.payload.deep_clone()
            } else {
                bond.inner.payload.share()
            };
            let endpoints: SmallVec<[AtomRef; 2]> = bond
                .inner
                .endpoints
                .borrow()
                .iter()
                .map(|endpoint| map.mapped_atom(endpoint))
                .collect();
            let clone = BondRef::from_parts(payload, endpoints);
            map.record_bond(bond, clone.clone());
            bonds.push(clone);
        }
        out.install_bonds(bonds);

        for lone_pair in &self.lone_pairs {
            let bound = lone_pair.atom().map(|a| map.mapped_atom(&a));
            out.install_lone_pair(bound);
        }
        for single in &self.single_electrons {
            let bound = single.atom().map(|a| map.mapped_atom(&a));
            out.install_single_electron(bound);
        }

        // Descriptors last: they may reference both atoms and bonds.
        for descriptor in &self.stereo {
            out.stereo.push(descriptor.remap_strict(map));
        }
        for group in &self.groups {
            out.groups.push(group.remap(map));
        }

        out
    }

    /// Adjacency-free bulk install used by the clone pipeline; the following
    /// [`Molecule::install_bonds`] pass wires all incident lists at once.
    pub(crate) fn install_atoms(&mut self, atoms: Vec<AtomRef>) {
        for (index, atom) in atoms.iter().enumerate() {
            atom.set_owner(&self.core, index);
            self.lookup.insert(atom.identity(), index);
        }
        self.atoms = atoms;
    }

    pub(crate) fn install_bonds(&mut self, bonds: Vec<BondRef>) {
        for (index, bond) in bonds.iter().enumerate() {
            bond.set_owner(&self.core, index);
            for endpoint in bond.inner.endpoints.borrow().iter() {
                endpoint.inner.attach(bond);
            }
        }
        self.bonds = bonds;
    }
}

impl Clone for Molecule {
    /// Deep structural clone; use [`Molecule::clone_mapped`] when the
    /// identity map is needed.
    fn clone(&self) -> Self {
        self.clone_mapped().0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::stereo::{StereoDescriptor, Winding};
    use crate::model::atom::{Atom, PseudoAtom};
    use crate::model::bond::Bond;
    use crate::model::types::{BondOrder, Element};

    fn sample() -> Molecule {
        let mut mol = Molecule::new();
        let c1 = mol.add_atom(Atom::new(Element::C));
        let c2 = mol.add_atom(Atom::new(Element::C));
        let o = mol.add_atom(Atom::new(Element::O));
        let r = mol.add_atom(PseudoAtom::new("R1"));
        mol.add_bond(&c1, &c2, Bond::new(BondOrder::Single)).unwrap();
        mol.add_bond(&c2, &o, Bond::new(BondOrder::Double)).unwrap();
        mol.add_bond(&c2, &r, Bond::new(BondOrder::Single)).unwrap();
        mol.add_lone_pair(Some(&o)).unwrap();
        mol.add_single_electron(None).unwrap();
        mol
    }

    #[test]
    fn clone_is_isomorphic_and_disjoint() {
        let original = sample();
        let (clone, map) = original.clone_mapped();

        assert_eq!(clone.atom_count(), original.atom_count());
        assert_eq!(clone.bond_count(), original.bond_count());
        assert_eq!(clone.lone_pair_count(), original.lone_pair_count());
        assert_eq!(clone.single_electron_count(), original.single_electron_count());

        for (a, b) in original.atoms().iter().zip(clone.atoms()) {
            assert_eq!(original.degree(a).unwrap(), clone.degree(b).unwrap());
            assert_eq!(a.element(), b.element());
            assert_eq!(a.kind(), b.kind());
            // Fresh identities throughout.
            assert_ne!(a, b);
            assert!(!original.contains_atom(b));
            assert!(!clone.contains_atom(a));
            assert_eq!(map.atom(a).unwrap(), *b);
        }
        for (a, b) in original.bonds().iter().zip(clone.bonds()) {
            assert_ne!(a, b);
            assert_eq!(a.order(), b.order());
            assert_eq!(map.bond(a).unwrap(), *b);
        }
        assert_eq!(map.atom_count(), 4);
        assert_eq!(map.bond_count(), 3);
    }

    #[test]
    fn clone_relinks_endpoints_to_cloned_atoms() {
        let original = sample();
        let (clone, _) = original.clone_mapped();

        // clone.bonds[0].begin is identity-equal to clone.atoms[0] and
        // identity-unequal to original.atoms[0].
        let begin = clone.bonds()[0].begin();
        assert_eq!(begin, clone.atoms()[0]);
        assert_ne!(begin, original.atoms()[0]);
        assert_eq!(clone.index_of_atom(&begin), Some(0));
    }

    #[test]
    fn clone_relinks_electron_bindings() {
        let original = sample();
        let (clone, map) = original.clone_mapped();

        let original_bound = original.lone_pairs()[0].atom().unwrap();
        let cloned_bound = clone.lone_pairs()[0].atom().unwrap();
        assert_eq!(cloned_bound, map.atom(&original_bound).unwrap());
        assert!(clone.contains_atom(&cloned_bound));
        assert_eq!(clone.single_electrons()[0].atom(), None);
    }

    #[test]
    fn clone_preserves_pseudo_payload_kind() {
        let original = sample();
        let (clone, _) = original.clone_mapped();
        let pseudo = &clone.atoms()[3];
        assert_eq!(pseudo.label(), Some("R1".to_string()));
        // Payloads are fresh: renaming the clone leaves the original alone.
        assert_ne!(pseudo, &original.atoms()[3]);
    }

    #[test]
    fn clone_carries_stereo_through_the_map() {
        let mut original = Molecule::new();
        let center = original.add_atom(Atom::new(Element::C));
        let mut neighbors = Vec::new();
        for element in [Element::F, Element::Cl, Element::Br, Element::I] {
            let n = original.add_atom(Atom::new(element));
            original.add_bond(&center, &n, Bond::default()).unwrap();
            neighbors.push(n);
        }
        original.add_stereo(
            StereoDescriptor::tetrahedral(&center, Winding::Clockwise, &neighbors).unwrap(),
        );

        let (clone, map) = original.clone_mapped();
        assert_eq!(clone.stereo_count(), 1);
        let descriptor = &clone.stereo_descriptors()[0];
        assert!(descriptor.references_atom(&map.atom(&center).unwrap()));
        assert!(!descriptor.references_atom(&center));
    }

    #[test]
    fn clone_remaps_groups() {
        let mut original = sample();
        let a = original.atom(0).unwrap();
        let bond = original.bond(0).unwrap();
        let mut group = crate::graph::container::SubstructureGroup::new("fragment");
        group.add_atom(a.clone());
        group.add_bond(bond.clone());
        original.add_group(group).unwrap();

        let (clone, map) = original.clone_mapped();
        let cloned_group = &clone.groups()[0];
        assert_eq!(cloned_group.name, "fragment");
        assert_eq!(cloned_group.atoms()[0], map.atom(&a).unwrap());
        assert_eq!(cloned_group.bonds()[0], map.bond(&bond).unwrap());
    }

    #[test]
    fn shallow_copy_shares_payloads_but_not_topology() {
        let original = sample();
        let copy = original.shallow_copy();

        // Same payload identities: handles compare equal across containers.
        assert_eq!(original.atoms()[0], copy.atoms()[0]);

        // Payload mutation through the copy is visible in the original.
        copy.atoms()[0].set_formal_charge(1);
        assert_eq!(original.atoms()[0].formal_charge(), 1);

        // Topology mutation is not shared.
        let mut copy = copy;
        assert!(copy.remove_atom_at(0));
        assert_eq!(copy.atom_count(), 3);
        assert_eq!(original.atom_count(), 4);
        assert_eq!(original.bond_count(), 3);
        assert_eq!(original.degree(&original.atoms()[0]).unwrap(), 1);
    }

    #[test]
    fn clone_trait_discards_the_map() {
        let original = sample();
        let clone = original.clone();
        assert_eq!(clone.atom_count(), original.atom_count());
        assert_ne!(clone.atoms()[0], original.atoms()[0]);
    }

    #[test]
    fn shared_map_threads_across_containers() {
        let mut first = Molecule::new();
        let shared = first.add_atom(Atom::new(Element::C));

        let mut second = Molecule::new();
        second.add_atom(&shared);
        second.add_atom(Atom::new(Element::O));

        let mut map = IdentityMap::new();
        let first_clone = first.clone_into(&mut map);
        let second_clone = second.clone_into(&mut map);

        // The wrapper in `second` unwraps to the same payload as `shared`,
        // so the second clone pass reuses the recorded mapping lookup space
        // while still producing its own container.
        assert_eq!(first_clone.atom_count(), 1);
        assert_eq!(second_clone.atom_count(), 2);
        assert!(map.atom(&shared).is_some());
    }

    #[test]
    fn cloning_preserves_the_notify_mode() {
        let silent = Molecule::new();
        assert!(!silent.clone().is_notifying());
        let notifying = Molecule::notifying();
        assert!(notifying.clone().is_notifying());
    }
}
