//! The mutable molecular graph container.
//!
//! [`Molecule`] owns an ordered atom table and an ordered bond table, both
//! densely indexed: an entity's `index()` always equals its position, after
//! every completed mutation. Adjacency lives in per-atom incident caches
//! maintained as a side effect of bond insertion and removal; neighbor
//! queries never scan the whole bond table.
//!
//! Mutations cascade to keep the auxiliary stores consistent: removing an
//! atom removes its incident bonds, the electron entries bound to it, every
//! stereo descriptor whose focus or carriers touch it (or any bond removed
//! with it), and its substructure-group references.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::electrons::{LonePairRef, SingleElectronRef};
use super::error::GraphError;
use super::handle::{AtomPayload, AtomRef, AtomSeed, BondPayload, BondRef};
use super::notify::{ChangeEvent, ChangeKind, ChangeListener, ContainerCore};
use super::stereo::StereoDescriptor;
use crate::model::bond::Bond;
use crate::model::types::BondOrder;

/// Named annotation over a subset of a container's atoms and bonds.
///
/// Groups are pruned when their members are removed and remapped through the
/// identity map when the container is cloned.
#[derive(Debug, Clone, Default)]
pub struct SubstructureGroup {
    pub name: String,
    pub(crate) atoms: Vec<AtomRef>,
    pub(crate) bonds: Vec<BondRef>,
}

impl SubstructureGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            atoms: Vec::new(),
            bonds: Vec::new(),
        }
    }

    pub fn add_atom(&mut self, atom: AtomRef) {
        if !self.atoms.contains(&atom) {
            self.atoms.push(atom);
        }
    }

    pub fn add_bond(&mut self, bond: BondRef) {
        if !self.bonds.contains(&bond) {
            self.bonds.push(bond);
        }
    }

    pub fn atoms(&self) -> &[AtomRef] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[BondRef] {
        &self.bonds
    }

    pub(crate) fn replace_atom(&mut self, old: &AtomRef, new: &AtomRef) {
        for a in self.atoms.iter_mut() {
            if a == old {
                *a = new.clone();
            }
        }
    }

    pub(crate) fn remove_atom(&mut self, atom: &AtomRef) {
        self.atoms.retain(|a| a != atom);
    }

    pub(crate) fn remove_bond(&mut self, bond: &BondRef) {
        self.bonds.retain(|b| b != bond);
    }
}

enum Wrapped {
    /// An identity-equal atom is already in the table.
    Existing(AtomRef),
    /// A fresh (or adopted) node ready to install.
    New(AtomRef),
}

/// In-memory, mutable molecular graph.
///
/// Constructed silent ([`Molecule::new`]) or notifying
/// ([`Molecule::notifying`]); the two variants share every structural
/// behavior and differ only in listener bookkeeping. Not `Send`/`Sync`:
/// concurrent callers serialize externally.
pub struct Molecule {
    pub(crate) core: Rc<ContainerCore>,
    pub(crate) atoms: Vec<AtomRef>,
    pub(crate) bonds: Vec<BondRef>,
    pub(crate) lone_pairs: Vec<LonePairRef>,
    pub(crate) single_electrons: Vec<SingleElectronRef>,
    pub(crate) stereo: Vec<StereoDescriptor>,
    pub(crate) groups: Vec<SubstructureGroup>,
    /// Terminal payload identity -> atom table position. Keeps `add_atom`'s
    /// duplicate check and `index_of_atom` O(1).
    pub(crate) lookup: FxHashMap<usize, usize>,
}

impl Molecule {
    /// Empty silent container.
    pub fn new() -> Self {
        Self::with_mode(false)
    }

    /// Empty notifying container; structural mutations broadcast one
    /// [`ChangeEvent`](super::notify::ChangeEvent) each.
    pub fn notifying() -> Self {
        Self::with_mode(true)
    }

    pub(crate) fn with_mode(notifying: bool) -> Self {
        Self {
            core: ContainerCore::new(notifying),
            atoms: Vec::new(),
            bonds: Vec::new(),
            lone_pairs: Vec::new(),
            single_electrons: Vec::new(),
            stereo: Vec::new(),
            groups: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    pub(crate) fn with_mode_and_capacity(notifying: bool, atoms: usize, bonds: usize) -> Self {
        let mut mol = Self::with_mode(notifying);
        mol.atoms.reserve(atoms);
        mol.bonds.reserve(bonds);
        mol.lookup.reserve(atoms);
        mol
    }

    #[inline]
    pub fn is_notifying(&self) -> bool {
        self.core.is_notifying()
    }

    pub fn add_listener(&self, listener: &Rc<dyn ChangeListener>) {
        self.core.add_listener(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn ChangeListener>) {
        self.core.remove_listener(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.core.listener_count()
    }

    pub(crate) fn changed(&self, kind: ChangeKind) {
        self.core.notify(ChangeEvent { kind });
    }

    // ---- atom table ------------------------------------------------------

    /// Adds an atom, wrapping the seed in its narrowest payload kind.
    ///
    /// If an identity-equal atom is already present the call is a no-op
    /// returning the existing handle. A handle owned by another container is
    /// wrapped (nested); an unowned handle is adopted as-is.
    pub fn add_atom(&mut self, seed: impl Into<AtomSeed>) -> AtomRef {
        match self.wrap_atom(seed.into()) {
            Wrapped::Existing(handle) => handle,
            Wrapped::New(handle) => {
                let index = self.atoms.len();
                handle.set_owner(&self.core, index);
                self.lookup.insert(handle.identity(), index);
                self.atoms.push(handle.clone());
                self.changed(ChangeKind::Atoms);
                handle
            }
        }
    }

    /// Replaces the atom at `index`, rewiring every incident bond endpoint,
    /// electron entry, stereo descriptor (clone-and-replace, never in-place),
    /// and group reference from the old atom to the new one. The old atom's
    /// incident list transfers wholesale, so bond identities and indices are
    /// untouched.
    pub fn set_atom(&mut self, index: usize, seed: impl Into<AtomSeed>) -> Result<AtomRef, GraphError> {
        if index >= self.atoms.len() {
            return Err(GraphError::out_of_range(index, self.atoms.len()));
        }
        let replacement = match self.wrap_atom(seed.into()) {
            Wrapped::Existing(handle) => {
                let position = self.lookup[&handle.identity()];
                if position == index {
                    return Ok(handle);
                }
                return Err(GraphError::DuplicateEntity { index: position });
            }
            Wrapped::New(handle) => handle,
        };
        let old = self.atoms[index].clone();

        {
            let moved = std::mem::take(&mut *old.inner.incident.borrow_mut());
            *replacement.inner.incident.borrow_mut() = moved;
        }
        for bond in replacement.inner.incident_bonds() {
            let mut endpoints = bond.inner.endpoints.borrow_mut();
            for endpoint in endpoints.iter_mut() {
                if *endpoint == old {
                    *endpoint = replacement.clone();
                }
            }
        }
        for lone_pair in &self.lone_pairs {
            lone_pair.replace_atom(&old, &replacement);
        }
        for single in &self.single_electrons {
            single.replace_atom(&old, &replacement);
        }
        self.relink_stereo_atom(&old, &replacement);
        for group in &mut self.groups {
            group.replace_atom(&old, &replacement);
        }

        self.lookup.remove(&old.identity());
        self.lookup.insert(replacement.identity(), index);
        replacement.set_owner(&self.core, index);
        self.atoms[index] = replacement.clone();
        old.clear_owner();
        self.changed(ChangeKind::Atoms);
        Ok(replacement)
    }

    /// Removes the atom at `index` with the full cascade: incident bonds,
    /// electron entries bound to the atom, stereo descriptors touching the
    /// atom or any removed bond, and group references. Trailing atoms shift
    /// left and are reindexed. Returns `false` when `index` is out of range.
    pub fn remove_atom_at(&mut self, index: usize) -> bool {
        if index >= self.atoms.len() {
            return false;
        }
        let atom = self.atoms[index].clone();
        let doomed = atom.inner.incident_bonds();

        for bond in &doomed {
            for endpoint in bond.endpoints() {
                endpoint.inner.detach(bond);
            }
            bond.clear_owner();
        }
        if !doomed.is_empty() {
            self.bonds.retain(|b| !doomed.iter().any(|d| d.same_node(b)));
            for (i, bond) in self.bonds.iter().enumerate() {
                bond.inner.index.set(i);
            }
        }

        self.drop_electrons_for(&atom);
        self.stereo.retain(|descriptor| {
            !descriptor.references_atom(&atom)
                && !doomed.iter().any(|bond| descriptor.references_bond(bond))
        });
        for group in &mut self.groups {
            group.remove_atom(&atom);
            for bond in &doomed {
                group.remove_bond(bond);
            }
        }

        self.lookup.remove(&atom.identity());
        self.atoms.remove(index);
        atom.clear_owner();
        for i in index..self.atoms.len() {
            let shifted = self.atoms[i].clone();
            shifted.inner.index.set(i);
            self.lookup.insert(shifted.identity(), i);
        }
        self.changed(ChangeKind::Atoms);
        true
    }

    /// Identity-based removal; idempotent (`false` = nothing removed).
    pub fn remove_atom(&mut self, atom: &AtomRef) -> bool {
        match self.lookup.get(&atom.identity()).copied() {
            Some(index) => self.remove_atom_at(index),
            None => false,
        }
    }

    /// Detaches every atom and empties the table. Bonds are *not* cascaded:
    /// callers clearing a whole container use [`Molecule::clear`] instead.
    pub fn clear_atoms(&mut self) {
        for atom in &self.atoms {
            atom.clear_owner();
        }
        self.atoms.clear();
        self.lookup.clear();
        self.changed(ChangeKind::Atoms);
    }

    /// Bulk table replacement. Adjacency rebuilding is deferred to the next
    /// [`Molecule::set_bonds`] call (every installed atom starts with an
    /// empty incident list); the clone engine relies on this split.
    pub fn set_atoms<I, S>(&mut self, seeds: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<AtomSeed>,
    {
        let mut handles: Vec<AtomRef> = Vec::new();
        let mut seen: FxHashMap<usize, usize> = FxHashMap::default();
        for (i, seed) in seeds.into_iter().enumerate() {
            let handle = match self.wrap_atom(seed.into()) {
                Wrapped::Existing(handle) => handle,
                Wrapped::New(handle) => handle,
            };
            if let Some(previous) = seen.insert(handle.identity(), i) {
                return Err(GraphError::DuplicateEntity { index: previous });
            }
            handles.push(handle);
        }

        for atom in &self.atoms {
            if !handles.iter().any(|h| h.same_node(atom)) {
                atom.clear_owner();
            }
        }
        self.atoms.clear();
        self.lookup.clear();
        for (i, handle) in handles.iter().enumerate() {
            handle.set_owner(&self.core, i);
            handle.inner.incident.borrow_mut().clear();
            self.lookup.insert(handle.identity(), i);
        }
        self.atoms = handles;
        self.changed(ChangeKind::Atoms);
        Ok(())
    }

    pub fn atom(&self, index: usize) -> Option<AtomRef> {
        self.atoms.get(index).cloned()
    }

    pub fn atoms(&self) -> &[AtomRef] {
        &self.atoms
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Membership on unwrapped payload identity: a foreign wrapper of a
    /// member atom is contained.
    pub fn contains_atom(&self, atom: &AtomRef) -> bool {
        self.lookup.contains_key(&atom.identity())
    }

    pub fn index_of_atom(&self, atom: &AtomRef) -> Option<usize> {
        self.lookup.get(&atom.identity()).copied()
    }

    /// This container's own handle for any identity-equal reference.
    pub(crate) fn local_atom(&self, atom: &AtomRef) -> Option<AtomRef> {
        self.lookup
            .get(&atom.identity())
            .map(|&index| self.atoms[index].clone())
    }

    fn wrap_atom(&self, seed: AtomSeed) -> Wrapped {
        match seed {
            AtomSeed::Ref(handle) => {
                if let Some(&position) = self.lookup.get(&handle.identity()) {
                    return Wrapped::Existing(self.atoms[position].clone());
                }
                if handle.inner.owner.borrow().strong_count() == 0 {
                    Wrapped::New(handle)
                } else {
                    Wrapped::New(AtomRef::from_payload(AtomPayload::Nested(handle)))
                }
            }
            value => Wrapped::New(AtomRef::from_payload(value.into_payload())),
        }
    }

    // ---- bond table ------------------------------------------------------

    /// Adds a binary bond between two member atoms.
    pub fn add_bond(
        &mut self,
        begin: &AtomRef,
        end: &AtomRef,
        bond: Bond,
    ) -> Result<BondRef, GraphError> {
        self.add_multi_bond(&[begin.clone(), end.clone()], bond)
    }

    /// Adds a bond over 2..n member atoms (multi-center bonding).
    ///
    /// Every endpoint must already be a member of the atom table
    /// ([`GraphError::UnknownEndpoint`]); bonds never adopt foreign atoms.
    pub fn add_multi_bond(
        &mut self,
        endpoints: &[AtomRef],
        bond: Bond,
    ) -> Result<BondRef, GraphError> {
        let resolved = self.resolve_endpoints(endpoints)?;
        let handle = BondRef::from_parts(
            BondPayload::Plain(Rc::new(RefCell::new(bond))),
            resolved,
        );
        self.install_bond(handle.clone());
        Ok(handle)
    }

    /// Positional convenience for parsers: bond the atoms at `i` and `j`.
    pub fn add_bond_between(
        &mut self,
        i: usize,
        j: usize,
        order: BondOrder,
    ) -> Result<BondRef, GraphError> {
        let begin = self
            .atom(i)
            .ok_or_else(|| GraphError::out_of_range(i, self.atoms.len()))?;
        let end = self
            .atom(j)
            .ok_or_else(|| GraphError::out_of_range(j, self.atoms.len()))?;
        self.add_bond(&begin, &end, Bond::new(order))
    }

    /// Adds an already-built bond reference. Re-adding a bond this container
    /// owns is a no-op returning the same handle; an unowned bond is adopted;
    /// a bond owned elsewhere is wrapped. Endpoints are resolved to this
    /// container's local handles by identity.
    pub fn add_bond_ref(&mut self, bond: &BondRef) -> Result<BondRef, GraphError> {
        if bond.is_owned_by(&self.core) {
            return Ok(bond.clone());
        }
        let handle = self.localize_bond(bond)?;
        self.install_bond(handle.clone());
        Ok(handle)
    }

    /// Assigns `atom` into endpoint role `role` of `bond`.
    ///
    /// When the assigned atom already occupies another role of the same bond
    /// the operation is a pure role exchange: endpoint order changes,
    /// adjacency does not. Otherwise the bond detaches from the old
    /// endpoint's incident list and attaches to the new one.
    pub fn set_bond_endpoint(
        &mut self,
        bond: &BondRef,
        role: usize,
        atom: &AtomRef,
    ) -> Result<(), GraphError> {
        let local = self.local_bond(bond).ok_or(GraphError::NotAMember)?;
        let endpoint_count = local.endpoint_count();
        if role >= endpoint_count {
            return Err(GraphError::out_of_range(role, endpoint_count));
        }
        let new_atom = self
            .local_atom(atom)
            .ok_or_else(|| GraphError::unknown_endpoint(role))?;

        let current = local.inner.endpoints.borrow()[role].clone();
        if current == new_atom {
            return Ok(());
        }
        let occupied_role = local
            .inner
            .endpoints
            .borrow()
            .iter()
            .position(|e| *e == new_atom);
        if let Some(other_role) = occupied_role {
            local.inner.endpoints.borrow_mut().swap(role, other_role);
            self.changed(ChangeKind::Bonds);
            return Ok(());
        }

        current.inner.detach(&local);
        new_atom.inner.attach(&local);
        local.inner.endpoints.borrow_mut()[role] = new_atom;
        self.changed(ChangeKind::Bonds);
        Ok(())
    }

    /// Role-0 convenience of [`Molecule::set_bond_endpoint`].
    pub fn set_bond_begin(&mut self, bond: &BondRef, atom: &AtomRef) -> Result<(), GraphError> {
        self.set_bond_endpoint(bond, 0, atom)
    }

    /// Role-1 convenience of [`Molecule::set_bond_endpoint`].
    pub fn set_bond_end(&mut self, bond: &BondRef, atom: &AtomRef) -> Result<(), GraphError> {
        self.set_bond_endpoint(bond, 1, atom)
    }

    /// Removes the bond at `index`: detaches it from every endpoint's
    /// incident list, drops stereo descriptors and group references naming
    /// it, shifts trailing bonds left. Returns the detached handle.
    pub fn remove_bond_at(&mut self, index: usize) -> Option<BondRef> {
        if index >= self.bonds.len() {
            return None;
        }
        let bond = self.bonds.remove(index);
        for endpoint in bond.endpoints() {
            endpoint.inner.detach(&bond);
        }
        self.stereo.retain(|d| !d.references_bond(&bond));
        for group in &mut self.groups {
            group.remove_bond(&bond);
        }
        bond.clear_owner();
        for i in index..self.bonds.len() {
            self.bonds[i].inner.index.set(i);
        }
        self.changed(ChangeKind::Bonds);
        Some(bond)
    }

    /// Identity-based removal; idempotent (`false` = nothing removed).
    pub fn remove_bond(&mut self, bond: &BondRef) -> bool {
        match self.local_bond(bond) {
            Some(local) => self.remove_bond_at(local.inner.index.get()).is_some(),
            None => false,
        }
    }

    /// Resets every atom's incident list and empties the bond table.
    pub fn clear_bonds(&mut self) {
        for atom in &self.atoms {
            atom.inner.incident.borrow_mut().clear();
        }
        for bond in &self.bonds {
            bond.clear_owner();
        }
        self.bonds.clear();
        self.changed(ChangeKind::Bonds);
    }

    /// Bulk bond replacement, rebuilding all adjacency in one pass. Every
    /// bond's endpoints are re-resolved against the current atom table.
    pub fn set_bonds(&mut self, bonds: &[BondRef]) -> Result<(), GraphError> {
        let mut prepared: Vec<BondRef> = Vec::with_capacity(bonds.len());
        for bond in bonds {
            prepared.push(self.localize_bond(bond)?);
        }

        for atom in &self.atoms {
            atom.inner.incident.borrow_mut().clear();
        }
        for bond in &self.bonds {
            if !prepared.iter().any(|p| p.same_node(bond)) {
                bond.clear_owner();
            }
        }
        self.bonds.clear();
        for (i, bond) in prepared.iter().enumerate() {
            bond.set_owner(&self.core, i);
            for endpoint in bond.inner.endpoints.borrow().iter() {
                endpoint.inner.attach(bond);
            }
        }
        self.bonds = prepared;
        self.changed(ChangeKind::Bonds);
        Ok(())
    }

    pub fn bond(&self, index: usize) -> Option<BondRef> {
        self.bonds.get(index).cloned()
    }

    pub fn bonds(&self) -> &[BondRef] {
        &self.bonds
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn contains_bond(&self, bond: &BondRef) -> bool {
        self.local_bond(bond).is_some()
    }

    pub fn index_of_bond(&self, bond: &BondRef) -> Option<usize> {
        self.local_bond(bond).map(|b| b.inner.index.get())
    }

    pub(crate) fn local_bond(&self, bond: &BondRef) -> Option<BondRef> {
        if bond.is_owned_by(&self.core) {
            return Some(bond.clone());
        }
        self.bonds.iter().find(|b| *b == bond).cloned()
    }

    fn resolve_endpoints(
        &self,
        endpoints: &[AtomRef],
    ) -> Result<SmallVec<[AtomRef; 2]>, GraphError> {
        if endpoints.len() < 2 {
            return Err(GraphError::MalformedBond {
                count: endpoints.len(),
            });
        }
        let mut resolved = SmallVec::new();
        for (position, endpoint) in endpoints.iter().enumerate() {
            let local = self
                .local_atom(endpoint)
                .ok_or_else(|| GraphError::unknown_endpoint(position))?;
            resolved.push(local);
        }
        Ok(resolved)
    }

    /// A bond handle whose endpoints are this container's local atom handles:
    /// the bond itself when owned here or unowned (adopted), a nested wrapper
    /// when owned elsewhere.
    fn localize_bond(&self, bond: &BondRef) -> Result<BondRef, GraphError> {
        let resolved = self.resolve_endpoints(&bond.endpoints())?;
        let owned_elsewhere = !bond.is_owned_by(&self.core)
            && bond.inner.owner.borrow().strong_count() > 0;
        if owned_elsewhere {
            Ok(BondRef::from_parts(
                BondPayload::Nested(bond.clone()),
                resolved,
            ))
        } else {
            *bond.inner.endpoints.borrow_mut() = resolved;
            Ok(bond.clone())
        }
    }

    fn install_bond(&mut self, bond: BondRef) {
        let index = self.bonds.len();
        bond.set_owner(&self.core, index);
        for endpoint in bond.inner.endpoints.borrow().iter() {
            endpoint.inner.attach(&bond);
        }
        self.bonds.push(bond);
        self.changed(ChangeKind::Bonds);
    }

    // ---- groups ----------------------------------------------------------

    /// Registers a substructure group; every member must already belong to
    /// this container.
    pub fn add_group(&mut self, group: SubstructureGroup) -> Result<(), GraphError> {
        for atom in &group.atoms {
            if !self.contains_atom(atom) {
                return Err(GraphError::NotAMember);
            }
        }
        for bond in &group.bonds {
            if self.local_bond(bond).is_none() {
                return Err(GraphError::NotAMember);
            }
        }
        self.groups.push(group);
        self.changed(ChangeKind::Groups);
        Ok(())
    }

    pub fn groups(&self) -> &[SubstructureGroup] {
        &self.groups
    }

    pub fn remove_group_at(&mut self, index: usize) -> bool {
        if index >= self.groups.len() {
            return false;
        }
        self.groups.remove(index);
        self.changed(ChangeKind::Groups);
        true
    }

    // ---- whole container -------------------------------------------------

    /// Removes everything: bonds, atoms, electron entries, stereo
    /// descriptors, groups. One notification.
    pub fn clear(&mut self) {
        for bond in &self.bonds {
            bond.clear_owner();
        }
        for atom in &self.atoms {
            atom.clear_owner();
        }
        for lone_pair in &self.lone_pairs {
            lone_pair.clear_owner();
        }
        for single in &self.single_electrons {
            single.clear_owner();
        }
        self.bonds.clear();
        self.atoms.clear();
        self.lookup.clear();
        self.lone_pairs.clear();
        self.single_electrons.clear();
        self.stereo.clear();
        self.groups.clear();
        self.changed(ChangeKind::Cleared);
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
            && self.bonds.is_empty()
            && self.lone_pairs.is_empty()
            && self.single_electrons.is_empty()
            && self.stereo.is_empty()
    }
}

impl Default for Molecule {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Molecule")
            .field("atoms", &self.atoms.len())
            .field("bonds", &self.bonds.len())
            .field("lone_pairs", &self.lone_pairs.len())
            .field("single_electrons", &self.single_electrons.len())
            .field("stereo", &self.stereo.len())
            .field("notifying", &self.is_notifying())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::types::Element;

    fn carbon() -> Atom {
        Atom::new(Element::C)
    }

    fn chain3() -> (Molecule, AtomRef, AtomRef, AtomRef) {
        let mut mol = Molecule::new();
        let a = mol.add_atom(carbon());
        let b = mol.add_atom(carbon());
        let c = mol.add_atom(Atom::new(Element::O));
        mol.add_bond(&a, &b, Bond::new(BondOrder::Single)).unwrap();
        mol.add_bond(&b, &c, Bond::new(BondOrder::Double)).unwrap();
        (mol, a, b, c)
    }

    #[test]
    fn indices_stay_dense_after_mutation() {
        let (mut mol, _, b, _) = chain3();
        assert!(mol.remove_atom(&b));
        for (i, atom) in mol.atoms().iter().enumerate() {
            assert_eq!(atom.index(), Some(i));
        }
        for (i, bond) in mol.bonds().iter().enumerate() {
            assert_eq!(bond.index(), Some(i));
        }
    }

    #[test]
    fn removing_middle_atom_cascades_to_bonds() {
        // [C, C, O] with bonds (0,1,single), (1,2,double): removing atom 1
        // leaves [C, O] reindexed and no bonds.
        let (mut mol, a, _, c) = chain3();
        assert!(mol.remove_atom_at(1));
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.bond_count(), 0);
        assert_eq!(mol.atom(0).unwrap(), a);
        assert_eq!(mol.atom(1).unwrap(), c);
        assert_eq!(a.index(), Some(0));
        assert_eq!(c.index(), Some(1));
        assert_eq!(mol.connected_bonds(&a).unwrap().len(), 0);
    }

    #[test]
    fn remove_is_idempotent() {
        let (mut mol, a, _, _) = chain3();
        assert!(mol.remove_atom(&a));
        assert!(!mol.remove_atom(&a));
        assert!(!mol.remove_atom_at(99));

        let bond = mol.bond(0).unwrap();
        assert!(mol.remove_bond(&bond));
        assert!(!mol.remove_bond(&bond));
        assert!(mol.remove_bond_at(5).is_none());
    }

    #[test]
    fn add_atom_is_idempotent_for_members() {
        let mut mol = Molecule::new();
        let a = mol.add_atom(carbon());
        let again = mol.add_atom(&a);
        assert_eq!(mol.atom_count(), 1);
        assert_eq!(a, again);
    }

    #[test]
    fn foreign_atoms_are_adopted_by_wrapping() {
        let mut donor = Molecule::new();
        let a = donor.add_atom(carbon());

        let mut receiver = Molecule::new();
        let wrapped = receiver.add_atom(&a);
        assert_eq!(wrapped, a);
        assert_eq!(donor.atom_count(), 1);
        assert_eq!(receiver.atom_count(), 1);
        // Re-adding the original handle finds the wrapper: no duplicate.
        let again = receiver.add_atom(&a);
        assert_eq!(receiver.atom_count(), 1);
        assert_eq!(again, wrapped);
    }

    #[test]
    fn bond_requires_member_endpoints() {
        let mut mol = Molecule::new();
        let inside = mol.add_atom(carbon());

        let mut other = Molecule::new();
        let outside = other.add_atom(carbon());

        let err = mol
            .add_bond(&inside, &outside, Bond::default())
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownEndpoint { position: 1 });
        assert_eq!(mol.bond_count(), 0);
    }

    #[test]
    fn set_atom_rewires_bond_endpoint_in_place() {
        let (mut mol, a, _, _) = chain3();
        let bond = mol.bond(0).unwrap();
        assert_eq!(bond.begin(), a);

        let replacement = mol.set_atom(0, Atom::new(Element::N)).unwrap();
        let same_bond = mol.bond(0).unwrap();
        assert!(same_bond.same_node(&bond));
        assert_eq!(same_bond.index(), Some(0));
        assert_eq!(same_bond.begin(), replacement);
        assert_eq!(replacement.index(), Some(0));
        assert_eq!(a.index(), None);
        // Adjacency follows the replacement.
        assert_eq!(mol.connected_bonds(&replacement).unwrap().len(), 1);
        assert!(mol.connected_atoms(&a).is_err());
    }

    #[test]
    fn set_atom_rejects_bad_index_and_duplicates() {
        let (mut mol, a, _, _) = chain3();
        let err = mol.set_atom(9, carbon()).unwrap_err();
        assert_eq!(err, GraphError::IndexOutOfRange { index: 9, len: 3 });

        let err = mol.set_atom(1, &a).unwrap_err();
        assert_eq!(err, GraphError::DuplicateEntity { index: 0 });

        // Replacing an atom with itself is a no-op.
        let same = mol.set_atom(0, &a).unwrap();
        assert_eq!(same, a);
        assert_eq!(mol.atom_count(), 3);
    }

    #[test]
    fn role_exchange_keeps_adjacency() {
        let (mut mol, a, b, _) = chain3();
        let bond = mol.bond(0).unwrap();
        assert_eq!(bond.begin(), a);
        assert_eq!(bond.end(), b);

        // Assigning the current end into role begin is a pure swap.
        mol.set_bond_begin(&bond, &b).unwrap();
        assert_eq!(bond.begin(), b);
        assert_eq!(bond.end(), a);
        assert_eq!(mol.connected_bonds(&a).unwrap().len(), 1);
        assert_eq!(mol.connected_bonds(&b).unwrap().len(), 2);
    }

    #[test]
    fn endpoint_replacement_rewires_adjacency() {
        let (mut mol, a, _, _) = chain3();
        let d = mol.add_atom(Atom::new(Element::N));
        let bond = mol.bond(0).unwrap();

        mol.set_bond_begin(&bond, &d).unwrap();
        assert_eq!(bond.begin(), d);
        assert_eq!(mol.connected_bonds(&a).unwrap().len(), 0);
        assert_eq!(mol.connected_bonds(&d).unwrap().len(), 1);
    }

    #[test]
    fn set_bond_endpoint_validates() {
        let (mut mol, a, _, _) = chain3();
        let bond = mol.bond(0).unwrap();

        let mut other = Molecule::new();
        let foreign = other.add_atom(carbon());
        assert_eq!(
            mol.set_bond_endpoint(&bond, 0, &foreign).unwrap_err(),
            GraphError::UnknownEndpoint { position: 0 }
        );
        assert_eq!(
            mol.set_bond_endpoint(&bond, 7, &a).unwrap_err(),
            GraphError::IndexOutOfRange { index: 7, len: 2 }
        );

        let foreign_bond = BondRef::new(Bond::default(), &[a.clone(), a.clone()]).unwrap();
        assert_eq!(
            other.set_bond_endpoint(&foreign_bond, 0, &foreign).unwrap_err(),
            GraphError::NotAMember
        );
    }

    #[test]
    fn clear_bonds_resets_incident_lists() {
        let (mut mol, a, b, _) = chain3();
        mol.clear_bonds();
        assert_eq!(mol.bond_count(), 0);
        assert_eq!(mol.connected_bonds(&a).unwrap().len(), 0);
        assert_eq!(mol.connected_bonds(&b).unwrap().len(), 0);
        assert_eq!(mol.atom_count(), 3);
    }

    #[test]
    fn clear_empties_everything() {
        let (mut mol, a, _, _) = chain3();
        mol.add_lone_pair(Some(&a)).unwrap();
        mol.clear();
        assert!(mol.is_empty());
        assert_eq!(a.index(), None);
    }

    #[test]
    fn adjacency_symmetry_holds() {
        let (mol, a, b, c) = chain3();
        for bond in mol.bonds() {
            for endpoint in bond.endpoints() {
                let incident = mol.connected_bonds(&endpoint).unwrap();
                assert_eq!(
                    incident.iter().filter(|i| i.same_node(bond)).count(),
                    1,
                    "bond must appear exactly once in each endpoint's incident list"
                );
            }
        }
        assert_eq!(mol.connected_bonds(&a).unwrap().len(), 1);
        assert_eq!(mol.connected_bonds(&b).unwrap().len(), 2);
        assert_eq!(mol.connected_bonds(&c).unwrap().len(), 1);
    }

    #[test]
    fn multi_center_bond_cascade() {
        let mut mol = Molecule::new();
        let b1 = mol.add_atom(Atom::new(Element::B));
        let h = mol.add_atom(Atom::new(Element::H));
        let b2 = mol.add_atom(Atom::new(Element::B));
        let bridge = mol
            .add_multi_bond(&[b1.clone(), h.clone(), b2.clone()], Bond::default())
            .unwrap();
        assert_eq!(bridge.endpoint_count(), 3);
        assert_eq!(mol.connected_atoms(&h).unwrap().len(), 2);

        assert!(mol.remove_atom(&h));
        assert_eq!(mol.bond_count(), 0);
        assert_eq!(mol.connected_bonds(&b1).unwrap().len(), 0);
    }

    #[test]
    fn add_bond_between_positions() {
        let mut mol = Molecule::new();
        mol.add_atom(carbon());
        mol.add_atom(carbon());
        let bond = mol.add_bond_between(0, 1, BondOrder::Triple).unwrap();
        assert_eq!(bond.order(), BondOrder::Triple);
        assert_eq!(
            mol.add_bond_between(0, 4, BondOrder::Single).unwrap_err(),
            GraphError::IndexOutOfRange { index: 4, len: 2 }
        );
    }

    #[test]
    fn set_atoms_then_set_bonds_rebuilds_adjacency() {
        let mut mol = Molecule::new();
        mol.set_atoms(vec![carbon(), carbon(), Atom::new(Element::O)])
            .unwrap();
        assert_eq!(mol.atom_count(), 3);
        let a = mol.atom(0).unwrap();
        let b = mol.atom(1).unwrap();
        let bond = BondRef::new(Bond::default(), &[a.clone(), b.clone()]).unwrap();
        mol.set_bonds(&[bond]).unwrap();
        assert_eq!(mol.bond_count(), 1);
        assert_eq!(mol.connected_atoms(&a).unwrap(), vec![b]);
    }

    #[test]
    fn set_atoms_rejects_duplicates() {
        let mut mol = Molecule::new();
        let a = mol.add_atom(carbon());
        let err = mol.set_atoms(vec![&a, &a]).unwrap_err();
        assert_eq!(err, GraphError::DuplicateEntity { index: 0 });
    }

    #[test]
    fn groups_follow_their_members() {
        let (mut mol, a, b, _) = chain3();
        let bond = mol.bond(0).unwrap();
        let mut group = SubstructureGroup::new("ring");
        group.add_atom(a.clone());
        group.add_atom(b.clone());
        group.add_bond(bond.clone());
        mol.add_group(group).unwrap();

        assert!(mol.remove_atom(&a));
        let group = &mol.groups()[0];
        assert_eq!(group.atoms().len(), 1);
        assert!(group.bonds().is_empty());
    }

    #[test]
    fn add_group_validates_membership() {
        let (mut mol, ..) = chain3();
        let mut other = Molecule::new();
        let foreign = other.add_atom(carbon());
        let mut group = SubstructureGroup::new("bad");
        group.add_atom(foreign);
        assert_eq!(mol.add_group(group).unwrap_err(), GraphError::NotAMember);
    }
}
