//! Lone pair and single electron stores.
//!
//! Two small append-oriented sequences beside the bond table, each entry
//! optionally bound to one member atom. Queries are filtered linear scans,
//! acceptable because these stores stay small relative to atom and bond
//! counts. Together with bonds they form one logical electron-site sequence
//! (bonds first, then lone pairs, then single electrons).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::container::Molecule;
use super::error::GraphError;
use super::handle::{AtomRef, BondRef, UNINDEXED};
use super::notify::{ChangeKind, ContainerCore};

struct SiteNode {
    atom: RefCell<Option<AtomRef>>,
    index: Cell<usize>,
    owner: RefCell<Weak<ContainerCore>>,
}

impl SiteNode {
    fn new(atom: Option<AtomRef>) -> Rc<Self> {
        Rc::new(Self {
            atom: RefCell::new(atom),
            index: Cell::new(UNINDEXED),
            owner: RefCell::new(Weak::new()),
        })
    }
}

macro_rules! electron_site_ref {
    ($(#[$doc:meta])* $name:ident, electrons = $count:literal) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            inner: Rc<SiteNode>,
        }

        impl $name {
            pub(crate) fn create(atom: Option<AtomRef>) -> Self {
                Self {
                    inner: SiteNode::new(atom),
                }
            }

            /// The bound atom, if any.
            pub fn atom(&self) -> Option<AtomRef> {
                self.inner.atom.borrow().clone()
            }

            /// Position in the owning container, or `None` while unowned.
            pub fn index(&self) -> Option<usize> {
                let index = self.inner.index.get();
                if index == UNINDEXED || self.inner.owner.borrow().strong_count() == 0 {
                    None
                } else {
                    Some(index)
                }
            }

            #[inline]
            pub fn electron_count(&self) -> u32 {
                $count
            }

            pub(crate) fn references(&self, atom: &AtomRef) -> bool {
                self.inner.atom.borrow().as_ref() == Some(atom)
            }

            pub(crate) fn replace_atom(&self, old: &AtomRef, new: &AtomRef) {
                let mut bound = self.inner.atom.borrow_mut();
                if bound.as_ref() == Some(old) {
                    *bound = Some(new.clone());
                }
            }

            pub(crate) fn set_owner(&self, core: &Rc<ContainerCore>, index: usize) {
                *self.inner.owner.borrow_mut() = Rc::downgrade(core);
                self.inner.index.set(index);
            }

            pub(crate) fn clear_owner(&self) {
                *self.inner.owner.borrow_mut() = Weak::new();
                self.inner.index.set(UNINDEXED);
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Rc::ptr_eq(&self.inner, &other.inner)
            }
        }

        impl Eq for $name {}

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("atom", &self.atom())
                    .field("index", &self.index())
                    .finish()
            }
        }
    };
}

electron_site_ref!(
    /// A lone electron pair, optionally bound to one atom.
    LonePairRef,
    electrons = 2
);

electron_site_ref!(
    /// An unpaired (radical) electron, optionally bound to one atom.
    SingleElectronRef,
    electrons = 1
);

/// One entry of the logical electron-site sequence: every bond, lone pair,
/// and single electron, in that order.
#[derive(Debug, Clone, PartialEq)]
pub enum ElectronSite {
    Bond(BondRef),
    LonePair(LonePairRef),
    SingleElectron(SingleElectronRef),
}

impl ElectronSite {
    pub fn electron_count(&self) -> u32 {
        match self {
            ElectronSite::Bond(bond) => bond.electron_count(),
            ElectronSite::LonePair(lp) => lp.electron_count(),
            ElectronSite::SingleElectron(se) => se.electron_count(),
        }
    }
}

impl Molecule {
    /// Adds a lone pair, optionally bound to a member atom.
    pub fn add_lone_pair(&mut self, atom: Option<&AtomRef>) -> Result<LonePairRef, GraphError> {
        let bound = self.resolve_site_atom(atom)?;
        let site = LonePairRef::create(bound);
        site.set_owner(&self.core, self.lone_pairs.len());
        self.lone_pairs.push(site.clone());
        self.changed(ChangeKind::Electrons);
        Ok(site)
    }

    /// Adds a single (radical) electron, optionally bound to a member atom.
    pub fn add_single_electron(
        &mut self,
        atom: Option<&AtomRef>,
    ) -> Result<SingleElectronRef, GraphError> {
        let bound = self.resolve_site_atom(atom)?;
        let site = SingleElectronRef::create(bound);
        site.set_owner(&self.core, self.single_electrons.len());
        self.single_electrons.push(site.clone());
        self.changed(ChangeKind::Electrons);
        Ok(site)
    }

    pub fn lone_pair(&self, index: usize) -> Option<LonePairRef> {
        self.lone_pairs.get(index).cloned()
    }

    pub fn lone_pairs(&self) -> &[LonePairRef] {
        &self.lone_pairs
    }

    #[inline]
    pub fn lone_pair_count(&self) -> usize {
        self.lone_pairs.len()
    }

    pub fn single_electron(&self, index: usize) -> Option<SingleElectronRef> {
        self.single_electrons.get(index).cloned()
    }

    pub fn single_electrons(&self) -> &[SingleElectronRef] {
        &self.single_electrons
    }

    #[inline]
    pub fn single_electron_count(&self) -> usize {
        self.single_electrons.len()
    }

    /// Removes the lone pair at `index`; `false` when out of range.
    pub fn remove_lone_pair_at(&mut self, index: usize) -> bool {
        if index >= self.lone_pairs.len() {
            return false;
        }
        let site = self.lone_pairs.remove(index);
        site.clear_owner();
        for i in index..self.lone_pairs.len() {
            self.lone_pairs[i].inner.index.set(i);
        }
        self.changed(ChangeKind::Electrons);
        true
    }

    /// Removes the single electron at `index`; `false` when out of range.
    pub fn remove_single_electron_at(&mut self, index: usize) -> bool {
        if index >= self.single_electrons.len() {
            return false;
        }
        let site = self.single_electrons.remove(index);
        site.clear_owner();
        for i in index..self.single_electrons.len() {
            self.single_electrons[i].inner.index.set(i);
        }
        self.changed(ChangeKind::Electrons);
        true
    }

    /// Lone pairs bound to `atom` (filtered linear scan).
    pub fn connected_lone_pairs(&self, atom: &AtomRef) -> Result<Vec<LonePairRef>, GraphError> {
        let member = self.local_atom(atom).ok_or(GraphError::NotAMember)?;
        Ok(self
            .lone_pairs
            .iter()
            .filter(|lp| lp.references(&member))
            .cloned()
            .collect())
    }

    /// Single electrons bound to `atom` (filtered linear scan).
    pub fn connected_single_electrons(
        &self,
        atom: &AtomRef,
    ) -> Result<Vec<SingleElectronRef>, GraphError> {
        let member = self.local_atom(atom).ok_or(GraphError::NotAMember)?;
        Ok(self
            .single_electrons
            .iter()
            .filter(|se| se.references(&member))
            .cloned()
            .collect())
    }

    /// All electron sites: bonds, then lone pairs, then single electrons.
    pub fn electron_sites(&self) -> impl Iterator<Item = ElectronSite> + '_ {
        self.bonds
            .iter()
            .map(|b| ElectronSite::Bond(b.clone()))
            .chain(self.lone_pairs.iter().map(|lp| ElectronSite::LonePair(lp.clone())))
            .chain(
                self.single_electrons
                    .iter()
                    .map(|se| ElectronSite::SingleElectron(se.clone())),
            )
    }

    /// Positional access into the logical electron-site sequence.
    pub fn electron_site(&self, index: usize) -> Option<ElectronSite> {
        let bonds = self.bonds.len();
        let pairs = self.lone_pairs.len();
        if index < bonds {
            Some(ElectronSite::Bond(self.bonds[index].clone()))
        } else if index < bonds + pairs {
            Some(ElectronSite::LonePair(self.lone_pairs[index - bonds].clone()))
        } else {
            self.single_electrons
                .get(index - bonds - pairs)
                .map(|se| ElectronSite::SingleElectron(se.clone()))
        }
    }

    #[inline]
    pub fn electron_site_count(&self) -> usize {
        self.bonds.len() + self.lone_pairs.len() + self.single_electrons.len()
    }

    fn resolve_site_atom(&self, atom: Option<&AtomRef>) -> Result<Option<AtomRef>, GraphError> {
        match atom {
            Some(a) => Ok(Some(self.local_atom(a).ok_or(GraphError::NotAMember)?)),
            None => Ok(None),
        }
    }

    /// Drops every electron entry bound to `atom`, compacting both stores.
    /// Part of the atom-removal cascade.
    pub(crate) fn drop_electrons_for(&mut self, atom: &AtomRef) {
        self.lone_pairs.retain(|lp| {
            if lp.references(atom) {
                lp.clear_owner();
                false
            } else {
                true
            }
        });
        for (i, lp) in self.lone_pairs.iter().enumerate() {
            lp.inner.index.set(i);
        }
        self.single_electrons.retain(|se| {
            if se.references(atom) {
                se.clear_owner();
                false
            } else {
                true
            }
        });
        for (i, se) in self.single_electrons.iter().enumerate() {
            se.inner.index.set(i);
        }
    }

    pub(crate) fn install_lone_pair(&mut self, atom: Option<AtomRef>) {
        let site = LonePairRef::create(atom);
        site.set_owner(&self.core, self.lone_pairs.len());
        self.lone_pairs.push(site);
    }

    pub(crate) fn install_single_electron(&mut self, atom: Option<AtomRef>) {
        let site = SingleElectronRef::create(atom);
        site.set_owner(&self.core, self.single_electrons.len());
        self.single_electrons.push(site);
    }
}
