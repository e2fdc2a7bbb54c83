//! Reference wrappers around atom and bond payloads.
//!
//! A [`Molecule`](super::container::Molecule) never stores payloads directly;
//! it stores [`AtomRef`]/[`BondRef`] handles. A handle carries the payload in
//! its narrowest kind (plain, pseudo, query, record, or a nested foreign
//! wrapper), the container-assigned dense index, an owner back-reference, and
//! — for atoms — the cached incident bond list that adjacency queries read.
//!
//! Identity, equality, and hashing are all defined on the *fully unwrapped*
//! payload: a handle that wraps another container's handle compares equal to
//! the original, and re-wrapping an owned entity yields the same logical
//! entity rather than a new one. Payload kind dispatch happens once, at wrap
//! time; there is no downcast chain on access.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use super::error::GraphError;
use super::notify::{ChangeEvent, ChangeKind, ContainerCore};
use crate::model::atom::{Atom, PseudoAtom, QueryAtom, RecordAtom};
use crate::model::bond::Bond;
use crate::model::residue::AtomResidueInfo;
use crate::model::types::{BondOrder, Element};

/// Index value of a handle that is not installed in any table.
pub(crate) const UNINDEXED: usize = usize::MAX;

/// Payload kind of an atom handle, resolved once at wrap time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    Plain,
    Pseudo,
    Query,
    Record,
}

#[derive(Clone)]
pub(crate) enum AtomPayload {
    Plain(Rc<RefCell<Atom>>),
    Pseudo(Rc<RefCell<PseudoAtom>>),
    Query(Rc<RefCell<QueryAtom>>),
    Record(Rc<RefCell<RecordAtom>>),
    /// A handle owned by another container; unwrap resolves through it.
    Nested(AtomRef),
}

impl AtomPayload {
    /// Dereferences through nested wrappers until the non-wrapper payload.
    pub(crate) fn terminal(&self) -> &AtomPayload {
        let mut current = self;
        while let AtomPayload::Nested(inner) = current {
            current = &inner.inner.payload;
        }
        current
    }

    /// Address of the terminal payload allocation; the identity that equality
    /// and the clone map key on.
    pub(crate) fn key(&self) -> usize {
        match self.terminal() {
            AtomPayload::Plain(rc) => Rc::as_ptr(rc) as *const () as usize,
            AtomPayload::Pseudo(rc) => Rc::as_ptr(rc) as *const () as usize,
            AtomPayload::Query(rc) => Rc::as_ptr(rc) as *const () as usize,
            AtomPayload::Record(rc) => Rc::as_ptr(rc) as *const () as usize,
            AtomPayload::Nested(_) => unreachable!("terminal payload is never nested"),
        }
    }

    pub(crate) fn kind(&self) -> AtomKind {
        match self.terminal() {
            AtomPayload::Plain(_) => AtomKind::Plain,
            AtomPayload::Pseudo(_) => AtomKind::Pseudo,
            AtomPayload::Query(_) => AtomKind::Query,
            AtomPayload::Record(_) => AtomKind::Record,
            AtomPayload::Nested(_) => unreachable!("terminal payload is never nested"),
        }
    }

    pub(crate) fn with_base<R>(&self, f: impl FnOnce(&Atom) -> R) -> R {
        match self.terminal() {
            AtomPayload::Plain(rc) => f(&rc.borrow()),
            AtomPayload::Pseudo(rc) => f(&rc.borrow().base),
            AtomPayload::Query(rc) => f(&rc.borrow().base),
            AtomPayload::Record(rc) => f(&rc.borrow().base),
            AtomPayload::Nested(_) => unreachable!("terminal payload is never nested"),
        }
    }

    pub(crate) fn with_base_mut<R>(&self, f: impl FnOnce(&mut Atom) -> R) -> R {
        match self.terminal() {
            AtomPayload::Plain(rc) => f(&mut rc.borrow_mut()),
            AtomPayload::Pseudo(rc) => f(&mut rc.borrow_mut().base),
            AtomPayload::Query(rc) => f(&mut rc.borrow_mut().base),
            AtomPayload::Record(rc) => f(&mut rc.borrow_mut().base),
            AtomPayload::Nested(_) => unreachable!("terminal payload is never nested"),
        }
    }

    /// Fresh payload identity of the same terminal kind. Wrapper chains are
    /// flattened; the clone is always a first-class payload.
    pub(crate) fn deep_clone(&self) -> AtomPayload {
        match self.terminal() {
            AtomPayload::Plain(rc) => {
                AtomPayload::Plain(Rc::new(RefCell::new(rc.borrow().clone())))
            }
            AtomPayload::Pseudo(rc) => {
                AtomPayload::Pseudo(Rc::new(RefCell::new(rc.borrow().clone())))
            }
            AtomPayload::Query(rc) => {
                AtomPayload::Query(Rc::new(RefCell::new(rc.borrow().clone())))
            }
            AtomPayload::Record(rc) => {
                AtomPayload::Record(Rc::new(RefCell::new(rc.borrow().clone())))
            }
            AtomPayload::Nested(_) => unreachable!("terminal payload is never nested"),
        }
    }

    /// Same terminal payload identity, no nesting. Used by shallow copies.
    pub(crate) fn share(&self) -> AtomPayload {
        self.terminal().clone()
    }
}

pub(crate) struct AtomNode {
    pub(crate) payload: AtomPayload,
    pub(crate) index: Cell<usize>,
    pub(crate) owner: RefCell<Weak<ContainerCore>>,
    pub(crate) incident: RefCell<SmallVec<[Weak<BondNode>; 4]>>,
}

impl AtomNode {
    pub(crate) fn new(payload: AtomPayload) -> Rc<Self> {
        Rc::new(Self {
            payload,
            index: Cell::new(UNINDEXED),
            owner: RefCell::new(Weak::new()),
            incident: RefCell::new(SmallVec::new()),
        })
    }

    /// Upgraded incident list; entries are kept weak so the atom↔bond
    /// reference cycle cannot leak, and a live container never holds a dead
    /// entry (detachment happens before a bond leaves the table).
    pub(crate) fn incident_bonds(&self) -> SmallVec<[BondRef; 4]> {
        self.incident
            .borrow()
            .iter()
            .filter_map(|w| w.upgrade().map(|inner| BondRef { inner }))
            .collect()
    }

    pub(crate) fn attach(&self, bond: &BondRef) {
        self.incident.borrow_mut().push(Rc::downgrade(&bond.inner));
    }

    pub(crate) fn detach(&self, bond: &BondRef) {
        let target = Rc::as_ptr(&bond.inner);
        self.incident.borrow_mut().retain(|w| w.as_ptr() != target);
    }
}

/// Container-local handle to an atom.
///
/// Cheap to clone; all clones are the same logical entity. Payload mutators
/// notify the owning container when it is the notifying variant.
#[derive(Clone)]
pub struct AtomRef {
    pub(crate) inner: Rc<AtomNode>,
}

impl AtomRef {
    pub(crate) fn from_payload(payload: AtomPayload) -> Self {
        Self {
            inner: AtomNode::new(payload),
        }
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

    pub fn kind(&self) -> AtomKind {
        self.inner.payload.kind()
    }

    /// Snapshot of the unwrapped base payload.
    pub fn atom(&self) -> Atom {
        self.inner.payload.with_base(|a| a.clone())
    }

    pub fn element(&self) -> Element {
        self.inner.payload.with_base(|a| a.element)
    }

    pub fn set_element(&self, element: Element) {
        self.inner.payload.with_base_mut(|a| a.element = element);
        self.notify_payload();
    }

    pub fn formal_charge(&self) -> i8 {
        self.inner.payload.with_base(|a| a.formal_charge)
    }

    pub fn set_formal_charge(&self, charge: i8) {
        self.inner.payload.with_base_mut(|a| a.formal_charge = charge);
        self.notify_payload();
    }

    pub fn implicit_hydrogens(&self) -> u8 {
        self.inner.payload.with_base(|a| a.implicit_hydrogens)
    }

    pub fn set_implicit_hydrogens(&self, count: u8) {
        self.inner
            .payload
            .with_base_mut(|a| a.implicit_hydrogens = count);
        self.notify_payload();
    }

    pub fn isotope(&self) -> Option<u16> {
        self.inner.payload.with_base(|a| a.isotope)
    }

    pub fn set_isotope(&self, isotope: Option<u16>) {
        self.inner.payload.with_base_mut(|a| a.isotope = isotope);
        self.notify_payload();
    }

    pub fn is_aromatic(&self) -> bool {
        self.inner.payload.with_base(|a| a.is_aromatic)
    }

    pub fn set_is_aromatic(&self, aromatic: bool) {
        self.inner.payload.with_base_mut(|a| a.is_aromatic = aromatic);
        self.notify_payload();
    }

    pub fn position(&self) -> Option<[f64; 3]> {
        self.inner.payload.with_base(|a| a.position)
    }

    pub fn set_position(&self, position: Option<[f64; 3]>) {
        self.inner.payload.with_base_mut(|a| a.position = position);
        self.notify_payload();
    }

    /// Applies an arbitrary edit to the base payload, notifying once.
    pub fn update(&self, f: impl FnOnce(&mut Atom)) {
        self.inner.payload.with_base_mut(f);
        self.notify_payload();
    }

    /// Label of a pseudo atom, `None` for other kinds.
    pub fn label(&self) -> Option<String> {
        match self.inner.payload.terminal() {
            AtomPayload::Pseudo(rc) => Some(rc.borrow().label.clone()),
            _ => None,
        }
    }

    /// Record annotation of a record atom, `None` for other kinds.
    pub fn residue(&self) -> Option<AtomResidueInfo> {
        match self.inner.payload.terminal() {
            AtomPayload::Record(rc) => Some(rc.borrow().residue.clone()),
            _ => None,
        }
    }

    /// For a query atom, whether its pattern matches `probe`'s base payload;
    /// `None` for non-query kinds.
    pub fn pattern_matches(&self, probe: &AtomRef) -> Option<bool> {
        match self.inner.payload.terminal() {
            AtomPayload::Query(rc) => Some(probe.inner.payload.with_base(|a| rc.borrow().matches(a))),
            _ => None,
        }
    }

    pub(crate) fn identity(&self) -> usize {
        self.inner.payload.key()
    }

    pub(crate) fn same_node(&self, other: &AtomRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn set_owner(&self, core: &Rc<ContainerCore>, index: usize) {
        *self.inner.owner.borrow_mut() = Rc::downgrade(core);
        self.inner.index.set(index);
    }

    pub(crate) fn clear_owner(&self) {
        *self.inner.owner.borrow_mut() = Weak::new();
        self.inner.index.set(UNINDEXED);
        self.inner.incident.borrow_mut().clear();
    }

    fn notify_payload(&self) {
        if let Some(core) = self.inner.owner.borrow().upgrade() {
            core.notify(ChangeEvent {
                kind: ChangeKind::Payload,
            });
        }
    }
}

impl PartialEq for AtomRef {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for AtomRef {}

impl Hash for AtomRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Debug for AtomRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AtomRef")
            .field("element", &self.element())
            .field("kind", &self.kind())
            .field("index", &self.index())
            .finish()
    }
}

/// Input accepted by atom insertion, dispatched to the narrowest wrapper
/// kind at wrap time.
pub enum AtomSeed {
    Plain(Atom),
    Pseudo(PseudoAtom),
    Query(QueryAtom),
    Record(RecordAtom),
    Ref(AtomRef),
}

impl AtomSeed {
    /// Payload for a fresh node. `Ref` seeds are resolved by the container
    /// beforehand (idempotent wrap, adoption, or nesting), so only value
    /// seeds reach this point.
    pub(crate) fn into_payload(self) -> AtomPayload {
        match self {
            AtomSeed::Plain(atom) => AtomPayload::Plain(Rc::new(RefCell::new(atom))),
            AtomSeed::Pseudo(atom) => AtomPayload::Pseudo(Rc::new(RefCell::new(atom))),
            AtomSeed::Query(atom) => AtomPayload::Query(Rc::new(RefCell::new(atom))),
            AtomSeed::Record(atom) => AtomPayload::Record(Rc::new(RefCell::new(atom))),
            AtomSeed::Ref(handle) => AtomPayload::Nested(handle),
        }
    }
}

impl From<Atom> for AtomSeed {
    fn from(atom: Atom) -> Self {
        AtomSeed::Plain(atom)
    }
}

impl From<PseudoAtom> for AtomSeed {
    fn from(atom: PseudoAtom) -> Self {
        AtomSeed::Pseudo(atom)
    }
}

impl From<QueryAtom> for AtomSeed {
    fn from(atom: QueryAtom) -> Self {
        AtomSeed::Query(atom)
    }
}

impl From<RecordAtom> for AtomSeed {
    fn from(atom: RecordAtom) -> Self {
        AtomSeed::Record(atom)
    }
}

impl From<AtomRef> for AtomSeed {
    fn from(handle: AtomRef) -> Self {
        AtomSeed::Ref(handle)
    }
}

impl From<&AtomRef> for AtomSeed {
    fn from(handle: &AtomRef) -> Self {
        AtomSeed::Ref(handle.clone())
    }
}

#[derive(Clone)]
pub(crate) enum BondPayload {
    Plain(Rc<RefCell<Bond>>),
    Nested(BondRef),
}

impl BondPayload {
    pub(crate) fn terminal(&self) -> &BondPayload {
        let mut current = self;
        while let BondPayload::Nested(inner) = current {
            current = &inner.inner.payload;
        }
        current
    }

    pub(crate) fn key(&self) -> usize {
        match self.terminal() {
            BondPayload::Plain(rc) => Rc::as_ptr(rc) as *const () as usize,
            BondPayload::Nested(_) => unreachable!("terminal payload is never nested"),
        }
    }

    pub(crate) fn with_bond<R>(&self, f: impl FnOnce(&Bond) -> R) -> R {
        match self.terminal() {
            BondPayload::Plain(rc) => f(&rc.borrow()),
            BondPayload::Nested(_) => unreachable!("terminal payload is never nested"),
        }
    }

    pub(crate) fn with_bond_mut<R>(&self, f: impl FnOnce(&mut Bond) -> R) -> R {
        match self.terminal() {
            BondPayload::Plain(rc) => f(&mut rc.borrow_mut()),
            BondPayload::Nested(_) => unreachable!("terminal payload is never nested"),
        }
    }

    pub(crate) fn deep_clone(&self) -> BondPayload {
        match self.terminal() {
            BondPayload::Plain(rc) => {
                BondPayload::Plain(Rc::new(RefCell::new(rc.borrow().clone())))
            }
            BondPayload::Nested(_) => unreachable!("terminal payload is never nested"),
        }
    }

    pub(crate) fn share(&self) -> BondPayload {
        self.terminal().clone()
    }
}

pub(crate) struct BondNode {
    pub(crate) payload: BondPayload,
    pub(crate) endpoints: RefCell<SmallVec<[AtomRef; 2]>>,
    pub(crate) index: Cell<usize>,
    pub(crate) owner: RefCell<Weak<ContainerCore>>,
}

impl BondNode {
    pub(crate) fn new(payload: BondPayload, endpoints: SmallVec<[AtomRef; 2]>) -> Rc<Self> {
        Rc::new(Self {
            payload,
            endpoints: RefCell::new(endpoints),
            index: Cell::new(UNINDEXED),
            owner: RefCell::new(Weak::new()),
        })
    }
}

/// Container-local handle to a bond with an ordered list of 2..n endpoints.
#[derive(Clone)]
pub struct BondRef {
    pub(crate) inner: Rc<BondNode>,
}

impl BondRef {
    /// Builds an unowned bond over `endpoints`. Fails with
    /// [`GraphError::MalformedBond`] for fewer than two endpoints. The bond
    /// joins a container through
    /// [`Molecule::add_bond_ref`](super::container::Molecule::add_bond_ref)
    /// or [`Molecule::set_bonds`](super::container::Molecule::set_bonds).
    pub fn new(bond: Bond, endpoints: &[AtomRef]) -> Result<Self, GraphError> {
        if endpoints.len() < 2 {
            return Err(GraphError::MalformedBond {
                count: endpoints.len(),
            });
        }
        Ok(Self {
            inner: BondNode::new(
                BondPayload::Plain(Rc::new(RefCell::new(bond))),
                endpoints.iter().cloned().collect(),
            ),
        })
    }

    pub(crate) fn from_parts(payload: BondPayload, endpoints: SmallVec<[AtomRef; 2]>) -> Self {
        Self {
            inner: BondNode::new(payload, endpoints),
        }
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

    /// Snapshot of the unwrapped payload.
    pub fn bond(&self) -> Bond {
        self.inner.payload.with_bond(|b| b.clone())
    }

    pub fn order(&self) -> BondOrder {
        self.inner.payload.with_bond(|b| b.order)
    }

    pub fn set_order(&self, order: BondOrder) {
        self.inner.payload.with_bond_mut(|b| b.order = order);
        self.notify_payload();
    }

    pub fn is_aromatic(&self) -> bool {
        self.inner.payload.with_bond(|b| b.is_aromatic)
    }

    pub fn set_is_aromatic(&self, aromatic: bool) {
        self.inner.payload.with_bond_mut(|b| b.is_aromatic = aromatic);
        self.notify_payload();
    }

    pub fn is_single_or_double(&self) -> bool {
        self.inner.payload.with_bond(|b| b.is_single_or_double)
    }

    pub fn set_is_single_or_double(&self, flag: bool) {
        self.inner
            .payload
            .with_bond_mut(|b| b.is_single_or_double = flag);
        self.notify_payload();
    }

    pub fn electron_count(&self) -> u32 {
        self.inner.payload.with_bond(|b| b.electron_count())
    }

    pub fn endpoint_count(&self) -> usize {
        self.inner.endpoints.borrow().len()
    }

    pub fn endpoint(&self, position: usize) -> Option<AtomRef> {
        self.inner.endpoints.borrow().get(position).cloned()
    }

    pub fn endpoints(&self) -> Vec<AtomRef> {
        self.inner.endpoints.borrow().iter().cloned().collect()
    }

    /// First endpoint (role *begin*).
    pub fn begin(&self) -> AtomRef {
        self.inner.endpoints.borrow()[0].clone()
    }

    /// Second endpoint (role *end*).
    pub fn end(&self) -> AtomRef {
        self.inner.endpoints.borrow()[1].clone()
    }

    /// The opposite endpoint of a binary bond; `None` for multi-center bonds
    /// or when `atom` is not an endpoint.
    pub fn other(&self, atom: &AtomRef) -> Option<AtomRef> {
        let endpoints = self.inner.endpoints.borrow();
        if endpoints.len() != 2 {
            return None;
        }
        if endpoints[0] == *atom {
            Some(endpoints[1].clone())
        } else if endpoints[1] == *atom {
            Some(endpoints[0].clone())
        } else {
            None
        }
    }

    pub fn contains_atom(&self, atom: &AtomRef) -> bool {
        self.inner.endpoints.borrow().iter().any(|e| e == atom)
    }

    pub(crate) fn identity(&self) -> usize {
        self.inner.payload.key()
    }

    pub(crate) fn same_node(&self, other: &BondRef) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn is_owned_by(&self, core: &Rc<ContainerCore>) -> bool {
        self.inner.owner.borrow().as_ptr() == Rc::as_ptr(core)
            && self.inner.owner.borrow().strong_count() > 0
    }

    pub(crate) fn set_owner(&self, core: &Rc<ContainerCore>, index: usize) {
        *self.inner.owner.borrow_mut() = Rc::downgrade(core);
        self.inner.index.set(index);
    }

    pub(crate) fn clear_owner(&self) {
        *self.inner.owner.borrow_mut() = Weak::new();
        self.inner.index.set(UNINDEXED);
    }

    fn notify_payload(&self) {
        if let Some(core) = self.inner.owner.borrow().upgrade() {
            core.notify(ChangeEvent {
                kind: ChangeKind::Payload,
            });
        }
    }
}

impl PartialEq for BondRef {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for BondRef {}

impl Hash for BondRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Debug for BondRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BondRef")
            .field("order", &self.order())
            .field("endpoints", &self.endpoint_count())
            .field("index", &self.index())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::AtomPattern;

    fn plain(element: Element) -> AtomRef {
        AtomRef::from_payload(AtomSeed::from(Atom::new(element)).into_payload())
    }

    #[test]
    fn wrap_dispatches_to_narrowest_kind() {
        let plain = plain(Element::C);
        assert_eq!(plain.kind(), AtomKind::Plain);

        let pseudo =
            AtomRef::from_payload(AtomSeed::from(PseudoAtom::new("R1")).into_payload());
        assert_eq!(pseudo.kind(), AtomKind::Pseudo);
        assert_eq!(pseudo.label(), Some("R1".to_string()));

        let query = AtomRef::from_payload(
            AtomSeed::from(QueryAtom::new(AtomPattern::Element(Element::N))).into_payload(),
        );
        assert_eq!(query.kind(), AtomKind::Query);
        assert_eq!(query.pattern_matches(&plain), Some(false));
        assert_eq!(plain.pattern_matches(&query), None);
    }

    #[test]
    fn nested_wrapper_unwraps_to_terminal_identity() {
        let original = plain(Element::O);
        let wrapped =
            AtomRef::from_payload(AtomSeed::from(&original).into_payload());
        let double_wrapped =
            AtomRef::from_payload(AtomSeed::from(&wrapped).into_payload());

        assert_eq!(original, wrapped);
        assert_eq!(original, double_wrapped);
        assert_eq!(wrapped.kind(), AtomKind::Plain);
        assert_eq!(double_wrapped.element(), Element::O);

        // Mutation through any layer reaches the one shared payload.
        double_wrapped.set_formal_charge(-2);
        assert_eq!(original.formal_charge(), -2);
    }

    #[test]
    fn distinct_payloads_are_unequal() {
        let a = plain(Element::C);
        let b = plain(Element::C);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn hash_follows_identity() {
        use std::collections::HashSet;
        let a = plain(Element::C);
        let wrapped = AtomRef::from_payload(AtomSeed::from(&a).into_payload());

        let mut set = HashSet::new();
        set.insert(a.clone());
        assert!(set.contains(&wrapped));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unowned_handles_have_no_index() {
        let a = plain(Element::C);
        assert_eq!(a.index(), None);
    }

    #[test]
    fn bond_ref_requires_two_endpoints() {
        let a = plain(Element::C);
        let err = BondRef::new(Bond::default(), &[a.clone()]).unwrap_err();
        assert_eq!(err, GraphError::MalformedBond { count: 1 });

        let b = plain(Element::O);
        let bond = BondRef::new(Bond::new(BondOrder::Double), &[a.clone(), b.clone()]).unwrap();
        assert_eq!(bond.endpoint_count(), 2);
        assert_eq!(bond.begin(), a);
        assert_eq!(bond.end(), b);
        assert_eq!(bond.other(&a), Some(b.clone()));
        assert_eq!(bond.other(&plain(Element::N)), None);
        assert_eq!(bond.electron_count(), 4);
    }

    #[test]
    fn multi_center_bond_has_no_other() {
        let a = plain(Element::B);
        let b = plain(Element::H);
        let c = plain(Element::B);
        let bond =
            BondRef::new(Bond::default(), &[a.clone(), b.clone(), c.clone()]).unwrap();
        assert_eq!(bond.endpoint_count(), 3);
        assert_eq!(bond.other(&a), None);
        assert!(bond.contains_atom(&c));
    }

    #[test]
    fn payload_update_without_owner_is_silent() {
        let a = plain(Element::S);
        a.update(|atom| atom.implicit_hydrogens = 2);
        assert_eq!(a.implicit_hydrogens(), 2);
    }
}
