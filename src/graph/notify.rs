//! Change notification for the notifying container variant.
//!
//! A [`Molecule`](super::container::Molecule) is constructed either *silent*
//! or *notifying*. Both variants share one implementation; the choice is a
//! construction-time flag on the container's core, so silent containers pay
//! for no listener bookkeeping at all. Bulk-construction call sites (format
//! readers building thousands of atoms) use the silent variant; interactive
//! consumers that need incremental observability use the notifying one.
//!
//! Exactly one [`ChangeEvent`] is broadcast per completed public mutation,
//! and only after the tables and adjacency caches are mutually consistent.
//! Mutating a payload *through a handle* (for example
//! [`AtomRef::set_element`](super::handle::AtomRef::set_element)) notifies the
//! owning container through the handle's owner back-reference.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Which part of the structure a completed mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Atoms,
    Bonds,
    Electrons,
    Stereo,
    Groups,
    /// A payload field changed through a handle; topology is untouched.
    Payload,
    /// The whole container was cleared.
    Cleared,
}

/// Broadcast once per completed structural mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
}

/// Observer interface for the notifying container variant.
pub trait ChangeListener {
    fn structure_changed(&self, event: ChangeEvent);
}

/// Shared identity and observer state of one container.
///
/// Every wrapper's owner back-reference points here, which makes membership a
/// pointer comparison and gives payload mutators a path back to the
/// container's listeners without any global registry.
pub(crate) struct ContainerCore {
    notifying: bool,
    listeners: RefCell<Vec<Weak<dyn ChangeListener>>>,
}

impl ContainerCore {
    pub(crate) fn new(notifying: bool) -> Rc<Self> {
        Rc::new(Self {
            notifying,
            listeners: RefCell::new(Vec::new()),
        })
    }

    #[inline]
    pub(crate) fn is_notifying(&self) -> bool {
        self.notifying
    }

    pub(crate) fn add_listener(&self, listener: &Rc<dyn ChangeListener>) {
        if !self.notifying {
            return;
        }
        self.listeners.borrow_mut().push(Rc::downgrade(listener));
    }

    pub(crate) fn remove_listener(&self, listener: &Rc<dyn ChangeListener>) {
        if !self.notifying {
            return;
        }
        let target = Rc::downgrade(listener);
        self.listeners
            .borrow_mut()
            .retain(|w| !Weak::ptr_eq(w, &target));
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Broadcasts `event` to live listeners, pruning dropped ones.
    ///
    /// Listeners run outside any internal borrow, so a listener may read the
    /// container it observes.
    pub(crate) fn notify(&self, event: ChangeEvent) {
        if !self.notifying {
            return;
        }
        let live: Vec<Rc<dyn ChangeListener>> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|w| w.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in live {
            listener.structure_changed(event);
        }
    }
}

impl std::fmt::Debug for ContainerCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerCore")
            .field("notifying", &self.notifying)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}
