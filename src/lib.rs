//! A pure Rust library for in-memory, mutable molecular graphs.
//! It provides the container every format reader, writer, and structural
//! algorithm of a cheminformatics stack builds on: densely indexed atom and
//! bond tables with cached adjacency, auxiliary electron and stereo stores
//! that track their referenced entities through every mutation, and an
//! identity-map-based clone engine.
//!
//! # Features
//!
//! - **Stable dense indexing** — An atom's or bond's `index()` always equals
//!   its table position, after any sequence of insertions and removals
//! - **Cached adjacency** — Neighbor and bond-order queries read per-atom
//!   incident lists, never scanning the whole bond table
//! - **Closed payload polymorphism** — Plain, pseudo (label-bearing), query
//!   (pattern-matching), and record-annotated atoms behind one handle type,
//!   resolved once at wrap time
//! - **Cascading mutation** — Removing an atom removes its bonds, bound
//!   electron entries, and every stereo descriptor touching any of them
//! - **Identity-preserving cloning** — Deep clones relink all
//!   cross-references through an explicit original→clone map; shallow copies
//!   share payload identities over fresh topology
//! - **Opt-in change notification** — Notifying and silent containers share
//!   one implementation; silent ones pay nothing for observability
//!
//! # Quick Start
//!
//! ```
//! use molgraph::{Atom, Bond, BondOrder, Element, Molecule};
//!
//! // Acetaldehyde's heavy-atom skeleton: C-C=O
//! let mut mol = Molecule::new();
//! let c1 = mol.add_atom(Atom::new(Element::C).with_implicit_hydrogens(3));
//! let c2 = mol.add_atom(Atom::new(Element::C).with_implicit_hydrogens(1));
//! let o = mol.add_atom(Atom::new(Element::O));
//! mol.add_bond(&c1, &c2, Bond::new(BondOrder::Single))?;
//! mol.add_bond(&c2, &o, Bond::new(BondOrder::Double))?;
//!
//! assert_eq!(mol.atom_count(), 3);
//! assert_eq!(mol.bond_count(), 2);
//!
//! // Indices are dense and stable; adjacency is cached per atom.
//! assert_eq!(c2.index(), Some(1));
//! assert_eq!(mol.connected_atoms(&c2)?.len(), 2);
//! assert_eq!(mol.bond_order_sum(&c2)?, 3);
//! assert_eq!(mol.max_bond_order(&c2)?, Some(BondOrder::Double));
//!
//! // Lone pairs ride along with their atom.
//! mol.add_lone_pair(Some(&o))?;
//! assert_eq!(mol.connected_lone_pairs(&o)?.len(), 1);
//!
//! // Deep clones share no identities with the original; the identity map
//! // relates the two structures.
//! let (copy, map) = mol.clone_mapped();
//! assert_eq!(copy.atom_count(), 3);
//! let c1_copy = map.atom(&c1).unwrap();
//! assert_ne!(c1_copy, c1);
//! assert!(copy.contains_atom(&c1_copy));
//! assert!(!copy.contains_atom(&c1));
//!
//! // Removing an atom cascades to its bonds and electron entries.
//! assert!(mol.remove_atom(&c2));
//! assert_eq!(mol.atom_count(), 2);
//! assert_eq!(mol.bond_count(), 0);
//! assert_eq!(copy.bond_count(), 2);
//! # Ok::<(), molgraph::GraphError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`model`] — Plain payload types (elements, atoms, bonds, residue
//!   records)
//! - [`graph`] — The container core: tables, handles, queries, electron and
//!   stereo stores, cloning, notification
//!
//! # Data Types
//!
//! ## Container
//!
//! - [`Molecule`] — The mutable graph container
//! - [`AtomRef`] / [`BondRef`] — Container-local reference wrappers
//! - [`SubstructureGroup`] — Named annotation over member atoms/bonds
//! - [`IdentityMap`] — Original→clone mapping produced by structural clones
//! - [`StructureFactory`] / [`NotifyMode`] — Construction policy
//!
//! ## Payloads
//!
//! - [`Atom`], [`PseudoAtom`], [`QueryAtom`], [`RecordAtom`] — The closed
//!   atom payload kinds, with [`AtomPattern`] for queries
//! - [`Bond`] — Bond payload with explicit aromatic flags
//! - [`Element`], [`BondOrder`] — Periodic table and bond multiplicities
//!
//! ## Auxiliary entities
//!
//! - [`LonePairRef`], [`SingleElectronRef`], [`ElectronSite`] — Electron
//!   bookkeeping beside the bond table
//! - [`StereoDescriptor`] with [`StereoKind`], [`StereoFocus`],
//!   [`StereoCarrier`] — Spatial constraints over atoms and bonds
//!
//! ## Observability
//!
//! - [`ChangeListener`], [`ChangeEvent`], [`ChangeKind`] — One event per
//!   completed mutation on notifying containers
//!
//! # Concurrency
//!
//! Containers are single-threaded by construction (`Rc`-based sharing, no
//! internal locking) and not `Send`/`Sync`; concurrent callers keep one
//! container per worker or serialize externally.

pub mod graph;
pub mod model;

pub use model::atom::{Atom, AtomPattern, PseudoAtom, QueryAtom, RecordAtom};
pub use model::bond::Bond;
pub use model::residue::AtomResidueInfo;
pub use model::types::{BondOrder, Element, ParseBondOrderError, ParseElementError};

pub use graph::clone_map::IdentityMap;
pub use graph::container::{Molecule, SubstructureGroup};
pub use graph::electrons::{ElectronSite, LonePairRef, SingleElectronRef};
pub use graph::error::GraphError;
pub use graph::factory::{NotifyMode, StructureFactory};
pub use graph::handle::{AtomKind, AtomRef, AtomSeed, BondRef};
pub use graph::notify::{ChangeEvent, ChangeKind, ChangeListener};
pub use graph::stereo::{
    Alignment, StereoCarrier, StereoDescriptor, StereoFocus, StereoKind, Winding,
};
