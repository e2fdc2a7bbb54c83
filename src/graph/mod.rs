//! The mutable molecular graph core.
//!
//! - [`container`] – [`Molecule`](container::Molecule): densely indexed atom
//!   and bond tables with cascading mutation.
//! - [`handle`] – Reference wrappers ([`AtomRef`](handle::AtomRef),
//!   [`BondRef`](handle::BondRef)) with unwrapped-identity equality.
//! - [`queries`] – Adjacency and bond-order aggregates over the cached
//!   incident lists.
//! - [`electrons`] – Lone pair and single electron stores.
//! - [`stereo`] – Stereo descriptors with cascade and relink rules.
//! - [`clone_map`] – The identity-map clone engine and shallow copies.
//! - [`notify`] – Opt-in change notification.
//! - [`factory`] – Explicit construction policy for the notifying/silent
//!   choice.
//! - [`error`] – [`GraphError`](error::GraphError).

pub mod clone_map;
pub mod container;
pub mod electrons;
pub mod error;
pub mod factory;
pub mod handle;
pub mod notify;
pub mod queries;
pub mod stereo;
