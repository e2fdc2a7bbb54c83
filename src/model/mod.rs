//! Payload types carried by the molecular graph.
//!
//! Everything here is plain data with value semantics:
//!
//! - [`types`] – Periodic table elements and integral bond orders.
//! - [`atom`] – Atom payloads in their closed kind set: plain, pseudo
//!   (label-bearing), query (pattern-matching), and record-annotated.
//! - [`bond`] – Bond payloads with explicit aromatic / single-or-double flags.
//! - [`residue`] – Macromolecular record context for record-annotated atoms.
//!
//! None of these types know about containers, indices, or adjacency; the
//! [`crate::graph`] module wraps them into container-local handles.

pub mod atom;
pub mod bond;
pub mod residue;
pub mod types;
