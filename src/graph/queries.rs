//! Adjacency and aggregate-order queries.
//!
//! Every query resolves the argument atom to this container's member handle
//! first ([`GraphError::NotAMember`] otherwise) and then reads the atom's
//! cached incident list: cost is O(degree), never a scan of the bond table.

use super::container::Molecule;
use super::error::GraphError;
use super::handle::{AtomRef, BondRef};
use crate::model::types::BondOrder;

impl Molecule {
    /// Atoms sharing a bond with `atom`, one entry per bond endpoint (for a
    /// multi-center bond, every other endpoint is reported).
    pub fn connected_atoms(&self, atom: &AtomRef) -> Result<Vec<AtomRef>, GraphError> {
        let member = self.local_atom(atom).ok_or(GraphError::NotAMember)?;
        let mut neighbors = Vec::new();
        for bond in member.inner.incident_bonds() {
            for endpoint in bond.endpoints() {
                if endpoint != member {
                    neighbors.push(endpoint);
                }
            }
        }
        Ok(neighbors)
    }

    /// Bonds incident to `atom`.
    pub fn connected_bonds(&self, atom: &AtomRef) -> Result<Vec<BondRef>, GraphError> {
        let member = self.local_atom(atom).ok_or(GraphError::NotAMember)?;
        Ok(member.inner.incident_bonds().into_vec())
    }

    /// Number of bonds incident to `atom`.
    pub fn degree(&self, atom: &AtomRef) -> Result<usize, GraphError> {
        let member = self.local_atom(atom).ok_or(GraphError::NotAMember)?;
        let len = member.inner.incident.borrow().len();
        Ok(len)
    }

    /// The bond joining `a` and `b`, if any, found by scanning `a`'s
    /// incident list.
    pub fn bond_between(
        &self,
        a: &AtomRef,
        b: &AtomRef,
    ) -> Result<Option<BondRef>, GraphError> {
        let member = self.local_atom(a).ok_or(GraphError::NotAMember)?;
        Ok(member
            .inner
            .incident_bonds()
            .into_iter()
            .find(|bond| bond.endpoints().iter().any(|e| e == b && *e != member)))
    }

    /// Sum of the numeric orders of `atom`'s incident bonds.
    pub fn bond_order_sum(&self, atom: &AtomRef) -> Result<u32, GraphError> {
        let member = self.local_atom(atom).ok_or(GraphError::NotAMember)?;
        Ok(member
            .inner
            .incident_bonds()
            .iter()
            .map(|bond| bond.order().numeric())
            .sum())
    }

    /// Highest order among `atom`'s incident bonds.
    ///
    /// An atom with no bonds but a positive implicit-hydrogen count reports
    /// `Single`: the hydrogens are real neighbors that simply are not stored.
    /// With neither bonds nor implicit hydrogens the order is `None`. This is
    /// an edge-case policy, not a valence model.
    pub fn max_bond_order(&self, atom: &AtomRef) -> Result<Option<BondOrder>, GraphError> {
        let member = self.local_atom(atom).ok_or(GraphError::NotAMember)?;
        let max = member
            .inner
            .incident_bonds()
            .iter()
            .map(|bond| bond.order())
            .max();
        Ok(max.or_else(|| {
            if member.implicit_hydrogens() > 0 {
                Some(BondOrder::Single)
            } else {
                None
            }
        }))
    }

    /// Lowest order among `atom`'s incident bonds; same implicit-hydrogen
    /// policy as [`Molecule::max_bond_order`].
    pub fn min_bond_order(&self, atom: &AtomRef) -> Result<Option<BondOrder>, GraphError> {
        let member = self.local_atom(atom).ok_or(GraphError::NotAMember)?;
        let min = member
            .inner
            .incident_bonds()
            .iter()
            .map(|bond| bond.order())
            .min();
        Ok(min.or_else(|| {
            if member.implicit_hydrogens() > 0 {
                Some(BondOrder::Single)
            } else {
                None
            }
        }))
    }
}
