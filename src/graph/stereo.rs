//! Stereo descriptors and their registry.
//!
//! A descriptor names a focus (one atom or one bond) and an ordered carrier
//! set whose specific identities encode the spatial meaning; the graph core
//! never interprets the geometry. Two registry rules matter:
//!
//! - **Cascade on removal**: a descriptor whose focus or carriers include a
//!   removed atom or bond is dropped entirely — partial stereo is never kept.
//! - **Relink on replace**: when an atom is replaced in the table, affected
//!   descriptors are themselves replaced by fresh ones built through a
//!   one-entry identity map, the same mechanism full-container cloning uses.

use super::clone_map::IdentityMap;
use super::container::Molecule;
use super::error::GraphError;
use super::handle::{AtomRef, BondRef};
use super::notify::ChangeKind;

/// Tetrahedral carrier arrangement, viewed from the first carrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Relative placement of the reference carriers across a double bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Cis,
    Trans,
}

/// Closed set of descriptor kinds with their carrier requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StereoKind {
    /// Tetrahedral arrangement around an atom; 4 carriers.
    Tetrahedral(Winding),
    /// Cis/trans configuration around a bond; 2+2 carriers.
    DoubleBond(Alignment),
}

impl StereoKind {
    pub fn required_carriers(&self) -> usize {
        match self {
            StereoKind::Tetrahedral(_) => 4,
            StereoKind::DoubleBond(_) => 4,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            StereoKind::Tetrahedral(_) => "tetrahedral",
            StereoKind::DoubleBond(_) => "double-bond",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StereoFocus {
    Atom(AtomRef),
    Bond(BondRef),
}

#[derive(Debug, Clone, PartialEq)]
pub enum StereoCarrier {
    Atom(AtomRef),
    Bond(BondRef),
}

/// Value-like spatial constraint over a focus and its carriers.
///
/// Carrier counts are validated at construction
/// ([`GraphError::MalformedDescriptor`]), never deferred to use. Once built a
/// descriptor is immutable; registry maintenance replaces descriptors rather
/// than mutating them.
#[derive(Debug, Clone, PartialEq)]
pub struct StereoDescriptor {
    kind: StereoKind,
    focus: StereoFocus,
    carriers: Vec<StereoCarrier>,
}

impl StereoDescriptor {
    pub fn new(
        kind: StereoKind,
        focus: StereoFocus,
        carriers: Vec<StereoCarrier>,
    ) -> Result<Self, GraphError> {
        let expected = kind.required_carriers();
        if carriers.len() != expected {
            return Err(GraphError::malformed_descriptor(
                kind.name(),
                expected,
                carriers.len(),
            ));
        }
        Ok(Self {
            kind,
            focus,
            carriers,
        })
    }

    /// Tetrahedral arrangement around `center` over four neighbor atoms.
    pub fn tetrahedral(
        center: &AtomRef,
        winding: Winding,
        carriers: &[AtomRef],
    ) -> Result<Self, GraphError> {
        Self::new(
            StereoKind::Tetrahedral(winding),
            StereoFocus::Atom(center.clone()),
            carriers
                .iter()
                .map(|a| StereoCarrier::Atom(a.clone()))
                .collect(),
        )
    }

    /// Cis/trans configuration around `bond` over its reference atoms, two
    /// per side.
    pub fn double_bond(
        bond: &BondRef,
        alignment: Alignment,
        carriers: &[AtomRef],
    ) -> Result<Self, GraphError> {
        Self::new(
            StereoKind::DoubleBond(alignment),
            StereoFocus::Bond(bond.clone()),
            carriers
                .iter()
                .map(|a| StereoCarrier::Atom(a.clone()))
                .collect(),
        )
    }

    pub fn kind(&self) -> StereoKind {
        self.kind
    }

    pub fn focus(&self) -> &StereoFocus {
        &self.focus
    }

    pub fn carriers(&self) -> &[StereoCarrier] {
        &self.carriers
    }

    /// Whether the focus or any carrier is `atom` (by unwrapped identity).
    pub fn references_atom(&self, atom: &AtomRef) -> bool {
        if matches!(&self.focus, StereoFocus::Atom(a) if a == atom) {
            return true;
        }
        self.carriers
            .iter()
            .any(|c| matches!(c, StereoCarrier::Atom(a) if a == atom))
    }

    /// Whether the focus or any carrier is `bond` (by unwrapped identity).
    pub fn references_bond(&self, bond: &BondRef) -> bool {
        if matches!(&self.focus, StereoFocus::Bond(b) if b == bond) {
            return true;
        }
        self.carriers
            .iter()
            .any(|c| matches!(c, StereoCarrier::Bond(b) if b == bond))
    }

    fn remap_with(
        &self,
        map_atom: &impl Fn(&AtomRef) -> AtomRef,
        map_bond: &impl Fn(&BondRef) -> BondRef,
    ) -> StereoDescriptor {
        let focus = match &self.focus {
            StereoFocus::Atom(a) => StereoFocus::Atom(map_atom(a)),
            StereoFocus::Bond(b) => StereoFocus::Bond(map_bond(b)),
        };
        let carriers = self
            .carriers
            .iter()
            .map(|c| match c {
                StereoCarrier::Atom(a) => StereoCarrier::Atom(map_atom(a)),
                StereoCarrier::Bond(b) => StereoCarrier::Bond(map_bond(b)),
            })
            .collect();
        StereoDescriptor {
            kind: self.kind,
            focus,
            carriers,
        }
    }

    /// Rebuilds the descriptor through a complete identity map. A missing
    /// entry is a broken dependency-order invariant and panics.
    pub(crate) fn remap_strict(&self, map: &IdentityMap) -> StereoDescriptor {
        self.remap_with(&|a| map.mapped_atom(a), &|b| map.mapped_bond(b))
    }

    /// Rebuilds the descriptor through a possibly partial identity map,
    /// keeping any entity the map does not cover. Used for the unit-scale
    /// `{old -> new}` relink of atom replacement.
    pub(crate) fn remap_partial(&self, map: &IdentityMap) -> StereoDescriptor {
        self.remap_with(
            &|a| map.atom(a).unwrap_or_else(|| a.clone()),
            &|b| map.bond(b).unwrap_or_else(|| b.clone()),
        )
    }
}

impl Molecule {
    pub fn add_stereo(&mut self, descriptor: StereoDescriptor) {
        self.stereo.push(descriptor);
        self.changed(ChangeKind::Stereo);
    }

    pub fn stereo_descriptors(&self) -> &[StereoDescriptor] {
        &self.stereo
    }

    #[inline]
    pub fn stereo_count(&self) -> usize {
        self.stereo.len()
    }

    pub fn set_stereo_descriptors(&mut self, descriptors: Vec<StereoDescriptor>) {
        self.stereo = descriptors;
        self.changed(ChangeKind::Stereo);
    }

    /// Replaces every descriptor referencing `old` with a fresh descriptor
    /// built through the one-entry identity map `{old -> new}`.
    pub(crate) fn relink_stereo_atom(&mut self, old: &AtomRef, new: &AtomRef) {
        if self.stereo.iter().all(|d| !d.references_atom(old)) {
            return;
        }
        let mut map = IdentityMap::new();
        map.record_atom(old, new.clone());
        for descriptor in self.stereo.iter_mut() {
            if descriptor.references_atom(old) {
                *descriptor = descriptor.remap_partial(&map);
            }
        }
    }
}
