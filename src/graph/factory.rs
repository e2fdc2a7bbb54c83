//! Explicit container construction policy.
//!
//! Producers that build many containers (format readers, fragment
//! generators) hold a [`StructureFactory`] value and ask it for containers,
//! instead of consulting any process-wide builder. Several independently
//! configured factories can coexist in one process.

use super::container::Molecule;

/// Whether containers broadcast structural mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyMode {
    /// No listener bookkeeping; the right choice for bulk construction.
    #[default]
    Silent,
    /// One broadcast per completed mutation.
    Notifying,
}

/// Factory value deciding the notify variant of the containers it creates.
#[derive(Debug, Clone, Default)]
pub struct StructureFactory {
    mode: NotifyMode,
}

impl StructureFactory {
    pub fn new(mode: NotifyMode) -> Self {
        Self { mode }
    }

    pub fn silent() -> Self {
        Self::new(NotifyMode::Silent)
    }

    pub fn notifying() -> Self {
        Self::new(NotifyMode::Notifying)
    }

    pub fn mode(&self) -> NotifyMode {
        self.mode
    }

    pub fn create(&self) -> Molecule {
        Molecule::with_mode(self.mode == NotifyMode::Notifying)
    }

    pub fn create_with_capacity(&self, atoms: usize, bonds: usize) -> Molecule {
        Molecule::with_mode_and_capacity(self.mode == NotifyMode::Notifying, atoms, bonds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_modes() {
        assert!(!StructureFactory::silent().create().is_notifying());
        assert!(StructureFactory::notifying().create().is_notifying());
        assert_eq!(StructureFactory::default().mode(), NotifyMode::Silent);
    }

    #[test]
    fn independent_factories_coexist() {
        let bulk = StructureFactory::silent();
        let interactive = StructureFactory::notifying();
        let a = bulk.create_with_capacity(128, 128);
        let b = interactive.create();
        assert!(!a.is_notifying());
        assert!(b.is_notifying());
    }
}
