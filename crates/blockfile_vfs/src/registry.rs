//! Process-wide VFS registry.

use crate::vfs::Vfs;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A name-keyed registry of VFS implementations.
///
/// At startup the host registers the block-device VFS here; the engine
/// then looks it up by its registered name (or takes the default) when
/// opening a database.
///
/// # Example
///
/// ```rust
/// use blockfile_device::MemDevice;
/// use blockfile_vfs::{BlockVfs, VfsRegistry, VFS_NAME};
/// use std::sync::Arc;
///
/// let registry = VfsRegistry::new();
/// let vfs = Arc::new(BlockVfs::new(Arc::new(MemDevice::new(512, 16))));
/// registry.register(vfs, true);
///
/// assert!(registry.find(VFS_NAME).is_some());
/// assert!(registry.default_vfs().is_some());
/// ```
#[derive(Default)]
pub struct VfsRegistry {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    by_name: HashMap<String, Arc<dyn Vfs>>,
    default_name: Option<String>,
}

impl VfsRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a VFS under its own name.
    ///
    /// Re-registering a name replaces the previous entry. If
    /// `make_default` is set (or no default exists yet), the VFS becomes
    /// the default.
    pub fn register(&self, vfs: Arc<dyn Vfs>, make_default: bool) {
        let name = vfs.name().to_string();
        let mut inner = self.inner.write();

        if make_default || inner.default_name.is_none() {
            inner.default_name = Some(name.clone());
        }
        inner.by_name.insert(name, vfs);
    }

    /// Looks up a VFS by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<Arc<dyn Vfs>> {
        self.inner.read().by_name.get(name).cloned()
    }

    /// Returns the default VFS, if any is registered.
    #[must_use]
    pub fn default_vfs(&self) -> Option<Arc<dyn Vfs>> {
        let inner = self.inner.read();
        let name = inner.default_name.as_ref()?;
        inner.by_name.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::{BlockVfs, VFS_NAME};
    use blockfile_device::MemDevice;

    fn block_vfs() -> Arc<dyn Vfs> {
        Arc::new(BlockVfs::new(Arc::new(MemDevice::new(512, 8))))
    }

    #[test]
    fn find_registered_vfs_by_name() {
        let registry = VfsRegistry::new();
        registry.register(block_vfs(), false);

        assert!(registry.find(VFS_NAME).is_some());
        assert!(registry.find("missing").is_none());
    }

    #[test]
    fn first_registration_becomes_default() {
        let registry = VfsRegistry::new();
        registry.register(block_vfs(), false);

        let default = registry.default_vfs().unwrap();
        assert_eq!(default.name(), VFS_NAME);
    }

    #[test]
    fn empty_registry_has_no_default() {
        let registry = VfsRegistry::new();
        assert!(registry.default_vfs().is_none());
        assert!(registry.find(VFS_NAME).is_none());
    }

    #[test]
    fn reregistering_replaces_entry() {
        let registry = VfsRegistry::new();
        let first = block_vfs();
        let second = block_vfs();

        registry.register(first.clone(), true);
        registry.register(second.clone(), true);

        let found = registry.find(VFS_NAME).unwrap();
        assert!(Arc::ptr_eq(&found, &second));
        assert!(!Arc::ptr_eq(&found, &first));
    }
}
