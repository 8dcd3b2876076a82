//! Generic exclusive-ownership resource container

use std::collections::HashMap;

use thiserror::Error;

/// Resource group errors
///
/// Resource churn is routine, so mutations report result codes instead of
/// panicking; lookups report absence with `Option`/`bool`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    /// An asset with the same key is already stored
    #[error("asset with key '{0}' already exists; incoming asset was destroyed")]
    AlreadyExists(String),

    /// No asset is stored under the key
    #[error("asset with key '{0}' was not found")]
    NotFound(String),
}

/// Capability bound for anything a [`ResourceGroup`] can own
///
/// The group invokes [`destroy`](Resource::destroy) exactly once before
/// releasing an asset, whether through an explicit removal, a rejected
/// duplicate insertion, or group teardown.
pub trait Resource: 'static {
    /// Release anything this resource acquired (GPU buffers, file handles, ...)
    fn destroy(&mut self);
}

/// Exclusive-ownership map from string key to a resource
///
/// A key maps to at most one asset. Ownership is singular and explicit:
/// [`add`](ResourceGroup::add) transfers it in, [`get`](ResourceGroup::get)
/// hands out non-owning references, and every exit path (removal, duplicate
/// rejection, drop of the group) runs the asset's teardown hook first.
pub struct ResourceGroup<T: Resource> {
    resources: HashMap<String, T>,
}

impl<T: Resource> ResourceGroup<T> {
    /// Create an empty group
    pub fn new() -> Self {
        Self {
            resources: HashMap::new(),
        }
    }

    /// Add an asset, passing its memory management to this group
    ///
    /// If an asset with the same key exists, the incoming asset is destroyed
    /// and released immediately - it is not returned or merged - and the call
    /// reports [`ResourceError::AlreadyExists`]. The stored asset is kept.
    pub fn add(&mut self, key: impl Into<String>, mut asset: T) -> Result<(), ResourceError> {
        let key = key.into();
        if self.resources.contains_key(&key) {
            log::error!(
                "resource group: asset with key '{}' already exists; incoming asset destroyed",
                key
            );
            asset.destroy();
            return Err(ResourceError::AlreadyExists(key));
        }

        self.resources.insert(key, asset);
        Ok(())
    }

    /// Borrow an asset; ownership stays with the group
    ///
    /// Logs an error and returns `None` if the key is absent.
    pub fn get(&self, key: &str) -> Option<&T> {
        let asset = self.resources.get(key);
        if asset.is_none() {
            log::error!("resource group: asset with key '{}' was not found", key);
        }
        asset
    }

    /// Mutably borrow an asset; ownership stays with the group
    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.resources.get_mut(key)
    }

    /// Whether an asset is stored under the key
    pub fn has(&self, key: &str) -> bool {
        self.resources.contains_key(key)
    }

    /// Destroy and release the asset stored under the key
    ///
    /// Reports [`ResourceError::NotFound`] - and destroys nothing - if the
    /// key is absent.
    pub fn remove_and_destroy(&mut self, key: &str) -> Result<(), ResourceError> {
        match self.resources.remove(key) {
            Some(mut asset) => {
                asset.destroy();
                Ok(())
            }
            None => Err(ResourceError::NotFound(key.to_string())),
        }
    }

    /// Destroy and release every stored asset
    pub fn clear(&mut self) {
        for (_, mut asset) in self.resources.drain() {
            asset.destroy();
        }
    }

    /// Number of stored assets
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the group holds no assets
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl<T: Resource> Default for ResourceGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> Drop for ResourceGroup<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Asset that counts its teardown calls
    struct CountingAsset {
        marker: u32,
        destroyed: Rc<Cell<u32>>,
    }

    impl CountingAsset {
        fn new(marker: u32, destroyed: &Rc<Cell<u32>>) -> Self {
            Self {
                marker,
                destroyed: Rc::clone(destroyed),
            }
        }
    }

    impl Resource for CountingAsset {
        fn destroy(&mut self) {
            self.destroyed.set(self.destroyed.get() + 1);
        }
    }

    #[test]
    fn test_add_then_get_shares_by_reference() {
        let destroyed = Rc::new(Cell::new(0));
        let mut group = ResourceGroup::new();

        group
            .add("mesh1", CountingAsset::new(7, &destroyed))
            .unwrap();
        assert!(group.has("mesh1"));
        assert_eq!(group.get("mesh1").unwrap().marker, 7);
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn test_duplicate_key_destroys_incoming_and_keeps_original() {
        let destroyed = Rc::new(Cell::new(0));
        let mut group = ResourceGroup::new();

        group
            .add("mesh1", CountingAsset::new(1, &destroyed))
            .unwrap();
        let err = group
            .add("mesh1", CountingAsset::new(2, &destroyed))
            .unwrap_err();

        assert_eq!(err, ResourceError::AlreadyExists("mesh1".to_string()));
        // The incoming asset is gone, the original is untouched.
        assert_eq!(destroyed.get(), 1);
        assert_eq!(group.get("mesh1").unwrap().marker, 1);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let group: ResourceGroup<CountingAsset> = ResourceGroup::new();
        assert!(group.get("nope").is_none());
        assert!(!group.has("nope"));
    }

    #[test]
    fn test_remove_and_destroy_present_key() {
        let destroyed = Rc::new(Cell::new(0));
        let mut group = ResourceGroup::new();
        group
            .add("mesh1", CountingAsset::new(1, &destroyed))
            .unwrap();

        group.remove_and_destroy("mesh1").unwrap();
        assert_eq!(destroyed.get(), 1);
        assert!(!group.has("mesh1"));
    }

    #[test]
    fn test_remove_and_destroy_absent_key_destroys_nothing() {
        let destroyed = Rc::new(Cell::new(0));
        let mut group = ResourceGroup::new();
        group
            .add("mesh1", CountingAsset::new(1, &destroyed))
            .unwrap();

        let err = group.remove_and_destroy("other").unwrap_err();
        assert_eq!(err, ResourceError::NotFound("other".to_string()));
        assert_eq!(destroyed.get(), 0);
        assert!(group.has("mesh1"));
    }

    #[test]
    fn test_drop_destroys_every_asset() {
        let destroyed = Rc::new(Cell::new(0));
        {
            let mut group = ResourceGroup::new();
            group
                .add("a", CountingAsset::new(1, &destroyed))
                .unwrap();
            group
                .add("b", CountingAsset::new(2, &destroyed))
                .unwrap();
        }
        assert_eq!(destroyed.get(), 2);
    }
}
