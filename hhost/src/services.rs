//! Type-keyed singleton service registry shared by builders and applications.

use std::any::{Any, TypeId};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use hcommon::Registry;

#[derive(Clone, Default)]
pub struct ServiceRegistry {
    items: Registry<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value` as the singleton for `T`, returning `true` if it replaced one.
    pub fn insert<T>(&mut self, value: T) -> bool
    where
        T: Any + Send + Sync,
    {
        self.items
            .insert(TypeId::of::<T>(), Arc::new(value))
            .is_some()
    }

    pub fn get<T>(&self) -> Option<T>
    where
        T: Any + Send + Sync + Clone,
    {
        self.items
            .get(&TypeId::of::<T>())
            .and_then(|service| service.downcast_ref::<T>())
            .cloned()
    }

    pub fn contains<T>(&self) -> bool
    where
        T: Any + Send + Sync,
    {
        self.items.contains_key(&TypeId::of::<T>())
    }

    pub fn remove<T>(&mut self) -> bool
    where
        T: Any + Send + Sync,
    {
        self.items.remove(&TypeId::of::<T>()).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Debug for ServiceRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("len", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Marker(&'static str);

    #[test]
    fn registry_resolves_by_type() {
        let mut services = ServiceRegistry::new();
        assert!(!services.insert(Marker("first")));
        assert!(services.insert(Marker("second")));

        assert_eq!(services.get::<Marker>(), Some(Marker("second")));
        assert_eq!(services.get::<String>(), None);
        assert_eq!(services.len(), 1);

        assert!(services.remove::<Marker>());
        assert!(!services.contains::<Marker>());
    }
}
