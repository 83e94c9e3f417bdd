//! Entity registry module
//!
//! This module provides the `EntityRegistry` struct, the keyed storage both
//! engines build on. A registry holds entities in insertion order and indexes
//! them by a unique key derived from the entity itself.
//!
//! The registry is responsible for:
//! - Rejecting duplicate keys on insert
//! - O(1) keyed lookup
//! - Insertion-ordered iteration for deterministic listings
//! - Restartable filtered iteration

use crate::types::BookkeepingError;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// An entity that can live in a registry
///
/// The key must identify the entity uniquely within one registry and is
/// derived from the entity's own fields, so an entity can never be filed
/// under the wrong key.
pub trait Entity {
    /// The key type entities of this kind are indexed by
    type Key: Eq + Hash + Clone + Display;

    /// The entity's own key
    fn key(&self) -> Self::Key;
}

/// Keyed, insertion-ordered entity storage
///
/// Entities are stored in a `Vec` in the order they were added; a side
/// index maps each key to its slot. Iteration order is therefore the
/// insertion order, which keeps listings and tie-breaks deterministic.
pub struct EntityRegistry<E: Entity> {
    /// Entities in insertion order
    slots: Vec<E>,

    /// Map from entity key to slot position
    index: HashMap<E::Key, usize>,
}

impl<E: Entity> EntityRegistry<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        EntityRegistry {
            slots: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add an entity under its own key
    ///
    /// # Arguments
    ///
    /// * `entity` - The entity to store
    ///
    /// # Errors
    ///
    /// Returns `DuplicateKey` if an entity with the same key is already
    /// registered; the existing entity is left untouched.
    pub fn add(&mut self, entity: E) -> Result<(), BookkeepingError> {
        let key = entity.key();
        if self.index.contains_key(&key) {
            return Err(BookkeepingError::duplicate_key(key));
        }

        self.index.insert(key, self.slots.len());
        self.slots.push(entity);
        Ok(())
    }

    /// Look up an entity by key
    ///
    /// Accepts any borrowed form of the key, mirroring `HashMap::get`.
    ///
    /// # Returns
    ///
    /// A reference to the entity, or `None` if the key is not registered.
    pub fn get<Q>(&self, key: &Q) -> Option<&E>
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &self.slots[slot])
    }

    /// Look up an entity by key for mutation
    ///
    /// # Returns
    ///
    /// A mutable reference to the entity, or `None` if the key is not
    /// registered.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut E>
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&slot| &mut self.slots[slot])
    }

    /// Whether an entity with this key is registered
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        E::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Iterate over all entities in insertion order
    pub fn all(&self) -> impl Iterator<Item = &E> + '_ {
        self.slots.iter()
    }

    /// Iterate over the entities matching a predicate, in insertion order
    ///
    /// Each call produces a fresh iterator, so the same filter can be
    /// walked any number of times.
    pub fn filter<'a, P>(&'a self, predicate: P) -> impl Iterator<Item = &'a E> + 'a
    where
        P: Fn(&E) -> bool + 'a,
    {
        self.slots.iter().filter(move |entity| predicate(entity))
    }

    /// Number of registered entities
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True if nothing is registered
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<E: Entity> Default for EntityRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Widget {
        name: String,
        size: u32,
    }

    impl Widget {
        fn new(name: &str, size: u32) -> Self {
            Widget {
                name: name.to_string(),
                size,
            }
        }
    }

    impl Entity for Widget {
        type Key = String;

        fn key(&self) -> String {
            self.name.clone()
        }
    }

    #[test]
    fn test_new_creates_empty_registry() {
        let registry: EntityRegistry<Widget> = EntityRegistry::new();
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_add_and_get() {
        let mut registry = EntityRegistry::new();

        registry.add(Widget::new("bolt", 5)).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains("bolt"));
        assert_eq!(registry.get("bolt"), Some(&Widget::new("bolt", 5)));
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let registry: EntityRegistry<Widget> = EntityRegistry::new();
        assert_eq!(registry.get("bolt"), None);
        assert!(!registry.contains("bolt"));
    }

    #[test]
    fn test_add_duplicate_key_is_rejected() {
        let mut registry = EntityRegistry::new();
        registry.add(Widget::new("bolt", 5)).unwrap();

        let result = registry.add(Widget::new("bolt", 9));

        assert_eq!(
            result,
            Err(BookkeepingError::DuplicateKey {
                key: "bolt".to_string()
            })
        );

        // The original entity is untouched
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("bolt"), Some(&Widget::new("bolt", 5)));
    }

    #[test]
    fn test_get_mut_mutation_is_visible() {
        let mut registry = EntityRegistry::new();
        registry.add(Widget::new("bolt", 5)).unwrap();

        if let Some(widget) = registry.get_mut("bolt") {
            widget.size = 7;
        }

        assert_eq!(registry.get("bolt"), Some(&Widget::new("bolt", 7)));
    }

    #[test]
    fn test_all_yields_insertion_order() {
        let mut registry = EntityRegistry::new();
        registry.add(Widget::new("gamma", 3)).unwrap();
        registry.add(Widget::new("alpha", 1)).unwrap();
        registry.add(Widget::new("beta", 2)).unwrap();

        let names: Vec<&str> = registry.all().map(|widget| widget.name.as_str()).collect();
        assert_eq!(names, vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn test_filter_matches_in_insertion_order() {
        let mut registry = EntityRegistry::new();
        registry.add(Widget::new("a", 10)).unwrap();
        registry.add(Widget::new("b", 1)).unwrap();
        registry.add(Widget::new("c", 10)).unwrap();

        let big: Vec<&str> = registry
            .filter(|widget| widget.size == 10)
            .map(|widget| widget.name.as_str())
            .collect();
        assert_eq!(big, vec!["a", "c"]);
    }

    #[test]
    fn test_filter_is_restartable() {
        let mut registry = EntityRegistry::new();
        registry.add(Widget::new("a", 10)).unwrap();
        registry.add(Widget::new("b", 10)).unwrap();

        // Two walks over the same filter see the same matches
        let first: Vec<&Widget> = registry.filter(|widget| widget.size == 10).collect();
        let second: Vec<&Widget> = registry.filter(|widget| widget.size == 10).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_filter_with_no_matches_is_empty() {
        let mut registry = EntityRegistry::new();
        registry.add(Widget::new("a", 10)).unwrap();

        assert_eq!(registry.filter(|widget| widget.size == 99).count(), 0);
    }

    #[test]
    fn test_filter_predicate_can_borrow_locals() {
        let mut registry = EntityRegistry::new();
        registry.add(Widget::new("bolt", 5)).unwrap();
        registry.add(Widget::new("nut", 5)).unwrap();

        // The predicate captures a local that lives shorter than the registry
        let wanted = String::from("nut");
        let names: Vec<&str> = registry
            .filter(|widget| widget.name == wanted)
            .map(|widget| widget.name.as_str())
            .collect();
        assert_eq!(names, vec!["nut"]);
    }
}
