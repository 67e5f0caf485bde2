//! Render Map - Typed registry of render functions.
//!
//! Maps a [`ComponentType`] to the [`RenderFn`] that draws it. Lookups happen
//! once per descriptor per resolution pass; a type with no entry is simply not
//! rendered, never an error.
//!
//! Maps can be assembled from several sources. [`RenderMap::insert`] and
//! [`RenderMap::extend`] let later sources override earlier ones, while
//! [`RenderMap::register`] refuses to shadow an existing entry.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::descriptor::ComponentDescriptor;
use crate::types::{Cleanup, ComponentType, RenderFn};

/// Errors raised by strict registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderMapError {
    #[error("a render function is already registered for component type `{0}`")]
    DuplicateType(ComponentType),
}

/// Mapping from component type to render function.
#[derive(Clone, Default)]
pub struct RenderMap {
    entries: HashMap<ComponentType, RenderFn>,
}

impl RenderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the render function for `component_type`.
    ///
    /// Returns the replaced function, if any.
    pub fn insert<F>(&mut self, component_type: impl Into<ComponentType>, render: F) -> Option<RenderFn>
    where
        F: Fn(&ComponentDescriptor) -> Cleanup + 'static,
    {
        self.insert_shared(component_type, Rc::new(render))
    }

    /// Insert an already shared render function.
    pub fn insert_shared(
        &mut self,
        component_type: impl Into<ComponentType>,
        render: RenderFn,
    ) -> Option<RenderFn> {
        let component_type = component_type.into();
        let previous = self.entries.insert(component_type.clone(), render);
        if previous.is_some() {
            debug!("render function for `{component_type}` replaced");
        }
        previous
    }

    /// Builder form of [`RenderMap::insert`].
    pub fn with<F>(mut self, component_type: impl Into<ComponentType>, render: F) -> Self
    where
        F: Fn(&ComponentDescriptor) -> Cleanup + 'static,
    {
        self.insert(component_type, render);
        self
    }

    /// Register a render function, rejecting a type that is already present.
    pub fn register<F>(
        &mut self,
        component_type: impl Into<ComponentType>,
        render: F,
    ) -> Result<(), RenderMapError>
    where
        F: Fn(&ComponentDescriptor) -> Cleanup + 'static,
    {
        let component_type = component_type.into();
        if self.entries.contains_key(&component_type) {
            return Err(RenderMapError::DuplicateType(component_type));
        }
        self.entries.insert(component_type, Rc::new(render));
        Ok(())
    }

    pub fn get(&self, component_type: &str) -> Option<&RenderFn> {
        self.entries.get(component_type)
    }

    pub fn contains(&self, component_type: &str) -> bool {
        self.entries.contains_key(component_type)
    }

    pub fn remove(&mut self, component_type: &str) -> Option<RenderFn> {
        self.entries.remove(component_type)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered types in sorted order.
    pub fn types(&self) -> Vec<&ComponentType> {
        let mut types: Vec<_> = self.entries.keys().collect();
        types.sort();
        types
    }

    /// Copy every entry of `other` into `self`. Entries of `other` win.
    pub fn extend(&mut self, other: &RenderMap) {
        for (component_type, render) in &other.entries {
            self.insert_shared(component_type.clone(), Rc::clone(render));
        }
    }

    /// Merge maps left to right; later maps override earlier ones.
    pub fn merged<'a>(maps: impl IntoIterator<Item = &'a RenderMap>) -> RenderMap {
        let mut merged = RenderMap::new();
        for map in maps {
            merged.extend(map);
        }
        merged
    }
}

impl PartialEq for RenderMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(component_type, render)| {
                other
                    .entries
                    .get(component_type)
                    .is_some_and(|theirs| Rc::ptr_eq(render, theirs))
            })
    }
}

impl fmt::Debug for RenderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RenderMap").field(&self.types()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn noop(_: &ComponentDescriptor) -> Cleanup {
        Box::new(|| {})
    }

    #[test]
    fn test_insert_and_lookup() {
        let map = RenderMap::new().with("card", noop).with("toast", noop);

        assert_eq!(map.len(), 2);
        assert!(map.contains("card"));
        assert!(map.get("toast").is_some());
        assert!(map.get("dialog").is_none());
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut map = RenderMap::new();
        map.register("card", noop).unwrap();

        let err = map.register("card", noop).unwrap_err();
        assert_eq!(err, RenderMapError::DuplicateType(ComponentType::from("card")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_merged_later_maps_win() {
        let hits = Rc::new(Cell::new(0));
        let hits_clone = hits.clone();

        let base = RenderMap::new().with("card", noop).with("toast", noop);
        let overrides = RenderMap::new().with("card", move |_: &ComponentDescriptor| {
            hits_clone.set(hits_clone.get() + 1);
            Box::new(|| {}) as Cleanup
        });

        let merged = RenderMap::merged([&base, &overrides]);
        assert_eq!(merged.len(), 2);

        let render = merged.get("card").unwrap();
        let _cleanup = render(&ComponentDescriptor::new("1", "card"));
        assert_eq!(hits.get(), 1, "override should replace the base render function");
        assert!(Rc::ptr_eq(merged.get("toast").unwrap(), base.get("toast").unwrap()));
    }

    #[test]
    fn test_equality_is_entry_identity() {
        let map = RenderMap::new().with("card", noop);
        let copy = map.clone();
        let rebuilt = RenderMap::new().with("card", noop);

        assert_eq!(map, copy);
        assert_ne!(map, rebuilt);
    }

    #[test]
    fn test_types_sorted() {
        let map = RenderMap::new().with("toast", noop).with("card", noop);
        let types: Vec<&str> = map.types().into_iter().map(|t| t.as_str()).collect();
        assert_eq!(types, vec!["card", "toast"]);
    }
}
