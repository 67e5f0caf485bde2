//! Relocation Store - Reactive source of truth for live descriptors.
//!
//! Holds the descriptor list in a spark-signals `Signal`, so any derived or
//! effect that reads [`RelocationStore::components`] re-runs when components
//! are added or removed. Cloning the store clones the signal handle; every
//! clone sees the same list.
//!
//! # Example
//!
//! ```ignore
//! use spark_relocation::{ComponentDescriptor, RelocationStore};
//!
//! let store = RelocationStore::new();
//! store.add(ComponentDescriptor::new("toast-1", "toast"));
//!
//! assert!(store.contains(&"toast-1".into()));
//! store.remove(&"toast-1".into());
//! assert!(store.is_empty());
//! ```

use std::fmt;
use std::rc::Rc;

use log::{debug, warn};
use serde_json::Value;
use spark_signals::{signal, untrack, Signal};

use super::{ComponentSource, RemoveDispatch, StateGetter};
use crate::compositor::InputProps;
use crate::descriptor::{parse_components, ComponentDescriptor, DescriptorError};
use crate::types::{ComponentId, RemoveOutput};

#[derive(Clone)]
pub struct RelocationStore {
    components: Signal<Vec<Rc<ComponentDescriptor>>>,
}

impl RelocationStore {
    pub fn new() -> Self {
        Self {
            components: signal(Vec::new()),
        }
    }

    /// Create a store seeded with `components`.
    ///
    /// Duplicate ids follow the same rule as [`RelocationStore::add`].
    pub fn from_components(components: impl IntoIterator<Item = ComponentDescriptor>) -> Self {
        let store = Self::new();
        store.set_all(components);
        store
    }

    /// Create a store from a JSON component list.
    pub fn from_json(value: &Value) -> Result<Self, DescriptorError> {
        Ok(Self::from_components(parse_components(value)?))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current descriptor list. Reading inside a derived or effect tracks it.
    pub fn components(&self) -> Vec<Rc<ComponentDescriptor>> {
        self.components.get()
    }

    pub fn get(&self, id: &ComponentId) -> Option<Rc<ComponentDescriptor>> {
        self.components().into_iter().find(|c| &c.id == id)
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.components().iter().any(|c| &c.id == id)
    }

    pub fn len(&self) -> usize {
        self.components().len()
    }

    pub fn is_empty(&self) -> bool {
        self.components().is_empty()
    }

    /// Current list, read without tracking. Write paths must not subscribe
    /// the running effect.
    fn snapshot(&self) -> Vec<Rc<ComponentDescriptor>> {
        untrack(|| self.components.get())
    }

    /// The underlying signal, for callers wiring their own effects.
    pub fn signal(&self) -> Signal<Vec<Rc<ComponentDescriptor>>> {
        self.components.clone()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Append a descriptor.
    ///
    /// Ids must be unique among live descriptors. Adding an id that is already
    /// present replaces the existing descriptor in place and logs a warning.
    pub fn add(&self, component: ComponentDescriptor) -> Rc<ComponentDescriptor> {
        let component = Rc::new(component);
        let mut components = self.snapshot();

        match components.iter().position(|c| c.id == component.id) {
            Some(position) => {
                warn!(
                    "duplicate component id `{}`; replacing the existing descriptor",
                    component.id
                );
                components[position] = Rc::clone(&component);
            }
            None => components.push(Rc::clone(&component)),
        }

        self.components.set(components);
        component
    }

    /// Remove the descriptor with `id`. Returns whether one was removed.
    pub fn remove(&self, id: &ComponentId) -> bool {
        let mut components = self.snapshot();
        let before = components.len();
        components.retain(|c| &c.id != id);

        if components.len() == before {
            debug!("remove: no component with id `{id}`");
            return false;
        }

        self.components.set(components);
        true
    }

    /// Replace the whole list.
    pub fn set_all(&self, components: impl IntoIterator<Item = ComponentDescriptor>) {
        let mut list: Vec<Rc<ComponentDescriptor>> = Vec::new();
        for component in components {
            match list.iter().position(|c| c.id == component.id) {
                Some(position) => {
                    warn!(
                        "duplicate component id `{}`; keeping the last descriptor",
                        component.id
                    );
                    list[position] = Rc::new(component);
                }
                None => list.push(Rc::new(component)),
            }
        }
        self.components.set(list);
    }

    /// Replace the whole list from JSON. Returns the number of descriptors kept.
    pub fn replace_from_json(&self, value: &Value) -> Result<usize, DescriptorError> {
        let components = parse_components(value)?;
        self.set_all(components);
        Ok(self.snapshot().len())
    }

    pub fn clear(&self) {
        self.components.set(Vec::new());
    }
}

impl Default for RelocationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RelocationStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelocationStore")
            .field("components", &self.snapshot())
            .finish()
    }
}

impl ComponentSource for RelocationStore {
    fn select(
        &self,
        _props: &InputProps,
        state: Option<&StateGetter>,
    ) -> Vec<Rc<ComponentDescriptor>> {
        match state {
            Some(get_state) => get_state().components(),
            None => self.components(),
        }
    }
}

impl RemoveDispatch for RelocationStore {
    fn remove_component(&self, id: &ComponentId) -> RemoveOutput {
        Value::Bool(self.remove(id))
    }
}
