//! Core types for spark-relocation.
//!
//! These types define the vocabulary every stage of the compositor speaks:
//! component identity, the render-map key, and the callable shapes that flow
//! from the render map and the removal side effect into resolved descriptors.

use std::borrow::Borrow;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::descriptor::ComponentDescriptor;

// =============================================================================
// Callables
// =============================================================================

/// Cleanup function returned by render functions.
///
/// Call this to unmount whatever the render function created.
pub type Cleanup = Box<dyn FnOnce()>;

/// Value returned by a removal handler.
///
/// Default handlers return whatever the removal side effect returns. Handlers
/// that only navigate return `Value::Null`.
pub type RemoveOutput = Value;

/// Zero-argument removal handler attached to a resolved descriptor.
///
/// Rc rather than Box so the same handler can be shared between the input
/// descriptor and its resolved copy (identity is observable, see
/// [`crate::engine::assign_remove_handler`]).
pub type RemoveHandler = Rc<dyn Fn() -> RemoveOutput>;

/// Render function resolved from the render map.
///
/// Receives the fully resolved descriptor (props, scope, remove handler) and
/// returns the cleanup for whatever it mounted.
pub type RenderFn = Rc<dyn Fn(&ComponentDescriptor) -> Cleanup>;

// =============================================================================
// Component Identity
// =============================================================================

/// Opaque component identifier.
///
/// Unique among live descriptors in a store. Numeric ids from JSON state are
/// stored in their decimal form so `1` and `"1"` address the same component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ComponentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

// =============================================================================
// Component Type
// =============================================================================

/// Discriminator used to look up a render function in the render map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentType(String);

impl ComponentType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets the render map be queried with a plain &str.
impl Borrow<str> for ComponentType {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ComponentType {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for ComponentType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_numeric_and_string_ids_match() {
        assert_eq!(ComponentId::from(7u64), ComponentId::from("7"));
        assert_eq!(ComponentId::new("panel").to_string(), "panel");
    }

    #[test]
    fn test_component_type_borrows_as_str() {
        let mut map = HashMap::new();
        map.insert(ComponentType::from("dialog"), 1);

        assert_eq!(map.get("dialog"), Some(&1));
        assert_eq!(map.get("missing"), None);
    }
}
