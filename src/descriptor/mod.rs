//! Component Descriptors - Declarative units of dynamic UI.
//!
//! A descriptor names a component by `id`, selects its render function by
//! `component_type`, and carries an opaque `props` payload plus the removal
//! configuration the compositor merges into a single handler.
//!
//! Descriptors are shared as `Rc<ComponentDescriptor>` and never mutated once
//! shared. Each compositor stage derives a fresh value through one of the
//! copy constructors ([`ComponentDescriptor::rendered_by`],
//! [`ComponentDescriptor::in_scope`], [`ComponentDescriptor::with_resolved_remove`]),
//! so an untouched descriptor keeps its pointer identity.
//!
//! # Example
//!
//! ```ignore
//! use spark_relocation::{ComponentDescriptor, RemoveSpec};
//! use serde_json::json;
//!
//! let toast = ComponentDescriptor::new("toast-1", "toast")
//!     .with_props(json!({ "message": "Saved" }))
//!     .with_remove_path("/inbox");
//!
//! let pinned = ComponentDescriptor::new("banner", "banner")
//!     .with_remove(RemoveSpec::Disabled);
//! ```

mod parse;
mod remove;

pub use parse::{parse_components, DescriptorError};
pub use remove::RemoveSpec;

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::types::{Cleanup, ComponentId, ComponentType, RemoveHandler, RemoveOutput, RenderFn};

/// One dynamically rendered unit.
#[derive(Clone)]
pub struct ComponentDescriptor {
    /// Key used by the default removal handler.
    pub id: ComponentId,
    /// Render-map key.
    pub component_type: ComponentType,
    /// Opaque payload handed to the render function unchanged.
    pub props: Value,
    /// Authored removal configuration, replaced by the resolved handler.
    pub remove: RemoveSpec,
    /// Path to navigate to when the component is removed.
    pub remove_path: Option<String>,
    /// Set by the compositor when it is configured with a scope.
    pub scope: Option<String>,
    /// Set by the compositor from the render map.
    pub render: Option<RenderFn>,
}

impl ComponentDescriptor {
    pub fn new(id: impl Into<ComponentId>, component_type: impl Into<ComponentType>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            props: Value::Null,
            remove: RemoveSpec::Unset,
            remove_path: None,
            scope: None,
            render: None,
        }
    }

    // =========================================================================
    // Authoring
    // =========================================================================

    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }

    pub fn with_remove(mut self, remove: RemoveSpec) -> Self {
        self.remove = remove;
        self
    }

    /// Shorthand for `with_remove(RemoveSpec::handler(f))`.
    pub fn with_remove_handler(self, f: impl Fn() -> RemoveOutput + 'static) -> Self {
        self.with_remove(RemoveSpec::handler(f))
    }

    pub fn with_remove_path(mut self, path: impl Into<String>) -> Self {
        self.remove_path = Some(path.into());
        self
    }

    // =========================================================================
    // Stage copies
    // =========================================================================

    /// Copy with `render` set.
    pub fn rendered_by(&self, render: &RenderFn) -> Self {
        Self {
            render: Some(Rc::clone(render)),
            ..self.clone()
        }
    }

    /// Copy with `scope` set.
    pub fn in_scope(&self, scope: &str) -> Self {
        Self {
            scope: Some(scope.to_string()),
            ..self.clone()
        }
    }

    /// Copy with `remove` replaced by the resolved handler.
    pub fn with_resolved_remove(&self, handler: RemoveHandler) -> Self {
        Self {
            remove: RemoveSpec::Handler(handler),
            ..self.clone()
        }
    }

    // =========================================================================
    // Consumption
    // =========================================================================

    /// The resolved removal handler, if any.
    pub fn remove_handler(&self) -> Option<&RemoveHandler> {
        self.remove.as_handler()
    }

    /// Run the removal handler. `None` when the descriptor has none.
    pub fn invoke_remove(&self) -> Option<RemoveOutput> {
        self.remove_handler().map(|handler| handler())
    }

    /// Run the bound render function. `None` before the render-bind stage.
    pub fn render_component(&self) -> Option<Cleanup> {
        self.render.as_ref().map(|render| render(self))
    }
}

impl PartialEq for ComponentDescriptor {
    fn eq(&self, other: &Self) -> bool {
        let same_render = match (&self.render, &other.render) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };

        same_render
            && self.id == other.id
            && self.component_type == other.component_type
            && self.props == other.props
            && self.remove == other.remove
            && self.remove_path == other.remove_path
            && self.scope == other.scope
    }
}

impl fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("id", &self.id)
            .field("component_type", &self.component_type)
            .field("props", &self.props)
            .field("remove", &self.remove)
            .field("remove_path", &self.remove_path)
            .field("scope", &self.scope)
            .field("render", &self.render.is_some())
            .finish()
    }
}
