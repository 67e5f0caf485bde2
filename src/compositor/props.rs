//! Input and output records of a resolution pass.
//!
//! Configuration and ambient props travel in separate typed fields, so the
//! compositor can forward the ambient props verbatim without ever leaking its
//! own configuration downstream.

use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{Map, Value};

use super::options::RelocationConfig;
use crate::descriptor::ComponentDescriptor;

/// Output key holding the resolved components.
pub const COMPONENTS_KEY: &str = "components";

// =============================================================================
// Input
// =============================================================================

/// Props handed to the compositor for one pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputProps {
    /// Configuration read by an unscoped compositor.
    pub relocation: RelocationConfig,
    /// Configuration read by a scoped compositor, keyed by scope.
    pub scoped: HashMap<String, RelocationConfig>,
    /// Everything else; passed through to the output.
    pub ambient: Map<String, Value>,
}

impl InputProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: RelocationConfig) -> Self {
        self.relocation = config;
        self
    }

    pub fn with_scoped_config(mut self, scope: impl Into<String>, config: RelocationConfig) -> Self {
        self.scoped.insert(scope.into(), config);
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.ambient.insert(key.into(), value);
        self
    }

    /// Configuration for `scope`, or the unscoped configuration.
    pub fn config_for(&self, scope: Option<&str>) -> Option<&RelocationConfig> {
        match scope {
            Some(scope) => self.scoped.get(scope),
            None => Some(&self.relocation),
        }
    }
}

// =============================================================================
// Output
// =============================================================================

/// Where the resolved components were placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Placement {
    /// At `components`.
    TopLevel,
    /// At `{scope}.components`.
    Scoped(String),
}

/// Result of a resolution pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedProps {
    /// Default ambient props overridden by input ambient props.
    pub ambient: Map<String, Value>,
    placement: Placement,
    components: Vec<Rc<ComponentDescriptor>>,
}

impl ResolvedProps {
    pub(crate) fn new(
        ambient: Map<String, Value>,
        placement: Placement,
        components: Vec<Rc<ComponentDescriptor>>,
    ) -> Self {
        Self {
            ambient,
            placement,
            components,
        }
    }

    /// Components at the top level. `None` when the output is scoped.
    pub fn components(&self) -> Option<&[Rc<ComponentDescriptor>]> {
        match self.placement {
            Placement::TopLevel => Some(&self.components),
            Placement::Scoped(_) => None,
        }
    }

    /// Components under `scope`. `None` unless the output is scoped by `scope`.
    pub fn scoped(&self, scope: &str) -> Option<&[Rc<ComponentDescriptor>]> {
        match &self.placement {
            Placement::Scoped(own) if own == scope => Some(&self.components),
            _ => None,
        }
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Resolved components wherever they were placed.
    pub fn resolved(&self) -> &[Rc<ComponentDescriptor>] {
        &self.components
    }

    pub fn into_components(self) -> Vec<Rc<ComponentDescriptor>> {
        self.components
    }

    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.ambient.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_for_scope() {
        let props = InputProps::new()
            .with_scoped_config("sidebar", RelocationConfig::new())
            .with_prop("title", json!("x"));

        assert!(props.config_for(None).is_some());
        assert!(props.config_for(Some("sidebar")).is_some());
        assert!(props.config_for(Some("main")).is_none());
    }

    #[test]
    fn test_placement_accessors() {
        let list = vec![Rc::new(ComponentDescriptor::new("1", "a"))];

        let top = ResolvedProps::new(Map::new(), Placement::TopLevel, list.clone());
        assert_eq!(top.components().map(<[_]>::len), Some(1));
        assert!(top.scoped("s").is_none());

        let scoped = ResolvedProps::new(Map::new(), Placement::Scoped("s".into()), list);
        assert!(scoped.components().is_none());
        assert_eq!(scoped.scoped("s").map(<[_]>::len), Some(1));
        assert!(scoped.scoped("other").is_none());
        assert_eq!(scoped.resolved().len(), 1);
    }
}
