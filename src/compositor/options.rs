//! Compositor configuration.
//!
//! [`ConnectOptions`] is fixed when the compositor is built: an optional scope,
//! a default [`RelocationConfig`] and default ambient props. Per-pass
//! configuration arrives through [`crate::compositor::InputProps`] and is
//! merged over the defaults.
//!
//! Options can be loaded from JSON. `scope` is read as the scope label; every
//! other key becomes a default ambient prop:
//!
//! ```json
//! { "scope": "sidebar", "title": "Tools", "collapsible": true }
//! ```

use std::fmt;
use std::rc::Rc;

use log::warn;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::engine::RenderMap;
use crate::state::{RelocationStore, StateGetter};

/// Errors raised while loading [`ConnectOptions`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid compositor options: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// Relocation Config
// =============================================================================

/// Configuration consumed by the compositor itself, never forwarded.
#[derive(Clone, Default)]
pub struct RelocationConfig {
    /// Render map for this pass.
    pub components: Option<RenderMap>,
    /// Where to read descriptors from, overriding the compositor's source.
    pub state_getter: Option<StateGetter>,
}

impl RelocationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(mut self, components: RenderMap) -> Self {
        self.components = Some(components);
        self
    }

    pub fn with_state_getter(mut self, get_state: impl Fn() -> RelocationStore + 'static) -> Self {
        self.state_getter = Some(Rc::new(get_state));
        self
    }

    /// Field-wise merge: fields set on `self` win over `defaults`.
    pub fn merged_over(&self, defaults: &RelocationConfig) -> RelocationConfig {
        RelocationConfig {
            components: self.components.clone().or_else(|| defaults.components.clone()),
            state_getter: self
                .state_getter
                .clone()
                .or_else(|| defaults.state_getter.clone()),
        }
    }
}

impl PartialEq for RelocationConfig {
    fn eq(&self, other: &Self) -> bool {
        let same_getter = match (&self.state_getter, &other.state_getter) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        same_getter && self.components == other.components
    }
}

impl fmt::Debug for RelocationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelocationConfig")
            .field("components", &self.components)
            .field("state_getter", &self.state_getter.is_some())
            .finish()
    }
}

// =============================================================================
// Connect Options
// =============================================================================

/// Options the compositor is built with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectOptions {
    /// Namespace for input configuration and output components.
    pub scope: Option<String>,
    /// Configuration used where input props leave a field unset.
    pub defaults: RelocationConfig,
    /// Ambient props placed under the input's ambient props.
    pub default_props: Map<String, Value>,
}

#[derive(Deserialize)]
struct OptionsFile {
    #[serde(default)]
    scope: Option<String>,
    #[serde(flatten)]
    default_props: Map<String, Value>,
}

impl ConnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Default render map.
    pub fn with_components(mut self, components: RenderMap) -> Self {
        self.defaults.components = Some(components);
        self
    }

    pub fn with_state_getter(mut self, get_state: impl Fn() -> RelocationStore + 'static) -> Self {
        self.defaults.state_getter = Some(Rc::new(get_state));
        self
    }

    pub fn with_default_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.default_props.insert(key.into(), value);
        self
    }

    /// The configured scope. An empty label counts as no scope.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref().filter(|scope| !scope.is_empty())
    }

    /// Load options from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let file: OptionsFile = serde_json::from_str(json)?;
        Ok(Self::from_file(file))
    }

    /// Load options from an already parsed JSON value.
    pub fn from_json_value(value: Value) -> Result<Self, ConfigError> {
        let file: OptionsFile = serde_json::from_value(value)?;
        Ok(Self::from_file(file))
    }

    fn from_file(mut file: OptionsFile) -> Self {
        // Render maps hold functions and cannot come from JSON.
        if file.default_props.remove("components").is_some() {
            warn!("ignoring `components` in compositor options; register render functions in code");
        }

        Self {
            scope: file.scope,
            defaults: RelocationConfig::default(),
            default_props: file.default_props,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ComponentDescriptor;
    use crate::types::Cleanup;
    use serde_json::json;

    fn noop(_: &ComponentDescriptor) -> Cleanup {
        Box::new(|| {})
    }

    #[test]
    fn test_merged_over_prefers_input() {
        let defaults = RelocationConfig::new()
            .with_components(RenderMap::new().with("a", noop))
            .with_state_getter(RelocationStore::new);
        let input = RelocationConfig::new().with_components(RenderMap::new().with("b", noop));

        let merged = input.merged_over(&defaults);

        let components = merged.components.unwrap();
        assert!(components.contains("b"));
        assert!(!components.contains("a"), "render maps replace, they do not merge");
        assert!(merged.state_getter.is_some(), "unset fields fall back to defaults");
    }

    #[test]
    fn test_empty_scope_is_no_scope() {
        assert_eq!(ConnectOptions::new().with_scope("").scope(), None);
        assert_eq!(ConnectOptions::new().with_scope("s").scope(), Some("s"));
    }

    #[test]
    fn test_from_json_splits_scope_and_defaults() {
        let options =
            ConnectOptions::from_json_str(r#"{ "scope": "sidebar", "title": "Tools" }"#).unwrap();

        assert_eq!(options.scope(), Some("sidebar"));
        assert_eq!(options.default_props.get("title"), Some(&json!("Tools")));
        assert!(!options.default_props.contains_key("scope"));
    }

    #[test]
    fn test_from_json_drops_components_key() {
        let options = ConnectOptions::from_json_value(json!({ "components": { "a": 1 } })).unwrap();

        assert!(options.default_props.is_empty());
        assert!(options.defaults.components.is_none());
        assert_eq!(options.scope(), None);
    }

    #[test]
    fn test_from_json_rejects_non_string_scope() {
        let err = ConnectOptions::from_json_str(r#"{ "scope": 3 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
