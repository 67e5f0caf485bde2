//! Compositor - Descriptor list to render-ready components.
//!
//! One resolution pass runs in three steps:
//!
//! 1. **map_state** - merge the input configuration over the defaults (reading
//!    it from `scoped[scope]` when scoped), then select the descriptors from
//!    the [`ComponentSource`], honouring a configured state getter.
//! 2. **resolve_components** - filter, render-bind, scope-tag, remove-merge.
//! 3. **assemble** - default ambient props, input ambient props, then the
//!    resolved list at `components` or `{scope}.components`.
//!
//! # Example
//!
//! ```ignore
//! use spark_relocation::{
//!     Compositor, ComponentDescriptor, ConnectOptions, InputProps, RelocationStore, RenderMap,
//! };
//!
//! let store = RelocationStore::new();
//! store.add(ComponentDescriptor::new("toast-1", "toast").with_remove_path("/inbox"));
//!
//! let render_map = RenderMap::new().with("toast", |toast| mount_toast(toast));
//! let compositor = Compositor::new(ConnectOptions::new().with_components(render_map), store.clone())
//!     .with_navigator(|path: &str| router.push(path));
//!
//! let resolved = compositor.resolve(&store, &InputProps::new());
//! for component in resolved.components().unwrap_or_default() {
//!     let _cleanup = component.render_component();
//! }
//! ```

mod options;
mod props;

pub use options::{ConfigError, ConnectOptions, RelocationConfig};
pub use props::{InputProps, Placement, ResolvedProps, COMPONENTS_KEY};

use std::rc::Rc;

use log::debug;
use serde_json::{Map, Value};

use crate::descriptor::ComponentDescriptor;
use crate::engine::{
    assign_remove_handler, assign_render, assign_scope, filter_renderable, RenderMap,
};
use crate::navigation::Navigator;
use crate::state::{ComponentSource, RemoveDispatch};

/// Name used when the wrapped component has none.
const FALLBACK_NAME: &str = "Component";

/// Inputs of one resolution pass, read from shared state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RelocationSnapshot {
    pub components: Vec<Rc<ComponentDescriptor>>,
    pub render_map: RenderMap,
}

/// Resolves descriptor lists against a render map.
pub struct Compositor {
    options: ConnectOptions,
    dispatch: Rc<dyn RemoveDispatch>,
    navigator: Option<Rc<dyn Navigator>>,
    wrapped_name: Option<String>,
}

impl Compositor {
    pub fn new(options: ConnectOptions, dispatch: impl RemoveDispatch + 'static) -> Self {
        Self::with_shared_dispatch(options, Rc::new(dispatch))
    }

    pub fn with_shared_dispatch(options: ConnectOptions, dispatch: Rc<dyn RemoveDispatch>) -> Self {
        Self {
            options,
            dispatch,
            navigator: None,
            wrapped_name: None,
        }
    }

    pub fn with_navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Rc::new(navigator));
        self
    }

    /// Name of the component consuming the resolved props.
    pub fn with_wrapped_name(mut self, name: impl Into<String>) -> Self {
        self.wrapped_name = Some(name.into());
        self
    }

    /// `Relocation(<wrapped name>)`.
    pub fn display_name(&self) -> String {
        let name = self
            .wrapped_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_NAME);
        format!("Relocation({name})")
    }

    pub fn options(&self) -> &ConnectOptions {
        &self.options
    }

    pub fn scope(&self) -> Option<&str> {
        self.options.scope()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Read this pass's descriptors and render map.
    pub fn map_state(&self, source: &dyn ComponentSource, props: &InputProps) -> RelocationSnapshot {
        let defaults = &self.options.defaults;
        let config = match props.config_for(self.scope()) {
            Some(input) => input.merged_over(defaults),
            None => defaults.clone(),
        };

        let components = source.select(props, config.state_getter.as_ref());
        let render_map = config.components.unwrap_or_default();

        RelocationSnapshot {
            components,
            render_map,
        }
    }

    /// Run the four stages over a snapshot.
    pub fn resolve_components(&self, snapshot: &RelocationSnapshot) -> Vec<Rc<ComponentDescriptor>> {
        let render_map = &snapshot.render_map;
        let scope = self.scope();
        let navigator = self.navigator.as_ref();

        let resolved: Vec<_> = filter_renderable(&snapshot.components, render_map)
            .iter()
            .map(|component| assign_render(component, render_map))
            .map(|component| assign_scope(&component, scope))
            .map(|component| assign_remove_handler(&component, &self.dispatch, navigator))
            .collect();

        debug!(
            "{}: resolved {} of {} components",
            self.display_name(),
            resolved.len(),
            snapshot.components.len()
        );
        resolved
    }

    /// Place resolved components next to the passthrough props.
    pub fn assemble(
        &self,
        props: &InputProps,
        components: Vec<Rc<ComponentDescriptor>>,
    ) -> ResolvedProps {
        let mut ambient: Map<String, Value> = self.options.default_props.clone();
        ambient.extend(props.ambient.iter().map(|(k, v)| (k.clone(), v.clone())));

        let placement = match self.scope() {
            Some(scope) => Placement::Scoped(scope.to_string()),
            None => Placement::TopLevel,
        };

        // The resolved list owns its key.
        let owned_key = match &placement {
            Placement::Scoped(scope) => scope.as_str(),
            Placement::TopLevel => COMPONENTS_KEY,
        };
        if ambient.remove(owned_key).is_some() {
            debug!("ambient prop `{owned_key}` shadowed by resolved components");
        }

        ResolvedProps::new(ambient, placement, components)
    }

    /// Full pass: map state, resolve, assemble.
    pub fn resolve(&self, source: &dyn ComponentSource, props: &InputProps) -> ResolvedProps {
        let snapshot = self.map_state(source, props);
        let components = self.resolve_components(&snapshot);
        self.assemble(props, components)
    }
}
