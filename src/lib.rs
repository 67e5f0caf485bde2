//! # spark-relocation
//!
//! Descriptor-driven component composition for spark-signals UIs.
//!
//! Application state holds a plain list of component descriptors (`id`,
//! `type`, `props`, removal configuration). The [`Compositor`] turns that list
//! into render-ready components: each descriptor is matched to a render
//! function by type, optionally tagged with a scope, and given one merged
//! removal handler.
//!
//! ## Architecture
//!
//! ```text
//! ComponentSource ─▶ filter ─▶ render-bind ─▶ scope-tag ─▶ remove-merge ─▶ ResolvedProps
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (ComponentId, ComponentType, callable aliases)
//! - [`descriptor`] - Component descriptors and JSON ingestion
//! - [`engine`] - Render map and the four resolution stages
//! - [`compositor`] - Configuration, input/output props, the compositor
//! - [`state`] - Source and removal traits, the reactive store
//! - [`navigation`] - Navigation capability
//! - [`pipeline`] - spark-signals derived binding

pub mod compositor;
pub mod descriptor;
pub mod engine;
pub mod navigation;
pub mod pipeline;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use descriptor::{parse_components, ComponentDescriptor, DescriptorError, RemoveSpec};

pub use engine::{
    assign_remove_handler, assign_render, assign_scope, filter_renderable, in_render_map,
    RenderMap, RenderMapError,
};

pub use compositor::{
    Compositor, ConfigError, ConnectOptions, InputProps, Placement, RelocationConfig,
    RelocationSnapshot, ResolvedProps, COMPONENTS_KEY,
};

pub use state::{ComponentSource, RelocationStore, RemoveDispatch, StateGetter};

pub use navigation::Navigator;

pub use pipeline::create_resolved_derived;
