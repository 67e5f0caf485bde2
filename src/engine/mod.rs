//! Resolution Engine - The render map and the four compositor stages.
//!
//! ```text
//! descriptors ─▶ filter ─▶ render-bind ─▶ scope-tag ─▶ remove-merge ─▶ resolved
//!                  ▲            ▲             ▲              ▲
//!              RenderMap    RenderMap       scope    dispatch + navigator
//! ```
//!
//! Every stage is a pure function from `&Rc<ComponentDescriptor>` to a new
//! `Rc<ComponentDescriptor>` (or to a kept/dropped decision for the filter).
//! No stage mutates its input.

mod remove_merge;
mod render_map;
mod stages;

pub use remove_merge::assign_remove_handler;
pub use render_map::{RenderMap, RenderMapError};
pub use stages::{assign_render, assign_scope, filter_renderable, in_render_map};
