//! Reactive Pipeline
//!
//! Binds the compositor to spark-signals state so resolution re-runs on its
//! own when the store or the input props change.
//!
//! # Pipeline Architecture
//!
//! ```text
//! RelocationStore ─┐
//!                  ├─▶ resolvedDerived ─▶ consumer (each(), effect, ...)
//! InputProps signal┘
//! ```
//!
//! ## Key Design Principles
//!
//! - **Pure Derived**: resolution never writes to the store
//! - **Side Effects on Demand**: removal and navigation run only when a
//!   resolved handler is invoked

pub mod resolved_derived;

pub use resolved_derived::create_resolved_derived;
