//! Resolved Derived - Reactive resolution pass.
//!
//! Creates a Derived that re-resolves whenever:
//! - Components are added to or removed from the store
//! - The input props signal changes (render map, scope config, ambient props)
//! - A store returned by a configured state getter changes

use spark_signals::{derived, Derived, Signal};

use crate::compositor::{Compositor, InputProps, ResolvedProps};
use crate::state::RelocationStore;

/// Create the resolved-props derived.
///
/// The compositor is moved into the derived; build a second one for a second
/// binding.
pub fn create_resolved_derived(
    compositor: Compositor,
    store: RelocationStore,
    props: Signal<InputProps>,
) -> Derived<ResolvedProps> {
    derived(move || {
        // Both reads below create reactive dependencies
        let input = props.get();
        compositor.resolve(&store, &input)
    })
}

// =============================================================================
// Tests
// =============================================================================
