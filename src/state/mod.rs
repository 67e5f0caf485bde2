//! Shared State - Where descriptors come from and where removals go.
//!
//! The compositor reads descriptors through a [`ComponentSource`] and removes
//! them through a [`RemoveDispatch`]. Both are traits so a host application
//! can back them with its own state container; [`RelocationStore`] is the
//! reactive, spark-signals based implementation shipped with the crate.

mod store;

pub use store::RelocationStore;

use std::rc::Rc;

use crate::compositor::InputProps;
use crate::descriptor::ComponentDescriptor;
use crate::types::{ComponentId, RemoveOutput};

/// Override for where the relocation state lives.
///
/// Supplied through configuration when descriptors should be read from a
/// store other than the compositor's default source.
pub type StateGetter = Rc<dyn Fn() -> RelocationStore>;

/// Yields the current descriptor list.
pub trait ComponentSource {
    /// Select the descriptors for one resolution pass.
    ///
    /// `state` is the configured state getter, if any; implementations read
    /// from the store it returns instead of their own.
    fn select(
        &self,
        props: &InputProps,
        state: Option<&StateGetter>,
    ) -> Vec<Rc<ComponentDescriptor>>;
}

impl<F> ComponentSource for F
where
    F: Fn(&InputProps, Option<&StateGetter>) -> Vec<Rc<ComponentDescriptor>>,
{
    fn select(
        &self,
        props: &InputProps,
        state: Option<&StateGetter>,
    ) -> Vec<Rc<ComponentDescriptor>> {
        self(props, state)
    }
}

/// Removal side effect, keyed by component id.
///
/// The compositor never inspects the result; it is handed back to whoever
/// invoked the resolved removal handler.
pub trait RemoveDispatch {
    fn remove_component(&self, id: &ComponentId) -> RemoveOutput;
}

impl<F> RemoveDispatch for F
where
    F: Fn(&ComponentId) -> RemoveOutput,
{
    fn remove_component(&self, id: &ComponentId) -> RemoveOutput {
        self(id)
    }
}
