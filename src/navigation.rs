//! Navigation capability.
//!
//! Descriptors with a `remove_path` navigate on removal. Navigation is wired
//! in explicitly when the compositor is built; a compositor without a
//! navigator treats every navigation request as a no-op.

use log::trace;

/// Requests a change of the displayed location.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, path: &str) {
        self(path)
    }
}

/// Navigate through `navigator`, or do nothing when there is none.
pub(crate) fn navigate_to_path(navigator: Option<&dyn Navigator>, path: &str) {
    let Some(navigator) = navigator else {
        trace!("no navigator wired in, ignoring navigation to {path}");
        return;
    };
    navigator.navigate(path);
}
