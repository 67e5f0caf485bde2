//! Remove-merge - One removal handler per descriptor.
//!
//! Two independent removal signals can be present on a descriptor:
//!
//! - the removal callable: the author's own handler, or the default handler
//!   that dispatches removal by `id` (built when `remove` is unset or a truthy
//!   sentinel, skipped when it is falsy);
//! - the navigation callable: built when `remove_path` is set, navigating
//!   through the optional [`Navigator`].
//!
//! They combine in a fixed order:
//!
//! | navigation | removal                 | resolved `remove`                      |
//! |------------|-------------------------|----------------------------------------|
//! | yes        | yes                     | navigate, then return removal result   |
//! | yes        | no                      | navigate                               |
//! | no         | newly built default     | default handler                        |
//! | no         | author's handler / none | descriptor returned unchanged (same Rc) |
//!
//! Returning the same `Rc` in the last row lets consumers comparing by
//! pointer skip descriptors that did not change.

use std::rc::Rc;

use serde_json::Value;

use crate::descriptor::{ComponentDescriptor, RemoveSpec};
use crate::navigation::{navigate_to_path, Navigator};
use crate::state::RemoveDispatch;
use crate::types::RemoveHandler;

/// Build the removal callable for a descriptor, if it gets one.
fn removal_callable(
    component: &ComponentDescriptor,
    dispatch: &Rc<dyn RemoveDispatch>,
) -> Option<RemoveHandler> {
    match &component.remove {
        RemoveSpec::Handler(handler) => Some(Rc::clone(handler)),
        spec if spec.wants_default() => {
            let dispatch = Rc::clone(dispatch);
            let id = component.id.clone();
            Some(Rc::new(move || dispatch.remove_component(&id)))
        }
        _ => None,
    }
}

/// Build the navigation callable for a descriptor with a `remove_path`.
fn navigation_callable(
    component: &ComponentDescriptor,
    navigator: Option<&Rc<dyn Navigator>>,
) -> Option<RemoveHandler> {
    let path = component.remove_path.clone()?;
    let navigator = navigator.cloned();
    Some(Rc::new(move || {
        navigate_to_path(navigator.as_deref(), &path);
        Value::Null
    }))
}

/// Resolve the final `remove` of a descriptor.
pub fn assign_remove_handler(
    component: &Rc<ComponentDescriptor>,
    dispatch: &Rc<dyn RemoveDispatch>,
    navigator: Option<&Rc<dyn Navigator>>,
) -> Rc<ComponentDescriptor> {
    let remove_handler = removal_callable(component, dispatch);
    let path_handler = navigation_callable(component, navigator);

    match (path_handler, remove_handler) {
        (Some(navigate), Some(remove)) => {
            let combined: RemoveHandler = Rc::new(move || {
                navigate();
                remove()
            });
            Rc::new(component.with_resolved_remove(combined))
        }
        (Some(navigate), None) => Rc::new(component.with_resolved_remove(navigate)),
        (None, Some(remove)) if !component.remove.holds(&remove) => {
            Rc::new(component.with_resolved_remove(remove))
        }
        _ => Rc::clone(component),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ComponentId;
    use std::cell::RefCell;

    /// Records every removal and navigation in call order.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    fn wire() -> (Rc<Recorder>, Rc<dyn RemoveDispatch>, Rc<dyn Navigator>) {
        let recorder = Rc::new(Recorder::default());

        let r = recorder.clone();
        let dispatch: Rc<dyn RemoveDispatch> = Rc::new(move |id: &ComponentId| {
            r.calls.borrow_mut().push(format!("remove:{id}"));
            Value::String(format!("removed {id}"))
        });

        let r = recorder.clone();
        let navigator: Rc<dyn Navigator> = Rc::new(move |path: &str| {
            r.calls.borrow_mut().push(format!("navigate:{path}"));
        });

        (recorder, dispatch, navigator)
    }

    #[test]
    fn test_unset_gets_default_handler() {
        let (recorder, dispatch, navigator) = wire();
        let component = Rc::new(ComponentDescriptor::new("1", "a"));

        let resolved = assign_remove_handler(&component, &dispatch, Some(&navigator));

        assert_eq!(resolved.invoke_remove(), Some(Value::String("removed 1".into())));
        assert_eq!(recorder.calls(), vec!["remove:1"]);
    }

    #[test]
    fn test_truthy_sentinel_gets_default_handler() {
        let (recorder, dispatch, _) = wire();
        let component = Rc::new(ComponentDescriptor::new("7", "a").with_remove(RemoveSpec::Default));

        let resolved = assign_remove_handler(&component, &dispatch, None);

        resolved.invoke_remove();
        assert_eq!(recorder.calls(), vec!["remove:7"]);
    }

    #[test]
    fn test_disabled_gets_no_handler() {
        let (recorder, dispatch, navigator) = wire();
        let component = Rc::new(ComponentDescriptor::new("2", "a").with_remove(RemoveSpec::Disabled));

        let resolved = assign_remove_handler(&component, &dispatch, Some(&navigator));

        assert!(resolved.remove_handler().is_none());
        assert!(resolved.invoke_remove().is_none());
        assert!(recorder.calls().is_empty());
        assert!(Rc::ptr_eq(&resolved, &component), "nothing to change");
    }

    #[test]
    fn test_author_handler_is_kept_verbatim() {
        let (recorder, dispatch, _) = wire();
        let component = Rc::new(
            ComponentDescriptor::new("3", "a").with_remove_handler(|| Value::String("x".into())),
        );

        let resolved = assign_remove_handler(&component, &dispatch, None);

        assert!(Rc::ptr_eq(&resolved, &component), "unchanged descriptor keeps identity");
        assert_eq!(resolved.invoke_remove(), Some(Value::String("x".into())));
        assert!(recorder.calls().is_empty(), "default removal must not fire");
    }

    #[test]
    fn test_path_with_default_navigates_first() {
        let (recorder, dispatch, navigator) = wire();
        let component = Rc::new(ComponentDescriptor::new("4", "a").with_remove_path("/list"));

        let resolved = assign_remove_handler(&component, &dispatch, Some(&navigator));

        assert_eq!(resolved.invoke_remove(), Some(Value::String("removed 4".into())));
        assert_eq!(recorder.calls(), vec!["navigate:/list", "remove:4"]);
    }

    #[test]
    fn test_path_with_author_handler_fires_both() {
        let (recorder, dispatch, navigator) = wire();
        let component = Rc::new(
            ComponentDescriptor::new("5", "a")
                .with_remove_handler(|| Value::String("y".into()))
                .with_remove_path("/list"),
        );

        let resolved = assign_remove_handler(&component, &dispatch, Some(&navigator));

        assert!(!Rc::ptr_eq(&resolved, &component));
        assert_eq!(resolved.invoke_remove(), Some(Value::String("y".into())));
        assert_eq!(recorder.calls(), vec!["navigate:/list"]);
    }

    #[test]
    fn test_path_with_disabled_only_navigates() {
        let (recorder, dispatch, navigator) = wire();
        let component = Rc::new(
            ComponentDescriptor::new("6", "a")
                .with_remove(RemoveSpec::Disabled)
                .with_remove_path("/home"),
        );

        let resolved = assign_remove_handler(&component, &dispatch, Some(&navigator));

        assert_eq!(resolved.invoke_remove(), Some(Value::Null));
        assert_eq!(recorder.calls(), vec!["navigate:/home"]);
    }

    #[test]
    fn test_missing_navigator_is_noop() {
        let (recorder, dispatch, _) = wire();
        let component = Rc::new(ComponentDescriptor::new("8", "a").with_remove_path("/list"));

        let resolved = assign_remove_handler(&component, &dispatch, None);

        resolved.invoke_remove();
        assert_eq!(recorder.calls(), vec!["remove:8"]);
    }

    #[test]
    fn test_input_descriptor_untouched() {
        let (_, dispatch, _) = wire();
        let component = Rc::new(ComponentDescriptor::new("9", "a"));

        let _resolved = assign_remove_handler(&component, &dispatch, None);

        assert_eq!(component.remove, RemoveSpec::Unset);
    }
}
