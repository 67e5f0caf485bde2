//! Filter, render-bind and scope-tag stages.

use std::rc::Rc;

use log::trace;

use super::render_map::RenderMap;
use crate::descriptor::ComponentDescriptor;

/// Whether the descriptor's type has a render function.
pub fn in_render_map(component: &ComponentDescriptor, render_map: &RenderMap) -> bool {
    render_map.contains(component.component_type.as_str())
}

/// Keep the descriptors the render map can draw, in input order.
pub fn filter_renderable(
    components: &[Rc<ComponentDescriptor>],
    render_map: &RenderMap,
) -> Vec<Rc<ComponentDescriptor>> {
    components
        .iter()
        .filter(|component| {
            let keep = in_render_map(component, render_map);
            if !keep {
                trace!(
                    "component `{}` dropped: no render function for type `{}`",
                    component.id,
                    component.component_type
                );
            }
            keep
        })
        .cloned()
        .collect()
}

/// Attach the render function for the descriptor's type.
///
/// Only called on filtered descriptors; an unknown type is passed through
/// untouched.
pub fn assign_render(
    component: &Rc<ComponentDescriptor>,
    render_map: &RenderMap,
) -> Rc<ComponentDescriptor> {
    match render_map.get(component.component_type.as_str()) {
        Some(render) => Rc::new(component.rendered_by(render)),
        None => Rc::clone(component),
    }
}

/// Tag the descriptor with `scope`. Identity when no scope is configured.
pub fn assign_scope(
    component: &Rc<ComponentDescriptor>,
    scope: Option<&str>,
) -> Rc<ComponentDescriptor> {
    match scope {
        Some(scope) if !scope.is_empty() => Rc::new(component.in_scope(scope)),
        _ => Rc::clone(component),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cleanup;

    fn noop(_: &ComponentDescriptor) -> Cleanup {
        Box::new(|| {})
    }

    fn list(entries: &[(&str, &str)]) -> Vec<Rc<ComponentDescriptor>> {
        entries
            .iter()
            .map(|(id, ty)| Rc::new(ComponentDescriptor::new(*id, *ty)))
            .collect()
    }

    #[test]
    fn test_filter_keeps_order_and_drops_unknown() {
        let map = RenderMap::new().with("a", noop).with("b", noop);
        let components = list(&[("1", "a"), ("2", "x"), ("3", "b"), ("4", "a"), ("5", "y")]);

        let kept = filter_renderable(&components, &map);
        let ids: Vec<&str> = kept.iter().map(|c| c.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "3", "4"]);
        assert!(Rc::ptr_eq(&kept[0], &components[0]), "filter should not copy");
    }

    #[test]
    fn test_filter_empty_map_drops_everything() {
        let components = list(&[("1", "a")]);
        assert!(filter_renderable(&components, &RenderMap::new()).is_empty());
    }

    #[test]
    fn test_assign_render_binds_map_entry() {
        let map = RenderMap::new().with("a", noop);
        let components = list(&[("1", "a")]);

        let bound = assign_render(&components[0], &map);

        assert!(Rc::ptr_eq(bound.render.as_ref().unwrap(), map.get("a").unwrap()));
        assert!(components[0].render.is_none(), "input must not be mutated");
    }

    #[test]
    fn test_assign_scope() {
        let components = list(&[("1", "a")]);

        let scoped = assign_scope(&components[0], Some("sidebar"));
        assert_eq!(scoped.scope.as_deref(), Some("sidebar"));

        let unscoped = assign_scope(&components[0], None);
        assert!(Rc::ptr_eq(&unscoped, &components[0]));

        let empty = assign_scope(&components[0], Some(""));
        assert!(Rc::ptr_eq(&empty, &components[0]), "empty scope is no scope");
    }
}
