//! Authored removal configuration of a descriptor.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::types::{RemoveHandler, RemoveOutput};

/// What a descriptor's author asked for on removal.
///
/// Mirrors the four shapes a `remove` field can take in JSON state:
/// absent, a truthy non-callable value, a falsy value, or a callable.
#[derive(Clone, Default)]
pub enum RemoveSpec {
    /// Field absent. The default removal handler is attached.
    #[default]
    Unset,
    /// Truthy sentinel (`true`, non-empty string, non-zero number, ...).
    /// The default removal handler is attached.
    Default,
    /// Falsy value (`false`, `0`, `""`, `null`). No default handler.
    Disabled,
    /// Caller-supplied handler. Used verbatim, never overridden.
    Handler(RemoveHandler),
}

impl RemoveSpec {
    /// Wrap a closure as a caller-supplied handler.
    pub fn handler(f: impl Fn() -> RemoveOutput + 'static) -> Self {
        RemoveSpec::Handler(Rc::new(f))
    }

    /// Inspect a raw JSON value by type tag.
    ///
    /// `None` means the field was absent. JSON cannot carry callables, so a
    /// present value is only ever `Default` or `Disabled`.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            None => RemoveSpec::Unset,
            Some(v) if is_truthy(v) => RemoveSpec::Default,
            Some(_) => RemoveSpec::Disabled,
        }
    }

    /// Whether the default removal handler should be constructed.
    pub fn wants_default(&self) -> bool {
        matches!(self, RemoveSpec::Unset | RemoveSpec::Default)
    }

    pub fn as_handler(&self) -> Option<&RemoveHandler> {
        match self {
            RemoveSpec::Handler(handler) => Some(handler),
            _ => None,
        }
    }

    /// True if this spec already holds exactly `handler` (pointer identity).
    pub fn holds(&self, handler: &RemoveHandler) -> bool {
        self.as_handler().is_some_and(|own| Rc::ptr_eq(own, handler))
    }
}

impl From<bool> for RemoveSpec {
    fn from(enabled: bool) -> Self {
        if enabled {
            RemoveSpec::Default
        } else {
            RemoveSpec::Disabled
        }
    }
}

impl PartialEq for RemoveSpec {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RemoveSpec::Unset, RemoveSpec::Unset)
            | (RemoveSpec::Default, RemoveSpec::Default)
            | (RemoveSpec::Disabled, RemoveSpec::Disabled) => true,
            (RemoveSpec::Handler(a), RemoveSpec::Handler(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for RemoveSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoveSpec::Unset => f.write_str("Unset"),
            RemoveSpec::Default => f.write_str("Default"),
            RemoveSpec::Disabled => f.write_str("Disabled"),
            RemoveSpec::Handler(handler) => {
                write!(f, "Handler({:p})", Rc::as_ptr(handler) as *const ())
            }
        }
    }
}

/// JSON truthiness: everything except `false`, `0`, `""` and `null`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_is_unset() {
        assert_eq!(RemoveSpec::from_value(None), RemoveSpec::Unset);
    }

    #[test]
    fn test_falsy_values_disable() {
        for v in [json!(false), json!(0), json!(""), json!(null), json!(0.0)] {
            assert_eq!(
                RemoveSpec::from_value(Some(&v)),
                RemoveSpec::Disabled,
                "{v} should disable the default handler"
            );
        }
    }

    #[test]
    fn test_truthy_values_request_default() {
        for v in [json!(true), json!(1), json!("yes"), json!([]), json!({})] {
            assert_eq!(
                RemoveSpec::from_value(Some(&v)),
                RemoveSpec::Default,
                "{v} should request the default handler"
            );
        }
    }

    #[test]
    fn test_handler_equality_is_identity() {
        let a = RemoveSpec::handler(|| Value::Null);
        let b = RemoveSpec::handler(|| Value::Null);

        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert!(!a.wants_default());
        assert!(RemoveSpec::from(true).wants_default());
    }
}
