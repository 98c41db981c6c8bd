//! Node classification.
//!
//! A value in the tree is a traversable node iff it is an object carrying a
//! `type` attribute holding a non-empty string. Everything else (scalars,
//! null, arrays, objects without a usable `type`) is opaque data: never
//! visited, never descended into, even when nested inside a container that
//! is otherwise traversed.

use serde_json::Value;

/// Attribute holding source-position metadata. Never treated as a child
/// container, whatever its value looks like.
pub(crate) const POSITION: &str = "position";

/// Attribute holding opaque user data. Never treated as a child container.
pub(crate) const DATA: &str = "data";

/// True for the attribute names the walker never descends into.
pub(crate) fn is_reserved(key: &str) -> bool {
    key == POSITION || key == DATA
}

/// Returns the `type` tag of a node-like value.
///
/// `None` when the value is not an object, has no `type` attribute, or its
/// `type` is not a non-empty string.
pub fn node_type(value: &Value) -> Option<&str> {
    let ty = value.as_object()?.get("type")?.as_str()?;
    if ty.is_empty() {
        None
    } else {
        Some(ty)
    }
}

/// Returns true if `value` is a traversable node.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use treevisit::is_node;
///
/// assert!(is_node(&json!({"type": "Identifier", "name": "x"})));
/// assert!(!is_node(&json!({"type": ""})));
/// assert!(!is_node(&json!({"name": "x"})));
/// assert!(!is_node(&json!("Identifier")));
/// ```
pub fn is_node(value: &Value) -> bool {
    node_type(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_with_type_is_node() {
        assert!(is_node(&json!({"type": "Program"})));
        assert!(is_node(&json!({"type": "x", "extra": [1, 2]})));
    }

    #[test]
    fn test_empty_type_is_not_node() {
        assert!(!is_node(&json!({"type": ""})));
    }

    #[test]
    fn test_non_string_type_is_not_node() {
        assert!(!is_node(&json!({"type": 1})));
        assert!(!is_node(&json!({"type": null})));
        assert!(!is_node(&json!({"type": {"type": "x"}})));
    }

    #[test]
    fn test_scalars_and_containers_are_not_nodes() {
        assert!(!is_node(&json!(null)));
        assert!(!is_node(&json!(true)));
        assert!(!is_node(&json!(3)));
        assert!(!is_node(&json!("type")));
        assert!(!is_node(&json!([{"type": "x"}])));
        assert!(!is_node(&json!({})));
    }

    #[test]
    fn test_node_type_extraction() {
        assert_eq!(node_type(&json!({"type": "Literal"})), Some("Literal"));
        assert_eq!(node_type(&json!({"type": ""})), None);
        assert_eq!(node_type(&json!(42)), None);
    }

    #[test]
    fn test_reserved_keys() {
        assert!(is_reserved("position"));
        assert!(is_reserved("data"));
        assert!(!is_reserved("children"));
        assert!(!is_reserved("Position"));
    }
}
