//! The depth-first walker.
//!
//! # Traversal order
//!
//! - [`Visitor::enter`] fires in **pre-order** (before children)
//! - [`Visitor::leave`] fires in **post-order** (after children)
//! - Children are discovered by iterating the node's attributes in
//!   insertion order; an attribute holding a list is scanned front to back
//!
//! # Control flow
//!
//! Both callbacks return a [`Signal`]. [`Action::Exit`] stops the whole
//! walk immediately, wherever it came from. [`Action::Skip`] from `enter`
//! suppresses the node's children but not its own `leave`. A resume
//! position redirects the enclosing list scan, which is what makes
//! splicing the sibling list mid-walk well-defined: the walker re-reads
//! the list's length and contents on every scan step instead of caching
//! them.

use serde_json::Value;
use tracing::trace;

use crate::cursor::{resolve, Cursor, Segment};
use crate::node::{is_node, is_reserved, node_type};
use crate::signal::{Action, Signal};

/// Callbacks invoked as the walker moves through the tree.
///
/// Both methods default to returning an empty signal, so an implementation
/// overrides only the hooks it needs. For a plain pre-order pass, a bare
/// `FnMut(&mut Cursor) -> impl Into<Signal>` closure is a `Visitor` too.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use treevisit::{visit, Cursor, Signal, Visitor};
///
/// struct Depth {
///     max: usize,
/// }
///
/// impl Visitor for Depth {
///     fn enter(&mut self, cursor: &mut Cursor<'_>) -> Signal {
///         self.max = self.max.max(cursor.ancestors().len());
///         Signal::empty()
///     }
/// }
///
/// let mut tree = json!({"type": "A", "child": {"type": "B", "child": {"type": "C"}}});
/// let mut depth = Depth { max: 0 };
/// visit(&mut tree, &mut depth);
/// assert_eq!(depth.max, 2);
/// ```
pub trait Visitor {
    /// Called when a node is reached, before its children.
    #[allow(unused_variables)]
    fn enter(&mut self, cursor: &mut Cursor<'_>) -> Signal {
        Signal::empty()
    }

    /// Called after a node's children have been visited (or skipped).
    ///
    /// Fires even when `enter` returned [`Action::Skip`], and also for
    /// nodes whose children were never entered for other reasons. Does not
    /// fire when `enter` returned [`Action::Exit`]. An empty signal defers
    /// to whatever `enter` returned, resume position included.
    #[allow(unused_variables)]
    fn leave(&mut self, cursor: &mut Cursor<'_>) -> Signal {
        Signal::empty()
    }
}

/// A bare `enter` callback is a visitor with a no-op `leave`.
impl<F, S> Visitor for F
where
    F: FnMut(&mut Cursor<'_>) -> S,
    S: Into<Signal>,
{
    fn enter(&mut self, cursor: &mut Cursor<'_>) -> Signal {
        (self)(cursor).into()
    }
}

/// Walk `tree` depth-first, invoking the visitor's callbacks for the root
/// and every node-like descendant.
///
/// The root is entered leniently: `enter` and `leave` fire for whatever
/// value is passed, node-like or not, and child discovery simply finds
/// nothing when the root has no attributes. Nested values are held to the
/// strict [`is_node`] test.
///
/// Returns once the walk completes or a callback signals [`Action::Exit`].
/// Side effects happen only through the visitor's callbacks and whatever
/// mutations they perform on the tree.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use treevisit::{visit, Action, Cursor, Signal};
///
/// let mut tree = json!({
///     "type": "Program",
///     "body": [
///         {"type": "ExpressionStatement", "expression": {"type": "Identifier", "name": "x"}},
///         {"type": "EmptyStatement"},
///     ],
/// });
///
/// let mut seen = Vec::new();
/// visit(&mut tree, &mut |cursor: &mut Cursor<'_>| {
///     seen.push(cursor.node()["type"].as_str().unwrap().to_owned());
/// });
///
/// assert_eq!(
///     seen,
///     ["Program", "ExpressionStatement", "Identifier", "EmptyStatement"],
/// );
/// ```
pub fn visit<V: Visitor>(tree: &mut Value, visitor: &mut V) {
    let mut path = Vec::new();
    walk(tree, &mut path, visitor);
}

/// Visit the node at `path`, then its children, then leave it. Returns the
/// node's signal for the enclosing list scan; `Exit` propagates unchanged.
fn walk<V: Visitor>(tree: &mut Value, path: &mut Vec<Segment>, visitor: &mut V) -> Signal {
    if let Some(ty) = resolve(tree, path).and_then(node_type) {
        trace!(node = ty, depth = path.len(), "enter");
    }

    let entered = {
        let mut cursor = Cursor::new(tree, path);
        visitor.enter(&mut cursor)
    };

    if entered.action() == Action::Exit {
        return entered;
    }

    // A callback that detached the node it was standing on ends this
    // node's frame; the enclosing scan resumes positionally.
    if !path.is_empty() && resolve(tree, path).is_none() {
        return entered;
    }

    if entered.action() != Action::Skip {
        if let Some(exit) = walk_children(tree, path, visitor) {
            return exit;
        }
    }

    let left = {
        let mut cursor = Cursor::new(tree, path);
        visitor.leave(&mut cursor)
    };

    if left.is_empty() {
        entered
    } else {
        left
    }
}

/// Descend into every child container of the node at `path`. Returns
/// `Some` only to propagate an `Exit` signal.
fn walk_children<V: Visitor>(
    tree: &mut Value,
    path: &mut Vec<Segment>,
    visitor: &mut V,
) -> Option<Signal> {
    // Snapshot the attribute names up front; the values themselves are
    // re-read at scan time, since any callback below may reshape them.
    let keys: Vec<String> = match resolve(tree, path) {
        Some(Value::Object(fields)) => fields.keys().cloned().collect(),
        _ => return None,
    };

    for key in keys {
        if is_reserved(&key) {
            continue;
        }

        // Re-read the attribute: an earlier child's callbacks may have
        // reshaped or removed it since the snapshot.
        let kind = match resolve(tree, path).and_then(|current| current.get(key.as_str())) {
            Some(Value::Array(_)) => FieldKind::List,
            Some(child) if is_node(child) => FieldKind::Child,
            // Scalars, null, and objects without a type tag are opaque.
            _ => FieldKind::Opaque,
        };

        match kind {
            FieldKind::List => {
                if let Some(exit) = walk_list(tree, path, visitor, &key) {
                    return Some(exit);
                }
            }
            FieldKind::Child => {
                path.push(Segment {
                    key: key.clone(),
                    index: None,
                });
                let signal = walk(tree, path, visitor);
                path.pop();
                if signal.action() == Action::Exit {
                    return Some(signal);
                }
            }
            FieldKind::Opaque => {}
        }
    }

    None
}

/// How an attribute participates in traversal.
enum FieldKind {
    /// An ordered list, scanned element by element.
    List,
    /// A single node-like child.
    Child,
    /// Not a child container.
    Opaque,
}

/// Scan the list under `key`, visiting node-like elements. The list is
/// re-read on every step so callbacks may splice it; a resume position in
/// an element's signal redirects the scan. Returns `Some` only to
/// propagate an `Exit` signal.
fn walk_list<V: Visitor>(
    tree: &mut Value,
    path: &mut Vec<Segment>,
    visitor: &mut V,
    key: &str,
) -> Option<Signal> {
    let mut position = 0;

    loop {
        let element_is_node = {
            let list = resolve(tree, path)
                .and_then(|current| current.get(key))
                .and_then(Value::as_array)?;
            is_node(list.get(position)?)
        };

        if !element_is_node {
            position += 1;
            continue;
        }

        path.push(Segment {
            key: key.to_owned(),
            index: Some(position),
        });
        let signal = walk(tree, path, visitor);
        path.pop();

        if signal.action() == Action::Exit {
            return Some(signal);
        }

        position = signal.resume().unwrap_or(position + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn small_tree() -> Value {
        json!({
            "type": "Root",
            "left": {"type": "Leaf", "name": "l"},
            "items": [
                {"type": "Leaf", "name": "a"},
                {"type": "Leaf", "name": "b"},
            ],
        })
    }

    /// Records enter/leave events as `">Type"` / `"<Type"` strings.
    struct Recorder {
        events: Vec<String>,
        exit_on_enter: Option<&'static str>,
        exit_on_leave: Option<&'static str>,
        skip_on_enter: Option<&'static str>,
    }

    impl Recorder {
        fn new() -> Self {
            Recorder {
                events: Vec::new(),
                exit_on_enter: None,
                exit_on_leave: None,
                skip_on_enter: None,
            }
        }

        fn ty(cursor: &Cursor<'_>) -> String {
            cursor.node()["type"].as_str().unwrap_or("?").to_owned()
        }
    }

    impl Visitor for Recorder {
        fn enter(&mut self, cursor: &mut Cursor<'_>) -> Signal {
            let ty = Self::ty(cursor);
            self.events.push(format!(">{ty}"));
            if self.exit_on_enter == Some(ty.as_str()) {
                return Action::Exit.into();
            }
            if self.skip_on_enter == Some(ty.as_str()) {
                return Action::Skip.into();
            }
            Signal::empty()
        }

        fn leave(&mut self, cursor: &mut Cursor<'_>) -> Signal {
            let ty = Self::ty(cursor);
            self.events.push(format!("<{ty}"));
            if self.exit_on_leave == Some(ty.as_str()) {
                return Action::Exit.into();
            }
            Signal::empty()
        }
    }

    #[test]
    fn test_enter_and_leave_interleave() {
        let mut tree = json!({"type": "A", "child": {"type": "B"}});
        let mut recorder = Recorder::new();
        visit(&mut tree, &mut recorder);
        assert_eq!(recorder.events, [">A", ">B", "<B", "<A"]);
    }

    #[test]
    fn test_single_child_then_list_in_insertion_order() {
        let mut tree = small_tree();
        let mut recorder = Recorder::new();
        visit(&mut tree, &mut recorder);
        assert_eq!(
            recorder.events,
            [">Root", ">Leaf", "<Leaf", ">Leaf", "<Leaf", ">Leaf", "<Leaf", "<Root"],
        );
    }

    #[test]
    fn test_skip_suppresses_children_but_not_leave() {
        let mut tree = json!({"type": "A", "child": {"type": "B", "grand": {"type": "C"}}});
        let mut recorder = Recorder::new();
        recorder.skip_on_enter = Some("B");
        visit(&mut tree, &mut recorder);
        assert_eq!(recorder.events, [">A", ">B", "<B", "<A"]);
    }

    #[test]
    fn test_exit_from_enter_halts_everything() {
        let mut tree = small_tree();
        let mut recorder = Recorder::new();
        recorder.exit_on_enter = Some("Leaf");
        visit(&mut tree, &mut recorder);
        // No leave for the exiting node, nothing for its siblings, no
        // leave for the root.
        assert_eq!(recorder.events, [">Root", ">Leaf"]);
    }

    #[test]
    fn test_exit_from_leave_halts_after_that_leave() {
        let mut tree = small_tree();
        let mut recorder = Recorder::new();
        recorder.exit_on_leave = Some("Leaf");
        visit(&mut tree, &mut recorder);
        assert_eq!(recorder.events, [">Root", ">Leaf", "<Leaf"]);
    }

    #[test]
    fn test_closure_visitor_is_enter_only() {
        let mut tree = json!({"type": "A", "child": {"type": "B"}});
        let mut count = 0usize;
        visit(&mut tree, &mut |_cursor: &mut Cursor<'_>| {
            count += 1;
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn test_closure_can_exit() {
        let mut tree = small_tree();
        let mut count = 0usize;
        visit(&mut tree, &mut |cursor: &mut Cursor<'_>| -> Signal {
            count += 1;
            if cursor.node()["type"] == json!("Leaf") {
                return Action::Exit.into();
            }
            Signal::empty()
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn test_scalar_root_is_entered_leniently() {
        let mut tree = json!(17);
        let mut count = 0usize;
        visit(&mut tree, &mut |_cursor: &mut Cursor<'_>| {
            count += 1;
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn test_typeless_root_still_yields_its_children() {
        let mut tree = json!({"kids": [{"type": "A"}]});
        let mut recorder = Recorder::new();
        visit(&mut tree, &mut recorder);
        assert_eq!(recorder.events, [">?", ">A", "<A", "<?"]);
    }

    #[test]
    fn test_empty_leave_defers_to_enter_resume() {
        // enter jumps the scan two slots ahead; the default empty leave
        // must hand that resume position through to the list scan.
        struct JumpAhead {
            entered: Vec<String>,
        }
        impl Visitor for JumpAhead {
            fn enter(&mut self, cursor: &mut Cursor<'_>) -> Signal {
                let ty = cursor.node()["type"].as_str().unwrap_or("?").to_owned();
                self.entered.push(ty.clone());
                if ty == "A" {
                    return Signal::from(cursor.index().unwrap() + 2);
                }
                Signal::empty()
            }
        }

        let mut tree = json!({
            "type": "Root",
            "items": [{"type": "A"}, {"type": "Skipped"}, {"type": "C"}],
        });
        let mut jumper = JumpAhead {
            entered: Vec::new(),
        };
        visit(&mut tree, &mut jumper);
        assert_eq!(jumper.entered, ["Root", "A", "C"]);
    }

    #[test]
    fn test_explicit_leave_signal_overrides_enter_resume() {
        // enter asks to rescan from its own position, which on its own
        // would pin the scan in place forever; an explicit Continue from
        // leave discards the request.
        struct Pinning {
            entered: usize,
        }
        impl Visitor for Pinning {
            fn enter(&mut self, cursor: &mut Cursor<'_>) -> Signal {
                self.entered += 1;
                if let Some(index) = cursor.index() {
                    return Signal::from(index);
                }
                Signal::empty()
            }

            fn leave(&mut self, _cursor: &mut Cursor<'_>) -> Signal {
                Signal::new(Action::Continue)
            }
        }

        let mut tree = json!({"type": "Root", "items": [{"type": "A"}, {"type": "B"}]});
        let mut pinning = Pinning { entered: 0 };
        visit(&mut tree, &mut pinning);
        // Terminating at all proves the resume request was dropped.
        assert_eq!(pinning.entered, 3);
    }

    #[test]
    fn test_resume_out_of_bounds_ends_only_that_list() {
        struct Jump {
            inner: Recorder,
        }
        impl Visitor for Jump {
            fn enter(&mut self, cursor: &mut Cursor<'_>) -> Signal {
                let signal = self.inner.enter(cursor);
                if cursor.node()["type"] == json!("A") {
                    return Signal::from(99);
                }
                signal
            }
            fn leave(&mut self, cursor: &mut Cursor<'_>) -> Signal {
                self.inner.leave(cursor)
            }
        }

        let mut tree = json!({
            "type": "Root",
            "first": [{"type": "A"}, {"type": "Unreached"}],
            "second": [{"type": "B"}],
        });
        let mut jump = Jump {
            inner: Recorder::new(),
        };
        visit(&mut tree, &mut jump);
        assert_eq!(
            jump.inner.events,
            [">Root", ">A", "<A", ">B", "<B", "<Root"],
        );
    }
}
