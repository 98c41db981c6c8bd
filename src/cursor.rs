//! The cursor handed to visitor callbacks.
//!
//! The walker never hands out raw references into the tree. Instead each
//! callback receives a [`Cursor`]: an exclusive borrow of the whole tree
//! plus the root-relative path of the node being visited. Every accessor
//! resolves that path against the tree *as it is right now*, so a mutation
//! made through [`Cursor::node_mut`] or [`Cursor::siblings_mut`] is
//! immediately visible to later accessor calls and to the walker itself.
//! Nothing is cached across calls, list lengths included.

use serde_json::Value;

/// One step of the root-relative path to the current node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment {
    /// Attribute name under which the child lives in its parent.
    pub key: String,
    /// Position within the attribute's list, when the attribute holds one.
    pub index: Option<usize>,
}

/// Follow `path` through `tree`, read-only.
///
/// Fails when the path dangles: a visitor spliced an ancestor list or
/// replaced an intermediate value since the path was recorded.
pub(crate) fn resolve<'a>(tree: &'a Value, path: &[Segment]) -> Option<&'a Value> {
    let mut value = tree;
    for segment in path {
        let field = value.as_object()?.get(&segment.key)?;
        value = match segment.index {
            Some(index) => field.as_array()?.get(index)?,
            None => field,
        };
    }
    Some(value)
}

/// Follow `path` through `tree`, mutably.
pub(crate) fn resolve_mut<'a>(tree: &'a mut Value, path: &[Segment]) -> Option<&'a mut Value> {
    let mut value = tree;
    for segment in path {
        let field = value.as_object_mut()?.get_mut(&segment.key)?;
        value = match segment.index {
            Some(index) => field.as_array_mut()?.get_mut(index)?,
            None => field,
        };
    }
    Some(value)
}

/// Borrowed view of the node a callback is standing on.
///
/// Alongside the node itself, the cursor reports where the node lives
/// ([`key`](Cursor::key), [`index`](Cursor::index)), exposes its strict
/// ancestors ([`ancestors`](Cursor::ancestors)), and grants mutable access
/// to the enclosing sibling list ([`siblings_mut`](Cursor::siblings_mut))
/// so a callback can splice siblings in place and steer the resumed scan
/// with a [`Signal`](crate::Signal) resume position.
pub struct Cursor<'a> {
    tree: &'a mut Value,
    path: &'a [Segment],
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(tree: &'a mut Value, path: &'a [Segment]) -> Self {
        Cursor { tree, path }
    }

    /// The node this callback was invoked for.
    ///
    /// # Panics
    ///
    /// Panics if the callback has already detached the node it is standing
    /// on (for example by clearing its own sibling list).
    pub fn node(&self) -> &Value {
        resolve(self.tree, self.path).expect("current node was detached from the tree")
    }

    /// Mutable access to the node this callback was invoked for.
    ///
    /// # Panics
    ///
    /// Panics if the callback has already detached the node it is standing on.
    pub fn node_mut(&mut self) -> &mut Value {
        resolve_mut(self.tree, self.path).expect("current node was detached from the tree")
    }

    /// Attribute name under which the node lives in its parent.
    ///
    /// `None` when visiting the tree root.
    pub fn key(&self) -> Option<&str> {
        self.path.last().map(|segment| segment.key.as_str())
    }

    /// Position of the node within its enclosing sibling list.
    ///
    /// `None` when the node is the root or a single-child attribute value.
    pub fn index(&self) -> Option<usize> {
        self.path.last().and_then(|segment| segment.index)
    }

    /// Strict ancestors of the node, root-first.
    ///
    /// Empty when visiting the root. The list is rebuilt from the current
    /// tree state on every call; it never aliases state a sibling's callback
    /// could have mutated.
    pub fn ancestors(&self) -> Vec<&Value> {
        let mut ancestors = Vec::with_capacity(self.path.len());
        let mut value: &Value = self.tree;
        for segment in self.path {
            ancestors.push(value);
            let child = value.get(segment.key.as_str()).and_then(|field| match segment.index {
                Some(index) => field.get(index),
                None => Some(field),
            });
            match child {
                Some(next) => value = next,
                None => break,
            }
        }
        ancestors
    }

    /// The ordered list of siblings enclosing the node, for in-place
    /// splicing.
    ///
    /// `None` when the node is not a list element. A callback that removes
    /// elements at or before its own position should return a resume
    /// position so the walker rescans from the right place:
    ///
    /// ```
    /// use serde_json::json;
    /// use treevisit::{visit, Cursor, Signal};
    ///
    /// let mut tree = json!({"type": "List", "items": [
    ///     {"type": "Item", "n": 1},
    ///     {"type": "Item", "n": 2},
    /// ]});
    ///
    /// // Drop the first item upon reaching the second one. After the
    /// // removal everything slid left, so the element to scan next sits
    /// // at the index the current node was visited at.
    /// visit(&mut tree, &mut |cursor: &mut Cursor<'_>| -> Signal {
    ///     if cursor.node()["n"] == json!(2) {
    ///         let index = cursor.index().unwrap();
    ///         cursor.siblings_mut().unwrap().remove(index - 1);
    ///         return Signal::from(index);
    ///     }
    ///     Signal::empty()
    /// });
    ///
    /// assert_eq!(tree["items"], json!([{"type": "Item", "n": 2}]));
    /// ```
    pub fn siblings_mut(&mut self) -> Option<&mut Vec<Value>> {
        let (last, parent_path) = self.path.split_last()?;
        last.index?;
        let parent = resolve_mut(self.tree, parent_path)?;
        parent.get_mut(last.key.as_str())?.as_array_mut()
    }
}
