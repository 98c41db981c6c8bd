//! Control signals returned by visitor callbacks.
//!
//! A callback steers the walk by returning a [`Signal`]: an [`Action`]
//! (continue, skip the subtree, or stop the whole walk) plus an optional
//! resume position for the enclosing sibling list. Most callbacks do not
//! care about most of this, so `Signal` converts from the handful of
//! shorthand forms a callback naturally produces:
//!
//! - `()` - no preference, the walk proceeds normally
//! - an [`Action`] - just steer, no resume position
//! - a `usize` - continue, but resume the enclosing list scan at that index
//! - an `(Action, usize)` pair - both at once

/// Controls how the walker proceeds after a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Continue traversal into children.
    #[default]
    Continue,

    /// Skip this node's children, continue with siblings.
    ///
    /// The walker will not descend into the node, but `leave` still fires
    /// for it.
    Skip,

    /// Stop traversal entirely.
    ///
    /// No further `enter` or `leave` callbacks fire anywhere in the tree;
    /// [`visit`](crate::visit) returns immediately.
    Exit,
}

/// Normalized callback result: an action plus an optional resume position.
///
/// The resume position is only meaningful while visiting a node that lives
/// inside an ordered list of siblings; it tells the walker which list index
/// to scan next after the current node is finished. Positions at or past the
/// list's current length end that list's scan (the parent's remaining
/// attributes are still processed).
///
/// An *empty* signal expresses no preference at all. It reads as `Continue`,
/// and when returned from `leave` it defers to whatever the node's `enter`
/// callback decided, resume position included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signal {
    action: Option<Action>,
    resume: Option<usize>,
}

impl Signal {
    /// Signal expressing no preference; the walk proceeds normally.
    pub const fn empty() -> Self {
        Signal {
            action: None,
            resume: None,
        }
    }

    /// Signal carrying just an action.
    pub const fn new(action: Action) -> Self {
        Signal {
            action: Some(action),
            resume: None,
        }
    }

    /// Signal carrying an action and a resume position for the enclosing
    /// sibling list.
    pub const fn resume_at(action: Action, index: usize) -> Self {
        Signal {
            action: Some(action),
            resume: Some(index),
        }
    }

    /// The action to take. An unspecified action reads as [`Action::Continue`].
    pub fn action(&self) -> Action {
        self.action.unwrap_or_default()
    }

    /// Sibling-list position to resume scanning from, if the callback
    /// supplied one.
    pub fn resume(&self) -> Option<usize> {
        self.resume
    }

    /// True when the callback expressed no preference.
    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.resume.is_none()
    }
}

impl From<()> for Signal {
    fn from(_: ()) -> Self {
        Signal::empty()
    }
}

impl From<Action> for Signal {
    fn from(action: Action) -> Self {
        Signal::new(action)
    }
}

/// Bare-integer shorthand: continue, but resume the enclosing list scan at
/// this index.
impl From<usize> for Signal {
    fn from(index: usize) -> Self {
        Signal::resume_at(Action::Continue, index)
    }
}

impl From<(Action, usize)> for Signal {
    fn from((action, index): (Action, usize)) -> Self {
        Signal::resume_at(action, index)
    }
}
