//! Generic depth-first traversal for JSON syntax trees.
//!
//! Upstream parsers (for JavaScript, Python, Markdown, …) commonly hand
//! tooling an abstract syntax tree as JSON: every node is an object with a
//! non-empty string `type`, and children hang off arbitrary named
//! attributes, either as a single child object or as an ordered list.
//! This crate walks such trees, deserialized into [`serde_json::Value`],
//! without the caller writing a traversal routine per tree shape, which is
//! the piece of plumbing every linter, codemod, and compiler pass otherwise
//! reinvents.
//!
//! # Overview
//!
//! - [`visit`] - the entry point: depth-first, pre-order `enter` /
//!   post-order `leave`
//! - [`Visitor`] - the callback pair; closures work for enter-only passes
//! - [`Cursor`] - a callback's window onto the node, its location, its
//!   ancestors, and its sibling list
//! - [`Action`] / [`Signal`] - control flow: continue, skip a subtree,
//!   stop the walk, or resume a sibling-list scan at a chosen index
//! - [`is_node`] - the classification predicate deciding what gets visited
//!
//! Two attribute names are reserved and never treated as child containers:
//! `position` (source-position metadata) and `data` (opaque user data).
//!
//! Visitors may mutate the tree while it is being walked. The walker
//! re-reads list lengths and contents on every scan step, so splicing the
//! sibling list through [`Cursor::siblings_mut`] and returning a resume
//! position is well-defined rather than undefined behavior.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use treevisit::{visit, Action, Cursor, Signal};
//!
//! let mut tree = json!({
//!     "type": "Program",
//!     "body": [
//!         {"type": "ExpressionStatement", "expression": {"type": "Identifier", "name": "x"}},
//!     ],
//! });
//!
//! // Find the first identifier, then stop the walk.
//! let mut found = None;
//! visit(&mut tree, &mut |cursor: &mut Cursor<'_>| -> Signal {
//!     if cursor.node()["type"] == json!("Identifier") {
//!         found = cursor.node()["name"].as_str().map(String::from);
//!         return Action::Exit.into();
//!     }
//!     Signal::empty()
//! });
//!
//! assert_eq!(found.as_deref(), Some("x"));
//! ```

pub mod cursor;
pub mod node;
pub mod signal;
pub mod walk;

pub use cursor::Cursor;
pub use node::{is_node, node_type};
pub use signal::{Action, Signal};
pub use walk::{visit, Visitor};
