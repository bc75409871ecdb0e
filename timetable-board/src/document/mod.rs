//! Feed document intake.
//!
//! Upstream feeds deliver XML. This module turns a body into a raw
//! [`TreeNode`] and normalizes that into a [`HierNode`], the keyed record
//! shape the reconciliation engine reads from.

mod normalize;
mod tree;

pub use normalize::{ATTRIBUTE_PREFIX, HierNode, HierValue, Mapping, TEXT_KEY, normalize};
pub use tree::{DocumentError, TreeNode};
