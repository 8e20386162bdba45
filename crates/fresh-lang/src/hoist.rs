//! Tween hoisting.
//!
//! In markup a keyframe lists its tween alongside the objects it animates:
//!
//! ```text
//! <keyframe t="0"><child name="arm"/><tween type="Move"/></keyframe>
//! ```
//!
//! The Fresh language wants the tween as a property of the keyframe, after
//! its `children [ ... ]` array. This pass rewrites every keyframe with
//! element children into one synthetic `children` node holding the
//! non-tween elements, followed by the tweens in source order.

use fresh_core::Node;

use crate::schema::{ElementKind, CHILDREN_ARRAY};

/// A tree whose keyframes have been through [`hoist_tweens`].
///
/// The Fresh language writer only accepts this type, so it never sees a
/// keyframe whose children array has not been split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoistedTree {
    root: Node,
}

impl HoistedTree {
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }
}

/// Relocate tweens out of keyframe children arrays, post-order.
pub fn hoist_tweens(root: Node) -> HoistedTree {
    HoistedTree { root: hoist(root) }
}

fn hoist(mut node: Node) -> Node {
    node.children = std::mem::take(&mut node.children)
        .into_iter()
        .map(hoist)
        .collect();

    if ElementKind::classify(&node) != ElementKind::Keyframe || node.children.is_empty() {
        return node;
    }

    let (tweens, members): (Vec<Node>, Vec<Node>) = std::mem::take(&mut node.children)
        .into_iter()
        .partition(|child| ElementKind::classify(child) == ElementKind::Tween);

    if !tweens.is_empty() {
        tracing::debug!(count = tweens.len(), "hoisting tweens out of keyframe children");
    }

    let mut array = Node::new(CHILDREN_ARRAY);
    array.children = members;
    node.children = std::iter::once(array).chain(tweens).collect();
    node
}
