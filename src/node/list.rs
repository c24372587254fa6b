//! List-node mutation algorithm and the stateful cursor.
//!
//! Every mutation of a list node's children re-establishes two invariants:
//! adjacent text leaves are merged into one (concatenated into the earlier
//! position), and an empty text leaf is never stored. The same rules apply
//! whether mutation goes through the index operations on [`Node`] or
//! through a [`Cursor`], so semantically equivalent operation sequences
//! produce identical lists.

use super::{Body, Node, NodeError};
use super::kind::Kind;

fn is_empty_text(node: &Node) -> bool {
    node.as_text().is_some_and(str::is_empty)
}

/// Concatenate `source`'s payload onto the end of `target`'s.
fn append_payload(target: &mut Node, source: Node) {
    if let (Body::Text(dst), Body::Text(src)) = (&mut target.body, source.body) {
        dst.push_str(&src);
    }
}

/// Concatenate `source`'s payload onto the front of `target`'s, so the
/// merged leaf keeps the earlier position's text first.
fn prepend_payload(target: &mut Node, source: Node) {
    if let (Body::Text(dst), Body::Text(src)) = (&mut target.body, source.body) {
        dst.insert_str(0, &src);
    }
}

/// Merge `children[at - 1]` and `children[at]` if both are text leaves.
/// Called after a removal that may have made two text leaves adjacent.
fn merge_boundary(children: &mut Vec<Node>, at: usize) {
    if at > 0 && at < children.len() && children[at - 1].is_text() && children[at].is_text() {
        let second = children.remove(at);
        append_payload(&mut children[at - 1], second);
    }
}

pub(crate) fn push(children: &mut Vec<Node>, node: Node) {
    if node.is_text() {
        if is_empty_text(&node) {
            return;
        }
        if let Some(last) = children.last_mut() {
            if last.is_text() {
                append_payload(last, node);
                return;
            }
        }
    }
    children.push(node);
}

/// Insert before `index` (`index <= children.len()` checked by the caller).
pub(crate) fn insert(children: &mut Vec<Node>, index: usize, node: Node) {
    if node.is_text() {
        if is_empty_text(&node) {
            return;
        }
        if index > 0 && children[index - 1].is_text() {
            append_payload(&mut children[index - 1], node);
            return;
        }
        if index < children.len() && children[index].is_text() {
            prepend_payload(&mut children[index], node);
            return;
        }
    }
    children.insert(index, node);
}

/// Replace the slot at `index` (bounds checked by the caller), returning
/// the previous occupant. An empty-text replacement removes the slot; a
/// text replacement merges with whichever neighbors are text (the old
/// occupant may have been the only separator between two text leaves).
pub(crate) fn set(children: &mut Vec<Node>, index: usize, node: Node) -> Node {
    if is_empty_text(&node) {
        let old = children.remove(index);
        merge_boundary(children, index);
        return old;
    }
    let old = std::mem::replace(&mut children[index], node);
    if children[index].is_text() {
        if index + 1 < children.len() && children[index + 1].is_text() {
            let next = children.remove(index + 1);
            append_payload(&mut children[index], next);
        }
        merge_boundary(children, index);
    }
    old
}

/// Remove the slot at `index` (bounds checked by the caller), merging the
/// text neighbors the removal makes adjacent.
pub(crate) fn remove(children: &mut Vec<Node>, index: usize) -> Node {
    let old = children.remove(index);
    merge_boundary(children, index);
    old
}

/// Stateful cursor over a list node's children, positioned *between*
/// elements. `next`/`prev` move the position and establish the current
/// element; `insert` adds before the position; `replace`/`remove` act on
/// the current element and clear it.
pub struct Cursor<'a> {
    kind: Kind,
    children: &'a mut Vec<Node>,
    pos: usize,
    current: Option<usize>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(kind: Kind, children: &'a mut Vec<Node>) -> Self {
        Self {
            kind,
            children,
            pos: 0,
            current: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.children.len()
    }

    pub fn has_prev(&self) -> bool {
        self.pos > 0
    }

    /// Advance over the next element and return it.
    pub fn next(&mut self) -> Option<&Node> {
        if self.pos < self.children.len() {
            self.current = Some(self.pos);
            self.pos += 1;
            Some(&self.children[self.pos - 1])
        } else {
            None
        }
    }

    /// Step back over the previous element and return it.
    pub fn prev(&mut self) -> Option<&Node> {
        if self.pos > 0 {
            self.pos -= 1;
            self.current = Some(self.pos);
            Some(&self.children[self.pos])
        } else {
            None
        }
    }

    /// Insert before the cursor position, with the usual list
    /// normalization. The cursor ends up after the inserted content.
    pub fn insert(&mut self, node: Node) {
        let before = self.children.len();
        insert(self.children, self.pos, node);
        if self.children.len() > before {
            self.pos += 1;
        }
        self.current = None;
    }

    /// Replace the current element, returning the previous occupant.
    pub fn replace(&mut self, node: Node) -> Result<Node, NodeError> {
        let index = self.current.take().ok_or(NodeError::CursorState {
            kind: self.kind.name(),
            op: "replace",
        })?;
        let before = self.children.len();
        let old = set(self.children, index, node);
        let len = self.children.len();
        if len < before {
            self.pos = index.min(len);
        } else {
            self.current = Some(index);
            self.pos = self.pos.min(len);
        }
        Ok(old)
    }

    /// Remove the current element, returning it.
    pub fn remove(&mut self) -> Result<Node, NodeError> {
        let index = self.current.take().ok_or(NodeError::CursorState {
            kind: self.kind.name(),
            op: "remove",
        })?;
        let old = remove(self.children, index);
        self.pos = index.min(self.children.len());
        Ok(old)
    }
}
