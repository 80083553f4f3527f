//! Clue index
//!
//! An ordered, deduplicating set of clue texts backed by an unbalanced binary
//! search tree. Clues are compared byte-wise and case-sensitively; the shape
//! of the tree follows the order in which rooms were visited.

use std::cmp::Ordering;
use std::fmt;

use tracing::trace;

type Link = Option<Box<ClueNode>>;

struct ClueNode {
    text: String,
    left: Link,
    right: Link,
}

impl ClueNode {
    fn leaf(text: &str) -> Box<Self> {
        Box::new(Self {
            text: text.to_string(),
            left: None,
            right: None,
        })
    }
}

/// Alphabetical set of every distinct clue discovered so far
#[derive(Default)]
pub struct ClueIndex {
    root: Link,
    len: usize,
}

impl ClueIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if `text` has been collected
    pub fn contains(&self, text: &str) -> bool {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match text.cmp(node.text.as_str()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Add a clue. Empty text and clues already present are ignored.
    ///
    /// Returns true if a new clue was stored.
    pub fn insert(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match text.cmp(node.text.as_str()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *slot = Some(ClueNode::leaf(text));
        self.len += 1;
        trace!(clue = text, len = self.len, "clue indexed");
        true
    }

    /// Clues in ascending order. Each call starts a fresh traversal.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self.root.as_deref(), self.len)
    }

    /// Same as [`iter`](Self::iter)
    pub fn in_order_sequence(&self) -> InOrder<'_> {
        self.iter()
    }

    /// Number of distinct clues
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree (0 when empty, 1 for a lone root)
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&ClueNode, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in [node.left.as_deref(), node.right.as_deref()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Release every node, children before parents.
    ///
    /// Returns the number of nodes released.
    pub fn teardown(mut self) -> usize {
        let released = release(self.root.take());
        self.len = 0;
        released
    }
}

/// Post-order release without recursion, so a list-shaped tree cannot
/// exhaust the call stack.
fn release(root: Link) -> usize {
    let mut pending: Vec<Box<ClueNode>> = root.into_iter().collect();
    let mut detached: Vec<Box<ClueNode>> = Vec::new();

    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
        detached.push(node);
    }

    // Every node sits after its ancestors, so popping frees descendants first
    let released = detached.len();
    while let Some(node) = detached.pop() {
        drop(node);
    }
    released
}

impl Drop for ClueIndex {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl fmt::Debug for ClueIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<S: AsRef<str>> Extend<S> for ClueIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for clue in iter {
            self.insert(clue.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClueIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<'a> IntoIterator for &'a ClueIndex {
    type Item = &'a str;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> InOrder<'a> {
        self.iter()
    }
}

/// In-order traversal driven by an explicit stack of pending ancestors
pub struct InOrder<'a> {
    stack: Vec<&'a ClueNode>,
    remaining: usize,
}

impl<'a> InOrder<'a> {
    fn new(root: Option<&'a ClueNode>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.descend_left(root);
        iter
    }

    fn descend_left(&mut self, mut node: Option<&'a ClueNode>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let node = self.stack.pop()?;
        self.descend_left(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node.text.as_str())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for InOrder<'_> {}
