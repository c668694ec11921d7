use std::fmt;

use super::char_trait::DawgChar;

/// Stable index of a canonical node inside a finished word graph.
///
/// Ids are handed out in the order nodes become canonical, so a node's id is
/// always greater than the ids of every node it points to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`.
    pub(crate) fn new(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("word graph exceeds u32::MAX nodes"))
    }

    /// Position of the node in the canonical pool.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A compact representation of the outgoing edges of a node that doesn't
/// allocate until there are at least three of them.
///
/// Edges are always sorted by symbol and a given edge count always maps to the
/// same variant, so the derived equality and hash are structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Children<C: DawgChar> {
    None,
    One((C, NodeId)),
    Two((C, NodeId, C, NodeId)),
    Many(Vec<(C, NodeId)>),
}

impl<C: DawgChar> Children<C> {
    #[inline]
    fn get(&self, index: usize) -> Option<(C, NodeId)> {
        match self {
            Children::None => None,
            Children::One(child) => (index == 0).then_some(*child),
            Children::Two((c1, n1, c2, n2)) => match index {
                0 => Some((*c1, *n1)),
                1 => Some((*c2, *n2)),
                _ => None,
            },
            Children::Many(children) => children.get(index).copied(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::One(_) => 1,
            Children::Two(_) => 2,
            Children::Many(children) => children.len(),
        }
    }

    /// Points the edge labeled `letter` at `child`, inserting it in sorted
    /// position when absent.
    fn set(&mut self, letter: C, child: NodeId) {
        match self {
            Children::None => *self = Children::One((letter, child)),
            Children::One((c1, n1)) => {
                *self = if *c1 == letter {
                    Children::One((letter, child))
                } else if letter < *c1 {
                    Children::Two((letter, child, *c1, *n1))
                } else {
                    Children::Two((*c1, *n1, letter, child))
                }
            }
            Children::Two((c1, n1, c2, n2)) => {
                if *c1 == letter {
                    *n1 = child;
                } else if *c2 == letter {
                    *n2 = child;
                } else {
                    let mut v = vec![(*c1, *n1), (*c2, *n2), (letter, child)];
                    v.sort_unstable_by_key(|&(c, _)| c);
                    *self = Children::Many(v);
                }
            }
            Children::Many(children) => {
                let pos = children.partition_point(|&(c, _)| c < letter);
                if children.get(pos).is_some_and(|&(c, _)| c == letter) {
                    children[pos].1 = child;
                } else {
                    children.insert(pos, (letter, child));
                }
            }
        }
    }
}

/// A single state of the word graph: its sorted outgoing edges plus the flag
/// telling whether some word ends here.
///
/// Successors are referred to by [`NodeId`], so two nodes compare equal when
/// they agree on the word flag and point to the *same* canonical successors
/// under the same symbols. The builder only ever compares nodes whose
/// successors are already canonical, which makes this one-level comparison
/// equivalent to full structural equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DawgNode<C: DawgChar> {
    children: Children<C>,
    word: bool,
}

impl<C: DawgChar> DawgNode<C> {
    /// Creates a node without edges.
    ///
    /// # Arguments
    ///
    /// * `word` - Whether this node represents the end of a valid word
    pub fn new(word: bool) -> Self {
        DawgNode {
            children: Children::None,
            word,
        }
    }

    /// Returns the successor along `letter`, or None if no such edge exists.
    #[inline]
    pub fn get(&self, letter: C) -> Option<NodeId> {
        match &self.children {
            Children::None => None,
            Children::One((ch, node)) => (*ch == letter).then_some(*node),
            Children::Two((c1, n1, c2, n2)) => {
                if letter == *c1 {
                    Some(*n1)
                } else if letter == *c2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            Children::Many(children) => children
                .binary_search_by_key(&letter, |&(c, _)| c)
                .ok()
                .map(|i| children[i].1),
        }
    }

    /// Installs or overwrites the edge labeled `letter`.
    pub fn add_edge(&mut self, letter: C, node: NodeId) {
        self.children.set(letter, node);
    }

    /// Marks this node as the end of a word. Idempotent.
    #[inline]
    pub fn mark_accepting(&mut self) {
        self.word = true;
    }

    /// True if this node corresponds to the end of a word.
    #[inline]
    pub fn is_accepting(&self) -> bool {
        self.word
    }

    /// Returns an iterator over the outgoing edges in ascending symbol order.
    #[inline]
    pub fn edges(&self) -> Edges<'_, C> {
        Edges {
            children: &self.children,
            index: 0,
        }
    }

    /// Returns the number of outgoing edges.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// An iterator over the outgoing edges of a [`DawgNode`].
#[derive(Clone)]
pub struct Edges<'a, C: DawgChar> {
    children: &'a Children<C>,
    index: usize,
}

impl<C: DawgChar> Iterator for Edges<'_, C> {
    type Item = (C, NodeId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.children.get(self.index)?;
        self.index += 1;
        Some(edge)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.children.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<C: DawgChar> ExactSizeIterator for Edges<'_, C> {}
