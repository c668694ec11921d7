use std::fmt;

use super::builder::IntoWord;
use super::char_trait::DawgChar;
use super::node::{DawgNode, Edges, NodeId};

/// A finished, minimal word graph.
///
/// The root is owned directly; every other node lives in a pool addressed by
/// [`NodeId`]. There is no mutation surface and no interior mutability, so a
/// `Dawg` can be shared between threads and queried concurrently.
///
/// # Examples
///
/// ```
/// use wordgraph::dawg::builder::build_dawg;
///
/// let dawg = build_dawg(["BAKE", "CAKE", "FAKE", "LAKE", "MAKE"]).unwrap();
/// assert!(dawg.contains("CAKE"));
/// assert!(!dawg.contains("AKE"));
/// assert!(dawg.has_prefix("MA"));
/// ```
#[derive(Clone)]
pub struct Dawg<C: DawgChar = char> {
    root: DawgNode<C>,
    nodes: Vec<DawgNode<C>>,
    word_count: usize,
}

impl<C: DawgChar> Dawg<C> {
    pub(crate) fn new(root: DawgNode<C>, nodes: Vec<DawgNode<C>>, word_count: usize) -> Self {
        Dawg {
            root,
            nodes,
            word_count,
        }
    }

    /// Returns a handle to the root node.
    pub fn root(&self) -> NodeRef<'_, C> {
        NodeRef {
            dawg: self,
            node: &self.root,
            id: None,
        }
    }

    /// Returns a handle to the canonical node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn node(&self, id: NodeId) -> NodeRef<'_, C> {
        NodeRef {
            dawg: self,
            node: &self.nodes[id.index()],
            id: Some(id),
        }
    }

    /// Iterates over all canonical (non-root) nodes in id order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeRef<'_, C>> + '_ {
        (0..self.nodes.len()).map(move |i| self.node(NodeId::new(i)))
    }

    /// Returns the node reached by following `word` from the root.
    fn walk(&self, word: impl IntoWord<C>) -> Option<&DawgNode<C>> {
        word.collect_word()
            .iter()
            .try_fold(&self.root, |node, &ch| node.get(ch).map(|id| &self.nodes[id.index()]))
    }

    /// True if `word` is one of the words the graph was built from.
    ///
    /// ```
    /// use wordgraph::dawg::builder::build_dawg;
    ///
    /// let dawg = build_dawg(["BAKE", "CAKE"]).unwrap();
    /// assert!(dawg.contains("CAKE"));
    /// assert!(!dawg.contains("FAKE"));
    /// assert!(!dawg.contains(""));
    /// ```
    pub fn contains(&self, word: impl IntoWord<C>) -> bool {
        self.walk(word).is_some_and(DawgNode::is_accepting)
    }

    /// True if at least one word starts with `prefix`.
    pub fn has_prefix(&self, prefix: impl IntoWord<C>) -> bool {
        !self.is_empty() && self.walk(prefix).is_some()
    }

    /// Iterates over all words in ascending order.
    pub fn words(&self) -> Words<'_, C> {
        Words::new(self)
    }

    /// Returns the number of distinct words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// True if the graph accepts no word at all.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Returns the number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() + 1
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.nodes
            .iter()
            .chain(Some(&self.root))
            .map(DawgNode::child_count)
            .sum()
    }
}

impl<C: DawgChar> fmt::Debug for Dawg<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dawg")
            .field("words", &self.len())
            .field("node_count", &self.node_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}

/// A read-only handle to a node of a [`Dawg`].
///
/// Two handles compare equal iff they denote the same node of the same graph.
#[derive(Clone, Copy)]
pub struct NodeRef<'a, C: DawgChar> {
    dawg: &'a Dawg<C>,
    node: &'a DawgNode<C>,
    id: Option<NodeId>,
}

impl<'a, C: DawgChar> NodeRef<'a, C> {
    /// Returns the node that `letter`'s edge leads to, or None if no such edge
    /// exists.
    #[inline]
    pub fn get(self, letter: C) -> Option<NodeRef<'a, C>> {
        self.node.get(letter).map(|id| self.dawg.node(id))
    }

    /// True if this node corresponds to the end of a word.
    #[inline]
    pub fn is_word(self) -> bool {
        self.node.is_accepting()
    }

    /// The node's id, or None for the root.
    #[inline]
    pub fn id(self) -> Option<NodeId> {
        self.id
    }

    /// Returns the number of outgoing edges.
    #[inline]
    pub fn child_count(self) -> usize {
        self.node.child_count()
    }

    /// Iterates over the outgoing edges in ascending symbol order.
    pub fn children(self) -> Children<'a, C> {
        Children {
            dawg: self.dawg,
            edges: self.node.edges(),
        }
    }

    /// The underlying node, for structural inspection.
    pub fn node(self) -> &'a DawgNode<C> {
        self.node
    }
}

impl<C: DawgChar> PartialEq for NodeRef<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.node, other.node)
    }
}

impl<C: DawgChar> Eq for NodeRef<'_, C> {}

impl<C: DawgChar> fmt::Debug for NodeRef<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("NodeRef");
        match self.id {
            Some(id) => s.field("id", &id),
            None => s.field("id", &"root"),
        };
        s.field("word", &self.is_word())
            .field("children", &self.node.edges().map(|(ch, _)| ch).collect::<Vec<_>>())
            .finish()
    }
}

/// An iterator over the children of a [`NodeRef`].
#[derive(Clone)]
pub struct Children<'a, C: DawgChar> {
    dawg: &'a Dawg<C>,
    edges: Edges<'a, C>,
}

impl<'a, C: DawgChar> Iterator for Children<'a, C> {
    type Item = (C, NodeRef<'a, C>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.edges.next().map(|(ch, id)| (ch, self.dawg.node(id)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.edges.size_hint()
    }
}

impl<C: DawgChar> ExactSizeIterator for Children<'_, C> {}

/// Iterator over the words of a [`Dawg`], in ascending order.
///
/// Walks the graph depth first with an explicit stack, so word length is not
/// bounded by the call stack.
pub struct Words<'a, C: DawgChar> {
    stack: Vec<Children<'a, C>>,
    prefix: Vec<C>,
    pending_root: bool,
}

impl<'a, C: DawgChar> Words<'a, C> {
    fn new(dawg: &'a Dawg<C>) -> Self {
        let root = dawg.root();
        Words {
            stack: vec![root.children()],
            prefix: Vec::new(),
            pending_root: root.is_word(),
        }
    }
}

impl<C: DawgChar> Iterator for Words<'_, C> {
    type Item = Vec<C>;

    fn next(&mut self) -> Option<Vec<C>> {
        if std::mem::take(&mut self.pending_root) {
            return Some(Vec::new());
        }
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some((ch, child)) => {
                    self.prefix.push(ch);
                    self.stack.push(child.children());
                    if child.is_word() {
                        return Some(self.prefix.clone());
                    }
                }
                None => {
                    self.stack.pop();
                    self.prefix.pop();
                }
            }
        }
    }
}
