use hashbrown::HashMap;
use itertools::{Itertools, Position};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace};

use super::char_trait::DawgChar;
use super::graph::Dawg;
use super::node::{DawgNode, NodeId};

/// Inline capacity of a word buffer before it spills to the heap.
const WORD_INLINE: usize = 32;

/// A word collected into a symbol buffer.
pub type WordBuf<C> = SmallVec<[C; WORD_INLINE]>;

/// Trait for types that can be used as a word when building or querying a
/// word graph.
///
/// Implemented for the common string and sequence types so that
/// [`Builder::insert`], [`build_dawg`] and [`Dawg::contains`] accept them
/// directly.
pub trait IntoWord<C: DawgChar> {
    /// Collects this word into a symbol buffer.
    fn collect_word(self) -> WordBuf<C>;
}

macro_rules! str_words {
    ($($ty:ty),*) => {
        $(
            impl IntoWord<char> for $ty {
                fn collect_word(self) -> WordBuf<char> {
                    self.chars().collect()
                }
            }
        )*
    };
}

str_words!(&str, &&str, String, &String);

impl<C: DawgChar> IntoWord<C> for &[C] {
    fn collect_word(self) -> WordBuf<C> {
        self.iter().copied().collect()
    }
}

impl<C: DawgChar> IntoWord<C> for Vec<C> {
    fn collect_word(self) -> WordBuf<C> {
        self.into_iter().collect()
    }
}

impl<C: DawgChar> IntoWord<C> for &Vec<C> {
    fn collect_word(self) -> WordBuf<C> {
        self.as_slice().collect_word()
    }
}

impl<C: DawgChar, const N: usize> IntoWord<C> for [C; N] {
    fn collect_word(self) -> WordBuf<C> {
        self.into_iter().collect()
    }
}

impl<C: DawgChar, const N: usize> IntoWord<C> for &[C; N] {
    fn collect_word(self) -> WordBuf<C> {
        self.as_slice().collect_word()
    }
}

/// Errors that can occur while building a word graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError<C: DawgChar> {
    /// A word sorts strictly before the word inserted just before it.
    ///
    /// The offending word is rejected before the builder is touched, so the
    /// builder can still be finalized with the words accepted so far.
    #[error("words out of order: {previous:?} came before {word:?}")]
    Order {
        /// The last word accepted by the builder.
        previous: Vec<C>,
        /// The rejected word.
        word: Vec<C>,
    },
}

/// A suffix node of the current word that has not been proven canonical yet,
/// together with the symbol on the edge leading into it.
struct BuildState<C: DawgChar> {
    ch: C,
    node: DawgNode<C>,
}

/// Incremental builder of a minimal word graph.
///
/// Words must be inserted in ascending order (ordinal comparison on `C`);
/// repeating the previous word is allowed and has no effect. Common prefixes
/// are shared as soon as a word is inserted, common suffixes once the builder
/// knows no later word can extend them.
///
/// The nodes on the path of the last inserted word are owned by the builder
/// until they are folded into the register of canonical nodes, deepest node
/// first. A pending node only ever has edges to canonical nodes, which keeps
/// node comparison one level deep.
pub struct Builder<C: DawgChar = char> {
    root: DawgNode<C>,
    pending: Vec<BuildState<C>>,
    register: HashMap<DawgNode<C>, NodeId>,
    word_count: usize,
    discarded: usize,
}

impl<C: DawgChar> Default for Builder<C> {
    fn default() -> Self {
        Builder::new()
    }
}

impl<C: DawgChar> Builder<C> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Builder {
            root: DawgNode::new(false),
            pending: Vec::new(),
            register: HashMap::new(),
            word_count: 0,
            discarded: 0,
        }
    }

    /// Adds a word to the graph being constructed.
    ///
    /// The word can be any type that implements [`IntoWord`], including
    /// `&str`, `String`, `&[u8]`, `Vec<u8>`, or arrays like `[u8; 3]`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Order`] if the word sorts before the previously
    /// inserted word. The builder is left unchanged in that case.
    ///
    /// # Panics
    ///
    /// Panics if the graph needs more than `u32::MAX` canonical nodes, the
    /// range of [`NodeId`].
    pub fn insert(&mut self, word: impl IntoWord<C>) -> Result<(), BuilderError<C>> {
        let word = word.collect_word();
        self.insert_slice(&word)
    }

    fn insert_slice(&mut self, word: &[C]) -> Result<(), BuilderError<C>> {
        let prefix_len = self.common_prefix_len(word)?;
        if prefix_len == word.len() && prefix_len == self.pending.len() && self.word_count > 0 {
            trace!(len = word.len(), "duplicate word ignored");
            return Ok(());
        }

        self.minimize_until(prefix_len);
        self.add_suffix(&word[prefix_len..]);
        self.word_count += 1;
        Ok(())
    }

    /// Length of the prefix shared with the previous word, failing if `word`
    /// sorts before it.
    fn common_prefix_len(&self, word: &[C]) -> Result<usize, BuilderError<C>> {
        let prefix_len = self
            .pending
            .iter()
            .zip(word)
            .take_while(|&(state, &ch)| state.ch == ch)
            .count();

        let out_of_order = match (self.pending.get(prefix_len), word.get(prefix_len)) {
            (Some(_), None) => true,
            (Some(prev), Some(&ch)) => ch < prev.ch,
            (None, _) => false,
        };
        if out_of_order {
            let err = BuilderError::Order {
                previous: self.previous_word(),
                word: word.to_vec(),
            };
            debug!(%err, "rejected word");
            return Err(err);
        }
        Ok(prefix_len)
    }

    /// Appends one pending node per symbol of `suffix` and marks the end of
    /// the word. An empty suffix re-marks the node at the end of the shared
    /// prefix.
    fn add_suffix(&mut self, suffix: &[C]) {
        self.pending
            .extend(
                suffix
                    .iter()
                    .copied()
                    .with_position()
                    .map(|(position, ch)| BuildState {
                        ch,
                        node: DawgNode::new(matches!(position, Position::Last | Position::Only)),
                    }),
            );
        if suffix.is_empty() {
            self.tail_mut().mark_accepting();
        }
    }

    /// Folds the pending path down to `keep_depth` entries, deepest first.
    ///
    /// Every popped node is replaced by its canonical equivalent when one
    /// exists, or becomes canonical itself; either way its parent (the next
    /// pending node, or the root) gets an edge to the canonical node.
    fn minimize_until(&mut self, keep_depth: usize) {
        while self.pending.len() > keep_depth {
            let BuildState { ch, node } = self.pop_build_state();
            let child = self.canonicalize(node);
            self.tail_mut().add_edge(ch, child);
        }
    }

    fn pop_build_state(&mut self) -> BuildState<C> {
        self.pending
            .pop()
            .expect("pending path is longer than the requested depth")
    }

    /// The deepest node of the current word's path.
    fn tail_mut(&mut self) -> &mut DawgNode<C> {
        match self.pending.last_mut() {
            Some(state) => &mut state.node,
            None => &mut self.root,
        }
    }

    fn canonicalize(&mut self, node: DawgNode<C>) -> NodeId {
        debug_assert!(
            node.edges().all(|(_, child)| child.index() < self.register.len()),
            "Cannot canonicalize unless all children are canonical"
        );

        if let Some(&id) = self.register.get(&node) {
            trace!(%id, "pending node folded into canonical node");
            self.discarded += 1;
            id
        } else {
            let id = NodeId::new(self.register.len());
            trace!(%id, "pending node registered as canonical");
            self.register.insert(node, id);
            id
        }
    }

    /// The last word accepted by the builder; empty before the first insert.
    pub fn previous_word(&self) -> Vec<C> {
        self.pending.iter().map(|state| state.ch).collect()
    }

    /// Number of distinct words inserted so far.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// True if no word has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Finalizes construction and returns the minimal word graph.
    ///
    /// This folds the remaining pending path into the register and hands
    /// the canonical nodes over to the graph, ordered by id.
    ///
    /// # Panics
    ///
    /// Panics if the graph needs more than `u32::MAX` canonical nodes.
    pub fn finalize(mut self) -> Dawg<C> {
        self.minimize_until(0);
        let Builder {
            root,
            register,
            word_count,
            discarded,
            ..
        } = self;

        let mut canonical: Vec<(DawgNode<C>, NodeId)> = register.into_iter().collect();
        canonical.sort_unstable_by_key(|&(_, id)| id);
        let nodes: Vec<DawgNode<C>> = canonical.into_iter().map(|(node, _)| node).collect();

        debug!(
            words = word_count,
            nodes = nodes.len() + 1,
            discarded,
            "word graph finalized"
        );
        Dawg::new(root, nodes, word_count)
    }
}

/// Builds a word graph from an iterator of words.
///
/// Each word must implement [`IntoWord`], so this accepts `&str`, `String`,
/// slices, vectors and arrays alike.
///
/// Words **must** be provided in ascending order; a repeated word is ignored.
///
/// # Errors
///
/// Returns the first [`BuilderError::Order`] encountered.
///
/// # Examples
///
/// Building from strings:
///
/// ```
/// use wordgraph::dawg::builder::build_dawg;
///
/// let dawg = build_dawg(["APPLE", "BANANA", "CHERRY"]).unwrap();
/// assert!(dawg.contains("BANANA"));
/// assert!(!dawg.contains("APRICOT"));
/// ```
///
/// Building from byte sequences:
///
/// ```
/// use wordgraph::dawg::builder::build_dawg;
///
/// let words: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3, 4]];
/// let dawg = build_dawg(words).unwrap();
/// assert!(dawg.contains([1, 2, 3]));
/// assert!(!dawg.contains([1, 2, 5]));
/// ```
pub fn build_dawg<C, W>(words: impl IntoIterator<Item = W>) -> Result<Dawg<C>, BuilderError<C>>
where
    C: DawgChar,
    W: IntoWord<C>,
{
    let mut builder = Builder::new();
    for word in words {
        builder.insert(word)?;
    }
    Ok(builder.finalize())
}

#[cfg(test)]
mod test {
    use super::*;

    fn order_err(a: &str, b: &str) -> BuilderError<char> {
        BuilderError::Order {
            previous: a.chars().collect(),
            word: b.chars().collect(),
        }
    }

    #[test]
    fn graph_shares_nodes() {
        let single = build_dawg(["ABCDEF"]).unwrap();
        assert_eq!(single.node_count(), "ABCDEF".len() + 1);

        let shared = build_dawg(["ABCDEF", "ABDEF", "ABEF", "AF"]).unwrap();
        assert_eq!(single.node_count(), shared.node_count());
    }

    #[test]
    fn graph_shares_nodes_unicode() {
        let single = build_dawg(["授人以鱼不如授人以渔"]).unwrap();
        let shared = build_dawg(["授人以渔", "授人以鱼不如授人以渔"]).unwrap();
        assert_eq!(single.node_count(), shared.node_count());
    }

    #[test]
    fn sorted_input_words_gives_no_error() {
        let res = build_dawg(["ALFA", "BRAVO", "CHARLIE", "DELTA"]);
        assert!(res.is_ok());
    }

    #[test]
    fn unsorted_input_words_gives_error() {
        const SORTED_WORDS: [&str; 7] = [
            "ALFA", "BRAVO", "CHARLIE", "DELTA", "ECHO", "FOXTROT", "GOLF",
        ];
        let mut sorted_count = 0;
        // Every permutation except the sorted one must be rejected.
        for wordlist in SORTED_WORDS.iter().copied().permutations(SORTED_WORDS.len()) {
            let is_sorted = wordlist == SORTED_WORDS;
            let res = build_dawg(&wordlist);
            assert_eq!(res.is_ok(), is_sorted);
            sorted_count += is_sorted as i32;
        }
        assert_eq!(sorted_count, 1);
    }

    #[test]
    fn same_word_twice_is_accepted() {
        let mut builder = Builder::new();
        for word in ["ALFA", "BRAVO", "CHARLIE", "CHARLIE"] {
            builder.insert(word).unwrap();
        }
        assert_eq!(builder.len(), 3);
        let dawg = builder.finalize();
        assert!(dawg.contains("CHARLIE"));
        assert_eq!(dawg.len(), 3);
    }

    #[test]
    fn unsorted_input_words_gives_unsorted_words_in_error() {
        let res = build_dawg([
            "ALFA", "BRAVO", "CHARLIE", "DELTA", "ECHO", "GOLF", "FOXTROT", "HOTEL",
        ]);
        assert_eq!(res.unwrap_err(), order_err("GOLF", "FOXTROT"));

        let res = build_dawg(["ZULU", "ALFA", "BRAVO", "CHARLIE"]);
        assert_eq!(res.unwrap_err(), order_err("ZULU", "ALFA"));
    }

    #[test]
    fn prefix_after_extension_is_out_of_order() {
        let res = build_dawg(["ABC", "AB"]);
        assert_eq!(res.unwrap_err(), order_err("ABC", "AB"));
    }

    #[test]
    fn rejected_word_leaves_builder_usable() {
        let mut builder = Builder::new();
        builder.insert("BETA").unwrap();
        assert!(builder.insert("ALPHA").is_err());
        assert_eq!(builder.previous_word(), "BETA".chars().collect::<Vec<_>>());
        builder.insert("GAMMA").unwrap();

        let dawg = builder.finalize();
        assert!(dawg.contains("BETA"));
        assert!(dawg.contains("GAMMA"));
        assert!(!dawg.contains("ALPHA"));
        assert_eq!(dawg.len(), 2);
    }

    #[test]
    fn error_message_names_both_words() {
        let msg = order_err("B", "A").to_string();
        assert_eq!(msg, "words out of order: ['B'] came before ['A']");
    }

    #[test]
    fn empty_word_marks_root() {
        let dawg = build_dawg(["", "A"]).unwrap();
        assert!(dawg.contains(""));
        assert!(dawg.contains("A"));
        assert_eq!(dawg.len(), 2);

        let dawg = build_dawg(["A"]).unwrap();
        assert!(!dawg.contains(""));

        let dawg = build_dawg(["", "", "A", "A", "AB"]).unwrap();
        assert!(dawg.contains(""));
        assert!(dawg.contains("AB"));
        assert_eq!(dawg.len(), 3);

        let mut builder = Builder::<char>::new();
        builder.insert("").unwrap();
        builder.insert("").unwrap();
        assert_eq!(builder.len(), 1);
        let dawg = builder.finalize();
        assert!(dawg.contains(""));
        assert_eq!(dawg.len(), 1);
        assert_eq!(dawg.node_count(), 1);
    }

    #[test]
    fn empty_word_after_other_word_is_out_of_order() {
        let res = build_dawg(["A", ""]);
        assert_eq!(res.unwrap_err(), order_err("A", ""));
    }

    #[test]
    fn suffixes_are_shared() {
        let testdata = [
            "ASUFFIX",
            "BSUFFIX",
            "CDESUFFIX",
            "FFFFFFFSUFFIX",
            "INBETWEEN",
            "JSUFFIX",
            "XXSUFFIX",
        ];

        let dawg = build_dawg(testdata).unwrap();
        let root = dawg.root();
        let suffix_node = root.get('A').unwrap().get('S').unwrap();
        for word in testdata {
            if let Some(prefix) = word.strip_suffix("SUFFIX") {
                let node = prefix
                    .chars()
                    .chain(Some('S'))
                    .fold(root, |node, ch| node.get(ch).unwrap());
                assert_eq!(node, suffix_node);
                assert_eq!(node.id(), suffix_node.id());
            }
        }
    }

    #[test]
    fn pending_path_tracks_previous_word() {
        let mut builder = Builder::new();
        assert!(builder.previous_word().is_empty());
        builder.insert("abacus").unwrap();
        builder.insert("abbey").unwrap();
        assert_eq!(builder.previous_word(), "abbey".chars().collect::<Vec<_>>());
        assert_eq!(builder.pending.len(), "abbey".len());
    }

    #[test]
    fn minimize_folds_only_diverging_suffix() {
        let mut builder = Builder::new();
        builder.insert("abc").unwrap();
        assert!(builder.register.is_empty());
        builder.insert("abd").unwrap();
        // Only the node for the trailing "c" is folded.
        assert_eq!(builder.register.len(), 1);
        assert_eq!(builder.pending.len(), 3);
    }

    #[test]
    fn duplicate_suffix_nodes_are_discarded() {
        let mut builder = Builder::new();
        for word in ["ax", "bx", "cx"] {
            builder.insert(word).unwrap();
        }
        let dawg = builder.finalize();
        // root, one node for 'a'/'b'/'c', one accepting leaf for 'x'
        assert_eq!(dawg.node_count(), 3);
    }

    #[test]
    fn generic_dawg_with_u8() {
        let mut builder = Builder::<u8>::new();
        builder.insert([1, 2, 3]).unwrap();
        builder.insert([1, 2, 4]).unwrap();
        builder.insert([2, 3, 4]).unwrap();
        let dawg = builder.finalize();
        assert!(dawg.contains([1, 2, 3]));
        assert!(dawg.contains([1, 2, 4]));
        assert!(dawg.contains([2, 3, 4]));
        assert!(!dawg.contains([1, 2, 5]));
        assert!(!dawg.contains([1, 2]));
    }

    #[test]
    fn generic_dawg_with_build_dawg() {
        let words: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3, 4]];
        let dawg = build_dawg(words).unwrap();
        assert!(dawg.contains([1, 2, 3]));
        assert!(!dawg.contains([1, 2, 5]));
    }
}
