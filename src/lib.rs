//! # wordgraph
//!
//! Compact storage for large word lists with exact-match lookup in time
//! proportional to the word length.
//!
//! A word graph (DAWG, [deterministic acyclic finite state automaton](https://en.wikipedia.org/wiki/Deterministic_acyclic_finite_state_automaton))
//! is a trie whose identical subtrees have been merged, so words share their
//! suffixes as well as their prefixes. The graph is built in a single pass
//! over a sorted word list with the incremental algorithm of
//! [Daciuk et al. (2000)](https://arxiv.org/abs/cs/0007009v1), and is minimal
//! once built.
//!
//! ## Quick Start
//!
//! ```
//! use wordgraph::build_dawg;
//!
//! let dawg = build_dawg(["BAKE", "CAKE", "FAKE", "LAKE", "MAKE"]).unwrap();
//! assert!(dawg.contains("CAKE"));
//! assert!(!dawg.contains("AKE"));
//!
//! // All five words share the trailing "AKE".
//! assert_eq!(dawg.node_count(), 5);
//! ```
//!
//! Words can also be fed one at a time:
//!
//! ```
//! use wordgraph::Builder;
//!
//! let mut builder = Builder::new();
//! builder.insert("abaca").unwrap();
//! builder.insert("abacas").unwrap();
//! assert!(builder.insert("abac").is_err()); // out of order
//!
//! let dawg = builder.finalize();
//! assert!(dawg.contains("abacas"));
//! assert!(!dawg.contains("abac"));
//! ```
//!
//! ## Generic Usage
//!
//! The graph is generic over the edge label type:
//!
//! ```
//! use wordgraph::build_dawg;
//!
//! let words: Vec<Vec<u8>> = vec![vec![1, 2, 3], vec![1, 2, 4], vec![2, 3, 4]];
//! let dawg = build_dawg(words).unwrap();
//! assert!(dawg.contains([1, 2, 3]));
//! assert!(!dawg.contains([1, 2, 5]));
//! ```

#![warn(missing_docs)]

/// Core data structures: nodes, builder, finished graph and symbol trait.
pub mod dawg;

pub use dawg::{build_dawg, Builder, BuilderError, Dawg, DawgChar, IntoWord, NodeRef};

#[cfg(test)]
mod test {
    use super::build_dawg;

    const WORDS: [&str; 9] = [
        "abaca",
        "abacas",
        "abacost",
        "abacosts",
        "abacule",
        "abacules",
        "abaissa",
        "abaissable",
        "balader",
    ];

    #[test]
    fn construction() {
        let dawg = build_dawg(WORDS).unwrap();
        for word in WORDS {
            assert!(dawg.contains(word), "{word}");
        }
        assert!(!dawg.contains("balade"));
        assert!(!dawg.contains("abac"));
        assert!(!dawg.contains(""));
        assert_eq!(dawg.len(), WORDS.len());
    }

    #[test]
    fn chained_prefixes() {
        let dawg = build_dawg(["a", "ab", "abc"]).unwrap();
        assert!(dawg.contains("a"));
        assert!(!dawg.contains("b"));
        let accepting = dawg.nodes().filter(|n| n.is_word()).count();
        assert_eq!(accepting, 3);
    }

    #[test]
    fn trailing_symbol_is_shared() {
        let dawg = build_dawg(["ax", "bx"]).unwrap();
        let root = dawg.root();
        let from_a = root.get('a').and_then(|n| n.get('x')).unwrap();
        let from_b = root.get('b').and_then(|n| n.get('x')).unwrap();
        assert_eq!(from_a, from_b);
        // a trie would need root + a + b + two x leaves
        assert!(dawg.node_count() < 5);
    }

    #[test]
    fn empty_input() {
        let dawg = build_dawg::<char, &str>([]).unwrap();
        assert!(dawg.is_empty());
        assert!(!dawg.contains(""));
        assert!(!dawg.contains("a"));
        assert_eq!(dawg.node_count(), 1);
        assert_eq!(dawg.words().next(), None);
    }
}
