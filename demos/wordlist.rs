//! Example: a word list wrapper around a finished word graph.
//!
//! Shows how to put a small domain API on top of [`Dawg`]: word lookup,
//! prefix checks, completions and a size comparison with a plain trie.
//!
//! Run with: `RUST_LOG=wordgraph=debug cargo run --example wordlist`

use tracing_subscriber::EnvFilter;
use wordgraph::{build_dawg, BuilderError, Dawg, NodeRef};

/// A word list backed by a minimal word graph.
struct Wordlist {
    dawg: Dawg,
}

impl Wordlist {
    fn new<'a>(words: impl IntoIterator<Item = &'a str>) -> Result<Self, BuilderError<char>> {
        Ok(Wordlist {
            dawg: build_dawg(words)?,
        })
    }

    fn is_word(&self, word: &str) -> bool {
        self.dawg.contains(word)
    }

    fn has_prefix(&self, prefix: &str) -> bool {
        self.dawg.has_prefix(prefix)
    }

    /// All words starting with `prefix`, in order.
    fn completions(&self, prefix: &str) -> Vec<String> {
        let Some(start) = prefix
            .chars()
            .try_fold(self.dawg.root(), |node, ch| node.get(ch))
        else {
            return Vec::new();
        };
        let mut words = Vec::new();
        let mut buf: String = prefix.to_owned();
        Self::collect_words(start, &mut buf, &mut words);
        words
    }

    fn collect_words(node: NodeRef<'_, char>, prefix: &mut String, words: &mut Vec<String>) {
        if node.is_word() {
            words.push(prefix.clone());
        }
        for (ch, child) in node.children() {
            prefix.push(ch);
            Self::collect_words(child, prefix, words);
            prefix.pop();
        }
    }

    /// Number of nodes a trie without suffix sharing would need.
    fn trie_size(&self) -> usize {
        let words: Vec<Vec<char>> = self.dawg.words().collect();
        let shared: usize = words
            .windows(2)
            .map(|w| w[0].iter().zip(&w[1]).take_while(|(a, b)| a == b).count())
            .sum();
        1 + words.iter().map(Vec::len).sum::<usize>() - shared
    }
}

fn main() -> Result<(), BuilderError<char>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let words = ["BAKE", "BAKED", "BAKER", "CAKE", "CAKED", "FAKE", "LAKE"];
    let wordlist = Wordlist::new(words)?;

    println!("Word lookup:");
    for word in ["BAKE", "BAKER", "BAKES", "CAKE", "LAKE", "MAKE"] {
        println!("  {word}: {}", if wordlist.is_word(word) { "yes" } else { "no" });
    }

    println!("\nPrefix checking:");
    for prefix in ["BA", "CAK", "MA", "FAK"] {
        println!("  {prefix}*: {}", if wordlist.has_prefix(prefix) { "yes" } else { "no" });
    }

    println!("\nCompletions of BAK: {:?}", wordlist.completions("BAK"));
    println!(
        "\nNodes: {} (a trie would need {})",
        wordlist.dawg.node_count(),
        wordlist.trie_size()
    );
    Ok(())
}
