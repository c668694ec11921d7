use std::fmt::Debug;
use std::hash::Hash;

/// Trait for types that can label the edges of a word graph.
///
/// Blanket-implemented for every type satisfying the bounds, so `char`, `u8`,
/// `u16`, `u32` and friends all work out of the box.
///
/// - `Copy`: edges store labels by value
/// - `Eq + Ord`: words are compared symbol by symbol, edges are kept sorted
/// - `Hash`: structural deduplication of nodes during minimization
/// - `Debug`: error messages and debug printing
pub trait DawgChar: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> DawgChar for T {}
