/// Incremental builder: sorted words in, minimal word graph out.
pub mod builder;
/// Trait for types that can serve as edge labels.
pub mod char_trait;
/// The finished, read-only word graph and its traversal handles.
pub mod graph;
/// Node and edge storage shared by the builder and the finished graph.
pub mod node;

pub use builder::{build_dawg, Builder, BuilderError, IntoWord};
pub use char_trait::DawgChar;
pub use graph::{Dawg, NodeRef, Words};
pub use node::{DawgNode, NodeId};
