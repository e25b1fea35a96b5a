//! Routing module
//!
//! Route storage and resolution:
//! - Path segmentation
//! - Segment trie and linear path indexes
//! - Method-aware route table

mod linear;
mod segment;
mod table;
mod trie;

pub use linear::LinearIndex;
pub use segment::{next_path_segment, segments};
pub use table::{IndexKind, MethodMap, Route, RouteError, RouteTable};
pub use trie::{PathIndex, PathTrie};
