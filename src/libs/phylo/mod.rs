//! Distance matrices, neighbor-joining and Newick output.

pub mod build;
pub mod matrix;
pub mod node;
pub mod tree;
pub mod writer;

pub use matrix::DistanceMatrix;
pub use node::{Node, NodeId};
pub use tree::Tree;
