//! Pairwise sequence alignment and Neighbor-Joining phylogenies.
//!
//! The computational core lives in [`libs`]; the `phylign` binary is a thin
//! command-line shell around it.

pub mod libs;

pub use crate::libs::io::{reader, writer};
