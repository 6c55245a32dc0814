pub mod align;
pub mod error;
pub mod io;
pub mod phylo;
pub mod score_matrix;
pub mod seq;
pub mod sub_matrix;

pub use error::{Error, Result};
