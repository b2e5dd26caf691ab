pub mod dot;
pub mod errors;
pub mod graphviz;

pub use dot::*;
pub use errors::*;
pub use graphviz::*;
