//! TINY Language Front End
//!
//! Scanner and recursive-descent parser for TINY, a small teaching language
//! with `if`/`repeat` control flow, assignment, `read`/`write` and integer or
//! decimal arithmetic. The parser builds a labeled syntax tree meant for
//! rendering, e.g. with Graphviz.

pub mod analysis;
pub mod lexer;
pub mod parser;
pub mod render;

pub use analysis::*;
pub use lexer::*;
pub use parser::*;
pub use render::*;
