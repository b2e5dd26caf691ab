pub mod ast;
pub mod errors;
pub mod expressions;
pub mod labels;
pub mod statements;

pub use ast::*;
pub use errors::*;
pub use expressions::Parser;
pub use labels::*;
