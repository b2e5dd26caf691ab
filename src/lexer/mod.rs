//! Scanner for TINY source text: tokens, lexical error spans and the token
//! cursor consumed by the parser.

pub mod errors;
pub mod scanner;
pub mod tokens;

pub use errors::*;
pub use scanner::*;
pub use tokens::*;
