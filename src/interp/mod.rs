//! Tree-walking interpreter
//!
//! Executes the parsed statement sequence directly over the AST.

pub mod env;
pub mod eval;
pub mod value;

pub use env::Environment;
pub use eval::Interpreter;
pub use value::Value;
