//! The functional core.
//!
//! The line grammar, the script parsers built on it, syntax validation,
//! and the flattened export graph every writer renders from.
pub mod export;
pub mod grammar;
pub mod script_parser;
pub mod validator;

pub use grammar::{ErrorKind, ParseError};
pub use script_parser::compile;
pub use validator::{Diagnostic, validate};
