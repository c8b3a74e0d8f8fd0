pub mod manifest_parser;

pub use manifest_parser::*;
