//! CSS layer: typed values, inline declaration tokenizer/parser, style maps.

pub mod value;
pub mod tokenizer;
pub mod parser;
pub mod style;

pub use parser::{parse_declarations, Declaration, StyleParseError};
pub use style::StyleDeclaration;
pub use value::{Angle, Edges, Length, Unit};
