//! Input parsing and record-set handling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{RecordSet, Value, is_null_sentinel};
