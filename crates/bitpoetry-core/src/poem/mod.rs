//! Finite Poetry Protocol decoding.
//!
//! The parser walks a byte stream of fixed 3-byte records (category, repeat
//! count, dictionary index) and renders each against the vocabulary table.
//! Record framing and category constraints are enforced before any word
//! lookup; the end-of-poem marker is handled by the stream walk's bound, not
//! by value inspection (legacy framing, kept for compatibility).
//!
//! Errors report invalid sizes, categories, or dictionary indices.
//! Wire-format details are defined in `layout`, while safe byte reads live
//! in `reader`.
//!
pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::{decode_poem, decode_poem_lines, decode_record, parse_record};
