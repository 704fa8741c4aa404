//! Reader for legacy `.brd` hull design files.
//!
//! ```text
//! p08 : TestBoard
//! p32 :
//! (cp [0.0,0.0,0,0,0,0] t t)
//! (cp [100.0,25.0,0,0,0,0] t t)
//! ```
//!
//! Property code 8 names the board; codes 32, 33 and 34 select the outline,
//! bottom and deck point lists that following control-point lines append
//! to. Only the centre `(x, y)` of each control point is kept.

pub mod lexer;
pub mod parser;

pub use parser::{parse_str, read_brd, LegacyDesign, LegacyDimensions};
