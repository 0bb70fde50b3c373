//! Page token module
//!
//! Turns the raw external `page` parameter into a typed addressing intent.
//!
//! # Grammar
//!
//! ```text
//! ""            -> Numbered(1)
//! <digits>      -> Numbered(n)
//! a<digits>     -> CursorAfter(anchor)
//! b<digits>     -> CursorBefore(anchor), "b0" meaning "from the newest item"
//! ```

mod parser;
mod types;

pub use parser::parse;
pub use types::{PageParam, PageToken};
