//! # Link Grammar
//!
//! Pure functions over single lines of text: locating Markdown
//! (`[text](dest)`) and wiki (`[[dest|text]]`) links, with the optional `!`
//! embed prefix, parsing them into [`LinkInfo`] and writing them back out.
//!
//! ## Modules
//!
//! - **`kinds`**: wiki delimiters and the embed prefix
//! - **`cursor`**: byte cursor used by the wiki scanner
//! - **`matching`**: raw link matches with line-local offsets
//! - **`link`**: `LinkInfo`, strict parsers, `build_link_text`, displayed-text geometry
//! - **`detect`**: `detect_link_at_cursor`
//!
//! Unterminated or malformed syntax never errors; it simply produces no match.

pub mod cursor;
pub mod detect;
pub mod kinds;
pub mod link;
pub mod matching;

pub use detect::{LinkAtCursor, detect_link_at_cursor};
pub use link::{
    DisplayedTextRange, LinkInfo, build_link_text, compute_displayed_text_range,
    parse_clipboard_link, parse_markdown_link, parse_wiki_link,
};
