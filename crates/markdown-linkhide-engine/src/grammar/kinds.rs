//! Delimiters for the byte-level wiki link scanner. The Markdown form is
//! matched by regex in [`matching`](super::matching).

/// Wiki link: `[[destination]]` or `[[destination|text]]`.
pub struct WikiLink;

impl WikiLink {
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const ALIAS: u8 = b'|';
}

/// Prefix turning either link form into an embed.
pub const EMBED: u8 = b'!';
