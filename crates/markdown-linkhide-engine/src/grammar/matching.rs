use std::sync::LazyLock;

use regex::Regex;

use super::{
    cursor::Cursor,
    kinds::{EMBED, WikiLink},
};

static MARKDOWN_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?\[)([^\]]*)\]\(([^)]+)\)").expect("markdown link regex")
});

/// One `[text](dest)` occurrence. All offsets are line-local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownMatch {
    /// Start of the link, including a `!` prefix.
    pub start: usize,
    /// End of the opening `[` / `![`.
    pub open_end: usize,
    /// Start of `](`; also the end of the text.
    pub close_start: usize,
    pub end: usize,
    pub text: String,
    pub destination: String,
    pub embed: bool,
}

/// One `[[...]]` occurrence. All offsets are line-local.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiMatch {
    /// Start of the link, including a `!` prefix.
    pub start: usize,
    /// End of `[[`; the inner content starts here.
    pub open_end: usize,
    /// Position of the last `|` inside the brackets, if any.
    pub alias: Option<usize>,
    /// Start of `]]`; the inner content ends here.
    pub close_start: usize,
    pub end: usize,
    pub embed: bool,
}

impl WikiMatch {
    pub fn inner<'a>(&self, line: &'a str) -> &'a str {
        &line[self.open_end..self.close_start]
    }

    /// `[[]]` and `[[  ]]` stay visible so the host's link autocomplete can engage.
    pub fn is_blank(&self, line: &str) -> bool {
        self.inner(line).trim().is_empty()
    }

    pub fn destination<'a>(&self, line: &'a str) -> &'a str {
        &line[self.open_end..self.alias.unwrap_or(self.close_start)]
    }

    /// The alias if present, otherwise the destination.
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        match self.alias {
            Some(bar) => &line[bar + 1..self.close_start],
            None => self.destination(line),
        }
    }
}

/// All Markdown links on `line`, leftmost-first and non-overlapping.
pub fn markdown_links(line: &str) -> Vec<MarkdownMatch> {
    MARKDOWN_LINK
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let open = caps.get(1)?;
            let text = caps.get(2)?;
            let destination = caps.get(3)?;
            Some(MarkdownMatch {
                start: whole.start(),
                open_end: open.end(),
                close_start: text.end(),
                end: whole.end(),
                text: text.as_str().to_string(),
                destination: destination.as_str().to_string(),
                embed: open.as_str().as_bytes().first() == Some(&EMBED),
            })
        })
        .collect()
}

/// All closed wiki links on `line`, including blank ones.
pub fn wiki_links(line: &str) -> Vec<WikiMatch> {
    let mut cur = Cursor::new(line);
    let mut out = vec![];
    while !cur.eof() {
        if let Some(m) = try_wiki_link(&mut cur) {
            out.push(m);
            continue;
        }
        cur.bump();
    }
    out
}

/// Attempts to match a wiki link at the cursor. On failure the cursor is restored.
///
/// A second `[[` before the closing `]]` abandons this opener so the inner one
/// can match on a later attempt.
fn try_wiki_link(cur: &mut Cursor<'_>) -> Option<WikiMatch> {
    if !cur.starts_with(WikiLink::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let embed = cur.prev() == Some(EMBED);
    let open_start = cur.pos();
    cur.bump_n(WikiLink::OPEN.len());
    let open_end = cur.pos();

    let mut alias = None;
    while !cur.eof() && !cur.starts_with(WikiLink::CLOSE) {
        if cur.starts_with(WikiLink::OPEN) {
            *cur = saved;
            return None;
        }
        if cur.peek() == Some(WikiLink::ALIAS) {
            alias = Some(cur.pos());
        }
        cur.bump();
    }

    if !cur.starts_with(WikiLink::CLOSE) {
        *cur = saved;
        return None;
    }
    let close_start = cur.pos();
    cur.bump_n(WikiLink::CLOSE.len());

    Some(WikiMatch {
        start: if embed { open_start - 1 } else { open_start },
        open_end,
        alias,
        close_start,
        end: cur.pos(),
        embed,
    })
}
