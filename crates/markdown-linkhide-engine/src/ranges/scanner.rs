use crate::grammar::matching::{markdown_links, wiki_links};

use super::{HiddenRange, sort_ranges};

/// Syntax ranges of every `[text](dest)` on `line`, offset by `line_offset`.
///
/// Empty text still yields both ranges.
pub fn find_markdown_link_syntax_ranges(line: &str, line_offset: usize) -> Vec<HiddenRange> {
    markdown_links(line)
        .into_iter()
        .flat_map(|m| {
            [
                HiddenRange::leading(line_offset + m.start, line_offset + m.open_end),
                HiddenRange::trailing(line_offset + m.close_start, line_offset + m.end),
            ]
        })
        .collect()
}

/// Syntax ranges of every non-blank `[[...]]` on `line`, offset by `line_offset`.
///
/// For aliased links the leading range runs through the last `|`.
pub fn find_wiki_link_syntax_ranges(line: &str, line_offset: usize) -> Vec<HiddenRange> {
    wiki_links(line)
        .into_iter()
        .filter(|m| !m.is_blank(line))
        .flat_map(|m| {
            let lead_end = m.alias.map_or(m.open_end, |bar| bar + 1);
            [
                HiddenRange::leading(line_offset + m.start, line_offset + lead_end),
                HiddenRange::trailing(line_offset + m.close_start, line_offset + m.end),
            ]
        })
        .collect()
}

/// Both scanners over one line, sorted.
pub fn scan_line(line: &str, line_offset: usize) -> Vec<HiddenRange> {
    let mut out = find_markdown_link_syntax_ranges(line, line_offset);
    out.extend(find_wiki_link_syntax_ranges(line, line_offset));
    sort_ranges(&mut out);
    out
}
