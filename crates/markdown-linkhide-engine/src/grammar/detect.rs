use serde::{Deserialize, Serialize};

use super::{
    link::{DisplayedTextRange, LinkInfo},
    matching::{markdown_links, wiki_links},
};

/// A link found under the caret. Offsets are line-local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAtCursor {
    pub info: LinkInfo,
    /// Start of the link, including any `!` prefix.
    pub start: usize,
    pub end: usize,
    /// True when `offset` sits at or left of the link's midpoint.
    pub entered_from_left: bool,
    /// Where the displayed text sits, as written on the line.
    pub displayed: DisplayedTextRange,
}

impl LinkAtCursor {
    fn new(info: LinkInfo, span: (usize, usize), text: (usize, usize), offset: usize) -> Self {
        let (start, end) = span;
        Self {
            info,
            start,
            end,
            entered_from_left: (offset - start) * 2 <= end - start,
            displayed: DisplayedTextRange {
                link_start: start,
                link_end: end,
                displayed_text_start: text.0,
                displayed_text_end: text.1,
            },
        }
    }
}

/// Finds the link containing `offset` on `line`. Markdown links win over wiki links.
///
/// A caret at either edge of a link counts as on it.
pub fn detect_link_at_cursor(line: &str, offset: usize) -> Option<LinkAtCursor> {
    let on = |start: usize, end: usize| start <= offset && offset <= end;

    if let Some(m) = markdown_links(line).into_iter().find(|m| on(m.start, m.end)) {
        let info = LinkInfo {
            text: m.text,
            destination: m.destination,
            is_wiki: false,
            is_embed: m.embed,
        };
        return Some(LinkAtCursor::new(
            info,
            (m.start, m.end),
            (m.open_end, m.close_start),
            offset,
        ));
    }

    wiki_links(line)
        .into_iter()
        .find(|m| on(m.start, m.end))
        .map(|m| {
            let info = LinkInfo {
                text: m.text(line).to_string(),
                destination: m.destination(line).to_string(),
                is_wiki: true,
                is_embed: m.embed,
            };
            let text_start = m.alias.map_or(m.open_end, |bar| bar + 1);
            LinkAtCursor::new(info, (m.start, m.end), (text_start, m.close_start), offset)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn detects_wiki_link_with_alias() {
        let found = detect_link_at_cursor("See [[Note|n]] here", 8).unwrap();
        assert_eq!(found.info, LinkInfo::wiki("Note", "n"));
        assert_eq!((found.start, found.end), (4, 14));
        assert!(found.entered_from_left);
        assert_eq!(
            (found.displayed.displayed_text_start, found.displayed.displayed_text_end),
            (11, 12)
        );
    }

    #[test]
    fn detects_embedded_markdown_link() {
        let found = detect_link_at_cursor("![alt](a.png)", 10).unwrap();
        assert_eq!(found.info, LinkInfo::markdown("alt", "a.png").embedded());
        assert_eq!((found.start, found.end), (0, 13));
        assert!(!found.entered_from_left);
        assert_eq!(
            (found.displayed.displayed_text_start, found.displayed.displayed_text_end),
            (2, 5)
        );
    }

    #[test]
    fn displayed_range_follows_what_is_written() {
        // An alias equal to the destination is still written out here.
        let found = detect_link_at_cursor("[[x|x]]", 1).unwrap();
        assert_eq!(found.info, LinkInfo::wiki("x", "x"));
        assert_eq!(
            (found.displayed.displayed_text_start, found.displayed.displayed_text_end),
            (4, 5)
        );
    }

    #[rstest]
    #[case(4, true)]
    #[case(8, true)]
    #[case(9, false)]
    #[case(12, false)]
    fn midpoint_counts_as_left(#[case] offset: usize, #[case] left: bool) {
        // "See [[Note]]" spans 4..12, midpoint 8
        let found = detect_link_at_cursor("See [[Note]]", offset).unwrap();
        assert_eq!(found.entered_from_left, left);
    }

    #[test]
    fn markdown_is_tried_before_wiki() {
        let line = "[[w]] [m](d)";
        assert!(detect_link_at_cursor(line, 2).unwrap().info.is_wiki);
        assert!(!detect_link_at_cursor(line, 8).unwrap().info.is_wiki);
    }

    #[test]
    fn nothing_outside_links() {
        assert_eq!(detect_link_at_cursor("See [[Note]] here", 14), None);
        assert_eq!(detect_link_at_cursor("plain", 2), None);
    }
}
