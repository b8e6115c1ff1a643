use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::matching::wiki_links;

static MARKDOWN_LINK_EXACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(!?)\[([^\]]*)\]\(([^)]+)\)$").expect("exact markdown link regex")
});

/// The logical content of one link, independent of its on-screen syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    pub text: String,
    pub destination: String,
    pub is_wiki: bool,
    pub is_embed: bool,
}

impl LinkInfo {
    pub fn wiki(destination: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            destination: destination.into(),
            is_wiki: true,
            is_embed: false,
        }
    }

    pub fn markdown(text: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            destination: destination.into(),
            is_wiki: false,
            is_embed: false,
        }
    }

    pub fn embedded(mut self) -> Self {
        self.is_embed = true;
        self
    }

    /// Wiki links only write an alias when it differs from the destination.
    fn shows_alias(&self) -> bool {
        self.is_wiki && !self.text.is_empty() && self.text != self.destination
    }
}

/// The part of a link that stays on screen when its syntax is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayedTextRange {
    pub link_start: usize,
    pub link_end: usize,
    pub displayed_text_start: usize,
    pub displayed_text_end: usize,
}

/// Writes `info` out as link syntax.
///
/// ```
/// use markdown_linkhide_engine::grammar::{LinkInfo, build_link_text};
///
/// assert_eq!(build_link_text(&LinkInfo::wiki("x", "x")), "[[x]]");
/// assert_eq!(build_link_text(&LinkInfo::wiki("x", "y").embedded()), "![[x|y]]");
/// assert_eq!(build_link_text(&LinkInfo::markdown("a", "b.md")), "[a](b.md)");
/// ```
pub fn build_link_text(info: &LinkInfo) -> String {
    let bang = if info.is_embed { "!" } else { "" };
    if !info.is_wiki {
        return format!("{bang}[{}]({})", info.text, info.destination);
    }
    if info.shows_alias() {
        format!("{bang}[[{}|{}]]", info.destination, info.text)
    } else {
        format!("{bang}[[{}]]", info.destination)
    }
}

/// Locates the displayed text of the link `build_link_text(info)` written at `link_start`.
pub fn compute_displayed_text_range(info: &LinkInfo, link_start: usize) -> DisplayedTextRange {
    let link_end = link_start + build_link_text(info).len();
    let bang = usize::from(info.is_embed);

    let (displayed_text_start, displayed_text_end) = if !info.is_wiki {
        let start = link_start + bang + 1;
        (start, start + info.text.len())
    } else if info.shows_alias() {
        let end = link_end - 2;
        (end - info.text.len(), end)
    } else {
        let start = link_start + bang + 2;
        (start, start + info.destination.len())
    };

    DisplayedTextRange {
        link_start,
        link_end,
        displayed_text_start,
        displayed_text_end,
    }
}

/// Parses `s` as exactly one wiki link, start to end.
pub fn parse_wiki_link(s: &str) -> Option<LinkInfo> {
    let links = wiki_links(s);
    let [m] = links.as_slice() else {
        return None;
    };
    if m.start != 0 || m.end != s.len() || m.is_blank(s) {
        return None;
    }
    Some(LinkInfo {
        text: m.text(s).to_string(),
        destination: m.destination(s).to_string(),
        is_wiki: true,
        is_embed: m.embed,
    })
}

/// Parses `s` as exactly one Markdown link, start to end.
pub fn parse_markdown_link(s: &str) -> Option<LinkInfo> {
    let caps = MARKDOWN_LINK_EXACT.captures(s)?;
    Some(LinkInfo {
        text: caps.get(2)?.as_str().to_string(),
        destination: caps.get(3)?.as_str().to_string(),
        is_wiki: false,
        is_embed: !caps.get(1)?.as_str().is_empty(),
    })
}

/// Decides whether pasted text is itself a link. Surrounding whitespace is ignored.
pub fn parse_clipboard_link(s: &str) -> Option<LinkInfo> {
    let s = s.trim();
    parse_wiki_link(s).or_else(|| parse_markdown_link(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn wiki_alias_omitted_when_text_matches_destination() {
        assert_eq!(build_link_text(&LinkInfo::wiki("x", "x")), "[[x]]");
        assert_eq!(build_link_text(&LinkInfo::wiki("x", "")), "[[x]]");
    }

    #[test]
    fn embed_wiki_with_alias() {
        assert_eq!(
            build_link_text(&LinkInfo::wiki("x", "y").embedded()),
            "![[x|y]]"
        );
    }

    #[test]
    fn markdown_keeps_text_even_when_equal_to_destination() {
        assert_eq!(build_link_text(&LinkInfo::markdown("x", "x")), "[x](x)");
        assert_eq!(
            build_link_text(&LinkInfo::markdown("", "a.png").embedded()),
            "![](a.png)"
        );
    }

    #[rstest]
    #[case(LinkInfo::wiki("Note", "Note"))]
    #[case(LinkInfo::wiki("Note#Heading", "shown"))]
    #[case(LinkInfo::wiki("pic.png", "pic.png").embedded())]
    #[case(LinkInfo::wiki("pic.png", "caption").embedded())]
    #[case(LinkInfo::markdown("docs", "https://example.com/a"))]
    #[case(LinkInfo::markdown("alt text", "img.png").embedded())]
    fn build_then_parse_round_trips(#[case] info: LinkInfo) {
        let built = build_link_text(&info);
        assert_eq!(parse_clipboard_link(&built), Some(info));
    }

    #[rstest]
    #[case("[[a]] tail")]
    #[case("lead [[a]]")]
    #[case("[[a]][[b]]")]
    #[case("[[]]")]
    #[case("[[ ]]")]
    #[case("[[open")]
    fn wiki_parser_is_strict(#[case] s: &str) {
        assert_eq!(parse_wiki_link(s), None);
    }

    #[rstest]
    #[case("[a](b) tail")]
    #[case("[a]()")]
    #[case("[a](b)(c)")]
    #[case("plain text")]
    fn markdown_parser_is_strict(#[case] s: &str) {
        assert_eq!(parse_markdown_link(s), None);
    }

    #[test]
    fn clipboard_trims_whitespace() {
        assert_eq!(
            parse_clipboard_link("  [[Note|n]]\n"),
            Some(LinkInfo::wiki("Note", "n"))
        );
    }

    #[test]
    fn displayed_text_of_aliased_wiki_link() {
        // "ab [[dest|shown]]"
        let info = LinkInfo::wiki("dest", "shown");
        let r = compute_displayed_text_range(&info, 3);
        assert_eq!(
            r,
            DisplayedTextRange {
                link_start: 3,
                link_end: 17,
                displayed_text_start: 10,
                displayed_text_end: 15,
            }
        );
    }

    #[test]
    fn displayed_text_of_plain_wiki_and_markdown_links() {
        let r = compute_displayed_text_range(&LinkInfo::wiki("Note", "Note").embedded(), 0);
        assert_eq!((r.displayed_text_start, r.displayed_text_end, r.link_end), (3, 7, 9));

        let r = compute_displayed_text_range(&LinkInfo::markdown("text", "url"), 2);
        assert_eq!((r.displayed_text_start, r.displayed_text_end, r.link_end), (3, 7, 13));
    }
}
