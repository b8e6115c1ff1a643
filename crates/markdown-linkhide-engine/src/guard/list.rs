use std::sync::LazyLock;

use regex::Regex;

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t]*)(?:([-*+])|(\d+)([.)]))([ \t]+)(\[[ xX]\](?:[ \t]+|$))?")
        .expect("list item regex")
});

/// The prefix a new line should start with to continue the list item on `line`.
///
/// Bullets are repeated, numbers advance by one, checkboxes come back
/// unchecked and indentation is kept. Lines that are not list items
/// continue with nothing.
pub fn list_continuation(line: &str) -> String {
    let Some(caps) = LIST_ITEM.captures(line) else {
        return String::new();
    };

    let indent = caps.get(1).map_or("", |m| m.as_str());
    let gap = caps.get(5).map_or(" ", |m| m.as_str());
    let marker = match (caps.get(2), caps.get(3), caps.get(4)) {
        (Some(bullet), _, _) => bullet.as_str().to_string(),
        (None, Some(number), Some(delim)) => {
            let next = number
                .as_str()
                .parse::<u64>()
                .ok()
                .and_then(|n| n.checked_add(1))
                .map_or_else(|| number.as_str().to_string(), |n| n.to_string());
            format!("{next}{}", delim.as_str())
        }
        _ => return String::new(),
    };
    let checkbox = if caps.get(6).is_some() { "[ ] " } else { "" };

    format!("{indent}{marker}{gap}{checkbox}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("- item [[a]]", "- ")]
    #[case("* item", "* ")]
    #[case("+ item", "+ ")]
    #[case("  - nested", "  - ")]
    #[case("\t- tabbed", "\t- ")]
    #[case("1. first", "2. ")]
    #[case("9) ninth", "10) ")]
    #[case("- [ ] todo [[a]]", "- [ ] ")]
    #[case("- [x] done", "- [ ] ")]
    #[case("    3. [X] deep", "    4. [ ] ")]
    #[case("-   wide gap", "-   ")]
    fn continues_list_items(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(list_continuation(line), expected);
    }

    #[rstest]
    #[case("plain [[a]]")]
    #[case("-no space")]
    #[case("1.no space")]
    #[case("")]
    #[case("# heading")]
    fn other_lines_continue_with_nothing(#[case] line: &str) {
        assert_eq!(list_continuation(line), "");
    }
}
