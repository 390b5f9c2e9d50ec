//! Line-level patterns shared by the block matchers.
//!
//! All patterns are applied to a single line; none of them keep any search
//! state between calls.

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening fence: three backticks and an optional language tag.
pub(super) static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^```[ \t]*([^`\s]*)[ \t]*$").unwrap());

pub(super) static HORIZONTAL_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\*{3,}|-{3,}|_{3,})$").unwrap());

pub(super) static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})[ \t]+(.*)$").unwrap());

/// `- [ ] text`, `* [x] text`, `1. [X] text`
pub(super) static UNORDERED_TASK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)[-*+][ \t]+\[([ xX])\](?:[ \t]+(.*))?$").unwrap());

pub(super) static ORDERED_TASK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)\d+\.[ \t]+\[([ xX])\](?:[ \t]+(.*))?$").unwrap());

pub(super) static UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)[-*+][ \t]+(.*)$").unwrap());

pub(super) static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([ \t]*)\d+\.[ \t]+(.*)$").unwrap());

/// `|---|:--:|`, `--- | ---`, `:---`
pub(super) static TABLE_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\|?[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)*\|?$").unwrap()
});

/// Which flavour of list a line opens, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ListKind {
    Unordered,
    Ordered,
}

pub(super) fn list_kind(line: &str) -> Option<ListKind> {
    if UNORDERED_ITEM.is_match(line) {
        Some(ListKind::Unordered)
    } else if ORDERED_ITEM.is_match(line) {
        Some(ListKind::Ordered)
    } else {
        None
    }
}

pub(super) fn is_table_separator(line: &str) -> bool {
    let line = line.trim();
    line.contains('|') && TABLE_SEPARATOR.is_match(line)
}

/// Width of the leading whitespace, counting a tab as four columns.
pub(super) fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}
