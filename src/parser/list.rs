use super::inline;
use super::patterns::{ORDERED_ITEM, ORDERED_TASK, UNORDERED_ITEM, UNORDERED_TASK, indent_width};
use crate::config::Extensions;
use crate::token::ListItem;

/// Collect consecutive item lines starting at `start` into a list tree.
///
/// Returns the top-level items and the index of the first line not consumed.
/// Nesting comes from indentation alone: an explicit stack holds the open
/// items together with their indent, and every item that is not indented
/// deeper than the current line is closed before the line is pushed.
pub fn build_list(
    lines: &[String],
    start: usize,
    ordered: bool,
    extensions: &Extensions,
) -> (Vec<ListItem>, usize) {
    let mut roots = Vec::new();
    let mut open: Vec<(usize, ListItem)> = Vec::new();
    let mut i = start;

    while i < lines.len() {
        let line = &lines[i];
        if line.trim().is_empty() {
            break;
        }
        let Some((indent, item)) = parse_item(line, ordered, extensions) else {
            break;
        };

        while open.last().is_some_and(|(top, _)| *top >= indent) {
            if let Some((_, done)) = open.pop() {
                attach(&mut open, &mut roots, done);
            }
        }
        open.push((indent, item));
        i += 1;
    }

    while let Some((_, done)) = open.pop() {
        attach(&mut open, &mut roots, done);
    }

    (roots, i)
}

fn attach(open: &mut [(usize, ListItem)], roots: &mut Vec<ListItem>, item: ListItem) {
    match open.last_mut() {
        Some((_, parent)) => parent.items.push(item),
        None => roots.push(item),
    }
}

fn parse_item(line: &str, ordered: bool, extensions: &Extensions) -> Option<(usize, ListItem)> {
    if extensions.task_lists {
        let task = if ordered { &ORDERED_TASK } else { &UNORDERED_TASK };
        if let Some(caps) = task.captures(line) {
            let indent = indent_width(&caps[1]);
            let checked = &caps[2] != " ";
            let text = caps.get(3).map_or("", |m| m.as_str()).trim();
            return Some((indent, ListItem::new(inline::lex(text, extensions), Some(checked))));
        }
    }

    let item = if ordered { &ORDERED_ITEM } else { &UNORDERED_ITEM };
    let caps = item.captures(line)?;
    let indent = indent_width(&caps[1]);
    let text = caps[2].trim();
    Some((indent, ListItem::new(inline::lex(text, extensions), None)))
}
