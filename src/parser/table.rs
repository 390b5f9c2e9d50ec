use super::inline;
use super::patterns::is_table_separator;
use crate::config::Extensions;
use crate::token::{BlockToken, InlineToken};

/// Whether `lines[i]` opens a table: it contains a pipe and the next line is
/// either a separator or another piped line.
pub fn starts_table(lines: &[String], i: usize) -> bool {
    lines[i].contains('|')
        && lines
            .get(i + 1)
            .is_some_and(|next| next.contains('|') && !next.trim().is_empty())
}

/// Parse a table starting at `start`. The caller has checked [`starts_table`].
pub fn parse_table(lines: &[String], start: usize, extensions: &Extensions) -> (BlockToken, usize) {
    let (header, mut i) = if lines.get(start + 1).is_some_and(|l| is_table_separator(l)) {
        (lex_row(&lines[start], extensions), start + 2)
    } else {
        log::debug!("headerless table at line {start}");
        (Vec::new(), start)
    };

    let mut rows = Vec::new();
    while i < lines.len() {
        let line = &lines[i];
        if line.trim().is_empty() || !line.contains('|') {
            break;
        }
        rows.push(lex_row(line, extensions));
        i += 1;
    }

    (BlockToken::Table { header, rows }, i)
}

fn lex_row(line: &str, extensions: &Extensions) -> Vec<Vec<InlineToken>> {
    split_cells(line)
        .into_iter()
        .map(|cell| inline::lex(cell, extensions))
        .collect()
}

/// Split a row on unescaped `|`, dropping the empty cells made by outer
/// pipes. An escaped `\|` stays in its cell for the inline lexer to unescape.
fn split_cells(line: &str) -> Vec<&str> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);

    let mut cells = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '|' => {
                cells.push(line[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    // nothing after a closing pipe
    if start < line.len() || cells.is_empty() {
        cells.push(line[start..].trim());
    }
    cells
}
