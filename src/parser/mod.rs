//! Block segmentation.
//!
//! The document is split into lines and scanned top to bottom. Each position
//! is tried against the block matchers in a fixed order (fence, rule, quote,
//! list, heading, table, paragraph) and the winning matcher reports how many
//! lines it consumed.
//!
//! Blockquotes re-enter the same loop on their dequoted lines. Instead of
//! recursing, the segmenter keeps a stack of [`Frame`]s, one per open quote;
//! a finished frame becomes a [`BlockToken::Blockquote`] in the frame below.

mod escape;
pub(crate) mod inline;
mod list;
mod patterns;
mod quote;
mod table;

use crate::config::{Config, Extensions};
use crate::token::{BlockToken, List};
use patterns::{FENCE_OPEN, HEADING, HORIZONTAL_RULE, ListKind, list_kind};

/// Strip YAML frontmatter from the beginning of markdown content
fn strip_frontmatter(markdown: &str) -> &str {
    if !markdown.starts_with("---") {
        return markdown;
    }
    // Find the closing ---
    if let Some(end) = markdown[3..].find("\n---") {
        // Skip past the closing --- and the rest of its line
        let after_frontmatter = &markdown[3 + end + 4..];
        match after_frontmatter.find('\n') {
            Some(newline) => &after_frontmatter[newline + 1..],
            None => "",
        }
    } else {
        markdown
    }
}

fn split_lines(input: &str) -> Vec<String> {
    input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect()
}

/// Parse markdown text into a list of block tokens
pub fn parse(markdown: &str, config: &Config) -> Vec<BlockToken> {
    let markdown = if config.strip_frontmatter {
        strip_frontmatter(markdown)
    } else {
        markdown
    };
    let lines = split_lines(markdown);
    log::trace!("tokenizing {} lines", lines.len());

    let mut stack = vec![Frame::new(lines)];

    while let Some(frame) = stack.last_mut() {
        if frame.cursor >= frame.lines.len() {
            let Some(done) = stack.pop() else { break };
            match stack.last_mut() {
                Some(parent) => parent.blocks.push(BlockToken::Blockquote {
                    content: done.blocks,
                }),
                None => return done.blocks,
            }
            continue;
        }

        let (next, end) = next_block(&frame.lines, frame.cursor, &config.extensions);
        frame.cursor = end.max(frame.cursor + 1);

        match next {
            Next::Blank => {}
            Next::Block(block) => frame.blocks.push(block),
            Next::Quote(inner) => {
                if frame.cursor >= frame.lines.len() {
                    // nothing left to scan here; free it before descending
                    frame.lines = Vec::new();
                }
                log::debug!("entering blockquote at depth {}", stack.len());
                stack.push(Frame::new(inner));
            }
        }
    }

    Vec::new()
}

/// One level of block parsing: the document itself or the inside of a quote.
struct Frame {
    lines: Vec<String>,
    cursor: usize,
    blocks: Vec<BlockToken>,
}

impl Frame {
    fn new(lines: Vec<String>) -> Self {
        Self {
            lines,
            cursor: 0,
            blocks: Vec::new(),
        }
    }
}

enum Next {
    Blank,
    Block(BlockToken),
    /// Dequoted lines still to be parsed as blocks.
    Quote(Vec<String>),
}

fn next_block(lines: &[String], i: usize, extensions: &Extensions) -> (Next, usize) {
    let line = &lines[i];
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return (Next::Blank, i + 1);
    }

    if let Some(caps) = FENCE_OPEN.captures(trimmed) {
        let (block, end) = code_block(lines, i, &caps[1]);
        return (Next::Block(block), end);
    }

    if HORIZONTAL_RULE.is_match(trimmed) {
        return (Next::Block(BlockToken::HorizontalRule), i + 1);
    }

    if trimmed.starts_with('>') {
        let (inner, end) = quote::quoted_run(lines, i);
        return (Next::Quote(inner), end);
    }

    if let Some(kind) = list_kind(line) {
        let ordered = kind == ListKind::Ordered;
        let (items, end) = list::build_list(lines, i, ordered, extensions);
        return (Next::Block(BlockToken::List(List { ordered, items })), end);
    }

    if let Some(caps) = HEADING.captures(trimmed) {
        let level = caps[1].len() as u8;
        let text = strip_closing_hashes(caps[2].trim());
        let content = inline::lex(text, extensions);
        return (Next::Block(BlockToken::Heading { level, content }), i + 1);
    }

    if extensions.tables && table::starts_table(lines, i) {
        let (block, end) = table::parse_table(lines, i, extensions);
        return (Next::Block(block), end);
    }

    let content = inline::lex(trimmed, extensions);
    (Next::Block(BlockToken::Paragraph { content }), i + 1)
}

/// Consume a fenced code block. An unterminated fence runs to end of input.
fn code_block(lines: &[String], start: usize, language: &str) -> (BlockToken, usize) {
    let mut body: Vec<&str> = Vec::new();

    for (i, line) in lines.iter().enumerate().skip(start + 1) {
        if line.trim_start().starts_with("```") {
            let block = BlockToken::CodeBlock {
                language: language.to_string(),
                content: body.join("\n"),
            };
            return (block, i + 1);
        }
        body.push(line.as_str());
    }

    log::debug!("unterminated code fence at line {start}, consuming to end of input");
    let block = BlockToken::CodeBlock {
        language: language.to_string(),
        content: body.join("\n"),
    };
    (block, lines.len())
}

/// `## Title ##` -> `Title`. The closing run only counts after whitespace.
fn strip_closing_hashes(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.len() == text.len() {
        text
    } else if without.is_empty() {
        without
    } else if without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        text
    }
}
