//! Cross-checks against pulldown-cmark on inputs where both grammars agree.

use mdtok::{BlockToken, InlineToken, ListItem, tokenize};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use rstest::rstest;

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn cmark_heading_level(markdown: &str) -> Option<u8> {
    Parser::new(markdown).find_map(|event| match event {
        Event::Start(Tag::Heading { level, .. }) => Some(heading_level_to_u8(level)),
        _ => None,
    })
}

#[rstest]
#[case("# one")]
#[case("## two")]
#[case("### three ###")]
#[case("#### four")]
#[case("##### five")]
#[case("###### six")]
#[case("####### seven")]
#[case("#nospace")]
fn heading_levels_agree(#[case] markdown: &str) {
    let ours = match tokenize(markdown).as_slice() {
        [BlockToken::Heading { level, .. }] => Some(*level),
        _ => None,
    };
    assert_eq!(ours, cmark_heading_level(markdown), "{markdown:?}");
}

#[test]
fn closing_hashes_agree() {
    let markdown = "## Title ##";
    let theirs: String = Parser::new(markdown)
        .filter_map(|event| match event {
            Event::Text(text) => Some(text.into_string()),
            _ => None,
        })
        .collect();
    let blocks = tokenize(markdown);
    let [BlockToken::Heading { content, .. }] = blocks.as_slice() else {
        panic!("expected heading");
    };
    let ours: String = content.iter().map(InlineToken::plain_text).collect();
    assert_eq!(ours, theirs);
}

#[rstest]
#[case("```rust\nfn main() {}\nlet x = 1;\n```")]
#[case("```\n  indented\n\n*not emphasis*\n```")]
#[case("```toml\n[a]\nb = 1\n```\nafter")]
fn fenced_code_agrees(#[case] markdown: &str) {
    let mut language = None;
    let mut content = String::new();
    let mut in_code = false;
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang))) => {
                language = Some(lang.into_string());
                in_code = true;
            }
            Event::End(TagEnd::CodeBlock) => in_code = false,
            Event::Text(text) if in_code => content.push_str(&text),
            _ => {}
        }
    }

    let blocks = tokenize(markdown);
    let Some(BlockToken::CodeBlock {
        language: ours_lang,
        content: ours,
    }) = blocks.first()
    else {
        panic!("expected code block, got {blocks:?}");
    };
    assert_eq!(Some(ours_lang.clone()), language);
    assert_eq!(ours.as_str(), content.trim_end_matches('\n'));
}

/// `depth:text` per item, in document order.
fn cmark_outline(markdown: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::List(_)) => depth += 1,
            Event::End(TagEnd::List(_)) => depth -= 1,
            Event::Text(text) => out.push(format!("{}:{}", depth - 1, text)),
            _ => {}
        }
    }
    out
}

fn our_outline(items: &[ListItem]) -> Vec<String> {
    let mut out = Vec::new();
    let mut pending: Vec<(usize, &ListItem)> = items.iter().rev().map(|i| (0, i)).collect();
    while let Some((depth, item)) = pending.pop() {
        let text: String = item.content.iter().map(InlineToken::plain_text).collect();
        out.push(format!("{depth}:{text}"));
        pending.extend(item.items.iter().rev().map(|i| (depth + 1, i)));
    }
    out
}

#[rstest]
#[case("- a\n- b\n- c", false)]
#[case("- a\n  - b\n  - c\n- d", false)]
#[case("- a\n  - b\n    - c\n- d", false)]
#[case("1. a\n2. b", true)]
#[case("1. a\n   1. b\n   2. c\n2. d", true)]
fn list_shape_agrees(#[case] markdown: &str, #[case] ordered: bool) {
    let blocks = tokenize(markdown);
    let [BlockToken::List(list)] = blocks.as_slice() else {
        panic!("expected one list, got {blocks:?}");
    };
    assert_eq!(list.ordered, ordered);
    assert_eq!(our_outline(&list.items), cmark_outline(markdown));
}

#[test]
fn task_markers_agree() {
    let markdown = "- [ ] todo\n- [x] done";
    let theirs: Vec<bool> = Parser::new_ext(markdown, Options::ENABLE_TASKLISTS)
        .filter_map(|event| match event {
            Event::TaskListMarker(checked) => Some(checked),
            _ => None,
        })
        .collect();

    let blocks = tokenize(markdown);
    let [BlockToken::List(list)] = blocks.as_slice() else {
        panic!("expected one list");
    };
    let ours: Vec<bool> = list.items.iter().filter_map(|i| i.checked).collect();
    assert_eq!(ours, theirs);
}

#[rstest]
#[case("| A | B | C |\n|---|---|---|\n| 1 | 2 | 3 |")]
#[case("A | B\n:-- | --:\n1 | 2\n3 | 4")]
fn table_shape_agrees(#[case] markdown: &str) {
    let mut head_cells = 0;
    let mut rows = 0;
    let mut in_head = false;
    for event in Parser::new_ext(markdown, Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::TableHead) => in_head = true,
            Event::End(TagEnd::TableHead) => in_head = false,
            Event::Start(Tag::TableCell) if in_head => head_cells += 1,
            Event::Start(Tag::TableRow) if !in_head => rows += 1,
            _ => {}
        }
    }

    let blocks = tokenize(markdown);
    let [BlockToken::Table { header, rows: ours }] = blocks.as_slice() else {
        panic!("expected one table, got {blocks:?}");
    };
    assert_eq!(header.len(), head_cells);
    assert_eq!(ours.len(), rows);
}

fn cmark_inline(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Strong) => out.push_str("bold("),
            Event::Start(Tag::Emphasis) => out.push_str("italic("),
            Event::Start(Tag::Link { dest_url, .. }) => out.push_str(&format!("link[{dest_url}](")),
            Event::End(TagEnd::Strong | TagEnd::Emphasis | TagEnd::Link) => out.push(')'),
            Event::Text(text) => out.push_str(&text),
            Event::Code(code) => out.push_str(&format!("code({code})")),
            _ => {}
        }
    }
    out
}

fn our_inline(tokens: &[InlineToken]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            InlineToken::Text { content } => out.push_str(content),
            InlineToken::Bold { content } => out.push_str(&format!("bold({})", our_inline(content))),
            InlineToken::Italic { content } => {
                out.push_str(&format!("italic({})", our_inline(content)))
            }
            InlineToken::Link { content, href } => {
                out.push_str(&format!("link[{href}]({})", our_inline(content)))
            }
            InlineToken::Code { content } => out.push_str(&format!("code({content})")),
            other => panic!("unexpected token {other:?}"),
        }
    }
    out
}

#[rstest]
#[case("plain words")]
#[case("**a *b* c**")]
#[case("*x* and `y`")]
#[case("see [the docs](https://example.com) now")]
#[case("[**bold** link](u)")]
#[case("a * b")]
#[case("\\*not italic\\*")]
#[case("`a*b*c`")]
fn inline_spans_agree(#[case] markdown: &str) {
    let blocks = tokenize(markdown);
    let [BlockToken::Paragraph { content }] = blocks.as_slice() else {
        panic!("expected one paragraph, got {blocks:?}");
    };
    assert_eq!(our_inline(content), cmark_inline(markdown));
}
