//! Inline lexing.
//!
//! Spans nest (bold around italic around a link), but the lexer never
//! recurses. It keeps an explicit stack of [`Frame`]s instead: when a styled
//! span is found, the current frame's cursor moves past the span (its
//! continuation) and a child frame is pushed for the inner text. A frame whose
//! cursor reaches its end is popped, wrapped into its token and appended to
//! the frame below it. Stack discipline alone keeps the output in document
//! order.
//!
//! Every pattern's result depends only on where the search starts, and the
//! earliest match from a later start is the same match as long as it has not
//! been passed. Each frame therefore remembers one result per pattern and only
//! searches again once its cursor moves beyond it.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use super::escape::Masked;
use crate::config::Extensions;
use crate::token::InlineToken;

static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]*)\)").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Atomic {
    Image,
    Link,
    Code,
}

/// Atomic patterns in tie-break order.
const ATOMICS: [Atomic; 3] = [Atomic::Image, Atomic::Link, Atomic::Code];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    BoldItalic,
    Bold,
    Italic,
    Strikethrough,
    Highlight,
    Subscript,
    Superscript,
}

/// Styled markers in precedence order. At a shared start offset the earlier
/// entry wins, which always prefers the longer marker of a family.
const MARKERS: [(&str, Style); 10] = [
    ("***", Style::BoldItalic),
    ("___", Style::BoldItalic),
    ("**", Style::Bold),
    ("__", Style::Bold),
    ("*", Style::Italic),
    ("_", Style::Italic),
    ("~~", Style::Strikethrough),
    ("==", Style::Highlight),
    ("~", Style::Subscript),
    ("^", Style::Superscript),
];

impl Style {
    fn enabled(self, extensions: &Extensions) -> bool {
        match self {
            Style::BoldItalic | Style::Bold | Style::Italic => true,
            Style::Strikethrough => extensions.strikethrough,
            Style::Highlight => extensions.highlight,
            Style::Subscript => extensions.subscript,
            Style::Superscript => extensions.superscript,
        }
    }

    /// Single-character markers. An adjacent pair of these is half of a
    /// longer marker run (`**`, `~~`, `^^`), never an empty span.
    fn requires_content(self) -> bool {
        matches!(self, Style::Italic | Style::Subscript | Style::Superscript)
    }

    fn wrap(self, content: Vec<InlineToken>) -> InlineToken {
        match self {
            Style::BoldItalic => InlineToken::BoldItalic { content },
            Style::Bold => InlineToken::Bold { content },
            Style::Italic => InlineToken::Italic { content },
            Style::Strikethrough => InlineToken::Strikethrough { content },
            Style::Highlight => InlineToken::Highlight { content },
            Style::Subscript => InlineToken::Subscript { content },
            Style::Superscript => InlineToken::Superscript { content },
        }
    }
}

/// A span found in the masked text. All offsets are absolute.
#[derive(Debug, Clone)]
struct Candidate {
    start: usize,
    end: usize,
    kind: CandidateKind,
}

#[derive(Debug, Clone)]
enum CandidateKind {
    Image { alt: Range<usize>, src: Range<usize> },
    Link { text: Range<usize>, href: Range<usize> },
    Code { content: Range<usize> },
    Styled { style: Style, inner: Range<usize> },
}

/// Remembered outcome of one pattern's search within a frame.
#[derive(Debug, Clone, Default)]
enum Slot {
    #[default]
    Unsearched,
    Missing,
    Found(Candidate),
}

impl Slot {
    /// The earliest match at or after `cursor`, searching only when the
    /// remembered one is stale.
    fn lookup(
        &mut self,
        cursor: usize,
        search: impl FnOnce() -> Option<Candidate>,
    ) -> Option<&Candidate> {
        let stale = match self {
            Slot::Unsearched => true,
            Slot::Missing => false,
            Slot::Found(found) => found.start < cursor,
        };
        if stale {
            *self = search().map_or(Slot::Missing, Slot::Found);
        }
        match self {
            Slot::Found(found) => Some(&*found),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Searches {
    atomic: [Slot; ATOMICS.len()],
    styled: [Slot; MARKERS.len()],
}

#[derive(Debug)]
enum FrameKind {
    Root,
    Styled(Style),
    Link { href: String },
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    cursor: usize,
    end: usize,
    tokens: Vec<InlineToken>,
    searches: Searches,
}

impl Frame {
    fn new(kind: FrameKind, range: Range<usize>) -> Self {
        Self {
            kind,
            cursor: range.start,
            end: range.end,
            tokens: Vec::new(),
            searches: Searches::default(),
        }
    }
}

/// Lex one span of text into inline tokens.
pub fn lex(text: &str, extensions: &Extensions) -> Vec<InlineToken> {
    let masked = Masked::new(text);
    let mut stack = vec![Frame::new(FrameKind::Root, 0..masked.len())];

    while let Some(frame) = stack.last_mut() {
        if frame.cursor >= frame.end {
            let Some(done) = stack.pop() else { break };
            let token = match done.kind {
                FrameKind::Root => return done.tokens,
                FrameKind::Styled(style) => style.wrap(done.tokens),
                FrameKind::Link { href } => InlineToken::Link {
                    content: done.tokens,
                    href,
                },
            };
            if let Some(parent) = stack.last_mut() {
                parent.tokens.push(token);
            }
            continue;
        }

        let window = frame.cursor..frame.end;
        let Some(found) = next_candidate(masked.as_str(), window, &mut frame.searches, extensions)
        else {
            push_text(&mut frame.tokens, masked.expand(frame.cursor..frame.end));
            frame.cursor = frame.end;
            continue;
        };

        if found.start > frame.cursor {
            push_text(&mut frame.tokens, masked.expand(frame.cursor..found.start));
        }
        frame.cursor = found.end;

        match found.kind {
            CandidateKind::Image { alt, src } => frame.tokens.push(InlineToken::Image {
                alt: masked.expand(alt),
                src: masked.expand(src).trim().to_string(),
            }),
            CandidateKind::Code { content } => frame.tokens.push(InlineToken::Code {
                content: masked.expand_verbatim(content),
            }),
            CandidateKind::Link { text, href } => {
                let href = masked.expand(href).trim().to_string();
                stack.push(Frame::new(FrameKind::Link { href }, text));
            }
            CandidateKind::Styled { style, inner } => {
                stack.push(Frame::new(FrameKind::Styled(style), inner));
            }
        }
    }

    Vec::new()
}

fn push_text(tokens: &mut Vec<InlineToken>, text: String) {
    if !text.is_empty() {
        tokens.push(InlineToken::Text { content: text });
    }
}

/// Earliest span in `window`. Atomic spans win ties because a styled marker
/// must never split an image, link or code span.
fn next_candidate(
    text: &str,
    window: Range<usize>,
    searches: &mut Searches,
    extensions: &Extensions,
) -> Option<Candidate> {
    let mut atomic: Option<Candidate> = None;
    for (slot, pattern) in searches.atomic.iter_mut().zip(ATOMICS) {
        if let Some(found) = slot.lookup(window.start, || find_atomic(pattern, text, &window)) {
            consider(&mut atomic, found);
        }
    }

    let mut styled: Option<Candidate> = None;
    for (slot, (marker, style)) in searches.styled.iter_mut().zip(MARKERS) {
        if !style.enabled(extensions) {
            continue;
        }
        let search = || find_styled(marker, style, text, &window);
        if let Some(found) = slot.lookup(window.start, search) {
            consider(&mut styled, found);
        }
    }

    match (atomic, styled) {
        (Some(a), Some(s)) => Some(if a.start <= s.start { a } else { s }),
        (a, s) => a.or(s),
    }
}

fn find_atomic(pattern: Atomic, text: &str, window: &Range<usize>) -> Option<Candidate> {
    let regex: &Regex = match pattern {
        Atomic::Image => &IMAGE,
        Atomic::Link => &LINK,
        Atomic::Code => &CODE,
    };
    let caps = regex.captures_at(&text[..window.end], window.start)?;
    let whole = caps.get(0)?.range();
    let first = caps.get(1)?.range();
    let kind = match pattern {
        Atomic::Image => CandidateKind::Image {
            alt: first,
            src: caps.get(2)?.range(),
        },
        Atomic::Link => CandidateKind::Link {
            text: first,
            href: caps.get(2)?.range(),
        },
        Atomic::Code => CandidateKind::Code { content: first },
    };
    Some(Candidate {
        start: whole.start,
        end: whole.end,
        kind,
    })
}

/// The first opener in `window` with a closer after it. The closer is the
/// next occurrence of the same marker. A style that needs content skips an
/// opener whose closer follows immediately, leaving that character literal.
fn find_styled(marker: &str, style: Style, text: &str, window: &Range<usize>) -> Option<Candidate> {
    let text = &text[..window.end];
    let mut from = window.start;
    loop {
        let open = from + text[from..].find(marker)?;
        let inner_start = open + marker.len();
        let close = inner_start + text[inner_start..].find(marker)?;
        if close == inner_start && style.requires_content() {
            // markers are ASCII, so one byte on is a char boundary
            from = open + 1;
            continue;
        }
        return Some(Candidate {
            start: open,
            end: close + marker.len(),
            kind: CandidateKind::Styled {
                style,
                inner: inner_start..close,
            },
        });
    }
}

/// Keep `candidate` only if it starts strictly earlier; earlier searches win ties.
fn consider(best: &mut Option<Candidate>, candidate: &Candidate) {
    if best.as_ref().is_none_or(|b| candidate.start < b.start) {
        *best = Some(candidate.clone());
    }
}
