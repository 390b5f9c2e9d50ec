//! Backslash escapes.
//!
//! Before inline lexing every `\X` is replaced by [`SENTINEL`] so that no
//! marker search can see `X`. The escaped character is remembered against the
//! sentinel's byte offset in the masked text, which keeps expansion
//! independent of the order in which spans are emitted.

use std::ops::Range;

/// Private-use code point standing in for an escaped character.
pub(super) const SENTINEL: char = '\u{E000}';

#[derive(Debug, Clone, Copy)]
struct Escape {
    offset: usize,
    literal: char,
    /// False when the input already contained a raw sentinel character.
    backslash: bool,
}

#[derive(Debug)]
pub(super) struct Masked {
    text: String,
    escapes: Vec<Escape>,
}

impl Masked {
    pub(super) fn new(input: &str) -> Self {
        let mut text = String::with_capacity(input.len());
        let mut escapes = Vec::new();
        let mut chars = input.chars();

        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some(literal) => {
                        escapes.push(Escape {
                            offset: text.len(),
                            literal,
                            backslash: true,
                        });
                        text.push(SENTINEL);
                    }
                    // trailing backslash stays as-is
                    None => text.push('\\'),
                },
                SENTINEL => {
                    escapes.push(Escape {
                        offset: text.len(),
                        literal: SENTINEL,
                        backslash: false,
                    });
                    text.push(SENTINEL);
                }
                _ => text.push(c),
            }
        }

        Self { text, escapes }
    }

    pub(super) fn as_str(&self) -> &str {
        &self.text
    }

    pub(super) fn len(&self) -> usize {
        self.text.len()
    }

    /// Text in `range` with each escaped character restored as a literal.
    pub(super) fn expand(&self, range: Range<usize>) -> String {
        self.restore(range, false)
    }

    /// Text in `range` with escapes put back as they were written (`\X`).
    pub(super) fn expand_verbatim(&self, range: Range<usize>) -> String {
        self.restore(range, true)
    }

    fn restore(&self, range: Range<usize>, keep_backslash: bool) -> String {
        let slice = &self.text[range.clone()];
        let mut next = self.escapes.partition_point(|e| e.offset < range.start);
        let mut out = String::with_capacity(slice.len());

        for (i, c) in slice.char_indices() {
            if c != SENTINEL {
                out.push(c);
                continue;
            }
            match self.escapes.get(next) {
                Some(escape) if escape.offset == range.start + i => {
                    if keep_backslash && escape.backslash {
                        out.push('\\');
                    }
                    out.push(escape.literal);
                    next += 1;
                }
                _ => out.push(c),
            }
        }
        out
    }
}
