use serde::Serialize;

/// Inline spans produced by the inline lexer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InlineToken {
    Text { content: String },
    Bold { content: Vec<InlineToken> },
    Italic { content: Vec<InlineToken> },
    BoldItalic { content: Vec<InlineToken> },
    Strikethrough { content: Vec<InlineToken> },
    Highlight { content: Vec<InlineToken> },
    Subscript { content: Vec<InlineToken> },
    Superscript { content: Vec<InlineToken> },
    /// Verbatim, never lexed further.
    Code { content: String },
    Link { content: Vec<InlineToken>, href: String },
    /// Alt text is kept as a plain string.
    Image { alt: String, src: String },
}

impl InlineToken {
    pub fn text(content: impl Into<String>) -> Self {
        InlineToken::Text {
            content: content.into(),
        }
    }

    /// Nested inline content, for the variants that carry any.
    pub fn children(&self) -> Option<&[InlineToken]> {
        match self {
            InlineToken::Bold { content }
            | InlineToken::Italic { content }
            | InlineToken::BoldItalic { content }
            | InlineToken::Strikethrough { content }
            | InlineToken::Highlight { content }
            | InlineToken::Subscript { content }
            | InlineToken::Superscript { content }
            | InlineToken::Link { content, .. } => Some(content),
            InlineToken::Text { .. } | InlineToken::Code { .. } | InlineToken::Image { .. } => None,
        }
    }

    /// Concatenated visible text of this span and everything inside it.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        let mut pending = vec![self];
        while let Some(token) = pending.pop() {
            match token {
                InlineToken::Text { content } | InlineToken::Code { content } => {
                    out.push_str(content)
                }
                InlineToken::Image { alt, .. } => out.push_str(alt),
                _ => {
                    if let Some(children) = token.children() {
                        pending.extend(children.iter().rev());
                    }
                }
            }
        }
        out
    }
}

/// A single list item. Nested items form a tree of arbitrary depth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub content: Vec<InlineToken>,
    /// For task lists: None = not a task, Some(false) = unchecked, Some(true) = checked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ListItem>,
}

impl ListItem {
    pub fn new(content: Vec<InlineToken>, checked: Option<bool>) -> Self {
        Self {
            content,
            checked,
            items: Vec::new(),
        }
    }
}

// Deep indentation ladders build deep item trees; free them without recursing.
impl Drop for ListItem {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.items);
        while let Some(mut item) = pending.pop() {
            pending.append(&mut item.items);
        }
    }
}

/// A list (ordered or unordered)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

/// Block-level tokens produced by the segmenter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "megaType", rename_all = "camelCase")]
pub enum BlockToken {
    Heading {
        level: u8,
        content: Vec<InlineToken>,
    },
    Paragraph {
        content: Vec<InlineToken>,
    },
    CodeBlock {
        /// Empty when the opening fence has no tag.
        language: String,
        content: String,
    },
    HorizontalRule,
    Blockquote {
        content: Vec<BlockToken>,
    },
    List(List),
    Table {
        /// Empty for headerless tables.
        header: Vec<Vec<InlineToken>>,
        rows: Vec<Vec<Vec<InlineToken>>>,
    },
}

// Same as ListItem: a 10k-deep quote must not overflow the stack when freed.
impl Drop for BlockToken {
    fn drop(&mut self) {
        let BlockToken::Blockquote { content } = self else {
            return;
        };
        let mut pending = std::mem::take(content);
        while let Some(mut block) = pending.pop() {
            if let BlockToken::Blockquote { content } = &mut block {
                pending.append(content);
            }
        }
    }
}
