//! Tokenize Markdown into a tree of typed block and inline tokens.
//!
//! ```
//! use mdtok::{BlockToken, InlineToken};
//!
//! let blocks = mdtok::tokenize("# Hello *world*");
//! assert_eq!(
//!     blocks,
//!     vec![BlockToken::Heading {
//!         level: 1,
//!         content: vec![
//!             InlineToken::text("Hello "),
//!             InlineToken::Italic { content: vec![InlineToken::text("world")] },
//!         ],
//!     }]
//! );
//! ```
//!
//! Tokenizing never fails: syntax that does not fully match degrades to a
//! simpler construct (a paragraph, literal text). The returned tree is owned
//! by the caller and nothing is cached between calls.

mod config;
mod parser;
mod token;

pub use config::{Config, ConfigError, Extensions};
pub use token::{BlockToken, InlineToken, List, ListItem};

/// Parse markdown text into block tokens with every extension enabled.
pub fn tokenize(markdown: &str) -> Vec<BlockToken> {
    tokenize_with_config(markdown, &Config::default())
}

/// Parse markdown text into block tokens with custom config.
pub fn tokenize_with_config(markdown: &str, config: &Config) -> Vec<BlockToken> {
    parser::parse(markdown, config)
}

/// Lex a single span of text into inline tokens.
pub fn tokenize_inline(text: &str) -> Vec<InlineToken> {
    parser::inline::lex(text, &Extensions::default())
}
