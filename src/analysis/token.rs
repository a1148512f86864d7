//! Token types for local analysis previews.
//!
//! A [`Token`] is one unit flowing through a
//! [`PreviewAnalyzer`](crate::analysis::preview::PreviewAnalyzer): its text,
//! its position in the stream, byte offsets into the original text, and how
//! many positions it spans (more than one for shingles).
//!
//! Positions are assigned by the tokenizer and kept by filters, so a stopword
//! removed from the stream leaves a gap:
//!
//! ```text
//! Input: "the quick fox"
//!
//!   after tokenizer:  the(0) quick(1) fox(2)
//!   after stop:       quick(1) fox(2)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single token produced by a tokenizer or filter.
///
/// # Examples
///
/// ```
/// use hasta::analysis::token::Token;
///
/// let token = Token::with_offsets("world", 1, 6, 11);
/// assert_eq!(token.text, "world");
/// assert_eq!(token.position, 1);
/// assert_eq!(token.position_length, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// The byte offset where this token starts in the original text
    pub start_offset: usize,

    /// The byte offset where this token ends in the original text
    pub end_offset: usize,

    /// How many positions this token spans (default: 1)
    pub position_length: usize,

    /// Token type classification
    pub token_type: TokenType,
}

/// Token type classification, named the way analyze responses name them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    /// Alphanumeric text
    Alphanum,
    /// Numeric values
    Num,
    /// Untyped word (whitespace, letter and keyword tokenizers)
    Word,
    /// A token n-gram produced by a shingle filter
    Shingle,
}

impl TokenType {
    /// The type label used in analyze responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Alphanum => "<ALPHANUM>",
            TokenType::Num => "<NUM>",
            TokenType::Word => "word",
            TokenType::Shingle => "shingle",
        }
    }
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token::with_offsets(text, position, 0, 0)
    }

    /// Create a new token with text, position, and byte offsets.
    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            position_length: 1,
            token_type: TokenType::Word,
        }
    }

    /// Set the token type.
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = token_type;
        self
    }

    /// Set how many positions this token spans.
    pub fn with_position_length(mut self, length: usize) -> Self {
        self.position_length = length;
        self
    }

    /// Replace the text, keeping position and offsets.
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A stream of tokens.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;
