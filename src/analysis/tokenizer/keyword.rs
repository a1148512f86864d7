//! Keyword tokenizer implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that emits the whole input as a single token.
///
/// Empty input produces no token.
#[derive(Clone, Debug, Default)]
pub struct KeywordTokenizer;

impl KeywordTokenizer {
    /// Create a new keyword tokenizer.
    pub fn new() -> Self {
        KeywordTokenizer
    }
}

impl Tokenizer for KeywordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        if text.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }
        let token = Token::with_offsets(text, 0, 0, text.len());
        Ok(Box::new(std::iter::once(token)))
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
