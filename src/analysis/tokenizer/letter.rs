//! Letter tokenizer implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::{Tokenizer, split_runs};
use crate::error::Result;

/// A tokenizer that splits text whenever it meets a character that is not a
/// letter. Digits are dropped.
#[derive(Clone, Debug, Default)]
pub struct LetterTokenizer;

impl LetterTokenizer {
    /// Create a new letter tokenizer.
    pub fn new() -> Self {
        LetterTokenizer
    }
}

impl Tokenizer for LetterTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = split_runs(text, char::is_alphabetic)
            .into_iter()
            .enumerate()
            .map(|(position, (start, word))| {
                Token::with_offsets(word, position, start, start + word.len())
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "letter"
    }
}
