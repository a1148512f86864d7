//! Whitespace tokenizer implementation.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::{Tokenizer, split_runs};
use crate::error::Result;

/// A tokenizer that splits text on whitespace, keeping punctuation attached.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = split_runs(text, |c| !c.is_whitespace())
            .into_iter()
            .enumerate()
            .map(|(position, (start, word))| {
                Token::with_offsets(word, position, start, start + word.len())
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_punctuation() {
        let tokens: Vec<Token> = WhitespaceTokenizer::new()
            .tokenize("Hello,  world!\tbye")
            .unwrap()
            .collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Hello,", "world!", "bye"]);
        assert_eq!(tokens[1].start_offset, 8);
    }
}
