//! Standard tokenizer implementation.
//!
//! Splits text on Unicode word boundaries (UAX #29) and drops punctuation
//! and whitespace segments, which is what the engine's `standard` tokenizer
//! does.
//!
//! ```
//! use hasta::analysis::tokenizer::Tokenizer;
//! use hasta::analysis::tokenizer::standard::StandardTokenizer;
//!
//! let tokenizer = StandardTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world! 2014").unwrap().collect();
//!
//! assert_eq!(tokens[0].text, "Hello");
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[2].text, "2014");
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A tokenizer that splits text on Unicode word boundaries.
#[derive(Clone, Debug, Default)]
pub struct StandardTokenizer;

impl StandardTokenizer {
    /// Create a new standard tokenizer.
    pub fn new() -> Self {
        StandardTokenizer
    }

    fn detect_token_type(word: &str) -> TokenType {
        if word.chars().all(|c| c.is_numeric() || c == '.' || c == ',') {
            TokenType::Num
        } else {
            TokenType::Alphanum
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .unicode_word_indices()
            .enumerate()
            .map(|(position, (start, word))| {
                Token::with_offsets(word, position, start, start + word.len())
                    .with_token_type(Self::detect_token_type(word))
            })
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_punctuation() {
        let tokens: Vec<Token> = StandardTokenizer::new()
            .tokenize("The Quick Brown Fox Jumps Over The Lazy Dog.")
            .unwrap()
            .collect();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["The", "Quick", "Brown", "Fox", "Jumps", "Over", "The", "Lazy", "Dog"]
        );
        assert_eq!(tokens[8].position, 8);
    }

    #[test]
    fn test_offsets() {
        let tokens: Vec<Token> = StandardTokenizer::new()
            .tokenize("café résumé")
            .unwrap()
            .collect();
        assert_eq!(tokens[0].text, "café");
        assert_eq!((tokens[0].start_offset, tokens[0].end_offset), (0, 5));
        assert_eq!(tokens[1].start_offset, 6);
    }

    #[test]
    fn test_token_types() {
        let tokens: Vec<Token> = StandardTokenizer::new()
            .tokenize("March 1927")
            .unwrap()
            .collect();
        assert_eq!(tokens[0].token_type, TokenType::Alphanum);
        assert_eq!(tokens[1].token_type, TokenType::Num);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(StandardTokenizer::new().tokenize("").unwrap().count(), 0);
    }
}
