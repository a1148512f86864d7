//! Tokenizer implementations for local analysis previews.
//!
//! Tokenizers are the first stage of an analyzer chain and split raw text
//! into tokens.
//!
//! # Available Tokenizers
//!
//! - [`standard::StandardTokenizer`] - Unicode word boundaries (UAX #29)
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace characters
//! - [`letter::LetterTokenizer`] - Splits on non-letter characters
//! - [`keyword::KeywordTokenizer`] - Treats the entire text as one token
//!
//! # Examples
//!
//! ```
//! use hasta::analysis::tokenizer::Tokenizer;
//! use hasta::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::TokenizerKind;
use crate::analysis::token::TokenStream;
use crate::error::Result;

pub mod keyword;
pub mod letter;
pub mod standard;
pub mod whitespace;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer.
    fn name(&self) -> &'static str;
}

/// Create the tokenizer for a configured kind.
pub fn for_kind(kind: TokenizerKind) -> Arc<dyn Tokenizer> {
    match kind {
        TokenizerKind::Standard => Arc::new(standard::StandardTokenizer::new()),
        TokenizerKind::Whitespace => Arc::new(whitespace::WhitespaceTokenizer::new()),
        TokenizerKind::Letter => Arc::new(letter::LetterTokenizer::new()),
        TokenizerKind::Keyword => Arc::new(keyword::KeywordTokenizer::new()),
    }
}

/// Split `text` into maximal runs of characters matching `keep`.
pub(crate) fn split_runs<F>(text: &str, keep: F) -> Vec<(usize, &str)>
where
    F: Fn(char) -> bool,
{
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match (keep(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, &text[s..i]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, &text[s..]));
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_runs() {
        let runs = split_runs("  ab c  d", |c| !c.is_whitespace());
        assert_eq!(runs, vec![(2, "ab"), (5, "c"), (8, "d")]);
    }

    #[test]
    fn test_for_kind_names() {
        assert_eq!(for_kind(TokenizerKind::Standard).name(), "standard");
        assert_eq!(for_kind(TokenizerKind::Keyword).name(), "keyword");
    }
}
