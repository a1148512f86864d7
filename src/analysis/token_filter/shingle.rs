//! Shingle filter implementation.
//!
//! Emits contiguous token n-grams ("shingles") of `min_shingle_size` to
//! `max_shingle_size` tokens, optionally along with the original unigrams.
//! For each position the unigram comes first, then the shingles starting at
//! that position in increasing size.
//!
//! Positions left empty by an earlier filter (a removed stopword) are filled
//! with the filler token, so shingles never silently join words that were
//! not adjacent in the text.
//!
//! ```
//! use hasta::analysis::filter::ShingleParams;
//! use hasta::analysis::token_filter::Filter;
//! use hasta::analysis::token_filter::shingle::ShingleFilter;
//! use hasta::analysis::token::Token;
//!
//! let filter = ShingleFilter::new(ShingleParams {
//!     max_shingle_size: 3,
//!     ..ShingleParams::default()
//! });
//! let tokens = vec![Token::new("quick", 0), Token::new("brown", 1), Token::new("fox", 2)];
//! let texts: Vec<String> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .map(|t| t.text)
//!     .collect();
//!
//! assert_eq!(
//!     texts,
//!     vec!["quick", "quick brown", "quick brown fox", "brown", "brown fox", "fox"]
//! );
//! ```

use crate::analysis::filter::ShingleParams;
use crate::analysis::token::{Token, TokenStream, TokenType};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that produces token n-grams.
#[derive(Clone, Debug)]
pub struct ShingleFilter {
    params: ShingleParams,
}

impl Default for ShingleFilter {
    fn default() -> Self {
        Self::new(ShingleParams::default())
    }
}

impl ShingleFilter {
    /// Create a new shingle filter.
    pub fn new(params: ShingleParams) -> Self {
        ShingleFilter { params }
    }

    /// Get the filter parameters.
    pub fn params(&self) -> &ShingleParams {
        &self.params
    }

    fn shingle(&self, slots: &[Option<&Token>], position: usize) -> Option<Token> {
        let real: Vec<&Token> = slots.iter().flatten().copied().collect();
        let first = real.first()?;
        let last = real.last()?;

        let text = slots
            .iter()
            .map(|slot| match slot {
                Some(token) => token.text.as_str(),
                None => self.params.filler_token.as_str(),
            })
            .collect::<Vec<_>>()
            .join(&self.params.token_separator);

        Some(
            Token::with_offsets(text, position, first.start_offset, last.end_offset)
                .with_position_length(slots.len())
                .with_token_type(TokenType::Shingle),
        )
    }
}

impl Filter for ShingleFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let tokens: Vec<Token> = tokens.collect();
        if tokens.is_empty() {
            return Ok(Box::new(std::iter::empty()));
        }

        // One slot per position from 0 (leading gaps included); None = filler.
        let mut slots: Vec<Option<&Token>> = Vec::with_capacity(tokens.len());
        let mut slot_positions: Vec<usize> = Vec::with_capacity(tokens.len());
        for token in &tokens {
            for gap in slots.len()..token.position {
                slots.push(None);
                slot_positions.push(gap);
            }
            slots.push(Some(token));
            slot_positions.push(token.position);
        }

        let mut output = Vec::new();
        for i in 0..slots.len() {
            if self.params.output_unigrams
                && let Some(token) = slots[i]
            {
                output.push(token.clone());
            }
            for size in self.params.min_shingle_size..=self.params.max_shingle_size {
                if i + size > slots.len() {
                    break;
                }
                if let Some(shingle) = self.shingle(&slots[i..i + size], slot_positions[i]) {
                    output.push(shingle);
                }
            }
        }

        Ok(Box::new(output.into_iter()))
    }

    fn name(&self) -> &'static str {
        "shingle"
    }
}
