//! The HTML tokenizer state machine and its token model.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)

mod character_reference;
mod helpers;
mod named_character_references;
mod token;
#[allow(clippy::module_inception)]
mod tokenizer;

pub use token::{Attribute, Token};
pub use tokenizer::{HtmlTokenizer, TokenizerState};

/// Tokenize an HTML source string in one call.
///
/// Convenience wrapper over [`HtmlTokenizer`] for callers that do not need
/// to inspect intermediate state.
#[must_use]
pub fn tokenize(html: &str) -> Vec<Token> {
    let mut tokenizer = HtmlTokenizer::new(html.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}
