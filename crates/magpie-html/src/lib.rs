//! HTML tokenizer for the Magpie scraping engine.
//!
//! # Scope
//!
//! This crate turns raw HTML into the flat token stream the rest of the
//! engine consumes: opening tags with their attributes, closing tags, text
//! runs, and comments. It implements the tag-level subset of
//! [WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
//! - Data, RCDATA, RAWTEXT, tag, and comment states
//! - Attribute parsing with duplicate removal
//! - Numeric and common named character references
//!
//! # Differences from a browser tokenizer
//!
//! Scraping does not need tree construction, so the stream is deliberately
//! lossy where a browser's cannot be:
//! - Character data is emitted as **runs**, never one token per character,
//!   and empty runs are never emitted.
//! - DOCTYPE declarations are consumed and discarded; there is no token
//!   variant for them.
//! - Self-closing tags emit a single [`Token::TagOpen`] and no matching
//!   [`Token::TagClose`].
//! - Parse errors are reported through `magpie_common::issues` and never
//!   abort tokenization.

/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use tokenizer::{Attribute, HtmlTokenizer, Token, tokenize};
