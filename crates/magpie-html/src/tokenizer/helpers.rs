//! Token construction and emission for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! The state handlers in `tokenizer.rs` delegate here for everything that
//! builds or finishes a token:
//! - Text-run flushing and token emission
//! - Mutation of the tag/comment under construction
//! - Duplicate-attribute removal
//! - RCDATA/RAWTEXT end-tag bookkeeping
//! - Parse-error reporting

use magpie_common::issues::{Stage, report};

use super::token::{Attribute, Token};
use super::tokenizer::{HtmlTokenizer, TokenizerState};

impl HtmlTokenizer {
    /// Report a parse error. Tokenization never fails on bad input; the
    /// problem is tallied under the given WHATWG error code and the run
    /// continues, matching the engine's "absence, not exceptions"
    /// contract.
    pub(super) fn log_parse_error(&self, code: &str) {
        report(Stage::Tokenize, code);
    }
}

// =============================================================================
// Token Emission
// =============================================================================

impl HtmlTokenizer {
    /// Flush the pending text run, if any, as a single `Text` token.
    ///
    /// Runs are flushed before any non-text token so the stream interleaves
    /// in source order; empty runs are never emitted.
    pub(super) fn flush_text(&mut self) {
        if !self.text_buffer.is_empty() {
            let text = std::mem::take(&mut self.text_buffer);
            self.token_stream.push(Token::text(text));
        }
    }

    /// Emit the tag token under construction.
    ///
    /// Lowers the internal [`TagBuilder`](super::tokenizer::TagBuilder) to
    /// the public token model: closing tags drop attributes and the
    /// self-closing flag (both parse errors), opening tags drop duplicate
    /// attributes and record themselves for appropriate-end-tag matching.
    /// A non-self-closing `<script>`/`<style>` switches the machine to
    /// RAWTEXT, `<title>`/`<textarea>` to RCDATA; without a tree builder to
    /// drive it, the tokenizer makes that decision itself.
    pub(super) fn emit_current_tag(&mut self) {
        let Some(tag) = self.current_tag.take() else {
            return;
        };
        self.flush_text();

        if tag.is_end {
            // "When an end tag token is emitted with attributes, that is an
            // end-tag-with-attributes parse error."
            if !tag.attributes.is_empty() {
                self.log_parse_error("end-tag-with-attributes");
            }
            // "When an end tag token is emitted with its self-closing flag
            // set, that is an end-tag-with-trailing-solidus parse error."
            if tag.self_closing {
                self.log_parse_error("end-tag-with-trailing-solidus");
            }
            self.token_stream.push(Token::close(tag.name));
            return;
        }

        let attributes = self.dedup_attributes(tag.attributes);
        self.last_start_tag_name = Some(tag.name.clone());

        let raw_state = if tag.self_closing {
            None
        } else {
            match tag.name.as_str() {
                "script" | "style" => Some(TokenizerState::Rawtext),
                "title" | "textarea" => Some(TokenizerState::Rcdata),
                _ => None,
            }
        };

        self.token_stream.push(Token::open(tag.name, attributes));

        if let Some(state) = raw_state {
            self.state = state;
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "if there is already an attribute on the token with the exact same
    /// name, then this is a duplicate-attribute parse error and the new
    /// attribute must be removed from the token."
    ///
    /// Applied at emission time: keeps the first occurrence of each name.
    fn dedup_attributes(&self, attributes: Vec<Attribute>) -> Vec<Attribute> {
        let mut seen: Vec<Attribute> = Vec::with_capacity(attributes.len());
        for attr in attributes {
            if seen.iter().any(|prev| prev.name == attr.name) {
                self.log_parse_error("duplicate-attribute");
            } else {
                seen.push(attr);
            }
        }
        seen
    }

    /// Emit the comment token under construction.
    pub(super) fn emit_current_comment(&mut self) {
        if let Some(comment) = self.current_comment.take() {
            self.flush_text();
            self.token_stream.push(Token::comment(comment));
        }
    }

    /// End of input: flush any pending text and stop the machine.
    pub(super) fn finish(&mut self) {
        self.flush_text();
        self.at_eof = true;
    }
}

// =============================================================================
// Current-Token Mutation Helpers
// =============================================================================

impl HtmlTokenizer {
    /// "Append the current input character to the current tag token's tag
    /// name."
    pub(super) fn append_to_tag_name(&mut self, c: char) {
        if let Some(tag) = self.current_tag.as_mut() {
            tag.name.push(c);
        }
    }

    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        if let Some(tag) = self.current_tag.as_mut() {
            tag.attributes
                .push(Attribute::new(String::new(), String::new()));
        }
    }

    /// "Append the current input character to the current attribute's
    /// name."
    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(attr) = self
            .current_tag
            .as_mut()
            .and_then(|tag| tag.attributes.last_mut())
        {
            attr.name.push(c);
        }
    }

    /// "Append the current input character to the current attribute's
    /// value."
    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(attr) = self
            .current_tag
            .as_mut()
            .and_then(|tag| tag.attributes.last_mut())
        {
            attr.value.push(c);
        }
    }

    /// "Append the current input character to the comment token's data."
    pub(super) fn append_to_comment(&mut self, c: char) {
        if let Some(comment) = self.current_comment.as_mut() {
            comment.push(c);
        }
    }

    /// Append a string to the comment token's data (used by the comment
    /// end bang state).
    pub(super) fn append_to_comment_str(&mut self, s: &str) {
        if let Some(comment) = self.current_comment.as_mut() {
            comment.push_str(s);
        }
    }
}

// =============================================================================
// RCDATA/RAWTEXT Helpers
// =============================================================================

impl HtmlTokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-end-tag-token)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name
    /// matches the tag name of the last start tag to have been emitted from
    /// this tokenizer."
    #[must_use]
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        match (&self.current_tag, &self.last_start_tag_name) {
            (Some(tag), Some(last)) => tag.is_end && tag.name == *last,
            _ => false,
        }
    }

    /// The "anything else" entry of the RCDATA/RAWTEXT end tag name states:
    /// the candidate end tag turns out to be raw content after all. Emit
    /// `</`, the buffered name characters, and return to the content state.
    pub(super) fn abandon_raw_end_tag(&mut self, content_state: TokenizerState) {
        self.current_tag = None;
        self.text_buffer.push_str("</");
        let buffered = std::mem::take(&mut self.temporary_buffer);
        self.text_buffer.push_str(&buffered);
        self.reprocess_in(content_state);
    }
}
