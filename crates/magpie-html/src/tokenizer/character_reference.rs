//! Character reference states for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! References decode into the pending text run when encountered in data
//! content and into the current attribute's value when encountered inside
//! an attribute. Unknown references flush through verbatim.

use super::named_character_references::{is_entity_prefix, replacement_for};
use super::tokenizer::{HtmlTokenizer, TokenizerState};

impl HtmlTokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// Returns true if the return state is an attribute value state.
    /// Per spec: "consumed as part of an attribute"
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute,
    /// then append each character to the current attribute's value.
    /// Otherwise, emit each character as a character token." — here the
    /// non-attribute case appends to the pending text run instead.
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            for c in buffer.chars() {
                self.append_to_attribute_value(c);
            }
        } else {
            self.text_buffer.push_str(&buffer);
        }
    }

    /// Return to the state that initiated the character reference.
    pub(super) fn resume_return_state(&mut self) {
        let state = self.return_state.take().unwrap_or(TokenizerState::Data);
        self.state = state;
    }

    /// Like [`Self::resume_return_state`], but the return state also gets
    /// the current character back.
    pub(super) fn reprocess_in_return_state(&mut self) {
        let state = self.return_state.take().unwrap_or(TokenizerState::Data);
        self.reprocess_in(state);
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');
        match self.current_input_character {
            // "ASCII alphanumeric - Reconsume in the named character
            // reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reprocess_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#) - Append the current input character
            // to the temporary buffer. Switch to the numeric character
            // reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.state = TokenizerState::NumericCharacterReference;
            }
            // "Anything else - Flush code points consumed as a character
            // reference. Reconsume in the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                self.reprocess_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the
    /// consumed characters are one of the identifiers of the named
    /// character references table."
    ///
    /// The longest match is found by peeking ahead against the table's
    /// prefixes; only the matched identifier is actually consumed.
    pub(super) fn handle_named_character_reference_state(&mut self) {
        // The entry reconsumed an ASCII alphanumeric into this state.
        let Some(first) = self.current_input_character else {
            self.flush_code_points_consumed_as_character_reference();
            self.reprocess_in_return_state();
            return;
        };

        let mut name = String::from(first);
        let mut best: Option<(usize, &'static str)> =
            replacement_for(&name).map(|replacement| (name.len(), replacement));

        let mut offset = 0;
        while let Some(c) = self.peek(offset) {
            if !c.is_ascii_alphanumeric() && c != ';' {
                break;
            }
            name.push(c);
            offset += 1;
            if let Some(replacement) = replacement_for(&name) {
                best = Some((name.len(), replacement));
            }
            // Identifiers never extend past a semicolon, and once no table
            // entry starts with the candidate there is nothing longer to
            // find.
            if c == ';' || !is_entity_prefix(&name) {
                break;
            }
        }

        match best {
            Some((matched_len, replacement)) => {
                // The first character is already consumed.
                self.advance_by(matched_len - 1);
                let matched = &name[..matched_len];
                let with_semicolon = matched.ends_with(';');

                // "If the character reference was consumed as part of an
                // attribute, and the last character matched is not a
                // U+003B SEMICOLON character (;), and the next input
                // character is either a U+003D EQUALS SIGN character (=) or
                // an ASCII alphanumeric, then... flush code points consumed
                // as a character reference. Switch to the return state."
                // (Historical reasons: `&not=1` in a URL must stay intact.)
                let attribute_quirk = self.is_consumed_as_part_of_attribute()
                    && !with_semicolon
                    && self
                        .peek(0)
                        .is_some_and(|c| c == '=' || c.is_ascii_alphanumeric());

                if attribute_quirk {
                    self.temporary_buffer.push_str(matched);
                } else {
                    if !with_semicolon {
                        self.log_parse_error("missing-semicolon-after-character-reference");
                    }
                    self.temporary_buffer.clear();
                    self.temporary_buffer.push_str(replacement);
                }
                self.flush_code_points_consumed_as_character_reference();
                self.resume_return_state();
            }
            None => {
                // "Otherwise... flush code points consumed as a character
                // reference. Switch to the ambiguous ampersand state."
                self.temporary_buffer.push(first);
                self.flush_code_points_consumed_as_character_reference();
                self.state = TokenizerState::AmbiguousAmpersand;
            }
        }
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "ASCII alphanumeric - If the character reference was consumed
            // as part of an attribute, then append the current input
            // character to the current attribute's value. Otherwise, emit
            // the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.append_to_attribute_value(c);
                } else {
                    self.text_buffer.push(c);
                }
            }
            // "U+003B SEMICOLON (;) - This is an
            // unknown-named-character-reference parse error. Reconsume in
            // the return state."
            Some(';') => {
                self.log_parse_error("unknown-named-character-reference");
                self.reprocess_in_return_state();
            }
            _ => {
                self.reprocess_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        self.character_reference_code = 0;
        match self.current_input_character {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.state = TokenizerState::HexadecimalCharacterReferenceStart;
            }
            _ => {
                self.reprocess_in(TokenizerState::DecimalCharacterReferenceStart);
            }
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_hexdigit() => {
                self.reprocess_in(TokenizerState::HexadecimalCharacterReference);
            }
            _ => {
                self.log_parse_error("absence-of-digits-in-numeric-character-reference");
                self.flush_code_points_consumed_as_character_reference();
                self.reprocess_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_digit() => {
                self.reprocess_in(TokenizerState::DecimalCharacterReference);
            }
            _ => {
                self.log_parse_error("absence-of-digits-in-numeric-character-reference");
                self.flush_code_points_consumed_as_character_reference();
                self.reprocess_in_return_state();
            }
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_hexdigit() => {
                let digit = c.to_digit(16).unwrap_or(0);
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(16)
                    .saturating_add(digit);
            }
            Some(';') => {
                self.state = TokenizerState::NumericCharacterReferenceEnd;
            }
            _ => {
                self.log_parse_error("missing-semicolon-after-character-reference");
                self.reprocess_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_digit() => {
                let digit = c.to_digit(10).unwrap_or(0);
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(10)
                    .saturating_add(digit);
            }
            Some(';') => {
                self.state = TokenizerState::NumericCharacterReferenceEnd;
            }
            _ => {
                self.log_parse_error("missing-semicolon-after-character-reference");
                self.reprocess_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Entered by plain transition after the terminating semicolon (the
    /// current character then belongs to the return state, so this handler
    /// always exits through [`Self::reprocess_in_return_state`]) or by
    /// reprocessing when the semicolon was missing.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let code = self.character_reference_code;
        let decoded = match code {
            // "If the number is 0x00... this is a null-character-reference
            // parse error."
            0 => {
                self.log_parse_error("null-character-reference");
                '\u{FFFD}'
            }
            // "If the number is greater than 0x10FFFF..."
            c if c > 0x0010_FFFF => {
                self.log_parse_error("character-reference-outside-unicode-range");
                '\u{FFFD}'
            }
            // "If the number is a surrogate..."
            c if (0xD800..=0xDFFF).contains(&c) => {
                self.log_parse_error("surrogate-character-reference");
                '\u{FFFD}'
            }
            c => char::from_u32(c).unwrap_or('\u{FFFD}'),
        };
        self.temporary_buffer.clear();
        self.temporary_buffer.push(decoded);
        self.flush_code_points_consumed_as_character_reference();
        self.reprocess_in_return_state();
    }
}
