use strum_macros::Display;

use super::token::{Attribute, Token};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Each state corresponds to a section in
/// § 13.2.5. States the scraping token model has no use for (DOCTYPE
/// internals, script double-escaping, CDATA in foreign content) are
/// collapsed: a DOCTYPE is consumed by a single skip state, and script
/// content is treated as RAWTEXT.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    Rcdata,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    Rawtext,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    RcdataLessThanSign,
    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    RcdataEndTagOpen,
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    RcdataEndTagName,
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    RawtextLessThanSign,
    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    RawtextEndTagOpen,
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    RawtextEndTagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    CommentLessThanSign,
    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    CommentLessThanSignBang,
    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    CommentLessThanSignBangDash,
    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    CommentLessThanSignBangDashDash,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    CommentEndBang,
    /// [§ 13.2.5.53–68 DOCTYPE states](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state),
    /// collapsed: the declaration is consumed up to `>` and discarded.
    Doctype,
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    CharacterReference,
    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    NamedCharacterReference,
    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    AmbiguousAmpersand,
    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    NumericCharacterReference,
    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    HexadecimalCharacterReferenceStart,
    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    DecimalCharacterReferenceStart,
    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    HexadecimalCharacterReference,
    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    DecimalCharacterReference,
    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    NumericCharacterReferenceEnd,
}

/// The tag token under construction.
///
/// The public [`Token`] model has no self-closing flag and no attributes on
/// closing tags, so construction happens on this richer intermediate and is
/// lowered when the tag is emitted.
#[derive(Debug, Default)]
pub(super) struct TagBuilder {
    pub(super) name: String,
    pub(super) is_end: bool,
    pub(super) self_closing: bool,
    pub(super) attributes: Vec<Attribute>,
}

impl TagBuilder {
    pub(super) fn start_tag() -> Self {
        Self::default()
    }

    pub(super) fn end_tag() -> Self {
        Self {
            is_end: true,
            ..Self::default()
        }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to
/// tokenize HTML."
///
/// The machine consumes one character per iteration (unless a state asked
/// to reconsume) and appends finished tokens to `token_stream`. Character
/// data accumulates in `text_buffer` and is flushed as a single run
/// whenever a non-text token is emitted or input ends.
pub struct HtmlTokenizer {
    pub(super) state: TokenizerState,
    pub(super) return_state: Option<TokenizerState>,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) current_tag: Option<TagBuilder>,
    pub(super) current_comment: Option<String>,
    pub(super) at_eof: bool,
    pub(super) token_stream: Vec<Token>,
    // When true, the next iteration of the main loop will not consume a new
    // character. "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,

    /// Pending run of character data, flushed lazily.
    pub(super) text_buffer: String,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    /// "The last start tag token emitted" — used for appropriate-end-tag
    /// detection in the RCDATA and RAWTEXT states.
    pub(super) last_start_tag_name: Option<String>,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#temporary-buffer)
    /// Temporary buffer used by the character reference and raw end tag
    /// states.
    pub(super) temporary_buffer: String,

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    /// "a character reference code"
    pub(super) character_reference_code: u32,
}

impl HtmlTokenizer {
    /// Create a new tokenizer for the given input.
    ///
    /// Newlines are normalized up front per
    /// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream):
    /// CRLF and lone CR both become LF.
    #[must_use]
    pub fn new(input: String) -> Self {
        let input = if input.contains('\r') {
            input.replace("\r\n", "\n").replace('\r', "\n")
        } else {
            input
        };
        HtmlTokenizer {
            state: TokenizerState::Data,
            return_state: None,
            input,
            current_pos: 0,
            current_input_character: None,
            current_tag: None,
            current_comment: None,
            at_eof: false,
            token_stream: Vec::new(),
            reconsume: false,
            text_buffer: String::new(),
            last_start_tag_name: None,
            temporary_buffer: String::new(),
            character_reference_code: 0,
        }
    }

    /// Consume the tokenizer and return the token stream.
    /// Call this after [`Self::run`].
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.token_stream
    }

    /// Run the state machine to completion.
    pub fn run(&mut self) {
        while !self.at_eof {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.next_char();
            }
            match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::Rcdata => self.handle_rcdata_state(),
                TokenizerState::Rawtext => self.handle_rawtext_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state(),
                TokenizerState::RcdataLessThanSign => self.handle_rcdata_less_than_sign_state(),
                TokenizerState::RcdataEndTagOpen => self.handle_rcdata_end_tag_open_state(),
                TokenizerState::RcdataEndTagName => self.handle_rcdata_end_tag_name_state(),
                TokenizerState::RawtextLessThanSign => self.handle_rawtext_less_than_sign_state(),
                TokenizerState::RawtextEndTagOpen => self.handle_rawtext_end_tag_open_state(),
                TokenizerState::RawtextEndTagName => self.handle_rawtext_end_tag_name_state(),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state(),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
                TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_double_quoted_state();
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_single_quoted_state();
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state();
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state();
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
                TokenizerState::BogusComment => self.handle_bogus_comment_state(),
                TokenizerState::MarkupDeclarationOpen => {
                    self.handle_markup_declaration_open_state();
                }
                TokenizerState::CommentStart => self.handle_comment_start_state(),
                TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
                TokenizerState::Comment => self.handle_comment_state(),
                TokenizerState::CommentLessThanSign => self.handle_comment_less_than_sign_state(),
                TokenizerState::CommentLessThanSignBang => {
                    self.handle_comment_less_than_sign_bang_state();
                }
                TokenizerState::CommentLessThanSignBangDash => {
                    self.handle_comment_less_than_sign_bang_dash_state();
                }
                TokenizerState::CommentLessThanSignBangDashDash => {
                    self.handle_comment_less_than_sign_bang_dash_dash_state();
                }
                TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
                TokenizerState::CommentEnd => self.handle_comment_end_state(),
                TokenizerState::CommentEndBang => self.handle_comment_end_bang_state(),
                TokenizerState::Doctype => self.handle_doctype_state(),
                TokenizerState::CharacterReference => self.handle_character_reference_state(),
                TokenizerState::NamedCharacterReference => {
                    self.handle_named_character_reference_state();
                }
                TokenizerState::AmbiguousAmpersand => self.handle_ambiguous_ampersand_state(),
                TokenizerState::NumericCharacterReference => {
                    self.handle_numeric_character_reference_state();
                }
                TokenizerState::HexadecimalCharacterReferenceStart => {
                    self.handle_hexadecimal_character_reference_start_state();
                }
                TokenizerState::DecimalCharacterReferenceStart => {
                    self.handle_decimal_character_reference_start_state();
                }
                TokenizerState::HexadecimalCharacterReference => {
                    self.handle_hexadecimal_character_reference_state();
                }
                TokenizerState::DecimalCharacterReference => {
                    self.handle_decimal_character_reference_state();
                }
                TokenizerState::NumericCharacterReferenceEnd => {
                    self.handle_numeric_character_reference_end_state();
                }
            }
        }
    }

    // =========================================================================
    // Input cursor
    // =========================================================================

    /// The unread remainder of the input.
    fn rest(&self) -> &str {
        &self.input[self.current_pos..]
    }

    /// Take the next character off the input, advancing the byte cursor.
    fn next_char(&mut self) -> Option<char> {
        let c = self.rest().chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Look `offset` characters past the cursor without moving it.
    #[must_use]
    pub(super) fn peek(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// True when the unread input starts with `expected`, byte for byte.
    #[must_use]
    fn lookahead_is(&self, expected: &str) -> bool {
        self.rest().starts_with(expected)
    }

    /// ASCII-case-insensitive form of [`Self::lookahead_is`]; the markup
    /// declaration state needs it for the DOCTYPE keyword.
    #[must_use]
    fn lookahead_is_ignore_case(&self, expected: &str) -> bool {
        let mut ahead = self.rest().chars();
        expected
            .chars()
            .all(|want| ahead.next().is_some_and(|got| got.eq_ignore_ascii_case(&want)))
    }

    /// Drop `n` characters. Only called after a lookahead confirmed they
    /// are there.
    pub(super) fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            let _ = self.next_char();
        }
    }

    /// Route the current character to a different state: the main loop
    /// skips its next read, so the new state's handler sees the same
    /// character this one did. The WHATWG prose writes this as "reconsume
    /// in the X state".
    pub(super) const fn reprocess_in(&mut self, state: TokenizerState) {
        self.reconsume = true;
        self.state = state;
    }

    /// The whitespace set the tag states care about: tab, LF, FF, and
    /// space. CR is gone by this point; preprocessing folded it into LF.
    const fn is_whitespace(c: char) -> bool {
        matches!(c, '\t' | '\n' | '\x0C' | ' ')
    }

    // =========================================================================
    // State handlers
    // =========================================================================

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&) - Set the return state to the data
            // state. Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::Data);
                self.state = TokenizerState::CharacterReference;
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => {
                self.state = TokenizerState::TagOpen;
            }
            // "U+0000 NULL - This is an unexpected-null-character parse
            // error."
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.text_buffer.push('\0');
            }
            // "EOF - Emit an end-of-file token."
            None => {
                self.finish();
            }
            Some(c) => {
                self.text_buffer.push(c);
            }
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    fn handle_rcdata_state(&mut self) {
        match self.current_input_character {
            Some('&') => {
                self.return_state = Some(TokenizerState::Rcdata);
                self.state = TokenizerState::CharacterReference;
            }
            Some('<') => {
                self.state = TokenizerState::RcdataLessThanSign;
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.text_buffer.push('\u{FFFD}');
            }
            None => {
                self.finish();
            }
            Some(c) => {
                self.text_buffer.push(c);
            }
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    fn handle_rawtext_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.state = TokenizerState::RawtextLessThanSign;
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.text_buffer.push('\u{FFFD}');
            }
            None => {
                self.finish();
            }
            Some(c) => {
                self.text_buffer.push(c);
            }
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup
            // declaration open state."
            Some('!') => {
                self.state = TokenizerState::MarkupDeclarationOpen;
            }
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => {
                self.state = TokenizerState::EndTagOpen;
            }
            // "ASCII alpha - Create a new start tag token... Reconsume in
            // the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(TagBuilder::start_tag());
                self.reprocess_in(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error.
            // Create a comment token whose data is the empty string.
            // Reconsume in the bogus comment state."
            Some('?') => {
                self.log_parse_error("unexpected-question-mark-instead-of-tag-name");
                self.current_comment = Some(String::new());
                self.reprocess_in(TokenizerState::BogusComment);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a
            // U+003C LESS-THAN SIGN character token and an end-of-file
            // token."
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.text_buffer.push('<');
                self.finish();
            }
            // "Anything else - This is an invalid-first-character-of-tag-name
            // parse error. Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the data state."
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.text_buffer.push('<');
                self.reprocess_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(TagBuilder::end_tag());
                self.reprocess_in(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name
            // parse error. Switch to the data state."
            Some('>') => {
                self.log_parse_error("missing-end-tag-name");
                self.state = TokenizerState::Data;
            }
            None => {
                self.log_parse_error("eof-before-tag-name");
                self.text_buffer.push_str("</");
                self.finish();
            }
            // "Anything else - This is an invalid-first-character-of-tag-name
            // parse error. Create a comment token whose data is the empty
            // string. Reconsume in the bogus comment state."
            Some(_) => {
                self.log_parse_error("invalid-first-character-of-tag-name");
                self.current_comment = Some(String::new());
                self.reprocess_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace(c) => {
                self.state = TokenizerState::BeforeAttributeName;
            }
            Some('/') => {
                self.state = TokenizerState::SelfClosingStartTag;
            }
            Some('>') => {
                self.state = TokenizerState::Data;
                self.emit_current_tag();
            }
            // "ASCII upper alpha - Append the lowercase version of the
            // current input character... to the current tag token's tag
            // name."
            Some(c) if c.is_ascii_uppercase() => {
                self.append_to_tag_name(c.to_ascii_lowercase());
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_tag_name('\u{FFFD}');
            }
            None => {
                self.log_parse_error("eof-in-tag");
                self.finish();
            }
            Some(c) => {
                self.append_to_tag_name(c);
            }
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    fn handle_rcdata_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.temporary_buffer.clear();
                self.state = TokenizerState::RcdataEndTagOpen;
            }
            _ => {
                self.text_buffer.push('<');
                self.reprocess_in(TokenizerState::Rcdata);
            }
        }
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    fn handle_rcdata_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(TagBuilder::end_tag());
                self.reprocess_in(TokenizerState::RcdataEndTagName);
            }
            _ => {
                self.text_buffer.push_str("</");
                self.reprocess_in(TokenizerState::Rcdata);
            }
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    fn handle_rcdata_end_tag_name_state(&mut self) {
        self.handle_raw_end_tag_name_state(TokenizerState::Rcdata);
    }

    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    fn handle_rawtext_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.temporary_buffer.clear();
                self.state = TokenizerState::RawtextEndTagOpen;
            }
            _ => {
                self.text_buffer.push('<');
                self.reprocess_in(TokenizerState::Rawtext);
            }
        }
    }

    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    fn handle_rawtext_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_tag = Some(TagBuilder::end_tag());
                self.reprocess_in(TokenizerState::RawtextEndTagName);
            }
            _ => {
                self.text_buffer.push_str("</");
                self.reprocess_in(TokenizerState::Rawtext);
            }
        }
    }

    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    fn handle_rawtext_end_tag_name_state(&mut self) {
        self.handle_raw_end_tag_name_state(TokenizerState::Rawtext);
    }

    /// Shared body of the RCDATA and RAWTEXT end tag name states; the two
    /// sections differ only in which state "anything else" reconsumes in.
    fn handle_raw_end_tag_name_state(&mut self, content_state: TokenizerState) {
        match self.current_input_character {
            // "If the current end tag token is an appropriate end tag
            // token, then switch to the before attribute name state.
            // Otherwise, treat it as per the 'anything else' entry below."
            Some(c) if Self::is_whitespace(c) => {
                if self.is_appropriate_end_tag_token() {
                    self.state = TokenizerState::BeforeAttributeName;
                } else {
                    self.abandon_raw_end_tag(content_state);
                }
            }
            Some('/') => {
                if self.is_appropriate_end_tag_token() {
                    self.state = TokenizerState::SelfClosingStartTag;
                } else {
                    self.abandon_raw_end_tag(content_state);
                }
            }
            Some('>') => {
                if self.is_appropriate_end_tag_token() {
                    self.state = TokenizerState::Data;
                    self.emit_current_tag();
                } else {
                    self.abandon_raw_end_tag(content_state);
                }
            }
            Some(c) if c.is_ascii_uppercase() => {
                self.append_to_tag_name(c.to_ascii_lowercase());
                self.temporary_buffer.push(c);
            }
            Some(c) if c.is_ascii_lowercase() => {
                self.append_to_tag_name(c);
                self.temporary_buffer.push(c);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character
            // token, a U+002F SOLIDUS character token, and a character
            // token for each of the characters in the temporary buffer.
            // Reconsume in the [RCDATA/RAWTEXT] state."
            _ => {
                self.abandon_raw_end_tag(content_state);
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace(c) => {
                // "Ignore the character."
            }
            Some('/' | '>') | None => {
                self.reprocess_in(TokenizerState::AfterAttributeName);
            }
            // "U+003D EQUALS SIGN (=) - This is an
            // unexpected-equals-sign-before-attribute-name parse error.
            // Start a new attribute... Set that attribute's name to the
            // current input character."
            Some('=') => {
                self.log_parse_error("unexpected-equals-sign-before-attribute-name");
                self.start_new_attribute();
                self.append_to_attribute_name('=');
                self.state = TokenizerState::AttributeName;
            }
            Some(_) => {
                self.start_new_attribute();
                self.reprocess_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace(c) => {
                self.reprocess_in(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') | None => {
                self.reprocess_in(TokenizerState::AfterAttributeName);
            }
            Some('=') => {
                self.state = TokenizerState::BeforeAttributeValue;
            }
            Some(c) if c.is_ascii_uppercase() => {
                self.append_to_attribute_name(c.to_ascii_lowercase());
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_attribute_name('\u{FFFD}');
            }
            // "U+0022 QUOTATION MARK (") / U+0027 APOSTROPHE (') /
            // U+003C LESS-THAN SIGN (<) - This is an
            // unexpected-character-in-attribute-name parse error. Treat it
            // as per the 'anything else' entry below."
            Some(c @ ('"' | '\'' | '<')) => {
                self.log_parse_error("unexpected-character-in-attribute-name");
                self.append_to_attribute_name(c);
            }
            Some(c) => {
                self.append_to_attribute_name(c);
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace(c) => {
                // "Ignore the character."
            }
            Some('/') => {
                self.state = TokenizerState::SelfClosingStartTag;
            }
            Some('=') => {
                self.state = TokenizerState::BeforeAttributeValue;
            }
            Some('>') => {
                self.state = TokenizerState::Data;
                self.emit_current_tag();
            }
            None => {
                self.log_parse_error("eof-in-tag");
                self.finish();
            }
            Some(_) => {
                self.start_new_attribute();
                self.reprocess_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace(c) => {
                // "Ignore the character."
            }
            Some('"') => {
                self.state = TokenizerState::AttributeValueDoubleQuoted;
            }
            Some('\'') => {
                self.state = TokenizerState::AttributeValueSingleQuoted;
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a
            // missing-attribute-value parse error. Switch to the data
            // state. Emit the current tag token."
            Some('>') => {
                self.log_parse_error("missing-attribute-value");
                self.state = TokenizerState::Data;
                self.emit_current_tag();
            }
            _ => {
                self.reprocess_in(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    fn handle_attribute_value_double_quoted_state(&mut self) {
        match self.current_input_character {
            Some('"') => {
                self.state = TokenizerState::AfterAttributeValueQuoted;
            }
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueDoubleQuoted);
                self.state = TokenizerState::CharacterReference;
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_attribute_value('\u{FFFD}');
            }
            None => {
                self.log_parse_error("eof-in-tag");
                self.finish();
            }
            Some(c) => {
                self.append_to_attribute_value(c);
            }
        }
    }

    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_single_quoted_state(&mut self) {
        match self.current_input_character {
            Some('\'') => {
                self.state = TokenizerState::AfterAttributeValueQuoted;
            }
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueSingleQuoted);
                self.state = TokenizerState::CharacterReference;
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_attribute_value('\u{FFFD}');
            }
            None => {
                self.log_parse_error("eof-in-tag");
                self.finish();
            }
            Some(c) => {
                self.append_to_attribute_value(c);
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace(c) => {
                self.state = TokenizerState::BeforeAttributeName;
            }
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueUnquoted);
                self.state = TokenizerState::CharacterReference;
            }
            Some('>') => {
                self.state = TokenizerState::Data;
                self.emit_current_tag();
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_attribute_value('\u{FFFD}');
            }
            // "This is an unexpected-character-in-unquoted-attribute-value
            // parse error. Treat it as per the 'anything else' entry below."
            Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.log_parse_error("unexpected-character-in-unquoted-attribute-value");
                self.append_to_attribute_value(c);
            }
            None => {
                self.log_parse_error("eof-in-tag");
                self.finish();
            }
            Some(c) => {
                self.append_to_attribute_value(c);
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace(c) => {
                self.state = TokenizerState::BeforeAttributeName;
            }
            Some('/') => {
                self.state = TokenizerState::SelfClosingStartTag;
            }
            Some('>') => {
                self.state = TokenizerState::Data;
                self.emit_current_tag();
            }
            None => {
                self.log_parse_error("eof-in-tag");
                self.finish();
            }
            Some(_) => {
                self.log_parse_error("missing-whitespace-between-attributes");
                self.reprocess_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            // "U+003E GREATER-THAN SIGN (>) - Set the self-closing flag of
            // the current tag token. Switch to the data state. Emit the
            // current tag token."
            Some('>') => {
                if let Some(tag) = self.current_tag.as_mut() {
                    tag.self_closing = true;
                }
                self.state = TokenizerState::Data;
                self.emit_current_tag();
            }
            None => {
                self.log_parse_error("eof-in-tag");
                self.finish();
            }
            Some(_) => {
                self.log_parse_error("unexpected-solidus-in-tag");
                self.reprocess_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.state = TokenizerState::Data;
                self.emit_current_comment();
            }
            None => {
                self.emit_current_comment();
                self.finish();
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_comment('\u{FFFD}');
            }
            Some(c) => {
                self.append_to_comment(c);
            }
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// The lookahead here works on the current character plus peeked input;
    /// nothing extra is consumed unless a construct matches.
    fn handle_markup_declaration_open_state(&mut self) {
        match self.current_input_character {
            // "Two U+002D HYPHEN-MINUS characters (-) - Consume those two
            // characters, create a comment token whose data is the empty
            // string, and switch to the comment start state."
            Some('-') if self.peek(0) == Some('-') => {
                let _ = self.next_char();
                self.current_comment = Some(String::new());
                self.state = TokenizerState::CommentStart;
            }
            // "ASCII case-insensitive match for the word 'DOCTYPE'"
            Some('d' | 'D') if self.lookahead_is_ignore_case("OCTYPE") => {
                self.advance_by(6);
                self.state = TokenizerState::Doctype;
            }
            // "The string '[CDATA[' ... this is a cdata-in-html-content
            // parse error. Create a comment token whose data is the
            // '[CDATA[' string. Switch to the bogus comment state."
            Some('[') if self.lookahead_is("CDATA[") => {
                self.advance_by(6);
                self.log_parse_error("cdata-in-html-content");
                self.current_comment = Some(String::from("[CDATA["));
                self.state = TokenizerState::BogusComment;
            }
            // "Anything else - This is an incorrectly-opened-comment parse
            // error. Create a comment token whose data is the empty string.
            // Switch to the bogus comment state (don't consume anything in
            // the current state)."
            _ => {
                self.log_parse_error("incorrectly-opened-comment");
                self.current_comment = Some(String::new());
                self.reprocess_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.state = TokenizerState::CommentStartDash;
            }
            Some('>') => {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.state = TokenizerState::Data;
                self.emit_current_comment();
            }
            _ => {
                self.reprocess_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.state = TokenizerState::CommentEnd;
            }
            Some('>') => {
                self.log_parse_error("abrupt-closing-of-empty-comment");
                self.state = TokenizerState::Data;
                self.emit_current_comment();
            }
            None => {
                self.log_parse_error("eof-in-comment");
                self.emit_current_comment();
                self.finish();
            }
            Some(_) => {
                self.append_to_comment('-');
                self.reprocess_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            // "U+003C LESS-THAN SIGN (<) - Append the current input
            // character to the comment token's data. Switch to the comment
            // less-than sign state."
            Some('<') => {
                self.append_to_comment('<');
                self.state = TokenizerState::CommentLessThanSign;
            }
            Some('-') => {
                self.state = TokenizerState::CommentEndDash;
            }
            Some('\0') => {
                self.log_parse_error("unexpected-null-character");
                self.append_to_comment('\u{FFFD}');
            }
            None => {
                self.log_parse_error("eof-in-comment");
                self.emit_current_comment();
                self.finish();
            }
            Some(c) => {
                self.append_to_comment(c);
            }
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    fn handle_comment_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('!') => {
                self.append_to_comment('!');
                self.state = TokenizerState::CommentLessThanSignBang;
            }
            Some('<') => {
                self.append_to_comment('<');
            }
            _ => {
                self.reprocess_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    fn handle_comment_less_than_sign_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.state = TokenizerState::CommentLessThanSignBangDash;
            }
            _ => {
                self.reprocess_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    fn handle_comment_less_than_sign_bang_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.state = TokenizerState::CommentLessThanSignBangDashDash;
            }
            _ => {
                self.reprocess_in(TokenizerState::CommentEndDash);
            }
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    fn handle_comment_less_than_sign_bang_dash_dash_state(&mut self) {
        match self.current_input_character {
            Some('>') | None => {
                self.reprocess_in(TokenizerState::CommentEnd);
            }
            Some(_) => {
                self.log_parse_error("nested-comment");
                self.reprocess_in(TokenizerState::CommentEnd);
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.state = TokenizerState::CommentEnd;
            }
            None => {
                self.log_parse_error("eof-in-comment");
                self.emit_current_comment();
                self.finish();
            }
            Some(_) => {
                self.append_to_comment('-');
                self.reprocess_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.state = TokenizerState::Data;
                self.emit_current_comment();
            }
            Some('!') => {
                self.state = TokenizerState::CommentEndBang;
            }
            // "U+002D HYPHEN-MINUS (-) - Append a U+002D HYPHEN-MINUS
            // character (-) to the comment token's data."
            Some('-') => {
                self.append_to_comment('-');
            }
            None => {
                self.log_parse_error("eof-in-comment");
                self.emit_current_comment();
                self.finish();
            }
            Some(_) => {
                self.append_to_comment('-');
                self.append_to_comment('-');
                self.reprocess_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    fn handle_comment_end_bang_state(&mut self) {
        match self.current_input_character {
            Some('-') => {
                self.append_to_comment_str("--!");
                self.state = TokenizerState::CommentEndDash;
            }
            Some('>') => {
                self.log_parse_error("incorrectly-closed-comment");
                self.state = TokenizerState::Data;
                self.emit_current_comment();
            }
            None => {
                self.log_parse_error("eof-in-comment");
                self.emit_current_comment();
                self.finish();
            }
            Some(_) => {
                self.append_to_comment_str("--!");
                self.reprocess_in(TokenizerState::Comment);
            }
        }
    }

    /// Collapsed DOCTYPE handling: the scraping token model has no doctype
    /// variant, so the declaration body is consumed up to the closing `>`
    /// and discarded.
    fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                self.state = TokenizerState::Data;
            }
            None => {
                self.log_parse_error("eof-in-doctype");
                self.finish();
            }
            Some(_) => {
                // Discard.
            }
        }
    }
}
