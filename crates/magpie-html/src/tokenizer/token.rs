use core::fmt;

/// An attribute on an opening tag.
///
/// Per [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
/// "a list of attributes, each of which has a name and a value"
///
/// Attribute names are lowercased by the tokenizer; values are kept
/// verbatim. Downstream matching compares names case-insensitively and
/// values case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// "each of which has a name"
    pub name: String,
    /// "and a value"
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// A lexed HTML event.
///
/// This is the flat stream the scraping engine consumes: the tokenizer has
/// already folded character data into runs, resolved character references,
/// and discarded DOCTYPE declarations. Self-closing tags appear as a lone
/// `TagOpen`; the annotator downstream treats an opening tag without a
/// matching `TagClose` as a degenerate region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An opening tag with its attributes, e.g. `<a href="…">`.
    TagOpen {
        /// The lowercased tag name.
        name: String,
        /// The attributes, in source order, duplicates removed.
        attributes: Vec<Attribute>,
    },

    /// A closing tag, e.g. `</a>`. Attributes on closing tags are a parse
    /// error and are dropped.
    TagClose {
        /// The lowercased tag name.
        name: String,
    },

    /// A run of character data. Never empty.
    Text {
        /// The decoded text.
        text: String,
    },

    /// A comment, e.g. `<!-- … -->`.
    Comment {
        /// The comment data, without the `<!--`/`-->` delimiters.
        comment: String,
    },
}

impl Token {
    /// Create an opening tag token.
    #[must_use]
    pub const fn open(name: String, attributes: Vec<Attribute>) -> Self {
        Self::TagOpen { name, attributes }
    }

    /// Create a closing tag token.
    #[must_use]
    pub const fn close(name: String) -> Self {
        Self::TagClose { name }
    }

    /// Create a text token.
    #[must_use]
    pub const fn text(text: String) -> Self {
        Self::Text { text }
    }

    /// Create a comment token.
    #[must_use]
    pub const fn comment(comment: String) -> Self {
        Self::Comment { comment }
    }

    /// Returns true if this is an opening tag.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::TagOpen { .. })
    }

    /// Returns true if this is a closing tag.
    #[must_use]
    pub const fn is_close(&self) -> bool {
        matches!(self, Self::TagClose { .. })
    }

    /// Returns true if this is a text run.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Returns true if this is a comment.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::Comment { .. })
    }

    /// The tag name, for opening and closing tags.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::TagOpen { name, .. } | Self::TagClose { name } => Some(name),
            _ => None,
        }
    }

    /// The attribute list. Empty for everything but opening tags.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        match self {
            Self::TagOpen { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Look up an attribute value by name, comparing names
    /// case-insensitively. Returns the first match in source order.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value.as_str())
    }

    /// The character data, for text tokens.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Serialize a token back to HTML source.
///
/// Opening tags render as `<name k1="v1" k2="v2">` with attributes in
/// source order and exactly one space before each attribute; closing tags
/// as `</name>`; text verbatim; comments as `<!--…-->`. This rendering is
/// what the `html`/`inner_html` extractors produce.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TagOpen { name, attributes } => {
                write!(f, "<{name}")?;
                for attr in attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                write!(f, ">")
            }
            Self::TagClose { name } => {
                write!(f, "</{name}>")
            }
            Self::Text { text } => {
                write!(f, "{text}")
            }
            Self::Comment { comment } => {
                write!(f, "<!--{comment}-->")
            }
        }
    }
}
