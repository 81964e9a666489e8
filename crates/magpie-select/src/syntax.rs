//! The selector string syntax.
//!
//! A small CSS-flavoured surface over the selector algebra, for callers
//! (the CLI, configuration files) that take selectors as text:
//!
//! - `article`: [`tag`]
//! - `*`: [`any`]
//! - `.title`: [`has_class`] predicate (substring containment, like the
//!   programmatic predicate)
//! - `#main`: `attribute("id", "main")` predicate
//! - `[href]` / `[rel=nofollow]` / `[rel="nofollow"]`: attribute
//!   predicates
//! - `a b`: [`nested`] (descendant at any depth)
//! - `a > b`: [`nested`] with the child constrained to depth 1
//!
//! Pieces compose onto one compound: `div.card[data-kind=news]` is a
//! single step. Anything else is a syntax error; unlike document parsing,
//! selector strings are written by the caller and deserve loud failures.

use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

use crate::predicate::{AttributePredicate, attr_satisfies, attribute, has_class};
use crate::selector::{Selector, any_with, nested, tag_with};

/// Why a selector string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorSyntaxError {
    /// The input contained no selector at all.
    #[error("empty selector")]
    Empty,
    /// A character that cannot start or continue any construct.
    #[error("unexpected character `{found}` at byte {position}")]
    UnexpectedCharacter {
        /// The offending character.
        found: char,
        /// Its byte offset in the input.
        position: usize,
    },
    /// `.`, `#`, or `[` without the identifier it requires.
    #[error("expected an identifier after `{after}` at byte {position}")]
    MissingIdentifier {
        /// The introducing character.
        after: char,
        /// Byte offset of the introducing character.
        position: usize,
    },
    /// An attribute selector with no closing `]`.
    #[error("unterminated attribute selector opened at byte {position}")]
    UnterminatedAttribute {
        /// Byte offset of the opening `[`.
        position: usize,
    },
    /// A `>` with no selector on one of its sides.
    #[error("combinator `>` is missing an operand")]
    DanglingCombinator,
}

/// How the next compound attaches to the selector built so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

/// One compound under construction: at most one tag name plus predicates.
#[derive(Default)]
struct CompoundParts {
    name: Option<String>,
    universal: bool,
    predicates: Vec<AttributePredicate>,
}

impl CompoundParts {
    fn is_empty(&self) -> bool {
        self.name.is_none() && !self.universal && self.predicates.is_empty()
    }

    fn into_selector(self) -> Selector {
        match self.name {
            Some(name) => tag_with(&name, self.predicates),
            None => any_with(self.predicates),
        }
    }
}

/// Check if a character can start an identifier.
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Check if a character can continue an identifier.
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

/// Parse a selector string.
///
/// # Errors
///
/// Returns a [`SelectorSyntaxError`] describing the first problem found;
/// the error carries byte positions for the CLI to report.
pub fn parse_selector(input: &str) -> Result<Selector, SelectorSyntaxError> {
    let mut chars = input.char_indices().peekable();
    let mut completed: Option<Selector> = None;
    let mut pending = Combinator::Descendant;
    // True between consuming a `>` and committing the compound it awaits.
    let mut awaiting_operand = false;
    let mut current = CompoundParts::default();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            _ if c.is_ascii_whitespace() => {
                skip_whitespace(&mut chars);
                // Whitespace is the descendant combinator unless an
                // explicit combinator or the end of input follows.
                if matches!(chars.peek(), Some(&(_, '>')) | None) {
                    continue;
                }
                if !current.is_empty() {
                    commit(&mut completed, &mut pending, &mut current);
                    awaiting_operand = false;
                }
            }
            '>' => {
                let _ = chars.next();
                if !current.is_empty() {
                    commit(&mut completed, &mut pending, &mut current);
                    awaiting_operand = false;
                }
                if completed.is_none() || awaiting_operand {
                    return Err(SelectorSyntaxError::DanglingCombinator);
                }
                pending = Combinator::Child;
                awaiting_operand = true;
                skip_whitespace(&mut chars);
            }
            '*' => {
                let _ = chars.next();
                current.universal = true;
            }
            '.' => {
                let _ = chars.next();
                let class = read_identifier(&mut chars);
                if class.is_empty() {
                    return Err(SelectorSyntaxError::MissingIdentifier {
                        after: '.',
                        position,
                    });
                }
                current.predicates.push(has_class(&class));
            }
            '#' => {
                let _ = chars.next();
                let id = read_identifier(&mut chars);
                if id.is_empty() {
                    return Err(SelectorSyntaxError::MissingIdentifier {
                        after: '#',
                        position,
                    });
                }
                current.predicates.push(attribute("id", &id));
            }
            '[' => {
                let _ = chars.next();
                let predicate = parse_attribute_selector(&mut chars, position)?;
                current.predicates.push(predicate);
            }
            _ if is_ident_start_char(c) => {
                let name = read_identifier(&mut chars);
                current.name = Some(name);
            }
            _ => {
                return Err(SelectorSyntaxError::UnexpectedCharacter {
                    found: c,
                    position,
                });
            }
        }
    }

    if !current.is_empty() {
        commit(&mut completed, &mut pending, &mut current);
        awaiting_operand = false;
    }
    if awaiting_operand {
        return Err(SelectorSyntaxError::DanglingCombinator);
    }
    completed.ok_or(SelectorSyntaxError::Empty)
}

/// Attach the finished compound to the selector built so far.
fn commit(
    completed: &mut Option<Selector>,
    pending: &mut Combinator,
    current: &mut CompoundParts,
) {
    let compound = std::mem::take(current).into_selector();
    *completed = Some(match completed.take() {
        None => compound,
        Some(parent) => match pending {
            Combinator::Descendant => nested(parent, compound),
            Combinator::Child => nested(parent, compound.at_depth(1)),
        },
    });
    *pending = Combinator::Descendant;
}

fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
    while chars.peek().is_some_and(|&(_, c)| c.is_ascii_whitespace()) {
        let _ = chars.next();
    }
}

fn read_identifier(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if is_ident_char(c) {
            ident.push(c);
            let _ = chars.next();
        } else {
            break;
        }
    }
    ident
}

/// Parse the inside of `[…]`; the opening bracket is already consumed.
fn parse_attribute_selector(
    chars: &mut Peekable<CharIndices<'_>>,
    opened_at: usize,
) -> Result<AttributePredicate, SelectorSyntaxError> {
    skip_whitespace(chars);
    let key = read_identifier(chars);
    if key.is_empty() {
        return Err(SelectorSyntaxError::MissingIdentifier {
            after: '[',
            position: opened_at,
        });
    }
    skip_whitespace(chars);

    match chars.peek() {
        // `[key]`: existence check.
        Some(&(_, ']')) => {
            let _ = chars.next();
            Ok(attr_satisfies(move |name, _| {
                name.eq_ignore_ascii_case(&key)
            }))
        }
        // `[key=value]`: exact value.
        Some(&(_, '=')) => {
            let _ = chars.next();
            skip_whitespace(chars);
            let value = parse_attribute_value(chars, opened_at)?;
            skip_whitespace(chars);
            match chars.next() {
                Some((_, ']')) => Ok(attribute(&key, &value)),
                _ => Err(SelectorSyntaxError::UnterminatedAttribute {
                    position: opened_at,
                }),
            }
        }
        Some(&(position, found)) => Err(SelectorSyntaxError::UnexpectedCharacter {
            found,
            position,
        }),
        None => Err(SelectorSyntaxError::UnterminatedAttribute {
            position: opened_at,
        }),
    }
}

/// An attribute value: quoted (either quote character) or a bare token
/// running to the closing bracket.
fn parse_attribute_value(
    chars: &mut Peekable<CharIndices<'_>>,
    opened_at: usize,
) -> Result<String, SelectorSyntaxError> {
    match chars.peek() {
        Some(&(_, quote @ ('"' | '\''))) => {
            let _ = chars.next();
            let mut value = String::new();
            for (_, c) in chars.by_ref() {
                if c == quote {
                    return Ok(value);
                }
                value.push(c);
            }
            Err(SelectorSyntaxError::UnterminatedAttribute {
                position: opened_at,
            })
        }
        _ => {
            let mut value = String::new();
            while let Some(&(_, c)) = chars.peek() {
                if c == ']' || c.is_ascii_whitespace() {
                    break;
                }
                value.push(c);
                let _ = chars.next();
            }
            Ok(value)
        }
    }
}
