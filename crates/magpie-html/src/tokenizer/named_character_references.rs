//! Named character reference lookup table.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! The full spec defines 2,231 entities. Scraped pages overwhelmingly use
//! a small core set, so the table covers the entities that actually occur
//! in the wild; unknown references pass through verbatim, which is the
//! right behavior for extraction (the original bytes are preserved).

use std::collections::HashMap;
use std::sync::LazyLock;

/// The table, as (identifier, replacement) pairs. Identifiers keep their
/// trailing semicolon; the semicolon-less duplicates are the legacy forms
/// browsers still honor in old markup (`&amp` for `&amp;`). Some
/// replacements are strings, not single characters, which is why the
/// value side is `&str`.
const ENTRIES: &[(&str, &str)] = &[
    // The five predefined entities plus their legacy forms
    ("amp;", "&"),
    ("amp", "&"),
    ("lt;", "<"),
    ("lt", "<"),
    ("gt;", ">"),
    ("gt", ">"),
    ("quot;", "\""),
    ("quot", "\""),
    ("apos;", "'"),
    // Spacing and typography
    ("nbsp;", "\u{00A0}"),
    ("nbsp", "\u{00A0}"),
    ("ensp;", "\u{2002}"),
    ("emsp;", "\u{2003}"),
    ("thinsp;", "\u{2009}"),
    ("shy;", "\u{00AD}"),
    ("mdash;", "\u{2014}"),
    ("ndash;", "\u{2013}"),
    ("hellip;", "\u{2026}"),
    ("bull;", "\u{2022}"),
    ("middot;", "\u{00B7}"),
    ("dagger;", "\u{2020}"),
    ("Dagger;", "\u{2021}"),
    ("lsquo;", "\u{2018}"),
    ("rsquo;", "\u{2019}"),
    ("sbquo;", "\u{201A}"),
    ("ldquo;", "\u{201C}"),
    ("rdquo;", "\u{201D}"),
    ("bdquo;", "\u{201E}"),
    ("laquo;", "\u{00AB}"),
    ("raquo;", "\u{00BB}"),
    ("prime;", "\u{2032}"),
    ("Prime;", "\u{2033}"),
    ("sect;", "\u{00A7}"),
    ("para;", "\u{00B6}"),
    // Legal marks
    ("copy;", "\u{00A9}"),
    ("copy", "\u{00A9}"),
    ("reg;", "\u{00AE}"),
    ("reg", "\u{00AE}"),
    ("trade;", "\u{2122}"),
    // Currency
    ("cent;", "\u{00A2}"),
    ("pound;", "\u{00A3}"),
    ("curren;", "\u{00A4}"),
    ("yen;", "\u{00A5}"),
    ("euro;", "\u{20AC}"),
    // Math and comparison
    ("times;", "\u{00D7}"),
    ("divide;", "\u{00F7}"),
    ("plusmn;", "\u{00B1}"),
    ("minus;", "\u{2212}"),
    ("ne;", "\u{2260}"),
    ("le;", "\u{2264}"),
    ("ge;", "\u{2265}"),
    ("deg;", "\u{00B0}"),
    ("micro;", "\u{00B5}"),
    ("infin;", "\u{221E}"),
    ("frac12;", "\u{00BD}"),
    ("frac14;", "\u{00BC}"),
    ("frac34;", "\u{00BE}"),
    ("sup1;", "\u{00B9}"),
    ("sup2;", "\u{00B2}"),
    ("sup3;", "\u{00B3}"),
    // Arrows
    ("larr;", "\u{2190}"),
    ("uarr;", "\u{2191}"),
    ("rarr;", "\u{2192}"),
    ("darr;", "\u{2193}"),
    ("harr;", "\u{2194}"),
    // Greek letters commonly seen in article text
    ("alpha;", "\u{03B1}"),
    ("beta;", "\u{03B2}"),
    ("gamma;", "\u{03B3}"),
    ("delta;", "\u{03B4}"),
    ("epsilon;", "\u{03B5}"),
    ("lambda;", "\u{03BB}"),
    ("mu;", "\u{03BC}"),
    ("pi;", "\u{03C0}"),
    ("sigma;", "\u{03C3}"),
    ("omega;", "\u{03C9}"),
    ("Omega;", "\u{03A9}"),
    // Latin-1 accented letters
    ("Agrave;", "\u{00C0}"),
    ("Aacute;", "\u{00C1}"),
    ("Acirc;", "\u{00C2}"),
    ("Atilde;", "\u{00C3}"),
    ("Auml;", "\u{00C4}"),
    ("Aring;", "\u{00C5}"),
    ("AElig;", "\u{00C6}"),
    ("agrave;", "\u{00E0}"),
    ("aacute;", "\u{00E1}"),
    ("acirc;", "\u{00E2}"),
    ("atilde;", "\u{00E3}"),
    ("auml;", "\u{00E4}"),
    ("aring;", "\u{00E5}"),
    ("aelig;", "\u{00E6}"),
    ("Ccedil;", "\u{00C7}"),
    ("ccedil;", "\u{00E7}"),
    ("Egrave;", "\u{00C8}"),
    ("Eacute;", "\u{00C9}"),
    ("Ecirc;", "\u{00CA}"),
    ("Euml;", "\u{00CB}"),
    ("egrave;", "\u{00E8}"),
    ("eacute;", "\u{00E9}"),
    ("ecirc;", "\u{00EA}"),
    ("euml;", "\u{00EB}"),
    ("Igrave;", "\u{00CC}"),
    ("Iacute;", "\u{00CD}"),
    ("igrave;", "\u{00EC}"),
    ("iacute;", "\u{00ED}"),
    ("icirc;", "\u{00EE}"),
    ("iuml;", "\u{00EF}"),
    ("Ntilde;", "\u{00D1}"),
    ("ntilde;", "\u{00F1}"),
    ("Ograve;", "\u{00D2}"),
    ("Oacute;", "\u{00D3}"),
    ("Ocirc;", "\u{00D4}"),
    ("Otilde;", "\u{00D5}"),
    ("Ouml;", "\u{00D6}"),
    ("Oslash;", "\u{00D8}"),
    ("ograve;", "\u{00F2}"),
    ("oacute;", "\u{00F3}"),
    ("ocirc;", "\u{00F4}"),
    ("otilde;", "\u{00F5}"),
    ("ouml;", "\u{00F6}"),
    ("oslash;", "\u{00F8}"),
    ("Ugrave;", "\u{00D9}"),
    ("Uacute;", "\u{00DA}"),
    ("Ucirc;", "\u{00DB}"),
    ("Uuml;", "\u{00DC}"),
    ("ugrave;", "\u{00F9}"),
    ("uacute;", "\u{00FA}"),
    ("ucirc;", "\u{00FB}"),
    ("uuml;", "\u{00FC}"),
    ("szlig;", "\u{00DF}"),
    ("yuml;", "\u{00FF}"),
];

/// Identifier-to-replacement map, built once from [`ENTRIES`].
static BY_NAME: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ENTRIES.iter().copied().collect());

/// The replacement text for an entity identifier, given without the
/// leading '&'.
pub(super) fn replacement_for(name: &str) -> Option<&'static str> {
    BY_NAME.get(name).copied()
}

/// Whether any identifier in the table begins with `prefix`. Drives the
/// tokenizer's longest-match scan: as long as the candidate is still a
/// prefix of something, a longer match may exist.
pub(super) fn is_entity_prefix(prefix: &str) -> bool {
    ENTRIES.iter().any(|(name, _)| name.starts_with(prefix))
}
