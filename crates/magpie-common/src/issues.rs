//! Reporting for tolerated input problems.
//!
//! Scraped HTML is untrusted and routinely broken, and the engine's
//! contract is to keep going: a mis-nested tag or a bogus character
//! reference degrades the result, it never aborts the run. This module
//! is where those degradations become visible. Each pipeline stage
//! [`report`]s the problems it tolerates under a stable kind name; the
//! first sighting of each `(stage, kind)` pair gets one stderr line,
//! repeats only bump a counter, and callers that want the whole picture
//! after a run read it back with [`tally`].

use std::collections::HashMap;
use std::io::IsTerminal;
use std::sync::Mutex;

/// The pipeline stage that observed a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    /// Lexing the raw markup (WHATWG parse errors).
    Tokenize,
    /// Tag pairing and region-forest construction.
    Structure,
    /// Selector evaluation and extraction.
    Extract,
}

impl Stage {
    const fn label(self) -> &'static str {
        match self {
            Self::Tokenize => "tokenize",
            Self::Structure => "structure",
            Self::Extract => "extract",
        }
    }
}

/// Occurrence counts, keyed by stage and kind.
static TALLY: Mutex<Option<HashMap<(Stage, String), u64>>> = Mutex::new(None);

/// Record a tolerated input problem.
///
/// `kind` must be a stable, page-independent name; the WHATWG parse
/// error codes are the model. Page-specific detail would keep every
/// report unique and defeat the collapsing of repeats.
///
/// # Panics
/// Panics if the tally mutex is poisoned.
pub fn report(stage: Stage, kind: &str) {
    let mut guard = TALLY.lock().unwrap();
    let counts = guard.get_or_insert_with(HashMap::new);
    let seen = counts.entry((stage, kind.to_string())).or_insert(0);
    *seen += 1;
    if *seen == 1 {
        announce(stage, kind);
    }
}

/// One stderr line per problem kind, amber when stderr is a terminal.
fn announce(stage: Stage, kind: &str) {
    let line = format!("magpie: tolerated {} problem: {kind}", stage.label());
    if std::io::stderr().is_terminal() {
        eprintln!("\x1b[33m{line}\x1b[0m");
    } else {
        eprintln!("{line}");
    }
}

/// Everything reported so far, with occurrence counts, in a stable
/// order.
///
/// # Panics
/// Panics if the tally mutex is poisoned.
#[must_use]
pub fn tally() -> Vec<(Stage, String, u64)> {
    let guard = TALLY.lock().unwrap();
    let mut entries: Vec<(Stage, String, u64)> = guard
        .as_ref()
        .map(|counts| {
            counts
                .iter()
                .map(|((stage, kind), seen)| (*stage, kind.clone(), *seen))
                .collect()
        })
        .unwrap_or_default();
    entries.sort();
    entries
}

/// Forget everything reported so far. Call between documents when one
/// process scrapes many.
///
/// # Panics
/// Panics if the tally mutex is poisoned.
pub fn reset() {
    let mut guard = TALLY.lock().unwrap();
    if let Some(counts) = guard.as_mut() {
        counts.clear();
    }
}
