//! Serial (zipper-based) sibling navigation.
//!
//! Hierarchical selection answers "find every X anywhere"; some documents
//! instead encode meaning in *order*: a heading, then its paragraphs,
//! then the next heading. [`SpecZipper`] walks a sequence of sibling
//! regions with a movable focus for exactly those cases.
//!
//! # The sentinel design
//!
//! Every element of the zipper is an `Option<TagSpec>`, and the sequence
//! is padded with a `None` sentinel at each end; the initial focus is the
//! leading sentinel. Reading a sentinel focus fails, but *standing* on
//! one is a valid state; it is the only way `step_next` can reach the
//! first real element, and the only way a walk can run off either end and
//! notice.
//!
//! # State discipline
//!
//! Primitives that fail leave the zipper exactly where it was; primitives
//! that succeed leave the focus on the element they consumed. That makes
//! `?`-sequencing and `or_else` alternatives compose without surprises,
//! and a caller that wants speculative multi-step lookahead can clone the
//! zipper as a checkpoint. Cloning is cheap because every spec inside
//! shares the document's token buffer.

use magpie_dom::TagSpec;

/// A focused sequence of optional sibling specs.
///
/// `lefts` and `rights` are stacks with the element nearest the focus on
/// top. The sentinels live in the stacks like any other element, so
/// movement is symmetric: step off the last real element and the focus
/// becomes the trailing `None`; step again and the move itself fails.
#[derive(Debug, Clone)]
pub struct SpecZipper {
    lefts: Vec<Option<TagSpec>>,
    focus: Option<TagSpec>,
    rights: Vec<Option<TagSpec>>,
}

/// Run a serial scraper over a spec's sibling sequence.
///
/// Inside a chroot (a spec that selection narrowed to one region) the
/// sequence is the region's immediate children; otherwise it is the
/// spec's top-level sibling regions. Each focused element sees the same
/// shared token vector and the enclosing context.
pub fn in_serial<T>(spec: &TagSpec, scraper: impl FnOnce(&mut SpecZipper) -> Option<T>) -> Option<T> {
    let mut zipper = SpecZipper::for_spec(spec);
    scraper(&mut zipper)
}

impl SpecZipper {
    /// The zipper for a spec, per the [`in_serial`] rooting rule.
    #[must_use]
    pub fn for_spec(spec: &TagSpec) -> Self {
        let trees = if spec.context.in_chroot && spec.hierarchy.len() == 1 {
            spec.hierarchy[0].children.clone()
        } else {
            spec.hierarchy.clone()
        };
        let specs = trees
            .into_iter()
            .map(|tree| TagSpec::new(spec.context, vec![tree], spec.tags.clone()))
            .collect();
        Self::from_specs(specs)
    }

    /// Wrap a forward sequence: focus on the leading sentinel, the specs
    /// and then the trailing sentinel to the right.
    fn from_specs(specs: Vec<TagSpec>) -> Self {
        let mut rights: Vec<Option<TagSpec>> = vec![None];
        for spec in specs.into_iter().rev() {
            rights.push(Some(spec));
        }
        Self {
            lefts: Vec::new(),
            focus: None,
            rights,
        }
    }

    /// Wrap a backward-collected sequence (nearest element first): focus
    /// on the trailing sentinel, ready to be walked with the `back`
    /// primitives.
    fn from_specs_backward(specs: Vec<TagSpec>) -> Self {
        let mut lefts: Vec<Option<TagSpec>> = vec![None];
        for spec in specs.into_iter().rev() {
            lefts.push(Some(spec));
        }
        Self {
            lefts,
            focus: None,
            rights: Vec::new(),
        }
    }

    /// Move the focus one element toward the end. Fails (without moving)
    /// only when already past the trailing sentinel.
    fn down(&mut self) -> bool {
        match self.rights.pop() {
            Some(next) => {
                let old = std::mem::replace(&mut self.focus, next);
                self.lefts.push(old);
                true
            }
            None => false,
        }
    }

    /// Move the focus one element toward the start.
    fn up(&mut self) -> bool {
        match self.lefts.pop() {
            Some(previous) => {
                let old = std::mem::replace(&mut self.focus, previous);
                self.rights.push(old);
                true
            }
            None => false,
        }
    }

    /// Step forward once and scrape the new focus. Fails, with the
    /// zipper unmoved, when there is nowhere to step, the new focus is a
    /// sentinel, or the scraper itself fails.
    pub fn step_next<T>(&mut self, scraper: impl FnOnce(&TagSpec) -> Option<T>) -> Option<T> {
        self.step_with(Self::down, Self::up, scraper)
    }

    /// Step backward once and scrape the new focus.
    pub fn step_back<T>(&mut self, scraper: impl FnOnce(&TagSpec) -> Option<T>) -> Option<T> {
        self.step_with(Self::up, Self::down, scraper)
    }

    fn step_with<T>(
        &mut self,
        forward: fn(&mut Self) -> bool,
        backward: fn(&mut Self) -> bool,
        scraper: impl FnOnce(&TagSpec) -> Option<T>,
    ) -> Option<T> {
        if !forward(self) {
            return None;
        }
        let result = self.focus.as_ref().and_then(|spec| scraper(spec));
        if result.is_none() {
            backward(self);
        }
        result
    }

    /// Step forward until the scraper succeeds, leaving the focus on the
    /// matched element. Fails (restoring the original position) when
    /// the sequence runs out first.
    pub fn seek_next<T>(&mut self, scraper: impl FnMut(&TagSpec) -> Option<T>) -> Option<T> {
        self.seek_with(Self::down, Self::up, scraper)
    }

    /// Step backward until the scraper succeeds.
    pub fn seek_back<T>(&mut self, scraper: impl FnMut(&TagSpec) -> Option<T>) -> Option<T> {
        self.seek_with(Self::up, Self::down, scraper)
    }

    fn seek_with<T>(
        &mut self,
        forward: fn(&mut Self) -> bool,
        backward: fn(&mut Self) -> bool,
        mut scraper: impl FnMut(&TagSpec) -> Option<T>,
    ) -> Option<T> {
        let mut moves = 0;
        loop {
            if !forward(self) {
                for _ in 0..moves {
                    backward(self);
                }
                return None;
            }
            moves += 1;
            if let Some(spec) = self.focus.as_ref()
                && let Some(value) = scraper(spec)
            {
                return Some(value);
            }
        }
    }

    /// Run an inner serial scraper over the elements *after* the focus,
    /// bounded by the first element `until` accepts (exclusive). The
    /// bounded elements become a fresh zipper with sentinels at both
    /// ends and the focus at the leading one; the outer zipper does not
    /// move.
    ///
    /// With an `until` that never succeeds, the bound is the end of the
    /// sequence.
    pub fn until_next<T, U>(
        &mut self,
        until: impl FnMut(&TagSpec) -> Option<U>,
        inner: impl FnOnce(&mut SpecZipper) -> Option<T>,
    ) -> Option<T> {
        let collected = self.collect_bounded(Self::down, until);
        let mut sub = Self::from_specs(collected);
        inner(&mut sub)
    }

    /// Run an inner serial scraper over the elements *before* the focus,
    /// bounded by the first element `until` accepts, walking backward.
    /// The sub-zipper starts at its trailing sentinel, so the inner
    /// scraper navigates it with the `back` primitives.
    pub fn until_back<T, U>(
        &mut self,
        until: impl FnMut(&TagSpec) -> Option<U>,
        inner: impl FnOnce(&mut SpecZipper) -> Option<T>,
    ) -> Option<T> {
        let collected = self.collect_bounded(Self::up, until);
        let mut sub = Self::from_specs_backward(collected);
        inner(&mut sub)
    }

    /// Probe outward from the focus on a clone, collecting real elements
    /// until `until` accepts one or the sequence ends. Sentinels along
    /// the way are skipped rather than collected; the sub-zipper gets
    /// fresh ones.
    fn collect_bounded<U>(
        &self,
        forward: fn(&mut Self) -> bool,
        mut until: impl FnMut(&TagSpec) -> Option<U>,
    ) -> Vec<TagSpec> {
        let mut probe = self.clone();
        let mut collected = Vec::new();
        while forward(&mut probe) {
            if let Some(spec) = probe.focus.as_ref() {
                if until(spec).is_some() {
                    break;
                }
                collected.push(spec.clone());
            }
        }
        collected
    }

    /// Run a serial scraper repeatedly, collecting results until it
    /// fails. Never fails itself; an immediately failing scraper yields
    /// an empty list. The scraper must make progress on success or this
    /// will not terminate.
    pub fn repeat<T>(&mut self, mut scraper: impl FnMut(&mut SpecZipper) -> Option<T>) -> Vec<T> {
        let mut results = Vec::new();
        while let Some(value) = scraper(self) {
            results.push(value);
        }
        results
    }

    /// Like [`Self::repeat`], but fails when the first run fails.
    pub fn repeat1<T>(
        &mut self,
        mut scraper: impl FnMut(&mut SpecZipper) -> Option<T>,
    ) -> Option<Vec<T>> {
        let first = scraper(self)?;
        let mut results = vec![first];
        while let Some(value) = scraper(self) {
            results.push(value);
        }
        Some(results)
    }

    /// The number of real elements remaining after the focus. Intended
    /// for tests and diagnostics.
    #[must_use]
    pub fn remaining_ahead(&self) -> usize {
        self.rights.iter().filter(|slot| slot.is_some()).count()
    }

    /// The number of real elements before the focus.
    #[must_use]
    pub fn remaining_behind(&self) -> usize {
        self.lefts.iter().filter(|slot| slot.is_some()).count()
    }
}
