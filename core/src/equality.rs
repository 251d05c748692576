//! Structural equality of datums.
//!
//! Lists and arrays are compared element-wise. To terminate on self-referential structures, the
//! comparison records the containers being compared on each side in two parallel stacks, one
//! entry per nesting level. When a pair of containers is reached again, it's considered equal if
//! both sides were entered at the same level, and unequal otherwise. The stacks live in an
//! [EqualityContext] scoped to one top-level comparison.

use crate::datum::{Datum, DatumContentRef};

/// The traversal state of a structural comparison.
#[derive(Debug, Default)]
pub struct EqualityContext {
    visited: Vec<usize>,
    other_visited: Vec<usize>,
}

impl EqualityContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares `left` and `right`. Datums of different variants are never equal, and a datum is
    /// always equal to itself. Words are compared as described in
    /// [crate::datum::WordBody::is_equal], lists and arrays structurally, and other datums by
    /// identity.
    pub fn datums_equal(&mut self, left: &Datum, right: &Datum, ignore_case: bool) -> bool {
        if left.tag() != right.tag() {
            return false;
        }

        if left.phys_eq(right) {
            return true;
        }

        match (left.content_ref(), right.content_ref()) {
            (DatumContentRef::Word(l), DatumContentRef::Word(r)) => l.is_equal(r, ignore_case),
            (DatumContentRef::List(_), DatumContentRef::List(_))
            | (DatumContentRef::Array(_), DatumContentRef::Array(_)) => {
                self.containers_equal(left, right, ignore_case)
            }
            (DatumContentRef::Nothing, DatumContentRef::Nothing) => true,
            _ => false,
        }
    }

    fn containers_equal(&mut self, left: &Datum, right: &Datum, ignore_case: bool) -> bool {
        let level = self.visited.iter().position(|id| *id == left.id());
        let other_level = self.other_visited.iter().position(|id| *id == right.id());

        if level != other_level {
            log::trace!("containers revisited at different levels ({level:?}, {other_level:?})");
            return self.unequal();
        }

        if level.is_some() {
            log::trace!("containers revisited at level {level:?}, assuming equality");
            return true;
        }

        let size = left.size();

        if size != right.size() {
            return self.unequal();
        }

        self.visited.push(left.id());
        self.other_visited.push(right.id());

        let mut items = left.cursor();
        let mut other_items = right.cursor();

        for _ in 0..size {
            match (items.next(), other_items.next()) {
                (Some(l), Some(r)) => {
                    if !self.datums_equal(&l, &r, ignore_case) {
                        return self.unequal();
                    }
                }
                (None, None) => break,
                // The cached size of a list disagrees with its chain
                _ => return self.unequal(),
            }
        }

        self.visited.pop();
        self.other_visited.pop();

        true
    }

    /// Unwinds the whole traversal on the first difference found.
    fn unequal(&mut self) -> bool {
        self.visited.clear();
        self.other_visited.clear();
        false
    }

    /// Whether no comparison is in progress.
    pub fn is_idle(&self) -> bool {
        self.visited.is_empty() && self.other_visited.is_empty()
    }
}
