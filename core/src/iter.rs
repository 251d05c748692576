//! Uniform forward iteration over the elements of lists and arrays and the characters of words.
//!
//! A [Cursor] holds handles to what it iterates over, so the container stays alive for as long as
//! the cursor does. Cursors are single-pass. Mutating a container while walking it isn't guarded
//! against: the cursor observes whatever state the container is in when it advances.

use crate::{
    datum::{Datum, DatumTag, ListBody},
    error::{violation, DatumError},
};

#[derive(Debug)]
pub enum Cursor {
    /// Walks a chain of cells. `remaining` bounds the walk to the size of the list, so that
    /// walking a circular chain terminates.
    List { cell: Datum, remaining: usize },
    /// Walks the slots of an array.
    Array { array: Datum, slot: usize },
    /// Walks the characters of the raw text of a word. `offset` is a byte offset.
    Word { word: Datum, offset: usize },
}

impl Cursor {
    pub fn list(list: &ListBody) -> Self {
        Cursor::List {
            cell: list.head(),
            remaining: list.size(),
        }
    }

    /// A cursor over `array`, which must be an array.
    pub fn array(array: Datum) -> Self {
        Cursor::Array { array, slot: 0 }
    }

    /// A cursor over `word`, which must be a word.
    pub fn word(word: Datum) -> Self {
        Cursor::Word { word, offset: 0 }
    }

    /// Whether there are elements left. Doesn't advance the cursor.
    pub fn has_more(&self) -> bool {
        match self {
            Cursor::List { cell, remaining } => *remaining > 0 && !cell.is_nothing(),
            Cursor::Array { array, slot } => *slot < array.array().size(),
            Cursor::Word { word, offset } => *offset < word.word().raw_value().len(),
        }
    }

    /// Returns the current element and advances the cursor. Calling this method when
    /// [Self::has_more] is false is a contract violation.
    #[track_caller]
    pub fn take_next(&mut self) -> Datum {
        match self.next() {
            Some(item) => item,
            None => violation(DatumError::Empty {
                op: "take_next",
                tag: self.container_tag(),
            }),
        }
    }

    fn container_tag(&self) -> DatumTag {
        match self {
            Cursor::List { .. } => DatumTag::List,
            Cursor::Array { array, .. } => array.tag(),
            Cursor::Word { word, .. } => word.tag(),
        }
    }
}

impl Iterator for Cursor {
    type Item = Datum;

    fn next(&mut self) -> Option<Datum> {
        if !self.has_more() {
            return None;
        }

        match self {
            Cursor::List { cell, remaining } => {
                let next = cell.cell().next();
                *remaining -= 1;
                Some(std::mem::replace(cell, next).cell().item())
            }
            Cursor::Array { array, slot } => {
                let item = array.array().slot(*slot);
                *slot += 1;
                item
            }
            Cursor::Word { word, offset } => {
                let c = word.word().raw_value()[*offset..].chars().next()?;
                *offset += c.len_utf8();
                Some(Datum::from_text(c))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Cursor::List { remaining, .. } if self.has_more() => (0, Some(*remaining)),
            Cursor::List { .. } => (0, Some(0)),
            Cursor::Array { array, slot } => {
                let left = array.array().size().saturating_sub(*slot);
                (left, Some(left))
            }
            Cursor::Word { word, offset } => {
                let left = word.word().raw_value().len().saturating_sub(*offset);
                (left.div_ceil(4), Some(left))
            }
        }
    }
}
