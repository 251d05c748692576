//! Lists: singly-linked chains of cells.
//!
//! A list is a header ([ListBody]) pointing to its first cell ([CellBody]). Each cell holds an
//! element and a handle to the next cell, the last cell pointing to `nothing`. Chains are shared
//! on purpose: [ListBody::try_butfirst] and [ListBody::fput] are O(1) and reuse the cells of the
//! original list, so mutating a cell in place is visible through every list containing it. Only
//! [ListBody::try_butlast] has to copy, since cells can't be walked backwards.
//!
//! The element count is cached in the header. Operations which walk the chain never walk more
//! cells than the cached count, so that a chain made circular by
//! [ListBody::try_set_butfirst_item] can still be traversed.
//!
//! Dropping a long chain doesn't recurse, but dropping deeply nested elements does: a list nested
//! in a list, and so on, is freed one level per stack frame, so very deep nesting can overflow the
//! stack.

use std::cell::{Cell, Ref, RefCell};

use crate::{
    datum::{ArrayBody, Datum, DatumTag},
    error::{DatumError, OrViolation, Result},
    iter::Cursor,
    metrics::{increment, sample},
};

/// One link of a list.
#[derive(Debug)]
pub struct CellBody {
    item: RefCell<Datum>,
    /// The next cell, or `nothing` for the last cell of a chain.
    next: RefCell<Datum>,
}

impl CellBody {
    pub fn new(item: Datum, next: Datum) -> Self {
        CellBody {
            item: RefCell::new(item),
            next: RefCell::new(next),
        }
    }

    pub fn item(&self) -> Datum {
        self.item.borrow().clone()
    }

    pub fn next(&self) -> Datum {
        self.next.borrow().clone()
    }

    pub fn set_item(&self, item: Datum) {
        // The old item is dropped once the borrow has been released.
        drop(self.item.replace(item));
    }

    pub fn set_next(&self, next: Datum) {
        drop(self.next.replace(next));
    }
}

// Dropping a chain would otherwise recurse once per cell. We unlink the cells owned only by this
// chain one by one instead.
impl Drop for CellBody {
    fn drop(&mut self) {
        let mut next = std::mem::take(self.next.get_mut());

        while next.tag() == DatumTag::ListCell && next.ref_count() == 1 {
            let after = next.cell().next.replace(Datum::nothing());
            next = after;
        }
    }
}

/// The header of a list.
#[derive(Debug)]
pub struct ListBody {
    /// The first cell, or `nothing` for the empty list.
    head: RefCell<Datum>,
    size: Cell<usize>,
    /// The timestamp of the parsed form of this list cached by the evaluator. Zero means that
    /// there is no valid parsed form.
    parse_stamp: Cell<u64>,
    parsed: RefCell<Vec<Datum>>,
}

impl ListBody {
    pub fn new() -> Self {
        Self::with_head(Datum::nothing(), 0)
    }

    fn with_head(head: Datum, size: usize) -> Self {
        ListBody {
            head: RefCell::new(head),
            size: Cell::new(size),
            parse_stamp: Cell::new(0),
            parsed: RefCell::new(Vec::new()),
        }
    }

    /// A fresh chain holding `items` in order.
    pub fn from_items(items: impl IntoIterator<Item = Datum>) -> Self {
        let items: Vec<Datum> = items.into_iter().collect();
        let size = items.len();
        let head = items
            .into_iter()
            .rev()
            .fold(Datum::nothing(), |next, item| Datum::new(CellBody::new(item, next)));

        Self::with_head(head, size)
    }

    /// A fresh chain holding the elements of `array` in order.
    pub fn from_array(array: &ArrayBody) -> Self {
        Self::from_items(array.to_vec())
    }

    /// A new header for the chain of `other`. The two lists share all their cells.
    pub fn shared_from(other: &ListBody) -> Self {
        Self::with_head(other.head(), other.size())
    }

    /// The first cell of the chain, or `nothing`.
    pub fn head(&self) -> Datum {
        self.head.borrow().clone()
    }

    pub fn size(&self) -> usize {
        self.size.get()
    }

    pub fn is_empty(&self) -> bool {
        self.head.borrow().is_nothing()
    }

    /// A cursor over the elements of the list.
    pub fn cursor(&self) -> Cursor {
        Cursor::list(self)
    }

    /// Iterates over the cells of the chain, at most [Self::size] of them.
    fn cells(&self) -> impl Iterator<Item = Datum> {
        let mut cell = self.head();
        let mut remaining = self.size();

        std::iter::from_fn(move || {
            if remaining == 0 || cell.is_nothing() {
                return None;
            }

            remaining -= 1;
            let next = cell.cell().next();
            Some(std::mem::replace(&mut cell, next))
        })
    }

    /// Recounts the cells of the chain, stopping at the first cell seen twice.
    pub fn recompute_size(&self) {
        let mut seen = Vec::new();
        let mut cell = self.head();

        while !cell.is_nothing() && !seen.contains(&cell.id()) {
            seen.push(cell.id());
            let next = cell.cell().next();
            cell = next;
        }

        self.size.set(seen.len());
    }

    /// The timestamp of the cached parsed form, or zero if there is none.
    pub fn parse_stamp(&self) -> u64 {
        self.parse_stamp.get()
    }

    /// The parsed form cached by the evaluator. Empty when [Self::parse_stamp] is zero.
    pub fn parsed(&self) -> Ref<'_, Vec<Datum>> {
        self.parsed.borrow()
    }

    /// Caches the parsed form of this list, as of `stamp`.
    pub fn set_parsed(&self, stamp: u64, parsed: Vec<Datum>) {
        drop(self.parsed.replace(parsed));
        self.parse_stamp.set(stamp);
    }

    fn invalidate_parse(&self) {
        self.parse_stamp.set(0);
        drop(self.parsed.take());
    }

    fn head_cell(&self, op: &'static str) -> Result<Datum> {
        let head = self.head();

        if head.is_nothing() {
            Err(DatumError::Empty {
                op,
                tag: DatumTag::List,
            })
        } else {
            Ok(head)
        }
    }

    pub fn is_index_in_range(&self, index: i64) -> bool {
        index >= 1 && (index as u64) <= self.size() as u64
    }

    /// Returns the 1-based `index`-th cell.
    fn cell_at(&self, index: i64) -> Result<Datum> {
        let out_of_range = || DatumError::IndexOutOfRange {
            tag: DatumTag::List,
            index,
            size: self.size(),
        };

        if !self.is_index_in_range(index) {
            return Err(out_of_range());
        }

        self.cells()
            .nth((index - 1) as usize)
            .ok_or_else(out_of_range)
    }

    pub fn try_datum_at_index(&self, index: i64) -> Result<Datum> {
        Ok(self.cell_at(index)?.cell().item())
    }

    #[track_caller]
    pub fn datum_at_index(&self, index: i64) -> Datum {
        self.try_datum_at_index(index).or_violation()
    }

    pub fn try_first(&self) -> Result<Datum> {
        Ok(self.head_cell("first")?.cell().item())
    }

    #[track_caller]
    pub fn first(&self) -> Datum {
        self.try_first().or_violation()
    }

    pub fn try_last(&self) -> Result<Datum> {
        let head = self.head_cell("last")?;
        let last = self.cells().last().unwrap_or(head);
        Ok(last.cell().item())
    }

    #[track_caller]
    pub fn last(&self) -> Datum {
        self.try_last().or_violation()
    }

    /// A new list made of the cells following the first one. No cell is copied.
    pub fn try_butfirst(&self) -> Result<Datum> {
        let head = self.head_cell("butfirst")?;
        let rest = ListBody::with_head(head.cell().next(), self.size().saturating_sub(1));
        Ok(Datum::new(rest))
    }

    #[track_caller]
    pub fn butfirst(&self) -> Datum {
        self.try_butfirst().or_violation()
    }

    /// A new list holding every element but the last one, in fresh cells.
    pub fn try_butlast(&self) -> Result<Datum> {
        self.head_cell("butlast")?;

        let count = self.size().saturating_sub(1);
        increment!("list::butlast_copied_cells", count as u64);
        let items = self.cells().take(count).map(|cell| cell.cell().item());

        Ok(Datum::new(ListBody::from_items(items)))
    }

    #[track_caller]
    pub fn butlast(&self) -> Datum {
        self.try_butlast().or_violation()
    }

    /// Inserts `item` at the front of this list, in place. Other lists sharing the chain are
    /// unaffected.
    pub fn prepend(&self, item: Datum) {
        let cell = Datum::new(CellBody::new(item, self.head()));
        drop(self.head.replace(cell));
        self.size.set(self.size() + 1);
        self.invalidate_parse();
    }

    /// A new list made of `item` followed by the cells of this list.
    pub fn fput(&self, item: Datum) -> Datum {
        let cell = Datum::new(CellBody::new(item, self.head()));
        Datum::new(ListBody::with_head(cell, self.size() + 1))
    }

    /// Links a new cell holding `item` at the end of the chain.
    ///
    /// The last cell of a chain may be shared with other lists (see [Self::try_butfirst]), which
    /// would then see the new element too. This operation thus fails, without modifying
    /// anything, if any cell of the chain is referenced from anywhere but its own list.
    pub fn try_append(&self, item: Datum) -> Result<()> {
        let cell = Datum::new(CellBody::new(item, Datum::nothing()));
        let mut last = self.head();

        if last.is_nothing() {
            drop(self.head.replace(cell));
        } else {
            let mut walked = 1;

            loop {
                // One reference from the previous link and one from `last`
                if last.ref_count() > 2 {
                    log::debug!("refusing to append to a list sharing its cell #{walked}");
                    return Err(DatumError::SharedList);
                }

                let next = last.cell().next();

                if next.is_nothing() {
                    break;
                }

                last = next;
                walked += 1;
            }

            sample!("list::append_walk", walked as f64);
            last.cell().set_next(cell);
        }

        self.size.set(self.size() + 1);
        self.invalidate_parse();

        Ok(())
    }

    /// Panicking variant of [Self::try_append].
    #[track_caller]
    pub fn append(&self, item: Datum) {
        self.try_append(item).or_violation()
    }

    /// Replaces the 1-based `index`-th element in place.
    pub fn try_set_item(&self, index: i64, value: Datum) -> Result<()> {
        self.cell_at(index)?.cell().set_item(value);
        self.invalidate_parse();
        Ok(())
    }

    #[track_caller]
    pub fn set_item(&self, index: i64, value: Datum) {
        self.try_set_item(index, value).or_violation()
    }

    pub fn try_set_first_item(&self, value: Datum) -> Result<()> {
        self.head_cell("set_first_item")?.cell().set_item(value);
        self.invalidate_parse();
        Ok(())
    }

    #[track_caller]
    pub fn set_first_item(&self, value: Datum) {
        self.try_set_first_item(value).or_violation()
    }

    /// Makes the first cell point to the chain of `value`, which must be a list. The cells
    /// following the first one are shared with `value` from then on.
    pub fn try_set_butfirst_item(&self, value: &Datum) -> Result<()> {
        let rest = value.try_decode::<ListBody>()?;
        let head = self.head_cell("set_butfirst_item")?;
        let size = rest.size() + 1;

        head.cell().set_next(rest.head());
        self.size.set(size);
        self.invalidate_parse();

        Ok(())
    }

    #[track_caller]
    pub fn set_butfirst_item(&self, value: &Datum) {
        self.try_set_butfirst_item(value).or_violation()
    }

    /// Detaches the chain, leaving this list empty.
    pub fn clear(&self) {
        drop(self.head.replace(Datum::nothing()));
        self.size.set(0);
        self.invalidate_parse();
    }

    /// Whether an element is structurally equal to `value`.
    pub fn is_member(&self, value: &Datum, ignore_case: bool) -> bool {
        self.cursor().any(|elt| value.is_equal(&elt, ignore_case))
    }

    /// A new list starting at the first cell whose element is equal to `value`, sharing the rest
    /// of the chain, or an empty list.
    pub fn from_member(&self, value: &Datum, ignore_case: bool) -> Datum {
        let found = self
            .cells()
            .find(|cell| cell.cell().item().is_equal(value, ignore_case));

        match found {
            Some(cell) => {
                let list = ListBody::with_head(cell, 0);
                list.recompute_size();
                Datum::new(list)
            }
            None => Datum::empty_list(),
        }
    }
}
