//! Arrays: resizable sequences indexed from an arbitrary origin.
//!
//! Unlike lists, arrays never share their storage: every derived array is a copy.

use std::{cell::RefCell, ops::Range};

use crate::{
    datum::{Datum, DatumTag, ListBody},
    error::{DatumError, OrViolation, Result},
};

#[derive(Debug)]
pub struct ArrayBody {
    /// The index of the first slot.
    origin: i64,
    items: RefCell<Vec<Datum>>,
}

impl ArrayBody {
    /// An array of `size` slots, each holding a fresh empty list.
    pub fn new(origin: i64, size: usize) -> Self {
        Self::from_items(origin, (0..size).map(|_| Datum::empty_list()))
    }

    pub fn from_items(origin: i64, items: impl IntoIterator<Item = Datum>) -> Self {
        ArrayBody {
            origin,
            items: RefCell::new(items.into_iter().collect()),
        }
    }

    /// An array holding the elements of `list` in order.
    pub fn from_list(origin: i64, list: &ListBody) -> Self {
        Self::from_items(origin, list.cursor())
    }

    /// An array holding a copy of the slots `slots` of `source`, with the same origin.
    pub fn from_part(source: &ArrayBody, slots: Range<usize>) -> Result<Self> {
        let items = source.items.borrow();

        match items.get(slots.clone()) {
            Some(part) => Ok(Self::from_items(source.origin, part.iter().cloned())),
            None => Err(DatumError::IndexOutOfRange {
                tag: DatumTag::Array,
                index: source.origin + slots.end as i64,
                size: items.len(),
            }),
        }
    }

    pub fn origin(&self) -> i64 {
        self.origin
    }

    pub fn size(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// A copy of the slots of the array.
    pub fn to_vec(&self) -> Vec<Datum> {
        self.items.borrow().clone()
    }

    /// The content of the `slot`-th slot, counting from zero whatever the origin.
    pub fn slot(&self, slot: usize) -> Option<Datum> {
        self.items.borrow().get(slot).cloned()
    }

    /// Converts an external index to a slot.
    fn slot_of(&self, index: i64) -> Result<usize> {
        let size = self.size();

        index
            .checked_sub(self.origin)
            .and_then(|slot| usize::try_from(slot).ok())
            .filter(|slot| *slot < size)
            .ok_or(DatumError::IndexOutOfRange {
                tag: DatumTag::Array,
                index,
                size,
            })
    }

    pub fn is_index_in_range(&self, index: i64) -> bool {
        self.slot_of(index).is_ok()
    }

    pub fn try_datum_at_index(&self, index: i64) -> Result<Datum> {
        let slot = self.slot_of(index)?;
        Ok(self.items.borrow()[slot].clone())
    }

    #[track_caller]
    pub fn datum_at_index(&self, index: i64) -> Datum {
        self.try_datum_at_index(index).or_violation()
    }

    pub fn try_set_item(&self, index: i64, value: Datum) -> Result<()> {
        let slot = self.slot_of(index)?;
        let old = std::mem::replace(&mut self.items.borrow_mut()[slot], value);
        drop(old);
        Ok(())
    }

    #[track_caller]
    pub fn set_item(&self, index: i64, value: Datum) {
        self.try_set_item(index, value).or_violation()
    }

    fn non_empty(&self, op: &'static str) -> Result<()> {
        if self.is_empty() {
            Err(DatumError::Empty {
                op,
                tag: DatumTag::Array,
            })
        } else {
            Ok(())
        }
    }

    /// The origin of the array as a number. This isn't an element.
    pub fn first(&self) -> Datum {
        Datum::from_number(self.origin as f64)
    }

    pub fn try_last(&self) -> Result<Datum> {
        self.non_empty("last")?;
        Ok(self.items.borrow()[self.size() - 1].clone())
    }

    #[track_caller]
    pub fn last(&self) -> Datum {
        self.try_last().or_violation()
    }

    /// A copy of every slot but the first one, with the same origin.
    pub fn try_butfirst(&self) -> Result<Datum> {
        self.non_empty("butfirst")?;
        Ok(Datum::new(Self::from_part(self, 1..self.size())?))
    }

    #[track_caller]
    pub fn butfirst(&self) -> Datum {
        self.try_butfirst().or_violation()
    }

    /// A copy of every slot but the last one, with the same origin.
    pub fn try_butlast(&self) -> Result<Datum> {
        self.non_empty("butlast")?;
        Ok(Datum::new(Self::from_part(self, 0..self.size() - 1)?))
    }

    #[track_caller]
    pub fn butlast(&self) -> Datum {
        self.try_butlast().or_violation()
    }

    pub fn try_set_first_item(&self, value: Datum) -> Result<()> {
        self.non_empty("set_first_item")?;
        let old = std::mem::replace(&mut self.items.borrow_mut()[0], value);
        drop(old);
        Ok(())
    }

    #[track_caller]
    pub fn set_first_item(&self, value: Datum) {
        self.try_set_first_item(value).or_violation()
    }

    /// Keeps the first slot and replaces the others with a copy of the slots of `value`, which
    /// must be an array.
    pub fn try_set_butfirst_item(&self, value: &Datum) -> Result<()> {
        let rest = value.try_decode::<ArrayBody>()?.to_vec();
        self.non_empty("set_butfirst_item")?;

        let removed: Vec<Datum> = {
            let mut items = self.items.borrow_mut();
            let removed = items.split_off(1);
            items.extend(rest);
            removed
        };
        drop(removed);

        Ok(())
    }

    #[track_caller]
    pub fn set_butfirst_item(&self, value: &Datum) {
        self.try_set_butfirst_item(value).or_violation()
    }

    /// Adds a slot at the end of the array.
    pub fn append(&self, value: Datum) {
        self.items.borrow_mut().push(value);
    }

    /// Whether an element is structurally equal to `value`.
    pub fn is_member(&self, value: &Datum, ignore_case: bool) -> bool {
        self.to_vec()
            .iter()
            .any(|elt| elt.is_equal(value, ignore_case))
    }

    /// A copy of the slots starting at the first element equal to `value`, with the same origin,
    /// or an empty array.
    pub fn from_member(&self, value: &Datum, ignore_case: bool) -> Datum {
        let items = self.to_vec();
        let start = items
            .iter()
            .position(|elt| elt.is_equal(value, ignore_case))
            .unwrap_or(items.len());

        Datum::new(Self::from_items(self.origin, items[start..].iter().cloned()))
    }
}
