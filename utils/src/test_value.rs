//! Builders of datums commonly needed by tests.

use logo_lang_core::{Datum, PrintOptions};

/// A list of words made from `items`.
pub fn words(items: &[&str]) -> Datum {
    Datum::list_from(items.iter().map(|s| Datum::from_text(*s)))
}

/// A list of number words.
pub fn numbers(items: impl IntoIterator<Item = f64>) -> Datum {
    Datum::list_from(items.into_iter().map(Datum::from_number))
}

/// An array of words made from `items`, indexed from `origin`.
pub fn word_array(origin: i64, items: &[&str]) -> Datum {
    Datum::array_from(origin, items.iter().map(|s| Datum::from_text(*s)))
}

/// A list `[w [w [w ... []]]]` with `depth` levels.
pub fn nested(word: &str, depth: usize) -> Datum {
    (0..depth).fold(Datum::empty_list(), |inner, _| {
        Datum::list_from([Datum::from_text(word), inner])
    })
}

/// The list of `items` followed by the list itself as last element.
pub fn self_containing(items: &[&str]) -> Datum {
    let list = words(items);
    list.list().append(list.clone());
    list
}

/// The list of `items`, whose first cell is linked back to itself.
pub fn circular(items: &[&str]) -> Datum {
    let list = words(items);
    list.list().set_butfirst_item(&list);
    list
}

/// The show form of `datum` without limits.
pub fn show(datum: &Datum) -> String {
    datum.show_value(PrintOptions::default())
}

/// Routes `log` records to the test output. Can be called by every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
