use assert_matches::assert_matches;
use logo_lang_core::{Datum, DatumError, DatumTag};
use logo_lang_utils::test_value::{circular, self_containing, show, word_array, words};
use pretty_assertions::assert_eq;

#[test]
fn index_bounds() {
    let list = words(&["a", "b", "c"]);
    let array = word_array(0, &["a", "b", "c"]);

    for index in 1..=3 {
        assert!(list.is_index_in_range(index));
        assert!(array.is_index_in_range(index - 1));
    }

    assert!(!list.is_index_in_range(0));
    assert!(!list.is_index_in_range(4));
    assert!(!array.is_index_in_range(3));
    assert!(!array.is_index_in_range(-1));
    assert_matches!(
        array.try_set_item(3, Datum::nothing()),
        Err(DatumError::IndexOutOfRange {
            tag: DatumTag::Array,
            ..
        })
    );
}

#[test]
#[should_panic(expected = "datum contract violation")]
fn reading_past_the_end_of_a_list() {
    words(&["a"]).datum_at_index(2);
}

#[test]
fn conversions_between_lists_and_arrays() {
    let array = word_array(1, &["x", "y"]);
    let list = Datum::new(logo_lang_core::datum::ListBody::from_array(array.array()));

    assert_eq!(show(&list), "[x y]");
    assert_eq!(show(&array), "{x y}");
    assert!(!list.is_equal(&array, false));
}

#[test]
fn walking_cyclic_lists() {
    let list = circular(&["a", "b"]);
    assert_eq!(list.size(), 3);
    assert_eq!(show(&list), "[a a a]");
    assert_eq!(list.last().word().raw_value(), "a");
    assert_eq!(show(&list.butlast()), "[a a]");

    let list = self_containing(&["a"]);
    assert_eq!(show(&list), "[a ...]");
    assert!(list.contains_datum(&list, false));
    assert!(list.is_member(&list, false));
}

#[test]
fn iteration_over_every_container() {
    let list: Vec<String> = words(&["a", "b"]).cursor().map(|d| d.to_string()).collect();
    let array: Vec<String> = word_array(5, &["c"]).cursor().map(|d| d.to_string()).collect();
    let word: Vec<String> = Datum::from_text("de").cursor().map(|d| d.to_string()).collect();

    assert_eq!(list, ["a", "b"]);
    assert_eq!(array, ["c"]);
    assert_eq!(word, ["d", "e"]);
    assert_matches!(
        Datum::nothing().try_cursor(),
        Err(DatumError::Unsupported { op: "cursor", .. })
    );
}

#[test]
fn refused_append_leaves_the_list_untouched() {
    let list = words(&["a", "b"]);
    let rest = list.butfirst();

    assert_matches!(
        list.list().try_append(Datum::from_text("c")),
        Err(DatumError::SharedList)
    );
    assert_eq!(show(&list), "[a b]");
    assert_eq!(show(&rest), "[b]");
}
