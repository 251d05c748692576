use logo_lang_core::{datum::node_stats, Datum, PrintOptions};
use logo_lang_utils::test_value::{init_logging, numbers, show, words};
use pretty_assertions::assert_eq;

mod equality;
mod lists;
mod words;

#[test]
fn sharing_a_tail_between_lists() {
    init_logging();

    let list = numbers([1.0, 2.0, 3.0]);
    let rest = list.butfirst().butfirst();
    let init = list.butlast();

    assert_eq!(show(&rest), "[3]");
    assert_eq!(show(&init), "[1 2]");
    assert_eq!(show(&list), "[1 2 3]");

    // `rest` shares its only cell with `list`, `init` shares none
    rest.set_first_item(Datum::from_text("x"));
    init.set_first_item(Datum::from_text("y"));
    assert_eq!(show(&list), "[1 2 x]");
}

#[test]
fn full_printing_of_control_characters() {
    let word = Datum::from_text("hi\u{1d}there");

    assert_eq!(word.print_value(PrintOptions::full()), "|hi|there|");
    assert_eq!(word.print_value(PrintOptions::default()), "hi|there");
    assert_eq!(Datum::from_text("a|b").print_value(PrintOptions::full()), "a\\|b");
}

#[test]
fn every_block_is_freed() {
    // The sentinels are allocated once per thread
    let _ = Datum::nothing();
    let _ = Datum::from_bool(true);
    let _ = Datum::from_bool(false);
    let before = node_stats().live;

    {
        let list = words(&["a", "b", "c"]);
        let nested = Datum::list_from([list.clone(), Datum::array_from(1, [list.butlast()])]);
        let _ = nested.butfirst();
        let _ = show(&nested);
        assert!(node_stats().live > before);
    }

    assert_eq!(node_stats().live, before);
}

#[test]
fn datums_stay_on_their_thread() {
    // Each thread gets its own sentinels and statistics
    let handle = std::thread::spawn(|| {
        let word = Datum::from_text("elsewhere");
        (node_stats().live, word.to_string())
    });

    let (live, text) = handle.join().unwrap();
    assert!(live >= 1);
    assert_eq!(text, "elsewhere");
}
