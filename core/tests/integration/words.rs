use assert_matches::assert_matches;
use logo_lang_core::{datum::Freshness, Datum, DatumError, DatumTag};
use pretty_assertions::assert_eq;

#[test]
fn number_words_round_trip_through_text() {
    for number in [0.0, 1.0, -7.0, 2.5, 0.125, 99999.0, -123456.0] {
        let word = Datum::from_number(number);
        let text = word.word().raw_value().to_owned();
        let parsed = Datum::from_text(text.clone());

        assert_eq!(parsed.word().number_value(), number, "parsing {text}");
        assert!(parsed.word().did_number_conversion_succeed());
    }
}

#[test]
fn lazy_forms() {
    let word = Datum::from_number(3.5);
    assert_eq!(word.word().freshness(), Freshness::NumberAuthoritative);
    assert_eq!(word.word().raw_value(), "3.5");
    assert_eq!(word.word().freshness(), Freshness::Clean);

    let word = Datum::from_text("hello");
    assert_eq!(word.word().number_value(), 0.0);
    assert!(!word.word().did_number_conversion_succeed());
    assert_eq!(word.word().freshness(), Freshness::StringAuthoritative);
    assert_eq!(word.word().key_value(), "HELLO");
}

#[test]
fn indexing_characters() {
    let word = Datum::from_text("logo");

    assert_eq!(word.size(), 4);
    assert_eq!(word.datum_at_index(1).word().raw_value(), "l");
    assert_eq!(word.last().word().raw_value(), "o");
    assert_eq!(word.butfirst().word().raw_value(), "ogo");
    assert_eq!(word.butlast().word().raw_value(), "log");
    assert_matches!(
        word.try_datum_at_index(5),
        Err(DatumError::IndexOutOfRange {
            tag: DatumTag::Word,
            index: 5,
            size: 4
        })
    );
    assert_matches!(
        Datum::from_text("").try_first(),
        Err(DatumError::Empty { op: "first", .. })
    );
}

#[test]
#[should_panic(expected = "datum contract violation: index 0 is out of range for a Word of size 4")]
fn indexing_before_the_first_character() {
    Datum::from_text("logo").datum_at_index(0);
}

#[test]
fn membership_in_words() {
    let word = Datum::from_text("Turtle");

    assert!(word.contains_datum(&Datum::from_text("tle"), false));
    assert!(word.contains_datum(&Datum::from_text("TUR"), true));
    assert!(!word.contains_datum(&Datum::from_text("TUR"), false));
    assert_eq!(
        word.from_member(&Datum::from_text("r"), false)
            .word()
            .raw_value(),
        "rtle"
    );
}
