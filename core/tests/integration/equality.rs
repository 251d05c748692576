use logo_lang_core::{equality::EqualityContext, Datum};
use logo_lang_utils::test_value::{circular, nested, self_containing, words};

#[test]
fn value_and_identity_equality() {
    let a = words(&["x", "y"]);
    let b = words(&["x", "y"]);

    assert!(a.is_equal(&b, false));
    assert!(a == b);
    assert!(!a.is_dot_equal(&b));
    assert!(a.is_dot_equal(&a.clone()));
}

#[test]
fn numbers_compare_numerically() {
    assert!(Datum::from_text("1.0").is_equal(&Datum::from_number(1.0), false));
    // Two texts are compared as text until one of them is known to be a number
    assert!(!Datum::from_text("1e2").is_equal(&Datum::from_text("100"), false));
    assert!(Datum::from_number(100.0).is_equal(&Datum::from_text("1e2"), false));
    assert!(!Datum::from_number(1.0).is_equal(&Datum::from_text("one"), false));
}

#[test]
fn deep_structures() {
    assert!(nested("w", 100).is_equal(&nested("W", 100), true));
    assert!(!nested("w", 100).is_equal(&nested("w", 99), false));
}

#[test]
fn cyclic_structures_terminate() {
    assert!(self_containing(&["a", "b"]).is_equal(&self_containing(&["a", "b"]), false));
    assert!(!self_containing(&["a", "b"]).is_equal(&self_containing(&["a", "c"]), false));
    assert!(circular(&["a", "b"]).is_equal(&circular(&["a", "b"]), false));
}

#[test]
fn contexts_are_reusable() {
    let mut ctx = EqualityContext::new();

    for _ in 0..3 {
        assert!(!ctx.datums_equal(
            &self_containing(&["a"]),
            &self_containing(&["b"]),
            false
        ));
        assert!(ctx.is_idle());
        assert!(ctx.datums_equal(&words(&["a"]), &words(&["A"]), true));
        assert!(ctx.is_idle());
    }
}
