use arbitrary::Unstructured;
use arbtest::{arbitrary, arbtest};
use logo_lang_core::{charmap, Datum};

#[derive(arbitrary::Arbitrary, Debug)]
enum Op {
    Append(u8),
    Prepend(u8),
    Fput(u8),
    Butfirst,
    Butlast,
    SetItem(usize, u8),
    SetFirst(u8),
    Clear,
}

impl Op {
    fn apply_to_vec(&self, vec: &mut Vec<u8>) {
        match self {
            Op::Append(x) => vec.push(*x),
            Op::Prepend(x) | Op::Fput(x) => vec.insert(0, *x),
            Op::Butfirst => {
                if !vec.is_empty() {
                    vec.remove(0);
                }
            }
            Op::Butlast => {
                vec.pop();
            }
            Op::SetItem(idx, x) => {
                if !vec.is_empty() {
                    let len = vec.len();
                    vec[idx % len] = *x;
                }
            }
            Op::SetFirst(x) => {
                if let Some(first) = vec.first_mut() {
                    *first = *x;
                }
            }
            Op::Clear => vec.clear(),
        }
    }

    fn apply_to_list(&self, list: &mut Datum) {
        let number = |x: &u8| Datum::from_number(*x as f64);

        match self {
            Op::Append(x) => list.list().append(number(x)),
            Op::Prepend(x) => list.list().prepend(number(x)),
            Op::Fput(x) => *list = list.list().fput(number(x)),
            Op::Butfirst => {
                if !list.list().is_empty() {
                    *list = list.butfirst();
                }
            }
            Op::Butlast => {
                if !list.list().is_empty() {
                    *list = list.butlast();
                }
            }
            Op::SetItem(idx, x) => {
                let size = list.size();
                if size > 0 {
                    list.set_item((idx % size) as i64 + 1, number(x));
                }
            }
            Op::SetFirst(x) => {
                if !list.list().is_empty() {
                    list.set_first_item(number(x));
                }
            }
            Op::Clear => list.list().clear(),
        }
    }
}

fn contents(list: &Datum) -> Vec<u8> {
    list.cursor()
        .map(|item| item.word().number_value() as u8)
        .collect()
}

// u.arbitrary() generates very short vecs by default:
// https://github.com/matklad/arbtest/issues/8
fn arb_vec(u: &mut Unstructured<'_>) -> arbitrary::Result<Vec<u8>> {
    let len = u.arbitrary_len::<u8>()?;
    std::iter::from_fn(|| Some(u.arbitrary::<u8>()))
        .take(len)
        .collect()
}

#[test]
fn list_mutations() {
    arbtest(|u| {
        let mut vec = arb_vec(u)?;
        let mut list = Datum::list_from(vec.iter().map(|x| Datum::from_number(*x as f64)));
        let ops: Vec<Op> = u.arbitrary()?;

        for op in ops {
            op.apply_to_vec(&mut vec);
            op.apply_to_list(&mut list);

            assert_eq!(list.size(), vec.len());
            assert_eq!(contents(&list), vec);

            if let Some(last) = vec.last() {
                assert_eq!(list.last().word().number_value(), *last as f64);
            }
        }

        Ok(())
    });
}

#[test]
fn derived_lists_leave_the_original_alone() {
    arbtest(|u| {
        let vec = arb_vec(u)?;

        if !vec.is_empty() {
            let list = Datum::list_from(vec.iter().map(|x| Datum::from_number(*x as f64)));
            let init = list.butlast();
            init.list().clear();
            let rest = list.butfirst();

            assert_eq!(contents(&list), vec);
            assert_eq!(contents(&rest), vec[1..]);
        }

        Ok(())
    });
}

#[test]
fn number_text_round_trip() {
    arbtest(|u| {
        // Six significant digits survive formatting
        let cents: i32 = u.int_in_range(-999_999..=999_999)?;
        let number = f64::from(cents) / 100.0;
        let text = Datum::from_number(number).word().raw_value().to_owned();

        assert_eq!(Datum::from_text(text).word().number_value(), number);

        Ok(())
    });
}

#[test]
fn equal_structures_built_twice() {
    fn build(u: &mut Unstructured<'_>, depth: usize, upper: bool) -> arbitrary::Result<Datum> {
        let width = u.int_in_range(0..=3)?;
        let mut items = Vec::with_capacity(width);

        for _ in 0..width {
            if depth > 0 && u.arbitrary()? {
                items.push(build(u, depth - 1, upper)?);
            } else {
                let word = *u.choose(&["fd", "Bk", "repeat", "10"])?;
                let word = if upper {
                    word.to_uppercase()
                } else {
                    word.to_owned()
                };
                items.push(Datum::from_text(word));
            }
        }

        Ok(Datum::list_from(items))
    }

    arbtest(|u| {
        let seed: Vec<u8> = arb_vec(u)?;
        let left = build(&mut Unstructured::new(&seed), 4, false)?;
        let right = build(&mut Unstructured::new(&seed), 4, true)?;
        let same = build(&mut Unstructured::new(&seed), 4, false)?;

        assert!(left.is_equal(&right, true));
        assert!(left.is_equal(&same, false));
        assert_eq!(left.to_string(), same.to_string());

        Ok(())
    });
}

#[test]
fn control_character_table_round_trip() {
    for (raw, printable) in charmap::entries() {
        assert_eq!(charmap::raw_to_char(raw), printable);
        assert_eq!(charmap::char_to_raw(printable), raw);
        assert_eq!(
            charmap::printable_to_raw(&charmap::raw_to_printable(&raw.to_string())),
            raw.to_string()
        );
    }
}
