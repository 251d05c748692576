//! Words: atomic strings which double as numbers.
//!
//! A word has up to three forms, computed lazily and cached: the raw text (which may contain raw
//! control characters standing for escaped characters), the printable text (the raw text with
//! control characters substituted), and a number. Which forms are valid is tracked by a
//! [Freshness] flag. A word built from a number only gets its text when first asked for, and a
//! word built from text is only parsed as a number when first asked for.

use std::cell::{Cell, OnceCell};

use crate::{
    charmap,
    config::PrintOptions,
    datum::Datum,
    error::{DatumError, OrViolation, Result},
};

use super::DatumTag;

/// Which forms of a word are authoritative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    /// The word was built from a number and its text hasn't been computed yet.
    NumberAuthoritative,
    /// The word was built from text. Its number hasn't been computed yet, or the text isn't a
    /// number.
    StringAuthoritative,
    /// Both forms are valid.
    Clean,
}

#[derive(Debug)]
pub struct WordBody {
    raw: OnceCell<String>,
    printable: OnceCell<String>,
    key: OnceCell<String>,
    number: Cell<f64>,
    freshness: Cell<Freshness>,
    /// Set once parsing the text as a number has failed, so that it's never attempted again.
    conversion_failed: Cell<bool>,
    forever_special: bool,
}

impl WordBody {
    pub fn from_text(text: impl Into<String>) -> Self {
        WordBody {
            raw: OnceCell::from(text.into()),
            printable: OnceCell::new(),
            key: OnceCell::new(),
            number: Cell::new(0.0),
            freshness: Cell::new(Freshness::StringAuthoritative),
            conversion_failed: Cell::new(false),
            forever_special: false,
        }
    }

    /// A word whose text must never be reinterpreted by the reader.
    pub fn special(text: impl Into<String>) -> Self {
        WordBody {
            forever_special: true,
            ..Self::from_text(text)
        }
    }

    pub fn from_number(number: f64) -> Self {
        WordBody {
            raw: OnceCell::new(),
            printable: OnceCell::new(),
            key: OnceCell::new(),
            number: Cell::new(number),
            freshness: Cell::new(Freshness::NumberAuthoritative),
            conversion_failed: Cell::new(false),
            forever_special: false,
        }
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness.get()
    }

    pub fn is_forever_special(&self) -> bool {
        self.forever_special
    }

    /// The raw text of the word. A number is formatted the first time its text is requested.
    pub fn raw_value(&self) -> &str {
        // Words built from text always have a raw form
        let raw = self.raw.get_or_init(|| format_number(self.number.get()));

        if self.freshness.get() == Freshness::NumberAuthoritative {
            self.freshness.set(Freshness::Clean);
        }

        raw
    }

    /// The raw text with every raw control character replaced by the printable character it
    /// stands for.
    pub fn printable_value(&self) -> &str {
        self.printable
            .get_or_init(|| charmap::raw_to_printable(self.raw_value()))
    }

    /// The case-folded printable text, used as a key for name lookups.
    pub fn key_value(&self) -> &str {
        self.key
            .get_or_init(|| self.printable_value().to_uppercase())
    }

    /// The numeric value of the word. If the text isn't a number, returns `0.0` and records the
    /// failure (see [Self::did_number_conversion_succeed]). The text is parsed at most once.
    pub fn number_value(&self) -> f64 {
        if self.freshness.get() == Freshness::StringAuthoritative && !self.conversion_failed.get()
        {
            match parse_number(self.printable_value()) {
                Some(number) => {
                    self.number.set(number);
                    self.freshness.set(Freshness::Clean);
                }
                None => {
                    self.number.set(0.0);
                    self.conversion_failed.set(true);
                }
            }
        }

        self.number.get()
    }

    /// Whether the word is a number, parsing its text if needed.
    pub fn did_number_conversion_succeed(&self) -> bool {
        self.number_value();
        self.freshness.get() != Freshness::StringAuthoritative
    }

    /// The numeric value of the word, or `None` if the text isn't a number.
    pub fn try_number(&self) -> Option<f64> {
        let number = self.number_value();
        self.did_number_conversion_succeed().then_some(number)
    }

    /// Renders the word. See [PrintOptions] for the meaning of the options.
    pub fn print_value(&self, opts: PrintOptions) -> String {
        if self.freshness.get() != Freshness::StringAuthoritative {
            return self.raw_value().to_owned();
        }

        let printable = self.printable_value();

        if opts.depth_limit == Some(0) {
            return "...".to_owned();
        }

        if !opts.full {
            return match opts.width_limit {
                // Small limits would make words unreadable
                Some(width) if printable.chars().count() > width.max(10) => {
                    let mut truncated: String = printable.chars().take(width.max(10)).collect();
                    truncated.push_str("...");
                    truncated
                }
                _ => printable.to_owned(),
            };
        }

        let raw = self.raw_value();

        if raw.is_empty() {
            return "||".to_owned();
        }

        if raw.chars().any(charmap::is_raw_control) {
            let mut result = String::with_capacity(raw.len() + 2);
            result.push('|');
            result.extend(raw.chars().map(charmap::raw_to_char));
            result.push('|');
            result
        } else {
            let mut result = String::with_capacity(raw.len());

            for c in raw.chars() {
                if charmap::char_to_raw(c) != c {
                    result.push('\\');
                }
                result.push(c);
            }

            result
        }
    }

    /// The number of characters of the raw text.
    pub fn size(&self) -> usize {
        self.raw_value().chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_value().is_empty()
    }

    pub fn is_index_in_range(&self, index: i64) -> bool {
        index >= 1 && (index as u64) <= self.size() as u64
    }

    fn char_at(&self, idx: usize) -> Option<char> {
        self.raw_value().chars().nth(idx)
    }

    /// The 1-based `index`-th character of the word, as a new word.
    pub fn try_datum_at_index(&self, index: i64) -> Result<Datum> {
        index
            .checked_sub(1)
            .and_then(|idx| usize::try_from(idx).ok())
            .and_then(|idx| self.char_at(idx))
            .map(|c| Datum::from_text(c))
            .ok_or(DatumError::IndexOutOfRange {
                tag: DatumTag::Word,
                index,
                size: self.size(),
            })
    }

    #[track_caller]
    pub fn datum_at_index(&self, index: i64) -> Datum {
        self.try_datum_at_index(index).or_violation()
    }

    fn non_empty(&self, op: &'static str) -> Result<&str> {
        let raw = self.raw_value();

        if raw.is_empty() {
            Err(DatumError::Empty {
                op,
                tag: DatumTag::Word,
            })
        } else {
            Ok(raw)
        }
    }

    pub fn try_first(&self) -> Result<Datum> {
        let raw = self.non_empty("first")?;
        Ok(Datum::from_text(&raw[..first_char_len(raw)]))
    }

    pub fn try_last(&self) -> Result<Datum> {
        let raw = self.non_empty("last")?;
        Ok(Datum::from_text(&raw[last_char_start(raw)..]))
    }

    pub fn try_butfirst(&self) -> Result<Datum> {
        let raw = self.non_empty("butfirst")?;
        Ok(Datum::from_text(&raw[first_char_len(raw)..]))
    }

    pub fn try_butlast(&self) -> Result<Datum> {
        let raw = self.non_empty("butlast")?;
        Ok(Datum::from_text(&raw[..last_char_start(raw)]))
    }

    /// Whether `other` is a substring of the raw text of `self`.
    pub fn contains(&self, other: &WordBody, ignore_case: bool) -> bool {
        find(self.raw_value(), other.raw_value(), ignore_case).is_some()
    }

    /// The raw text of `self` starting at the first occurrence of `other`, or the empty word if
    /// there is none.
    pub fn from_member(&self, other: &WordBody, ignore_case: bool) -> Datum {
        let raw = self.raw_value();

        match find(raw, other.raw_value(), ignore_case) {
            Some(pos) => Datum::from_text(&raw[pos..]),
            None => Datum::from_text(""),
        }
    }

    /// Compares two words. If either word is a number, they are compared numerically, and a
    /// word which isn't a number is never equal to a number. Otherwise, the raw texts are
    /// compared.
    pub fn is_equal(&self, other: &WordBody, ignore_case: bool) -> bool {
        if self.freshness.get() != Freshness::StringAuthoritative {
            let equal = self.number.get() == other.number_value();
            return other.did_number_conversion_succeed() && equal;
        }

        if other.freshness.get() != Freshness::StringAuthoritative {
            let equal = self.number_value() == other.number.get();
            return self.did_number_conversion_succeed() && equal;
        }

        if ignore_case {
            self.raw_value().to_uppercase() == other.raw_value().to_uppercase()
        } else {
            self.raw_value() == other.raw_value()
        }
    }
}

fn first_char_len(s: &str) -> usize {
    s.chars().next().map_or(0, char::len_utf8)
}

fn last_char_start(s: &str) -> usize {
    s.char_indices().next_back().map_or(0, |(idx, _)| idx)
}

/// Finds the byte offset of the first occurrence of `needle` in `haystack`.
fn find(haystack: &str, needle: &str, ignore_case: bool) -> Option<usize> {
    if !ignore_case {
        return haystack.find(needle);
    }

    let fold = |c: char| c.to_uppercase();
    let needle: Vec<char> = needle.chars().collect();

    haystack.char_indices().map(|(idx, _)| idx).find(|&idx| {
        let mut rest = haystack[idx..].chars();
        needle
            .iter()
            .all(|&n| rest.next().is_some_and(|h| fold(h).eq(fold(n))))
    })
}

/// Parses the text of a word as a number: optional surrounding whitespace, an optional sign,
/// digits with an optional decimal point, and an optional exponent. Special values such as `inf`
/// or `nan` are words, not numbers.
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();

    if text.is_empty()
        || !text.bytes().any(|b| b.is_ascii_digit())
        || !text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }

    text.parse().ok()
}

/// Formats a number as C's `printf("%g")` does: 6 significant digits, trailing zeros removed, and
/// scientific notation for exponents below -4 or above 5.
pub fn format_number(number: f64) -> String {
    const PRECISION: i32 = 6;

    if number.is_nan() {
        return "nan".to_owned();
    }

    if number.is_infinite() {
        return if number > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    if number == 0.0 {
        return if number.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    // Rounding to the precision first gives the exponent of the rounded value (9.999995 has
    // exponent 1, not 0).
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, number);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{number:.decimals$}")).to_owned()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
