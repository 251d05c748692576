//! The control character table.
//!
//! Characters that have a syntactic meaning in Logo (brackets, spaces, quotes, ...) are stored
//! inside words as raw control characters when they were escaped in the source text, so that the
//! reader doesn't interpret them again. When displayed, each raw control character is replaced by
//! the printable character it stands for. The table must stay stable: saved workspaces and
//! console transcripts depend on it.

/// Pairs of `(raw, printable)` characters, sorted by raw character.
const RAW_TO_PRINTABLE: [(char, char); 23] = [
    ('\u{02}', ':'),
    ('\u{03}', ' '),
    ('\u{04}', '\t'),
    ('\u{05}', '\n'),
    ('\u{06}', '('),
    ('\u{0b}', '?'),
    ('\u{0e}', '+'),
    ('\u{0f}', '~'),
    ('\u{10}', ')'),
    ('\u{11}', '['),
    ('\u{12}', ']'),
    ('\u{13}', '-'),
    ('\u{14}', '*'),
    ('\u{15}', '/'),
    ('\u{16}', '='),
    ('\u{17}', '<'),
    ('\u{18}', '>'),
    ('\u{19}', '"'),
    ('\u{1a}', '\\'),
    ('\u{1c}', ';'),
    ('\u{1d}', '|'),
    ('\u{1e}', '{'),
    ('\u{1f}', '}'),
];

/// Iterates over the `(raw, printable)` pairs of the table.
pub fn entries() -> impl Iterator<Item = (char, char)> {
    RAW_TO_PRINTABLE.iter().copied()
}

/// Returns the printable character a raw control character stands for, or `c` unchanged if it
/// isn't one.
pub fn raw_to_char(c: char) -> char {
    if c >= ' ' {
        return c;
    }

    RAW_TO_PRINTABLE
        .binary_search_by_key(&c, |(raw, _)| *raw)
        .map(|idx| RAW_TO_PRINTABLE[idx].1)
        .unwrap_or(c)
}

/// Returns the raw control character standing for `c`, or `c` unchanged if it has none.
pub fn char_to_raw(c: char) -> char {
    RAW_TO_PRINTABLE
        .iter()
        .find_map(|(raw, printable)| (*printable == c).then_some(*raw))
        .unwrap_or(c)
}

/// Whether `c` is a raw control character, that is a character below the printable range.
pub fn is_raw_control(c: char) -> bool {
    c < ' '
}

/// Substitutes every raw control character of `raw` with its printable counterpart.
pub fn raw_to_printable(raw: &str) -> String {
    raw.chars().map(raw_to_char).collect()
}

/// Substitutes every character of `printable` having a raw counterpart with it.
pub fn printable_to_raw(printable: &str) -> String {
    printable.chars().map(char_to_raw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_is_sorted() {
        assert!(RAW_TO_PRINTABLE.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn printable_characters_are_left_alone() {
        for c in ['a', 'Z', '0', '.', 'é', '\u{7f}'] {
            assert_eq!(raw_to_char(c), c);
            assert_eq!(char_to_raw(c), c);
        }
    }

    #[test]
    fn unmapped_control_characters_are_left_alone() {
        for c in ['\u{00}', '\u{01}', '\u{07}', '\u{08}', '\u{0c}', '\u{1b}'] {
            assert_eq!(raw_to_char(c), c);
        }
    }

    #[test]
    fn strings() {
        assert_eq!(raw_to_printable("a\u{03}b\u{11}c\u{12}"), "a b[c]");
        assert_eq!(printable_to_raw("a b[c]"), "a\u{03}b\u{11}c\u{12}");
    }
}
