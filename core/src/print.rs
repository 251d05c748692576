//! Rendering of datums as text.
//!
//! There are two renderings: the print form, which omits the delimiters of the outermost list or
//! array, and the show form, which keeps them. Elements of containers are always rendered in their
//! show form. Both honor the limits of [PrintOptions]: past the depth limit or the width limit,
//! the rest of a container is elided as `...`.
//!
//! A container being rendered is recorded by the [Printer]. Reaching it again while rendering its
//! own elements renders `...` instead of recursing forever.

use crate::{
    config::PrintOptions,
    datum::{Datum, DatumContentRef},
};

const ELLIPSIS: &str = "...";

/// The state of one top-level rendering.
#[derive(Debug, Default)]
pub struct Printer {
    visited: Vec<usize>,
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `datum` in print form.
    pub fn print_value(&mut self, datum: &Datum, opts: PrintOptions) -> String {
        match datum.content_ref() {
            DatumContentRef::Word(word) => word.print_value(opts),
            DatumContentRef::List(_) | DatumContentRef::Array(_) => self.elements(datum, opts),
            DatumContentRef::AstNode(node) => {
                let mut result = format!("( {}", self.show_value(node.name(), opts));

                for child in node.children() {
                    result.push(' ');
                    result.push_str(&self.show_value(&child, opts));
                }

                result.push_str(" )");
                result
            }
            DatumContentRef::Error(err) => self.print_value(err.text(), opts),
            DatumContentRef::Nothing
            | DatumContentRef::ListCell(_)
            | DatumContentRef::Procedure(_) => datum.tag().name().to_owned(),
        }
    }

    /// Renders `datum` in show form.
    pub fn show_value(&mut self, datum: &Datum, opts: PrintOptions) -> String {
        let (open, close) = match datum.content_ref() {
            DatumContentRef::List(_) => ('[', ']'),
            DatumContentRef::Array(_) => ('{', '}'),
            _ => return self.print_value(datum, opts),
        };

        let id = datum.id();

        if self.visited.contains(&id) {
            return ELLIPSIS.to_owned();
        }

        self.visited.push(id);
        let mut result = String::new();
        result.push(open);
        result.push_str(&self.elements(datum, opts));
        result.push(close);
        self.visited.retain(|other| *other != id);

        result
    }

    /// Renders the elements of a list or an array, separated by spaces.
    fn elements(&mut self, container: &Datum, opts: PrintOptions) -> String {
        let mut items = container.cursor();

        let Some(first) = items.next() else {
            return String::new();
        };

        if opts.depth_limit == Some(0) || opts.width_limit == Some(0) {
            return ELLIPSIS.to_owned();
        }

        let nested = opts.nested();
        let mut remaining_width = opts.width_limit.map(|width| width - 1);
        let mut result = self.show_value(&first, nested);

        for item in items {
            result.push(' ');

            if remaining_width == Some(0) {
                result.push_str(ELLIPSIS);
                break;
            }

            result.push_str(&self.show_value(&item, nested));
            remaining_width = remaining_width.map(|width| width - 1);
        }

        result
    }
}
