//! Configuration of datum rendering.

use serde::{Deserialize, Serialize};

/// Limits and mode used when rendering a datum as text.
///
/// `None` means unlimited. The interpreter maps its `PRINTDEPTHLIMIT` and `PRINTWIDTHLIMIT`
/// variables onto these fields, and `full` onto the difference between `SHOW`/`PRINT` and
/// `FULLPRINTP`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintOptions {
    /// If true, words are rendered so that reading them back yields the same raw text:
    /// characters with a special meaning are backslash-escaped, and words holding raw control
    /// characters are wrapped in vertical bars.
    pub full: bool,
    /// How many levels of nested containers are rendered before eliding with `...`.
    pub depth_limit: Option<usize>,
    /// How many elements of a container (or characters of a word) are rendered before eliding
    /// with `...`.
    pub width_limit: Option<usize>,
}

impl PrintOptions {
    /// Unlimited rendering, in full mode.
    pub fn full() -> Self {
        PrintOptions {
            full: true,
            ..Default::default()
        }
    }

    pub fn with_depth_limit(self, depth_limit: usize) -> Self {
        PrintOptions {
            depth_limit: Some(depth_limit),
            ..self
        }
    }

    pub fn with_width_limit(self, width_limit: usize) -> Self {
        PrintOptions {
            width_limit: Some(width_limit),
            ..self
        }
    }

    /// The options to use one level down a container.
    pub(crate) fn nested(self) -> Self {
        PrintOptions {
            depth_limit: self.depth_limit.map(|depth| depth.saturating_sub(1)),
            ..self
        }
    }
}
