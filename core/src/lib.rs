//! The value runtime of the Logo interpreter: reference-counted datums (words, lists, arrays, AST
//! nodes, procedures and errors), their traversal, structural equality and rendering as text.

pub mod charmap;
pub mod config;
pub mod datum;
pub mod equality;
pub mod error;
pub mod iter;
mod metrics;
pub mod print;

pub use config::PrintOptions;
pub use datum::{Datum, DatumContentRef, DatumTag};
pub use error::{DatumError, Result, TagMismatchError};
pub use iter::Cursor;
