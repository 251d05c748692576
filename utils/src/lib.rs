pub mod bench;
pub mod test_value;

pub use logo_lang_core;
