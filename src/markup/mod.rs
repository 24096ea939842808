//! Markup conversion from upstream HTML to gemtext
//!
//! Conversion is pure and deterministic: the same HTML always yields the same
//! gemtext, which is what lets the caches treat converted bodies as
//! derive-once values.

mod gemtext;

pub use gemtext::{ConversionError, ConverterOptions, GemtextConverter};
