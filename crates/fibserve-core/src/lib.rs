//! Core library for FibServe.
//!
//! Everything needed to evaluate the Fibonacci function at a complex
//! index lives here: the [`Complex`] value type, the textual codec
//! (user input, display form, cache-persisted form) and the closed-form
//! evaluator. The crate is deliberately free of I/O and async so the
//! server crate can exercise it from any execution context.

pub mod codec;
pub mod complex;
pub mod error;
pub mod evaluate;

pub use codec::{format_display, format_for_cache, parse_from_cache, parse_input};
pub use complex::Complex;
pub use error::{CacheFormatError, ComputeError, InstabilityError, ParseError};
pub use evaluate::{BinetEvaluator, Evaluator, evaluate};
