//! Four-function calculator with immediate (left-to-right) evaluation.
//!
//! Keys go in one at a time through [`Calculator::press`]; the display is
//! plain text so that partially typed numbers like `3.` survive.

mod calculator;
mod key;

pub use calculator::{Calculator, format_number};
pub use key::{Key, Operator, parse_keys};
