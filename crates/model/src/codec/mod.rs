//! Binary model format.
//!
//! ```text
//! repeat until EOF:
//!   genre name         NUL-terminated UTF-8
//!   prior probability  f64, little-endian
//!   total words        i32, little-endian
//!   repeat until an empty token (lone NUL) or EOF:
//!     token            NUL-terminated UTF-8
//!     probability      f64, little-endian
//! ```
//!
//! The writer emits genres and tokens in lexicographic order and closes every
//! word list with a lone NUL, so the same collection always encodes to the
//! same bytes. The reader also accepts a final word list ended by EOF.

pub mod reader;
pub mod writer;

pub use reader::{decode, ModelReader};
pub use writer::{encode, ModelWriter};

const NUL: u8 = 0;
