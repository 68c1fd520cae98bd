//! `valcast-catalog`: ready-made value objects.
//!
//! - [`Email`]: trimmed, format-checked address.
//! - [`Address`]: structured postal address, stored as JSON text.
//! - [`RomanNumber`]: number in 1..=3999 kept as its canonical numeral.

pub mod address;
pub mod email;
pub mod roman;

pub use address::{Address, AddressParts};
pub use email::Email;
pub use roman::{MAX_ROMAN, RomanInput, RomanNumber};
