//! `valcast-cast`: value objects as record fields.
//!
//! A [`CastAdapter`] turns a stored cell into a value object on read and back
//! into a cell on write. Records declare which field uses which value-object
//! type through a [`ModelSchema`]; the adapter refuses to store a value of any
//! other type in that field.

pub mod adapter;
pub mod cast_type;
pub mod error;
pub mod record;

pub use adapter::{CastAdapter, UNDECLARED};
pub use cast_type::{CastRegistry, CastType};
pub use error::{CastError, CastResult};
pub use record::{Attributes, HostRecord, ModelSchema, Record};
