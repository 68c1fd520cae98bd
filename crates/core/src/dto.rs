//! Transfer-object protocol.

use indexmap::IndexMap;

use crate::value_object::Frozen;

/// A transfer object: field name → item.
pub type Dto<T> = IndexMap<String, T>;

/// Types that can describe themselves as a transfer object.
pub trait Transferable: Sized {
    fn to_dto(&self) -> Dto<Self>;
}

/// A value object becomes a single-entry DTO keyed by its own key.
impl<T: Frozen> Transferable for T {
    fn to_dto(&self) -> Dto<Self> {
        let mut dto = IndexMap::with_capacity(1);
        dto.insert(self.key().to_string(), self.clone());
        dto
    }
}
