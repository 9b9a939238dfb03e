/*!
 * Serde Helper Functions
 * Skip predicates shared by the serializable output types
 */

pub use serde_with::skip_serializing_none;

/// Skip serializing if value is zero
#[inline]
pub const fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

/// Skip serializing if Vec is empty
#[inline]
pub fn is_empty_vec<T>(value: &Vec<T>) -> bool {
    value.is_empty()
}
