//! Deserialization helpers for hub payloads.

use serde::{Deserialize, Deserializer};

/// Deserialize a value that the hub may send as `null`, using the type's
/// default in that case.
///
/// The hub encodes empty lists as `null`, which a plain `Vec<T>` rejects.
///
/// # Errors
///
/// Returns the deserializer's error if the value is neither `null` nor a
/// valid `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
