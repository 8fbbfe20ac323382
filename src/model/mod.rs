pub mod cell;
pub mod classes;
pub mod context;
pub mod region;
pub mod selection;

pub use cell::CellRecord;
pub use region::Region;
pub use selection::SelectionKey;

use serde::{Deserialize, Deserializer};

/// `deserialize_with` helper: an explicit JSON `null` reads as the default,
/// the same as a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
