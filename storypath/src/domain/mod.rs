mod filters;
mod ids;
mod location;
mod position;
mod project;

pub use filters::*;
pub use ids::*;
pub use location::*;
pub use position::*;
pub use project::*;

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
