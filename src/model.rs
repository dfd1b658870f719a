//! JSON-shaped value types exchanged with the carrier.
//!
//! Everything here is a transient value object rebuilt per call. Field names follow the
//! carrier's snake_case wire format; optional wire fields decode to their defaults so a sparse
//! carrier response never fails on a field the client does not rely on.

pub mod location;
pub mod order;
pub mod point;
pub mod tariff;

pub use location::*;
pub use order::*;
pub use point::*;
pub use tariff::*;

/// Deserializes a field the carrier sends either as a string or as a number.
pub(crate) mod string_or_number {
	// crates.io
	use serde::{Deserialize, Deserializer};
	use serde_json::Value;

	pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(match Option::<Value>::deserialize(deserializer)? {
			None | Some(Value::Null) => String::new(),
			Some(Value::String(value)) => value,
			Some(other) => other.to_string(),
		})
	}
}
