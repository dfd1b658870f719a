//! Parcel dimensions and location references.

// self
use crate::{_prelude::*, model::string_or_number};

/// Parcel dimensions: weight in grams, sides in centimetres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
	/// Height in centimetres.
	pub height: i32,
	/// Length in centimetres.
	pub length: i32,
	/// Weight in grams.
	pub weight: i32,
	/// Width in centimetres.
	pub width: i32,
}
impl Size {
	/// Creates a size from its four measurements.
	pub const fn new(height: i32, length: i32, weight: i32, width: i32) -> Self {
		Self { height, length, weight, width }
	}
}

/// Carrier location reference.
///
/// Requests usually carry only an address (see [`Location::address`]); the carrier echoes the
/// remaining fields back in order data. Empty fields are left off the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
	/// Carrier-assigned location code.
	#[serde(default, deserialize_with = "string_or_number::deserialize", skip_serializing_if = "String::is_empty")]
	pub code: String,
	/// Postal code.
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub postal_code: String,
	/// ISO country code.
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub country_code: String,
	/// City name.
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub city: String,
	/// Free-form address.
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub address: String,
}
impl Location {
	/// Builds an address-only location.
	pub fn address(address: impl Into<String>) -> Self {
		Self { address: address.into(), ..Default::default() }
	}
}
