//! Delivery-point directory records and address matching.

// self
use crate::{_prelude::*, model::string_or_number};

/// Geographic part of a delivery-point record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PointLocation {
	/// ISO country code.
	#[serde(default)]
	pub country_code: String,
	/// Carrier region code.
	#[serde(default)]
	pub region_code: i32,
	/// Region name.
	#[serde(default)]
	pub region: String,
	/// Carrier city code.
	#[serde(default)]
	pub city_code: i32,
	/// City name.
	#[serde(default)]
	pub city: String,
	/// Postal code.
	#[serde(default, deserialize_with = "string_or_number::deserialize")]
	pub postal_code: String,
	/// Longitude.
	#[serde(default)]
	pub longitude: f64,
	/// Latitude.
	#[serde(default)]
	pub latitude: f64,
	/// Short address.
	#[serde(default)]
	pub address: String,
	/// Full address including city and region.
	#[serde(default)]
	pub address_full: String,
}

/// One record of the `deliverypoints` directory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPoint {
	/// Directions to the point.
	#[serde(default)]
	pub address_comment: String,
	/// Point name.
	#[serde(default)]
	pub name: String,
	/// Contact email.
	#[serde(default)]
	pub email: String,
	/// Location of the point.
	#[serde(default)]
	pub location: PointLocation,
}

/// Record field that satisfied an address query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchField {
	/// `location.address`.
	Address,
	/// `location.address_full`.
	AddressFull,
	/// `name`.
	Name,
}

/// Delivery point that matched an address query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressMatch {
	/// Full address of the matching point.
	pub full_address: String,
	/// Field that contained the query.
	pub field: MatchField,
}

/// Returns the first point whose address, full address, or name contains `query`.
///
/// Matching is a case-sensitive substring test applied to the points in the order given.
pub fn find_address<'a, I>(points: I, query: &str) -> Option<AddressMatch>
where
	I: IntoIterator<Item = &'a DeliveryPoint>,
{
	points.into_iter().find_map(|point| {
		let field = if point.location.address.contains(query) {
			MatchField::Address
		} else if point.location.address_full.contains(query) {
			MatchField::AddressFull
		} else if point.name.contains(query) {
			MatchField::Name
		} else {
			return None;
		};

		Some(AddressMatch { full_address: point.location.address_full.clone(), field })
	})
}
