//! Tariff calculation request and quotes.

// crates.io
use time::macros;
// self
use crate::{
	_prelude::*,
	model::{Location, Size},
};

time::serde::format_description!(
	carrier_datetime,
	OffsetDateTime,
	"[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
);

/// One tariff quote returned by `calculator/tarifflist`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSending {
	/// Tariff code, unique within a quote set.
	pub tariff_code: i32,
	/// Tariff name.
	#[serde(default)]
	pub tariff_name: String,
	/// Tariff description.
	#[serde(default)]
	pub tariff_description: String,
	/// Delivery mode (door/warehouse combination).
	#[serde(default)]
	pub delivery_mode: i32,
	/// Delivery cost in the requested currency.
	#[serde(default)]
	pub delivery_sum: f64,
	/// Minimum delivery time in working days.
	#[serde(default)]
	pub period_min: i32,
	/// Maximum delivery time in working days.
	#[serde(default)]
	pub period_max: i32,
	/// Minimum delivery time in calendar days.
	#[serde(default)]
	pub calendar_min: i32,
	/// Maximum delivery time in calendar days.
	#[serde(default)]
	pub calendar_max: i32,
}

/// Full quote set for one (origin, destination, size) triple, in carrier order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TariffCodes {
	/// Quotes as listed by the carrier.
	#[serde(default)]
	pub tariff_codes: Vec<PriceSending>,
}
impl TariffCodes {
	/// Returns the quotes selected by `filter`, preserving carrier order.
	pub fn filtered(&self, filter: &TariffFilter) -> TariffCodes {
		TariffCodes {
			tariff_codes: self
				.tariff_codes
				.iter()
				.filter(|quote| filter.matches(quote))
				.cloned()
				.collect(),
		}
	}
}
impl From<Vec<PriceSending>> for TariffCodes {
	fn from(tariff_codes: Vec<PriceSending>) -> Self {
		Self { tariff_codes }
	}
}

/// Selects quotes by description (case-insensitive equality) or name (substring).
///
/// A quote matches when either configured criterion matches; an empty filter matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TariffFilter {
	/// Description compared case-insensitively.
	pub description: Option<String>,
	/// Substring searched for in the tariff name.
	pub name: Option<String>,
}
impl TariffFilter {
	/// Sets the description criterion.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());

		self
	}

	/// Sets the name criterion.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());

		self
	}

	/// Returns `true` when `quote` satisfies the filter.
	pub fn matches(&self, quote: &PriceSending) -> bool {
		if self.description.is_none() && self.name.is_none() {
			return true;
		}

		let by_description = self.description.as_deref().is_some_and(|description| {
			description.to_lowercase() == quote.tariff_description.to_lowercase()
		});
		let by_name = self.name.as_deref().is_some_and(|name| quote.tariff_name.contains(name));

		by_description || by_name
	}
}

/// Body of a `calculator/tarifflist` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffRequest {
	/// Shipment type (1 = online store).
	#[serde(rename = "type")]
	pub kind: i32,
	/// Planned handover date-time.
	#[serde(with = "carrier_datetime")]
	pub date: OffsetDateTime,
	/// Currency code (1 = RUB).
	pub currency: i32,
	/// Response language.
	pub lang: String,
	/// Origin.
	pub from_location: Location,
	/// Destination.
	pub to_location: Location,
	/// Parcel dimensions.
	pub packages: Size,
}
impl TariffRequest {
	/// Handover date sent when the caller does not pick one.
	pub const DEFAULT_DATE: OffsetDateTime = macros::datetime!(2020-11-03 11:49:32 +07:00);
	/// Default shipment type.
	pub const DEFAULT_KIND: i32 = 1;
	/// Default currency code.
	pub const DEFAULT_CURRENCY: i32 = 1;
	/// Default response language.
	pub const DEFAULT_LANG: &'static str = "rus";

	/// Creates a request between two addresses with the default type, date, currency and
	/// language.
	pub fn new(from: impl Into<String>, to: impl Into<String>, size: Size) -> Self {
		Self {
			kind: Self::DEFAULT_KIND,
			date: Self::DEFAULT_DATE,
			currency: Self::DEFAULT_CURRENCY,
			lang: Self::DEFAULT_LANG.into(),
			from_location: Location::address(from),
			to_location: Location::address(to),
			packages: size,
		}
	}

	/// Overrides the handover date.
	pub fn with_date(mut self, date: OffsetDateTime) -> Self {
		self.date = date;

		self
	}

	/// Overrides the currency code.
	pub fn with_currency(mut self, currency: i32) -> Self {
		self.currency = currency;

		self
	}

	/// Overrides the response language.
	pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
		self.lang = lang.into();

		self
	}
}
