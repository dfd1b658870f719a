//! Order payloads, receipts, and status records.

// self
use crate::{
	_prelude::*,
	error::ValidationError,
	model::{Location, Size},
};

/// Recipient phone number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phone {
	/// Number in international format.
	pub number: String,
}
impl Phone {
	/// Wraps a phone number.
	pub fn new(number: impl Into<String>) -> Self {
		Self { number: number.into() }
	}
}

/// Order recipient.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
	/// Full name.
	#[serde(default)]
	pub name: String,
	/// Phone numbers; at least one is required when creating an order.
	#[serde(default)]
	pub phones: Vec<Phone>,
}
impl Recipient {
	/// Creates a recipient, rejecting an empty phone list.
	pub fn new<I, P>(name: impl Into<String>, phones: I) -> Result<Self, ValidationError>
	where
		I: IntoIterator<Item = P>,
		P: Into<String>,
	{
		let recipient =
			Self { name: name.into(), phones: phones.into_iter().map(Phone::new).collect() };

		recipient.validate()?;

		Ok(recipient)
	}

	/// Checks the at-least-one-phone invariant.
	pub fn validate(&self) -> Result<(), ValidationError> {
		if self.phones.is_empty() {
			return Err(ValidationError::MissingPhone { name: self.name.clone() });
		}

		Ok(())
	}
}

/// Declared payment collected from the recipient for an item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
	/// Amount to collect.
	pub value: f64,
	/// VAT included in `value`, when applicable.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub vat_sum: Option<f64>,
}

/// Line item inside a package.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
	/// Item name.
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub name: String,
	/// Merchant article key.
	#[serde(default)]
	pub ware_key: String,
	/// Payment collected on delivery.
	#[serde(default)]
	pub payment: Payment,
	/// Net weight in grams.
	#[serde(default)]
	pub weight: i32,
	/// Gross weight in grams.
	#[serde(default)]
	pub weight_gross: i32,
	/// Number of units.
	#[serde(default)]
	pub amount: i32,
	/// Units actually delivered.
	#[serde(default)]
	pub delivery_amount: i32,
	/// Item name in a foreign language.
	#[serde(default)]
	pub name_i18n: String,
	/// Product page link.
	#[serde(default)]
	pub url: String,
	/// Declared value per unit.
	#[serde(default)]
	pub cost: f64,
}
impl Item {
	/// Creates an item with the required fields; the rest default to zero or empty.
	pub fn new(
		ware_key: impl Into<String>,
		name: impl Into<String>,
		payment: Payment,
		weight: i32,
		amount: i32,
		cost: f64,
	) -> Self {
		Self {
			name: name.into(),
			ware_key: ware_key.into(),
			payment,
			weight,
			amount,
			cost,
			..Default::default()
		}
	}

	/// Sets the product URL.
	pub fn with_url(mut self, url: impl Into<String>) -> Self {
		self.url = url.into();

		self
	}

	/// Sets the delivered amount.
	pub fn with_delivery_amount(mut self, amount: i32) -> Self {
		self.delivery_amount = amount;

		self
	}

	/// Checks `weight >= 0` and `amount >= 1`.
	pub fn validate(&self) -> Result<(), ValidationError> {
		if self.weight < 0 {
			return Err(ValidationError::NegativeItemWeight {
				ware_key: self.ware_key.clone(),
				weight: self.weight,
			});
		}
		if self.amount < 1 {
			return Err(ValidationError::InvalidItemAmount {
				ware_key: self.ware_key.clone(),
				amount: self.amount,
			});
		}

		Ok(())
	}
}

/// Physical parcel.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Package {
	/// Height in centimetres.
	#[serde(default, skip_serializing_if = "is_zero")]
	pub height: i32,
	/// Length in centimetres.
	#[serde(default, skip_serializing_if = "is_zero")]
	pub length: i32,
	/// Weight in grams.
	#[serde(default, skip_serializing_if = "is_zero")]
	pub weight: i32,
	/// Width in centimetres.
	#[serde(default, skip_serializing_if = "is_zero")]
	pub width: i32,
	/// Carrier-visible package number.
	#[serde(default, skip_serializing_if = "String::is_empty")]
	pub number: String,
	/// Line items.
	#[serde(default)]
	pub items: Vec<Item>,
}
impl Package {
	/// Creates an empty package with the dimensions of `size`.
	pub fn from_size(size: Size, number: impl Into<String>) -> Self {
		Self {
			height: size.height,
			length: size.length,
			weight: size.weight,
			width: size.width,
			number: number.into(),
			items: Vec::new(),
		}
	}

	/// Appends a line item.
	pub fn with_item(mut self, item: Item) -> Self {
		self.items.push(item);

		self
	}

	/// Dimensions of the package.
	pub fn size(&self) -> Size {
		Size::new(self.height, self.length, self.weight, self.width)
	}

	/// Checks that the package has items and that every item is valid.
	pub fn validate(&self) -> Result<(), ValidationError> {
		if self.items.is_empty() {
			return Err(ValidationError::EmptyPackage { number: self.number.clone() });
		}

		self.items.iter().try_for_each(Item::validate)
	}
}

/// Body of an `orders` request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
	/// Origin.
	pub from_location: Location,
	/// Destination.
	pub to_location: Location,
	/// Recipient.
	pub recipient: Recipient,
	/// Packages, in order.
	pub packages: Vec<Package>,
	/// Tariff chosen from a previous calculation.
	pub tariff_code: i32,
}
impl OrderRequest {
	/// Creates an order between two addresses with no packages yet.
	pub fn new(
		from: impl Into<String>,
		to: impl Into<String>,
		recipient: Recipient,
		tariff_code: i32,
	) -> Self {
		Self {
			from_location: Location::address(from),
			to_location: Location::address(to),
			recipient,
			packages: Vec::new(),
			tariff_code,
		}
	}

	/// Appends a package.
	pub fn with_package(mut self, package: Package) -> Self {
		self.packages.push(package);

		self
	}

	/// Validates recipient, packages and items before dispatch.
	pub fn validate(&self) -> Result<(), ValidationError> {
		self.recipient.validate()?;

		if self.packages.is_empty() {
			return Err(ValidationError::NoPackages);
		}

		self.packages.iter().try_for_each(Package::validate)
	}
}

/// Error entry attached to a request record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestProblem {
	/// Carrier error code.
	#[serde(default)]
	pub code: String,
	/// Human-readable message.
	#[serde(default)]
	pub message: String,
}

/// Asynchronous acceptance state of a carrier request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
	/// Carrier-assigned request UUID.
	#[serde(default)]
	pub request_uuid: String,
	/// Request type (e.g. `CREATE`).
	#[serde(default, rename = "type")]
	pub kind: String,
	/// Timestamp as reported by the carrier.
	#[serde(default)]
	pub date_time: String,
	/// Processing state (e.g. `ACCEPTED`, `INVALID`).
	#[serde(default)]
	pub state: String,
	/// Errors, in carrier order.
	#[serde(default)]
	pub errors: Vec<RequestProblem>,
}

/// Order entity reference returned by `orders`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
	/// Order UUID; empty when the carrier did not confirm the order.
	#[serde(default)]
	pub uuid: String,
}

/// Result of an order creation request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
	/// Accepted entity.
	#[serde(default)]
	pub entity: EntityRef,
	/// Request records describing acceptance state.
	#[serde(default)]
	pub requests: Vec<RequestRecord>,
}
impl OrderReceipt {
	/// Order UUID (possibly empty).
	pub fn uuid(&self) -> &str {
		&self.entity.uuid
	}

	/// Returns `true` when the carrier assigned a UUID.
	pub fn is_confirmed(&self) -> bool {
		!self.entity.uuid.is_empty()
	}
}

/// One lifecycle event of an order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
	/// Status code (e.g. `CREATED`).
	#[serde(default)]
	pub code: String,
	/// Human-readable name.
	#[serde(default)]
	pub name: String,
	/// Timestamp as reported by the carrier.
	#[serde(default)]
	pub date_time: String,
	/// City where the event happened.
	#[serde(default)]
	pub city: String,
}

/// Order entity returned by `orders/{uuid}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
	/// Order UUID.
	#[serde(default)]
	pub uuid: String,
	/// Tariff the order ships with.
	#[serde(default)]
	pub tariff_code: i32,
	/// Recipient.
	#[serde(default)]
	pub recipient: Recipient,
	/// Origin.
	#[serde(default)]
	pub from_location: Location,
	/// Destination.
	#[serde(default)]
	pub to_location: Location,
	/// Packages.
	#[serde(default)]
	pub packages: Vec<Package>,
	/// Lifecycle events, most recent first.
	#[serde(default)]
	pub statuses: Vec<Status>,
}
impl OrderInfo {
	/// Most recent status, if any.
	pub fn latest_status(&self) -> Option<&Status> {
		self.statuses.first()
	}
}

/// Envelope of an `orders/{uuid}` response.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderEnvelope {
	/// Order entity.
	#[serde(default)]
	pub entity: OrderInfo,
	/// Request records.
	#[serde(default)]
	pub requests: Vec<RequestRecord>,
}

fn is_zero(value: &i32) -> bool {
	*value == 0
}
