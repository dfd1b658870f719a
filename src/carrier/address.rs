// self
use crate::{
	_prelude::*,
	carrier::CarrierClient,
	error::{NotFoundError, ValidationError},
	http::CarrierRequest,
	model::{self, AddressMatch, DeliveryPoint},
	obs::{self, OperationKind},
};

const ENDPOINT: &str = "deliverypoints";

impl CarrierClient {
	/// Checks `query` against the carrier's delivery-point directory.
	///
	/// Returns the first point (in directory order) whose address, full address, or name
	/// contains `query`. When nothing matches the call fails with [`NotFoundError::Address`],
	/// which carries `query` back unchanged. An empty query fails with
	/// [`ValidationError::EmptyAddress`] before any request is sent.
	pub async fn validate_address(&self, query: &str) -> Result<AddressMatch> {
		if query.is_empty() {
			return Err(ValidationError::EmptyAddress.into());
		}

		obs::observe(OperationKind::ValidateAddress, self.match_address(query)).await
	}

	/// Fetches the full delivery-point directory in carrier order.
	pub async fn delivery_points(&self) -> Result<Vec<DeliveryPoint>> {
		obs::observe(OperationKind::DeliveryPoints, self.fetch_points()).await
	}

	async fn fetch_points(&self) -> Result<Vec<DeliveryPoint>> {
		let url = self.config.endpoint(ENDPOINT)?;

		self.call(CarrierRequest::get(url, ENDPOINT)).await
	}

	async fn match_address(&self, query: &str) -> Result<AddressMatch> {
		let points = self.fetch_points().await?;

		match model::find_address(&points, query) {
			Some(found) => Ok(found),
			None => Err(NotFoundError::Address { query: query.to_owned() }.into()),
		}
	}
}
