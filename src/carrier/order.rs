// self
use crate::{
	_prelude::*,
	carrier::CarrierClient,
	error::{ConfigError, NotFoundError, ValidationError},
	http::CarrierRequest,
	model::{OrderEnvelope, OrderInfo, OrderReceipt, OrderRequest},
	obs::{self, OperationKind},
};

const ENDPOINT: &str = "orders";

impl CarrierClient {
	/// Submits a delivery order.
	///
	/// The order is validated before any request is sent. The carrier accepts orders
	/// asynchronously: an empty [`OrderReceipt::uuid`] is returned as-is and means the order was
	/// not confirmed; inspect [`OrderReceipt::requests`] for the reason.
	pub async fn create_order(&self, order: &OrderRequest) -> Result<OrderReceipt> {
		order.validate()?;

		obs::observe(OperationKind::CreateOrder, self.submit_order(order)).await
	}

	/// Fetches the order entity identified by `uuid`.
	pub async fn get_order(&self, uuid: &str) -> Result<OrderInfo> {
		if uuid.is_empty() {
			return Err(ValidationError::EmptyOrderUuid.into());
		}

		obs::observe(OperationKind::GetOrder, self.fetch_order(uuid)).await
	}

	/// Returns the code of the most recent status of order `uuid`.
	///
	/// Fails with [`NotFoundError::Status`] when the carrier lists no statuses.
	pub async fn get_status(&self, uuid: &str) -> Result<String> {
		if uuid.is_empty() {
			return Err(ValidationError::EmptyOrderUuid.into());
		}

		obs::observe(OperationKind::GetStatus, self.fetch_status(uuid)).await
	}

	async fn fetch_status(&self, uuid: &str) -> Result<String> {
		let order = self.fetch_order(uuid).await?;

		match order.latest_status() {
			Some(status) => Ok(status.code.clone()),
			None => Err(NotFoundError::Status { uuid: uuid.to_owned() }.into()),
		}
	}

	async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt> {
		let url = self.config.endpoint(ENDPOINT)?;

		self.call(CarrierRequest::post_json(url, ENDPOINT, order)?).await
	}

	async fn fetch_order(&self, uuid: &str) -> Result<OrderInfo> {
		let mut url = self.config.endpoint(ENDPOINT)?;

		url.path_segments_mut()
			.map_err(|_| ConfigError::UnsupportedBaseUrl { url: self.config.base_url.to_string() })?
			.pop_if_empty()
			.push(uuid);

		let envelope: OrderEnvelope =
			self.call(CarrierRequest::get(url, format!("{ENDPOINT}/{uuid}"))).await?;

		Ok(envelope.entity)
	}
}
