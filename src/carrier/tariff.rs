// self
use crate::{
	_prelude::*,
	carrier::CarrierClient,
	http::CarrierRequest,
	model::{PriceSending, Size, TariffCodes, TariffRequest},
	obs::{self, OperationKind},
};

const ENDPOINT: &str = "calculator/tarifflist";

impl CarrierClient {
	/// Quotes every tariff available between two addresses for a parcel of `size`.
	///
	/// Uses the default shipment type, handover date, currency, and language of
	/// [`TariffRequest::new`]. Quotes are returned in carrier order, unfiltered.
	pub async fn calculate(
		&self,
		from: impl Into<String>,
		to: impl Into<String>,
		size: Size,
	) -> Result<Vec<PriceSending>> {
		self.calculate_with(&TariffRequest::new(from, to, size)).await
	}

	/// Quotes every tariff for a fully specified request.
	pub async fn calculate_with(&self, request: &TariffRequest) -> Result<Vec<PriceSending>> {
		obs::observe(OperationKind::Calculate, self.request_tariffs(request)).await
	}

	async fn request_tariffs(&self, request: &TariffRequest) -> Result<Vec<PriceSending>> {
		let url = self.config.endpoint(ENDPOINT)?;
		let codes: TariffCodes =
			self.call(CarrierRequest::post_json(url, ENDPOINT, request)?).await?;

		Ok(codes.tariff_codes)
	}
}
