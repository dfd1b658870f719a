//! Carrier operations composed from the token provider and the transport.
//!
//! [`CarrierClient`] holds only immutable configuration plus a cloneable connection pool. Every
//! public operation authenticates afresh, performs exactly one carrier call, and decodes the
//! response; no token, request, or response outlives the call that created it.

mod address;
mod order;
mod tariff;

// crates.io
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::Token,
	config::CarrierConfig,
	error::ConfigError,
	http::{CarrierRequest, ReqwestHttpClient},
	oauth,
	obs::{self, OperationKind},
};

/// Client for the carrier's REST API.
#[derive(Clone)]
pub struct CarrierClient {
	/// Account credentials and base URL.
	pub config: CarrierConfig,
	/// HTTP client wrapper used for every outbound request.
	pub http_client: ReqwestHttpClient,
}
impl CarrierClient {
	/// Creates a client backed by a freshly built reqwest client.
	///
	/// The client never follows redirects: token and carrier endpoints answer directly, and a
	/// redirected token exchange would resend the account secret to another URI. No request
	/// deadline is set.
	pub fn new(config: CarrierConfig) -> Result<Self> {
		let client = ReqwestClient::builder()
			.redirect(Policy::none())
			.build()
			.map_err(ConfigError::from)?;

		Ok(Self::with_http_client(config, ReqwestHttpClient::with_client(client)))
	}

	/// Creates a client that reuses a caller-provided transport.
	///
	/// Configure the transport to disable redirect following, as [`CarrierClient::new`] does.
	pub fn with_http_client(config: CarrierConfig, http_client: impl Into<ReqwestHttpClient>) -> Self {
		Self { config, http_client: http_client.into() }
	}

	/// Exchanges the configured credentials for a fresh bearer token.
	pub async fn authenticate(&self) -> Result<Token> {
		obs::observe(OperationKind::Authenticate, oauth::authenticate(&self.config, &self.http_client))
			.await
	}

	/// Authenticates, sends `request`, and decodes the response body into `T`.
	async fn call<T>(&self, request: CarrierRequest) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let token = oauth::authenticate(&self.config, &self.http_client).await?;
		let response = self.http_client.send(request, &token).await?;

		response.decode().await
	}
}
impl Debug for CarrierClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CarrierClient").field("config", &self.config).finish()
	}
}
