//! Transport primitives for token exchanges and carrier API calls.
//!
//! [`ReqwestHttpClient`] owns the connection pool shared by both request kinds. Token exchanges
//! go through [`TokenHandle`], an [`AsyncHttpClient`] adapter that records the response status in
//! a [`ResponseMetadataSlot`] so failures can be classified after `oauth2` resolves. Carrier calls
//! go through [`ReqwestHttpClient::send`], which accepts only HTTP 200 and 202.

// std
use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse};
use reqwest::{
	Method, Response, StatusCode,
	header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::Token,
	error::{DecodeError, TransportError},
};

/// Content type sent with every carrier API call.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Captures metadata from the most recent token endpoint response.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadata {
	/// HTTP status code returned by the token endpoint, if available.
	pub status: Option<u16>,
}

/// Thread-safe slot for sharing [`ResponseMetadata`] between transport and error layers.
///
/// The token provider creates a fresh slot for each exchange and reads it right after `oauth2`
/// resolves.
#[derive(Clone, Debug, Default)]
pub struct ResponseMetadataSlot(Arc<Mutex<Option<ResponseMetadata>>>);
impl ResponseMetadataSlot {
	/// Stores new metadata for the current request.
	pub fn store(&self, meta: ResponseMetadata) {
		*self.0.lock() = Some(meta);
	}

	/// Returns the captured metadata, if any, consuming it from the slot.
	pub fn take(&self) -> Option<ResponseMetadata> {
		self.0.lock().take()
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// The default client sets no timeout; callers wanting a deadline configure it on the
/// [`ReqwestClient`] they pass to [`ReqwestHttpClient::with_client`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a token exchange handle that records outcomes in `slot`.
	pub fn with_metadata(&self, slot: ResponseMetadataSlot) -> TokenHandle {
		TokenHandle::new(self.0.clone(), slot)
	}

	/// Sends a single authenticated carrier request.
	///
	/// Only HTTP 200 and 202 count as success; every other status becomes
	/// [`TransportError::Status`]. The response body is left unread for the caller.
	pub async fn send(
		&self,
		request: CarrierRequest,
		token: &Token,
	) -> Result<CarrierResponse, TransportError> {
		let CarrierRequest { method, url, endpoint, body } = request;
		let mut builder = self
			.0
			.request(method, url)
			.header(CONTENT_TYPE, JSON_CONTENT_TYPE)
			.header(AUTHORIZATION, token.bearer());

		if let Some(body) = body {
			builder = builder.body(body);
		}

		let response = builder.send().await?;
		let status = response.status();

		match status {
			StatusCode::OK | StatusCode::ACCEPTED => Ok(CarrierResponse { endpoint, response }),
			// Dropping the response here releases the connection.
			_ => Err(TransportError::Status { endpoint, status: status.as_u16() }),
		}
	}
}
impl From<ReqwestClient> for ReqwestHttpClient {
	fn from(client: ReqwestClient) -> Self {
		Self::with_client(client)
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// One outbound carrier call.
#[derive(Clone, Debug)]
pub struct CarrierRequest {
	/// HTTP method.
	pub method: Method,
	/// Fully resolved endpoint URL.
	pub url: Url,
	/// Endpoint path relative to the base URL, used in error reports.
	pub endpoint: String,
	/// JSON body for methods that carry one.
	pub body: Option<Vec<u8>>,
}
impl CarrierRequest {
	/// Builds a body-less `GET` request.
	pub fn get(url: Url, endpoint: impl Into<String>) -> Self {
		Self { method: Method::GET, url, endpoint: endpoint.into(), body: None }
	}

	/// Builds a `POST` request carrying `payload` encoded as JSON.
	pub fn post_json<T>(url: Url, endpoint: impl Into<String>, payload: &T) -> Result<Self>
	where
		T: ?Sized + Serialize,
	{
		let endpoint = endpoint.into();
		let body = serde_json::to_vec(payload)
			.map_err(|source| DecodeError::Encode { endpoint: endpoint.clone(), source })?;

		Ok(Self { method: Method::POST, url, endpoint, body: Some(body) })
	}
}

/// Successful (200/202) carrier response whose body has not been read yet.
///
/// The body is owned by this value: it is read once by [`CarrierResponse::decode`] and the
/// underlying connection is released when the value drops, on every exit path.
#[derive(Debug)]
pub struct CarrierResponse {
	endpoint: String,
	response: Response,
}
impl CarrierResponse {
	/// HTTP status of the response (200 or 202).
	pub fn status(&self) -> u16 {
		self.response.status().as_u16()
	}

	/// Endpoint path the response belongs to.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Reads the full body and decodes it as JSON into `T`.
	pub async fn decode<T>(self) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let Self { endpoint, response } = self;
		let bytes = response.bytes().await.map_err(TransportError::from)?;

		decode_json(&endpoint, &bytes)
	}
}

/// Decodes `bytes` into `T`, reporting the JSON path of the first mismatch.
pub fn decode_json<T>(endpoint: &str, bytes: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let de = &mut serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(de)
		.map_err(|source| DecodeError::Json { endpoint: endpoint.to_owned(), source }.into())
}

/// Instrumented adapter that executes token exchanges for `oauth2`.
pub(crate) struct InstrumentedHttpClient {
	client: ReqwestClient,
	slot: ResponseMetadataSlot,
}

/// [`AsyncHttpClient`] handle returned by [`ReqwestHttpClient::with_metadata`].
#[derive(Clone)]
pub struct TokenHandle(Arc<InstrumentedHttpClient>);
impl TokenHandle {
	fn new(client: ReqwestClient, slot: ResponseMetadataSlot) -> Self {
		Self(Arc::new(InstrumentedHttpClient { client, slot }))
	}
}
impl<'c> AsyncHttpClient<'c> for TokenHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = Arc::clone(&self.0);

		Box::pin(async move {
			client.slot.take();

			let response = client
				.client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();

			client.slot.store(ResponseMetadata { status: Some(status.as_u16()) });

			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
