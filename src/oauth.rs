//! Client-credentials token exchange against the carrier's `oauth/token` endpoint.
//!
//! Credentials travel in the form body (`client_id`, `client_secret`,
//! `grant_type=client_credentials`). The response is decoded into [`Token`]; every failure is
//! surfaced as [`AuthError`] without retries.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, ClientId, ClientSecret, EndpointNotSet, EndpointSet, ExtraTokenFields,
	HttpClientError, RequestTokenError, StandardRevocableToken, StandardTokenResponse,
	TokenResponse, TokenUrl,
	basic::{
		BasicErrorResponse, BasicRevocationErrorResponse, BasicTokenIntrospectionResponse,
		BasicTokenType,
	},
};
// self
use crate::{
	_prelude::*,
	auth::{Token, TokenBuilderError},
	config::CarrierConfig,
	error::AuthError,
	http::{ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
};

/// Carrier-specific fields of the token response beyond the RFC 6749 set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierTokenFields {
	/// Token identifier.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub jti: Option<String>,
}
impl ExtraTokenFields for CarrierTokenFields {}

/// Token response shape returned by the carrier.
pub type CarrierTokenResponse = StandardTokenResponse<CarrierTokenFields, BasicTokenType>;

type ConfiguredClient = oauth2::Client<
	BasicErrorResponse,
	CarrierTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointSet,
>;
type ExchangeError = RequestTokenError<HttpClientError<ReqwestError>, BasicErrorResponse>;

/// Token provider bound to one carrier account.
pub struct ClientCredentials<'a> {
	oauth_client: ConfiguredClient,
	http_client: &'a ReqwestHttpClient,
}
impl<'a> ClientCredentials<'a> {
	/// Prepares an exchange for the account in `config`.
	pub fn new(config: &CarrierConfig, http_client: &'a ReqwestHttpClient) -> Result<Self> {
		let token_url = TokenUrl::from_url(config.token_endpoint()?);
		let oauth_client = oauth2::Client::new(ClientId::new(config.account.clone()))
			.set_client_secret(ClientSecret::new(config.secret.expose().to_owned()))
			.set_auth_type(AuthType::RequestBody)
			.set_token_uri(token_url);

		Ok(Self { oauth_client, http_client })
	}

	/// Performs one exchange and returns a fresh bearer token.
	///
	/// Never succeeds with an empty access token.
	pub async fn exchange(&self) -> Result<Token> {
		let meta = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(meta.clone());
		let response = self
			.oauth_client
			.exchange_client_credentials()
			.request_async(&handle)
			.await
			.map_err(|err| map_exchange_error(meta.take(), err))?;

		map_token_response(response)
	}
}
impl Debug for ClientCredentials<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentials")
			.field("token_url", &self.oauth_client.token_uri().as_str())
			.finish()
	}
}

/// Exchanges the account credentials in `config` for a bearer token.
pub async fn authenticate(config: &CarrierConfig, http_client: &ReqwestHttpClient) -> Result<Token> {
	ClientCredentials::new(config, http_client)?.exchange().await
}

fn map_token_response(response: CarrierTokenResponse) -> Result<Token> {
	let expires_in = response.expires_in().map(|value| value.as_secs()).unwrap_or_default();
	let expires_in = i64::try_from(expires_in).map_err(|_| AuthError::ExpiresInOutOfRange)?;
	let scope = response.scopes().map(|scopes| {
		scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(" ")
	});
	let token_type = response.token_type().as_ref().to_owned();

	Token::builder()
		.access_token(response.access_token().secret().to_owned())
		.token_type(token_type)
		.expires_in(Duration::seconds(expires_in))
		.scope(scope)
		.jti(response.extra_fields().jti.clone())
		.issued_at(OffsetDateTime::now_utc())
		.build()
		.map_err(|err| match err {
			TokenBuilderError::MissingAccessToken => AuthError::EmptyToken.into(),
			TokenBuilderError::NegativeExpiry | TokenBuilderError::ExpiryOverflow =>
				AuthError::ExpiresInOutOfRange.into(),
		})
}

fn map_exchange_error(meta: Option<ResponseMetadata>, err: ExchangeError) -> Error {
	let status = meta.and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => {
			let message = match response.error_description() {
				Some(description) => description.clone(),
				None => response.error().as_ref().to_owned(),
			};

			AuthError::Rejected { message, status }.into()
		},
		RequestTokenError::Request(error) => map_transport_error(status, error),
		RequestTokenError::Parse(source, _body) => AuthError::Parse { source, status }.into(),
		RequestTokenError::Other(message) => AuthError::Rejected { message, status }.into(),
	}
}

fn map_transport_error(status: Option<u16>, err: HttpClientError<ReqwestError>) -> Error {
	match err {
		HttpClientError::Reqwest(inner) if inner.is_builder() => AuthError::request(*inner).into(),
		HttpClientError::Reqwest(inner) => AuthError::network(*inner).into(),
		HttpClientError::Http(inner) => AuthError::request(inner).into(),
		HttpClientError::Io(inner) => AuthError::network(inner).into(),
		HttpClientError::Other(message) => AuthError::Rejected { message, status }.into(),
		_ => AuthError::Rejected {
			message: "HTTP client error occurred while calling the token endpoint".into(),
			status,
		}
		.into(),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::config::Environment;

	#[test]
	fn builds_request_body_client() {
		let config = CarrierConfig::builder()
			.account("account")
			.secret("secret")
			.environment(Environment::Sandbox)
			.build()
			.expect("Config should build.");
		let http_client = ReqwestHttpClient::default();
		let exchange =
			ClientCredentials::new(&config, &http_client).expect("Exchange should be constructed.");

		assert_eq!(
			exchange.oauth_client.token_uri().as_str(),
			"https://api.edu.cdek.ru/v2/oauth/token"
		);
		assert!(matches!(exchange.oauth_client.auth_type(), AuthType::RequestBody));
	}

	#[test]
	fn token_response_keeps_carrier_fields() {
		let response: CarrierTokenResponse = serde_json::from_str(
			r#"{"access_token":"abc","token_type":"bearer","expires_in":3599,"scope":"order:all payment:all","jti":"9adca50a"}"#,
		)
		.expect("Token response should decode.");
		let token = map_token_response(response).expect("Token should map.");

		assert_eq!(token.access_token.expose(), "abc");
		assert_eq!(token.expires_in, Duration::seconds(3599));
		assert_eq!(token.scope.as_deref(), Some("order:all payment:all"));
		assert_eq!(token.jti.as_deref(), Some("9adca50a"));
	}

	#[test]
	fn empty_access_token_is_an_auth_error() {
		let response: CarrierTokenResponse =
			serde_json::from_str(r#"{"access_token":"","token_type":"bearer","expires_in":60}"#)
				.expect("Token response should decode.");
		let err = map_token_response(response).expect_err("Empty tokens must be rejected.");

		assert!(matches!(err, Error::Auth(AuthError::EmptyToken)));
	}

	#[test]
	fn huge_expires_in_is_out_of_range() {
		let response: CarrierTokenResponse = serde_json::from_str(
			r#"{"access_token":"abc","token_type":"bearer","expires_in":9000000000000000000}"#,
		)
		.expect("Token response should decode.");
		let err = map_token_response(response).expect_err("Unrepresentable expiry must be rejected.");

		assert!(matches!(err, Error::Auth(AuthError::ExpiresInOutOfRange)));
	}
}
