//! Shared fixtures for integration tests against an `httpmock` carrier.

#![allow(dead_code)]

// crates.io
use httpmock::{Mock, prelude::*};
// self
use cdek_client::{CarrierClient, CarrierConfig};

pub const ACCOUNT: &str = "EMscd6r9JnFiQ3bLoyjJY6eM78JrJceI";
pub const SECRET: &str = "PjLZkKBHEiLK3YsjtNrt3TGNG0ahs3kG";
pub const ACCESS_TOKEN: &str = "carrier-access-token";
pub const BEARER: &str = "Bearer carrier-access-token";

/// Builds a client whose base URL is the mock server's `/v2/` prefix.
pub fn build_client(server: &MockServer) -> CarrierClient {
	let config = CarrierConfig::builder()
		.account(ACCOUNT)
		.secret(SECRET)
		.base_url_str(&server.url("/v2"))
		.expect("Mock server URL should parse.")
		.build()
		.expect("Carrier config should build for the mock server.");

	CarrierClient::new(config).expect("Carrier client should build.")
}

/// Mocks a successful token exchange.
pub async fn mock_token(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v2/oauth/token")
				.header("content-type", "application/x-www-form-urlencoded");
			then.status(200).header("content-type", "application/json").body(format!(
				"{{\"access_token\":\"{ACCESS_TOKEN}\",\"token_type\":\"bearer\",\"expires_in\":3599,\"scope\":\"order:all payment:all\",\"jti\":\"9adca50a-c4e3-4a4e-a7b3-1f3a1f1f1f1f\"}}"
			));
		})
		.await
}

/// Mocks a token exchange rejected with HTTP 401.
pub async fn mock_token_rejected(server: &MockServer) -> Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/oauth/token");
			then.status(401).header("content-type", "application/json").body(
				"{\"error\":\"invalid_client\",\"error_description\":\"Bad client credentials\"}",
			);
		})
		.await
}
