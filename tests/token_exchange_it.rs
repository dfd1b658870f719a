mod common;

// crates.io
use httpmock::prelude::*;
// self
use cdek_client::{
	CarrierClient, CarrierConfig,
	error::{AuthError, Error},
};
use common::*;

#[tokio::test]
async fn authenticate_returns_bearer_token() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = mock_token(&server).await;
	let token = client.authenticate().await.expect("Token exchange should succeed.");

	mock.assert_async().await;

	assert_eq!(token.access_token.expose(), ACCESS_TOKEN);
	assert_eq!(token.bearer(), BEARER);
	assert_eq!(token.expires_in.whole_seconds(), 3599);
	assert_eq!(token.scope.as_deref(), Some("order:all payment:all"));
	assert!(token.jti.is_some());
	assert!(token.expires_at().is_some_and(|expires_at| expires_at > token.issued_at));
}

#[tokio::test]
async fn rejected_credentials_surface_status() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = mock_token_rejected(&server).await;
	let err = client.authenticate().await.expect_err("Rejected credentials should fail.");

	mock.assert_async().await;

	match &err {
		Error::Auth(AuthError::Rejected { message, status }) => {
			assert_eq!(message, "Bad client credentials");
			assert_eq!(*status, Some(401));
		},
		other => panic!("Unexpected error: {other:?}."),
	}

	assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn malformed_token_body_is_an_auth_error() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"token_type\":\"bearer\",\"expires_in\":\"soon\"}");
		})
		.await;
	let err = client.authenticate().await.expect_err("Malformed token JSON should fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Auth(AuthError::Parse { status: Some(200), .. })));
}

#[tokio::test]
async fn empty_access_token_is_never_a_success() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/oauth/token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"\",\"token_type\":\"bearer\",\"expires_in\":3599}");
		})
		.await;
	let err = client.authenticate().await.expect_err("Empty access tokens should fail.");

	mock.assert_async().await;

	assert!(matches!(err, Error::Auth(AuthError::EmptyToken)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_failure() {
	let config = CarrierConfig::builder()
		.account(ACCOUNT)
		.secret(SECRET)
		.base_url_str("http://127.0.0.1:9/v2/")
		.expect("Base URL should parse.")
		.build()
		.expect("Carrier config should build.");
	let client = CarrierClient::new(config).expect("Carrier client should build.");
	let err = client.authenticate().await.expect_err("Unreachable endpoints should fail.");

	assert!(matches!(err, Error::Auth(AuthError::Network { .. })));
}

#[tokio::test]
async fn token_redirects_are_not_followed() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let redirect = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/oauth/token");
			then.status(307).header("location", server.url("/elsewhere/token"));
		})
		.await;
	let elsewhere = server
		.mock_async(|when, then| {
			when.path("/elsewhere/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"stolen\",\"token_type\":\"bearer\",\"expires_in\":3599}",
			);
		})
		.await;
	let err = client.authenticate().await.expect_err("Redirected exchanges should fail.");

	redirect.assert_async().await;
	elsewhere.assert_calls_async(0).await;

	assert!(matches!(err, Error::Auth(_)));
}
