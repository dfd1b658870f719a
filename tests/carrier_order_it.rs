mod common;

// crates.io
use httpmock::prelude::*;
// self
use cdek_client::{
	error::{Error, NotFoundError, TransportError, ValidationError},
	model::{Item, OrderRequest, Package, Payment, Recipient, Size},
};
use common::*;

const ORDER_UUID: &str = "72753031-1e4f-4b1a-8c1d-6c2f4a0b9e11";

fn order() -> OrderRequest {
	let recipient =
		Recipient::new("Семенов Семен", ["+79998887766"]).expect("Recipient should be valid.");
	let item = Item::new("00055", "Товар", Payment { value: 0.0, vat_sum: None }, 700, 2, 300.0)
		.with_url("https://shop.example/items/00055");

	OrderRequest::new("Москва, ул. Тверская, 1", "Тюмень, ул. Мира, 1", recipient, 139)
		.with_package(Package::from_size(Size::new(10, 10, 4000, 10), "bar-001").with_item(item))
}

fn receipt(uuid: &str) -> String {
	format!(
		r#"{{"entity":{{"uuid":"{uuid}"}},"requests":[{{"request_uuid":"d2f3a9c4","type":"CREATE","date_time":"2020-11-03T11:49:32+0700","state":"ACCEPTED"}}]}}"#
	)
}

#[tokio::test]
async fn created_order_status_is_fetched_by_uuid() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let token = mock_token(&server).await;
	let body = serde_json::to_value(order()).expect("Order should serialize.");
	let create = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/v2/orders")
				.header("authorization", BEARER)
				.header("content-type", "application/json")
				.json_body(body);
			then.status(202).header("content-type", "application/json").body(receipt(ORDER_UUID));
		})
		.await;
	let status = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/v2/orders/{ORDER_UUID}")).header("authorization", BEARER);
			then.status(200).header("content-type", "application/json").body(format!(
				r#"{{"entity":{{"uuid":"{ORDER_UUID}","tariff_code":139,"statuses":[
					{{"code":"CREATED","name":"Создан","date_time":"2020-11-03T12:00:00+0700","city":"Москва"}},
					{{"code":"ACCEPTED","name":"Принят","date_time":"2020-11-03T11:50:00+0700"}}
				]}}}}"#
			));
		})
		.await;
	let created = client.create_order(&order()).await.expect("Order should be created.");

	assert!(created.is_confirmed());
	assert_eq!(created.uuid(), ORDER_UUID);
	assert_eq!(created.requests[0].state, "ACCEPTED");

	let code = client.get_status(created.uuid()).await.expect("Status should be fetched.");

	token.assert_calls_async(2).await;
	create.assert_async().await;
	status.assert_async().await;

	assert_eq!(code, "CREATED");
}

#[tokio::test]
async fn unconfirmed_order_returns_an_empty_uuid() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let _token = mock_token(&server).await;
	let _create = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/orders");
			then.status(200).header("content-type", "application/json").body(
				r#"{"requests":[{"request_uuid":"d2f3a9c4","type":"CREATE","state":"INVALID","errors":[{"code":"v2_entity_empty","message":"Recipient city is unknown"}]}]}"#,
			);
		})
		.await;
	let created = client.create_order(&order()).await.expect("Unconfirmed orders are not errors.");

	assert!(!created.is_confirmed());
	assert_eq!(created.uuid(), "");
	assert_eq!(created.requests[0].errors[0].code, "v2_entity_empty");
}

#[tokio::test]
async fn invalid_order_is_rejected_before_any_request() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let token = mock_token(&server).await;
	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/orders");
			then.status(202).header("content-type", "application/json").body(receipt(ORDER_UUID));
		})
		.await;
	let mut order = order();

	order.packages.clear();

	let err = client.create_order(&order).await.expect_err("Orders without packages should fail.");

	token.assert_calls_async(0).await;
	create.assert_calls_async(0).await;

	assert!(matches!(err, Error::Validation(ValidationError::NoPackages)));
}

#[tokio::test]
async fn order_without_statuses_is_not_found() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let _token = mock_token(&server).await;
	let _status = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/v2/orders/{ORDER_UUID}"));
			then.status(200)
				.header("content-type", "application/json")
				.body(format!(r#"{{"entity":{{"uuid":"{ORDER_UUID}","statuses":[]}}}}"#));
		})
		.await;
	let err = client.get_status(ORDER_UUID).await.expect_err("Empty statuses should fail.");

	match err {
		Error::NotFound(NotFoundError::Status { uuid }) => assert_eq!(uuid, ORDER_UUID),
		other => panic!("Unexpected error: {other:?}."),
	}
}

#[tokio::test]
async fn full_order_entity_is_exposed() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let _token = mock_token(&server).await;
	let _status = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/v2/orders/{ORDER_UUID}"));
			then.status(200).header("content-type", "application/json").body(format!(
				r#"{{"entity":{{"uuid":"{ORDER_UUID}","tariff_code":139,
					"recipient":{{"name":"Семенов Семен","phones":[{{"number":"+79998887766"}}]}},
					"to_location":{{"code":270,"city":"Тюмень","address":"ул. Мира, 1"}},
					"statuses":[{{"code":"DELIVERED","name":"Вручен"}}]}}}}"#
			));
		})
		.await;
	let info = client.get_order(ORDER_UUID).await.expect("Order should be fetched.");

	assert_eq!(info.tariff_code, 139);
	assert_eq!(info.recipient.phones[0].number, "+79998887766");
	assert_eq!(info.to_location.code, "270");
	assert_eq!(info.latest_status().map(|status| status.code.as_str()), Some("DELIVERED"));
}

#[tokio::test]
async fn unknown_order_is_a_transport_error() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let _token = mock_token(&server).await;
	let _status = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/v2/orders/{ORDER_UUID}"));
			then.status(404).header("content-type", "application/json").body("{}");
		})
		.await;
	let err = client.get_status(ORDER_UUID).await.expect_err("HTTP 404 should fail.");

	match err {
		Error::Transport(TransportError::Status { endpoint, status }) => {
			assert_eq!(endpoint, format!("orders/{ORDER_UUID}"));
			assert_eq!(status, 404);
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}

#[tokio::test]
async fn empty_uuid_is_rejected_before_any_request() {
	let server = MockServer::start_async().await;
	let client = build_client(&server);
	let token = mock_token(&server).await;
	let err = client.get_status("").await.expect_err("Empty UUID should fail.");

	token.assert_calls_async(0).await;

	assert!(matches!(err, Error::Validation(ValidationError::EmptyOrderUuid)));
}
