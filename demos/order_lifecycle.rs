//! Walks one parcel through the carrier against a local mock: quote tariffs, verify the pickup
//! address, create the order, and poll its status.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use cdek_client::{
	CarrierClient, CarrierConfig,
	model::{Item, OrderRequest, Package, Payment, Recipient, Size, TariffCodes, TariffFilter},
};

const ORDER_UUID: &str = "72753031-1e4f-4b1a-8c1d-6c2f4a0b9e11";

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":3599}",
			);
		})
		.await;
	let tariff_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/calculator/tarifflist");
			then.status(200).header("content-type", "application/json").body(
				r#"{"tariff_codes":[
					{"tariff_code":136,"tariff_name":"Посылка склад-склад","tariff_description":"Экономичная доставка","delivery_sum":810.0,"period_min":2,"period_max":4},
					{"tariff_code":7,"tariff_name":"Международный экспресс документы","delivery_sum":4100.5,"period_min":1,"period_max":1}
				]}"#,
			);
		})
		.await;
	let points_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v2/deliverypoints");
			then.status(200).header("content-type", "application/json").body(
				r#"[{"name":"Тюмень Мира","location":{"city":"Тюмень","address":"ул. Мира, 1","address_full":"Россия, Тюмень, ул. Мира, 1"}}]"#,
			);
		})
		.await;
	let order_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/v2/orders");
			then.status(202)
				.header("content-type", "application/json")
				.body(format!(r#"{{"entity":{{"uuid":"{ORDER_UUID}"}},"requests":[{{"type":"CREATE","state":"ACCEPTED"}}]}}"#));
		})
		.await;
	let status_mock = server
		.mock_async(|when, then| {
			when.method(GET).path(format!("/v2/orders/{ORDER_UUID}"));
			then.status(200).header("content-type", "application/json").body(format!(
				r#"{{"entity":{{"uuid":"{ORDER_UUID}","statuses":[{{"code":"CREATED","name":"Создан"}}]}}}}"#
			));
		})
		.await;
	let config = CarrierConfig::builder()
		.account("demo-account")
		.secret("demo-secret")
		.base_url_str(&server.url("/v2"))?
		.build()?;
	let client = CarrierClient::new(config)?;
	let size = Size::new(10, 10, 4000, 10);
	let quotes = client.calculate("Москва, ул. Тверская, 1", "Тюмень, ул. Мира, 1", size).await?;
	let economy = TariffCodes::from(quotes)
		.filtered(&TariffFilter::default().with_description("экономичная доставка"));

	for quote in &economy.tariff_codes {
		println!(
			"Tariff {} ({}) costs {} and takes {}-{} days.",
			quote.tariff_code, quote.tariff_name, quote.delivery_sum, quote.period_min, quote.period_max
		);
	}

	let pickup = client.validate_address("ул. Мира, 1").await?;

	println!("Pickup point verified: {}.", pickup.full_address);

	let tariff_code = economy.tariff_codes.first().map(|quote| quote.tariff_code).unwrap_or(136);
	let recipient = Recipient::new("Семенов Семен", ["+79998887766"])?;
	let item = Item::new("00055", "Товар", Payment { value: 0.0, vat_sum: None }, 700, 2, 300.0);
	let order = OrderRequest::new("Москва, ул. Тверская, 1", &pickup.full_address, recipient, tariff_code)
		.with_package(Package::from_size(size, "bar-001").with_item(item));
	let receipt = client.create_order(&order).await?;

	println!("Order created: {}.", receipt.uuid());

	let status = client.get_status(receipt.uuid()).await?;

	println!("Order status: {status}.");

	token_mock.assert_calls_async(4).await;
	tariff_mock.assert_async().await;
	points_mock.assert_async().await;
	order_mock.assert_async().await;
	status_mock.assert_async().await;

	Ok(())
}
