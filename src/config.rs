//! Carrier configuration: account credentials plus the API base URL.
//!
//! The embedding application sources these values however it likes and hands a validated
//! [`CarrierConfig`] to [`CarrierClient`](crate::CarrierClient); the crate never reads
//! process-wide state.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Well-known carrier deployments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// Live API.
	#[default]
	Production,
	/// Integration sandbox with test credentials.
	Sandbox,
}
impl Environment {
	/// Returns the API base URL for the deployment.
	pub const fn base_url(self) -> &'static str {
		match self {
			Environment::Production => "https://api.cdek.ru/v2/",
			Environment::Sandbox => "https://api.edu.cdek.ru/v2/",
		}
	}
}

/// Validated carrier configuration consumed by the client.
#[derive(Clone, PartialEq, Eq)]
pub struct CarrierConfig {
	/// Carrier account identifier (OAuth `client_id`).
	pub account: String,
	/// Carrier account secret (OAuth `client_secret`).
	pub secret: TokenSecret,
	/// API base URL; its path always ends with `/`.
	pub base_url: Url,
}
impl CarrierConfig {
	/// Creates a new builder.
	pub fn builder() -> CarrierConfigBuilder {
		CarrierConfigBuilder::default()
	}

	/// Resolves an endpoint path (e.g. `orders/{uuid}`) against the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_url
			.join(path.trim_start_matches('/'))
			.map_err(|source| ConfigError::InvalidBaseUrl { source })
	}

	/// Token endpoint used by the client-credentials exchange.
	pub fn token_endpoint(&self) -> Result<Url, ConfigError> {
		self.endpoint("oauth/token")
	}
}
impl Debug for CarrierConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CarrierConfig")
			.field("account", &self.account)
			.field("secret", &"<redacted>")
			.field("base_url", &self.base_url.as_str())
			.finish()
	}
}

/// Builder for [`CarrierConfig`] values.
#[derive(Debug, Default)]
pub struct CarrierConfigBuilder {
	account: Option<String>,
	secret: Option<TokenSecret>,
	base_url: Option<Url>,
}
impl CarrierConfigBuilder {
	/// Sets the carrier account identifier.
	pub fn account(mut self, account: impl Into<String>) -> Self {
		self.account = Some(account.into());

		self
	}

	/// Sets the carrier account secret.
	pub fn secret(mut self, secret: impl Into<String>) -> Self {
		self.secret = Some(TokenSecret::new(secret));

		self
	}

	/// Sets an explicit API base URL.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Parses and sets an explicit API base URL.
	pub fn base_url_str(self, url: &str) -> Result<Self, ConfigError> {
		let url = Url::parse(url).map_err(|source| ConfigError::InvalidBaseUrl { source })?;

		Ok(self.base_url(url))
	}

	/// Uses the base URL of a well-known deployment.
	pub fn environment(mut self, environment: Environment) -> Self {
		// Static URLs always parse.
		self.base_url = Url::parse(environment.base_url()).ok();

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<CarrierConfig, ConfigError> {
		let account = self.account.filter(|v| !v.trim().is_empty()).ok_or(ConfigError::MissingAccount)?;
		let secret = self.secret.filter(|v| !v.is_empty()).ok_or(ConfigError::MissingSecret)?;
		let base_url = normalize_base_url(self.base_url.ok_or(ConfigError::MissingBaseUrl)?)?;

		Ok(CarrierConfig { account, secret, base_url })
	}
}

fn normalize_base_url(mut url: Url) -> Result<Url, ConfigError> {
	if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
		return Err(ConfigError::UnsupportedBaseUrl { url: url.to_string() });
	}
	if !url.path().ends_with('/') {
		let path = format!("{}/", url.path());

		url.set_path(&path);
	}

	url.set_query(None);
	url.set_fragment(None);

	Ok(url)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn builder() -> CarrierConfigBuilder {
		CarrierConfig::builder().account("account").secret("secret")
	}

	#[test]
	fn base_url_gains_trailing_slash() {
		let config = builder()
			.base_url_str("https://api.edu.cdek.ru/v2")
			.expect("Base URL should parse.")
			.build()
			.expect("Config should build.");

		assert_eq!(config.base_url.as_str(), "https://api.edu.cdek.ru/v2/");
		assert_eq!(
			config.endpoint("calculator/tarifflist").expect("Endpoint should join.").as_str(),
			"https://api.edu.cdek.ru/v2/calculator/tarifflist"
		);
		assert_eq!(
			config.token_endpoint().expect("Token endpoint should join.").as_str(),
			"https://api.edu.cdek.ru/v2/oauth/token"
		);
	}

	#[test]
	fn environments_resolve_known_hosts() {
		let config =
			builder().environment(Environment::Sandbox).build().expect("Config should build.");

		assert_eq!(config.base_url.host_str(), Some("api.edu.cdek.ru"));

		let config =
			builder().environment(Environment::Production).build().expect("Config should build.");

		assert_eq!(config.base_url.host_str(), Some("api.cdek.ru"));
	}

	#[test]
	fn build_rejects_missing_fields() {
		let err = CarrierConfig::builder()
			.secret("secret")
			.environment(Environment::Sandbox)
			.build()
			.expect_err("Missing account should fail.");

		assert!(matches!(err, ConfigError::MissingAccount));

		let err = CarrierConfig::builder()
			.account("account")
			.secret("")
			.environment(Environment::Sandbox)
			.build()
			.expect_err("Empty secret should fail.");

		assert!(matches!(err, ConfigError::MissingSecret));

		let err = builder().build().expect_err("Missing base URL should fail.");

		assert!(matches!(err, ConfigError::MissingBaseUrl));
	}

	#[test]
	fn build_rejects_unsupported_schemes() {
		let err = builder()
			.base_url_str("ftp://example.com/v2/")
			.expect("URL should parse.")
			.build()
			.expect_err("FTP base URL should fail.");

		assert!(matches!(err, ConfigError::UnsupportedBaseUrl { .. }));
		assert!(matches!(
			builder().base_url_str("not a url"),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
	}

	#[test]
	fn debug_redacts_secret() {
		let config =
			builder().environment(Environment::Sandbox).build().expect("Config should build.");

		assert!(!format!("{config:?}").contains("\"secret\""));
	}
}
