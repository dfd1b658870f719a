//! Single-use bearer token issued for one carrier operation.

// self
use crate::{_prelude::*, auth::secret::TokenSecret};

/// Errors produced by [`TokenBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum TokenBuilderError {
	/// Issued when no access token value (or an empty one) was provided.
	#[error("Access token is required.")]
	MissingAccessToken,
	/// Issued when the declared lifetime is negative.
	#[error("Token lifetime cannot be negative.")]
	NegativeExpiry,
	/// Issued when `issued_at + expires_in` falls outside the representable date range.
	#[error("Token expiry is out of range.")]
	ExpiryOverflow,
}

/// Bearer token returned by the carrier's `oauth/token` endpoint.
///
/// A token lives for exactly one client operation; nothing in the crate stores or reuses it.
#[derive(Clone)]
pub struct Token {
	/// Bearer secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Token type reported by the endpoint (usually `bearer`).
	pub token_type: String,
	/// Declared lifetime (`expires_in`).
	pub expires_in: Duration,
	/// Space-delimited scope string, when reported.
	pub scope: Option<String>,
	/// Token identifier (`jti`), when reported.
	pub jti: Option<String>,
	/// Instant the exchange completed.
	pub issued_at: OffsetDateTime,
}
impl Token {
	/// Returns a builder for constructing tokens.
	pub fn builder() -> TokenBuilder {
		TokenBuilder::default()
	}

	/// Value for the `Authorization` header.
	pub fn bearer(&self) -> String {
		format!("Bearer {}", self.access_token.expose())
	}

	/// Absolute expiry derived from `issued_at + expires_in`.
	///
	/// Returns `None` when the sum is not representable.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.issued_at.checked_add(self.expires_in)
	}

	/// Returns `true` if the token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.expires_at().is_some_and(|expires_at| instant >= expires_at)
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.field("scope", &self.scope)
			.field("jti", &self.jti)
			.field("issued_at", &self.issued_at)
			.finish()
	}
}

/// Builder for [`Token`].
#[derive(Clone, Debug, Default)]
pub struct TokenBuilder {
	access_token: Option<TokenSecret>,
	token_type: Option<String>,
	expires_in: Option<Duration>,
	scope: Option<String>,
	jti: Option<String>,
	issued_at: Option<OffsetDateTime>,
}
impl TokenBuilder {
	/// Provides the access token value.
	pub fn access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(token));

		self
	}

	/// Sets the token type.
	pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Sets the declared lifetime.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Sets the reported scope string.
	pub fn scope(mut self, scope: Option<String>) -> Self {
		self.scope = scope;

		self
	}

	/// Sets the reported token identifier.
	pub fn jti(mut self, jti: Option<String>) -> Self {
		self.jti = jti;

		self
	}

	/// Sets the issued-at instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Consumes the builder and produces a [`Token`].
	pub fn build(self) -> Result<Token, TokenBuilderError> {
		let access_token = self
			.access_token
			.filter(|secret| !secret.is_empty())
			.ok_or(TokenBuilderError::MissingAccessToken)?;
		let expires_in = self.expires_in.unwrap_or(Duration::ZERO);

		if expires_in.is_negative() {
			return Err(TokenBuilderError::NegativeExpiry);
		}

		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);

		if issued_at.checked_add(expires_in).is_none() {
			return Err(TokenBuilderError::ExpiryOverflow);
		}

		Ok(Token {
			access_token,
			token_type: self.token_type.unwrap_or_else(|| "bearer".into()),
			expires_in,
			scope: self.scope,
			jti: self.jti,
			issued_at,
		})
	}
}
