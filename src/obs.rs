//! Optional observability for carrier operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to wrap each operation in a `cdek_client.operation` span carrying the
//!   `operation` label. Failures that carry an HTTP status record it in the span's `status` field.
//! - Enable `metrics` to increment the `cdek_client_operation_total` counter on entry and on
//!   completion, labeled by `operation` and `outcome`.

// self
use crate::_prelude::*;

/// Client operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
	/// Client-credentials token exchange.
	Authenticate,
	/// Tariff calculation.
	Calculate,
	/// Delivery-point directory listing.
	DeliveryPoints,
	/// Delivery-point address lookup.
	ValidateAddress,
	/// Order creation.
	CreateOrder,
	/// Order lookup.
	GetOrder,
	/// Latest order status lookup.
	GetStatus,
}
impl OperationKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationKind::Authenticate => "authenticate",
			OperationKind::Calculate => "calculate",
			OperationKind::DeliveryPoints => "delivery_points",
			OperationKind::ValidateAddress => "validate_address",
			OperationKind::CreateOrder => "create_order",
			OperationKind::GetOrder => "get_order",
			OperationKind::GetStatus => "get_status",
		}
	}
}
impl Display for OperationKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl OperationOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			OperationOutcome::Attempt => "attempt",
			OperationOutcome::Success => "success",
			OperationOutcome::Failure => "failure",
		}
	}

	fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => OperationOutcome::Success,
			Err(_) => OperationOutcome::Failure,
		}
	}
}
impl Display for OperationOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs one carrier operation under its span and outcome counters.
///
/// The span never holds a guard across `.await`; the future is instrumented instead.
pub async fn observe<T, Fut>(kind: OperationKind, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	count(kind, OperationOutcome::Attempt);

	#[cfg(feature = "tracing")]
	let span = tracing::info_span!(
		"cdek_client.operation",
		operation = kind.as_str(),
		status = tracing::field::Empty
	);
	#[cfg(feature = "tracing")]
	let result = {
		use tracing::Instrument;

		fut.instrument(span.clone()).await
	};
	#[cfg(not(feature = "tracing"))]
	let result = fut.await;

	#[cfg(feature = "tracing")]
	{
		if let Some(status) = result.as_ref().err().and_then(Error::status) {
			span.record("status", status);
		}
	}

	count(kind, OperationOutcome::of(&result));

	result
}

fn count(kind: OperationKind, outcome: OperationOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"cdek_client_operation_total",
			"operation" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}
	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
