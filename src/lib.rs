//! Typed async client for the CDEK parcel-delivery REST API: tariff quotes, delivery-point
//! lookups, order creation, and status polling, each backed by a fresh client-credentials token.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod carrier;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod oauth;
pub mod obs;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use carrier::CarrierClient;
pub use config::{CarrierConfig, Environment};
pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
