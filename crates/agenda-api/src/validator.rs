//! [`NinjasValidator`]: the API Ninjas phone-validation client.
//!
//! Issues `GET {endpoint}?number={phone}` with the credential in the
//! `X-Api-Key` header and reads `country` from the JSON reply. A missing
//! credential is not an error until the first lookup.

use agenda_core::phone::{PhoneInfo, PhoneValidator};
use reqwest::{Client, StatusCode};
use thiserror::Error;

/// Public API Ninjas endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.api-ninjas.com/v1/validatephone";

#[derive(Debug, Error)]
pub enum Error {
  #[error("no API key configured for phone validation")]
  MissingApiKey,

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("phone validation returned {0}")]
  Status(StatusCode),
}

/// Async client for the phone-validation service.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct NinjasValidator {
  client:   Client,
  endpoint: String,
  api_key:  Option<String>,
}

impl NinjasValidator {
  /// Build a client. No request timeout is set.
  pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Result<Self, Error> {
    let client = Client::builder().build()?;
    Ok(Self {
      client,
      endpoint: endpoint.into(),
      api_key: api_key.filter(|k| !k.is_empty()),
    })
  }
}

impl PhoneValidator for NinjasValidator {
  type Error = Error;

  async fn lookup(&self, phone: &str) -> Result<PhoneInfo, Error> {
    let key = self.api_key.as_deref().ok_or(Error::MissingApiKey)?;

    let resp = self
      .client
      .get(&self.endpoint)
      .query(&[("number", phone)])
      .header("X-Api-Key", key)
      .send()
      .await?;

    if resp.status() != StatusCode::OK {
      return Err(Error::Status(resp.status()));
    }
    Ok(resp.json::<PhoneInfo>().await?)
  }
}
